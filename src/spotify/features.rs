//! Audio-feature enrichment.
//!
//! Features are requested for up to [`FEATURES_BATCH_SIZE`] ids at a time and
//! attached to the tracks by position: the n-th feature record of the
//! concatenated responses belongs to the n-th track. That alignment only
//! holds while every batch returns one entry per id. A batch answered with
//! a non-success status is skipped, which shifts every later track onto the
//! wrong features; this is logged, not corrected.

use crate::{
    Res,
    management::Session,
    spotify::library::LibraryFetcher,
    types::{AudioFeatures, AudioFeaturesResponse, EnrichedTrack, Track},
    utils, warning,
};

pub const FEATURES_BATCH_SIZE: usize = 100;

impl LibraryFetcher {
    /// Attaches audio features to `tracks`.
    ///
    /// Tracks without an id are dropped first. Every remaining track, repeats
    /// included, sends its id, so the feature records line up one-to-one with
    /// the tracks. An empty working set returns immediately without touching
    /// the network.
    pub async fn enrich(&self, session: &Session, tracks: Vec<Track>) -> Res<Vec<EnrichedTrack>> {
        let mut tracks = tracks;
        utils::remove_tracks_without_id(&mut tracks);

        let ids = utils::track_ids(&tracks);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let token = session.bearer()?;
        let url = self.endpoints().api("/audio-features");
        let mut features: Vec<Option<AudioFeatures>> = Vec::with_capacity(ids.len());

        for (index, batch) in ids.chunks(FEATURES_BATCH_SIZE).enumerate() {
            let response = self
                .client()
                .get(&url)
                .bearer_auth(token)
                .query(&[("ids", batch.join(","))])
                .send()
                .await?;

            if !response.status().is_success() {
                warning!(
                    "Skipping audio features batch {batch} ({count} tracks): HTTP {status}",
                    batch = index + 1,
                    count = batch.len(),
                    status = response.status().as_u16()
                );
                continue;
            }

            let page = response.json::<AudioFeaturesResponse>().await?;
            features.extend(page.audio_features);
        }

        if features.len() != tracks.len() {
            warning!(
                "Received audio features for {received} of {total} tracks; features may be attached to the wrong tracks.",
                received = features.len(),
                total = tracks.len()
            );
        }

        Ok(zip_features(tracks, features))
    }
}

/// Pairs tracks and features by index. Missing or `null` entries become an
/// empty feature record.
pub fn zip_features(
    tracks: Vec<Track>,
    features: Vec<Option<AudioFeatures>>,
) -> Vec<EnrichedTrack> {
    let mut features = features.into_iter();

    tracks
        .into_iter()
        .map(|track| EnrichedTrack {
            track,
            audio_features: features.next().flatten().unwrap_or_default(),
        })
        .collect()
}
