use crate::{
    types::{DetailTableRow, EnrichedTrack, TrackTableRow},
    utils,
};

/// What the track list shows for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCard {
    /// Smallest cover available; `None` renders blank.
    pub cover_url: Option<String>,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub tempo: String,
    pub key: String,
}

impl From<&EnrichedTrack> for TrackCard {
    fn from(enriched: &EnrichedTrack) -> Self {
        let track = &enriched.track;
        let features = &enriched.audio_features;

        TrackCard {
            cover_url: utils::smallest_image(track.cover_images()).map(|i| i.url.clone()),
            name: track.name.clone(),
            artists: utils::join_artists(&track.artists),
            album: track.album_name().unwrap_or("Unknown Album").to_string(),
            tempo: utils::format_tempo(features.tempo),
            key: utils::key_name(features.key, features.mode),
        }
    }
}

impl TrackCard {
    pub fn table_row(&self, position: usize) -> TrackTableRow {
        TrackTableRow {
            position,
            cover: self.cover_url.clone().unwrap_or_default(),
            name: self.name.clone(),
            artists: self.artists.clone(),
            album: self.album.clone(),
            tempo: self.tempo.clone(),
            key: self.key.clone(),
        }
    }
}

/// Extended metadata for the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDetail {
    pub cover_url: Option<String>,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub tempo: String,
    pub key: String,
    pub time_signature: String,
    pub release_date: String,
    pub duration: String,
    pub energy: String,
    pub danceability: String,
    pub valence: String,
    pub acousticness: String,
    pub instrumentalness: String,
    pub liveness: String,
    pub speechiness: String,
}

impl From<&EnrichedTrack> for TrackDetail {
    fn from(enriched: &EnrichedTrack) -> Self {
        let track = &enriched.track;
        let features = &enriched.audio_features;

        TrackDetail {
            cover_url: utils::detail_image(track.cover_images()).map(|i| i.url.clone()),
            name: track.name.clone(),
            artists: utils::join_artists(&track.artists),
            album: track.album_name().unwrap_or("Unknown Album").to_string(),
            tempo: utils::format_tempo(features.tempo),
            key: utils::key_name(features.key, features.mode),
            time_signature: utils::format_time_signature(features.time_signature),
            release_date: track.release_date().unwrap_or("Unknown").to_string(),
            duration: utils::format_duration(track.duration_ms),
            energy: utils::format_percent(features.energy),
            danceability: utils::format_percent(features.danceability),
            valence: utils::format_percent(features.valence),
            acousticness: utils::format_percent(features.acousticness),
            instrumentalness: utils::format_percent(features.instrumentalness),
            liveness: utils::format_percent(features.liveness),
            speechiness: utils::format_percent(features.speechiness),
        }
    }
}

impl TrackDetail {
    pub fn table_rows(&self) -> Vec<DetailTableRow> {
        let row = |field: &'static str, value: &str| DetailTableRow {
            field,
            value: value.to_string(),
        };

        vec![
            row("Artist", &self.artists),
            row("Album", &self.album),
            row("Tempo", &self.tempo),
            row("Key", &self.key),
            row("Time Signature", &self.time_signature),
            row("Release Date", &self.release_date),
            row("Duration", &self.duration),
            row("Energy", &self.energy),
            row("Danceability", &self.danceability),
            row("Valence", &self.valence),
            row("Acousticness", &self.acousticness),
            row("Instrumentalness", &self.instrumentalness),
            row("Liveness", &self.liveness),
            row("Speechiness", &self.speechiness),
            row("Cover", self.cover_url.as_deref().unwrap_or("")),
        ]
    }
}
