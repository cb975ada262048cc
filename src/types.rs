use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// What the authorization server told us through the redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Cancelled(String),
}

/// Slot shared between the callback route and the waiting session.
pub type CallbackState = Arc<Mutex<Option<CallbackOutcome>>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

/// A track as returned by the Web API.
///
/// Album track listings return simplified tracks without an `album`, and
/// playlists may contain local files without an `id`, so both are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Track {
    /// The id, if present and non-empty.
    pub fn track_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn album_name(&self) -> Option<&str> {
        self.album.as_ref().map(|a| a.name.as_str())
    }

    pub fn release_date(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.release_date.as_deref())
    }

    pub fn first_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    /// Cover images of the album, falling back to the track's own images.
    pub fn cover_images(&self) -> &[Image] {
        match &self.album {
            Some(album) if !album.images.is_empty() => &album.images,
            _ => &self.images,
        }
    }
}

/// Entry of `/me/tracks` and `/playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    #[serde(default)]
    pub track: Option<Track>,
}

/// Entry of `/me/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One page of an offset-paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub key: Option<i32>,
    #[serde(default)]
    pub mode: Option<i32>,
    #[serde(default)]
    pub time_signature: Option<u32>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub acousticness: Option<f64>,
    #[serde(default)]
    pub instrumentalness: Option<f64>,
    #[serde(default)]
    pub liveness: Option<f64>,
    #[serde(default)]
    pub speechiness: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Unknown ids come back as `null` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

/// A track of the working set together with its audio features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub audio_features: AudioFeatures,
}

/// The three kinds of source the library can be built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    #[default]
    Liked,
    Playlists,
    Albums,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::Liked => "liked",
            SourceKind::Playlists => "playlists",
            SourceKind::Albums => "albums",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liked" | "liked-songs" | "likes" => Ok(SourceKind::Liked),
            "playlists" | "playlist" => Ok(SourceKind::Playlists),
            "albums" | "album" => Ok(SourceKind::Albums),
            other => Err(format!(
                "unknown source '{}', expected liked, playlists or albums",
                other
            )),
        }
    }
}

/// A concrete source to load tracks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Liked,
    Playlist(String),
    Album(String),
}

impl Source {
    /// How the source is named in status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Liked => "liked songs",
            Source::Playlist(_) => "playlist",
            Source::Album(_) => "album",
        }
    }
}

/// A playlist or album offered for selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub id: String,
    pub label: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub cover: String,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub tempo: String,
    pub key: String,
}

#[derive(Tabled)]
pub struct OptionTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
}

#[derive(Tabled)]
pub struct DetailTableRow {
    pub field: &'static str,
    pub value: String,
}
