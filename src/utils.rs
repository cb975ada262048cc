use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::{Artist, Image, Track};

const PITCH_CLASSES: [&str; 12] = [
    "C", "C♯/D♭", "D", "D♯/E♭", "E", "F", "F♯/G♭", "G", "G♯/A♭", "A", "A♯/B♭", "B",
];

/// 32 random bytes, URL-safe base64 without padding (43 characters).
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Human-readable key and mode, e.g. `C♯/D♭ Major`.
///
/// Mode `1` is major, every other value minor. A key outside `0..=11`
/// (the API uses `-1` when no key was detected) is shown as `Unknown`.
pub fn key_name(key: Option<i32>, mode: Option<i32>) -> String {
    let Some(key) = key else {
        return "Unknown".to_string();
    };

    let pitch = usize::try_from(key)
        .ok()
        .and_then(|k| PITCH_CLASSES.get(k))
        .copied()
        .unwrap_or("Unknown");
    let mode = if mode == Some(1) { "Major" } else { "Minor" };

    format!("{} {}", pitch, mode)
}

/// Formats milliseconds as `M:SS`; zero or missing is `Unknown`.
pub fn format_duration(ms: Option<u64>) -> String {
    match ms {
        Some(ms) if ms > 0 => {
            let minutes = ms / 60_000;
            let seconds = (ms % 60_000) / 1000;
            format!("{}:{:02}", minutes, seconds)
        }
        _ => "Unknown".to_string(),
    }
}

pub fn format_tempo(tempo: Option<f64>) -> String {
    match tempo {
        Some(bpm) => format!("{} BPM", bpm.round() as i64),
        None => "N/A".to_string(),
    }
}

/// Scales a `0.0..=1.0` feature to a whole percentage.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", (v * 100.0).round() as i64),
        None => "N/A".to_string(),
    }
}

pub fn format_time_signature(beats: Option<u32>) -> String {
    match beats {
        Some(beats) => format!("{}/4", beats),
        None => "N/A".to_string(),
    }
}

pub fn join_artists(artists: &[Artist]) -> String {
    if artists.is_empty() {
        return "Unknown Artist".to_string();
    }

    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Smallest image by width; without widths the last one, since the API
/// lists images largest first.
pub fn smallest_image(images: &[Image]) -> Option<&Image> {
    images
        .iter()
        .filter(|i| i.width.is_some())
        .min_by_key(|i| i.width)
        .or_else(|| images.last())
}

/// The medium-sized image used in the detail view.
pub fn detail_image(images: &[Image]) -> Option<&Image> {
    images.get(1).or_else(|| images.first())
}

/// Drops tracks without a non-empty id. Repeated tracks stay, since a
/// playlist may hold the same song more than once.
pub fn remove_tracks_without_id(tracks: &mut Vec<Track>) {
    tracks.retain(|track| track.track_id().is_some());
}

/// Non-empty ids in track order, repeats included.
pub fn track_ids(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| t.track_id())
        .map(str::to_string)
        .collect()
}
