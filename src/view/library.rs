use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    types::EnrichedTrack,
    view::card::{TrackCard, TrackDetail},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Artist,
    Album,
    ReleaseDate,
    Tempo,
    Energy,
    Danceability,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Name,
        SortField::Artist,
        SortField::Album,
        SortField::ReleaseDate,
        SortField::Tempo,
        SortField::Energy,
        SortField::Danceability,
    ];
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::Name => "name",
            SortField::Artist => "artist",
            SortField::Album => "album",
            SortField::ReleaseDate => "release_date",
            SortField::Tempo => "tempo",
            SortField::Energy => "energy",
            SortField::Danceability => "danceability",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        SortField::ALL
            .into_iter()
            .find(|field| field.to_string() == normalized)
            .ok_or_else(|| format!("unknown sort field '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// The loaded tracks and the projection the user is looking at.
///
/// `current_tracks` is never edited directly: every change to the search
/// term, the sort, or the underlying tracks recomputes it from `all_tracks`.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    all_tracks: Vec<EnrichedTrack>,
    current_tracks: Vec<EnrichedTrack>,
    search_term: String,
    sort_field: Option<SortField>,
    direction: SortDirection,
    detail: Option<TrackDetail>,
}

impl LibraryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in the tracks of a freshly loaded source.
    pub fn replace_tracks(&mut self, tracks: Vec<EnrichedTrack>) {
        self.all_tracks = tracks;
        self.detail = None;
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
        self.recompute();
    }

    /// `None` keeps the order the tracks were loaded in.
    pub fn set_sort(&mut self, field: Option<SortField>, direction: SortDirection) {
        self.sort_field = field;
        self.direction = direction;
        self.recompute();
    }

    pub fn set_sort_field(&mut self, field: Option<SortField>) {
        self.set_sort(field, self.direction);
    }

    pub fn toggle_sort_direction(&mut self) {
        self.set_sort(self.sort_field, self.direction.toggled());
    }

    pub fn all_tracks(&self) -> &[EnrichedTrack] {
        &self.all_tracks
    }

    pub fn current_tracks(&self) -> &[EnrichedTrack] {
        &self.current_tracks
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn cards(&self) -> Vec<TrackCard> {
        self.current_tracks.iter().map(TrackCard::from).collect()
    }

    /// Opens the detail of the track at `index` of the current projection.
    pub fn show_detail(&mut self, index: usize) -> Option<&TrackDetail> {
        let detail = self.current_tracks.get(index).map(TrackDetail::from)?;
        self.detail = Some(detail);
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&TrackDetail> {
        self.detail.as_ref()
    }

    fn recompute(&mut self) {
        self.current_tracks = filter_tracks(&self.all_tracks, &self.search_term);
        if let Some(field) = self.sort_field {
            sort_tracks(&mut self.current_tracks, field, self.direction);
        }
    }
}

/// Tracks whose name, any artist name or album name contains `term`,
/// ignoring case. A blank term keeps everything.
pub fn filter_tracks(tracks: &[EnrichedTrack], term: &str) -> Vec<EnrichedTrack> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return tracks.to_vec();
    }

    tracks
        .iter()
        .filter(|enriched| matches_term(enriched, &term))
        .cloned()
        .collect()
}

fn matches_term(enriched: &EnrichedTrack, term: &str) -> bool {
    let track = &enriched.track;

    track.name.to_lowercase().contains(term)
        || track
            .artists
            .iter()
            .any(|artist| artist.name.to_lowercase().contains(term))
        || track
            .album_name()
            .is_some_and(|album| album.to_lowercase().contains(term))
}

/// Stable sort: equal keys keep their relative order in both directions.
pub fn sort_tracks(tracks: &mut [EnrichedTrack], field: SortField, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => tracks.sort_by(|a, b| compare(a, b, field)),
        SortDirection::Descending => tracks.sort_by(|a, b| compare(b, a, field)),
    }
}

fn compare(a: &EnrichedTrack, b: &EnrichedTrack, field: SortField) -> Ordering {
    match field {
        SortField::Name => {
            lowercase(Some(a.track.name.as_str())).cmp(&lowercase(Some(b.track.name.as_str())))
        }
        SortField::Artist => {
            lowercase(a.track.first_artist()).cmp(&lowercase(b.track.first_artist()))
        }
        SortField::Album => lowercase(a.track.album_name()).cmp(&lowercase(b.track.album_name())),
        SortField::ReleaseDate => a
            .track
            .release_date()
            .unwrap_or_default()
            .cmp(b.track.release_date().unwrap_or_default()),
        SortField::Tempo => numeric(a.audio_features.tempo, b.audio_features.tempo),
        SortField::Energy => numeric(a.audio_features.energy, b.audio_features.energy),
        SortField::Danceability => {
            numeric(a.audio_features.danceability, b.audio_features.danceability)
        }
    }
}

fn lowercase(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

// missing values sort as 0
fn numeric(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))
}
