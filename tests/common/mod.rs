#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    routing::{get, post},
};
use serde_json::{Value, json};

use musicbud::{
    management::{LocalStore, Session},
    spotify::Endpoints,
    types::{Album, Artist, AudioFeatures, EnrichedTrack, Image, SelectorOption, Track},
    view::{StatusKind, TrackCard, TrackDetail, View},
};

pub const ACCESS_TOKEN: &str = "tok1";
pub const GOOD_CODE: &str = "xyz";

/// An in-process stand-in for the accounts service and the Web API.
///
/// Every request is recorded as `path?query`. Token exchanges only succeed
/// for [`GOOD_CODE`]; resource routes demand `Bearer tok1`.
pub struct FakeSpotify {
    pub base: String,
    state: FakeState,
}

#[derive(Clone, Default)]
struct FakeState {
    base: String,
    liked: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<String>>>,
    token_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    feature_batches: Arc<Mutex<Vec<usize>>>,
}

impl FakeState {
    fn record(&self, uri: &Uri) {
        let entry = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());
        self.requests.lock().unwrap().push(entry);
    }
}

impl FakeSpotify {
    /// Serves the fake on an ephemeral port; `liked` are the saved tracks.
    pub async fn start(liked: Vec<Value>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let state = FakeState {
            base: base.clone(),
            liked: Arc::new(liked),
            ..Default::default()
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/tracks", get(saved_tracks))
            .route("/v1/me/playlists", get(playlists))
            .route("/v1/me/albums", get(albums))
            .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
            .route("/v1/albums/{id}/tracks", get(album_tracks))
            .route("/v1/audio-features", get(audio_features))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeSpotify { base, state }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            authorize_url: format!("{}/authorize", self.base),
            token_url: format!("{}/api/token", self.base),
            api_url: format!("{}/v1", self.base),
            redirect_uri: format!("{}/callback", self.base),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Recorded requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with(prefix))
            .collect()
    }

    pub fn token_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.token_forms.lock().unwrap().clone()
    }

    /// Number of ids asked for by each audio-features request, in order.
    pub fn feature_batches(&self) -> Vec<usize> {
        self.state.feature_batches.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "status": 401, "message": "Invalid access token" } })),
    )
}

async fn token(
    State(state): State<FakeState>,
    uri: Uri,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.record(&uri);
    let code = form.get("code").cloned().unwrap_or_default();
    state.token_forms.lock().unwrap().push(form);

    if code == GOOD_CODE {
        (
            StatusCode::OK,
            json!({ "access_token": ACCESS_TOKEN, "token_type": "Bearer", "expires_in": 3600 })
                .to_string(),
        )
    } else {
        (StatusCode::BAD_REQUEST, "invalid_grant".to_string())
    }
}

async fn saved_tracks(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }

    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    let offset: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);

    let items: Vec<Value> = state
        .liked
        .iter()
        .skip(offset)
        .take(limit)
        .map(|track| json!({ "added_at": "2024-01-01T00:00:00Z", "track": track }))
        .collect();
    let next = (offset + limit < state.liked.len()).then(|| {
        format!(
            "{}/v1/me/tracks?offset={}&limit={}",
            state.base,
            offset + limit,
            limit
        )
    });

    (StatusCode::OK, Json(json!({ "items": items, "next": next })))
}

async fn playlists(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "id": "pl1", "name": "Road Trip" },
                { "id": "pl2", "name": "Focus" }
            ],
            "next": format!("{}/v1/me/playlists?offset=50&limit=50", state.base)
        })),
    )
}

async fn albums(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "added_at": "2024-01-01T00:00:00Z", "album": {
                    "id": "al1",
                    "name": "Blue",
                    "release_date": "1971-06-22",
                    "artists": [{ "id": "jm", "name": "Joni Mitchell" }]
                }},
                { "album": { "id": "al2", "name": "Untitled", "artists": [] } }
            ],
            "next": null
        })),
    )
}

/// `pl1` holds two real tracks, a removed entry and a local file.
/// Any other id is unknown.
async fn playlist_tracks(
    State(state): State<FakeState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }
    if id != "pl1" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "status": 404, "message": "Not found." } })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "track": track_json("p1", "Carey", "Joni Mitchell", "Blue") },
                { "track": null },
                { "track": { "id": null, "name": "Local Demo", "artists": [] } },
                { "track": track_json("p2", "River", "Joni Mitchell", "Blue") }
            ],
            "next": null
        })),
    )
}

/// Simplified tracks without `album`; `next` is set but never followed.
async fn album_tracks(
    State(state): State<FakeState>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }

    (
        StatusCode::OK,
        Json(json!({
            "items": [
                { "id": format!("{}-1", id), "name": "All I Want", "duration_ms": 214000,
                  "artists": [{ "name": "Joni Mitchell" }] },
                { "id": format!("{}-2", id), "name": "My Old Man", "duration_ms": 214000,
                  "artists": [{ "name": "Joni Mitchell" }] }
            ],
            "next": format!("{}/v1/albums/{}/tracks?offset=50&limit=50", state.base, id)
        })),
    )
}

/// A batch containing an id starting with `bad` fails with 500; ids
/// starting with `null` are unknown and come back as `null`.
async fn audio_features(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.record(&uri);
    if !authorized(&headers) {
        return unauthorized();
    }

    let ids: Vec<String> = query
        .get("ids")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    state.feature_batches.lock().unwrap().push(ids.len());

    if ids.iter().any(|id| id.starts_with("bad")) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "status": 500, "message": "Server error" } })),
        );
    }

    let features: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            if id.starts_with("null") {
                Value::Null
            } else {
                json!({
                    "id": id,
                    "tempo": 100.0 + i as f64,
                    "key": 1,
                    "mode": 1,
                    "time_signature": 4,
                    "energy": 0.5,
                    "danceability": 0.25,
                    "valence": 0.75,
                    "acousticness": 0.1,
                    "instrumentalness": 0.0,
                    "liveness": 0.2,
                    "speechiness": 0.05,
                    "duration_ms": 214000
                })
            }
        })
        .collect();

    (StatusCode::OK, Json(json!({ "audio_features": features })))
}

pub fn track_json(id: &str, name: &str, artist: &str, album: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration_ms": 215000,
        "artists": [{ "id": format!("{}-artist", id), "name": artist }],
        "album": {
            "id": format!("{}-album", id),
            "name": album,
            "release_date": "2020-01-01",
            "images": [
                { "url": "https://i.scdn.co/image/640", "width": 640, "height": 640 },
                { "url": "https://i.scdn.co/image/300", "width": 300, "height": 300 },
                { "url": "https://i.scdn.co/image/64", "width": 64, "height": 64 }
            ]
        }
    })
}

/// `count` saved tracks with ids `t0`, `t1`, ...
pub fn liked_tracks(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            track_json(
                &format!("t{}", i),
                &format!("Song {}", i),
                "Some Artist",
                "Some Album",
            )
        })
        .collect()
}

pub fn track(id: &str) -> Track {
    Track {
        id: Some(id.to_string()),
        name: format!("Song {}", id),
        artists: vec![Artist {
            id: None,
            name: "Some Artist".to_string(),
        }],
        ..Default::default()
    }
}

pub fn authorized_session() -> Session {
    let mut session = Session::new("abc123");
    session.authorize(ACCESS_TOKEN);
    session
}

/// A fully populated enriched track for view tests.
pub fn enriched(
    name: &str,
    artist: &str,
    album: &str,
    release_date: &str,
    tempo: Option<f64>,
    energy: Option<f64>,
) -> EnrichedTrack {
    EnrichedTrack {
        track: Track {
            id: Some(name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            artists: vec![Artist {
                id: None,
                name: artist.to_string(),
            }],
            album: Some(Album {
                id: None,
                name: album.to_string(),
                release_date: Some(release_date.to_string()),
                images: vec![
                    Image {
                        url: "https://img/640".to_string(),
                        width: Some(640),
                        height: Some(640),
                    },
                    Image {
                        url: "https://img/300".to_string(),
                        width: Some(300),
                        height: Some(300),
                    },
                    Image {
                        url: "https://img/64".to_string(),
                        width: Some(64),
                        height: Some(64),
                    },
                ],
                artists: Vec::new(),
            }),
            duration_ms: Some(185_000),
            images: Vec::new(),
        },
        audio_features: AudioFeatures {
            tempo,
            energy,
            ..Default::default()
        },
    }
}

pub fn temp_store() -> (tempfile::TempDir, LocalStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::at(dir.path());
    (dir, store)
}

/// Everything handed to a [`View`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Status(String, StatusKind),
    Error(String),
    Loading(bool),
    Library,
    PlaylistOptions(Vec<SelectorOption>),
    AlbumOptions(Vec<SelectorOption>),
    Tracks(Vec<TrackCard>),
    Detail(TrackDetail),
    CloseDetail,
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub shown: Vec<Shown>,
}

impl RecordingView {
    pub fn statuses(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Status(message, _) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_tracks(&self) -> Option<&Vec<TrackCard>> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Tracks(cards) => Some(cards),
            _ => None,
        })
    }

    pub fn library_shown(&self) -> bool {
        self.shown.contains(&Shown::Library)
    }
}

impl View for RecordingView {
    fn show_status(&mut self, message: &str, kind: StatusKind) {
        self.shown.push(Shown::Status(message.to_string(), kind));
    }

    fn show_error(&mut self, message: &str) {
        self.shown.push(Shown::Error(message.to_string()));
    }

    fn show_loading(&mut self, loading: bool) {
        self.shown.push(Shown::Loading(loading));
    }

    fn show_library(&mut self) {
        self.shown.push(Shown::Library);
    }

    fn show_playlist_options(&mut self, options: &[SelectorOption]) {
        self.shown.push(Shown::PlaylistOptions(options.to_vec()));
    }

    fn show_album_options(&mut self, options: &[SelectorOption]) {
        self.shown.push(Shown::AlbumOptions(options.to_vec()));
    }

    fn render_tracks(&mut self, cards: &[TrackCard]) {
        self.shown.push(Shown::Tracks(cards.to_vec()));
    }

    fn show_detail(&mut self, detail: &TrackDetail) {
        self.shown.push(Shown::Detail(detail.clone()));
    }

    fn close_detail(&mut self) {
        self.shown.push(Shown::CloseDetail);
    }
}
