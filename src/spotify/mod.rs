//! # Spotify Integration Module
//!
//! HTTP layer between MusicBud and the Spotify Web API.
//!
//! ```text
//! Session controller (cli)
//!          ↓
//! Spotify Integration Layer
//!     ├── auth      (OAuth 2.0 PKCE, callback detection)
//!     ├── library   (saved tracks, playlists, albums, pagination)
//!     └── features  (audio-feature enrichment in batches of 100)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Request discipline
//!
//! Requests of a single operation are issued strictly one after another,
//! each awaited before the next is sent. Nothing is retried: a failed
//! request ends the operation, except for audio-feature batches which are
//! skipped (see [`features`]).
//!
//! ## Endpoints
//!
//! All URLs come from [`Endpoints`], which defaults to the public Spotify
//! hosts and can be pointed anywhere through the environment.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{AppError, Res, config};

pub mod auth;
pub mod features;
pub mod library;

/// Where the authorization server and the Web API live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub api_url: String,
    pub redirect_uri: String,
}

impl Endpoints {
    pub fn from_env() -> Self {
        Endpoints {
            authorize_url: config::spotify_apiauth_url(),
            token_url: config::spotify_apitoken_url(),
            api_url: config::spotify_apiurl(),
            redirect_uri: config::spotify_redirect_uri(),
        }
    }

    /// Absolute URL of an API path such as `/me/tracks`.
    pub fn api(&self, path: &str) -> String {
        format!(
            "{uri}{path}",
            uri = self.api_url.trim_end_matches('/'),
            path = path
        )
    }
}

/// Authenticated GET that decodes a JSON body.
///
/// A non-success status becomes [`AppError::Fetch`] carrying `context`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    context: &str,
) -> Res<T> {
    let response = client.get(url).bearer_auth(token).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch {
            context: context.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.json::<T>().await?)
}
