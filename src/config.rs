//! Configuration management for MusicBud.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Unlike credentials, every endpoint has a
//! sensible default, so a bare installation only needs a client id.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from `musicbud/.env` in the local data directory.
///
/// The directory is created if missing. A missing `.env` file is not an
/// error since every setting has a default or can be given on the command
/// line; a malformed one is.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/musicbud/.env`
/// - macOS: `~/Library/Application Support/musicbud/.env`
/// - Windows: `%LOCALAPPDATA%/musicbud/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Directory holding the `.env` file and the persisted session values.
///
/// `MUSICBUD_DATA_DIR` overrides the platform location.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("MUSICBUD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musicbud");
    path
}

/// Address the local callback server binds to, e.g. `127.0.0.1:8888`.
///
/// Must agree with the host and port of [`spotify_redirect_uri`].
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client id from `SPOTIFY_API_AUTH_CLIENT_ID`, if set and non-empty.
pub fn spotify_client_id() -> Option<String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match a redirect URI registered in the Spotify application
/// settings, and point at the `/callback` route of the local server.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// How long the session waits for the browser to hit the callback.
pub fn callback_timeout() -> Duration {
    let secs = env::var("MUSICBUD_CALLBACK_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_CALLBACK_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
