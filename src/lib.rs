//! MusicBud library
//!
//! This library provides everything behind the `musicbud` terminal client:
//! authorizing against the Spotify Web API with PKCE, fetching a user's tracks
//! from liked songs, a playlist or an album, enriching them with audio features,
//! and browsing the result with search and sort.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local callback server
//! - `cli` - Session controller, event dispatch and the interactive prompt
//! - `config` - Configuration management and environment variables
//! - `error` - The crate-wide error type
//! - `management` - Session value and the persisted client id / verifier store
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and display formatting
//! - `view` - Library view state and rendering
//!
//! # Example
//!
//! ```
//! use musicbud::{cli, config};
//!
//! #[tokio::main]
//! async fn main() {
//!     if let Err(e) = config::load_env().await {
//!         eprintln!("Configuration error: {}", e);
//!     }
//!     cli::session(None).await;
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod view;

pub use error::AppError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation of the crate reports an [`AppError`], which the
/// session controller turns into a status message for the user.
pub type Res<T> = std::result::Result<T, AppError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for authorization...");
/// info!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for failures during startup, before a session exists. Everything
/// that happens inside a session is reported as a status instead.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as a failed
/// request or a skipped audio-features batch.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
