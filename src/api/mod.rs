//! # API Module
//!
//! HTTP endpoints of the local server that catches the OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /callback`: reads `code` or `error` from the query,
//!   stores the outcome for the waiting session and answers with a page that
//!   removes both parameters from the address bar.
//! - [`health`] - `GET /health`: name, version and status of the app.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use musicbud::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
