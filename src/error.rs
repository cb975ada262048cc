use thiserror::Error;

/// Everything that can go wrong during a session.
///
/// Each variant is caught at the operation that raised it and turned into a
/// human-readable status; none of them ends the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// User input was rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// The session is not in a state that allows the operation, e.g. the
    /// code verifier vanished from storage or no access token exists yet.
    #[error("{0}")]
    Session(String),

    /// The token endpoint answered with a non-success status.
    #[error("Token exchange failed: {status} - {body}")]
    Auth { status: u16, body: String },

    /// A resource endpoint answered with a non-success status.
    #[error("{context} (HTTP {status})")]
    Fetch { context: String, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reading or writing the local store, or binding the callback server.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
