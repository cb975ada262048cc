use crate::{AppError, Res};

/// The authorized (or about to be authorized) connection to the API.
///
/// The access token only ever lives here, in memory, for the lifetime of
/// the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    client_id: String,
    access_token: Option<String>,
}

impl Session {
    pub fn new(client_id: impl Into<String>) -> Self {
        Session {
            client_id: client_id.into(),
            access_token: None,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authorized(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn authorize(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    /// Token for an authenticated request.
    ///
    /// Every resource request goes through here, so nothing is sent before
    /// the token exchange has succeeded.
    pub fn bearer(&self) -> Res<&str> {
        self.access_token()
            .ok_or_else(|| AppError::Session("Not connected to Spotify yet".to_string()))
    }
}
