use std::{collections::HashMap, time::Duration};

use reqwest::{Client, Url};

use crate::{
    AppError, Res,
    management::{LocalStore, Session},
    spotify::Endpoints,
    types::{CallbackOutcome, CallbackState, TokenResponse},
    utils, warning,
};

/// Read-only access to the library, playlists (including collaborative
/// ones) and the profile.
pub const SCOPES: [&str; 4] = [
    "user-library-read",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-read-private",
];

/// A prepared authorization request, ready to be opened in a browser.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub session: Session,
    pub url: String,
}

/// Starts the PKCE flow for `client_id`.
///
/// 1. **Validation**: the trimmed client id must not be empty
/// 2. **Persistence**: the client id is remembered for the next run
/// 3. **PKCE Setup**: a fresh verifier is generated and stored, and its
///    SHA-256 challenge is derived
/// 4. **URL**: the authorize URL carrying the challenge is built
///
/// The caller is responsible for sending the user to the returned URL.
pub async fn begin_authorization(
    store: &LocalStore,
    endpoints: &Endpoints,
    client_id: &str,
) -> Res<AuthorizationRequest> {
    let client_id = client_id.trim();
    if client_id.is_empty() {
        return Err(AppError::Validation(
            "Please enter your Spotify Client ID".to_string(),
        ));
    }

    store.set_client_id(client_id).await?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // Store verifier before redirect
    store.set_code_verifier(&code_verifier).await?;

    let url = authorize_url(endpoints, client_id, &code_challenge)?;

    Ok(AuthorizationRequest {
        session: Session::new(client_id),
        url,
    })
}

/// Builds the authorize URL with the S256 challenge and the fixed scopes.
pub fn authorize_url(endpoints: &Endpoints, client_id: &str, code_challenge: &str) -> Res<String> {
    let scope = SCOPES.join(" ");
    let url = Url::parse_with_params(
        &endpoints.authorize_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", endpoints.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )
    .map_err(|e| {
        AppError::Validation(format!(
            "Invalid authorization endpoint '{}': {}",
            endpoints.authorize_url, e
        ))
    })?;

    Ok(url.to_string())
}

/// Exchanges the authorization code for an access token.
///
/// The verifier stored by [`begin_authorization`] must still be present;
/// it disappears when local storage was cleared mid-flow. On success the
/// token is kept in `session` and the verifier is deleted. A verifier that
/// cannot be deleted only produces a warning: the exchange has succeeded
/// and a stale verifier is overwritten by the next authorization.
pub async fn complete_authorization(
    client: &Client,
    store: &LocalStore,
    endpoints: &Endpoints,
    session: &mut Session,
    code: &str,
) -> Res<()> {
    let verifier = store
        .code_verifier()
        .await?
        .ok_or_else(|| AppError::Session("Code verifier not found".to_string()))?;

    let token = exchange_code_pkce(client, endpoints, session.client_id(), code, &verifier).await?;

    session.authorize(token.access_token);
    if let Err(e) = store.clear_code_verifier().await {
        warning!("Cannot remove the used code verifier: {}", e);
    }

    Ok(())
}

/// POSTs the authorization code and verifier to the token endpoint.
///
/// A non-success status becomes [`AppError::Auth`] with the status and the
/// raw response body.
pub async fn exchange_code_pkce(
    client: &Client,
    endpoints: &Endpoints,
    client_id: &str,
    code: &str,
    verifier: &str,
) -> Res<TokenResponse> {
    let response = client
        .post(&endpoints.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", endpoints.redirect_uri.as_str()),
            ("client_id", client_id),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Auth {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<TokenResponse>().await?)
}

/// Reads the outcome of a redirect from its query parameters.
///
/// An `error` parameter wins over a `code`. Returns `None` when neither is
/// present, i.e. the request is not an authorization callback at all.
pub fn detect_callback(params: &HashMap<String, String>) -> Option<CallbackOutcome> {
    if let Some(error) = params.get("error") {
        return Some(CallbackOutcome::Cancelled(error.clone()));
    }

    params
        .get("code")
        .filter(|code| !code.is_empty())
        .map(|code| CallbackOutcome::Code(code.clone()))
}

/// Waits for the callback route to deliver an outcome.
///
/// Polls the shared slot four times a second until `max_wait` elapses; the slot is
/// emptied so the next attempt starts clean.
pub async fn wait_for_callback(
    shared_state: CallbackState,
    max_wait: Duration,
) -> Option<CallbackOutcome> {
    use std::time::Instant;

    let poll = Duration::from_millis(250).min(max_wait);
    let start = Instant::now();

    loop {
        if let Some(outcome) = shared_state.lock().await.take() {
            return Some(outcome);
        }

        if start.elapsed() >= max_wait {
            return None;
        }

        tokio::time::sleep(poll).await;
    }
}
