use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    spotify::auth,
    types::{CallbackOutcome, CallbackState},
};

// Drops `code` / `error` from the address bar without reloading the page.
const STRIP_QUERY: &str = "<script>history.replaceState(null, '', location.pathname);</script>";

/// Receives the authorization redirect and hands its outcome to the session.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<CallbackState>,
) -> Html<String> {
    let Some(outcome) = auth::detect_callback(&params) else {
        return Html("<h4>Missing authorization code.</h4>".to_string());
    };

    let page = match &outcome {
        CallbackOutcome::Code(_) => {
            "<h2>Authorization received.</h2><p>You can close this window and return to the terminal.</p>"
        }
        CallbackOutcome::Cancelled(_) => {
            "<h2>Authorization cancelled.</h2><p>Return to the terminal to try again.</p>"
        }
    };

    *shared_state.lock().await = Some(outcome);

    Html(format!("{}{}", page, STRIP_QUERY))
}
