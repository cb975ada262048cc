use axum::{Extension, Router, routing::get};
use std::net::SocketAddr;

use crate::{Res, api, types::CallbackState};

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback routes on `addr` until the process ends.
pub async fn start_api_server(addr: SocketAddr, state: CallbackState) -> Res<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
