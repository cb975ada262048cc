mod common;

use axum::{Json, Router, routing::post};
use common::temp_store;
use musicbud::{
    management::{CODE_VERIFIER_KEY, Session},
    spotify::{Endpoints, auth::complete_authorization},
};
use reqwest::Client;
use serde_json::json;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

fn endpoints(base: &str) -> Endpoints {
    Endpoints {
        authorize_url: format!("{}/authorize", base),
        token_url: format!("{}/api/token", base),
        api_url: format!("{}/v1", base),
        redirect_uri: format!("{}/callback", base),
    }
}

#[tokio::test]
async fn test_exchange_succeeds_when_verifier_cannot_be_removed() {
    let (dir, store) = temp_store();
    store.set_code_verifier("verifier").await.unwrap();

    // While the code is exchanged, the verifier file turns into a non-empty
    // directory, which cannot be removed as a file.
    let verifier_path = dir.path().join("storage").join(CODE_VERIFIER_KEY);
    let app = Router::new().route(
        "/api/token",
        post(move || {
            let path = verifier_path.clone();
            async move {
                std::fs::remove_file(&path).unwrap();
                std::fs::create_dir_all(path.join("locked")).unwrap();
                Json(json!({ "access_token": "tok1", "token_type": "Bearer" }))
            }
        }),
    );
    let base = serve(app).await;

    let mut session = Session::new("abc123");
    let result = complete_authorization(
        &Client::new(),
        &store,
        &endpoints(&base),
        &mut session,
        "xyz",
    )
    .await;

    assert!(result.is_ok());
    assert!(session.is_authorized());
    assert_eq!(session.access_token(), Some("tok1"));
}

#[tokio::test]
async fn test_exchange_removes_verifier() {
    let (_dir, store) = temp_store();
    store.set_code_verifier("verifier").await.unwrap();

    let app = Router::new().route(
        "/api/token",
        post(|| async { Json(json!({ "access_token": "tok1" })) }),
    );
    let base = serve(app).await;

    let mut session = Session::new("abc123");
    complete_authorization(&Client::new(), &store, &endpoints(&base), &mut session, "xyz")
        .await
        .unwrap();

    assert_eq!(session.access_token(), Some("tok1"));
    assert_eq!(store.code_verifier().await.unwrap(), None);
}
