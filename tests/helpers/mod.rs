#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::Value;
use tg_auth_service::config::Config;
use tg_auth_service::webhook::{AppState, router};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const BOT_TOKEN: &str = "TEST";
pub const SEND_PATH: &str = "/botTEST/sendMessage";
pub const VERIFY_PATH: &str = "/api/auth/verify-token";
pub const TELEGRAM_OK: &str = r#"{"ok":true,"result":{"message_id":1}}"#;

pub fn test_config(telegram_api_url: &str, web_app_url: &str) -> Config {
    Config {
        bot_token: BOT_TOKEN.to_string(),
        web_app_url: web_app_url.to_string(),
        telegram_api_url: telegram_api_url.to_string(),
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        request_timeout: Duration::from_secs(2),
    }
}

pub fn test_state(config: Config) -> AppState {
    AppState::new(config).unwrap()
}

pub fn test_app(config: Config) -> Router {
    router(test_state(config))
}

pub async fn post_update(app: Router, body: impl Into<Body>) -> Response<Body> {
    let req = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn body_to_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn start_update(text: &str) -> Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "from": { "id": 7, "is_bot": false, "first_name": "Alice", "username": "alice" },
            "chat": { "id": 100, "type": "private" },
            "date": 1_700_000_000,
            "text": text,
        }
    })
}

/// Accepts connections and never answers, for exercising request timeouts.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}
