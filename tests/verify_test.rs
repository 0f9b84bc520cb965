mod helpers;

use std::time::Duration;

use helpers::{VERIFY_PATH, silent_server, test_config};
use mockito::Matcher;
use serde_json::json;
use tg_auth_service::error::RelayError;
use tg_auth_service::types::VerifyRequest;
use tg_auth_service::verify::verify_token;

fn request() -> VerifyRequest<'static> {
    VerifyRequest {
        token: "tok",
        user_id: 7,
        username: Some("alice"),
        first_name: "Alice",
    }
}

#[tokio::test]
async fn test_verify_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", VERIFY_PATH)
        .match_body(Matcher::Json(json!({
            "token": "tok",
            "userId": 7,
            "username": "alice",
            "firstName": "Alice",
        })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"callbackUrl":"https://giftdraw.today/auth/callback?token=tok"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url(), &server.url());
    let res = verify_token(&reqwest::Client::new(), &config, &request())
        .await
        .unwrap();

    assert!(res.is_success());
    assert_eq!(
        res.callback_url.as_deref(),
        Some("https://giftdraw.today/auth/callback?token=tok")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_error_body_reads_as_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", VERIFY_PATH)
        .with_status(400)
        .with_body(r#"{"error":"Invalid or expired token"}"#)
        .create_async()
        .await;

    let config = test_config(&server.url(), &server.url());
    let res = verify_token(&reqwest::Client::new(), &config, &request())
        .await
        .unwrap();

    assert!(!res.is_success());
    assert!(res.callback_url.is_none());
}

#[tokio::test]
async fn test_verify_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", VERIFY_PATH)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let config = test_config(&server.url(), &server.url());
    let res = verify_token(&reqwest::Client::new(), &config, &request()).await;

    assert!(matches!(res, Err(RelayError::Decode(_))));
}

#[tokio::test]
async fn test_verify_honours_configured_timeout() {
    let mut config = test_config("http://127.0.0.1:1", &silent_server().await);
    config.request_timeout = Duration::from_millis(200);

    let res = verify_token(&reqwest::Client::new(), &config, &request()).await;

    match res {
        Err(RelayError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}
