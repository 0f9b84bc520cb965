use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, header};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use reqwest::Client;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::command::{
    Command, DEFAULT_FIRST_NAME, GREETING_TEXT, INVALID_TOKEN_TEXT, MISSING_USER_ID_TEXT,
    RETRY_TEXT, RETURN_BUTTON_TEXT, display_name, parse_command, success_text,
};
use crate::config::Config;
use crate::error::RelayError;
use crate::send_message::{Buttons, send_message};
use crate::types::{InlineButton, TelegramUpdate, VerifyRequest};
use crate::verify::verify_token;

/// Shared, read-only per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        // Timeouts are set per request from `Config::request_timeout`.
        let http = Client::builder().build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/webhook", get(webhook_check).post(webhook_update))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "telegram-bot-webhook" }))
}

async fn webhook_check() -> Json<Value> {
    info!("GET request - webhook check");
    Json(json!({ "status": "ok" }))
}

/// Telegram re-delivers anything that is not a 200, so every outcome,
/// including panics inside the pipeline, is acknowledged with `{"ok": true}`.
async fn webhook_update(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    acknowledge(async move { process_update(&state, &body).await }).await
}

/// Run one pipeline in its own task and always answer `{"ok": true}`.
pub async fn acknowledge<F>(pipeline: F) -> Json<Value>
where
    F: Future<Output = Result<(), RelayError>> + Send + 'static,
{
    match tokio::spawn(pipeline).await {
        Ok(Ok(())) => info!("Webhook processing completed"),
        Ok(Err(e)) => error!("Error in webhook: {}", e),
        Err(e) => error!("Webhook task failed: {}", e),
    }

    Json(json!({ "ok": true }))
}

pub async fn process_update(state: &AppState, body: &[u8]) -> Result<(), RelayError> {
    let update: TelegramUpdate = serde_json::from_slice(body)?;
    info!("Received update {:?}", update.update_id);
    handle_update(state, update).await
}

pub async fn handle_update(state: &AppState, update: TelegramUpdate) -> Result<(), RelayError> {
    let Some(message) = update.message else {
        info!("No message in update");
        return Ok(());
    };

    let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) else {
        info!("No text in message {:?}", message.message_id);
        return Ok(());
    };

    let sender = message.from.as_ref();
    let user_id = sender.and_then(|u| u.id);
    let username = sender.and_then(|u| u.username.as_deref());
    let first_name = sender
        .and_then(|u| u.first_name.as_deref())
        .unwrap_or(DEFAULT_FIRST_NAME);
    let chat_id = message.chat.id;

    info!("Processing message: user_id={:?}, chat_id={}", user_id, chat_id);

    match parse_command(text) {
        Command::Greeting => {
            info!("Sending regular /start response");
            reply(state, chat_id, GREETING_TEXT, None).await
        }
        Command::Authorize(token) => {
            info!("Processing auth token for chat {}", chat_id);
            let Some(user_id) = user_id else {
                return reply(state, chat_id, MISSING_USER_ID_TEXT, None).await;
            };
            let request = VerifyRequest {
                token,
                user_id,
                username,
                first_name,
            };
            authorize(state, chat_id, &request).await
        }
        Command::Ignore => {
            info!("Message is not /start command: {}", text);
            Ok(())
        }
    }
}

async fn authorize(
    state: &AppState,
    chat_id: i64,
    request: &VerifyRequest<'_>,
) -> Result<(), RelayError> {
    let verified = match verify_token(&state.http, &state.config, request).await {
        Ok(v) => v,
        Err(e) => {
            error!("Error verifying token: {}", e);
            return reply(state, chat_id, RETRY_TEXT, None).await;
        }
    };

    if !verified.is_success() {
        return reply(state, chat_id, INVALID_TOKEN_TEXT, None).await;
    }

    let name = display_name(request.first_name, request.username, request.user_id);
    let buttons = match verified.callback_url {
        Some(url) => Some(vec![vec![InlineButton::link(RETURN_BUTTON_TEXT, url)]]),
        None => {
            warn!("Verification succeeded without a callbackUrl");
            None
        }
    };

    reply(state, chat_id, &success_text(&name), buttons).await?;
    info!("Auth successful, message sent");
    Ok(())
}

async fn reply(
    state: &AppState,
    chat_id: i64,
    text: &str,
    buttons: Option<Buttons>,
) -> Result<(), RelayError> {
    send_message(&state.http, &state.config, chat_id, text, buttons)
        .await
        .map(|_| ())
}
