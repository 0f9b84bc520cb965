use log::{error, info};
use reqwest::Client;

use crate::config::Config;
use crate::error::RelayError;
use crate::types::{InlineButton, InlineKeyboardMarkup, SendMessage, TelegramResponse};

/// Rows of link buttons rendered under a message.
pub type Buttons = Vec<Vec<InlineButton>>;

pub fn build_payload(chat_id: i64, text: &str, buttons: Option<Buttons>) -> SendMessage<'_> {
    let reply_markup = buttons
        .filter(|rows| rows.iter().any(|row| !row.is_empty()))
        .map(|rows| InlineKeyboardMarkup {
            inline_keyboard: rows.into_iter().filter(|row| !row.is_empty()).collect(),
        });

    SendMessage {
        chat_id,
        text,
        parse_mode: "HTML",
        reply_markup,
    }
}

/// Send a text message through the Bot API.
///
/// Fails when the request cannot be made, the HTTP status is not 2xx, or
/// Telegram answers with `ok: false`. The caller decides what to do next.
pub async fn send_message(
    http: &Client,
    config: &Config,
    chat_id: i64,
    text: &str,
    buttons: Option<Buttons>,
) -> Result<TelegramResponse, RelayError> {
    let payload = build_payload(chat_id, text, buttons);

    let res = http
        .post(config.send_message_url())
        .timeout(config.request_timeout)
        .json(&payload)
        .send()
        .await
        .inspect_err(|e| error!("Failed to send message to chat {}: {}", chat_id, e))?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        error!("Telegram API error {}: {}", status, body);
        return Err(RelayError::TelegramApi {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: TelegramResponse =
        serde_json::from_str(&body).map_err(|e| RelayError::Decode(e.to_string()))?;

    if !parsed.ok {
        error!("Telegram API error {}: {}", status, body);
        return Err(RelayError::TelegramApi {
            status: status.as_u16(),
            body: parsed.description.unwrap_or(body),
        });
    }

    info!("Message sent to chat {}", chat_id);
    Ok(parsed)
}
