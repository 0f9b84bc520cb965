use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: Option<i64>,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub message_id: Option<i64>,
    pub chat: TelegramChat,
    pub from: Option<TelegramUser>,
    pub text: Option<String>, // Text might be missing (e.g., photo messages)
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub url: String,
}

impl InlineButton {
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Subset of the Bot API response envelope we care about.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse {
    #[serde(default)]
    pub ok: bool,
    pub description: Option<String>,
}

/// Payload sent to the web app to bind a Telegram identity to a login token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest<'a> {
    pub token: &'a str,
    pub user_id: i64,
    pub username: Option<&'a str>,
    pub first_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: Option<bool>,
    pub callback_url: Option<String>,
}

impl VerifyResponse {
    /// Absent and `null` both mean the token was not accepted.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }
}
