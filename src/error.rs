use thiserror::Error;

/// Problems reading the process configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Failures inside one webhook round trip.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error {status}: {body}")]
    TelegramApi { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("malformed update: {0}")]
    MalformedUpdate(#[from] serde_json::Error),
}
