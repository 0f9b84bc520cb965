use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_WEB_APP_URL: &str = "https://giftdraw.today";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Immutable service settings, built once in `main` and shared with every request.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub web_app_url: String,
    pub telegram_api_url: String,
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token =
            get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let web_app_url = get("WEB_APP_URL").unwrap_or_else(|| DEFAULT_WEB_APP_URL.to_string());
        let telegram_api_url =
            get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let ip = host.trim().parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: host,
        })?;
        let listen_addr = SocketAddr::new(ip, port);

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bot_token,
            web_app_url: web_app_url.trim_end_matches('/').to_string(),
            telegram_api_url: telegram_api_url.trim_end_matches('/').to_string(),
            listen_addr,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.telegram_api_url, self.bot_token)
    }

    pub fn verify_token_url(&self) -> String {
        format!("{}/api/auth/verify-token", self.web_app_url)
    }
}

// Keeps the bot token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("web_app_url", &self.web_app_url)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("listen_addr", &self.listen_addr)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
