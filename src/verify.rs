use log::{info, warn};
use reqwest::Client;

use crate::config::Config;
use crate::error::RelayError;
use crate::types::{VerifyRequest, VerifyResponse};

/// Ask the web app to bind this Telegram user to a pending login token.
///
/// The body is decoded whatever the status code: the web app rejects bad
/// tokens with a 4xx `{ "error": ... }`, which reads as `success: false`.
pub async fn verify_token(
    http: &Client,
    config: &Config,
    request: &VerifyRequest<'_>,
) -> Result<VerifyResponse, RelayError> {
    let res = http
        .post(config.verify_token_url())
        .timeout(config.request_timeout)
        .json(request)
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        warn!("Token verification returned {}: {}", status, body);
    }

    let parsed: VerifyResponse = serde_json::from_str(&body)
        .map_err(|e| RelayError::Decode(format!("verify-token ({}): {}", status, e)))?;

    info!(
        "Token verification for user {}: success={}",
        request.user_id,
        parsed.is_success()
    );
    Ok(parsed)
}
