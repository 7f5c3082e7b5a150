use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::TokenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Bearer,
}

/// An access token obtained from the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub client_id: String,
    pub token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Absolute expiry in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Error body returned by the token endpoint on failure.
#[derive(Debug, Default, Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for a [`Token`].
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, TokenError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(config.token_url())
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[
            ("code", code),
            ("client_id", config.client_id()),
            ("client_secret", config.client_secret()),
            ("redirect_uri", config.redirect_url()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let parsed: TokenErrorBody = serde_json::from_str(&body).unwrap_or_default();
        tracing::debug!("Token endpoint returned {status}: {body}");
        return Err(TokenError::ExchangeRejected {
            status: status.as_u16(),
            error: parsed.error,
            error_description: parsed.error_description,
        });
    }

    let body: Value = resp
        .json()
        .await
        .map_err(|e| TokenError::MalformedResponse(format!("body is not JSON: {e}")))?;

    let captured_at = chrono::Utc::now().timestamp_millis();
    token_from_response(body, config.client_id(), captured_at)
}

/// Normalize a successful token endpoint body into a [`Token`].
///
/// `captured_at` is the epoch-millis time the response was received.
pub(crate) fn token_from_response(
    body: Value,
    client_id: &str,
    captured_at: i64,
) -> Result<Token, TokenError> {
    let mut obj: Map<String, Value> = match body {
        Value::Object(obj) => obj,
        other => {
            return Err(TokenError::MalformedResponse(format!(
                "expected a JSON object, got {other}"
            )))
        }
    };

    obj.insert("client_id".into(), Value::String(client_id.to_string()));

    if !obj.get("expires_at").is_some_and(|v| !v.is_null()) {
        if let Some(expires_in) = obj.get("expires_in").and_then(Value::as_i64) {
            let expires_at = expires_in
                .checked_mul(1000)
                .and_then(|ms| captured_at.checked_add(ms))
                .ok_or_else(|| TokenError::MalformedResponse("expires_in out of range".into()))?;
            obj.insert("expires_at".into(), Value::from(expires_at));
        }
    }

    if let Some(Value::String(token_type)) = obj.get_mut("token_type") {
        if token_type.eq_ignore_ascii_case("bearer") {
            *token_type = "Bearer".to_string();
        }
    }

    serde_json::from_value(Value::Object(obj))
        .map_err(|e| TokenError::MalformedResponse(e.to_string()))
}
