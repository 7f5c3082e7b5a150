use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::normalize::normalize;

/// Port used for the redirect listener when the redirect URL has no explicit port.
pub const DEFAULT_REDIRECT_PORT: u16 = 8000;

/// A validated OAuth client configuration.
///
/// Every constructor validates, so holding a `Config` means all required
/// fields are present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Config {
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    redirect_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Vec<String>>,
}

impl Config {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        redirect_url: impl Into<String>,
        scope: Option<Vec<String>>,
    ) -> Result<Self, ConfigError> {
        let config = Config {
            client_id: non_empty("client_id", client_id.into())?,
            client_secret: non_empty("client_secret", client_secret.into())?,
            auth_url: http_url("auth_url", auth_url.into())?,
            token_url: http_url("token_url", token_url.into())?,
            redirect_url: http_url("redirect_url", redirect_url.into())?,
            scope: scope.filter(|s| !s.is_empty()),
        };
        if let Some(scope) = &config.scope {
            if scope.iter().any(|s| s.is_empty()) {
                return Err(ConfigError::invalid("scope", "entries must be non-empty strings"));
            }
        }
        Ok(config)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn scope(&self) -> Option<&[String]> {
        self.scope.as_deref()
    }

    /// Port the redirect listener binds by default.
    pub fn redirect_port(&self) -> u16 {
        Url::parse(&self.redirect_url)
            .ok()
            .and_then(|u| u.port())
            .unwrap_or(DEFAULT_REDIRECT_PORT)
    }
}

impl TryFrom<serde_json::Value> for Config {
    type Error = ConfigError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must be a non-empty string"));
    }
    Ok(value)
}

// Bare hostnames such as `http://localhost:8000/` are accepted.
fn http_url(field: &'static str, value: String) -> Result<String, ConfigError> {
    let url = Url::parse(&value)
        .map_err(|e| ConfigError::invalid(field, format!("invalid URL '{value}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            field,
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::invalid(field, format!("URL '{value}' has no host")));
    }
    Ok(value)
}
