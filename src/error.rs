use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while turning raw JSON into a validated [`crate::Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid OAuth config: expected top-level client_id/client_secret or a 'web' object with client_id")]
    InvalidShape,

    #[error("Invalid OAuth config field '{field}': {reason}")]
    ValidationFailed { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::ValidationFailed {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while waiting for the authorization code.
#[derive(Debug, thiserror::Error)]
pub enum CodeAcquisitionError {
    #[error("Timed out waiting for OAuth redirect after {}", format_timeout(.0))]
    Timeout(Duration),

    #[error("Input closed before an authorization code was entered")]
    InputClosed,

    #[error("Cannot listen for OAuth redirect on port {port}: {source}")]
    ListenerBindFailed {
        port: u16,
        source: std::io::Error,
    },

    #[error("I/O error while reading authorization code: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the token endpoint exchange.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("{}", format_rejection(.status, .error.as_deref(), .error_description.as_deref()))]
    ExchangeRejected {
        status: u16,
        error: Option<String>,
        error_description: Option<String>,
    },

    #[error("Malformed token response: {0}")]
    MalformedResponse(String),

    #[error("Token exchange request failed: {0}")]
    Request(#[from] reqwest::Error),
}

fn format_timeout(timeout: &Duration) -> String {
    if timeout.as_secs() == 0 {
        format!("{}ms", timeout.as_millis())
    } else if timeout.subsec_millis() == 0 {
        format!("{}s", timeout.as_secs())
    } else {
        format!("{:.1}s", timeout.as_secs_f64())
    }
}

fn format_rejection(status: &u16, error: Option<&str>, description: Option<&str>) -> String {
    let mut msg = format!("Token exchange rejected with status {status}");
    match (error, description) {
        (Some(e), Some(d)) => msg.push_str(&format!(": {e} ({d})")),
        (Some(e), None) => msg.push_str(&format!(": {e}")),
        (None, Some(d)) => msg.push_str(&format!(": {d}")),
        (None, None) => {}
    }
    msg
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthCliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error in config {}: {detail}", .path.display())]
    ConfigFile { path: PathBuf, detail: String },

    #[error(transparent)]
    CodeAcquisition(#[from] CodeAcquisitionError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OAuthCliError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            OAuthCliError::Config(ConfigError::InvalidShape) => "invalid_shape",
            OAuthCliError::Config(ConfigError::ValidationFailed { .. }) => "validation_failed",
            OAuthCliError::ConfigFile { .. } => "config_error",
            OAuthCliError::CodeAcquisition(e) => match e {
                CodeAcquisitionError::Timeout(_) => "timeout",
                CodeAcquisitionError::InputClosed => "input_closed",
                CodeAcquisitionError::ListenerBindFailed { .. } => "listener_bind_failed",
                CodeAcquisitionError::Io(_) => "io_error",
            },
            OAuthCliError::Token(e) => match e {
                TokenError::ExchangeRejected { .. } => "exchange_rejected",
                TokenError::MalformedResponse(_) => "malformed_response",
                TokenError::Request(_) => "request_failed",
            },
            OAuthCliError::IoError(_) => "io_error",
        }
    }

    /// The config field that failed validation, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            OAuthCliError::Config(ConfigError::ValidationFailed { field, .. }) => Some(*field),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            OAuthCliError::Token(TokenError::ExchangeRejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(field) = self.field() {
            obj.insert("field".into(), serde_json::Value::String(field.to_string()));
        }
        if let Some(status) = self.status() {
            obj.insert("status".into(), serde_json::Value::from(status));
        }
        obj.insert("message".into(), serde_json::Value::String(self.to_string()));
        obj.insert("code".into(), serde_json::Value::String(self.code().to_string()));
        serde_json::json!({ "error": obj })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_shape() {
        let err = OAuthCliError::from(ConfigError::InvalidShape);
        assert!(err.to_string().starts_with("Invalid OAuth config"));
    }

    #[test]
    fn display_validation_failed_names_field() {
        let err = ConfigError::invalid("token_url", "must be an http(s) URL");
        assert_eq!(
            err.to_string(),
            "Invalid OAuth config field 'token_url': must be an http(s) URL"
        );
    }

    #[test]
    fn display_timeout() {
        let err = CodeAcquisitionError::Timeout(Duration::from_secs(60));
        assert_eq!(
            err.to_string(),
            "Timed out waiting for OAuth redirect after 60s"
        );
    }

    #[test]
    fn display_sub_second_timeout() {
        let err = CodeAcquisitionError::Timeout(Duration::from_millis(200));
        assert_eq!(
            err.to_string(),
            "Timed out waiting for OAuth redirect after 200ms"
        );
        let err = CodeAcquisitionError::Timeout(Duration::from_millis(1500));
        assert_eq!(
            err.to_string(),
            "Timed out waiting for OAuth redirect after 1.5s"
        );
    }

    #[test]
    fn display_exchange_rejected_variants() {
        let full = TokenError::ExchangeRejected {
            status: 400,
            error: Some("invalid_grant".into()),
            error_description: Some("code expired".into()),
        };
        assert_eq!(
            full.to_string(),
            "Token exchange rejected with status 400: invalid_grant (code expired)"
        );

        let bare = TokenError::ExchangeRejected {
            status: 502,
            error: None,
            error_description: None,
        };
        assert_eq!(bare.to_string(), "Token exchange rejected with status 502");
    }

    #[test]
    fn display_config_file() {
        let err = OAuthCliError::ConfigFile {
            path: PathBuf::from("/tmp/oauth.json"),
            detail: "Invalid JSON".into(),
        };
        assert_eq!(err.to_string(), "Error in config /tmp/oauth.json: Invalid JSON");
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(OAuthCliError::from(ConfigError::InvalidShape).code(), "invalid_shape");
        assert_eq!(
            OAuthCliError::from(ConfigError::invalid("client_id", "empty")).code(),
            "validation_failed"
        );
        assert_eq!(
            OAuthCliError::from(CodeAcquisitionError::InputClosed).code(),
            "input_closed"
        );
        assert_eq!(
            OAuthCliError::from(CodeAcquisitionError::Timeout(Duration::from_secs(1))).code(),
            "timeout"
        );
        assert_eq!(
            OAuthCliError::from(TokenError::MalformedResponse("x".into())).code(),
            "malformed_response"
        );
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "test");
        assert_eq!(OAuthCliError::IoError(io_err).code(), "io_error");
    }

    #[test]
    fn error_to_json_structure() {
        let err = OAuthCliError::from(TokenError::ExchangeRejected {
            status: 400,
            error: Some("invalid_grant".into()),
            error_description: None,
        });
        let json = err.to_json();
        let error_obj = json.get("error").expect("should have error key");
        assert_eq!(error_obj["status"], 400);
        assert_eq!(error_obj["code"], "exchange_rejected");
        assert!(error_obj["message"].as_str().unwrap().contains("invalid_grant"));
        assert!(error_obj.get("field").is_none());
    }

    #[test]
    fn error_to_json_includes_field() {
        let err = OAuthCliError::from(ConfigError::invalid("redirect_url", "missing"));
        let json = err.to_json();
        assert_eq!(json["error"]["field"], "redirect_url");
        assert!(json["error"].get("status").is_none());
    }
}
