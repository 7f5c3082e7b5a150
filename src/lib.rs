pub mod cli;
pub mod config;
pub mod error;
pub mod oauth;

pub use config::{load_config, normalize, Config};
pub use error::{CodeAcquisitionError, ConfigError, OAuthCliError, TokenError};
pub use oauth::{build_auth_url, get_token, AuthUrlArgs, GetTokenOptions, ReadCode, Token};

