use std::path::Path;

use crate::config::load_config;
use crate::error::OAuthCliError;
use crate::oauth::auth_url::{build_auth_url, AuthUrlArgs};

/// Print the authorization URL without starting a flow.
pub fn run_url(
    config_path: &Path,
    scope: Option<Vec<String>>,
    redirect_uri: Option<String>,
) -> Result<(), OAuthCliError> {
    let config = load_config(config_path)?;
    let url = build_auth_url(&config, &AuthUrlArgs { scope, redirect_uri });
    println!("{url}");
    Ok(())
}
