use std::path::Path;

use crate::cli::output::{print_token, OutputMode};
use crate::config::load_config;
use crate::error::OAuthCliError;
use crate::oauth::flow::{get_token, GetTokenOptions};
use crate::oauth::store::write_token;

/// Run the authorization flow; write the token to `output` or print it.
pub async fn run_token(
    config_path: &Path,
    options: &GetTokenOptions,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<(), OAuthCliError> {
    let config = load_config(config_path)?;
    let token = get_token(&config, options).await?;

    match output {
        Some(path) => {
            write_token(path, &token)?;
            eprintln!("Token written to {}", path.display());
        }
        None => print_token(&token, mode),
    }
    Ok(())
}
