use std::path::Path;

use crate::cli::output::print_config;
use crate::config::load_config;
use crate::error::OAuthCliError;

/// Print the normalized config as flat JSON.
pub fn run_config_show(config_path: &Path) -> Result<(), OAuthCliError> {
    let config = load_config(config_path)?;
    print_config(&config);
    Ok(())
}
