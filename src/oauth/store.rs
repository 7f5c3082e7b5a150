use std::path::Path;

use crate::error::OAuthCliError;
use crate::oauth::token::Token;

/// Write a token as pretty JSON, creating parent directories as needed.
pub fn write_token(path: &Path, token: &Token) -> Result<(), OAuthCliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(token)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, data + "\n")?;
    tracing::info!("Wrote token to {}", path.display());
    Ok(())
}
