use async_trait::async_trait;

use crate::error::CodeAcquisitionError;

/// A strategy for obtaining the one-time authorization code.
#[async_trait]
pub trait CodeAcquirer: Send + Sync {
    /// Wait for the authorization code. Resolves at most once per call.
    async fn acquire(&self) -> Result<String, CodeAcquisitionError>;
}

/// Which [`CodeAcquirer`] the flow uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReadCode {
    /// Prompt for the code on the terminal.
    Console,
    /// Catch the browser redirect on a local HTTP listener.
    #[default]
    Webserver,
}
