use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::error::CodeAcquisitionError;
use crate::oauth::acquire::CodeAcquirer;

pub const DEFAULT_PROMPT: &str = "oauth code: ";

/// Reads the authorization code from a line of console input.
pub struct ConsolePrompt<R> {
    prompt: String,
    reader: Mutex<R>,
}

impl ConsolePrompt<BufReader<Stdin>> {
    /// Prompt on stderr and read from stdin.
    pub fn stdin(prompt: Option<&str>) -> Self {
        Self::new(prompt, BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ConsolePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(prompt: Option<&str>, reader: R) -> Self {
        Self {
            prompt: prompt.unwrap_or(DEFAULT_PROMPT).to_string(),
            reader: Mutex::new(reader),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

#[async_trait]
impl<R> CodeAcquirer for ConsolePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn acquire(&self) -> Result<String, CodeAcquisitionError> {
        // stderr keeps stdout free for the token JSON.
        let mut stderr = std::io::stderr();
        write!(stderr, "{}", self.prompt)?;
        stderr.flush()?;

        let mut line = String::new();
        let n = self.reader.lock().await.read_line(&mut line).await?;
        if n == 0 {
            return Err(CodeAcquisitionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
