use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::error::CodeAcquisitionError;
use crate::oauth::acquire::CodeAcquirer;

pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_REQUEST_HEAD: usize = 8192;

const SUCCESS_HTML: &str = "<!DOCTYPE html><html><body><h1>Authorization complete</h1>\
     <p>You can close this window and return to the terminal.</p>\
     <script>window.close();</script></body></html>";

/// Catches the OAuth redirect on a short-lived local HTTP listener.
///
/// Each [`acquire`](CodeAcquirer::acquire) call binds its own socket and
/// timer, and releases both before returning.
#[derive(Debug, Clone)]
pub struct RedirectListener {
    port: u16,
    timeout: Duration,
}

impl RedirectListener {
    /// Port `0` asks the OS for an ephemeral port.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl CodeAcquirer for RedirectListener {
    async fn acquire(&self) -> Result<String, CodeAcquisitionError> {
        let listener = TcpListener::bind(("127.0.0.1", self.port))
            .await
            .map_err(|source| CodeAcquisitionError::ListenerBindFailed {
                port: self.port,
                source,
            })?;
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Listening for OAuth redirect on {addr}");
        }

        // Whichever side finishes first wins; the other is dropped along with
        // the listener and any in-flight connections.
        let result = tokio::time::timeout(self.timeout, serve_until_code(&listener))
            .await
            .map_err(|_| CodeAcquisitionError::Timeout(self.timeout));
        drop(listener);

        match &result {
            Ok(_) => tracing::debug!("Authorization code received, redirect listener closed"),
            Err(e) => tracing::debug!("Redirect listener closed: {e}"),
        }
        result
    }
}

/// Accept connections until one of them carries an authorization code.
async fn serve_until_code(listener: &TcpListener) -> String {
    let mut connections: JoinSet<std::io::Result<Option<String>>> = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!("Redirect listener accepted connection from {peer}");
                    connections.spawn(handle_connection(stream));
                }
                Err(e) => tracing::warn!("Failed to accept redirect connection: {e}"),
            },
            Some(joined) = connections.join_next() => match joined {
                Ok(Ok(Some(code))) => return code,
                Ok(Ok(None)) => {}
                Ok(Err(e)) => tracing::debug!("Redirect connection failed: {e}"),
                Err(e) => tracing::debug!("Redirect connection task ended abnormally: {e}"),
            },
        }
    }
}

/// Serve one request: 200 and the code when present, 404 otherwise.
async fn handle_connection(mut stream: TcpStream) -> std::io::Result<Option<String>> {
    let head = read_request_head(&mut stream).await?;
    let code = parse_code_from_request(&head);

    let response = match &code {
        Some(_) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            SUCCESS_HTML.len(),
            SUCCESS_HTML
        ),
        None => {
            if let Some(error) = parse_query_param(&head, "error") {
                tracing::warn!("Authorization server redirected with error: {error}");
            }
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
    };
    // The code counts even if the browser hangs up before reading the reply.
    if let Err(e) = write_response(&mut stream, &response).await {
        tracing::debug!("Failed to answer redirect request: {e}");
    }

    Ok(code)
}

async fn write_response(stream: &mut TcpStream, response: &str) -> std::io::Result<()> {
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() >= MAX_REQUEST_HEAD {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The non-empty `code` query parameter of the request line, if any.
pub(crate) fn parse_code_from_request(request: &str) -> Option<String> {
    parse_query_param(request, "code").filter(|code| !code.is_empty())
}

fn parse_query_param(request: &str, name: &str) -> Option<String> {
    // "GET /callback?code=... HTTP/1.1"
    let first_line = request.lines().next()?;
    let target = first_line.split_whitespace().nth(1)?;
    let url = Url::parse(&format!("http://localhost{target}")).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}
