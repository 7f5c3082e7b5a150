use std::io::IsTerminal;
use std::time::Duration;

use colored::Colorize;

use crate::config::Config;
use crate::error::OAuthCliError;
use crate::oauth::acquire::{CodeAcquirer, ReadCode};
use crate::oauth::auth_url::{build_auth_url, AuthUrlArgs};
use crate::oauth::callback::{RedirectListener, DEFAULT_CALLBACK_TIMEOUT};
use crate::oauth::console::ConsolePrompt;
use crate::oauth::token::{exchange_code, Token};

/// Options for [`get_token`].
#[derive(Debug, Clone)]
pub struct GetTokenOptions {
    /// Used only when the config has no scope.
    pub scope: Option<Vec<String>>,
    pub open_browser: bool,
    pub read_code: ReadCode,
    /// Listener port override; defaults to the redirect URL's port.
    pub port: Option<u16>,
    /// How long the redirect listener waits.
    pub timeout: Duration,
    /// Console prompt override.
    pub prompt: Option<String>,
}

impl Default for GetTokenOptions {
    fn default() -> Self {
        Self {
            scope: None,
            open_browser: true,
            read_code: ReadCode::Webserver,
            port: None,
            timeout: DEFAULT_CALLBACK_TIMEOUT,
            prompt: None,
        }
    }
}

/// Run the full authorization code flow and return the token.
pub async fn get_token(config: &Config, options: &GetTokenOptions) -> Result<Token, OAuthCliError> {
    let acquirer: Box<dyn CodeAcquirer> = match options.read_code {
        ReadCode::Webserver => Box::new(RedirectListener::new(
            options.port.unwrap_or_else(|| config.redirect_port()),
            options.timeout,
        )),
        ReadCode::Console => Box::new(ConsolePrompt::stdin(options.prompt.as_deref())),
    };
    get_token_with(config, options, acquirer.as_ref()).await
}

/// Same as [`get_token`] with a caller-supplied code acquirer.
pub async fn get_token_with(
    config: &Config,
    options: &GetTokenOptions,
    acquirer: &dyn CodeAcquirer,
) -> Result<Token, OAuthCliError> {
    // 1. Build authorization URL
    let auth_url = build_auth_url(
        config,
        &AuthUrlArgs {
            scope: options.scope.clone(),
            redirect_uri: None,
        },
    );

    // 2. Send the user to it before we start waiting for the code
    if options.open_browser {
        launch_browser(&auth_url);
    } else {
        print_auth_url("Open this URL in your browser:", &auth_url);
    }

    // 3. Wait for the code
    let code = acquirer.acquire().await?;
    tracing::debug!("Authorization code acquired, exchanging for token");

    // 4. Exchange code for token
    let token = exchange_code(config, &code).await?;
    tracing::info!("Obtained access token for client '{}'", token.client_id);

    Ok(token)
}

fn launch_browser(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        tracing::warn!("Could not open browser automatically: {e}");
        print_auth_url("Please visit this URL to authorize:", url);
    }
}

fn print_auth_url(label: &str, url: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}\n{}", label.bold(), url.underline());
    } else {
        eprintln!("{label}\n{url}");
    }
}
