use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use oauth_cli::cli::output::{print_error, OutputMode};
use oauth_cli::{GetTokenOptions, ReadCode};

#[derive(Parser)]
#[command(
    name = "oauth-cli",
    version,
    about = "Obtain OAuth 2.0 access tokens via the authorization code grant"
)]
struct Cli {
    /// OAuth client config file (flat or Google-style "web" JSON)
    #[arg(long, global = true, env = "OAUTH_CLI_CONFIG")]
    config: Option<PathBuf>,

    /// Print errors as JSON objects
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the authorization flow and print the token
    Token {
        /// Scope to request when the config has none (repeatable)
        #[arg(long)]
        scope: Vec<String>,

        /// Print the authorization URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,

        /// How to obtain the authorization code
        #[arg(long, value_enum, default_value_t = ReadCode::Webserver)]
        read_code: ReadCode,

        /// Port for the redirect listener (defaults to the redirect URL's port)
        #[arg(long)]
        port: Option<u16>,

        /// Redirect listener timeout in milliseconds
        #[arg(long, env = "OAUTH_CLI_TIMEOUT_MS", default_value_t = 60000)]
        timeout_ms: u64,

        /// Console prompt text
        #[arg(long)]
        prompt: Option<String>,

        /// Write the token JSON to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the authorization URL
    Url {
        /// Scope to request when the config has none (repeatable)
        #[arg(long)]
        scope: Vec<String>,

        /// Redirect URI to send instead of the configured one
        #[arg(long)]
        redirect_uri: Option<String>,
    },

    /// Print the normalized config
    Config,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("OAUTH_CLI_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        print_error(&e, json, std::io::stderr().is_terminal());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), oauth_cli::OAuthCliError> {
    let config_path = cli.config.ok_or_else(|| oauth_cli::OAuthCliError::ConfigFile {
        path: PathBuf::from("<none>"),
        detail: "No config file given. Pass --config or set OAUTH_CLI_CONFIG".into(),
    })?;

    match cli.command {
        Commands::Token {
            scope,
            no_browser,
            read_code,
            port,
            timeout_ms,
            prompt,
            output,
        } => {
            let options = GetTokenOptions {
                scope: (!scope.is_empty()).then_some(scope),
                open_browser: !no_browser,
                read_code,
                port,
                timeout: Duration::from_millis(timeout_ms),
                prompt,
            };
            let mode = if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Pretty
            };
            oauth_cli::cli::token_cmd::run_token(&config_path, &options, output.as_deref(), mode)
                .await
        }
        Commands::Url {
            scope,
            redirect_uri,
        } => oauth_cli::cli::url_cmd::run_url(
            &config_path,
            (!scope.is_empty()).then_some(scope),
            redirect_uri,
        ),
        Commands::Config => oauth_cli::cli::config_cmd::run_config_show(&config_path),
    }
}
