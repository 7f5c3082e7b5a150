use colored::Colorize;

use crate::config::Config;
use crate::error::OAuthCliError;
use crate::oauth::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
}

/// Token JSON on stdout, pretty-printed unless compact output was asked for.
pub fn print_token(token: &Token, mode: OutputMode) {
    println!("{}", render_token(token, mode));
}

fn render_token(token: &Token, mode: OutputMode) -> String {
    let rendered = match mode {
        OutputMode::Pretty => serde_json::to_string_pretty(token),
        OutputMode::Json => serde_json::to_string(token),
    };
    rendered.unwrap_or_default()
}

pub fn print_config(config: &Config) {
    println!("{}", serde_json::to_string_pretty(config).unwrap_or_default());
}

pub fn print_error(err: &OAuthCliError, json_mode: bool, is_tty: bool) {
    eprintln!("{}", render_error(err, json_mode, is_tty));
}

fn render_error(err: &OAuthCliError, json_mode: bool, is_tty: bool) -> String {
    if json_mode {
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    } else if is_tty {
        format!("{}: {}", "Error".red().bold(), err)
    } else {
        format!("Error: {err}")
    }
}
