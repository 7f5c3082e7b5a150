pub mod acquire;
pub mod auth_url;
pub mod callback;
pub mod console;
pub mod flow;
pub mod store;
pub mod token;

pub use acquire::{CodeAcquirer, ReadCode};
pub use auth_url::{build_auth_url, state_for, AuthUrlArgs};
pub use callback::{RedirectListener, DEFAULT_CALLBACK_TIMEOUT};
pub use console::ConsolePrompt;
pub use flow::{get_token, get_token_with, GetTokenOptions};
pub use store::write_token;
pub use token::{exchange_code, Token, TokenType};
