pub mod env;
pub mod loader;
pub mod normalize;
pub mod types;

pub use loader::load_config;
pub use normalize::normalize;
pub use types::{Config, DEFAULT_REDIRECT_PORT};
