pub mod config_cmd;
pub mod output;
pub mod token_cmd;
pub mod url_cmd;
