#![allow(clippy::uninlined_format_args)]

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod manager;
pub mod mcp_config;
pub mod prompt_templates;
pub mod secrets;
pub mod utils;
pub mod validation;
pub mod wizard;

pub use config::DocRagConfig;
pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
