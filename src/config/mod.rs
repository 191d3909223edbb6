//! Configuration file support.
//!
//! The file is optional; every field has a default. CLI flags override
//! what the file says (see `args::Cli::apply`).

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, SerialConfig, UiConfig};
