pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use env::{EnvConfig, MapConfig};
pub use toml_config::TomlConfig;
