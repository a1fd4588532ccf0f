use crate::config::env::{
    EnvConfig, MapConfig, AUTH_RETRY_ATTEMPTS, AUTH_TIMEOUT_SECONDS, SITE_ORIGIN,
};
use crate::config::toml_config::TomlConfig;
use crate::core::magic_link::{MAX_TIMEOUT_SECONDS, MAX_TRANSPORT_RETRIES, MIN_TIMEOUT_SECONDS};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cafe-console")]
#[command(about = "Inventory Café console: magic-link sign-in and page shells")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, global = true, help = "TOML config file; the environment is used when absent")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Request a magic link for an email address
    Login {
        #[arg(long)]
        email: String,

        /// Site origin used for the auth callback redirect
        #[arg(long)]
        origin: Option<String>,

        #[arg(long)]
        timeout_seconds: Option<u64>,

        #[arg(long)]
        retries: Option<u32>,
    },
    /// Print the navigation shell
    Routes {
        #[arg(long, default_value = "/")]
        current: String,
    },
    /// Print a page shell
    Page { path: String },
    /// Check that the required configuration values resolve
    CheckConfig {
        /// Also resolve the server-only service-role credentials
        #[arg(long)]
        server: bool,
    },
}

impl CliConfig {
    /// Configuration provider for this invocation: command-line overrides on
    /// top of the config file, or of the process environment without one.
    pub fn provider(&self) -> Result<MapConfig> {
        let mut overrides = MapConfig::new();
        if let Command::Login {
            origin,
            timeout_seconds,
            retries,
            ..
        } = &self.command
        {
            if let Some(origin) = origin {
                overrides.set(SITE_ORIGIN, origin.clone());
            }
            if let Some(timeout) = timeout_seconds {
                overrides.set(AUTH_TIMEOUT_SECONDS, timeout.to_string());
            }
            if let Some(retries) = retries {
                overrides.set(AUTH_RETRY_ATTEMPTS, retries.to_string());
            }
        }

        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(overrides.layered_over(file))
            }
            None => Ok(overrides.layered_over(EnvConfig::new())),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // The email itself is checked by the sign-in form.
        if let Command::Login {
            origin,
            timeout_seconds,
            retries,
            ..
        } = &self.command
        {
            if let Some(origin) = origin {
                validate_url("origin", origin)?;
            }
            if let Some(timeout) = timeout_seconds {
                validate_range(
                    "timeout_seconds",
                    *timeout,
                    MIN_TIMEOUT_SECONDS,
                    MAX_TIMEOUT_SECONDS,
                )?;
            }
            if let Some(retries) = retries {
                validate_range("retries", *retries, 0, MAX_TRANSPORT_RETRIES)?;
            }
        }
        Ok(())
    }
}
