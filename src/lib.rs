pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{EnvConfig, MapConfig, TomlConfig};
pub use self::core::{
    auth_form::{AuthFormController, SubmitOutcome},
    magic_link::{MagicLinkClient, MagicLinkOptions},
    supabase::{PublicEndpoint, ServiceRoleEndpoint},
};
pub use domain::model::SubmissionStatus;
pub use domain::ports::{ConfigProvider, MagicLinkSender};
pub use utils::error::{AppError, Result};
