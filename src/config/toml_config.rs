use crate::config::env::{
    require, AUTH_RETRY_ATTEMPTS, AUTH_TIMEOUT_SECONDS, SITE_ORIGIN, SUPABASE_ANON_KEY,
    SUPABASE_REST_URL, SUPABASE_SERVICE_ROLE_KEY, SUPABASE_URL,
};
use crate::core::magic_link::{MAX_TIMEOUT_SECONDS, MAX_TRANSPORT_RETRIES, MIN_TIMEOUT_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub supabase: SupabaseSection,
    pub site: SiteSection,
    pub auth: Option<AuthSection>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseSection {
    pub url: String,
    pub anon_key: String,
    pub rest_url: Option<String>,
    pub service_role_key: Option<String>,
}

impl std::fmt::Debug for SupabaseSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSection")
            .field("url", &self.url)
            .field("anon_key", &"<set>")
            .field("rest_url", &self.rest_url)
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub origin: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSection {
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
}

impl TomlConfig {
    /// Load from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        tracing::debug!("Loaded config file {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parse from a TOML string after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn value_for(&self, key: &str) -> Option<String> {
        let auth = self.auth.clone().unwrap_or_default();
        match key {
            SUPABASE_URL => Some(self.supabase.url.clone()),
            SUPABASE_ANON_KEY => Some(self.supabase.anon_key.clone()),
            SUPABASE_REST_URL => self.supabase.rest_url.clone(),
            SUPABASE_SERVICE_ROLE_KEY => self.supabase.service_role_key.clone(),
            SITE_ORIGIN => Some(self.site.origin.clone()),
            AUTH_TIMEOUT_SECONDS => auth.timeout_seconds.map(|v| v.to_string()),
            AUTH_RETRY_ATTEMPTS => auth.retry_attempts.map(|v| v.to_string()),
            _ => None,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn get(&self, key: &str) -> Result<String> {
        require(key, self.value_for(key))
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.value_for(key)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("supabase.url", &self.supabase.url)?;
        validate_non_empty_string("supabase.anon_key", &self.supabase.anon_key)?;
        if let Some(rest_url) = &self.supabase.rest_url {
            validate_url("supabase.rest_url", rest_url)?;
        }
        validate_url("site.origin", &self.site.origin)?;

        if let Some(auth) = &self.auth {
            if let Some(timeout) = auth.timeout_seconds {
                validate_range(
                    "auth.timeout_seconds",
                    timeout,
                    MIN_TIMEOUT_SECONDS,
                    MAX_TIMEOUT_SECONDS,
                )?;
            }
            if let Some(retries) = auth.retry_attempts {
                validate_range("auth.retry_attempts", retries, 0, MAX_TRANSPORT_RETRIES)?;
            }
        }

        tracing::debug!("Config file validation passed");
        Ok(())
    }
}
