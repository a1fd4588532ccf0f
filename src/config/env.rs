use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;
use std::env;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const SUPABASE_REST_URL: &str = "SUPABASE_REST_URL";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const SITE_ORIGIN: &str = "SITE_ORIGIN";
pub const AUTH_TIMEOUT_SECONDS: &str = "AUTH_TIMEOUT_SECONDS";
pub const AUTH_RETRY_ATTEMPTS: &str = "AUTH_RETRY_ATTEMPTS";

/// Return `value` when it is present and non-empty, otherwise a
/// configuration error naming `key`.
pub fn require(key: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::missing_config(key)),
    }
}

/// Reads the process environment at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Result<String> {
        require(key, self.lookup(key))
    }

    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Fixed key/value configuration, layered over an optional fallback.
///
/// Used for tests and for CLI overrides on top of the environment.
#[derive(Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
    fallback: Option<Box<dyn ConfigProvider>>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn layered_over(mut self, fallback: impl ConfigProvider + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl std::fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("MapConfig")
            .field("keys", &keys)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

impl ConfigProvider for MapConfig {
    fn get(&self, key: &str) -> Result<String> {
        match self.values.get(key) {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            _ => match &self.fallback {
                Some(fallback) => fallback.get(key),
                None => Err(AppError::missing_config(key)),
            },
        }
    }

    /// An explicitly stored empty value shadows the fallback here, unlike `get`.
    fn lookup(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(v) => Some(v.clone()),
            None => self.fallback.as_ref().and_then(|fallback| fallback.lookup(key)),
        }
    }
}
