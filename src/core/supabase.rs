//! Resolution of Supabase endpoints and credentials.
//!
//! Two call sites exist and never share key material: [`PublicEndpoint`]
//! carries the browser-safe anonymous key, [`ServiceRoleEndpoint`] carries the
//! server-only service-role key.

use crate::config::env::{
    require, SUPABASE_ANON_KEY, SUPABASE_REST_URL, SUPABASE_SERVICE_ROLE_KEY, SUPABASE_URL,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

pub const API_KEY_HEADER: &str = "apikey";

/// Join `base` and `path`, adding the leading `/` when `path` lacks one.
pub fn join_rest_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

fn key_headers(key_name: &str, key: &str) -> Result<HeaderMap> {
    let invalid = |reason: String| AppError::InvalidConfigValueError {
        field: key_name.to_string(),
        value: "<redacted>".to_string(),
        reason,
    };

    let mut api_key =
        HeaderValue::from_str(key).map_err(|e| invalid(format!("not a valid header value: {}", e)))?;
    api_key.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key))
        .map_err(|e| invalid(format!("not a valid header value: {}", e)))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

#[derive(Clone, PartialEq, Eq)]
pub struct AnonKey(String);

impl AnonKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AnonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AnonKey(..)")
    }
}

/// Elevated credential. Only [`ServiceRoleEndpoint`] can build one.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceRoleKey(String);

impl ServiceRoleKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ServiceRoleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceRoleKey(<redacted>)")
    }
}

/// Browser-safe endpoint: public URL plus anonymous key.
#[derive(Debug, Clone)]
pub struct PublicEndpoint {
    base_url: String,
    anon_key: AnonKey,
}

impl PublicEndpoint {
    pub fn resolve<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let base_url = config.get(SUPABASE_URL)?;
        let anon_key = config.get(SUPABASE_ANON_KEY)?;
        validate_url(SUPABASE_URL, &base_url)?;

        Ok(Self {
            base_url,
            anon_key: AnonKey(anon_key),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn anon_key(&self) -> &AnonKey {
        &self.anon_key
    }

    pub fn rest_url(&self, path: &str) -> String {
        join_rest_path(&self.base_url, path)
    }

    /// `apikey` and `Authorization: Bearer` headers, both carrying the anon key.
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        key_headers(SUPABASE_ANON_KEY, self.anon_key.expose())
    }
}

/// Server-only endpoint: REST URL plus service-role key.
#[derive(Debug, Clone)]
pub struct ServiceRoleEndpoint {
    base_url: String,
    service_role_key: ServiceRoleKey,
}

impl ServiceRoleEndpoint {
    /// `SUPABASE_REST_URL` wins whenever it is set, even to an empty string;
    /// `SUPABASE_URL` is consulted only when it is unset.
    pub fn resolve<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let base_url = require(
            &format!("{} or {}", SUPABASE_REST_URL, SUPABASE_URL),
            config
                .lookup(SUPABASE_REST_URL)
                .or_else(|| config.lookup(SUPABASE_URL)),
        )?;
        validate_url(SUPABASE_REST_URL, &base_url)?;
        let service_role_key = config.get(SUPABASE_SERVICE_ROLE_KEY)?;

        Ok(Self {
            base_url,
            service_role_key: ServiceRoleKey(service_role_key),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_role_key(&self) -> &ServiceRoleKey {
        &self.service_role_key
    }

    pub fn rest_url(&self, path: &str) -> String {
        join_rest_path(&self.base_url, path)
    }

    pub fn auth_headers(&self) -> Result<HeaderMap> {
        key_headers(SUPABASE_SERVICE_ROLE_KEY, self.service_role_key.expose())
    }
}
