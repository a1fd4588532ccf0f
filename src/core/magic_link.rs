use crate::config::env::{AUTH_RETRY_ATTEMPTS, AUTH_TIMEOUT_SECONDS, SITE_ORIGIN};
use crate::core::supabase::PublicEndpoint;
use crate::domain::model::{GoTrueErrorBody, MagicLinkPayload};
use crate::domain::ports::{ConfigProvider, MagicLinkSender};
use crate::utils::error::{AppError, Result, MAGIC_LINK_FALLBACK_MESSAGE};
use crate::utils::validation::{validate_range, validate_url};
use reqwest::{Client, Response};
use std::time::Duration;

pub const MAGIC_LINK_PATH: &str = "/auth/v1/magiclink";
pub const MIN_TIMEOUT_SECONDS: u64 = 1;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
pub const MAX_TRANSPORT_RETRIES: u32 = 5;

/// Transport tuning for the magic-link request.
///
/// The default sends exactly once with no timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagicLinkOptions {
    pub timeout: Option<Duration>,
    /// Extra attempts after a transport failure. HTTP error statuses are never retried.
    pub transport_retries: u32,
}

impl MagicLinkOptions {
    /// Read `AUTH_TIMEOUT_SECONDS` and `AUTH_RETRY_ATTEMPTS`; both are optional.
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let timeout_seconds = config
            .get_optional(AUTH_TIMEOUT_SECONDS)
            .map(|raw| parse_number::<u64>(AUTH_TIMEOUT_SECONDS, &raw))
            .transpose()?;
        if let Some(seconds) = timeout_seconds {
            validate_range(
                AUTH_TIMEOUT_SECONDS,
                seconds,
                MIN_TIMEOUT_SECONDS,
                MAX_TIMEOUT_SECONDS,
            )?;
        }

        let transport_retries = config
            .get_optional(AUTH_RETRY_ATTEMPTS)
            .map(|raw| parse_number::<u32>(AUTH_RETRY_ATTEMPTS, &raw))
            .transpose()?
            .unwrap_or(0);
        validate_range(AUTH_RETRY_ATTEMPTS, transport_retries, 0, MAX_TRANSPORT_RETRIES)?;

        let timeout = timeout_seconds.map(Duration::from_secs);

        Ok(Self {
            timeout,
            transport_retries,
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Value must be a non-negative integer".to_string(),
        })
}

/// Client for GoTrue's magic-link endpoint.
///
/// Configuration is resolved on every send, so a missing value fails at the
/// moment of use and before anything goes on the wire.
pub struct MagicLinkClient<C: ConfigProvider> {
    config: C,
    client: Client,
    options: MagicLinkOptions,
}

impl<C: ConfigProvider> MagicLinkClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
            options: MagicLinkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MagicLinkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn options(&self) -> MagicLinkOptions {
        self.options
    }

    /// Serialized origin of `SITE_ORIGIN`, e.g. `https://cafe.example`.
    pub fn site_origin(&self) -> Result<String> {
        let raw = self.config.get(SITE_ORIGIN)?;
        let url = validate_url(SITE_ORIGIN, &raw)?;
        Ok(url.origin().ascii_serialization())
    }

    async fn post_once(
        &self,
        url: &str,
        endpoint: &PublicEndpoint,
        payload: &MagicLinkPayload,
    ) -> Result<Response> {
        let mut request = self
            .client
            .post(url)
            .headers(endpoint.auth_headers()?)
            .json(payload);
        if let Some(timeout) = self.options.timeout {
            request = request.timeout(timeout);
        }
        Ok(request.send().await?)
    }

    async fn post_with_retries(
        &self,
        url: &str,
        endpoint: &PublicEndpoint,
        payload: &MagicLinkPayload,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            match self.post_once(url, endpoint, payload).await {
                Err(AppError::TransportError(e))
                    if attempt < self.options.transport_retries && !e.is_builder() =>
                {
                    attempt += 1;
                    tracing::warn!(
                        "Magic link transport failure, retrying ({}/{}): {}",
                        attempt,
                        self.options.transport_retries,
                        e
                    );
                }
                other => return other,
            }
        }
    }
}

async fn error_message(response: Response) -> String {
    response
        .json::<GoTrueErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| MAGIC_LINK_FALLBACK_MESSAGE.to_string())
}

#[async_trait::async_trait]
impl<C: ConfigProvider> MagicLinkSender for MagicLinkClient<C> {
    async fn send_magic_link(&self, email: &str) -> Result<()> {
        let endpoint = PublicEndpoint::resolve(&self.config)?;
        let origin = self.site_origin()?;
        let url = endpoint.rest_url(MAGIC_LINK_PATH);
        let payload = MagicLinkPayload::new(email, &origin);

        tracing::debug!("Requesting magic link: POST {}", url);
        let response = self.post_with_retries(&url, &endpoint, &payload).await?;
        let status = response.status();
        tracing::debug!("Magic link response status: {}", status);

        if status.is_success() {
            tracing::info!("Magic link requested");
            return Ok(());
        }

        let message = error_message(response).await;
        tracing::warn!("Magic link request rejected ({}): {}", status, message);
        Err(AppError::auth_request(Some(status.as_u16()), message))
    }
}
