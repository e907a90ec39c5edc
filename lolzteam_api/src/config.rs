//! Client configuration: construction parameters, defaults and API key lookup.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{client::Client, Error};

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.zelenka.guru";

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "LOLZTEAM_API_KEY";

/// Advisory request budget reported to callers; not enforced.
pub const DEFAULT_REQUEST_LIMIT: u32 = 20;

/// Minimum spacing between consecutive requests.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(3);

/// Immutable settings a [`Client`] is built from.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    api_version: String,
    auth_token: Option<String>,
    rate_limit_enabled: bool,
    request_limit: u32,
    min_delay: Duration,
    timeout: Option<Duration>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("rate_limit_enabled", &self.rate_limit_enabled)
            .field("request_limit", &self.request_limit)
            .field("min_delay", &self.min_delay)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with default rate limiting for the given base
    /// URL. Fails with [`Error::Configuration`] if the URL does not parse.
    pub fn new(base_url: &str, auth_token: Option<String>) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_url, e);
            Error::Configuration(format!("invalid base URL `{}`: {}", base_url, e))
        })?;
        Ok(Self {
            base_url,
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            auth_token,
            rate_limit_enabled: true,
            request_limit: DEFAULT_REQUEST_LIMIT,
            min_delay: DEFAULT_MIN_DELAY,
            timeout: None,
        })
    }

    pub fn with_rate_limit(mut self, enabled: bool) -> Self {
        self.rate_limit_enabled = enabled;
        self
    }

    pub fn with_request_limit(mut self, request_limit: u32) -> Self {
        self.request_limit = request_limit;
        self
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_enabled
    }

    pub fn request_limit(&self) -> u32 {
        self.request_limit
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`Client`].
///
/// ```no_run
/// # async fn demo() -> Result<(), lolzteam_api::Error> {
/// use std::time::Duration;
///
/// let client = lolzteam_api::Client::builder()
///     .api_key("token")
///     .min_delay(Duration::from_secs(1))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    rate_limit: bool,
    request_limit: u32,
    min_delay: Duration,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            rate_limit: true,
            request_limit: DEFAULT_REQUEST_LIMIT,
            min_delay: DEFAULT_MIN_DELAY,
            timeout: None,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the production origin. Used for testing with wiremock.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn rate_limit(mut self, enabled: bool) -> Self {
        self.rate_limit = enabled;
        self
    }

    pub fn request_limit(mut self, request_limit: u32) -> Self {
        self.request_limit = request_limit;
        self
    }

    pub fn min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves the API key and produces the configuration without opening
    /// an HTTP session.
    pub fn build_config(self) -> Result<ClientConfig, Error> {
        let api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV).ok())?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = ClientConfig::new(&base_url, Some(api_key))?
            .with_rate_limit(self.rate_limit)
            .with_request_limit(self.request_limit)
            .with_min_delay(self.min_delay);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    pub fn build(self) -> Result<Client, Error> {
        Client::from_config(self.build_config()?)
    }
}

/// Picks the explicit key if non-empty, else the environment value if
/// non-empty, else fails.
pub(crate) fn resolve_api_key(
    explicit: Option<String>,
    from_env: Option<String>,
) -> Result<String, Error> {
    explicit
        .filter(|k| !k.is_empty())
        .or_else(|| from_env.filter(|k| !k.is_empty()))
        .ok_or_else(|| {
            Error::Configuration(format!(
                "the API key must be set either by passing it to the client builder \
                 or by setting the `{}` environment variable",
                API_KEY_ENV
            ))
        })
}
