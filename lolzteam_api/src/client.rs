//! HTTP client for the Lolzteam forum API.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    api::Api,
    config::{ClientBuilder, ClientConfig},
    rate_limiter::RateLimiter,
    request::{build_request, summarize},
    response::classify,
    route::Route,
    Error,
};

/// HTTP client for the Lolzteam forum API.
///
/// Every call goes through [`Client::request`]: wait for the rate limiter,
/// build the request, send it, classify the response and, on success, record
/// completion for the limiter.
/// The owned `reqwest::Client` is the connection pool; it lives as long as
/// this value and is released by [`Client::close`] or on drop.
///
/// The rate limiter assumes sequential use. Share one client between
/// concurrent tasks only behind external synchronization, or give each task
/// its own client.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    limiter: RateLimiter,
}

impl Client {
    /// Creates a client for the production API, reading the key from
    /// `LOLZTEAM_API_KEY`.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Creates a client for the production API with an explicit key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Opens the HTTP session for an already resolved configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Configuration(format!("failed to build HTTP client: {}", e))
        })?;
        let limiter = RateLimiter::new(config.min_delay());
        Ok(Self {
            http,
            config,
            limiter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Dispatches a route. This is the only place the crate touches the
    /// network.
    pub async fn request(&self, route: Route) -> Result<Value, Error> {
        if self.config.rate_limit_enabled() {
            self.limiter.wait().await;
        }

        let request = build_request(&self.http, &self.config, &route)?;
        let summary = summarize(&request, &route);
        tracing::debug!("dispatching {}", summary);

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!("Failed to send {}: {}", summary, e);
            Error::Transport(e)
        })?;
        tracing::debug!("{} answered {}", summary, response.status());

        let body = classify(response, summary).await?;
        self.limiter.mark_completed();
        Ok(body)
    }

    /// Releases the HTTP session and its pooled connections.
    pub fn close(self) {
        tracing::debug!("closing client for {}", self.config.base_url());
        drop(self);
    }
}

#[async_trait]
impl Api for Client {
    async fn request(&self, route: Route) -> Result<Value, Error> {
        Client::request(self, route).await
    }
}
