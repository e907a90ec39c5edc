//! Error types for the API client.

use std::fmt;

use serde_json::Value;
use url::Url;

use crate::route::Method;

/// Method and URL of the request an error originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: Method,
    pub url: Url,
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Discriminant of [`Error`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    RateLimit,
    ApiStatus,
    Transport,
    Decode,
    InvalidRequest,
}

/// Errors that can occur when building or dispatching API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client could not be constructed (missing API key, bad base URL).
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The API answered 429 Too Many Requests.
    #[error("rate limited by {request}: {message}")]
    RateLimit {
        status: u16,
        message: String,
        body: Value,
        request: RequestSummary,
    },

    /// The API answered with any other non-success status.
    #[error("request {request} failed with status {status}: {message}")]
    ApiStatus {
        status: u16,
        message: String,
        body: Value,
        request: RequestSummary,
    },

    /// Network-level failure reported by the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not valid JSON.
    #[error("failed to decode response body of {request}")]
    Decode {
        #[source]
        source: serde_json::Error,
        request: RequestSummary,
    },

    /// The route could not be turned into an HTTP request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::ApiStatus { .. } => ErrorKind::ApiStatus,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimit { .. })
    }

    /// HTTP status of an API failure, or of the transport error if it has one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RateLimit { status, .. } | Error::ApiStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The joined `errors` message of an API failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::RateLimit { message, .. } | Error::ApiStatus { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The decoded response body of an API failure (`Null` when it was not JSON).
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::RateLimit { body, .. } | Error::ApiStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&RequestSummary> {
        match self {
            Error::RateLimit { request, .. }
            | Error::ApiStatus { request, .. }
            | Error::Decode { request, .. } => Some(request),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
