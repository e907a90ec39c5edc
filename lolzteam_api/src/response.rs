//! Maps a completed HTTP response to its JSON body or a typed [`Error`].

use reqwest::StatusCode;
use serde_json::Value;

use crate::{errors::RequestSummary, Error};

/// Reads the body and classifies the response. Failing to read the body is
/// a transport error.
pub async fn classify(response: reqwest::Response, request: RequestSummary) -> Result<Value, Error> {
    let status = response.status();
    let body = response.bytes().await.map_err(|e| {
        tracing::error!("Failed to read response body of {}: {}", request, e);
        Error::Transport(e)
    })?;
    classify_parts(status, &body, request)
}

/// Statuses 200 through 399 are successes.
pub fn is_ok(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

/// Classifies an already-read response.
pub fn classify_parts(status: StatusCode, body: &[u8], request: RequestSummary) -> Result<Value, Error> {
    if is_ok(status) {
        return serde_json::from_slice(body).map_err(|source| {
            tracing::error!(
                "Failed to parse response of {}: {} | body: {}",
                request,
                source,
                truncate_body(body)
            );
            Error::Decode { source, request }
        });
    }

    let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let messages = error_messages(&body);
    let message = if messages.is_empty() {
        default_message(status)
    } else {
        messages.join("; ")
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Rate limited on {}: {}", request, message);
        Err(Error::RateLimit {
            status: status.as_u16(),
            message,
            body,
            request,
        })
    } else {
        tracing::error!("Request {} failed with status {}: {}", request, status, message);
        Err(Error::ApiStatus {
            status: status.as_u16(),
            message,
            body,
            request,
        })
    }
}

/// Entries of the body's `errors` array; empty for any other shape.
pub fn error_messages(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Canonical reason phrase of the status, e.g. "Bad Request".
pub fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 500;
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX {
        text.into_owned()
    } else {
        let cut = (0..=MAX).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...[truncated]", &text[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Method;
    use crate::ErrorKind;
    use serde_json::json;
    use url::Url;

    fn summary() -> RequestSummary {
        RequestSummary {
            method: Method::Post,
            url: Url::parse("https://api.zelenka.guru/posts").unwrap(),
        }
    }

    fn classify_json(status: u16, body: Value) -> Result<Value, Error> {
        let status = StatusCode::from_u16(status).unwrap();
        classify_parts(status, body.to_string().as_bytes(), summary())
    }

    #[test]
    fn success_body_passes_through() {
        let value = classify_json(200, json!({"id": 1})).unwrap();
        assert_eq!(value, json!({"id": 1}));
    }

    #[test]
    fn redirect_range_counts_as_success() {
        let value = classify_json(304, json!({"cached": true})).unwrap();
        assert_eq!(value, json!({"cached": true}));
    }

    #[test]
    fn too_many_requests_is_rate_limit() {
        let err = classify_json(429, json!({"errors": ["slow down"]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.message(), Some("slow down"));
        assert_eq!(err.body(), Some(&json!({"errors": ["slow down"]})));
        assert_eq!(err.request(), Some(&summary()));
    }

    #[test]
    fn empty_errors_fall_back_to_reason() {
        let err = classify_json(400, json!({"errors": []})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApiStatus);
        assert_eq!(err.message(), Some("Bad Request"));

        let err = classify_json(403, json!({})).unwrap_err();
        assert_eq!(err.message(), Some("Forbidden"));

        let err = classify_json(429, json!({"errors": []})).unwrap_err();
        assert_eq!(err.message(), Some("Too Many Requests"));
    }

    #[test]
    fn errors_are_joined() {
        let err = classify_json(400, json!({"errors": ["first", "second"]})).unwrap_err();
        assert_eq!(err.message(), Some("first; second"));
    }

    #[test]
    fn non_json_failure_body() {
        let err = classify_parts(StatusCode::BAD_GATEWAY, b"<html>oops</html>", summary()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ApiStatus);
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.message(), Some("Bad Gateway"));
        assert_eq!(err.body(), Some(&Value::Null));
    }

    #[test]
    fn unknown_status_message() {
        let err = classify_parts(StatusCode::from_u16(599).unwrap(), b"", summary()).unwrap_err();
        assert_eq!(err.message(), Some("HTTP 599"));
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = classify_parts(StatusCode::OK, b"{not valid json}", summary()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn non_string_error_entries() {
        assert_eq!(
            error_messages(&json!({"errors": ["a", 2, {"b": 1}]})),
            vec!["a".to_string(), "2".to_string(), "{\"b\":1}".to_string()]
        );
        assert!(error_messages(&json!({"errors": "flat"})).is_empty());
        assert!(error_messages(&json!([1, 2])).is_empty());
    }

    #[test]
    fn truncation_keeps_short_bodies() {
        assert_eq!(truncate_body(b"short"), "short");
        let long = "x".repeat(600);
        assert!(truncate_body(long.as_bytes()).ends_with("...[truncated]"));
    }
}
