//! Turns a [`Route`] plus [`ClientConfig`] into a ready-to-send request.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;

use crate::{
    config::ClientConfig,
    errors::RequestSummary,
    route::{Files, Route},
    Error,
};

/// `Lolzteam/Rust <crate version>`.
pub fn user_agent(config: &ClientConfig) -> String {
    format!("Lolzteam/Rust {}", config.api_version())
}

/// `Authorization: Bearer <token>` when a token is configured.
pub fn auth_headers(config: &ClientConfig) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    if let Some(token) = config.auth_token() {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::InvalidRequest(format!("invalid API key format: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// User agent plus auth headers, computed fresh for every request.
pub fn default_headers(config: &ClientConfig) -> Result<HeaderMap, Error> {
    let mut headers = auth_headers(config)?;
    let agent = HeaderValue::from_str(&user_agent(config))
        .map_err(|e| Error::InvalidRequest(format!("invalid user agent: {}", e)))?;
    headers.insert(USER_AGENT, agent);
    Ok(headers)
}

/// Joins the base URL and the route path, then appends the present query
/// parameters.
pub fn resolve_url(config: &ClientConfig, route: &Route) -> Result<Url, Error> {
    let base = config.base_url().as_str().trim_end_matches('/');
    let path = route.url().trim_start_matches('/');
    let mut url = Url::parse(&format!("{}/{}", base, path)).map_err(|e| {
        tracing::error!("Invalid URL constructed for {}: {}", route.url(), e);
        Error::InvalidRequest(format!("invalid path `{}`: {}", route.url(), e))
    })?;

    let pairs = route.params().pairs();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

/// Builds the request for `route`.
///
/// Files take precedence over data: a route with files is always sent as
/// `multipart/form-data`, and the fields of its JSON object body travel as
/// text parts. Data alone is sent as `application/json`. A route with
/// neither carries no `Content-Type`.
pub fn build_request(
    http: &reqwest::Client,
    config: &ClientConfig,
    route: &Route,
) -> Result<reqwest::Request, Error> {
    let url = resolve_url(config, route)?;
    let mut builder = http
        .request(route.method().into(), url)
        .headers(default_headers(config)?);

    if route.has_files() {
        let data = route.data().filter(|_| route.has_data());
        builder = builder.multipart(multipart_form(route.files(), data)?);
    } else if let Some(data) = route.data().filter(|_| route.has_data()) {
        let body = serde_json::to_vec(data)
            .map_err(|e| Error::InvalidRequest(format!("failed to encode body: {}", e)))?;
        builder = builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);
    }

    builder
        .build()
        .map_err(|e| Error::InvalidRequest(e.to_string()))
}

/// Method and final URL, kept for error diagnostics.
pub(crate) fn summarize(request: &reqwest::Request, route: &Route) -> RequestSummary {
    RequestSummary {
        method: route.method(),
        url: request.url().clone(),
    }
}

fn multipart_form(files: &Files, data: Option<&Value>) -> Result<Form, Error> {
    let mut form = Form::new();

    match data {
        Some(Value::Object(fields)) => {
            for (name, value) in fields {
                if let Some(text) = field_text(value) {
                    form = form.text(name.clone(), text);
                }
            }
        }
        Some(other) => {
            form = form.text("data", other.to_string());
        }
        None => {}
    }

    for (field, file) in files.iter() {
        let mut part = Part::bytes(file.bytes.clone());
        if let Some(name) = &file.file_name {
            part = part.file_name(name.clone());
        }
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| Error::InvalidRequest(format!("invalid MIME type `{}`: {}", mime, e)))?;
        }
        form = form.part(field.to_string(), part);
    }
    Ok(form)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{FilePart, ListStyle, Params};
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new("https://api.zelenka.guru", Some("token".into())).unwrap()
    }

    fn build(route: &Route) -> reqwest::Request {
        build_request(&reqwest::Client::new(), &config(), route).unwrap()
    }

    fn content_type(request: &reqwest::Request) -> Option<&str> {
        request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    #[test]
    fn default_headers_carry_agent_and_token() {
        let request = build(&Route::get("/threads"));
        let headers = request.headers();
        assert_eq!(headers[AUTHORIZATION], "Bearer token");
        assert_eq!(
            headers[USER_AGENT].to_str().unwrap(),
            format!("Lolzteam/Rust {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn no_token_no_authorization() {
        let config = ClientConfig::new("https://api.zelenka.guru", None).unwrap();
        let headers = default_headers(&config).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(USER_AGENT).is_some());
    }

    #[test]
    fn bare_route_has_no_content_type() {
        let request = build(&Route::get("/threads"));
        assert_eq!(content_type(&request), None);
        assert!(request.body().is_none());

        let request = build(&Route::post("/threads/1/bump").with_data(json!({})));
        assert_eq!(content_type(&request), None);
    }

    #[test]
    fn data_is_sent_as_json() {
        let request = build(&Route::put("/posts/1").with_data(json!({"post_body": "hi"})));
        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(content_type(&request), Some("application/json"));
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let body: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(body, json!({"post_body": "hi"}));
    }

    #[test]
    fn files_are_multipart() {
        let files = crate::route::Files::new().with("avatar", FilePart::new(vec![1, 2, 3]));
        let request = build(&Route::post("/users/me/avatar").with_files(files));
        assert!(content_type(&request)
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn files_win_over_data() {
        let files = crate::route::Files::new().with(
            "background",
            FilePart::new(vec![1]).with_file_name("bg.png").with_mime("image/png"),
        );
        let route = Route::post("/users/1/background")
            .with_files(files)
            .with_data(json!({"crop": 100}));
        let request = build(&route);
        assert!(content_type(&request)
            .unwrap()
            .starts_with("multipart/form-data"));
    }

    #[test]
    fn invalid_mime_is_rejected() {
        let files = crate::route::Files::new()
            .with("avatar", FilePart::new(vec![1]).with_mime("not a mime"));
        let err = build_request(
            &reqwest::Client::new(),
            &config(),
            &Route::post("/users/me/avatar").with_files(files),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let config = ClientConfig::new("https://example.com/api/", None).unwrap();
        let url = resolve_url(&config, &Route::get("/threads/5")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/threads/5");

        let url = resolve_url(&config, &Route::get("threads/5")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/threads/5");
    }

    #[test]
    fn absent_params_are_dropped_from_query() {
        let route = Route::get("/threads").with_params(
            Params::new().with("page", None::<u32>).with("limit", 10),
        );
        let url = resolve_url(&config(), &route).unwrap();
        assert_eq!(url.query(), Some("limit=10"));

        let route = Route::get("/threads").with_params(Params::new().with("page", None::<u32>));
        let url = resolve_url(&config(), &route).unwrap();
        assert_eq!(url.query(), None);
        assert_eq!(url.as_str(), "https://api.zelenka.guru/threads");
    }

    #[test]
    fn list_params_follow_their_style() {
        let route = Route::post("/threads").with_params(
            Params::new()
                .with_list("prefix_id", [3, 4], ListStyle::Brackets)
                .with_list("tags", ["x", "y"], ListStyle::Repeated),
        );
        let url = resolve_url(&config(), &route).unwrap();
        assert_eq!(
            url.query(),
            Some("prefix_id%5B%5D=3&prefix_id%5B%5D=4&tags=x&tags=y")
        );
    }

    #[test]
    fn building_is_deterministic() {
        let route = Route::post("/posts")
            .with_params(Params::new().with("thread_id", 9).with("quote_post_id", None::<u64>))
            .with_data(json!({"post_body": "same"}));
        let first = build(&route);
        let second = build(&route);
        assert_eq!(first.method(), second.method());
        assert_eq!(first.url(), second.url());
        assert_eq!(first.headers(), second.headers());
        assert_eq!(
            first.body().and_then(|b| b.as_bytes()),
            second.body().and_then(|b| b.as_bytes())
        );
    }
}
