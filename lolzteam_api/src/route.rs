//! Declarative description of a single API call: [`Route`], its query
//! [`Params`] and multipart [`Files`].

use std::fmt;
use std::path::Path;

use serde_json::Value;

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How a list-valued parameter is spelled in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// `tags=a&tags=b`
    #[default]
    Repeated,
    /// `prefix_id[]=1&prefix_id[]=2`
    Brackets,
}

/// Value of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List { values: Vec<String>, style: ListStyle },
}

/// Conversion into an optional query value. `None` means the parameter is
/// absent and will not be encoded.
pub trait ToParam {
    fn to_param(self) -> Option<ParamValue>;
}

impl ToParam for ParamValue {
    fn to_param(self) -> Option<ParamValue> {
        Some(self)
    }
}

impl ToParam for String {
    fn to_param(self) -> Option<ParamValue> {
        Some(ParamValue::Scalar(self))
    }
}

impl ToParam for &str {
    fn to_param(self) -> Option<ParamValue> {
        Some(ParamValue::Scalar(self.to_string()))
    }
}

impl ToParam for &String {
    fn to_param(self) -> Option<ParamValue> {
        Some(ParamValue::Scalar(self.clone()))
    }
}

/// Booleans are sent the way the forum reads flags: `1` or `0`.
impl ToParam for bool {
    fn to_param(self) -> Option<ParamValue> {
        Some(ParamValue::Scalar(if self { "1" } else { "0" }.to_string()))
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(self) -> Option<ParamValue> {
        self.and_then(ToParam::to_param)
    }
}

macro_rules! scalar_param {
    ($($ty:ty),*) => {
        $(
            impl ToParam for $ty {
                fn to_param(self) -> Option<ParamValue> {
                    Some(ParamValue::Scalar(self.to_string()))
                }
            }
        )*
    };
}

scalar_param!(i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// `Some(true)` becomes `"1"`; `false` and `None` leave the parameter out.
pub fn one_or_none(flag: Option<bool>) -> Option<&'static str> {
    flag.filter(|f| *f).map(|_| "1")
}

/// `Some(true)` becomes `"true"`; `false` and `None` leave the parameter out.
pub fn true_or_none(flag: Option<bool>) -> Option<&'static str> {
    flag.filter(|f| *f).map(|_| "true")
}

/// Ordered query parameters. Absent entries are kept so a [`Route`] shows
/// everything its caller passed, and are dropped when the query is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar (or absent) parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl ToParam) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a list parameter spelled with the given style.
    pub fn with_list<I, T>(mut self, name: impl Into<String>, values: I, style: ListStyle) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.entries
            .push((name.into(), Some(ParamValue::List { values, style })));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToParam) {
        self.entries.push((name.into(), value.to_param()));
    }

    pub fn extend(&mut self, other: Params) {
        self.entries.extend(other.entries);
    }

    /// True when nothing would be encoded.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Entries that carry a value; empty lists count as absent.
    pub fn present(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().filter_map(|(name, value)| match value {
            Some(ParamValue::List { values, .. }) if values.is_empty() => None,
            Some(value) => Some((name.as_str(), value)),
            None => None,
        })
    }

    /// Flattened `(key, value)` pairs in insertion order, lists expanded per
    /// their [`ListStyle`].
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in self.present() {
            match value {
                ParamValue::Scalar(v) => pairs.push((name.to_string(), v.clone())),
                ParamValue::List { values, style } => {
                    let key = match style {
                        ListStyle::Brackets if !name.ends_with("[]") => format!("{name}[]"),
                        _ => name.to_string(),
                    };
                    for v in values {
                        pairs.push((key.clone(), v.clone()));
                    }
                }
            }
        }
        pairs
    }
}

/// One multipart file field.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub mime: Option<String>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("len", &self.bytes.len())
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .finish()
    }
}

impl FilePart {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            mime: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk, using its name as the part's file name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let part = Self::new(bytes);
        Ok(match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => part.with_file_name(name),
            None => part,
        })
    }
}

/// Multipart file fields of a route, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Files {
    parts: Vec<(String, FilePart)>,
}

impl Files {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, part: FilePart) -> Self {
        self.parts.push((field.into(), part));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilePart)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }
}

/// One HTTP call: method, path relative to the base URL, query parameters,
/// optional JSON body and optional multipart files.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    method: Method,
    url: String,
    params: Params,
    data: Option<Value>,
    files: Files,
}

impl Route {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Params::new(),
            data: None,
            files: Files::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_files(mut self, files: Files) -> Self {
        self.files = files;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    /// The body is only sent when it carries something: `null`, `{}`, `[]`
    /// and `""` count as no body.
    pub fn has_data(&self) -> bool {
        match &self.data {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_params_are_not_encoded() {
        let params = Params::new()
            .with("page", None::<u32>)
            .with("limit", 10);
        assert_eq!(params.pairs(), vec![("limit".to_string(), "10".to_string())]);
        assert_eq!(params.present().count(), 1);
    }

    #[test]
    fn list_styles() {
        let params = Params::new()
            .with_list("prefix_id", [1, 2], ListStyle::Brackets)
            .with_list("tags", ["a", "b"], ListStyle::Repeated)
            .with_list("response_ids[]", [7], ListStyle::Brackets);
        assert_eq!(
            params.pairs(),
            vec![
                ("prefix_id[]".to_string(), "1".to_string()),
                ("prefix_id[]".to_string(), "2".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
                ("response_ids[]".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn empty_lists_are_absent() {
        let params = Params::new().with_list("tags", Vec::<String>::new(), ListStyle::Repeated);
        assert!(params.is_empty());
        assert!(params.pairs().is_empty());
    }

    #[test]
    fn flag_helpers() {
        assert_eq!(one_or_none(Some(true)), Some("1"));
        assert_eq!(one_or_none(Some(false)), None);
        assert_eq!(one_or_none(None), None);
        assert_eq!(true_or_none(Some(true)), Some("true"));
        assert_eq!(true_or_none(Some(false)), None);
    }

    #[test]
    fn scalar_conversions() {
        let params = Params::new()
            .with("sticky", true)
            .with("hidden", false)
            .with("amount", 12.5)
            .with("title", "hello");
        assert_eq!(
            params.pairs(),
            vec![
                ("sticky".to_string(), "1".to_string()),
                ("hidden".to_string(), "0".to_string()),
                ("amount".to_string(), "12.5".to_string()),
                ("title".to_string(), "hello".to_string()),
            ]
        );
    }

    #[test]
    fn empty_bodies_do_not_count_as_data() {
        assert!(!Route::post("/x").has_data());
        assert!(!Route::post("/x").with_data(json!({})).has_data());
        assert!(!Route::post("/x").with_data(Value::Null).has_data());
        assert!(Route::post("/x").with_data(json!({"a": 1})).has_data());
    }

    #[test]
    fn file_part_debug_hides_bytes() {
        let part = FilePart::new(vec![0u8; 4]).with_file_name("a.png");
        let debug = format!("{:?}", part);
        assert!(debug.contains("len: 4"));
        assert!(debug.contains("a.png"));
    }
}
