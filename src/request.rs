//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// An incoming HTTP request with its body fully read.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// A request with no headers and an empty body.
    ///
    /// The server builds requests from the wire; this constructor exists for
    /// driving an [`App`](crate::App) directly.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: HashMap::new(),
        }
    }

    /// Adds a header. Names or values that are not valid HTTP are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// read as `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/products/{id}`, `req.param("id")` on
    /// `/api/products/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body decodes as `{}`. Malformed JSON is an internal fault;
    /// well-formed JSON of the wrong shape is a validation failure.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let raw: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &self.body
        };
        serde_json::from_slice(raw).map_err(|e| match e.classify() {
            Category::Data => ApiError::Validation,
            Category::Syntax | Category::Eof | Category::Io => {
                ApiError::Internal(format!("malformed request body: {e}"))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: Option<String>,
        count: Option<u32>,
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::GET, "/").with_header("Authorization", "secret-token");
        assert_eq!(req.header("authorization"), Some("secret-token"));
        assert_eq!(req.header("AUTHORIZATION"), Some("secret-token"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn empty_body_decodes_as_empty_object() {
        let req = Request::new(Method::POST, "/");
        let p: Payload = req.json().unwrap();
        assert!(p.name.is_none());
        assert!(p.count.is_none());
    }

    #[test]
    fn malformed_body_is_internal() {
        let req = Request::new(Method::POST, "/").with_body(r#"{"name":"#);
        assert!(matches!(req.json::<Payload>(), Err(ApiError::Internal(_))));

        let req = Request::new(Method::POST, "/").with_body("not json");
        assert!(matches!(req.json::<Payload>(), Err(ApiError::Internal(_))));
    }

    #[test]
    fn wrong_shape_is_validation() {
        let req = Request::new(Method::POST, "/").with_body(r#"{"count":"ten"}"#);
        assert!(matches!(req.json::<Payload>(), Err(ApiError::Validation)));
    }
}
