//! Outgoing request descriptor.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

/// Everything the transport needs to issue one request.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,

    /// Absolute URL, or a path resolved by the transport against its base.
    pub url: String,

    pub headers: HeaderMap,

    pub body: Option<Vec<u8>>,

    /// Per-request timeout handed to the transport as is.
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body. Sets `Content-Type` unless already set.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        if !self.headers.contains_key(CONTENT_TYPE) {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_sets_content_type() {
        let req = OutgoingRequest::post("/datasets/create/")
            .json(&json!({"name": "qa"}))
            .unwrap();
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(req.body.as_deref(), Some(br#"{"name":"qa"}"#.as_slice()));
    }

    #[test]
    fn test_json_keeps_caller_content_type() {
        let req = OutgoingRequest::post("/x")
            .header(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"))
            .json(&[1, 2])
            .unwrap();
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), "application/vnd.api+json");
    }
}
