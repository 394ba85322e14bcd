//! Per-call request options.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{Error, Result};

/// Headers and body supplied by the caller of [`Extrabat::call`](crate::Extrabat::call).
///
/// `Authorization` is always overwritten by the client's bearer token.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Header names are case-insensitive on the wire. When two keys differ
    /// only by case, the one that sorts last wins (`"x-a"` over `"X-A"`).
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    /// `body` holds a JSON document as a string that must be decoded before
    /// being sent.
    pub decode_json: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends `raw` after decoding it as JSON.
    pub fn json_str(mut self, raw: impl Into<String>) -> Self {
        self.body = Some(Value::String(raw.into()));
        self.decode_json = true;
        self
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidArgument(format!("Invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::InvalidArgument(format!("Invalid value for header {name}"))
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// The JSON document to send. Absent or `null` bodies become `{}`, as
    /// does a decoded string that is not valid JSON.
    pub(crate) fn payload(&self) -> Result<Value> {
        let body = match (&self.body, self.decode_json) {
            (None, _) => None,
            (Some(Value::String(raw)), true) => serde_json::from_str::<Value>(raw).ok(),
            (Some(Value::Null), true) => None,
            (Some(_), true) => {
                return Err(Error::InvalidArgument(
                    "decode_json requires the body to be a JSON string".to_string(),
                ));
            }
            (Some(value), false) => Some(value.clone()),
        };

        Ok(match body {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(value) => value,
        })
    }
}
