//! Uniform shape for everything the API sends back.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A response payload: parsed JSON when the text parses, the raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Raw(String),
}

impl ResponseBody {
    /// Attempts a JSON parse and keeps the raw text on failure.
    /// The declared content type plays no part.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Status, headers and body of an API response, whatever its status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    pub code: u16,
    /// Lowercased header names; repeated headers keep their arrival order.
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: ResponseBody,
}

impl NormalizedResponse {
    pub fn from_parts(code: u16, headers: &HeaderMap, text: String) -> Self {
        Self {
            code,
            headers: collect_headers(headers),
            body: ResponseBody::from_text(text),
        }
    }

    /// Reads a transport response to the end. Failing to read the body is a
    /// transport failure.
    pub(crate) fn read(response: reqwest::blocking::Response) -> Result<Self> {
        let code = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response
            .text()
            .map_err(|e| Error::Transport(format!("API call failed: {e}")))?;
        Ok(Self::from_parts(code, &headers, text))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        out.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    out
}
