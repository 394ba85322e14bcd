//! Client-credentials token exchange.

use std::fmt;

use reqwest::Method;
use reqwest::blocking::{Body, Request};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::fetch::HttpClient;

/// Application credentials issued by Extrabat.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Both values must be non-empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(Error::InvalidArgument(
                "Client ID and client secret are required to connect to the Extrabat API."
                    .to_string(),
            ));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

/// Exchanges `credentials` for an access token at `token_url`.
///
/// Any failure, including a non-2xx status, is reported as
/// [`Error::Authentication`]. Nothing is retried.
#[tracing::instrument(skip(http, credentials), fields(client_id = %credentials.client_id()))]
pub fn request_token<C: HttpClient + ?Sized>(
    http: &C,
    token_url: &str,
    credentials: &Credentials,
) -> Result<String> {
    let url = token_url
        .parse::<reqwest::Url>()
        .map_err(|e| Error::Authentication(format!("Invalid token URL {token_url}: {e}")))?;

    let mut req = Request::new(Method::POST, url);
    req.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    *req.body_mut() = Some(Body::from(credentials.form_body()));

    let response = http
        .execute(req)
        .map_err(|e| Error::Authentication(format!("Failed to fetch access token: {e}")))?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|e| Error::Authentication(format!("Failed to read token response: {e}")))?;
    debug!(status = status.as_u16(), bytes = text.len(), "Token response received");

    if !status.is_success() {
        return Err(Error::Authentication(format!(
            "Failed to fetch access token: status {status}: {text}"
        )));
    }

    let token: TokenResponse = serde_json::from_str(&text)
        .map_err(|e| Error::Authentication(format!("Failed to parse token response: {e}")))?;

    match token.access_token {
        Some(access_token) if !access_token.is_empty() => {
            info!(
                token_type = token.token_type.as_deref().unwrap_or("unknown"),
                expires_in = token.expires_in,
                "Access token obtained"
            );
            Ok(access_token)
        }
        _ => Err(Error::Authentication(
            "Access token not found in response.".to_string(),
        )),
    }
}
