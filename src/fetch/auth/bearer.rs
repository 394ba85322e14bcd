use reqwest::blocking::{Request, Response};
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::{Error, Result};
use crate::fetch::client::HttpClient;

/// An [`HttpClient`] wrapper that stamps `Authorization: Bearer <token>` on
/// every request, replacing any `Authorization` header already present.
pub struct Bearer<C> {
    inner: C,
    value: HeaderValue,
}

impl<C> Bearer<C> {
    /// Fails if `token` cannot be carried in a header value.
    pub fn new(inner: C, token: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::Authentication("access token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        Ok(Self { inner, value })
    }
}

impl<C: HttpClient> HttpClient for Bearer<C> {
    fn execute(&self, mut req: Request) -> reqwest::Result<Response> {
        req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        self.inner.execute(req)
    }
}
