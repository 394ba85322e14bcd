//! The authenticated Extrabat client.

use reqwest::blocking::{Body, Request};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, warn};

use crate::config::ExtrabatConfig;
use crate::error::{Error, Result};
use crate::fetch::auth::Bearer;
use crate::fetch::{BasicClient, HttpClient};
use crate::lookup::{self, Category, LookupId};
use crate::request::RequestOptions;
use crate::response::NormalizedResponse;
use crate::token::{self, Credentials};
use crate::verb::Verb;

/// Blocking client for the Extrabat REST API.
///
/// Authenticates once when built and sends every request with the resulting
/// bearer token. The token is never refreshed.
pub struct Extrabat<C = BasicClient> {
    config: ExtrabatConfig,
    http: Bearer<C>,
}

impl Extrabat<BasicClient> {
    /// Authenticates against the production endpoints.
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        let credentials = Credentials::new(client_id, client_secret)?;
        Self::with_config(ExtrabatConfig::default(), BasicClient::new(), &credentials)
    }
}

impl<C: HttpClient> Extrabat<C> {
    /// Authenticates through `http` against the endpoints in `config`.
    pub fn with_config(config: ExtrabatConfig, http: C, credentials: &Credentials) -> Result<Self> {
        let token = token::request_token(&http, &config.token_url, credentials)?;
        Self::from_token(config, http, &token)
    }

    fn from_token(config: ExtrabatConfig, http: C, token: &str) -> Result<Self> {
        Ok(Self {
            config,
            http: Bearer::new(http, token)?,
        })
    }

    pub fn config(&self) -> &ExtrabatConfig {
        &self.config
    }

    /// Sends `verb` to `endpoint`, relative to the API base URL.
    ///
    /// Any HTTP status comes back as a [`NormalizedResponse`]; only bad
    /// arguments and transport failures are errors.
    #[tracing::instrument(skip(self, options), fields(verb = %verb, endpoint = %endpoint))]
    pub fn call(
        &self,
        verb: &str,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<NormalizedResponse> {
        let verb: Verb = verb.parse()?;

        let target = format!("{}{}", self.config.api_url, endpoint);
        let url = target
            .parse::<reqwest::Url>()
            .map_err(|e| Error::InvalidArgument(format!("Invalid endpoint URL {target}: {e}")))?;

        let mut headers = options.header_map()?;
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let payload = serde_json::to_vec(&options.payload()?)
            .map_err(|e| Error::InvalidArgument(format!("Body is not serializable: {e}")))?;

        let mut req = Request::new(verb.as_method(), url);
        *req.headers_mut() = headers;
        *req.body_mut() = Some(Body::from(payload));

        debug!(verb = %verb, url = %req.url(), "Sending request");
        let response = self
            .http
            .execute(req)
            .map_err(|e| Error::Transport(format!("API call failed: {e}")))?;

        let normalized = NormalizedResponse::read(response)?;
        if normalized.is_success() {
            debug!(code = normalized.code, "Response received");
        } else {
            warn!(code = normalized.code, "API answered with an error status");
        }
        Ok(normalized)
    }

    /// Resolves `value` to an id in the reference-data listing `name`.
    ///
    /// `field` defaults to [`lookup::DEFAULT_FIELD`]. `Ok(None)` means no
    /// record matched; it is not an error.
    #[tracing::instrument(skip(self))]
    pub fn lookup_id_by_name(
        &self,
        value: &str,
        name: &str,
        field: Option<&str>,
        option: Option<&str>,
    ) -> Result<Option<LookupId>> {
        let category: Category = name.parse()?;
        let field = field.unwrap_or(lookup::DEFAULT_FIELD);

        let response = self.call("GET", category.endpoint(), &RequestOptions::default())?;
        let found = lookup::find_id(&response.body, value, field, option);

        debug!(
            category = %category,
            endpoint = category.endpoint(),
            code = response.code,
            found = found.is_some(),
            "Lookup finished"
        );
        Ok(found)
    }
}
