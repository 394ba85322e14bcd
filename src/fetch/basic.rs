use super::client::HttpClient;

/// [`HttpClient`] backed by a plain `reqwest` blocking client.
pub struct BasicClient(reqwest::blocking::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::blocking::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl From<reqwest::blocking::Client> for BasicClient {
    fn from(client: reqwest::blocking::Client) -> Self {
        Self(client)
    }
}

impl HttpClient for BasicClient {
    fn execute(
        &self,
        req: reqwest::blocking::Request,
    ) -> reqwest::Result<reqwest::blocking::Response> {
        self.0.execute(req)
    }
}
