//! Transport layer: the [`HttpClient`] seam, the default [`BasicClient`] and
//! the [`auth::Bearer`] wrapper that authenticates requests.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn execute(
        &self,
        req: reqwest::blocking::Request,
    ) -> reqwest::Result<reqwest::blocking::Response> {
        (**self).execute(req)
    }
}
