//! Blocking client for the Extrabat CRM REST API.
//!
//! [`Extrabat`] authenticates with the OAuth2 client-credentials grant, then
//! sends requests with the bearer token and returns every answer as a
//! [`NormalizedResponse`].

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod request;
pub mod response;
pub mod token;
pub mod verb;

pub use client::Extrabat;
pub use config::ExtrabatConfig;
pub use error::{Error, Result};
pub use lookup::{Category, LookupId};
pub use request::RequestOptions;
pub use response::{NormalizedResponse, ResponseBody};
pub use token::Credentials;
