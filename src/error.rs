//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Everything that can go wrong talking to Extrabat.
///
/// HTTP error statuses are not represented here: a 4xx/5xx answer is a
/// normal [`NormalizedResponse`](crate::response::NormalizedResponse).
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input detected before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The token request failed or its response carried no token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Connection error or unreadable response during a call.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
