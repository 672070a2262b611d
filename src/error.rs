//! Error types for the SDK.
//!
//! A single top-level [`Error`] plus the [`Result`] alias. Token problems and
//! non-2xx broadcast responses get their own types so callers can match on
//! them; every other transport failure is folded into [`Error::Client`].

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::http::response::HttpResponse;

/// Errors produced while building, parsing or exchanging access tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token JSON could not be decoded, or decoded to nothing.
    #[error("token data could not be parsed")]
    Unparsable,

    /// The token data decoded but does not describe a usable token.
    #[error("invalid token data: {0}")]
    Invalid(String),

    /// Trading an authorization code for a token failed.
    #[error("authorization code exchange failed: {0}")]
    Exchange(String),

    /// A call needing authentication was made without a token.
    #[error("no access token available")]
    Missing,
}

/// A broadcast answered with a non-2xx status.
#[derive(Debug, Error)]
#[error("broadcast failed with status {status}: {message}")]
pub struct ResponseError {
    pub status: u16,
    pub message: String,
    pub response: HttpResponse,
}

impl ResponseError {
    /// Classify an error response, deriving the message from its body.
    pub fn new(response: HttpResponse) -> Self {
        Self {
            status: response.status_code(),
            message: response.error_message(),
            response,
        }
    }
}

/// The crate's top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Transport-level failure; the underlying cause is kept as the source.
    #[error("client error: {message}")]
    Client {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A transaction body had fields of the wrong shape.
    #[error("failed to decode transaction: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn client(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Client {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
