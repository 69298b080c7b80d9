//! Error types for the browser HTTP shim.
//!
//! # Design
//! Every failure reaches the immediate caller; nothing is retried or
//! recovered locally. The variants follow the order in which a call can
//! fail: building the request, draining its body, the host exchange, and
//! finally turning the host's reply into a `Response`. Host failures keep
//! their own small enum so bindings can report them without knowing about
//! the rest of the taxonomy.

use thiserror::Error;

/// Failure reported by the host request primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The exchange failed below the HTTP level (DNS, refused connection,
    /// CORS rejection, or a host API that threw).
    #[error("network error: {0}")]
    Network(String),

    /// The configured timeout expired before the host reported completion.
    #[error("request timed out")]
    Timeout,

    /// The host aborted the exchange.
    #[error("request aborted")]
    Aborted,
}

/// Errors returned by `Client` and the request builders.
#[derive(Debug, Error)]
pub enum Error {
    /// The method is not a valid HTTP token.
    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    /// The URL is malformed or not absolute.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header value supplied by the caller is not a legal field value.
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Draining the request body failed. Nothing was sent.
    #[error("reading request body: {0}")]
    Body(#[source] std::io::Error),

    /// The host primitive reported a failure. No response was produced.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The raw response header block is not valid MIME header syntax.
    #[error("malformed MIME header line: {0:?}")]
    MalformedHeader(String),

    /// The host reported a status code outside `100..=999`.
    #[error("invalid status code {0}")]
    InvalidStatus(u16),
}
