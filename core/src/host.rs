//! The host request primitive the shim drives.
//!
//! # Design
//! The browser owns the network. These traits describe the slice of its
//! request object the shim needs: open a handle for a method and URL, ask for
//! a binary response, set a timeout, add headers, send. Keeping the surface
//! this narrow lets the core run against an in-memory host in tests and
//! against `XMLHttpRequest` in the browser without any other change.
//!
//! Browser objects are single-threaded, so the futures here are not `Send`.

use async_trait::async_trait;
use http::Method;
use url::Url;

use crate::error::HostError;

/// Factory for per-call request handles.
pub trait Host {
    type Handle: HostHandle;

    /// Create a fresh handle bound to `method` and `url`. Handles are never
    /// reused.
    fn open(&self, method: &Method, url: &Url) -> Result<Self::Handle, HostError>;
}

/// One in-flight exchange, configured and then sent exactly once.
#[async_trait(?Send)]
pub trait HostHandle {
    /// Deliver the response payload as raw bytes rather than decoded text.
    fn request_binary_response(&mut self);

    /// Abort the exchange after `millis` milliseconds. Never called with 0.
    fn set_timeout_ms(&mut self, millis: u32);

    /// Register one header value. Repeated calls for the same name add
    /// values; they never replace earlier ones.
    fn add_header(&mut self, name: &str, value: &str) -> Result<(), HostError>;

    /// Send the request with an optional payload and wait for the outcome.
    async fn send(&mut self, body: Option<Vec<u8>>) -> Result<Completion, HostError>;
}

/// What the host reports for a finished exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    pub status: u16,
    pub status_text: String,
    /// Header block as returned by the host: `Name: value` lines separated
    /// by CRLF, one character per byte.
    pub raw_headers: String,
    pub payload: Vec<u8>,
}
