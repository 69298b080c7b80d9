//! Standard HTTP client API for code running in a browser.
//!
//! # Overview
//! Binds `browser-http-core` to the browser's `XMLHttpRequest`, so code
//! written against `Client::execute` / `get` / `head` / `post` / `post_form`
//! runs unmodified in a `wasm32` page or worker.
//!
//! # Design
//! - `XhrHost` opens one `XMLHttpRequest` per call; nothing is pooled.
//! - `DEFAULT_CLIENT` is an immutable process-wide client with no timeout.
//!   The free functions delegate to it.
//! - Calls suspend the awaiting task until the browser reports the outcome;
//!   the only way to cut a call short is the client's timeout.
//! - `Request::host` is not applied; the browser derives the host from the
//!   URL and the page's context.

mod xhr;

pub use browser_http_core::{
    encode_form, header, Body, Completion, Error, HeaderMap, HeaderValue, Host, HostError,
    HostHandle, Method, Request, Response, ResponseBody, StatusCode, Url, Values,
};
pub use xhr::{XhrHandle, XhrHost};

/// A client that sends requests through `XMLHttpRequest`.
pub type Client = browser_http_core::Client<XhrHost>;

/// Shared client behind the free functions.
pub static DEFAULT_CLIENT: Client = Client::with_host(XhrHost);

/// `GET url` with the default client.
pub async fn get(url: &str) -> Result<Response, Error> {
    DEFAULT_CLIENT.get(url).await
}

/// `HEAD url` with the default client.
pub async fn head(url: &str) -> Result<Response, Error> {
    DEFAULT_CLIENT.head(url).await
}

/// `POST body` with the given `Content-Type`, using the default client.
pub async fn post(url: &str, content_type: &str, body: impl Into<Body>) -> Result<Response, Error> {
    DEFAULT_CLIENT.post(url, content_type, body).await
}

/// POST URL-encoded `values` with the default client.
pub async fn post_form(url: &str, values: &Values) -> Result<Response, Error> {
    DEFAULT_CLIENT.post_form(url, values).await
}
