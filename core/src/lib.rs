//! Standard HTTP client API running on a host's request primitive.
//!
//! # Overview
//! Code written against `Client::execute` and its `get` / `head` / `post` /
//! `post_form` helpers runs unchanged wherever a `Host` is available. In the
//! browser that host is `XMLHttpRequest` (see the `browser-http` crate); in
//! tests it is an in-memory recorder or a native HTTP agent.
//!
//! # Design
//! - The crate is pure translation: request in, one host exchange, response
//!   out. No pooling, retries, redirects, cookies or decompression happen
//!   here; whatever the host does is inherited.
//! - `Client` holds a timeout and a host, nothing else.
//! - Each `execute` opens exactly one host handle and drops it afterwards.
//! - Responses are complete or absent; there is no partial response.

pub mod client;
pub mod error;
pub mod header;
pub mod host;
pub mod http;

pub use client::{encode_form, Client, Values};
pub use error::{Error, HostError};
pub use host::{Completion, Host, HostHandle};
pub use self::http::{Body, Request, Response, ResponseBody};

pub use ::http::{HeaderMap, HeaderValue, Method, StatusCode};
pub use url::Url;
