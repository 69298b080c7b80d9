//! Client that runs standard requests through a host request primitive.
//!
//! # Design
//! `Client` holds only a timeout and the host it opens handles on; it carries
//! no mutable state between calls, so one value can serve any number of
//! calls, concurrently or not. `execute` translates a `Request` into calls on
//! a fresh host handle, waits for the single outcome, and translates the
//! host's reply back into a `Response`. The convenience methods only build a
//! `Request` and delegate.

use std::collections::BTreeMap;
use std::time::Duration;

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use tracing::{debug, warn};

use crate::error::Error;
use crate::header::{parse_header_block, to_byte_string};
use crate::host::{Completion, Host, HostHandle};
use crate::http::{Body, Request, Response, ResponseBody};

/// Form fields for `post_form`, one or more values per key.
pub type Values = BTreeMap<String, Vec<String>>;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client backed by a host request primitive.
#[derive(Debug, Clone, Default)]
pub struct Client<H> {
    /// How long a request may take before the host terminates it.
    /// `Duration::ZERO` leaves the host's own default in place.
    pub timeout: Duration,
    host: H,
}

impl<H> Client<H> {
    /// A client without a timeout.
    pub const fn with_host(host: H) -> Self {
        Self {
            timeout: Duration::ZERO,
            host,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: Host> Client<H> {
    /// Send `request` and wait for the complete response.
    ///
    /// The request body, if any, is drained into memory and closed before
    /// anything is sent. `request.host` is ignored.
    pub async fn execute(&self, mut request: Request) -> Result<Response, Error> {
        let mut handle = self.host.open(&request.method, &request.url)?;
        handle.request_binary_response();
        if let Some(millis) = timeout_millis(self.timeout) {
            handle.set_timeout_ms(millis);
        }
        for (name, value) in &request.headers {
            handle.add_header(name.as_str(), &to_byte_string(value.as_bytes()))?;
        }

        let payload = match request.body.take() {
            Some(body) => Some(body.into_bytes().map_err(Error::Body)?),
            None => None,
        };

        if let Some(host) = &request.host {
            debug!(%host, url = %request.url, "host override is not applied");
        }

        debug!(method = %request.method, url = %request.url, "sending request");
        let completion = handle.send(payload).await.map_err(|err| {
            warn!(method = %request.method, url = %request.url, error = %err, "request failed");
            err
        })?;
        debug!(
            url = %request.url,
            status = completion.status,
            bytes = completion.payload.len(),
            "request completed"
        );

        build_response(completion)
    }

    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.execute(Request::new("GET", url)?).await
    }

    pub async fn head(&self, url: &str) -> Result<Response, Error> {
        self.execute(Request::new("HEAD", url)?).await
    }

    /// POST `body` with the given `Content-Type`.
    pub async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: impl Into<Body>,
    ) -> Result<Response, Error> {
        let mut request = Request::new("POST", url)?.with_body(body);
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        self.execute(request).await
    }

    /// POST `values` URL-encoded, as an HTML form would.
    pub async fn post_form(&self, url: &str, values: &Values) -> Result<Response, Error> {
        self.post(url, FORM_CONTENT_TYPE, encode_form(values)).await
    }
}

/// Encode `values` as `application/x-www-form-urlencoded`, sorted by key.
pub fn encode_form(values: &Values) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, vals) in values {
        for value in vals {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// Whole milliseconds for the host, or `None` when no timeout is set.
fn timeout_millis(timeout: Duration) -> Option<u32> {
    if timeout.is_zero() {
        return None;
    }
    let millis = timeout.as_millis().max(1);
    Some(u32::try_from(millis).unwrap_or(u32::MAX))
}

fn build_response(completion: Completion) -> Result<Response, Error> {
    let headers = parse_header_block(&completion.raw_headers)?;
    let status_code =
        StatusCode::from_u16(completion.status).map_err(|_| Error::InvalidStatus(completion.status))?;
    let body = ResponseBody::new(completion.payload);
    Ok(Response {
        status: format!("{} {}", completion.status, completion.status_text),
        status_code,
        headers,
        content_length: body.len() as u64,
        body,
    })
}
