//! `XMLHttpRequest` as the host request primitive.
//!
//! # Design
//! One `XMLHttpRequest` per call, opened asynchronously so the page never
//! blocks. Completion is bridged into Rust by wrapping the request's events
//! in a `Promise`: `load` resolves it, `error`, `timeout` and `abort` reject
//! it with the event, whose type picks the `HostError`. Redirects, cookies,
//! decompression and forbidden-header filtering are the browser's business.

use async_trait::async_trait;
use browser_http_core::{Completion, Host, HostError, HostHandle, Method, Url};
use js_sys::{Promise, Uint8Array};
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, XmlHttpRequest, XmlHttpRequestResponseType};

/// Opens a fresh `XMLHttpRequest` for every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct XhrHost;

/// A single opened `XMLHttpRequest`.
pub struct XhrHandle {
    xhr: XmlHttpRequest,
}

impl Host for XhrHost {
    type Handle = XhrHandle;

    fn open(&self, method: &Method, url: &Url) -> Result<XhrHandle, HostError> {
        let xhr = XmlHttpRequest::new().map_err(js_failure)?;
        xhr.open_with_async(method.as_str(), url.as_str(), true)
            .map_err(js_failure)?;
        trace!(%method, %url, "opened XMLHttpRequest");
        Ok(XhrHandle { xhr })
    }
}

#[async_trait(?Send)]
impl HostHandle for XhrHandle {
    fn request_binary_response(&mut self) {
        self.xhr
            .set_response_type(XmlHttpRequestResponseType::Arraybuffer);
    }

    fn set_timeout_ms(&mut self, millis: u32) {
        self.xhr.set_timeout(millis);
    }

    fn add_header(&mut self, name: &str, value: &str) -> Result<(), HostError> {
        // setRequestHeader combines repeated names; it never replaces.
        self.xhr
            .set_request_header(name, value)
            .map_err(js_failure)
    }

    async fn send(&mut self, body: Option<Vec<u8>>) -> Result<Completion, HostError> {
        let xhr = &self.xhr;
        let settled = Promise::new(&mut |resolve, reject| {
            xhr.set_onload(Some(&resolve));
            xhr.set_onerror(Some(&reject));
            xhr.set_ontimeout(Some(&reject));
            xhr.set_onabort(Some(&reject));
        });

        let sent = match body {
            Some(bytes) => {
                let array = Uint8Array::from(bytes.as_slice());
                xhr.send_with_opt_buffer_source(Some(&*array))
            }
            None => xhr.send(),
        };
        sent.map_err(js_failure)?;

        let outcome = JsFuture::from(settled).await;
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_ontimeout(None);
        xhr.set_onabort(None);
        if let Err(event) = outcome {
            let kind = event.dyn_ref::<Event>().map(Event::type_).unwrap_or_default();
            trace!(%kind, "XMLHttpRequest failed");
            return Err(failure_for(&kind));
        }

        let status = xhr.status().map_err(js_failure)?;
        let status_text = xhr.status_text().map_err(js_failure)?;
        let raw_headers = xhr.get_all_response_headers().map_err(js_failure)?;
        let response = xhr.response().map_err(js_failure)?;
        let payload = if response.is_null() || response.is_undefined() {
            Vec::new()
        } else {
            Uint8Array::new(&response).to_vec()
        };

        Ok(Completion {
            status,
            status_text,
            raw_headers,
            payload,
        })
    }
}

/// Map the type of the event that rejected a request to a host error.
fn failure_for(kind: &str) -> HostError {
    match kind {
        "timeout" => HostError::Timeout,
        "abort" => HostError::Aborted,
        // The browser hides the cause of network errors from scripts.
        _ => HostError::Network(format!("XMLHttpRequest failed ({kind} event)")),
    }
}

fn js_failure(value: JsValue) -> HostError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    HostError::Network(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_event_is_timeout() {
        assert_eq!(failure_for("timeout"), HostError::Timeout);
    }

    #[test]
    fn abort_event_is_aborted() {
        assert_eq!(failure_for("abort"), HostError::Aborted);
    }

    #[test]
    fn error_event_is_network_failure() {
        assert!(matches!(failure_for("error"), HostError::Network(msg) if msg.contains("error event")));
    }
}
