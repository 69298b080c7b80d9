//! The standard request/response model the shim translates to and from.
//!
//! # Design
//! Method, header multimap and status code come from the `http` crate so
//! callers keep using the types they already know. The URL is a `url::Url`
//! because the host primitive takes an absolute URL string, not a request
//! target. Request bodies are owned readers; response bodies are fully
//! materialized bytes, so there is no connection behind a `Response` to
//! release.

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::error::Error;

/// An outgoing request.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Body>,

    /// Authority override requested by the caller.
    ///
    /// Not applied: the effective host is whatever the URL and the
    /// browser's navigation context imply.
    pub host: Option<String>,
}

impl Request {
    /// Build a request for `method` and an absolute `url`.
    ///
    /// An empty method means `GET`.
    pub fn new(method: &str, url: &str) -> Result<Self, Error> {
        let method = if method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(method.as_bytes())
                .map_err(|_| Error::InvalidMethod(method.to_string()))?
        };
        let url = Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            host: None,
        })
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A request body stream.
///
/// The stream is read to completion before the request is sent and is
/// dropped as soon as it has been drained, whether or not the read
/// succeeded.
pub struct Body {
    reader: Box<dyn Read + Send>,
}

impl Body {
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Read the whole stream into memory, consuming (and closing) it.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from_reader(text.as_bytes())
    }
}

/// A completed response.
///
/// Either every field is populated or no `Response` exists at all.
#[derive(Debug)]
pub struct Response {
    /// Status line, e.g. `"200 OK"`.
    pub status: String,
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
    /// Size of the received payload. Never taken from a declared
    /// `Content-Length`.
    pub content_length: u64,
}

impl Response {
    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.body.as_bytes()).into_owned()
    }
}

/// An in-memory response body.
#[derive(Debug, Clone, Default)]
pub struct ResponseBody {
    inner: Cursor<Bytes>,
}

impl ResponseBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Cursor::new(bytes.into()),
        }
    }

    /// All payload bytes, regardless of how much has been read.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.inner.into_inner()
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_parses_method_and_url() {
        let req = Request::new("PUT", "http://example.test/a?b=c").unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.url.as_str(), "http://example.test/a?b=c");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert!(req.host.is_none());
    }

    #[test]
    fn empty_method_defaults_to_get() {
        let req = Request::new("", "http://example.test/").unwrap();
        assert_eq!(req.method, Method::GET);
    }

    #[test]
    fn extension_methods_are_accepted() {
        let req = Request::new("PROPFIND", "http://example.test/").unwrap();
        assert_eq!(req.method.as_str(), "PROPFIND");
    }

    #[test]
    fn invalid_method_is_rejected() {
        let err = Request::new("GE T", "http://example.test/").unwrap_err();
        assert!(matches!(err, Error::InvalidMethod(m) if m == "GE T"));
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = Request::new("GET", "/relative/path").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn body_drains_reader() {
        let body = Body::from("hello");
        assert_eq!(body.into_bytes().unwrap(), b"hello");
    }

    #[test]
    fn response_body_reads_and_keeps_bytes() {
        let mut body = ResponseBody::new(vec![1u8, 2, 3]);
        let mut first = [0u8; 2];
        body.read_exact(&mut first).unwrap();
        assert_eq!(first, [1, 2]);
        assert_eq!(body.as_bytes(), &[1, 2, 3]);
        assert_eq!(body.len(), 3);

        let mut rest = Vec::new();
        body.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![3]);
    }

    #[test]
    fn empty_response_body() {
        let body = ResponseBody::default();
        assert!(body.is_empty());
        assert_eq!(body.into_bytes(), Bytes::new());
    }
}
