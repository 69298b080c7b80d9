//! MIME header block parsing and the ByteString mapping used at the host
//! boundary.
//!
//! The host hands back response headers as one block of `Name: value` lines
//! and takes request headers as strings whose characters are bytes
//! (`U+0000..=U+00FF`). `parse_header_block` follows the MIME header grammar:
//! folded continuation lines, a blank line ends the block, and running out of
//! input also ends it without losing what was read.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// Parse a raw header block into a multimap, keeping value order per name.
pub fn parse_header_block(raw: &str) -> Result<HeaderMap, Error> {
    let bytes = from_byte_string(raw);
    let mut lines = bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .peekable();

    if let Some(first) = lines.peek() {
        if is_continuation(first) {
            return Err(malformed(first));
        }
    }

    let mut headers = HeaderMap::new();
    while let Some(line) = lines.next() {
        if line.is_empty() {
            break;
        }

        let mut line = trim_end(line).to_vec();
        while let Some(next) = lines.next_if(|next| is_continuation(next)) {
            let folded = trim_start(trim_end(next));
            if !folded.is_empty() {
                line.push(b' ');
                line.extend_from_slice(folded);
            }
        }

        let Some(colon) = line.iter().position(|&b| b == b':') else {
            return Err(malformed(&line));
        };
        let key = &line[..colon];
        if key.is_empty() {
            continue;
        }
        let name = HeaderName::from_bytes(key).map_err(|_| malformed(&line))?;
        let value = HeaderValue::from_bytes(trim_start(&line[colon + 1..]))
            .map_err(|_| malformed(&line))?;
        headers.append(name, value);
    }

    Ok(headers)
}

/// Map bytes to a string with one character per byte.
pub fn to_byte_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`to_byte_string`]. Characters above `U+00FF`, which a
/// conforming host never produces, are kept as their UTF-8 encoding.
pub fn from_byte_string(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(b) => bytes.push(b),
            Err(_) => bytes.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }
    bytes
}

fn is_continuation(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ' | b'\t'))
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t'))
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

fn malformed(line: &[u8]) -> Error {
    Error::MalformedHeader(String::from_utf8_lossy(line).into_owned())
}
