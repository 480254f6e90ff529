//! Character decoding for browser channel payloads.
//!
//! The browser channel serializes documents as raw bytes. Before parsing we
//! sniff the charset declaration from the document head and transcode to
//! UTF-8, replacing invalid sequences rather than failing.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Matches a `charset=...` declaration in either meta-tag form.
static CHARSET_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([a-zA-Z0-9_.:\-]+)"#).expect("CHARSET_DECL regex")
});

/// Number of leading bytes inspected for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// Detect the character encoding declared by a serialized document.
///
/// Falls back to UTF-8 when no declaration is found or the label is unknown.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let head = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    let head_str = String::from_utf8_lossy(head);

    CHARSET_DECL
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode serialized document bytes into a UTF-8 string.
///
/// Invalid characters are replaced with the Unicode replacement character
/// rather than causing an error.
#[must_use]
pub fn decode_document(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
