//! Charset sniffing and decoding for fetched pages. News sites still serve a
//! surprising spread of legacy encodings, so the body is decoded before the
//! extractor ever sees it.

use std::sync::LazyLock;

use regex::Regex;

use crate::fetcher::{errors::FetchError, types::Charset};

/// Only the head of the document is scanned for `<meta>` charset hints.
const META_SCAN_BYTES: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a fetched body to UTF-8, detecting the charset from the
/// Content-Type header, then `<meta>` tags, then byte-level heuristics.
pub fn decode_body(body: &[u8], content_type: &str) -> Result<(String, Charset), FetchError> {
    let charset = detect_charset(content_type, body);
    let (decoded, _actual, had_errors) = charset.encoding().decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode body as {}",
            charset.encoding().name()
        )));
    }
    Ok((decoded.into_owned(), charset))
}

fn detect_charset(content_type: &str, body: &[u8]) -> Charset {
    if let Some(charset) = charset_from_label(content_type, &HEADER_CHARSET_REGEX) {
        return charset;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(META_SCAN_BYTES)]);
    for regex in [&META_CHARSET_REGEX, &META_HTTP_EQUIV_REGEX] {
        if let Some(charset) = charset_from_label(&head, regex) {
            return charset;
        }
    }

    // Fall back to byte-frequency heuristics over the document head.
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(&body[..body.len().min(META_SCAN_BYTES)], false);
    Charset::from_encoding(detector.guess(None, true))
}

fn charset_from_label(haystack: &str, regex: &Regex) -> Option<Charset> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    encoding_rs::Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}
