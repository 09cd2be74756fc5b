#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use reqwest::StatusCode;
use url::Url;

use newseries::extractor::extract;
use newseries::fetcher::{Charset, PageResponse};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data).to_string();

    let response = PageResponse {
        url_final: Url::parse("https://example.com").unwrap(),
        status: StatusCode::OK,
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    };

    // The extractor should never panic regardless of input
    let _ = extract(&response);
});
