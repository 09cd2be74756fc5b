use chrono::Utc;
use reqwest::StatusCode;
use scraper::Html;
use url::Url;

use crate::extractor::model::MAX_TEXT_CHARS;
use crate::extractor::{extract, reader};
use crate::fetcher::{Charset, PageResponse};

#[test]
fn extracts_article_text_and_title() {
    let body = "This article explains how city councils set annual budgets and why public comment periods matter to residents. ".repeat(20);
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Sample Article - News Site</title></head>
        <body>
        <nav><a href="/">Home</a><a href="/sports">Sports</a></nav>
        <article><h1>Sample Article</h1><p>{body}</p><p>The second paragraph adds more detail about the vote.</p></article>
        <footer>Copyright News Site</footer>
        </body></html>"#
    );

    let resp = test_response(html, "https://example.com/article");
    let content = extract(&resp);

    assert!(content.text.contains("city councils set annual budgets"));
    assert!(content.text.contains("second paragraph"));
    let title = content.title.expect("title should be detected");
    assert!(title.contains("Sample Article"));
}

#[test]
fn readable_pages_carry_their_title_in_the_text() {
    let body = "Researchers tracked rainfall across four decades of storm records to measure the shift. ".repeat(25);
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Rainfall Patterns Shift</title></head>
        <body><article><p>{body}</p></article></body></html>"#
    );

    let resp = test_response(html, "https://example.com/rain");
    let content = extract(&resp);

    assert!(content.text.starts_with("Rainfall Patterns Shift"));
}

#[test]
fn output_is_single_line_with_collapsed_whitespace() {
    let body = "A sentence\nbroken   across\t\tlines and    runs of spaces. ".repeat(20);
    let html = format!(
        r#"<html><head><title>Spacing</title></head><body><article><p>{body}</p></article></body></html>"#
    );

    let resp = test_response(html, "https://example.com/spacing");
    let content = extract(&resp);

    assert!(!content.text.contains('\n'));
    assert!(!content.text.contains("  "));
    assert!(content.text.contains("A sentence broken across lines"));
}

#[test]
fn text_is_capped_at_the_character_limit() {
    let body = "word ".repeat(40_000);
    let html =
        format!(r#"<html><head><title>Long</title></head><body><article><p>{body}</p></article></body></html>"#);

    let resp = test_response(html, "https://example.com/long");
    let content = extract(&resp);

    assert!(content.text.chars().count() <= MAX_TEXT_CHARS);
    assert!(content.text.chars().count() > MAX_TEXT_CHARS / 2);
}

#[test]
fn empty_page_extracts_to_empty_text() {
    let html = "<!DOCTYPE html><html><head></head><body></body></html>".to_string();

    let resp = test_response(html, "https://example.com/empty");
    let content = extract(&resp);

    assert_eq!(content.text, "");
    assert_eq!(content.title, None);
}

#[test]
fn malformed_html_is_handled_gracefully() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content".to_string();

    let resp = test_response(html, "https://example.com/broken");
    let content = extract(&resp);

    assert_eq!(content.title, Some("Broken".to_string()));
}

#[test]
fn fallback_prefers_earlier_containers() {
    let document = Html::parse_document(
        r#"<html><body>
        <div id="content">Generic page region text.</div>
        <div class="article-body">The real story text lives here.</div>
        </body></html>"#,
    );

    let text = reader::container_text(&document);

    assert!(text.contains("real story text"));
    assert!(!text.contains("Generic page region"));
}

#[test]
fn fallback_strips_boilerplate_from_body() {
    let document = Html::parse_document(
        r#"<html><body>
        <nav>Site menu links</nav>
        <script>var tracking = true;</script>
        <p>Actual paragraph content.</p>
        <footer>Legal footer text</footer>
        </body></html>"#,
    );

    let text = reader::container_text(&document);

    assert!(text.contains("Actual paragraph content."));
    assert!(!text.contains("Site menu"));
    assert!(!text.contains("tracking"));
    assert!(!text.contains("Legal footer"));
}

#[test]
fn first_present_container_wins_even_when_empty() {
    let document = Html::parse_document(
        r#"<html><body>
        <article></article>
        <div id="content">Text that should not be picked up.</div>
        </body></html>"#,
    );

    let text = reader::container_text(&document);

    assert!(text.trim().is_empty());
}

fn test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(html in ".*") {
            let resp = test_response(html, "https://example.com/fuzz");
            let _ = extract(&resp);
        }

        #[test]
        fn extract_respects_the_cap(html in ".*") {
            let resp = test_response(html, "https://example.com/fuzz");
            let content = extract(&resp);
            prop_assert!(content.text.chars().count() <= MAX_TEXT_CHARS);
        }
    }
}
