pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::ExtractedArticle;

use crate::fetcher::PageResponse;

/// Pull readable article text out of a fetched page.
///
/// Never fails: pages without recognizable content produce an empty
/// `text`, and callers decide how to degrade.
pub fn extract(resp: &PageResponse) -> ExtractedArticle {
    // 1. Read the main content, readability first with a scraping fallback
    let outcome = reader::read(&resp.body_utf8, &resp.url_final);

    // 2. Normalize whitespace and cap the length
    let text = model::collapse_whitespace(&outcome.text);
    let text = model::truncate_chars(&text, model::MAX_TEXT_CHARS).to_string();

    tracing::debug!(
        url = %resp.url_final,
        chars = text.chars().count(),
        has_title = outcome.title.is_some(),
        "extracted article text"
    );

    ExtractedArticle {
        text,
        title: outcome.title,
    }
}
