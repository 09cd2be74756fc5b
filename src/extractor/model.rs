use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Upper bound on extracted article text, in characters. Anything past
/// this is dropped before analysis.
pub const MAX_TEXT_CHARS: usize = 100_000;

static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex must compile"));

/// Best-effort article content pulled out of a fetched page. `text` may be
/// empty when the page carries no readable content (script-rendered pages,
/// error pages); callers decide how to degrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub text: String,
    pub title: Option<String>,
}

/// Collapse every run of whitespace (newlines included) to a single space
/// and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_REGEX
        .replace_all(text.trim(), " ")
        .into_owned()
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
