use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::generative::types::{BiasFlag, BiasSignal, DifficultWord};

static URL_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://\S+$").expect("Failed to compile url regex")
});

/// Whether a string is a bare `http(s)://` URL with no embedded
/// whitespace. Used to reinterpret pasted "text" that is really a link.
pub fn looks_like_url(candidate: &str) -> bool {
    URL_SHAPE_REGEX.is_match(candidate.trim())
}

/// Body of `POST /api/analyze`. `articleText` and `text` are synonyms
/// kept for older clients; `articleText` wins when both are present.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub article_text: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
}

impl AnalyzeRequest {
    /// The pasted body text, preferring `articleText` over `text`.
    pub fn body_text(&self) -> &str {
        match self.article_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => self.text.as_deref().unwrap_or(""),
        }
    }
}

/// Full analysis payload. Exactly one of `bias_signals` and
/// `bias_flagged` is populated, depending on the configured bias mode;
/// the other is always present and empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub summary: String,
    pub bias_score: u8,
    pub bias_signals: Vec<BiasSignal>,
    pub bias_flagged: Vec<BiasFlag>,
    pub key_facts: Vec<String>,
    pub reflection_questions: Vec<String>,
    pub difficult_words: Vec<DifficultWord>,
    pub article_title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
