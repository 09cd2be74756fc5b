use crate::generative::types::{DifficultWord, WordCategory};

/// Score reported when bias analysis is unavailable or unusable.
pub const FALLBACK_BIAS_SCORE: u8 = 75;

/// How many reflection questions an analysis must carry.
pub const REFLECTION_QUESTION_COUNT: usize = 4;

/// Placeholder shown when no key facts could be pulled from the article.
pub const KEY_FACTS_PLACEHOLDER: &str = "Could not extract key facts.";

/// Summary used when the request resolved to no article text at all.
pub const NO_TEXT_SUMMARY: &str = "We could not detect much article text to analyze. Try pasting more of the story, or submit a valid article URL.";

/// Summary used when there was text but no summary could be generated.
pub const NO_SUMMARY_NOTICE: &str = "We couldn't generate a short summary for this article. The bias analysis and other sections below are still based on the text.";

const BASE_REFLECTION_QUESTIONS: [&str; REFLECTION_QUESTION_COUNT] = [
    "Who benefits from this framing, and who might be left out?",
    "What would a headline from the 'other side' look like?",
    "Which claims are verified with evidence vs. asserted?",
    "What would you need to read next to form a more complete view?",
];

/// Generic reflection questions that work for any article.
pub fn base_reflection_questions() -> Vec<String> {
    BASE_REFLECTION_QUESTIONS
        .iter()
        .map(|q| q.to_string())
        .collect()
}

/// Single-entry vocabulary list used when word extraction is unavailable.
pub fn base_difficult_words() -> Vec<DifficultWord> {
    vec![DifficultWord {
        word: "bias".to_string(),
        pronunciation: "BY-uss".to_string(),
        definition: "A feeling or opinion that makes you support one side more than another, even when you should be fair.".to_string(),
        example: "The article shows bias because it mostly supports one point of view.".to_string(),
        category: WordCategory::CommonlyConfused,
    }]
}
