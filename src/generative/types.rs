use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::generative::fallbacks::FALLBACK_BIAS_SCORE;

/// Categories of biased phrasing the analyst model is asked to flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BiasType {
    LoadedLanguage,
    OpinionAsFact,
    UnverifiedClaim,
    FramingBias,
}

/// A word or phrase from the article flagged as biased, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BiasFlag {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: BiasType,
    pub explanation: String,
}

/// A named bias indicator produced by the lexical heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BiasSignal {
    pub title: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WordCategory {
    #[serde(rename = "Commonly Confused")]
    CommonlyConfused,
    #[serde(rename = "Irregular Verbs")]
    IrregularVerbs,
    #[serde(rename = "Phrasal Verbs")]
    PhrasalVerbs,
    #[serde(rename = "Idioms")]
    Idioms,
}

/// A vocabulary entry for language learners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DifficultWord {
    pub word: String,
    pub pronunciation: String,
    pub definition: String,
    pub example: String,
    pub category: WordCategory,
}

/// Outcome of the bias analysis. `score` runs 0-100 where 100 is fully
/// neutral and 0 is highly biased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasAssessment {
    pub score: u8,
    pub flagged: Vec<BiasFlag>,
}

impl BiasAssessment {
    /// Neutral-leaning assessment used whenever the analysis cannot run.
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_BIAS_SCORE,
            flagged: Vec::new(),
        }
    }
}
