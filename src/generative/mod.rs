pub mod client;
pub mod fallbacks;
pub mod parse;
pub mod prompts;
pub mod types;

pub use client::{AnthropicClient, GenerativeError, TextGenerator};
pub use types::{BiasAssessment, BiasFlag, BiasSignal, BiasType, DifficultWord, WordCategory};

use std::sync::Arc;

use crate::generative::fallbacks::REFLECTION_QUESTION_COUNT;
use crate::generative::prompts::Prompt;

/// Runs the analysis operations against a text generator, degrading to
/// canned fallbacks whenever the model is unavailable or its output is
/// unusable. Every operation returns a usable value; none of them fail.
#[derive(Clone)]
pub struct GenerativeService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl GenerativeService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Whether a generator is wired in. Absent credentials leave the
    /// service running in fallback-only mode.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// 2-4 paragraph neutral summary, or `None` when one could not be
    /// generated.
    pub async fn summary(&self, article: &str) -> Option<String> {
        if article.trim().is_empty() {
            return None;
        }
        let raw = self.run(prompts::summary(article), "summary").await?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Bias score plus flagged phrases. Falls back to a neutral-leaning
    /// assessment with no flags.
    pub async fn bias(&self, article: &str) -> BiasAssessment {
        if article.trim().is_empty() {
            return BiasAssessment::fallback();
        }
        match self.run(prompts::bias(article), "bias").await {
            Some(raw) => accept("bias", parse::bias_assessment(&raw), BiasAssessment::fallback()),
            None => BiasAssessment::fallback(),
        }
    }

    /// 3-5 key factual claims. Empty when none could be extracted.
    pub async fn key_facts(&self, article: &str) -> Vec<String> {
        if article.trim().is_empty() {
            return Vec::new();
        }
        match self.run(prompts::key_facts(article), "key_facts").await {
            Some(raw) => accept("key_facts", parse::string_array(&raw), Vec::new()),
            None => Vec::new(),
        }
    }

    /// Exactly four article-specific reflection questions, or the generic
    /// set when the model returns anything but four.
    pub async fn reflection_questions(&self, article: &str) -> Vec<String> {
        if article.trim().is_empty() {
            return fallbacks::base_reflection_questions();
        }
        let raw = self
            .run(prompts::reflection_questions(article), "reflection_questions")
            .await;
        let Some(raw) = raw else {
            return fallbacks::base_reflection_questions();
        };
        match parse::string_array(&raw) {
            Ok(questions) if questions.len() == REFLECTION_QUESTION_COUNT => questions,
            Ok(questions) => {
                tracing::warn!(
                    op = "reflection_questions",
                    count = questions.len(),
                    "expected exactly four questions"
                );
                fallbacks::base_reflection_questions()
            }
            Err(error) => {
                tracing::warn!(op = "reflection_questions", %error, "model output rejected");
                fallbacks::base_reflection_questions()
            }
        }
    }

    /// Vocabulary entries for language learners. Any well-formed array is
    /// accepted as-is, including an empty one.
    pub async fn difficult_words(&self, article: &str) -> Vec<DifficultWord> {
        if article.trim().is_empty() {
            return fallbacks::base_difficult_words();
        }
        let raw = self
            .run(prompts::difficult_words(article), "difficult_words")
            .await;
        match raw {
            Some(raw) => accept(
                "difficult_words",
                parse::word_list(&raw),
                fallbacks::base_difficult_words(),
            ),
            None => fallbacks::base_difficult_words(),
        }
    }

    async fn run(&self, prompt: Prompt, op: &'static str) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match generator
            .generate(prompt.system, &prompt.user, prompt.max_tokens)
            .await
        {
            Ok(raw) => Some(raw),
            Err(error) => {
                tracing::warn!(op, %error, "generative call failed");
                None
            }
        }
    }
}

/// Keep a parsed value, or log why it was rejected and substitute the
/// fallback.
fn accept<T>(op: &'static str, parsed: Result<T, GenerativeError>, fallback: T) -> T {
    match parsed {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(op, %error, "model output rejected");
            fallback
        }
    }
}
