use thiserror::Error;

use crate::analysis::dtos::{self, AnalysisResponse, AnalyzeRequest};
use crate::analysis::heuristic::HeuristicAssessment;
use crate::app_state::AppState;
use crate::config::BiasMode;
use crate::extractor::{self, ExtractedArticle};
use crate::fetcher::{self, FetchError};
use crate::generative::fallbacks::{
    KEY_FACTS_PLACEHOLDER, NO_SUMMARY_NOTICE, NO_TEXT_SUMMARY, base_reflection_questions,
};
use crate::generative::types::{BiasAssessment, BiasFlag, BiasSignal, DifficultWord};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Neither field resolved to article text and nothing was fetched.
    #[error("no article text or url was provided")]
    EmptyInput,

    /// The URL fetch failed; nothing was analyzed.
    #[error("could not fetch the article: {0}")]
    Extraction(#[from] FetchError),
}

/// Score plus whichever signal list the active bias mode produces. The
/// inactive list stays empty in the response.
pub(crate) struct BiasOutcome {
    pub score: u8,
    pub flagged: Vec<BiasFlag>,
    pub signals: Vec<BiasSignal>,
}

impl BiasOutcome {
    fn generative(assessment: BiasAssessment) -> Self {
        Self {
            score: assessment.score,
            flagged: assessment.flagged,
            signals: Vec::new(),
        }
    }

    fn heuristic(assessment: HeuristicAssessment) -> Self {
        Self {
            score: assessment.score,
            flagged: Vec::new(),
            signals: assessment.signals,
        }
    }
}

/// Everything the concurrent operations produced for one request.
pub(crate) struct OperationOutputs {
    pub summary: Option<String>,
    pub difficult_words: Vec<DifficultWord>,
    pub bias: BiasOutcome,
    pub key_facts: Vec<String>,
    pub reflection_questions: Vec<String>,
}

/// Resolve the input to article text (fetching and extracting when given
/// a URL), fan the analysis operations out, and compose the response.
#[tracing::instrument(skip_all)]
pub async fn analyze(
    state: &AppState,
    request: AnalyzeRequest,
) -> Result<AnalysisResponse, AnalyzeError> {
    let body_text = request.body_text().trim().to_string();
    let mut url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_string);
    let mut article_title = None;

    // Pasted text that is really a bare link gets fetched instead of
    // analyzed literally. An explicit url field is only used when no
    // text was pasted at all.
    let url_target = if !body_text.is_empty() && dtos::looks_like_url(&body_text) {
        Some(body_text.clone())
    } else if body_text.is_empty() {
        url.clone().filter(|candidate| dtos::looks_like_url(candidate))
    } else {
        None
    };

    let (resolved_text, fetched) = match &url_target {
        Some(target) => {
            let article = fetch_article(target).await?;
            if url.is_none() {
                url = Some(target.clone());
            }
            article_title = article.title;
            (article.text, true)
        }
        None => (body_text, false),
    };

    // An empty result after a successful fetch is a degraded analysis,
    // not an input error.
    if !fetched && resolved_text.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    tracing::debug!(
        chars = resolved_text.chars().count(),
        fetched,
        "input resolved"
    );

    let (summary, difficult_words, bias, key_facts, reflection_questions) = tokio::join!(
        state.analysis.summary(&resolved_text),
        state.analysis.difficult_words(&resolved_text),
        assess_bias(state, &resolved_text),
        state.analysis.key_facts(&resolved_text),
        state.analysis.reflection_questions(&resolved_text),
    );

    let outputs = OperationOutputs {
        summary,
        difficult_words,
        bias,
        key_facts,
        reflection_questions,
    };

    Ok(compose(&resolved_text, url, article_title, outputs))
}

async fn fetch_article(url: &str) -> Result<ExtractedArticle, FetchError> {
    let page = fetcher::fetch(url).await?;
    Ok(extractor::extract(&page))
}

async fn assess_bias(state: &AppState, text: &str) -> BiasOutcome {
    if text.trim().is_empty() {
        return BiasOutcome::generative(BiasAssessment::fallback());
    }
    match state.bias_mode {
        BiasMode::Generative => BiasOutcome::generative(state.analysis.bias(text).await),
        BiasMode::Heuristic => BiasOutcome::heuristic(state.heuristic.assess(text)),
    }
}

/// Merge operation outputs with their final fallbacks into the response.
pub(crate) fn compose(
    resolved_text: &str,
    url: Option<String>,
    article_title: Option<String>,
    outputs: OperationOutputs,
) -> AnalysisResponse {
    let summary = compose_summary(outputs.summary, resolved_text, url.as_deref());

    let key_facts = if outputs.key_facts.is_empty() {
        vec![KEY_FACTS_PLACEHOLDER.to_string()]
    } else {
        outputs.key_facts
    };

    let reflection_questions = if outputs.reflection_questions.is_empty() {
        base_reflection_questions()
    } else {
        outputs.reflection_questions
    };

    AnalysisResponse {
        summary,
        bias_score: outputs.bias.score,
        bias_signals: outputs.bias.signals,
        bias_flagged: outputs.bias.flagged,
        key_facts,
        reflection_questions,
        difficult_words: outputs.difficult_words,
        article_title,
        url,
    }
}

fn compose_summary(generated: Option<String>, resolved_text: &str, url: Option<&str>) -> String {
    if let Some(summary) = generated
        .as_deref()
        .map(str::trim)
        .filter(|summary| !summary.is_empty())
    {
        return match url {
            Some(url) => format!("{summary}\n\n(Source: {url})"),
            None => summary.to_string(),
        };
    }

    if resolved_text.trim().is_empty() {
        return NO_TEXT_SUMMARY.to_string();
    }

    match url {
        Some(url) => format!("{NO_SUMMARY_NOTICE} (Source: {url})"),
        None => NO_SUMMARY_NOTICE.to_string(),
    }
}
