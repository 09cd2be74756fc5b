use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::generative::client::GenerativeError;
use crate::generative::fallbacks::FALLBACK_BIAS_SCORE;
use crate::generative::types::{BiasAssessment, BiasFlag, DifficultWord};

static FENCE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^```(?:json)?\s*").expect("fence regex must compile"));
static FENCE_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*$").expect("fence regex must compile"));

/// Strip a surrounding markdown code fence, then parse the rest as JSON.
/// Models are told not to fence their output but do it anyway.
pub fn model_json(raw: &str) -> Result<Value, GenerativeError> {
    let cleaned = FENCE_OPEN_REGEX.replace(raw.trim(), "");
    let cleaned = FENCE_CLOSE_REGEX.replace(&cleaned, "");
    serde_json::from_str(cleaned.trim())
        .map_err(|error| GenerativeError::Unparseable(error.to_string()))
}

/// Parse a bias payload of the form `{"score": <number>, "flagged": [..]}`.
///
/// Lenient on purpose: a missing or non-numeric score settles at the
/// fallback while any well-formed flags are kept, and junk entries in the
/// flagged list are skipped rather than discarding the whole result.
/// Only a payload that is not JSON at all is an error.
pub fn bias_assessment(raw: &str) -> Result<BiasAssessment, GenerativeError> {
    let value = model_json(raw)?;
    let score = value.get("score").and_then(Value::as_f64);
    let flagged = value
        .get("flagged")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<BiasFlag>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Ok(BiasAssessment {
        score: clamp_score(score),
        flagged,
    })
}

/// Parse a JSON array of strings, dropping non-string entries.
pub fn string_array(raw: &str) -> Result<Vec<String>, GenerativeError> {
    let value = model_json(raw)?;
    let items = value
        .as_array()
        .ok_or_else(|| GenerativeError::Unparseable("expected a JSON array".to_string()))?;
    Ok(items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect())
}

/// Parse a JSON array of vocabulary entries, dropping malformed ones.
pub fn word_list(raw: &str) -> Result<Vec<DifficultWord>, GenerativeError> {
    let value = model_json(raw)?;
    let items = value
        .as_array()
        .ok_or_else(|| GenerativeError::Unparseable("expected a JSON array".to_string()))?;
    Ok(items
        .iter()
        .filter_map(|item| serde_json::from_value::<DifficultWord>(item.clone()).ok())
        .collect())
}

/// Round to the nearest integer and clamp into 0..=100.
fn clamp_score(score: Option<f64>) -> u8 {
    match score {
        Some(value) => value.round().clamp(0.0, 100.0) as u8,
        None => FALLBACK_BIAS_SCORE,
    }
}
