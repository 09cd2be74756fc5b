use regex::Regex;
use std::sync::LazyLock;

use crate::generative::types::BiasSignal;

/// Deterministic bias scoring strategy, active when the service runs
/// with `BIAS_MODE=heuristic`. Pluggable so the delegated-model variant
/// and this one stay interchangeable behind the orchestrator.
pub trait BiasHeuristic: Send + Sync {
    fn assess(&self, text: &str) -> HeuristicAssessment;
}

/// Score (0-100, 100 = fully neutral) and the signals behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicAssessment {
    pub score: u8,
    pub signals: Vec<BiasSignal>,
}

struct SignalGroup {
    title: &'static str,
    explanation: &'static str,
    penalty: u8,
    pattern: Regex,
}

static SIGNAL_GROUPS: LazyLock<Vec<SignalGroup>> = LazyLock::new(|| {
    vec![
        SignalGroup {
            title: "Loaded language",
            explanation: "Phrases like 'slams' and 'blasted' suggest conflict and blame rather than neutral reporting.",
            penalty: 15,
            pattern: Regex::new(r"(?i)\b(slam(s|med)?|blast(s|ed)?|shocking|outrageous|disastrous|scandalous)\b")
                .expect("Failed to compile loaded language regex"),
        },
        SignalGroup {
            title: "Emotional framing",
            explanation: "Headline and lead emphasize fear or urgency that may skew reader perception.",
            penalty: 10,
            pattern: Regex::new(r"(?i)\b(crisis|chaos|catastrophe|terrifying|alarming|devastating|nightmare)\b")
                .expect("Failed to compile emotional framing regex"),
        },
        SignalGroup {
            title: "Opinion stated as fact",
            explanation: "Words like 'clearly' and 'obviously' present judgments as settled conclusions.",
            penalty: 10,
            pattern: Regex::new(r"(?i)\b(clearly|obviously|undoubtedly|without question|everyone knows)\b")
                .expect("Failed to compile opinion regex"),
        },
        SignalGroup {
            title: "Unverified claims",
            explanation: "Attributions like 'sources say' lean on claims the article does not verify.",
            penalty: 10,
            pattern: Regex::new(r"(?i)\b(sources say|reportedly|rumored|some say|critics claim)\b")
                .expect("Failed to compile unverified claims regex"),
        },
    ]
});

/// Keyword-based stand-in for the generative analyst. Each signal group
/// that matches costs a fixed penalty from a perfect score of 100.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalBiasHeuristic;

impl BiasHeuristic for LexicalBiasHeuristic {
    fn assess(&self, text: &str) -> HeuristicAssessment {
        let mut score: u8 = 100;
        let mut signals = Vec::new();

        for group in SIGNAL_GROUPS.iter() {
            if group.pattern.is_match(text) {
                score = score.saturating_sub(group.penalty);
                signals.push(BiasSignal {
                    title: group.title.to_string(),
                    explanation: group.explanation.to_string(),
                });
            }
        }

        HeuristicAssessment { score, signals }
    }
}
