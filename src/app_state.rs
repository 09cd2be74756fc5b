use std::sync::Arc;

use crate::analysis::heuristic::{BiasHeuristic, LexicalBiasHeuristic};
use crate::config::{BiasMode, Config};
use crate::generative::{AnthropicClient, GenerativeService, TextGenerator};

/// Shared handler dependencies, cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub analysis: GenerativeService,
    pub heuristic: Arc<dyn BiasHeuristic>,
    pub bias_mode: BiasMode,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let generator = config.anthropic_api_key().map(|key| {
            Arc::new(AnthropicClient::new(
                key.to_string(),
                config.anthropic_model().to_string(),
            )) as Arc<dyn TextGenerator>
        });

        Self {
            analysis: GenerativeService::new(generator),
            heuristic: Arc::new(LexicalBiasHeuristic),
            bias_mode: config.bias_mode(),
        }
    }
}
