use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    routing::{get, post},
};

use newseries::{
    analysis::{handlers::analyze, heuristic::LexicalBiasHeuristic},
    app_state::AppState,
    config::BiasMode,
    generative::{GenerativeError, GenerativeService, TextGenerator},
    health::health_check,
};

pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/healthz", get(health_check))
        .with_state(state)
}

pub fn app_state(generator: Option<Arc<dyn TextGenerator>>, bias_mode: BiasMode) -> AppState {
    AppState {
        analysis: GenerativeService::new(generator),
        heuristic: Arc::new(LexicalBiasHeuristic),
        bias_mode,
    }
}

/// Answers generate calls from a system-prompt keyword table, standing in
/// for a live model endpoint.
pub struct CannedGenerator {
    replies: Vec<(&'static str, String)>,
    calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn new(replies: Vec<(&'static str, String)>) -> Self {
        Self {
            replies,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(
        &self,
        system: &str,
        _user: &str,
        _max_tokens: u32,
    ) -> Result<String, GenerativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for (needle, reply) in &self.replies {
            if system.contains(needle) {
                return Ok(reply.clone());
            }
        }
        Err(GenerativeError::EmptyResponse)
    }
}
