use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use newseries::analysis::handlers::{analyze, analyze_redirect, handle_panic};
use newseries::app_state::AppState;
use newseries::config::Config;
use newseries::{analysis, health};

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, analysis::handlers::analyze),
    components(schemas(
        analysis::AnalyzeRequest,
        analysis::AnalysisResponse,
        analysis::dtos::ErrorResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "analysis", description = "Article analysis endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let state = AppState::new(&config);
    if !state.analysis.is_configured() {
        warn!("No Anthropic API key configured; serving fallback analysis only");
    }

    let app = Router::new()
        .route("/", get(|| async { "Hello from newseries!" }))
        .route("/analyze", get(analyze_redirect))
        .route("/api/analyze", post(analyze))
        .route("/healthz", get(health::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind to address");
    info!("Listening on {}", config.bind_addr());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal, initiating graceful shutdown...");
}
