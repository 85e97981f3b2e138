//! QA Dataset Generation Service - Main Entry Point
//!
//! HTTP service that turns documents into curated QA training datasets.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qaforge::api::handlers::{self, AppState};
use qaforge::jobs::JobStore;
use qaforge::llm::OpenAiClient;
use qaforge::output::VectorStoreClient;
use qaforge::pipeline::DatasetPipeline;
use qaforge::prompts::PromptLibrary;
use qaforge::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "qaforge=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env();

    info!("Starting QA Forge v{}", env!("CARGO_PKG_VERSION"));
    info!(
        chunk_size = config.generation.chunk_size,
        overlap = config.generation.overlap,
        model = %config.llm.model,
        "Generation configuration loaded"
    );

    // Initialize components
    let client = Arc::new(OpenAiClient::new(&config.llm));

    let vector_store = config
        .vector_store_url
        .as_ref()
        .map(|url| Arc::new(VectorStoreClient::new(url, &config.vector_collection)));

    let pipeline = Arc::new(DatasetPipeline::new(
        client,
        PromptLibrary::default(),
        config.generation,
        config.curation,
        vector_store,
    ));

    let state = Arc::new(AppState {
        pipeline,
        job_store: Arc::new(RwLock::new(JobStore::new())),
    });

    // Build HTTP routes
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Generation jobs
        .route("/generate/jobs", post(handlers::start_generate_job))
        .route("/generate/jobs/:job_id", get(handlers::get_job_status))
        // Synchronous curation
        .route("/curate", post(handlers::curate_pairs))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3020);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
