//! HTTP request handlers for the generation service.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::jobs::{JobProcessor, JobStore};
use crate::pipeline::DatasetPipeline;
use crate::types::{
    CurateRequest, CurateResponse, StartGenerateJobRequest, StartGenerateJobResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: Arc<DatasetPipeline>,
    pub job_store: Arc<RwLock<JobStore>>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Start a generation job.
pub async fn start_generate_job(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartGenerateJobRequest>,
) -> Result<Json<StartGenerateJobResponse>, StatusCode> {
    if request.text.trim().is_empty() {
        return Ok(Json(StartGenerateJobResponse {
            job_id: Uuid::nil(),
            accepted: false,
            message: Some("Document text is empty".to_string()),
        }));
    }

    info!(
        doc_len = request.text.len(),
        num_pairs = request.num_pairs,
        curate = request.curate,
        "Received generation job request"
    );

    let job_id = {
        let mut store = state.job_store.write().await;
        store.cleanup_old_jobs();
        store.create_job(request.filename.clone(), request.num_pairs)
    };

    let processor = JobProcessor::new(state.pipeline.clone());
    let job_store = state.job_store.clone();

    tokio::spawn(async move {
        processor.process_job(job_id, request, job_store).await;
    });

    Ok(Json(StartGenerateJobResponse {
        job_id,
        accepted: true,
        message: None,
    }))
}

/// Get generation job status.
pub async fn get_job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let store = state.job_store.read().await;

    match store.get_job_status(job_id) {
        Some(status) => Ok(Json(status)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Curate a posted set of QA pairs synchronously.
pub async fn curate_pairs(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CurateRequest>,
) -> Json<CurateResponse> {
    info!(pairs = request.pairs.len(), "Received curation request");

    let (pairs, metrics) = state
        .pipeline
        .curate(&request.pairs, request.threshold)
        .await;

    Json(CurateResponse { pairs, metrics })
}
