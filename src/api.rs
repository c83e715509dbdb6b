// 🌐 REST API with Axum
// POST /receipts/process    → {"id": "..."}
// GET  /receipts/:id/points → {"points": N}
// GET  /health              → {"status": "ok", "receipts": N}

use crate::config::{CorsMode, ServerConfig};
use crate::processor::ReceiptProcessor;
use crate::receipt::Receipt;
use crate::store::StoreError;
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::fmt;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

const INVALID_RECEIPT_MESSAGE: &str = "Invalid receipt format. Please verify input.";
const UNKNOWN_RECEIPT_MESSAGE: &str = "No receipt found for that ID.";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details stay in the logs; callers get the fixed public message
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => {
                warn!(detail = %detail, "Rejected receipt");
                (StatusCode::BAD_REQUEST, INVALID_RECEIPT_MESSAGE)
            }
            ApiError::NotFound(id) => {
                warn!(id = %id, "Unknown receipt id");
                (StatusCode::NOT_FOUND, UNKNOWN_RECEIPT_MESSAGE)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Serialize)]
struct ProcessResponse {
    id: String,
}

#[derive(Serialize)]
struct PointsResponse {
    points: u64,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    receipts: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /receipts/process - Score a receipt and remember it
async fn process_receipt(
    State(processor): State<ReceiptProcessor>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let Json(receipt) = payload?;
    let record = processor.process(&receipt);
    Ok(Json(ProcessResponse { id: record.id }))
}

/// GET /receipts/:id/points - Points for a processed receipt
async fn get_points(
    State(processor): State<ReceiptProcessor>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let points = processor.points(&id)?;
    Ok(Json(PointsResponse { points }))
}

/// GET /health - Liveness plus a count of stored receipts
async fn health_check(State(processor): State<ReceiptProcessor>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        receipts: processor.receipt_count(),
    })
}

// ============================================================================
// Router & Server
// ============================================================================

pub fn create_app(processor: ReceiptProcessor, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .route("/health", get(health_check))
        .with_state(processor)
        .layer(TraceLayer::new_for_http());

    match config.cors {
        CorsMode::Permissive => app.layer(CorsLayer::permissive()),
        CorsMode::Off => app,
    }
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("receipt_processor=info,receipt_server=info,tower_http=info")),
        )
        .with(tracing_fmt::layer().with_target(false).compact())
        .init();
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: ServerConfig, processor: ReceiptProcessor) -> Result<()> {
    let addr = config.socket_addr();
    let app = create_app(processor, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, cors = ?config.cors, "Receipt processor listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Receipt processor stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
