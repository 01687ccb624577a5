//! Report HTTP server: upload a document, get JSON back.
//!
//! Routes:
//! - `POST /upload/`     classify the report page of the uploaded file
//! - `POST /word-count/` count the words in the uploaded file
//! - `GET  /health`      liveness probe
//!
//! Uploads are multipart forms with the document in a field named `file`.
//! Extraction is blocking file work and runs on the blocking pool.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use reportlens_core::{ClassificationResult, DocumentProcessor, WordCountResult};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::error::ApiError;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";
/// Name used when the client omits a filename
const DEFAULT_FILENAME: &str = "document";
/// Headroom for multipart boundaries and part headers on top of the file limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    processor: Arc<DocumentProcessor>,
}

/// Build the report router around a shared processor.
pub fn build_router(processor: Arc<DocumentProcessor>) -> Router {
    let body_limit = processor
        .config()
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/upload/", post(classify_upload))
        .route("/word-count/", post(count_upload))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(log_access))
        .with_state(AppState { processor })
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    processor: Arc<DocumentProcessor>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let app = build_router(processor);

    tracing::info!(%addr, "Report server started");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Report server stopped");
    Ok(())
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Report server received shutdown signal");
}

// ---------------------------------------------------------------------------
// Axum handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn classify_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let limit = state.processor.config().max_upload_bytes;
    let upload = read_upload(multipart, limit).await?;
    let span = upload.span("classify");

    let processor = state.processor.clone();
    let result = tokio::task::spawn_blocking(move || {
        span.in_scope(|| processor.classify_bytes(&upload.filename, &upload.bytes))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}

async fn count_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<WordCountResult>, ApiError> {
    let limit = state.processor.config().max_upload_bytes;
    let upload = read_upload(multipart, limit).await?;
    let span = upload.span("word_count");

    let processor = state.processor.clone();
    let result = tokio::task::spawn_blocking(move || {
        span.in_scope(|| processor.count_words_bytes(&upload.filename, &upload.bytes))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}

/// Log method, path, status and latency of every request.
async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

// ---------------------------------------------------------------------------
// Multipart parsing
// ---------------------------------------------------------------------------

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

impl Upload {
    fn span(&self, operation: &'static str) -> tracing::Span {
        tracing::info_span!(
            "upload",
            operation,
            request_id = %Uuid::new_v4(),
            filename = %self.filename,
            size = self.bytes.len()
        )
    }
}

/// Pull the `file` field out of the form; other fields are ignored.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    limit: usize,
) -> Result<Upload, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        return Ok(Upload {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest(format!(
        "No file provided. Send the document in a multipart field named '{FILE_FIELD}'."
    )))
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        tracing::warn!("Failed to read multipart upload: {err}");
        ApiError::BadRequest(err.body_text())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
