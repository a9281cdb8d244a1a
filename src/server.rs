//! HTTP boundary for the archive API.
//!
//! Composes the listing service, tree builder, and ingestion invoker
//! into request/response cycles and owns the status-code mapping.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/years` | Year directory names under the archive root |
//! | `GET`  | `/api/years/{year}` | Folder names inside a year |
//! | `GET`  | `/api/years/{year}/tree` | Fully expanded tree for a year |
//! | `POST` | `/api/download` | Submit an archive URL for ingestion |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses carry a JSON body of the form:
//!
//! ```json
//! { "error": "Year not found" }
//! ```
//!
//! Status mapping: missing/empty URL → 400, unknown year → 404, read
//! failures and ingestion failures → 500.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support the
//! browser-based client.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::ingest;
use crate::listing;
use crate::models::DirectoryEntry;
use crate::tree;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
struct AppState {
    /// Application configuration (wrapped in `Arc` for cheap cloning
    /// across handlers).
    config: Arc<Config>,
}

/// Starts the archive HTTP server.
///
/// Binds to the address configured in `[server].bind` and serves the
/// API until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(Arc::new(config.clone()));

    println!("yearshelf listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the API router. Exposed separately from [`run_server`] so
/// tests and embedding callers can serve it on a listener of their own.
pub fn router(config: Arc<Config>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/years", get(handle_years))
        .route("/api/years/{year}", get(handle_year_folders))
        .route("/api/years/{year}/tree", get(handle_year_tree))
        .route("/api/download", post(handle_download))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { config })
}

// ============ Error response ============

/// JSON error body, matching the shape the browsing client consumes.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error from an underlying failure.
fn internal(err: anyhow::Error) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: err.to_string(),
    }
}

/// Constructs a 500 carrying the diagnostic text of a failed ingestion.
fn ingestion_failed(message: String) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message,
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/years ============

/// Handler for `GET /api/years`.
///
/// Returns the year directory names under the archive root. A failed
/// root read is a server error.
async fn handle_years(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let years = listing::list_years(&state.config.archive.root)
        .await
        .map_err(internal)?;
    Ok(Json(years))
}

// ============ GET /api/years/{year} ============

/// Handler for `GET /api/years/{year}`.
///
/// Returns the folder names directly inside a year directory.
async fn handle_year_folders(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let folders = listing::list_folders(&state.config.archive.root, &year)
        .await
        .map_err(internal)?;
    Ok(Json(folders))
}

// ============ GET /api/years/{year}/tree ============

/// Handler for `GET /api/years/{year}/tree`.
///
/// Pre-checks that the year directory exists (404 otherwise) before
/// handing off to the tree builder. Any read failure during traversal
/// fails the whole request — no partial tree is returned.
async fn handle_year_tree(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<DirectoryEntry>>, AppError> {
    let year_dir = state.config.archive.root.join(&year);

    if tokio::fs::metadata(&year_dir).await.is_err() {
        return Err(not_found("Year not found"));
    }

    let entries = tree::build_tree(year_dir).await.map_err(internal)?;
    Ok(Json(entries))
}

// ============ POST /api/download ============

/// JSON request body for `POST /api/download`.
#[derive(Deserialize)]
struct DownloadRequest {
    #[serde(default)]
    url: Option<String>,
}

/// JSON response body for a successful ingestion.
#[derive(Serialize)]
struct DownloadResponse {
    /// The retrievable link printed by the fetch-and-extract executable.
    message: String,
}

/// Handler for `POST /api/download`.
///
/// A missing or empty `url` is rejected with 400 before any subprocess
/// is spawned. Otherwise the ingestion invoker runs to completion and
/// its exit status decides the response: 200 with the trimmed stdout on
/// success, 500 with the captured stderr (or a generic message) on
/// failure.
async fn handle_download(
    State(state): State<AppState>,
    Json(body): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, AppError> {
    let url = body.url.unwrap_or_default();
    if url.is_empty() {
        return Err(bad_request("No URL provided."));
    }

    println!(
        "Running {} with URL: {}",
        state.config.ingest.command.display(),
        url
    );

    let result = ingest::run_ingest(&state.config.ingest, &url)
        .await
        .map_err(internal)?;

    println!("Ingest command exited with code: {}", result.exit_code);

    if result.is_success() {
        Ok(Json(DownloadResponse {
            message: result.link().to_string(),
        }))
    } else {
        Err(ingestion_failed(result.failure_message()))
    }
}
