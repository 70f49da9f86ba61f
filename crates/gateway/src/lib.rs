//! HTTP API gateway for AquaData.
//!
//! Thin presentation layer over the answer pipeline:
//!
//! - `GET  /health`          — liveness
//! - `GET  /api/v1/regions`  — unique region labels
//! - `GET  /api/v1/records`  — filtered record preview
//! - `GET  /api/v1/about`    — dataset sources and credits
//! - `POST /api/v1/ask`      — one question/answer cycle
//!
//! Empty questions are rejected here with 400 (the pipeline is never
//! invoked); upstream model failures map to 502 with the error text.
//! Built on Axum.

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use aquadata_config::AppConfig;
use aquadata_core::record::RecordSet;
use aquadata_dataset::CsvStore;
use aquadata_engine::{AnswerPipeline, DomainClassifier, Outcome, PipelineSettings};
use aquadata_providers::OpenAiCompatProvider;

/// Dataset source line, shown to users alongside answers.
pub const DATA_SOURCES: &str = "CONAGUA (Comisión Nacional del Agua), Red Nacional de Medición de Calidad del Agua (RENAMECA), SEMARNAT";

/// Shared application state for the gateway.
///
/// Both fields are immutable after startup, so plain `Arc` sharing
/// needs no locking.
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
    pub records: Arc<RecordSet>,
}

type SharedState = Arc<AppState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, cors_allow_any: bool) -> Router {
    let cors = if cors_allow_any {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/regions", get(regions_handler))
        .route("/api/v1/records", get(records_handler))
        .route("/api/v1/about", get(about_handler))
        .route("/api/v1/ask", post(ask_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Loads the dataset and builds the provider + pipeline once; every
/// request shares them read-only.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let records = Arc::new(CsvStore::load(
        &config.dataset.path,
        &config.dataset.region_column,
    )?);

    let api_key = config
        .provider
        .api_key
        .clone()
        .ok_or("No API key configured — set GROQ_API_KEY or add it to config.toml")?;

    let provider = Arc::new(OpenAiCompatProvider::new(
        "groq",
        &config.provider.base_url,
        api_key,
        std::time::Duration::from_secs(config.provider.request_timeout_secs),
    ));

    let settings = PipelineSettings {
        model: config.provider.model.clone(),
        temperature: config.provider.temperature,
        max_tokens: config.provider.max_tokens,
        max_context_chars: config.chat.max_context_chars,
        system_prompt: config
            .chat
            .system_prompt_override
            .clone()
            .unwrap_or_else(|| aquadata_engine::WATER_SYSTEM_PROMPT.into()),
    };

    let pipeline = Arc::new(AnswerPipeline::new(
        provider,
        DomainClassifier::default(),
        settings,
    ));

    let state = Arc::new(AppState { pipeline, records });
    let app = build_router(state, config.gateway.cors_allow_any);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The record scope for one request: the full set borrowed as-is, or
/// an owned filtered copy when a region is named.
fn scope<'a>(records: &'a RecordSet, region: Option<&str>) -> Cow<'a, RecordSet> {
    match region {
        Some(region) => Cow::Owned(records.filter_by_region(region)),
        None => Cow::Borrowed(records),
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RegionsResponse {
    regions: Vec<String>,
}

async fn regions_handler(State(state): State<SharedState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.records.regions(),
    })
}

#[derive(Deserialize)]
struct RecordsQuery {
    region: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct RecordsResponse {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    total: usize,
}

async fn records_handler(
    State(state): State<SharedState>,
    Query(query): Query<RecordsQuery>,
) -> Json<RecordsResponse> {
    let filtered = scope(&state.records, query.region.as_deref());
    let total = filtered.len();
    let head = filtered.head(query.limit.unwrap_or(50));

    Json(RecordsResponse {
        headers: head.headers().to_vec(),
        rows: head
            .records()
            .iter()
            .map(|r| r.fields.clone())
            .collect(),
        total,
    })
}

#[derive(Serialize)]
struct AboutResponse {
    name: &'static str,
    version: &'static str,
    sources: &'static str,
    rows: usize,
}

async fn about_handler(State(state): State<SharedState>) -> Json<AboutResponse> {
    Json(AboutResponse {
        name: "AquaData",
        version: env!("CARGO_PKG_VERSION"),
        sources: DATA_SOURCES,
        rows: state.records.len(),
    })
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    region: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum AskResponse {
    Answered { answer: String },
    Refused { message: String },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn ask_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Caller-boundary precondition: empty questions never reach the pipeline
    if payload.question.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "question must not be empty".into(),
            }),
        ));
    }

    let filtered = scope(&state.records, payload.region.as_deref());

    match state.pipeline.ask(&payload.question, &filtered).await {
        Ok(Outcome::Answered(answer)) => Ok(Json(AskResponse::Answered { answer })),
        Ok(Outcome::Refused) => Ok(Json(AskResponse::Refused {
            message: aquadata_engine::REFUSAL.into(),
        })),
        Err(e) => {
            error!(error = %e, "Upstream call failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
