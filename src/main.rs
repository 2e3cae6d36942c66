//! API сервер статистики задач

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use focus_stats::{
    Dashboard, FocusRanking, FocusRecord, Granularity, Page, ServerSettings, StatsAggregator, StatsConfig,
    StatsError, StatsResult, Task, TimeSegment, SEGMENT_COUNT,
};

#[derive(Clone)]
struct AppState {
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Deserialize)]
struct StatsRequest {
    tasks: Vec<Task>,
    #[serde(default)]
    focus: Vec<FocusRecord>,
    #[serde(default)]
    config: StatsConfig,
    #[serde(default)]
    today: Option<NaiveDate>,
}

impl StatsRequest {
    fn into_parts(self, state: &AppState) -> Result<(StatsAggregator, Vec<Task>, Vec<FocusRecord>, NaiveDate), ApiError> {
        self.config.validate()?;
        let today = self.today.unwrap_or_else(state.today);
        Ok((StatsAggregator::with_config(self.config), self.tasks, self.focus, today))
    }
}

#[derive(Debug, Deserialize)]
struct SegmentsQuery {
    granularity: Option<String>,
    today: Option<NaiveDate>,
}

struct ApiError(StatsError);

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected request: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = ServerSettings::from_env()?;
    let app = router(AppState { today: local_today });

    let listener = tokio::net::TcpListener::bind(settings.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.addr))?;
    tracing::info!("Server listening on http://{}", settings.addr);
    axum::serve(listener, app).await.context("server stopped with an error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/segments", get(segments))
        .route("/api/stats", post(stats))
        .route("/api/focus", post(focus))
        .route("/api/table", post(table))
        .route("/api/dashboard", post(dashboard))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Focus Stats API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn segments(
    State(state): State<AppState>,
    Query(query): Query<SegmentsQuery>,
) -> Result<Json<[TimeSegment; SEGMENT_COUNT]>, ApiError> {
    let granularity = match query.granularity.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<Granularity>()
            .map_err(|_| StatsError::UnknownGranularity(raw.to_string()))?,
        None => Granularity::default(),
    };
    let today = query.today.unwrap_or_else(state.today);

    let config = StatsConfig { granularity, ..StatsConfig::default() };
    Ok(Json(StatsAggregator::with_config(config).segments(today)))
}

async fn stats(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<StatsResult>, ApiError> {
    tracing::info!("Stats request: {} tasks", request.tasks.len());

    let (aggregator, tasks, _, today) = request.into_parts(&state)?;
    tracing::debug!("Stats granularity: {}", aggregator.config().granularity);
    Ok(Json(aggregator.task_stats(&tasks, today)))
}

async fn focus(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<FocusRanking>, ApiError> {
    tracing::info!("Focus ranking request: {} records", request.focus.len());

    let (aggregator, _, records, _) = request.into_parts(&state)?;
    Ok(Json(aggregator.focus_ranking(&records)))
}

async fn table(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<Page>, ApiError> {
    tracing::info!("Table request: {} tasks, {} focus records", request.tasks.len(), request.focus.len());

    let (aggregator, tasks, records, _) = request.into_parts(&state)?;
    Ok(Json(aggregator.table_page(&tasks, &records)))
}

async fn dashboard(
    State(state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<Dashboard>, ApiError> {
    tracing::info!("Dashboard request: {} tasks, {} focus records", request.tasks.len(), request.focus.len());

    let (aggregator, tasks, records, today) = request.into_parts(&state)?;
    Ok(Json(aggregator.dashboard(&tasks, &records, today)))
}
