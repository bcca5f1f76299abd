//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::QueryRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::indicators::error::IndicatorError;
use crate::models::indicators::IndicatorParams;
use crate::models::report::AnalysisReport;
use crate::models::request::{Interval, PriceRequest};
use crate::services::analysis::AnalysisService;
use crate::services::error::{DataSourceError, ServiceError};

pub const SERVICE_NAME: &str = "marketlens";

#[derive(Clone)]
pub struct AppState {
    pub service: AnalysisService,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self {
            service,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON error body with a stable machine-readable code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_REQUEST",
            message: message.into(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let (status, code) = match &err {
            ServiceError::Indicator(IndicatorError::InvalidParameter { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_PARAMETER")
            }
            ServiceError::Indicator(IndicatorError::MissingField(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_FIELD")
            }
            ServiceError::Indicator(IndicatorError::MalformedInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_INPUT")
            }
            ServiceError::DataSource(DataSourceError::UnknownSymbol { .. }) => {
                (StatusCode::NOT_FOUND, "UNKNOWN_SYMBOL")
            }
            ServiceError::DataSource(DataSourceError::NoData { .. }) => {
                (StatusCode::NOT_FOUND, "NO_DATA")
            }
            ServiceError::DataSource(DataSourceError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            ServiceError::DataSource(DataSourceError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, "NETWORK")
            }
            ServiceError::DataSource(DataSourceError::HttpStatus { .. }) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_STATUS")
            }
            ServiceError::DataSource(DataSourceError::MalformedPayload(_)) => {
                (StatusCode::BAD_GATEWAY, "MALFORMED_PAYLOAD")
            }
            ServiceError::DataSource(DataSourceError::Provider(_)) => {
                (StatusCode::BAD_GATEWAY, "PROVIDER_NOTICE")
            }
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME,
        "provider": state.service.provider_name(),
    }))
}

/// Query string for `/api/indicators/{symbol}`
#[derive(Debug, Default, Deserialize)]
pub struct IndicatorQuery {
    pub mode: Option<String>,
    pub interval: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub ma_window: Option<usize>,
    pub rsi_period: Option<usize>,
    pub bollinger_window: Option<usize>,
    pub bollinger_k: Option<f64>,
}

impl IndicatorQuery {
    pub fn to_request(&self, symbol: &str) -> Result<PriceRequest, ApiError> {
        match self.mode.as_deref().unwrap_or("intraday") {
            "intraday" => {
                let interval = match &self.interval {
                    Some(raw) => raw.parse::<Interval>().map_err(|e| ApiError::bad_request(e))?,
                    None => Interval::default(),
                };
                Ok(PriceRequest::intraday(symbol, interval))
            }
            "historical" => {
                let (Some(start), Some(end)) = (self.start, self.end) else {
                    return Err(ApiError::bad_request(
                        "historical mode requires both 'start' and 'end' dates",
                    ));
                };
                Ok(PriceRequest::historical(symbol, start, end))
            }
            other => Err(ApiError::bad_request(format!(
                "unknown mode '{}', expected 'intraday' or 'historical'",
                other
            ))),
        }
    }

    pub fn to_params(&self) -> IndicatorParams {
        let defaults = IndicatorParams::default();
        IndicatorParams {
            ma_window: self.ma_window.unwrap_or(defaults.ma_window),
            rsi_period: self.rsi_period.unwrap_or(defaults.rsi_period),
            bollinger_window: self.bollinger_window.unwrap_or(defaults.bollinger_window),
            bollinger_k: self.bollinger_k.unwrap_or(defaults.bollinger_k),
        }
    }
}

async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    query: Result<Query<IndicatorQuery>, QueryRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Query(query) = query?;
    let request = query.to_request(&symbol)?;
    let report = state.service.analyze(&request, query.to_params()).await?;
    Ok(Json(report))
}

/// Log server-side failures with request context
async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = start.elapsed().as_millis(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/indicators/{symbol}", get(get_indicators))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn(error_logging_middleware))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, service: AnalysisService) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
