use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::error::AnalysisError;
use crate::models::analysis::{AnalysisReport, AnalysisRequest, HealthStatus};
use crate::models::climate::{InsulationGrade, RegionProfile};
use crate::models::greenhouse::{GreenhouseSpec, SurfaceAreaResult};
use crate::services::{analysis_service, export, geometry};
use crate::shared_state::AppState;

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AnalysisError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AnalysisError::MalformedRequest(rejection.body_text()))
}

fn csv_response(body: String, file_name: &str) -> axum::response::Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        body,
    )
        .into_response()
}

/// GET /api/health
/// Service liveness
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth_enabled: state.auth_enabled(),
    })
}

/// GET /api/regions
/// List region profiles
///
/// Seasonal parameters used to synthesize daily temperatures when no
/// weather observation exists for a date.
#[utoipa::path(
    get,
    path = "/api/regions",
    responses(
        (status = 200, description = "Region profiles", body = Vec<RegionProfile>),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn list_regions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tables.regions.clone())
}

/// GET /api/insulation-grades
/// List insulation grades and their U-values
#[utoipa::path(
    get,
    path = "/api/insulation-grades",
    responses(
        (status = 200, description = "Insulation grades", body = Vec<InsulationGrade>),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn list_insulation_grades(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.tables.insulation_grades.clone())
}

/// POST /api/geometry
/// Estimate envelope surface area
#[utoipa::path(
    post,
    path = "/api/geometry",
    request_body = GreenhouseSpec,
    responses(
        (status = 200, description = "Envelope areas", body = SurfaceAreaResult),
        (status = 400, description = "Invalid dimensions"),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn compute_geometry(
    payload: Result<Json<GreenhouseSpec>, JsonRejection>,
) -> Result<Json<SurfaceAreaResult>, AnalysisError> {
    let spec = parse_body(payload)?;
    geometry::validate(&spec)?;
    Ok(Json(geometry::surface_area(&spec)))
}

/// POST /api/analysis
/// Run a winter heating and annual profit analysis
///
/// Each call is an independent computation: nothing is stored between requests.
#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Geometry, season summary and per-day results", body = AnalysisReport),
        (status = 400, description = "Invalid configuration or weather data"),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn run_analysis(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AnalysisError> {
    let request = parse_body(payload)?;
    let report = analysis_service::run(&request, &state.tables)?;
    Ok(Json(report))
}

/// POST /api/analysis/daily.csv
/// Run an analysis and download the per-day table
#[utoipa::path(
    post,
    path = "/api/analysis/daily.csv",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Per-day results as CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid configuration or weather data"),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn export_daily(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<axum::response::Response, AnalysisError> {
    let request = parse_body(payload)?;
    let report = analysis_service::run(&request, &state.tables)?;
    Ok(csv_response(export::daily_csv(&report.daily)?, export::DAILY_FILE_NAME))
}

/// POST /api/analysis/summary.csv
/// Run an analysis and download the summary record
#[utoipa::path(
    post,
    path = "/api/analysis/summary.csv",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Summary as single-row CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid configuration or weather data"),
        (status = 401, description = "Missing or invalid access key")
    )
)]
pub async fn export_summary(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<axum::response::Response, AnalysisError> {
    let request = parse_body(payload)?;
    let report = analysis_service::run(&request, &state.tables)?;
    Ok(csv_response(export::summary_csv(&report.summary)?, export::SUMMARY_FILE_NAME))
}
