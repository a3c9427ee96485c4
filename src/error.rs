use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Invalid greenhouse dimensions: {0}")]
    InvalidGreenhouse(String),
    #[error("Invalid analysis period {start} .. {end}: {reason}")]
    InvalidPeriod {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },
    #[error("Unknown region '{0}'")]
    UnknownRegion(String),
    #[error("Unknown insulation grade '{0}'")]
    UnknownInsulationGrade(String),
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: &'static str, message: String },
    #[error("Supply either `observations` or `weather_csv`, not both")]
    ConflictingObservations,
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    // ── Input data ───────────────────────────────────────────────────────────
    #[error("Weather table is missing required columns: {missing:?}")]
    MissingColumns { missing: Vec<&'static str> },
    #[error("Unparsable date '{value}' in weather table at row {row}")]
    InvalidDate { row: usize, value: String },
    #[error("Error reading weather table: {0}")]
    Csv(#[from] csv::Error),

    // ── Export ───────────────────────────────────────────────────────────────
    #[error("Export failed: {0}")]
    Export(String),
}

impl AnalysisError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter { field, message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("Rejected analysis request: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
