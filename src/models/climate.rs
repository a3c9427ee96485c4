use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily outdoor temperature extremes (°C) for one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClimateObservation {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
}

/// Where a day's (min, max) pair came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureSource {
    Observed,
    Synthesized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTemperature {
    pub min: f64,
    pub max: f64,
    pub source: TemperatureSource,
}

/// Seasonal approximation parameters for one region.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegionProfile {
    pub name: String,
    /// Romanized lookup alias
    pub alias: String,
    pub base_temperature_offset: f64,
    pub seasonal_amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InsulationGrade {
    pub label: String,
    pub description: String,
    /// Envelope heat transfer coefficient
    pub u_value: f64,
}
