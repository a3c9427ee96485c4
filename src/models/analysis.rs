use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::climate::ClimateObservation;
use crate::models::greenhouse::{GreenhouseSpec, GreenhouseType, SurfaceAreaResult};

fn default_target_temperature() -> f64 { 15.0 }
fn default_summer_cost_ratio() -> f64 { 0.30 }

// ─── Energy ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    /// Tax-exempt agricultural diesel, priced per litre
    FuelOil,
    /// Agricultural electricity tariff, priced per kWh
    Electricity,
}

impl EnergySource {
    /// Heat delivered per fuel unit. Calibrated for relative comparison only.
    pub const fn calorific_value(self) -> f64 {
        match self {
            EnergySource::FuelOil => 8500.0,
            EnergySource::Electricity => 860.0,
        }
    }

    pub const fn efficiency(self) -> f64 {
        match self {
            EnergySource::FuelOil => 0.85,
            EnergySource::Electricity => 0.98,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeatingModel {
    /// Fixed 14 h night heating against the daily minimum
    CoarseFixedHours,
    /// 24 h diurnal curve, heating only the hours below target
    #[default]
    FineHourly,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClimateScenario {
    #[default]
    Normal,
    /// Synthesized minima shifted 3 °C colder
    ConservativeCold,
}

/// Resolved heating parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub target_temperature: f64,
    pub insulation_u_value: f64,
    pub energy_source: EnergySource,
    pub unit_fuel_price: f64,
    pub heating_model: HeatingModel,
    pub climate_scenario: ClimateScenario,
}

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnergySettings {
    pub energy_source: EnergySource,
    /// Price per litre (fuel oil) or per kWh (electricity)
    pub unit_fuel_price: f64,
    /// Night set-point (°C)
    #[serde(default = "default_target_temperature")]
    pub target_temperature: f64,
    /// Label from the insulation grade table
    pub insulation_grade: String,
    #[serde(default)]
    pub heating_model: HeatingModel,
    #[serde(default)]
    pub climate_scenario: ClimateScenario,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionPlan {
    pub winter_total_yield_kg: f64,
    /// Winter market price per kg
    pub winter_market_price: f64,
    #[serde(default)]
    pub summer_total_yield_kg: f64,
    #[serde(default)]
    pub summer_price: f64,
    /// Summer operating cost as a fraction of summer revenue
    #[serde(default = "default_summer_cost_ratio")]
    pub summer_cost_ratio: f64,
}

/// Capital costs of the facility. Useful lives are fixed: film 3 years,
/// curtain 5 years, heater and other equipment 10 years.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FacilityInvestment {
    pub covering_film: f64,
    pub thermal_curtain: f64,
    pub heater: f64,
    pub other_equipment: f64,
}

/// Inclusive winter analysis window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Region name or romanized alias
    pub region: String,
    pub greenhouse: GreenhouseSpec,
    pub energy: EnergySettings,
    pub production: ProductionPlan,
    #[serde(default)]
    pub investment: FacilityInvestment,
    pub period: AnalysisPeriod,
    /// Measured daily extremes; mutually exclusive with `weather_csv`
    #[serde(default)]
    pub observations: Option<Vec<ClimateObservation>>,
    /// Raw `date,tmin,tmax` table; mutually exclusive with `observations`
    #[serde(default)]
    pub weather_csv: Option<String>,
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// One simulated day. Field names double as the daily export header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DailyResult {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub heating_hours_active: u32,
    pub heat_load: f64,
    /// Litres of fuel oil or kWh of electricity
    pub fuel_units: f64,
    pub fuel_cost: f64,
    pub yield_kg: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    Observed,
    Synthesized,
}

/// Season and annual totals. Flat so it serializes to a single CSV row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PeriodSummary {
    pub region: String,
    pub weather_source: WeatherSource,
    pub winter_start: NaiveDate,
    pub winter_end: NaiveDate,
    pub winter_days: u32,
    pub greenhouse_type: GreenhouseType,
    pub span_count: u32,
    pub length: f64,
    pub width: f64,
    pub side_height: f64,
    pub ridge_height: f64,
    pub wing_length: f64,
    pub roof_correction_factor: f64,
    pub surface_area: f64,
    pub u_value: f64,
    pub target_temperature: f64,
    pub energy_source: EnergySource,
    pub unit_fuel_price: f64,
    pub average_heating_hours: f64,
    pub total_heating_hours: u32,
    pub winter_revenue: f64,
    pub winter_fuel_cost: f64,
    pub depreciation: f64,
    pub winter_net_profit: f64,
    pub summer_revenue: f64,
    pub summer_cost: f64,
    pub summer_net_profit: f64,
    pub annual_revenue: f64,
    pub annual_net_profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub geometry: SurfaceAreaResult,
    pub summary: PeriodSummary,
    pub daily: Vec<DailyResult>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub auth_enabled: bool,
}
