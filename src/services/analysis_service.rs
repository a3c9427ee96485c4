use crate::error::{AnalysisError, Result};
use crate::models::analysis::{
    AnalysisRequest, AnalysisReport, DailyResult, FacilityInvestment, PeriodSummary, SimulationConfig,
    WeatherSource,
};
use crate::models::reference::ReferenceTables;
use crate::services::climate::{ObservationTable, TemperatureProvider};
use crate::services::{geometry, heating, revenue};

/// Longest analysis window accepted, in days.
pub const MAX_PERIOD_DAYS: usize = 366;

/// Useful lives (years) used for straight-line depreciation.
pub const FILM_LIFE_YEARS: f64 = 3.0;
pub const CURTAIN_LIFE_YEARS: f64 = 5.0;
pub const HEATER_LIFE_YEARS: f64 = 10.0;
pub const OTHER_EQUIPMENT_LIFE_YEARS: f64 = 10.0;

/// Annual straight-line depreciation of the facility.
pub fn annual_depreciation(investment: &FacilityInvestment) -> f64 {
    investment.covering_film / FILM_LIFE_YEARS
        + investment.thermal_curtain / CURTAIN_LIFE_YEARS
        + investment.heater / HEATER_LIFE_YEARS
        + investment.other_equipment / OTHER_EQUIPMENT_LIFE_YEARS
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AnalysisError::invalid(field, format!("must be a non-negative number, got {}", value)));
    }
    Ok(())
}

fn validate_request(request: &AnalysisRequest) -> Result<()> {
    geometry::validate(&request.greenhouse)?;

    let energy = &request.energy;
    if !energy.target_temperature.is_finite() {
        return Err(AnalysisError::invalid("energy.target_temperature", "must be a finite number"));
    }
    non_negative("energy.unit_fuel_price", energy.unit_fuel_price)?;

    let p = &request.production;
    non_negative("production.winter_total_yield_kg", p.winter_total_yield_kg)?;
    non_negative("production.winter_market_price", p.winter_market_price)?;
    non_negative("production.summer_total_yield_kg", p.summer_total_yield_kg)?;
    non_negative("production.summer_price", p.summer_price)?;
    if !(0.0..=1.0).contains(&p.summer_cost_ratio) {
        return Err(AnalysisError::invalid(
            "production.summer_cost_ratio",
            format!("must be within [0, 1], got {}", p.summer_cost_ratio),
        ));
    }

    let inv = &request.investment;
    non_negative("investment.covering_film", inv.covering_film)?;
    non_negative("investment.thermal_curtain", inv.thermal_curtain)?;
    non_negative("investment.heater", inv.heater)?;
    non_negative("investment.other_equipment", inv.other_equipment)?;

    let (start, end) = (request.period.start, request.period.end);
    if end <= start {
        return Err(AnalysisError::InvalidPeriod { start, end, reason: "end must be after start".to_string() });
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_PERIOD_DAYS as i64 {
        return Err(AnalysisError::InvalidPeriod {
            start,
            end,
            reason: format!("{} days exceeds the {} day limit", days, MAX_PERIOD_DAYS),
        });
    }

    if request.observations.is_some() && request.weather_csv.is_some() {
        return Err(AnalysisError::ConflictingObservations);
    }
    if let Some(bad) = request
        .observations
        .iter()
        .flatten()
        .find(|o| !o.temperature_min.is_finite() || !o.temperature_max.is_finite())
    {
        return Err(AnalysisError::invalid("observations", format!("non-finite temperature on {}", bad.date)));
    }
    Ok(())
}

fn observation_table(request: &AnalysisRequest) -> Result<Option<ObservationTable>> {
    if let Some(observations) = &request.observations {
        return Ok(Some(ObservationTable::from_observations(observations.iter().copied())));
    }
    match &request.weather_csv {
        Some(text) => ObservationTable::from_csv_str(text).map(Some),
        None => Ok(None),
    }
}

/// Runs one complete analysis. Everything is validated and resolved before
/// the simulation starts; no partial result is returned on error.
pub fn run(request: &AnalysisRequest, tables: &ReferenceTables) -> Result<AnalysisReport> {
    validate_request(request)?;

    let region = tables
        .region(&request.region)
        .ok_or_else(|| AnalysisError::UnknownRegion(request.region.clone()))?;
    let grade = tables
        .insulation_grade(&request.energy.insulation_grade)
        .ok_or_else(|| AnalysisError::UnknownInsulationGrade(request.energy.insulation_grade.clone()))?;
    let observations = observation_table(request)?;

    let config = SimulationConfig {
        target_temperature: request.energy.target_temperature,
        insulation_u_value: grade.u_value,
        energy_source: request.energy.energy_source,
        unit_fuel_price: request.energy.unit_fuel_price,
        heating_model: request.energy.heating_model,
        climate_scenario: request.energy.climate_scenario,
    };

    let geom = geometry::surface_area(&request.greenhouse);
    let (start, end) = (request.period.start, request.period.end);
    let dates = heating::period_dates(start, end)?;

    tracing::info!(
        "[ANALYSIS] Region: {} | {} .. {} ({} days) | Area: {:.1} m² | U: {} | {:?} / {:?}",
        region.name,
        start,
        end,
        dates.len(),
        geom.total_area,
        config.insulation_u_value,
        config.heating_model,
        config.climate_scenario
    );

    let provider = TemperatureProvider::new(region, config.climate_scenario, observations.as_ref(), dates.len());
    let heat = heating::simulate(geom.total_area, &config, start, end, &provider)?;
    let yields = revenue::allocate_winter(
        request.production.winter_total_yield_kg,
        request.production.winter_market_price,
        &dates,
    );

    let daily: Vec<DailyResult> = heat
        .days
        .iter()
        .zip(&yields)
        .map(|(h, y)| DailyResult {
            date: h.date,
            temperature_min: h.temperature.min,
            temperature_max: h.temperature.max,
            heating_hours_active: h.hours_active,
            heat_load: h.heat_load,
            fuel_units: h.fuel_units,
            fuel_cost: h.fuel_cost,
            yield_kg: y.yield_kg,
            revenue: y.revenue,
        })
        .collect();

    let winter_revenue: f64 = yields.iter().map(|y| y.revenue).sum();
    let depreciation = annual_depreciation(&request.investment);
    let winter_net_profit = winter_revenue - heat.total_fuel_cost - depreciation;
    let summer = revenue::summer(&request.production);

    if let Some(table) = &observations {
        if heat.observed_days < dates.len() {
            tracing::warn!(
                "Weather table covers {} of {} days ({} dates loaded); remaining days synthesized",
                heat.observed_days,
                dates.len(),
                table.len()
            );
        }
    }

    let house = &request.greenhouse;
    let summary = PeriodSummary {
        region: region.name.clone(),
        weather_source: if observations.is_some() { WeatherSource::Observed } else { WeatherSource::Synthesized },
        winter_start: start,
        winter_end: end,
        winter_days: daily.len() as u32,
        greenhouse_type: house.kind,
        span_count: house.span_count,
        length: house.length,
        width: house.width,
        side_height: house.side_height,
        ridge_height: house.ridge_height,
        wing_length: house.wing_length,
        roof_correction_factor: house.roof_correction_factor,
        surface_area: geom.total_area,
        u_value: config.insulation_u_value,
        target_temperature: config.target_temperature,
        energy_source: config.energy_source,
        unit_fuel_price: config.unit_fuel_price,
        average_heating_hours: heat.average_heating_hours,
        total_heating_hours: heat.total_heating_hours,
        winter_revenue,
        winter_fuel_cost: heat.total_fuel_cost,
        depreciation,
        winter_net_profit,
        summer_revenue: summer.revenue,
        summer_cost: summer.cost,
        summer_net_profit: summer.net_profit,
        annual_revenue: winter_revenue + summer.revenue,
        annual_net_profit: winter_net_profit + summer.net_profit,
    };

    tracing::info!(
        "[ANALYSIS] Avg heating: {:.1} h/day | Winter net: {:.0} | Annual net: {:.0}",
        summary.average_heating_hours,
        summary.winter_net_profit,
        summary.annual_net_profit
    );

    Ok(AnalysisReport { geometry: geom, summary, daily })
}
