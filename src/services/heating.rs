//! ============================================================
//!  Heating Load & Fuel Simulator
//!
//!  Per day:
//!   1. Outdoor extremes  – from the temperature provider
//!   2. Heating hours     – hours below the set-point (fine) or a
//!                          fixed 14 h night (coarse)
//!   3. Heat load         – area × U × ΔT, summed over heating hours
//!   4. Fuel & cost       – load / (calorific value × efficiency)
//!
//!  Units are not converted rigorously: the constants are a consistent
//!  calibration for comparing configurations, not a physical model.
//! ============================================================

use chrono::NaiveDate;

use crate::error::{AnalysisError, Result};
use crate::models::analysis::{HeatingModel, SimulationConfig};
use crate::models::climate::{DailyTemperature, TemperatureSource};
use crate::services::climate::TemperatureProvider;
use crate::services::diurnal;

/// Heating hours assumed by the coarse model whenever the night is cold.
pub const COARSE_HEATING_HOURS: u32 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyHeating {
    pub date: NaiveDate,
    pub temperature: DailyTemperature,
    pub hours_active: u32,
    pub heat_load: f64,
    pub fuel_units: f64,
    pub fuel_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatingOutcome {
    pub days: Vec<DailyHeating>,
    pub total_fuel_cost: f64,
    pub total_heating_hours: u32,
    pub average_heating_hours: f64,
    /// Days whose extremes came from measurements
    pub observed_days: usize,
}

/// Inclusive list of dates in `[start, end]`. Requires `start < end`.
pub fn period_dates(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end <= start {
        return Err(AnalysisError::InvalidPeriod {
            start,
            end,
            reason: "end must be after start".to_string(),
        });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// (active hours, heat load) for one day.
pub fn daily_load(config: &SimulationConfig, area: f64, min: f64, max: f64) -> (u32, f64) {
    let target = config.target_temperature;
    let u = config.insulation_u_value;

    match config.heating_model {
        HeatingModel::CoarseFixedHours => {
            let deficit = (target - min).max(0.0);
            if deficit > 0.0 {
                (COARSE_HEATING_HOURS, area * u * deficit * COARSE_HEATING_HOURS as f64)
            } else {
                (0, 0.0)
            }
        }
        HeatingModel::FineHourly => {
            let mut hours = 0;
            let mut load = 0.0;
            for temp in diurnal::hourly_profile(min, max) {
                if temp < target {
                    load += area * u * (target - temp);
                    hours += 1;
                }
            }
            (hours, load)
        }
    }
}

/// Fuel units needed to deliver `heat_load`.
pub fn fuel_required(config: &SimulationConfig, heat_load: f64) -> f64 {
    let source = config.energy_source;
    heat_load / (source.calorific_value() * source.efficiency())
}

/// Runs the heating simulation over every date in `[start, end]`.
pub fn simulate(
    area: f64,
    config: &SimulationConfig,
    start: NaiveDate,
    end: NaiveDate,
    provider: &TemperatureProvider<'_>,
) -> Result<HeatingOutcome> {
    let dates = period_dates(start, end)?;

    let mut days = Vec::with_capacity(dates.len());
    let mut total_fuel_cost = 0.0;
    let mut total_heating_hours = 0u32;
    let mut observed_days = 0usize;

    for (i, date) in dates.into_iter().enumerate() {
        let temperature = provider.daily(date, i);
        if temperature.source == TemperatureSource::Observed {
            observed_days += 1;
        }

        let (hours_active, heat_load) = daily_load(config, area, temperature.min, temperature.max);
        let fuel_units = fuel_required(config, heat_load);
        let fuel_cost = fuel_units * config.unit_fuel_price;

        #[cfg(feature = "verbose_log")]
        tracing::debug!(
            "[HEATING] {} | Tmin {:.1} Tmax {:.1} ({:?}) | {} h | load {:.0} | cost {:.0}",
            date, temperature.min, temperature.max, temperature.source, hours_active, heat_load, fuel_cost
        );

        total_fuel_cost += fuel_cost;
        total_heating_hours += hours_active;
        days.push(DailyHeating {
            date,
            temperature,
            hours_active,
            heat_load,
            fuel_units,
            fuel_cost,
        });
    }

    let average_heating_hours = total_heating_hours as f64 / days.len().max(1) as f64;
    tracing::debug!(
        days = days.len(),
        observed_days,
        total_heating_hours,
        total_fuel_cost,
        "heating simulation finished"
    );

    Ok(HeatingOutcome {
        days,
        total_fuel_cost,
        total_heating_hours,
        average_heating_hours,
        observed_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{ClimateScenario, EnergySource};
    use crate::models::climate::{ClimateObservation, RegionProfile};
    use crate::services::climate::ObservationTable;
    use approx::assert_relative_eq;

    fn config(model: HeatingModel) -> SimulationConfig {
        SimulationConfig {
            target_temperature: 15.0,
            insulation_u_value: 4.5,
            energy_source: EnergySource::FuelOil,
            unit_fuel_price: 1100.0,
            heating_model: model,
            climate_scenario: ClimateScenario::Normal,
        }
    }

    fn region() -> RegionProfile {
        RegionProfile {
            name: "영암군".to_string(),
            alias: "yeongam".to_string(),
            base_temperature_offset: 2.0,
            seasonal_amplitude: 8.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_is_inclusive() {
        let dates = period_dates(date(2025, 11, 1), date(2026, 2, 28)).unwrap();
        assert_eq!(dates.len(), 120);
        assert_eq!(dates.first(), Some(&date(2025, 11, 1)));
        assert_eq!(dates.last(), Some(&date(2026, 2, 28)));
    }

    #[test]
    fn test_empty_or_reversed_period_is_rejected() {
        let d = date(2025, 11, 1);
        assert!(matches!(period_dates(d, d), Err(AnalysisError::InvalidPeriod { .. })));
        assert!(period_dates(d, date(2025, 10, 1)).is_err());
    }

    #[test]
    fn test_fine_hours_bounded() {
        let cfg = config(HeatingModel::FineHourly);
        for (lo, hi) in [(-10.0, 0.0), (10.0, 20.0), (14.0, 16.0), (16.0, 25.0), (-30.0, 40.0)] {
            let (hours, load) = daily_load(&cfg, 500.0, lo, hi);
            assert!(hours <= 24);
            assert!(load >= 0.0);
        }
        assert_eq!(daily_load(&cfg, 500.0, -10.0, 0.0).0, 24);
        assert_eq!(daily_load(&cfg, 500.0, 16.0, 25.0), (0, 0.0));
    }

    #[test]
    fn test_coarse_hours_are_zero_or_fourteen() {
        let cfg = config(HeatingModel::CoarseFixedHours);
        for lo in [-10.0, 0.0, 14.9, 15.0, 20.0] {
            let (hours, _) = daily_load(&cfg, 500.0, lo, lo + 10.0);
            assert!(hours == 0 || hours == COARSE_HEATING_HOURS);
        }
        let (hours, load) = daily_load(&cfg, 100.0, 5.0, 15.0);
        assert_eq!(hours, 14);
        assert_relative_eq!(load, 100.0 * 4.5 * 10.0 * 14.0);
        assert_eq!(daily_load(&cfg, 100.0, 15.0, 25.0), (0, 0.0));
    }

    #[test]
    fn test_coarse_hours_do_not_exceed_fine_for_realistic_swing() {
        let fine = config(HeatingModel::FineHourly);
        let coarse = config(HeatingModel::CoarseFixedHours);
        for lo in [-5.0, 0.0, 5.0] {
            let (coarse_hours, _) = daily_load(&coarse, 500.0, lo, lo + 10.0);
            let (fine_hours, _) = daily_load(&fine, 500.0, lo, lo + 10.0);
            assert!(coarse_hours <= fine_hours, "lo={}: coarse {} fine {}", lo, coarse_hours, fine_hours);
        }
    }

    #[test]
    fn test_fuel_conversion_constants() {
        let mut cfg = config(HeatingModel::FineHourly);
        assert_relative_eq!(fuel_required(&cfg, 8500.0 * 0.85), 1.0);
        cfg.energy_source = EnergySource::Electricity;
        assert_relative_eq!(fuel_required(&cfg, 860.0 * 0.98), 1.0);
    }

    #[test]
    fn test_identical_observed_days_average_equals_each_day_hours() {
        let region = region();
        let cfg = config(HeatingModel::FineHourly);
        let start = date(2025, 12, 1);
        let end = date(2025, 12, 2);
        let table = ObservationTable::from_observations([
            ClimateObservation { date: start, temperature_min: 3.0, temperature_max: 13.0 },
            ClimateObservation { date: end, temperature_min: 3.0, temperature_max: 13.0 },
        ]);
        let provider = TemperatureProvider::new(&region, ClimateScenario::Normal, Some(&table), 2);

        let outcome = simulate(568.4, &cfg, start, end, &provider).unwrap();
        assert_eq!(outcome.days.len(), 2);
        assert_eq!(outcome.observed_days, 2);
        assert_relative_eq!(outcome.average_heating_hours, outcome.days[0].hours_active as f64);
        assert_eq!(outcome.days[0].hours_active, 24);
        assert_eq!(outcome.days[0].hours_active, outcome.days[1].hours_active);
    }

    #[test]
    fn test_one_day_hours_count_profile_hours_below_target() {
        let cfg = config(HeatingModel::FineHourly);
        let (hours, load) = daily_load(&cfg, 568.4, 8.0, 18.0);

        let profile = diurnal::hourly_profile(8.0, 18.0);
        let cold: Vec<f64> = profile.iter().copied().filter(|t| *t < 15.0).collect();
        assert_eq!(hours as usize, cold.len());
        assert!(hours > 0 && hours < 24);
        assert_relative_eq!(load, cold.iter().map(|t| 568.4 * 4.5 * (15.0 - t)).sum::<f64>(), max_relative = 1e-12);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let region = region();
        let cfg = config(HeatingModel::FineHourly);
        let provider = TemperatureProvider::new(&region, ClimateScenario::Normal, None, 120);
        let a = simulate(568.4, &cfg, date(2025, 11, 1), date(2026, 2, 28), &provider).unwrap();
        let b = simulate(568.4, &cfg, date(2025, 11, 1), date(2026, 2, 28), &provider).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.observed_days, 0);
        assert_relative_eq!(
            a.total_fuel_cost,
            a.days.iter().map(|d| d.fuel_cost).sum::<f64>(),
            max_relative = 1e-12
        );
    }
}
