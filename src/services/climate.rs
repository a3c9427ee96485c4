//! Daily outdoor temperature provider.
//!
//! Measured extremes are used where they exist. Every other date gets a
//! deterministic approximation: a half-sine cold trough spanning the analysis
//! window, scaled by the region's seasonal amplitude. The approximation is
//! only meaningful for a single contiguous cold-season window.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AnalysisError, Result};
use crate::models::analysis::ClimateScenario;
use crate::models::climate::{ClimateObservation, DailyTemperature, RegionProfile, TemperatureSource};

/// Extra cooling applied to synthesized minima under the conservative scenario (°C).
pub const CONSERVATIVE_COLD_MARGIN: f64 = 3.0;
/// Fixed day/night swing for synthesized days (°C).
pub const SYNTHETIC_DIURNAL_SWING: f64 = 10.0;

const REQUIRED_COLUMNS: [&str; 3] = ["date", "tmin", "tmax"];

/// Date spellings found in common weather exports, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];
/// Timestamp spellings; the time of day is discarded.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ─── Observation table ───────────────────────────────────────────────────────

/// Measured daily extremes keyed by date. Later entries for the same date
/// replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    by_date: BTreeMap<NaiveDate, ClimateObservation>,
}

impl ObservationTable {
    pub fn from_observations(observations: impl IntoIterator<Item = ClimateObservation>) -> Self {
        let mut by_date = BTreeMap::new();
        for obs in observations {
            by_date.insert(obs.date, obs);
        }
        Self { by_date }
    }

    /// Parses a `date,tmin,tmax` table. Column order is free and extra
    /// columns are ignored.
    ///
    /// A missing required column or an unparsable date rejects the whole
    /// table; a row whose temperatures do not parse as finite numbers is
    /// dropped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h.trim_start_matches('\u{feff}') == name);
        let [date_idx, min_idx, max_idx] = REQUIRED_COLUMNS.map(position);
        let (Some(date_idx), Some(min_idx), Some(max_idx)) = (date_idx, min_idx, max_idx) else {
            let missing = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|&c| position(c).is_none())
                .collect();
            return Err(AnalysisError::MissingColumns { missing });
        };

        let mut observations = Vec::new();
        let mut dropped = 0usize;
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            // Header is line 1
            let row = i + 2;

            let raw_date = record.get(date_idx).unwrap_or_default();
            let date = parse_observation_date(raw_date).ok_or_else(|| AnalysisError::InvalidDate {
                row,
                value: raw_date.to_string(),
            })?;

            let parse_temp = |idx: usize| {
                record
                    .get(idx)
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            };
            match (parse_temp(min_idx), parse_temp(max_idx)) {
                (Some(temperature_min), Some(temperature_max)) => observations.push(ClimateObservation {
                    date,
                    temperature_min,
                    temperature_max,
                }),
                _ => {
                    dropped += 1;
                    tracing::warn!(row, date = %date, "dropping weather row with unparsable temperature");
                }
            }
        }

        let table = Self::from_observations(observations);
        tracing::info!("Loaded weather table: {} dates ({} rows dropped)", table.len(), dropped);
        Ok(table)
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ClimateObservation> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

// ─── Provider ────────────────────────────────────────────────────────────────

pub struct TemperatureProvider<'a> {
    observations: Option<&'a ObservationTable>,
    base_offset: f64,
    amplitude: f64,
    scenario: ClimateScenario,
    period_days: usize,
}

impl<'a> TemperatureProvider<'a> {
    pub fn new(
        region: &RegionProfile,
        scenario: ClimateScenario,
        observations: Option<&'a ObservationTable>,
        period_days: usize,
    ) -> Self {
        Self {
            observations,
            base_offset: region.base_temperature_offset,
            amplitude: region.seasonal_amplitude,
            scenario,
            period_days,
        }
    }

    /// (min, max) for `date`, the `day_index`-th day of the period.
    pub fn daily(&self, date: NaiveDate, day_index: usize) -> DailyTemperature {
        match self.observations.and_then(|t| t.get(date)) {
            Some(obs) => DailyTemperature {
                min: obs.temperature_min,
                max: obs.temperature_max,
                source: TemperatureSource::Observed,
            },
            None => {
                let min = self.synthesized_min(day_index);
                DailyTemperature {
                    min,
                    max: min + SYNTHETIC_DIURNAL_SWING,
                    source: TemperatureSource::Synthesized,
                }
            }
        }
    }

    /// Half-sine trough: equal to the base offset at both ends of the period
    /// and coldest at the midpoint.
    pub fn synthesized_min(&self, day_index: usize) -> f64 {
        let denom = self.period_days.saturating_sub(1).max(1) as f64;
        let seasonal = self.base_offset - self.amplitude * (PI * day_index as f64 / denom).sin();
        match self.scenario {
            ClimateScenario::Normal => seasonal,
            ClimateScenario::ConservativeCold => seasonal - CONSERVATIVE_COLD_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

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
    fn test_trough_lands_mid_period() {
        let region = region();
        let provider = TemperatureProvider::new(&region, ClimateScenario::Normal, None, 120);

        assert_relative_eq!(provider.synthesized_min(0), 2.0);
        assert_relative_eq!(provider.synthesized_min(119), 2.0, epsilon = 1e-9);

        let mid = provider.synthesized_min(59);
        assert_relative_eq!(mid, 2.0 - 8.0 * (PI * 59.0 / 119.0).sin());
        assert!(mid < -5.98 && mid > -6.0, "mid-period minimum was {:.3}", mid);
        for i in 0..120 {
            assert!(provider.synthesized_min(i) >= mid - 1e-9);
        }
    }

    #[test]
    fn test_conservative_scenario_shifts_synthesized_days() {
        let region = region();
        let normal = TemperatureProvider::new(&region, ClimateScenario::Normal, None, 30);
        let cold = TemperatureProvider::new(&region, ClimateScenario::ConservativeCold, None, 30);
        let d = date(2025, 12, 1);

        let n = normal.daily(d, 10);
        let c = cold.daily(d, 10);
        assert_relative_eq!(n.min - c.min, CONSERVATIVE_COLD_MARGIN);
        assert_relative_eq!(c.max - c.min, SYNTHETIC_DIURNAL_SWING);
        assert_eq!(c.source, TemperatureSource::Synthesized);
    }

    #[test]
    fn test_observation_takes_precedence() {
        let region = region();
        let table = ObservationTable::from_observations([ClimateObservation {
            date: date(2025, 11, 2),
            temperature_min: -3.0,
            temperature_max: 4.5,
        }]);
        let provider = TemperatureProvider::new(&region, ClimateScenario::ConservativeCold, Some(&table), 10);

        let observed = provider.daily(date(2025, 11, 2), 1);
        assert_eq!(observed.source, TemperatureSource::Observed);
        assert_eq!((observed.min, observed.max), (-3.0, 4.5));

        let fallback = provider.daily(date(2025, 11, 3), 2);
        assert_eq!(fallback.source, TemperatureSource::Synthesized);
    }

    #[test]
    fn test_single_day_period_does_not_divide_by_zero() {
        let region = region();
        let provider = TemperatureProvider::new(&region, ClimateScenario::Normal, None, 1);
        assert_relative_eq!(provider.synthesized_min(0), 2.0);
    }

    #[test]
    fn test_csv_loader_drops_bad_rows_and_keeps_last_duplicate() {
        let csv = "station,tmax,date,tmin\n\
                   A,8.0,2025-11-01,-1.0\n\
                   A,abc,2025-11-02,0.0\n\
                   A,9.0,2025-11-03,\n\
                   A,7.0,2025-11-01,-2.5\n";
        let table = ObservationTable::from_csv_str(csv).expect("valid table");
        assert_eq!(table.len(), 1);
        let obs = table.get(date(2025, 11, 1)).unwrap();
        assert_eq!((obs.temperature_min, obs.temperature_max), (-2.5, 7.0));
        assert!(table.get(date(2025, 11, 2)).is_none());
    }

    #[test]
    fn test_csv_loader_rejects_missing_columns() {
        let err = ObservationTable::from_csv_str("date,tmin\n2025-11-01,1.0\n").unwrap_err();
        match err {
            AnalysisError::MissingColumns { missing } => assert_eq!(missing, vec!["tmax"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_loader_rejects_bad_date() {
        let err = ObservationTable::from_csv_str("date,tmin,tmax\n2025-11-01,1,5\n11/02/2025,1,5\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidDate { row: 3, .. }));

        let err = ObservationTable::from_csv_str("date,tmin,tmax\n2025-11-01,1,5\nyesterday,1,5\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidDate { row: 3, .. }));
    }

    #[test]
    fn test_csv_loader_accepts_common_date_spellings() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        for raw in ["2025/11/01", "2025.11.01", "20251101", "2025-11-01 00:00:00", "2025-11-01T06:30"] {
            let table = ObservationTable::from_csv_str(&format!("date,tmin,tmax\n{},1,5\n", raw)).unwrap();
            assert_eq!(table.len(), 1, "{}", raw);
            assert_eq!(table.get(expected).map(|o| o.temperature_max), Some(5.0), "{}", raw);
        }

        let table = ObservationTable::from_csv_str(
            "date,tmin,tmax\n2025/11/01,1,5\n2025/11/02,2,6\n2025-11-03 00:00:00,3,7\n",
        )
        .unwrap();
        assert_eq!(table.len(), 3);
    }
}
