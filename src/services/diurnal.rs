use std::f64::consts::PI;

/// Hour of the daily temperature maximum (local solar time).
pub const PEAK_HOUR: f64 = 14.0;

/// Estimated outdoor temperature at `hour` ∈ [0, 24) for a day with the given
/// extremes. Cosine curve: maximum at 14:00, minimum at 02:00.
#[inline]
pub fn temperature_at(min: f64, max: f64, hour: f64) -> f64 {
    let phase = (hour - PEAK_HOUR) * 2.0 * PI / 24.0;
    (min + max) / 2.0 + (max - min) / 2.0 * phase.cos()
}

/// The 24 whole-hour samples of [`temperature_at`], starting at 00:00.
pub fn hourly_profile(min: f64, max: f64) -> [f64; 24] {
    std::array::from_fn(|h| temperature_at(min, max, h as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extremes_at_peak_and_trough() {
        assert_relative_eq!(temperature_at(-2.0, 8.0, 14.0), 8.0);
        assert_relative_eq!(temperature_at(-2.0, 8.0, 2.0), -2.0, epsilon = 1e-12);
        assert_relative_eq!(temperature_at(-2.0, 8.0, 8.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_profile_stays_within_extremes() {
        let profile = hourly_profile(1.5, 11.5);
        for t in profile {
            assert!(t >= 1.5 - 1e-9 && t <= 11.5 + 1e-9);
        }
        assert_eq!(profile[14], 11.5);
    }
}
