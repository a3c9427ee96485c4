//! ============================================================
//!  Greenhouse Envelope Estimator
//!
//!  Approximates the heat-losing surface of a single or multi-span
//!  house from its structural dimensions:
//!   1. Sidewall profile – curved wall from ground to eave modelled
//!                         as a circular arc, vertical at the ground
//!   2. Sidewalls        – the two outer walls only
//!   3. Gable ends       – rectangle + triangle across the total width
//!   4. Roof             – two slopes (single) or flat footprint ×
//!                         correction factor (multi-span)
//! ============================================================

use std::f64::consts::PI;

use crate::error::{AnalysisError, Result};
use crate::models::greenhouse::{
    GreenhouseSpec, GreenhouseType, SurfaceAreaResult, ROOF_CORRECTION_RANGE,
};

/// Length of the curved sidewall from ground to eave.
///
/// * `side_height` – eave height Hs
/// * `wing_length` – horizontal splay d of one side at ground level
///
/// The arc starts tangent to the vertical at the ground contact point. A
/// non-positive splay, or a degenerate arc, falls back to a straight wall.
pub fn side_arc_length(side_height: f64, wing_length: f64) -> f64 {
    if wing_length <= 0.0 {
        return side_height;
    }

    let radius = (wing_length.powi(2) + side_height.powi(2)) / (2.0 * wing_length);
    let alpha = side_height.atan2(wing_length - radius);
    let delta = PI - alpha;
    let arc = radius * delta;

    if !arc.is_finite() || arc <= 0.0 {
        tracing::debug!(side_height, wing_length, "degenerate sidewall arc, using straight wall");
        return side_height;
    }
    arc
}

/// Envelope areas for `spec`. Expects a spec that passed [`validate`].
pub fn surface_area(spec: &GreenhouseSpec) -> SurfaceAreaResult {
    let span_count = spec.span_count.max(1) as f64;
    let roof_height = (spec.ridge_height - spec.side_height).max(0.0);
    let total_width = spec.width * span_count;

    let side_arc = side_arc_length(spec.side_height, spec.wing_length);

    // Outer walls only; internal gutters between spans lose no heat outward.
    let side_area = 2.0 * spec.length * side_arc;

    let one_end_wall = total_width * spec.side_height + 0.5 * total_width * roof_height;
    let end_wall_area = 2.0 * one_end_wall;

    let roof_area = match spec.kind {
        GreenhouseType::Single => {
            let slant = ((spec.width / 2.0).powi(2) + roof_height.powi(2)).sqrt();
            2.0 * slant * spec.length
        }
        GreenhouseType::MultiSpan => spec.roof_correction_factor * spec.length * total_width,
    };

    SurfaceAreaResult {
        total_area: side_area + end_wall_area + roof_area,
        roof_area,
        side_area,
        end_wall_area,
        total_width,
        side_arc_length: side_arc,
        roof_height,
        floor_area: spec.width * spec.length * span_count,
    }
}

/// Rejects dimensions the estimator cannot meaningfully handle.
pub fn validate(spec: &GreenhouseSpec) -> Result<()> {
    let fields = [
        ("width", spec.width),
        ("length", spec.length),
        ("side_height", spec.side_height),
        ("ridge_height", spec.ridge_height),
        ("wing_length", spec.wing_length),
        ("roof_correction_factor", spec.roof_correction_factor),
    ];
    if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(AnalysisError::InvalidGreenhouse(format!("{} must be a finite number", name)));
    }

    for (name, value) in [("width", spec.width), ("length", spec.length), ("side_height", spec.side_height)] {
        if value <= 0.0 {
            return Err(AnalysisError::InvalidGreenhouse(format!("{} must be positive, got {}", name, value)));
        }
    }
    if spec.ridge_height <= spec.side_height {
        return Err(AnalysisError::InvalidGreenhouse(format!(
            "ridge_height ({}) must exceed side_height ({})",
            spec.ridge_height, spec.side_height
        )));
    }
    if spec.span_count < 1 {
        return Err(AnalysisError::InvalidGreenhouse("span_count must be at least 1".to_string()));
    }
    if spec.wing_length < 0.0 {
        return Err(AnalysisError::InvalidGreenhouse(format!(
            "wing_length must not be negative, got {}",
            spec.wing_length
        )));
    }
    if spec.kind == GreenhouseType::MultiSpan {
        let (lo, hi) = ROOF_CORRECTION_RANGE;
        if !(lo..=hi).contains(&spec.roof_correction_factor) {
            return Err(AnalysisError::InvalidGreenhouse(format!(
                "roof_correction_factor must be within [{}, {}], got {}",
                lo, hi, spec.roof_correction_factor
            )));
        }
    }
    let total = surface_area(spec).total_area;
    if !total.is_finite() {
        return Err(AnalysisError::InvalidGreenhouse(format!(
            "dimensions too large: surface area evaluates to {}",
            total
        )));
    }
    Ok(())
}
