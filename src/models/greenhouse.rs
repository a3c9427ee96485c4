use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_span_count() -> u32 { 1 }
fn default_roof_correction() -> f64 { DEFAULT_ROOF_CORRECTION }

/// Default multiplier applied to the flat roof footprint of multi-span houses.
pub const DEFAULT_ROOF_CORRECTION: f64 = 1.12;
/// Accepted range for the multi-span roof correction factor.
pub const ROOF_CORRECTION_RANGE: (f64, f64) = (1.05, 1.20);

// ─── Structural input ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GreenhouseType {
    /// Free-standing single bay with a gable roof
    Single,
    /// Several bays connected side by side
    MultiSpan,
}

/// Structural dimensions of a greenhouse, all lengths in metres.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GreenhouseSpec {
    #[serde(rename = "type")]
    pub kind: GreenhouseType,
    #[serde(default = "default_span_count")]
    pub span_count: u32,
    /// Width of one span
    pub width: f64,
    pub length: f64,
    /// Eave height (Hs)
    pub side_height: f64,
    /// Ridge height (Hr), must exceed `side_height`
    pub ridge_height: f64,
    /// Horizontal splay of one curved sidewall at ground level; 0 = vertical wall
    #[serde(default)]
    pub wing_length: f64,
    #[serde(default = "default_roof_correction")]
    pub roof_correction_factor: f64,
}

// ─── Derived envelope ────────────────────────────────────────────────────────

/// Envelope areas derived from a [`GreenhouseSpec`]. Areas in m², lengths in m.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SurfaceAreaResult {
    pub total_area: f64,
    pub roof_area: f64,
    pub side_area: f64,
    pub end_wall_area: f64,
    pub total_width: f64,
    pub side_arc_length: f64,
    pub roof_height: f64,
    /// Ground footprint, reported for reference only
    pub floor_area: f64,
}
