//! Fixed reference data: regional seasonal profiles and insulation grades.
//!
//! Tables are built once at startup and shared read-only.

use crate::models::climate::{InsulationGrade, RegionProfile};

// (name, alias, base offset °C, seasonal amplitude °C)
const REGIONS: &[(&str, &str, f64, f64)] = &[
    ("영암군", "yeongam", 2.0, 8.0),
    ("해남군", "haenam", 2.2, 7.8),
    ("목포시", "mokpo", 2.5, 7.5),
    ("신안군", "sinan", 3.0, 7.0),
    ("진도군", "jindo", 3.2, 6.8),
    ("완도군", "wando", 3.5, 6.5),
    ("무안군", "muan", 1.5, 8.2),
    ("강진군", "gangjin", 2.0, 8.0),
    ("장흥군", "jangheung", 1.8, 8.2),
    ("여수시", "yeosu", 3.0, 7.0),
    ("순천시", "suncheon", 1.5, 8.5),
    ("광양시", "gwangyang", 2.0, 8.0),
    ("고흥군", "goheung", 2.8, 7.2),
    ("보성군", "boseong", 1.0, 8.5),
    ("나주시", "naju", 0.5, 9.0),
    ("담양군", "damyang", -0.5, 9.5),
    ("곡성군", "gokseong", -1.0, 10.0),
    ("구례군", "gurye", -0.5, 9.8),
    ("화순군", "hwasun", -1.0, 9.8),
    ("장성군", "jangseong", -0.5, 9.5),
    ("함평군", "hampyeong", 1.0, 8.8),
    ("영광군", "yeonggwang", 1.0, 8.8),
];

const INSULATION_GRADES: &[(&str, &str, f64)] = &[
    ("single_vinyl", "Single-layer vinyl film", 5.5),
    ("double_vinyl", "Double-layer vinyl film", 4.5),
    ("multilayer_curtain", "Multi-layer thermal curtain", 2.0),
    ("high_efficiency", "High-efficiency insulation package", 1.5),
];

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub regions: Vec<RegionProfile>,
    pub insulation_grades: Vec<InsulationGrade>,
}

impl ReferenceTables {
    pub fn builtin() -> Self {
        let regions = REGIONS
            .iter()
            .map(|&(name, alias, base, amp)| RegionProfile {
                name: name.to_string(),
                alias: alias.to_string(),
                base_temperature_offset: base,
                seasonal_amplitude: amp,
            })
            .collect();
        let insulation_grades = INSULATION_GRADES
            .iter()
            .map(|&(label, description, u_value)| InsulationGrade {
                label: label.to_string(),
                description: description.to_string(),
                u_value,
            })
            .collect();
        Self { regions, insulation_grades }
    }

    /// Exact match on the Korean name, or case-insensitive match on the alias.
    pub fn region(&self, key: &str) -> Option<&RegionProfile> {
        let key = key.trim();
        self.regions
            .iter()
            .find(|r| r.name == key || r.alias.eq_ignore_ascii_case(key))
    }

    pub fn insulation_grade(&self, label: &str) -> Option<&InsulationGrade> {
        let label = label.trim();
        self.insulation_grades
            .iter()
            .find(|g| g.label.eq_ignore_ascii_case(label))
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}
