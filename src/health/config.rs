use super::cross_validate::ThresholdSet;

/// Threshold tables and confidence floors for every health category,
/// injected at construction so tests can substitute tables without
/// process-wide side effects.
///
/// The floors are asymmetric on purpose: a skin misdiagnosis carries a
/// higher false-positive cost, so skin findings must clear 0.85 while the
/// other categories clear 0.70. Values are carried as-is from field tuning.
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Minimum connected-region area (px²) before a region counts at all.
    pub significant_region_area: f64,
    /// Skin analysis runs only when this many significant red or dark
    /// regions exist.
    pub min_skin_regions: usize,

    /// Reporting floor for skin findings.
    pub skin_floor: f64,
    /// Reporting floor for every other category.
    pub category_floor: f64,

    pub skin: ThresholdSet,

    pub bacterial_conjunctivitis: ThresholdSet,
    pub viral_eye_infection: ThresholdSet,
    pub eye_inflammation: ThresholdSet,
    pub cataracts: ThresholdSet,

    pub dehydration: ThresholdSet,
    pub wound: ThresholdSet,
    pub malnutrition: ThresholdSet,
    pub infection: ThresholdSet,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            significant_region_area: 50.0,
            min_skin_regions: 3,
            skin_floor: 0.85,
            category_floor: 0.70,
            skin: ThresholdSet::from([
                ("red_percentage", 8.0),
                ("inflammation_score", 12.0),
                ("dark_spots", 15.0),
                ("texture_variance", 60.0),
                ("red_regions", 3.0),
                ("dark_regions", 3.0),
            ]),
            bacterial_conjunctivitis: ThresholdSet::from([
                ("green_discharge_pct", 1.5),
                ("discharge_total_pct", 2.0),
            ]),
            viral_eye_infection: ThresholdSet::from([
                ("yellow_discharge_pct", 1.2),
                ("discharge_total_pct", 1.8),
            ]),
            eye_inflammation: ThresholdSet::from([
                ("redness_pct", 4.0),
                ("red_region_count", 1.0),
            ]),
            cataracts: ThresholdSet::from([
                ("clarity_deficit", 5.0),
                ("pallor_pct", 1.0),
            ]),
            dehydration: ThresholdSet::from([
                ("socket_shadow", 30.0),
                ("texture_flatness", 10.0),
            ]),
            wound: ThresholdSet::from([
                ("blood_pct", 2.0),
                ("scab_coverage_pct", 15.0),
            ]),
            malnutrition: ThresholdSet::from([
                ("bone_edge_fraction", 0.15),
                ("body_contrast", 40.0),
            ]),
            infection: ThresholdSet::from([
                ("discharge_pct", 1.5),
                ("discharge_regions", 1.0),
            ]),
        }
    }
}
