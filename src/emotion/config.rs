/// One spatial scale of the emotion ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    /// Full frame.
    Original,
    /// Centered crop — a zoomed view of the face region.
    CenterZoom,
    /// Upper horizontal band where the eyes sit.
    EyeBand,
}

/// Scale descriptor paired with its ensemble weight and the damping applied
/// to the classifier's confidence at that scale (narrower crops are less
/// reliable). Degenerate scales are skipped and the remaining weights
/// renormalized, so the list length never has to match anything.
#[derive(Debug, Clone, Copy)]
pub struct ScaleSpec {
    pub kind: ScaleKind,
    pub weight: f64,
    pub damping: f64,
}

/// Tunable knobs of the emotion ensemble, injected at construction.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    /// Ordered scale passes with weights and per-scale confidence damping.
    pub scales: Vec<ScaleSpec>,

    /// Blend of classifier score vs. heuristic visual-feature score.
    pub model_weight: f64,
    pub heuristic_weight: f64,

    /// Divisor normalizing the classifier's mean logit into score space.
    pub logit_divisor: f64,

    /// Below this discounted confidence the label is forced to neutral.
    pub neutral_floor: f64,
    /// Confidence cap reported alongside a forced-neutral label.
    pub neutral_cap: f64,

    /// Clamp range for a confident (non-forced) result.
    pub confidence_min: f64,
    pub confidence_max: f64,

    /// Center crop retains this share of each dimension.
    pub center_crop_ratio: f64,
    /// Eye band: vertical start and span as shares of image height.
    pub eye_band_top: f64,
    pub eye_band_height: f64,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            scales: vec![
                ScaleSpec { kind: ScaleKind::Original, weight: 0.40, damping: 1.0 },
                ScaleSpec { kind: ScaleKind::CenterZoom, weight: 0.35, damping: 0.85 },
                ScaleSpec { kind: ScaleKind::EyeBand, weight: 0.25, damping: 0.80 },
            ],
            model_weight: 0.6,
            heuristic_weight: 0.4,
            logit_divisor: 10.0,
            neutral_floor: 0.65,
            neutral_cap: 0.60,
            confidence_min: 0.65,
            confidence_max: 0.98,
            center_crop_ratio: 0.67,
            eye_band_top: 0.2,
            eye_band_height: 0.4,
        }
    }
}
