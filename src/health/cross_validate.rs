use std::collections::BTreeMap;

/// Named scalar measurements from one detection pass. Built fresh per call;
/// never shared between detectors.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    values: BTreeMap<String, f64>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f64) -> &mut Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<const N: usize> From<[(&str, f64); N]> for IndicatorSet {
    fn from(pairs: [(&str, f64); N]) -> Self {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value);
        }
        set
    }
}

/// Named minimum values an indicator must exceed to count as passed.
/// Only names shared with the paired `IndicatorSet` are ever scored.
#[derive(Debug, Clone, Default)]
pub struct ThresholdSet {
    values: BTreeMap<String, f64>,
}

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: f64) -> &mut Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ThresholdSet {
    fn from(pairs: [(&str, f64); N]) -> Self {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value);
        }
        set
    }
}

/// Outcome of one indicator/threshold vote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossValidation {
    pub detected: bool,
    pub confidence: f64,
    pub pass_ratio: f64,
}

impl CrossValidation {
    pub const NONE: CrossValidation = CrossValidation {
        detected: false,
        confidence: 0.0,
        pass_ratio: 0.0,
    };
}

/// Fraction of shared indicators that must pass before anything is detected.
/// A single strong signal can never carry a diagnosis alone.
const MIN_PASS_RATIO: f64 = 0.6;

/// Per-indicator and final confidence cap.
const CONFIDENCE_CAP: f64 = 0.95;

/// Vote every indicator against its paired threshold.
///
/// An indicator passes when its value strictly exceeds the threshold; its
/// confidence contribution scales with the overshoot ratio. Detection
/// requires at least 60% of shared indicators to pass, and the final
/// confidence is the mean passed-indicator confidence weighted by the pass
/// ratio. No shared names means no detection, confidence 0.
pub fn cross_validate(indicators: &IndicatorSet, thresholds: &ThresholdSet) -> CrossValidation {
    let mut shared = 0usize;
    let mut passed = 0usize;
    let mut confidence_scores = Vec::new();

    for (name, value) in indicators.iter() {
        let Some(threshold) = thresholds.get(name) else {
            continue;
        };
        shared += 1;
        if value > threshold {
            passed += 1;
            let overshoot = value / threshold.max(0.1);
            confidence_scores.push((overshoot / 2.0).min(CONFIDENCE_CAP));
        }
    }

    if shared == 0 {
        return CrossValidation::NONE;
    }

    let pass_ratio = passed as f64 / shared as f64;
    let detected = pass_ratio >= MIN_PASS_RATIO;

    let confidence = if confidence_scores.is_empty() {
        0.0
    } else {
        let avg = confidence_scores.iter().sum::<f64>() / confidence_scores.len() as f64;
        (avg * (0.5 + 0.5 * pass_ratio)).min(CONFIDENCE_CAP)
    };

    CrossValidation {
        detected,
        confidence,
        pass_ratio,
    }
}
