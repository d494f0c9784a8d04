//! Multi-scale emotion ensemble. Combines the classifier capability with
//! heuristic visual features at several spatial scales, then discounts the
//! result by image quality, cross-scale agreement, and ensemble
//! completeness. Prefers reporting neutral over a false strong emotion.

pub mod config;
pub mod features;

use image::RgbImage;

pub use config::{EmotionConfig, ScaleKind, ScaleSpec};

use crate::capabilities::EmotionClassifier;
use crate::signals::quality::image_quality;
use crate::signals::region::{center_crop, horizontal_band};
use crate::signals::texture::grayscale;
use crate::types::EmotionalState;
use features::visual_feature_score;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_warn;

// Score cutoffs mapping the ensemble scalar to a label. Deliberately wide
// neutral band: only pronounced scores earn a non-neutral label.
const HAPPY_CUTOFF: f64 = 6.5;
const POSITIVE_NEUTRAL_CUTOFF: f64 = 3.0;
const AGGRESSIVE_CUTOFF: f64 = -1.0;
const STRESSED_CUTOFF: f64 = -2.5;
const SCARED_CUTOFF: f64 = -4.5;

/// Emotion estimate for one image: label plus confidence in [0, 1].
/// Without a classifier capability the estimate is neutral at 0.5.
pub fn analyze_emotion(
    image: &RgbImage,
    classifier: Option<&dyn EmotionClassifier>,
    config: &EmotionConfig,
) -> (EmotionalState, f64) {
    let Some(classifier) = classifier else {
        return (EmotionalState::Neutral, 0.5);
    };

    let gray = grayscale(image);
    let quality = image_quality(&gray);

    // One pass per non-degenerate scale.
    let mut scores = Vec::new();
    let mut confidences = Vec::new();
    let mut weights = Vec::new();
    for spec in &config.scales {
        let view;
        let region: &RgbImage = match spec.kind {
            ScaleKind::Original => image,
            ScaleKind::CenterZoom => {
                view = center_crop(image, config.center_crop_ratio);
                &view
            }
            ScaleKind::EyeBand => {
                view = horizontal_band(image, config.eye_band_top, config.eye_band_height);
                &view
            }
        };
        if region.width() == 0 || region.height() == 0 {
            continue;
        }
        let (score, confidence) = score_at_scale(region, classifier, spec, config);
        scores.push(score);
        confidences.push(confidence);
        weights.push(spec.weight);
    }

    if scores.is_empty() {
        return (EmotionalState::Neutral, 0.5);
    }

    // Weighted ensemble over the scales that actually ran; weights
    // renormalize so skipped scales don't shrink the result.
    let total_weight: f64 = weights.iter().sum();
    let final_score: f64 = scores
        .iter()
        .zip(&weights)
        .map(|(s, w)| s * w / total_weight)
        .sum();
    let final_confidence: f64 = confidences
        .iter()
        .zip(&weights)
        .map(|(c, w)| c * w / total_weight)
        .sum();

    let (label, base_confidence) = label_from_score(final_score, final_confidence);

    // Three multiplicative discounts: photo quality, cross-scale agreement,
    // and how much of the ensemble actually ran.
    let quality_factor = 0.7 + quality * 0.3;
    let consistency_factor = 1.0 - stddev(&scores) / 10.0;
    let completeness_factor = (scores.len() as f64 / config.scales.len().max(1) as f64).min(1.0);

    let adjusted = (base_confidence * quality_factor * consistency_factor * completeness_factor)
        .max(0.0);

    // Below the floor the label is not trustworthy: force neutral and keep
    // the confidence visibly low.
    if adjusted < config.neutral_floor {
        return (EmotionalState::Neutral, adjusted.min(config.neutral_cap));
    }

    (
        label,
        adjusted.clamp(config.confidence_min, config.confidence_max),
    )
}

/// Score one spatial scale: classifier mean-logit blended with the
/// heuristic feature score, confidence damped for narrow crops. A failed
/// classifier call contributes a flat (0.0, 0.5) instead of aborting the
/// ensemble.
fn score_at_scale(
    region: &RgbImage,
    classifier: &dyn EmotionClassifier,
    spec: &ScaleSpec,
    config: &EmotionConfig,
) -> (f64, f64) {
    let class_scores = match classifier.classify(region) {
        Ok(scores) => scores,
        Err(err) => {
            log_warn!("classifier failed at {:?} scale: {err}", spec.kind);
            return (0.0, 0.5);
        }
    };

    let model_score = class_scores.mean_logit() / config.logit_divisor;
    let visual_score = visual_feature_score(region);
    let score = config.model_weight * model_score + config.heuristic_weight * visual_score;

    let confidence = (class_scores.max_probability() * spec.damping).min(0.95);
    (score, confidence)
}

/// Map the ensemble scalar to a label. Per-label confidence grows linearly
/// with the distance past the cutoff, capped per label.
fn label_from_score(score: f64, confidence: f64) -> (EmotionalState, f64) {
    if score > HAPPY_CUTOFF {
        (
            EmotionalState::Happy,
            (confidence + (score - HAPPY_CUTOFF) * 0.02).min(0.95),
        )
    } else if score > POSITIVE_NEUTRAL_CUTOFF {
        (EmotionalState::Neutral, confidence.min(0.85))
    } else if score < SCARED_CUTOFF {
        (
            EmotionalState::Scared,
            (confidence + (SCARED_CUTOFF - score) * 0.02).min(0.92),
        )
    } else if score < STRESSED_CUTOFF {
        (
            EmotionalState::Stressed,
            (confidence + (STRESSED_CUTOFF - score) * 0.015).min(0.88),
        )
    } else if score < AGGRESSIVE_CUTOFF {
        (
            EmotionalState::Aggressive,
            (confidence + (AGGRESSIVE_CUTOFF - score) * 0.01).min(0.82),
        )
    } else {
        (EmotionalState::Neutral, confidence.min(0.80))
    }
}

fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::ClassScores;
    use anyhow::Result;
    use image::Rgb;

    /// Classifier stub returning fixed logits for every region.
    struct FixedClassifier {
        logits: Vec<f64>,
    }

    impl EmotionClassifier for FixedClassifier {
        fn classify(&self, _image: &RgbImage) -> Result<ClassScores> {
            Ok(ClassScores {
                logits: self.logits.clone(),
            })
        }
    }

    struct FailingClassifier;

    impl EmotionClassifier for FailingClassifier {
        fn classify(&self, _image: &RgbImage) -> Result<ClassScores> {
            anyhow::bail!("no model loaded")
        }
    }

    fn photo() -> RgbImage {
        RgbImage::from_fn(48, 48, |x, y| {
            Rgb([(x * 5) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
        })
    }

    #[test]
    fn missing_classifier_is_neutral_at_half_confidence() {
        let (label, confidence) = analyze_emotion(&photo(), None, &EmotionConfig::default());
        assert_eq!(label, EmotionalState::Neutral);
        assert_eq!(confidence, 0.5);
    }

    #[test]
    fn low_discounted_confidence_forces_neutral_below_cap() {
        // Near-uniform logits: max probability stays tiny, so every scale
        // reports weak confidence and the discounts push it under the floor.
        let classifier = FixedClassifier {
            logits: vec![0.1; 100],
        };
        let (label, confidence) =
            analyze_emotion(&photo(), Some(&classifier), &EmotionConfig::default());
        assert_eq!(label, EmotionalState::Neutral);
        assert!(confidence <= 0.60);
    }

    #[test]
    fn confident_result_is_clamped_into_reporting_band() {
        // One dominant logit: max probability ~1.0. Mean logit keeps the
        // score in the neutral band, but the confidence must land in
        // [0.65, 0.98] if it survives the discounts at all.
        let classifier = FixedClassifier {
            logits: vec![30.0, 0.0, 0.0],
        };
        let (_, confidence) =
            analyze_emotion(&photo(), Some(&classifier), &EmotionConfig::default());
        assert!(confidence <= 0.98);
        assert!(confidence <= 0.60 || confidence >= 0.65);
    }

    #[test]
    fn failing_classifier_still_returns_neutral_estimate() {
        let (label, confidence) =
            analyze_emotion(&photo(), Some(&FailingClassifier), &EmotionConfig::default());
        assert_eq!(label, EmotionalState::Neutral);
        assert!(confidence <= 0.60);
    }

    #[test]
    fn strong_positive_score_maps_to_happy() {
        let (label, confidence) = label_from_score(8.0, 0.9);
        assert_eq!(label, EmotionalState::Happy);
        assert!(confidence <= 0.95);
    }

    #[test]
    fn strong_negative_score_maps_to_scared() {
        let (label, _) = label_from_score(-6.0, 0.9);
        assert_eq!(label, EmotionalState::Scared);
        let (label, _) = label_from_score(-3.0, 0.9);
        assert_eq!(label, EmotionalState::Stressed);
        let (label, _) = label_from_score(-1.5, 0.9);
        assert_eq!(label, EmotionalState::Aggressive);
    }
}
