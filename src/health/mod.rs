//! Visible-condition detection. Every category — skin, eye, and general
//! body checks — is a parameterization of the same indicator/threshold
//! voting procedure in [`cross_validate`], never a bespoke algorithm.

pub mod body;
pub mod config;
pub mod cross_validate;
pub mod eye;
pub mod skin;

use image::RgbImage;

pub use config::HealthConfig;
pub use cross_validate::{cross_validate, CrossValidation, IndicatorSet, ThresholdSet};

use crate::types::HealthFinding;

/// Run every detector category over one image. Detector order is fixed
/// (skin, eye, general), so output order is deterministic.
pub fn detect_health_findings(image: &RgbImage, config: &HealthConfig) -> Vec<HealthFinding> {
    let mut findings = Vec::new();
    if let Some(finding) = skin::detect_skin_condition(image, config) {
        findings.push(finding);
    }
    findings.extend(eye::detect_eye_conditions(image, config));
    findings.extend(body::detect_general_conditions(image, config));
    findings
}
