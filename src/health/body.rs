use image::RgbImage;

use crate::signals::color::{blood_mask, dark_wound_mask, rgb_in_range, RgbRange};
use crate::signals::region::upper_fraction;
use crate::signals::texture::{
    brightness_stddev, grayscale, laplacian_variance, mean_brightness, strong_edge_fraction,
};
use crate::types::HealthFinding;

use super::config::HealthConfig;
use super::cross_validate::{cross_validate, IndicatorSet};

const PUS_YELLOW: RgbRange = RgbRange { lo: [140, 120, 70], hi: [200, 180, 130] };
const PUS_GREEN: RgbRange = RgbRange { lo: [90, 130, 70], hi: [150, 200, 130] };

/// Sobel magnitude above which a pixel counts as a hard edge (visible bone
/// structure shows as dense hard edges).
const BONE_EDGE_MAGNITUDE: f64 = 100.0;

/// General body-condition checks: dehydration, open wounds, malnutrition,
/// and discharge-type infection. Each is one cross-validator
/// parameterization over its own indicator set.
pub fn detect_general_conditions(image: &RgbImage, config: &HealthConfig) -> Vec<HealthFinding> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let gray = grayscale(image);
    let mut findings = Vec::new();

    // Dehydration: dark sunken eye sockets in the upper quarter plus a
    // flat, dried-out surface texture. Both must agree.
    let socket_region = grayscale(&upper_fraction(image, 0.25));
    let socket_brightness = mean_brightness(&socket_region);
    let dehydration = cross_validate(
        &IndicatorSet::from([
            ("socket_shadow", 100.0 - socket_brightness),
            ("texture_flatness", 60.0 - laplacian_variance(&gray)),
        ]),
        &config.dehydration,
    );
    if dehydration.detected && dehydration.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Possible Dehydration",
            dehydration.confidence,
            "Signs of dehydration detected. Look for sunken eyes, dry gums, lethargy. Provide water immediately and consult vet if symptoms persist.",
        ));
    }

    // Wounds: fresh blood color corroborated by scab/dried-blood coverage.
    let wound = cross_validate(
        &IndicatorSet::from([
            ("blood_pct", blood_mask(image).coverage_percent()),
            ("scab_coverage_pct", dark_wound_mask(image).coverage_percent()),
        ]),
        &config.wound,
    );
    if wound.detected && wound.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Visible Wound/Injury",
            wound.confidence,
            "Visible wound or injury detected with possible bleeding or scabbing. Clean gently with saline and seek veterinary care to prevent infection.",
        ));
    }

    // Malnutrition: dense hard edges (rib and bone outlines) on a
    // high-contrast body.
    let malnutrition = cross_validate(
        &IndicatorSet::from([
            (
                "bone_edge_fraction",
                strong_edge_fraction(&gray, BONE_EDGE_MAGNITUDE),
            ),
            ("body_contrast", brightness_stddev(&gray)),
        ]),
        &config.malnutrition,
    );
    if malnutrition.detected && malnutrition.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Signs of Malnutrition",
            malnutrition.confidence,
            "Possible malnutrition detected. Visible bone structure may indicate underweight condition. Provide nutritious food and consult vet for proper feeding plan.",
        ));
    }

    // Infection: yellow/green discharge concentrated in coherent patches,
    // not scattered pixels.
    let discharge = rgb_in_range(image, PUS_YELLOW).or(&rgb_in_range(image, PUS_GREEN));
    let infection = cross_validate(
        &IndicatorSet::from([
            ("discharge_pct", discharge.coverage_percent()),
            (
                "discharge_regions",
                discharge.regions(config.significant_region_area).len() as f64,
            ),
        ]),
        &config.infection,
    );
    if infection.detected && infection.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Possible Infection",
            infection.confidence,
            "Signs of infection detected (discharge, pus). Indicates bacterial or viral infection requiring veterinary diagnosis and treatment with antibiotics.",
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn healthy_body_reports_nothing() {
        // Bright gray coat with mild texture: no blood or discharge colors,
        // sockets well lit, modest edge density.
        let img = RgbImage::from_fn(64, 64, |x, _| {
            let v = 140 + ((x % 4) * 8) as u8;
            Rgb([v, v, v])
        });
        assert!(detect_general_conditions(&img, &HealthConfig::default()).is_empty());
    }

    #[test]
    fn degenerate_image_reports_nothing() {
        let img = RgbImage::new(0, 0);
        assert!(detect_general_conditions(&img, &HealthConfig::default()).is_empty());
    }

    #[test]
    fn bloody_scabbed_body_reports_wound() {
        // Two-thirds dark scab tones, one third saturated blood red.
        let img = RgbImage::from_fn(60, 60, |x, _| {
            if x < 20 {
                Rgb([150, 10, 10])
            } else {
                Rgb([12, 10, 10])
            }
        });
        let findings = detect_general_conditions(&img, &HealthConfig::default());
        assert!(findings.iter().any(|f| f.issue.starts_with("Visible Wound/Injury")));
    }
}
