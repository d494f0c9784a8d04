use image::RgbImage;

use crate::signals::color::{rgb_in_range, RgbRange};
use crate::signals::region::upper_fraction;
use crate::signals::texture::{box_deviation, grayscale};
use crate::types::HealthFinding;

use super::config::HealthConfig;
use super::cross_validate::{cross_validate, IndicatorSet};

const YELLOW_DISCHARGE: RgbRange = RgbRange { lo: [120, 100, 60], hi: [200, 180, 120] };
const GREEN_DISCHARGE: RgbRange = RgbRange { lo: [80, 120, 60], hi: [140, 200, 120] };
const PALLOR: RgbRange = RgbRange { lo: [180, 180, 180], hi: [255, 255, 255] };
const EYE_REDNESS: RgbRange = RgbRange { lo: [100, 0, 0], hi: [255, 100, 100] };

/// Eye-condition detection over the upper third of the frame, where eyes
/// sit in a typical animal photo. Discharge color separates bacterial from
/// viral infection; only the stronger of the two is reported.
pub fn detect_eye_conditions(image: &RgbImage, config: &HealthConfig) -> Vec<HealthFinding> {
    let eye_region = upper_fraction(image, 1.0 / 3.0);
    if eye_region.width() == 0 || eye_region.height() == 0 {
        return Vec::new();
    }

    let mut findings = Vec::new();

    let yellow_pct = rgb_in_range(&eye_region, YELLOW_DISCHARGE).coverage_percent();
    let green_pct = rgb_in_range(&eye_region, GREEN_DISCHARGE).coverage_percent();
    let discharge_total = yellow_pct + green_pct;

    // Green discharge is the stronger signal; it shadows the viral check.
    let bacterial = cross_validate(
        &IndicatorSet::from([
            ("green_discharge_pct", green_pct),
            ("discharge_total_pct", discharge_total),
        ]),
        &config.bacterial_conjunctivitis,
    );
    if bacterial.detected && bacterial.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Bacterial Conjunctivitis",
            bacterial.confidence,
            "Green discharge indicates bacterial eye infection. Requires antibiotic eye drops or ointment prescribed by veterinarian.",
        ));
    } else {
        let viral = cross_validate(
            &IndicatorSet::from([
                ("yellow_discharge_pct", yellow_pct),
                ("discharge_total_pct", discharge_total),
            ]),
            &config.viral_eye_infection,
        );
        if viral.detected && viral.confidence > config.category_floor {
            findings.push(HealthFinding::new(
                "Viral Eye Infection",
                viral.confidence,
                "Yellow discharge suggests viral or bacterial eye infection. May be contagious. Veterinary examination and treatment needed.",
            ));
        }
    }

    let red_mask = rgb_in_range(&eye_region, EYE_REDNESS);
    let inflammation = cross_validate(
        &IndicatorSet::from([
            ("redness_pct", red_mask.coverage_percent()),
            (
                "red_region_count",
                red_mask.regions(config.significant_region_area).len() as f64,
            ),
        ]),
        &config.eye_inflammation,
    );
    if inflammation.detected && inflammation.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Eye Inflammation",
            inflammation.confidence,
            "Significant eye redness and inflammation detected. May be caused by infection, allergies, or injury. Veterinary care recommended.",
        ));
    }

    // Cloudiness: a locally flat eye region paired with pale pixels.
    let eye_gray = grayscale(&eye_region);
    let cloudiness = box_deviation(&eye_gray, 5);
    let cataracts = cross_validate(
        &IndicatorSet::from([
            ("clarity_deficit", (20.0 - cloudiness).max(0.0)),
            ("pallor_pct", rgb_in_range(&eye_region, PALLOR).coverage_percent()),
        ]),
        &config.cataracts,
    );
    if cataracts.detected && cataracts.confidence > config.category_floor {
        findings.push(HealthFinding::new(
            "Possible Cataracts",
            cataracts.confidence,
            "Eye cloudiness detected which may indicate cataracts, corneal scarring, or other eye conditions. Ophthalmologic examination recommended.",
        ));
    }

    findings
}
