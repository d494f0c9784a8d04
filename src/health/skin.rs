use image::RgbImage;

use crate::signals::color::{inflammation_mask, scab_mask};
use crate::signals::texture::{grayscale, smoothed_stddev};
use crate::types::HealthFinding;

use super::config::HealthConfig;
use super::cross_validate::{cross_validate, IndicatorSet};

/// Skin-condition detection over the whole frame.
///
/// Gated twice before anything is reported: at least `min_skin_regions`
/// significant red or dark regions must survive noise removal, and the
/// cross-validated confidence must clear the skin floor.
pub fn detect_skin_condition(image: &RgbImage, config: &HealthConfig) -> Option<HealthFinding> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return None;
    }

    let red = inflammation_mask(image).opened();
    let dark = scab_mask(image).opened();

    let red_regions = red.regions(config.significant_region_area);
    let dark_regions = dark.regions(config.significant_region_area);

    if red_regions.len() < config.min_skin_regions
        && dark_regions.len() < config.min_skin_regions
    {
        return None;
    }

    // Percentages from significant regions only, so scattered leftover
    // pixels can't pad the affected area.
    let total = (w as f64) * (h as f64);
    let red_pct = red_regions.iter().map(|r| r.area).sum::<f64>() / total * 100.0;
    let dark_pct = dark_regions.iter().map(|r| r.area).sum::<f64>() / total * 100.0;

    let texture_variance = smoothed_stddev(&grayscale(image));

    let indicators = IndicatorSet::from([
        ("red_percentage", red_pct),
        ("inflammation_score", red_pct * 1.5),
        ("dark_spots", dark_pct),
        ("texture_variance", texture_variance),
        ("red_regions", red_regions.len() as f64),
        ("dark_regions", dark_regions.len() as f64),
    ]);

    let result = cross_validate(&indicators, &config.skin);
    if !result.detected || result.confidence <= config.skin_floor {
        return None;
    }

    let (name, description) = classify_skin_disease(red_pct, dark_pct, texture_variance);
    Some(HealthFinding::new(name, result.confidence, description))
}

/// Name the condition from the indicator magnitudes. Rows are ordered from
/// the most severe indicator combination down; the first match wins and a
/// generic catch-all closes the table.
fn classify_skin_disease(red_pct: f64, dark_pct: f64, texture_var: f64) -> (&'static str, &'static str) {
    if red_pct > 12.0 && dark_pct > 20.0 && texture_var > 60.0 {
        (
            "Sarcoptic Mange (Scabies)",
            "Severe parasitic skin disease causing intense itching, hair loss, and crusty lesions. Highly contagious and requires immediate veterinary treatment with antiparasitic medications.",
        )
    } else if red_pct > 8.0 && dark_pct > 15.0 && texture_var > 45.0 {
        (
            "Demodectic Mange",
            "Parasitic skin condition caused by Demodex mites. Characterized by patchy hair loss, redness, and scaling. Requires veterinary diagnosis and treatment.",
        )
    } else if red_pct > 10.0 && dark_pct < 10.0 && texture_var > 35.0 {
        (
            "Bacterial Dermatitis (Pyoderma)",
            "Bacterial skin infection causing redness, pustules, and inflammation. Often secondary to allergies or other skin conditions. Requires antibiotic treatment.",
        )
    } else if red_pct > 6.0 && dark_pct > 8.0 && texture_var > 30.0 {
        (
            "Fungal Dermatitis (Ringworm)",
            "Fungal skin infection causing circular patches of hair loss, scaling, and mild inflammation. Contagious to humans and other animals. Requires antifungal treatment.",
        )
    } else if red_pct > 7.0 && texture_var > 40.0 {
        (
            "Allergic Dermatitis",
            "Inflammatory skin condition caused by allergic reactions to food, environmental allergens, or contact irritants. Requires identification and avoidance of triggers.",
        )
    } else if dark_pct > 12.0 && texture_var > 25.0 {
        (
            "Seborrheic Dermatitis",
            "Chronic skin condition causing scaly, flaky patches and oily or dry skin. Often affects areas with many sebaceous glands. Requires specialized shampoos and treatments.",
        )
    } else if red_pct > 5.0 && red_pct < 8.0 {
        (
            "Contact Dermatitis",
            "Localized skin irritation from contact with irritating substances. Usually resolves when irritant is removed. Monitor for improvement and seek vet care if worsening.",
        )
    } else {
        (
            "Unspecified Skin Condition",
            "Skin abnormalities detected that require professional veterinary evaluation for proper diagnosis and treatment planning.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn clean_coat_reports_nothing() {
        let img = RgbImage::from_pixel(64, 64, Rgb([150, 130, 110]));
        assert!(detect_skin_condition(&img, &HealthConfig::default()).is_none());
    }

    #[test]
    fn degenerate_image_reports_nothing() {
        let img = RgbImage::new(0, 0);
        assert!(detect_skin_condition(&img, &HealthConfig::default()).is_none());
    }

    #[test]
    fn rule_table_orders_most_severe_first() {
        let (name, _) = classify_skin_disease(13.0, 22.0, 65.0);
        assert_eq!(name, "Sarcoptic Mange (Scabies)");
        let (name, _) = classify_skin_disease(9.0, 16.0, 50.0);
        assert_eq!(name, "Demodectic Mange");
        let (name, _) = classify_skin_disease(11.0, 5.0, 38.0);
        assert_eq!(name, "Bacterial Dermatitis (Pyoderma)");
        let (name, _) = classify_skin_disease(6.5, 9.0, 32.0);
        assert_eq!(name, "Fungal Dermatitis (Ringworm)");
        let (name, _) = classify_skin_disease(0.0, 0.0, 0.0);
        assert_eq!(name, "Unspecified Skin Condition");
    }

    #[test]
    fn finding_text_carries_integer_percentage() {
        let finding = HealthFinding::new("Demodectic Mange", 0.91, "desc");
        assert_eq!(finding.issue, "Demodectic Mange (91% confidence)");
        assert!((finding.confidence - 0.91).abs() < 1e-9);
    }
}
