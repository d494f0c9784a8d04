use crate::types::{Detection, Species};

/// Map the strongest detection onto the fixed species vocabulary.
/// Unmapped labels and empty detection lists come back as Unknown at 0.0 —
/// the estimate always carries a confidence, even the default one.
pub fn species_from_detections(detections: &[Detection]) -> (Species, f64) {
    let Some(top) = detections
        .iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    else {
        return (Species::Unknown, 0.0);
    };

    let species = match top.label.to_lowercase().as_str() {
        "dog" => Species::Dog,
        "cat" => Species::Cat,
        "cow" => Species::Cow,
        // Birds and horses get routed through the stray/wildlife path.
        "bird" | "horse" => Species::Stray,
        _ => return (Species::Unknown, 0.0),
    };

    (species, top.confidence)
}
