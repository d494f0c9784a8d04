use crate::types::{MedicalAssessment, NutritionPlan};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Slice out the first-`{`-to-last-`}` span of a free-text reply. Advisory
/// models wrap their JSON in prose more often than not.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Advisory text → assessment, or None when the reply doesn't carry the
/// expected shape. Never trusted further than this parse.
pub fn parse_assessment(text: &str) -> Option<MedicalAssessment> {
    let json = extract_json_object(text)?;
    match serde_json::from_str::<MedicalAssessment>(json) {
        Ok(assessment) => Some(assessment),
        Err(err) => {
            log_warn!(
                "advisory assessment failed to parse: {err}; head of reply: {:.120}",
                text
            );
            None
        }
    }
}

/// Advisory text → nutrition plan, with the same extraction rules.
pub fn parse_nutrition_plan(text: &str) -> Option<NutritionPlan> {
    let json = extract_json_object(text)?;
    match serde_json::from_str::<NutritionPlan>(json) {
        Ok(plan) => Some(plan),
        Err(err) => {
            log_warn!("advisory nutrition plan failed to parse: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    const VALID: &str = r#"Here is my assessment:
{
    "severity": "URGENT",
    "condition_summary": "Wound requiring attention.",
    "immediate_actions": ["Clean the wound"],
    "care_instructions": ["Keep dry"],
    "warning_signs": ["Spreading redness"],
    "estimated_urgency_hours": 12
}
Hope that helps!"#;

    #[test]
    fn json_is_extracted_from_surrounding_prose() {
        let assessment = parse_assessment(VALID).expect("should parse");
        assert_eq!(assessment.severity, Severity::Urgent);
        assert_eq!(assessment.estimated_urgency_hours, Some(12));
    }

    #[test]
    fn null_urgency_hours_parse_to_none() {
        let text = r#"{"severity": "NORMAL", "condition_summary": "Fine.",
            "immediate_actions": [], "care_instructions": [],
            "warning_signs": [], "estimated_urgency_hours": null}"#;
        let assessment = parse_assessment(text).expect("should parse");
        assert_eq!(assessment.severity, Severity::Normal);
        assert_eq!(assessment.estimated_urgency_hours, None);
    }

    #[test]
    fn prose_without_json_is_rejected() {
        assert!(parse_assessment("The animal looks fine to me.").is_none());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(parse_assessment(r#"{"verdict": "fine"}"#).is_none());
        assert!(parse_assessment(r#"{"severity": "SHRUG"}"#).is_none());
    }

    #[test]
    fn braces_in_wrong_order_are_rejected() {
        assert!(extract_json_object("} nothing {").is_none());
        assert!(extract_json_object("no braces at all").is_none());
    }

    #[test]
    fn nutrition_plan_parses_expected_shape() {
        let text = r#"{"recommended_foods": ["chicken"], "dangerous_foods": ["chocolate"],
            "hydration_plan": "plenty of water", "feeding_schedule": "twice daily",
            "special_considerations": ["monitor weight"]}"#;
        let plan = parse_nutrition_plan(text).expect("should parse");
        assert_eq!(plan.recommended_foods, vec!["chicken"]);
    }
}
