use crate::types::{HealthFinding, MedicalAssessment, Severity};

use super::config::TriageConfig;

/// Deterministic severity assessment from the significant findings alone.
///
/// This is the only fallback path: whether the advisory capability was
/// never called, timed out, or returned garbage, the cascade lands here
/// with identical inputs and gets byte-identical output. No randomness, no
/// clock reads.
pub fn fallback_assessment(
    significant: &[&HealthFinding],
    config: &TriageConfig,
) -> MedicalAssessment {
    let (severity, urgency, summary) = classify(significant, config);

    MedicalAssessment {
        severity,
        condition_summary: summary,
        immediate_actions: immediate_actions(severity),
        care_instructions: care_instructions(),
        warning_signs: warning_signs(),
        estimated_urgency_hours: urgency,
    }
}

/// The four verdict rules, evaluated in order, first match wins.
fn classify(
    significant: &[&HealthFinding],
    config: &TriageConfig,
) -> (Severity, Option<u32>, String) {
    if significant.is_empty() {
        return (
            Severity::Normal,
            None,
            "No significant health issues detected. Animal appears to be in acceptable condition. Regular monitoring recommended.".to_string(),
        );
    }

    let high: Vec<&&HealthFinding> = significant
        .iter()
        .filter(|f| f.confidence > config.high_confidence_floor)
        .collect();
    let moderate: Vec<&&HealthFinding> = significant
        .iter()
        .filter(|f| {
            f.confidence >= config.moderate_confidence_floor
                && f.confidence <= config.high_confidence_floor
        })
        .collect();

    let max_confidence = significant
        .iter()
        .map(|f| f.confidence)
        .fold(0.0_f64, f64::max);

    let combined_text = significant
        .iter()
        .map(|f| format!("{} {}", f.issue.to_lowercase(), f.description.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ");

    let has_keyword =
        |keywords: &[String]| keywords.iter().any(|k| combined_text.contains(k.as_str()));
    let has_critical = has_keyword(&config.critical_keywords);
    let has_urgent = has_keyword(&config.urgent_keywords);
    let has_moderate = has_keyword(&config.moderate_keywords);

    // 1. CRITICAL needs keyword support AND multiple high-confidence
    //    findings, or overwhelming confidence across three of them.
    if (has_critical && max_confidence > 0.75 && high.len() >= 2)
        || (max_confidence > 0.85 && high.len() >= 3)
    {
        let named = join_issues(&high, 2);
        return (
            Severity::Critical,
            Some(2),
            format!("Multiple significant health issues detected: {named}. Immediate veterinary care strongly recommended."),
        );
    }

    // 2. URGENT on urgent keywords with good confidence, two high-confidence
    //    findings, or one very strong finding.
    if (has_urgent && max_confidence > 0.70) || high.len() >= 2 || max_confidence > 0.78 {
        let mut leading: Vec<&&HealthFinding> = Vec::new();
        leading.extend(high.iter().copied());
        leading.extend(moderate.iter().copied());
        let named = join_issues(&leading, 2);
        return (
            Severity::Urgent,
            Some(12),
            format!("Health concerns requiring attention: {named}. Veterinary consultation recommended within 24 hours."),
        );
    }

    // 3. LOW for anything left that clears the minimum bar or carries a
    //    moderate keyword.
    if max_confidence > 0.58 || has_moderate {
        return (
            Severity::Low,
            Some(96),
            format!(
                "Potential health concern detected: {}. Schedule veterinary checkup when convenient.",
                significant[0].issue
            ),
        );
    }

    (
        Severity::Normal,
        None,
        "No significant health issues detected with sufficient confidence. Animal appears to be in acceptable condition. Continue regular monitoring.".to_string(),
    )
}

fn join_issues(findings: &[&&HealthFinding], limit: usize) -> String {
    findings
        .iter()
        .take(limit)
        .map(|f| f.issue.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

fn immediate_actions(severity: Severity) -> Vec<String> {
    let serious = matches!(severity, Severity::Critical | Severity::Urgent);
    vec![
        "Ensure the animal has access to clean, fresh water".to_string(),
        "Provide a safe, warm, and comfortable resting area".to_string(),
        if serious {
            "Do NOT attempt to treat serious injuries yourself".to_string()
        } else {
            "Monitor behavior and appetite".to_string()
        },
        match severity {
            Severity::Critical => {
                "Contact a veterinarian or animal rescue organization immediately".to_string()
            }
            Severity::Urgent => "Schedule veterinary consultation within 24 hours".to_string(),
            _ => "Consider veterinary checkup if symptoms persist or worsen".to_string(),
        },
        "Keep the animal calm and minimize stress".to_string(),
        "Document any changes in behavior, eating, or activity levels".to_string(),
    ]
}

fn care_instructions() -> Vec<String> {
    vec![
        "Isolate from other animals if skin infection or mange is suspected".to_string(),
        "Provide small amounts of easily digestible food if malnutrition detected".to_string(),
        "Keep wounds clean and dry; prevent animal from licking wounds".to_string(),
        "Maintain detailed notes on symptoms and behavior changes".to_string(),
        "Ensure adequate shelter from weather extremes".to_string(),
        "Follow veterinarian's treatment plan strictly".to_string(),
    ]
}

fn warning_signs() -> Vec<String> {
    vec![
        "Rapid deterioration in condition or energy levels".to_string(),
        "Complete loss of appetite or inability to drink water".to_string(),
        "Difficulty breathing, walking, or standing".to_string(),
        "Increased bleeding, discharge, or wound infection".to_string(),
        "Seizures, collapse, or loss of consciousness".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(name: &str, confidence: f64) -> HealthFinding {
        HealthFinding::new(name, confidence, "description text")
    }

    fn assess(findings: &[HealthFinding]) -> MedicalAssessment {
        let refs: Vec<&HealthFinding> = findings.iter().collect();
        fallback_assessment(&refs, &TriageConfig::default())
    }

    #[test]
    fn no_findings_is_normal_without_urgency() {
        let assessment = assess(&[]);
        assert_eq!(assessment.severity, Severity::Normal);
        assert_eq!(assessment.estimated_urgency_hours, None);
    }

    #[test]
    fn two_high_confidence_findings_are_urgent() {
        // No critical keyword in the text, so rule 1 passes over this and
        // rule 2 fires on the two high-confidence findings.
        let findings = vec![finding("Demodectic Mange", 0.90), finding("Visible Wound", 0.80)];
        let assessment = assess(&findings);
        assert_eq!(assessment.severity, Severity::Urgent);
        let hours = assessment.estimated_urgency_hours.unwrap();
        assert!((6..=24).contains(&hours));
    }

    #[test]
    fn critical_keyword_with_two_high_findings_is_critical() {
        let findings = vec![
            HealthFinding::new("Visible Wound/Injury", 0.88, "Open wound with active bleeding."),
            finding("Signs of Malnutrition", 0.82),
        ];
        let assessment = assess(&findings);
        assert_eq!(assessment.severity, Severity::Critical);
        let hours = assessment.estimated_urgency_hours.unwrap();
        assert!((1..=6).contains(&hours));
    }

    #[test]
    fn three_very_confident_findings_are_critical_without_keywords() {
        let findings = vec![
            finding("Condition A", 0.88),
            finding("Condition B", 0.87),
            finding("Condition C", 0.86),
        ];
        let assessment = assess(&findings);
        assert_eq!(assessment.severity, Severity::Critical);
    }

    #[test]
    fn single_moderate_finding_is_low() {
        let findings = vec![finding("Skin irritation", 0.60)];
        let assessment = assess(&findings);
        assert_eq!(assessment.severity, Severity::Low);
        let hours = assessment.estimated_urgency_hours.unwrap();
        assert!((24..=168).contains(&hours));
    }

    #[test]
    fn weak_finding_without_keywords_is_normal() {
        let findings = vec![finding("Faint discoloration", 0.57)];
        let assessment = assess(&findings);
        assert_eq!(assessment.severity, Severity::Normal);
        assert_eq!(assessment.estimated_urgency_hours, None);
    }

    #[test]
    fn output_is_deterministic() {
        let findings = vec![finding("Demodectic Mange", 0.90), finding("Visible Wound", 0.80)];
        let a = assess(&findings);
        let b = assess(&findings);
        assert_eq!(a, b);
    }

    #[test]
    fn serious_verdicts_warn_against_self_treatment() {
        let urgent = assess(&[finding("A", 0.90), finding("B", 0.80)]);
        assert!(urgent
            .immediate_actions
            .iter()
            .any(|a| a.contains("Do NOT attempt to treat")));

        let low = assess(&[finding("Skin irritation", 0.60)]);
        assert!(low
            .immediate_actions
            .iter()
            .any(|a| a.contains("Monitor behavior and appetite")));
    }
}
