use std::fmt::Write;

use crate::types::{HealthFinding, MedicalAssessment, Species, VisionAnalysis};

/// Triage prompt for the advisory capability. Lists only the significant
/// findings, flags a weak emotion estimate so the model doesn't lean on it,
/// and pins the exact JSON shape expected back.
pub fn triage_prompt(
    vision: &VisionAnalysis,
    significant: &[&HealthFinding],
    user_notes: Option<&str>,
) -> String {
    let findings_text = if significant.is_empty() {
        "No significant health issues detected with sufficient confidence".to_string()
    } else {
        let mut text = String::new();
        for finding in significant {
            let _ = writeln!(
                text,
                "- {}: {} (Confidence: {:.2})",
                finding.issue, finding.description, finding.confidence
            );
        }
        text.trim_end().to_string()
    };

    let emotion_note = if vision.emotion_confidence < 0.65 {
        " (Note: Low confidence - emotional state may be uncertain)"
    } else {
        ""
    };

    let user_context = user_notes
        .map(|notes| format!("\n\nUser Notes: {notes}"))
        .unwrap_or_default();

    format!(
        r#"You are a veterinary expert AI assistant analyzing an animal's condition. Based on the following analysis, provide a comprehensive and ACCURATE medical assessment.

VISION ANALYSIS RESULTS:
- Species: {species} (Confidence: {species_conf:.2})
- Emotional State: {emotion} (Confidence: {emotion_conf:.2}){emotion_note}
- Health Issues Detected:
{findings_text}
{user_context}

CRITICAL GUIDELINES:
- Only consider health issues with confidence > 0.55 as significant
- If emotion confidence is low (< 0.65), do NOT base severity assessment primarily on emotional state
- Image analysis can have false positives - be conservative in severity assessment
- When in doubt, recommend professional veterinary examination rather than assuming worst case

Your task is to:
1. Determine the severity level: NORMAL, LOW, URGENT, or CRITICAL (be CONSERVATIVE)
   - NORMAL: No immediate concerns, routine care only
   - LOW: Minor issues that need attention but not urgent (checkup within 1 week)
   - URGENT: Significant CONFIRMED issues requiring veterinary care within 12-24 hours
   - CRITICAL: Life-threatening condition requiring IMMEDIATE veterinary attention (only if multiple high-confidence issues or user reports severe symptoms)

   IMPORTANT: Prefer NORMAL or LOW unless there is strong evidence (high confidence scores or multiple corroborating issues)

2. Provide a condition summary (2-3 sentences) - be specific about detected issues

3. List immediate actions the caretaker should take (4-6 specific, actionable steps)

4. Provide detailed care instructions (5-7 steps) - include first aid if needed

5. List warning signs to watch for (4-6 signs) that indicate worsening condition

6. Estimate urgency in hours (null if NORMAL, 1-168 hours based on severity)
   - CRITICAL: 1-6 hours
   - URGENT: 6-24 hours
   - LOW: 24-168 hours

Respond ONLY with a valid JSON object in this exact format:
{{
    "severity": "NORMAL|LOW|URGENT|CRITICAL",
    "condition_summary": "string",
    "immediate_actions": ["action1", "action2", ...],
    "care_instructions": ["instruction1", "instruction2", ...],
    "warning_signs": ["sign1", "sign2", ...],
    "estimated_urgency_hours": null or number
}}

Be empathetic but direct. Prioritize animal safety. If in doubt, recommend veterinary consultation."#,
        species = vision.species.as_str(),
        species_conf = vision.species_confidence,
        emotion = vision.emotional_state.as_str(),
        emotion_conf = vision.emotion_confidence,
    )
}

/// Nutrition-planning prompt: species, current condition, and the verdict
/// context, with the expected JSON shape pinned.
pub fn nutrition_prompt(
    species: Species,
    vision: &VisionAnalysis,
    assessment: &MedicalAssessment,
) -> String {
    let mut health_context = String::new();
    if !vision.health_findings.is_empty() {
        health_context.push_str("Health concerns detected:\n");
        for finding in &vision.health_findings {
            let _ = writeln!(health_context, "- {}", finding.issue);
        }
    }

    format!(
        r#"You are a veterinary nutrition expert. Create a comprehensive nutrition and care plan for the following animal:

ANIMAL INFORMATION:
- Species: {species}
- Emotional State: {emotion}
- Medical Severity: {severity}
- Condition: {summary}

{health_context}
Create a detailed nutrition and care plan including:

1. RECOMMENDED FOODS (5-7 specific foods):
   - List safe, nutritious foods appropriate for this species
   - Include both regular diet and recovery foods if needed
   - Consider the animal's current health condition

2. DANGEROUS FOODS (list foods that are toxic or harmful):
   - Species-specific dangerous foods
   - Common foods people might mistakenly offer

3. HYDRATION PLAN:
   - Water intake recommendations
   - Signs of proper hydration
   - Special considerations based on health status

4. FEEDING SCHEDULE:
   - Frequency of meals
   - Portion size guidelines
   - Timing considerations

5. SPECIAL CONSIDERATIONS (3-5 points):
   - Diet adjustments based on health issues
   - Supplements if needed
   - Monitoring guidelines

Respond ONLY with a valid JSON object in this format:
{{
    "recommended_foods": ["food1", "food2", ...],
    "dangerous_foods": ["food1", "food2", ...],
    "hydration_plan": "detailed hydration guidance",
    "feeding_schedule": "feeding schedule details",
    "special_considerations": ["consideration1", "consideration2", ...]
}}

Be specific and practical. Prioritize the animal's health and recovery needs."#,
        species = species.as_str(),
        emotion = vision.emotional_state.as_str(),
        severity = assessment.severity.as_str(),
        summary = assessment.condition_summary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmotionalState, Severity};

    fn vision(emotion_confidence: f64) -> VisionAnalysis {
        VisionAnalysis {
            species: Species::Dog,
            species_confidence: 0.9,
            emotional_state: EmotionalState::Neutral,
            emotion_confidence,
            health_findings: vec![HealthFinding::new("Visible Wound/Injury", 0.8, "desc")],
            raw_detections: vec![],
        }
    }

    #[test]
    fn low_emotion_confidence_adds_caution_note() {
        let v = vision(0.5);
        let significant: Vec<&HealthFinding> = v.health_findings.iter().collect();
        let prompt = triage_prompt(&v, &significant, None);
        assert!(prompt.contains("emotional state may be uncertain"));
    }

    #[test]
    fn user_notes_are_threaded_into_prompt() {
        let v = vision(0.9);
        let significant: Vec<&HealthFinding> = v.health_findings.iter().collect();
        let prompt = triage_prompt(&v, &significant, Some("limping since yesterday"));
        assert!(prompt.contains("User Notes: limping since yesterday"));
        assert!(!prompt.contains("emotional state may be uncertain"));
    }

    #[test]
    fn nutrition_prompt_names_species_and_severity() {
        let v = vision(0.9);
        let assessment = MedicalAssessment {
            severity: Severity::Low,
            condition_summary: "Minor concern".into(),
            immediate_actions: vec![],
            care_instructions: vec![],
            warning_signs: vec![],
            estimated_urgency_hours: Some(96),
        };
        let prompt = nutrition_prompt(Species::Dog, &v, &assessment);
        assert!(prompt.contains("- Species: dog"));
        assert!(prompt.contains("- Medical Severity: LOW"));
    }
}
