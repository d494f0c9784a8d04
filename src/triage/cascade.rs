use crate::capabilities::{generate_bounded, AdvisoryModel};
use crate::types::{AssessmentSource, HealthFinding, MedicalAssessment, Severity, VisionAnalysis};

use super::config::TriageConfig;
use super::fallback::fallback_assessment;
use super::parse::parse_assessment;
use super::prompt::triage_prompt;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// What came back from one advisory round trip. The cascade pattern-matches
/// on this instead of catching failures, so the recovery policy is explicit
/// per failure kind.
#[derive(Debug, Clone)]
pub enum AdvisoryOutcome {
    /// Parseable structured content, adopted verbatim as the candidate.
    Parsed(MedicalAssessment),
    /// The capability answered but not in the expected shape.
    ParseFailure,
    /// Transport failure, timeout, or no capability configured.
    Unavailable,
}

/// Severity assessment for one vision estimate.
///
/// Findings at or below the significance floor never enter severity
/// reasoning. With nothing significant the verdict is a fixed routine-care
/// NORMAL and the advisory capability is never called. Otherwise the
/// advisory opinion (or the deterministic fallback) becomes the candidate
/// verdict, and a single downgrade pass lowers it if the supporting
/// confidence can't carry it. The pass only ever lowers.
pub async fn assess(
    vision: &VisionAnalysis,
    user_notes: Option<&str>,
    advisory: Option<&dyn AdvisoryModel>,
    config: &TriageConfig,
) -> MedicalAssessment {
    let significant = vision.significant_findings(config.significance_floor);

    if significant.is_empty() {
        return routine_assessment();
    }

    let prompt = triage_prompt(vision, &significant, user_notes);
    let candidate = match request_assessment(advisory, &prompt, config).await {
        AdvisoryOutcome::Parsed(assessment) => AssessmentSource::Advisory(assessment),
        AdvisoryOutcome::ParseFailure => {
            log_warn!("advisory reply unparseable, using deterministic fallback");
            AssessmentSource::Fallback(fallback_assessment(&significant, config))
        }
        AdvisoryOutcome::Unavailable => {
            log_info!("advisory capability unavailable, using deterministic fallback");
            AssessmentSource::Fallback(fallback_assessment(&significant, config))
        }
    };

    let max_confidence = significant
        .iter()
        .map(|f| f.confidence)
        .fold(0.0_f64, f64::max);

    // One downgrade pass regardless of which producer filled the candidate.
    let mut assessment = candidate.into_inner();
    apply_downgrade(&mut assessment, max_confidence, config);
    assessment
}

/// One advisory round trip: call bounded by the configured timeout, then
/// parse. Exactly three outcomes, no escalation to the caller.
pub async fn request_assessment(
    advisory: Option<&dyn AdvisoryModel>,
    prompt: &str,
    config: &TriageConfig,
) -> AdvisoryOutcome {
    let Some(text) =
        generate_bounded(advisory, prompt, &config.generation, config.advisory_timeout).await
    else {
        return AdvisoryOutcome::Unavailable;
    };

    match parse_assessment(&text) {
        Some(assessment) => AdvisoryOutcome::Parsed(assessment),
        None => AdvisoryOutcome::ParseFailure,
    }
}

/// Lower the candidate severity when the supporting confidence can't carry
/// it. Never raises; running it twice is the same as running it once.
pub fn apply_downgrade(
    assessment: &mut MedicalAssessment,
    max_confidence: f64,
    config: &TriageConfig,
) {
    if assessment.severity == Severity::Critical && max_confidence < config.critical_downgrade_floor
    {
        log_warn!(
            "downgrading CRITICAL to URGENT: insufficient confidence ({max_confidence:.2})"
        );
        assessment.severity = Severity::Urgent;
        assessment.estimated_urgency_hours = Some(config.urgent_reset_hours);
    }
    if assessment.severity == Severity::Urgent && max_confidence < config.urgent_downgrade_floor {
        log_warn!("downgrading URGENT to LOW: insufficient confidence ({max_confidence:.2})");
        assessment.severity = Severity::Low;
        assessment.estimated_urgency_hours = Some(config.low_reset_hours);
    }
}

/// Fixed verdict for the no-significant-findings path. Deterministic and
/// advisory-free: the common healthy case never waits on a round trip.
pub fn routine_assessment() -> MedicalAssessment {
    MedicalAssessment {
        severity: Severity::Normal,
        condition_summary: "No significant health concerns detected with sufficient confidence. Animal appears to be in acceptable condition. Continue monitoring and provide routine care.".to_string(),
        immediate_actions: vec![
            "Continue regular care and monitoring".to_string(),
            "Maintain proper nutrition and hydration".to_string(),
            "Provide comfortable shelter and clean environment".to_string(),
            "Monitor for any changes in behavior or appetite".to_string(),
        ],
        care_instructions: vec![
            "Maintain regular feeding schedule with quality food".to_string(),
            "Ensure fresh water is available at all times".to_string(),
            "Provide routine grooming and hygiene".to_string(),
            "Schedule routine veterinary checkups as needed".to_string(),
            "Ensure safe, comfortable living environment".to_string(),
        ],
        warning_signs: vec![
            "Sudden changes in appetite or water intake".to_string(),
            "Lethargy or unusual decreased activity".to_string(),
            "Any visible injuries, wounds, or discharge".to_string(),
            "Persistent scratching or skin irritation".to_string(),
            "Difficulty breathing or moving".to_string(),
        ],
        estimated_urgency_hours: None,
    }
}
