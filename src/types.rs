use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Cow,
    Stray,
    Unknown,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Cow => "cow",
            Species::Stray => "stray",
            Species::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Happy,
    Stressed,
    Scared,
    Aggressive,
    Neutral,
    Unknown,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Happy => "happy",
            EmotionalState::Stressed => "stressed",
            EmotionalState::Scared => "scared",
            EmotionalState::Aggressive => "aggressive",
            EmotionalState::Neutral => "neutral",
            EmotionalState::Unknown => "unknown",
        }
    }
}

/// Triage severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Normal,
    Low,
    Urgent,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "NORMAL",
            Severity::Low => "LOW",
            Severity::Urgent => "URGENT",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// One candidate condition surfaced by the health detectors.
///
/// `confidence` is the cross-validation result, not a raw heuristic score;
/// the display text repeats it as an integer percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthFinding {
    pub issue: String,
    pub confidence: f64,
    pub description: String,
}

impl HealthFinding {
    pub fn new(name: &str, confidence: f64, description: &str) -> Self {
        Self {
            issue: format!("{} ({}% confidence)", name, (confidence * 100.0) as u32),
            confidence,
            description: description.to_string(),
        }
    }
}

/// A single labeled box from the object-detector capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    /// Pixel coordinates: [x1, y1, x2, y2]
    pub bbox: [f64; 4],
}

/// Output of the vision stage. Created once per request, immutable after.
///
/// Confidences are always reported, including for the neutral/unknown
/// defaults produced when a capability is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionAnalysis {
    pub species: Species,
    pub species_confidence: f64,
    pub emotional_state: EmotionalState,
    pub emotion_confidence: f64,
    pub health_findings: Vec<HealthFinding>,
    pub raw_detections: Vec<Detection>,
}

impl VisionAnalysis {
    /// Findings strong enough to enter severity reasoning at all.
    pub fn significant_findings(&self, floor: f64) -> Vec<&HealthFinding> {
        self.health_findings
            .iter()
            .filter(|f| f.confidence > floor)
            .collect()
    }
}

/// The triage decision. Mutated exactly once, in place, by the downgrade
/// pass; no other mutation is permitted after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalAssessment {
    pub severity: Severity,
    pub condition_summary: String,
    pub immediate_actions: Vec<String>,
    pub care_instructions: Vec<String>,
    pub warning_signs: Vec<String>,
    #[serde(default)]
    pub estimated_urgency_hours: Option<u32>,
}

/// Which producer filled the candidate assessment. The downgrade pass
/// consumes both variants through the same code path.
#[derive(Debug, Clone)]
pub enum AssessmentSource {
    Advisory(MedicalAssessment),
    Fallback(MedicalAssessment),
}

impl AssessmentSource {
    pub fn into_inner(self) -> MedicalAssessment {
        match self {
            AssessmentSource::Advisory(a) => a,
            AssessmentSource::Fallback(a) => a,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AssessmentSource::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub recommended_foods: Vec<String>,
    pub dangerous_foods: Vec<String>,
    pub hydration_plan: String,
    pub feeding_schedule: String,
    pub special_considerations: Vec<String>,
}

/// Everything one analysis request produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,
    pub analyzed_at: DateTime<Utc>,
    pub vision: VisionAnalysis,
    pub assessment: MedicalAssessment,
    pub nutrition: NutritionPlan,
    /// The rescue stage treats CRITICAL as its sole trigger.
    pub requires_rescue: bool,
}
