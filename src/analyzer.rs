use chrono::Utc;
use image::RgbImage;
use uuid::Uuid;

use crate::capabilities::{AdvisoryModel, EmotionClassifier, ObjectDetector};
use crate::config::AnalyzerConfig;
use crate::emotion::analyze_emotion;
use crate::health::detect_health_findings;
use crate::nutrition::create_plan;
use crate::species::species_from_detections;
use crate::triage::assess;
use crate::types::{AnalysisReport, Severity, VisionAnalysis};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// The external model capabilities one analyzer runs with. Every slot is
/// optional: a missing capability degrades that stage to its neutral
/// default instead of failing the request.
#[derive(Default)]
pub struct Capabilities {
    pub detector: Option<Box<dyn ObjectDetector>>,
    pub classifier: Option<Box<dyn EmotionClassifier>>,
    pub advisory: Option<Box<dyn AdvisoryModel>>,
}

/// Full analysis pipeline: species detection, emotion ensemble, health
/// detection, severity cascade, nutrition planning. Stateless across
/// requests; configuration and capabilities load once at construction.
pub struct AnimalAnalyzer {
    config: AnalyzerConfig,
    capabilities: Capabilities,
}

impl AnimalAnalyzer {
    pub fn new(config: AnalyzerConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Vision stage only: species, emotion, and health findings with their
    /// confidences. Pure except for the capability calls.
    pub fn analyze_vision(&self, image: &RgbImage) -> VisionAnalysis {
        let raw_detections = match self.capabilities.detector.as_deref() {
            Some(detector) => match detector.detect(image) {
                Ok(detections) => detections,
                Err(err) => {
                    log_warn!("species detection failed: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let (species, species_confidence) = species_from_detections(&raw_detections);

        let (emotional_state, emotion_confidence) = analyze_emotion(
            image,
            self.capabilities.classifier.as_deref(),
            &self.config.emotion,
        );

        let health_findings = detect_health_findings(image, &self.config.health);

        VisionAnalysis {
            species,
            species_confidence,
            emotional_state,
            emotion_confidence,
            health_findings,
            raw_detections,
        }
    }

    /// Complete pipeline for one image. Never fails on capability
    /// unavailability; the output is always a structurally valid,
    /// conservative report.
    pub async fn analyze(
        &self,
        image: &RgbImage,
        user_notes: Option<&str>,
    ) -> AnalysisReport {
        let vision = self.analyze_vision(image);
        log_info!(
            "vision: species={} ({:.2}), emotion={} ({:.2}), findings={}",
            vision.species.as_str(),
            vision.species_confidence,
            vision.emotional_state.as_str(),
            vision.emotion_confidence,
            vision.health_findings.len()
        );

        let assessment = assess(
            &vision,
            user_notes,
            self.capabilities.advisory.as_deref(),
            &self.config.triage,
        )
        .await;

        let nutrition = create_plan(
            &vision,
            &assessment,
            self.capabilities.advisory.as_deref(),
            &self.config.nutrition,
            &self.config.triage,
        )
        .await;

        let requires_rescue = assessment.severity == Severity::Critical;

        AnalysisReport {
            id: Uuid::new_v4().to_string(),
            analyzed_at: Utc::now(),
            vision,
            assessment,
            nutrition,
            requires_rescue,
        }
    }
}
