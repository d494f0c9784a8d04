//! pawsight: confidence-calibrated visual triage for animal welfare photos.
//!
//! One image in, one calibrated diagnostic bundle out: species, emotional
//! state, visible health findings, a conservative severity verdict, and a
//! nutrition plan. The pipeline degrades instead of failing — every missing
//! or misbehaving capability (object detector, classifier, advisory text
//! model) has a deterministic fallback, and severity is only ever lowered,
//! never raised, relative to the supporting evidence.

pub mod analyzer;
pub mod capabilities;
pub mod config;
pub mod emotion;
pub mod health;
pub mod nutrition;
pub mod signals;
pub mod species;
pub mod triage;
pub mod types;
mod utils;

pub use analyzer::{AnimalAnalyzer, Capabilities};
pub use capabilities::{
    AdvisoryModel, ClassScores, EmotionClassifier, GenerationOptions, LocalLlmClient,
    ObjectDetector,
};
pub use config::AnalyzerConfig;
pub use types::{
    AnalysisReport, Detection, EmotionalState, HealthFinding, MedicalAssessment, NutritionPlan,
    Severity, Species, VisionAnalysis,
};
