use crate::emotion::EmotionConfig;
use crate::health::HealthConfig;
use crate::nutrition::NutritionTables;
use crate::triage::TriageConfig;

/// Everything tunable about one analyzer, owned immutably for its lifetime.
/// Tables and thresholds live here instead of module state so concurrent
/// analyses share nothing mutable and tests can substitute freely.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub emotion: EmotionConfig,
    pub health: HealthConfig,
    pub triage: TriageConfig,
    pub nutrition: NutritionTables,
}
