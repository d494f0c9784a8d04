use tokio::time::Duration;

use crate::capabilities::GenerationOptions;

/// Cascade thresholds and keyword tables, injected at construction. The
/// numeric floors are carried as-is from field tuning; override per test
/// rather than editing in place.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Findings at or below this confidence never enter severity reasoning.
    pub significance_floor: f64,

    /// Bucket boundaries used by the fallback verdict rules.
    pub high_confidence_floor: f64,
    pub moderate_confidence_floor: f64,

    /// A CRITICAL candidate needs at least this much supporting confidence
    /// or it is downgraded to URGENT.
    pub critical_downgrade_floor: f64,
    /// An URGENT candidate needs at least this much or it drops to LOW.
    pub urgent_downgrade_floor: f64,

    /// Urgency hours written by a downgrade, inside the target windows.
    pub urgent_reset_hours: u32,
    pub low_reset_hours: u32,

    /// Substring keyword classes scanned (case-insensitively) over the
    /// combined finding text by the fallback generator.
    pub critical_keywords: Vec<String>,
    pub urgent_keywords: Vec<String>,
    pub moderate_keywords: Vec<String>,

    /// Hard bound on one advisory call; expiry falls through to fallback.
    pub advisory_timeout: Duration,
    pub generation: GenerationOptions,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            significance_floor: 0.55,
            high_confidence_floor: 0.70,
            moderate_confidence_floor: 0.60,
            critical_downgrade_floor: 0.75,
            urgent_downgrade_floor: 0.65,
            urgent_reset_hours: 12,
            low_reset_hours: 96,
            critical_keywords: to_strings(&["severe", "critical", "bleeding", "emaciated"]),
            urgent_keywords: to_strings(&["infection", "wound", "injury", "severe malnutrition"]),
            moderate_keywords: to_strings(&["mange", "dermatitis", "dehydration", "possible"]),
            advisory_timeout: Duration::from_secs(60),
            generation: GenerationOptions::default(),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
