//! Nutrition planning. The advisory capability drafts the plan; a
//! species-keyed static table answers whenever the draft is missing, too
//! short, or unparseable. Content here is advisory rather than
//! triage-critical, so no confidence gating applies.

use crate::capabilities::{generate_bounded, AdvisoryModel};
use crate::triage::config::TriageConfig;
use crate::triage::parse::parse_nutrition_plan;
use crate::triage::prompt::nutrition_prompt;
use crate::types::{MedicalAssessment, NutritionPlan, Species, VisionAnalysis};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Advisory replies shorter than this (after trimming) are treated as
/// absent; a model that answers in a sentence fragment has not produced a
/// plan.
const MIN_USEFUL_REPLY_CHARS: usize = 50;

/// Static per-species plans used whenever the advisory path yields nothing.
/// Species without a dedicated table fall through to the generic plan.
#[derive(Debug, Clone)]
pub struct NutritionTables {
    pub dog: NutritionPlan,
    pub cat: NutritionPlan,
    pub generic: NutritionPlan,
}

impl NutritionTables {
    pub fn plan_for(&self, species: Species) -> NutritionPlan {
        match species {
            Species::Dog => self.dog.clone(),
            Species::Cat => self.cat.clone(),
            _ => self.generic.clone(),
        }
    }
}

impl Default for NutritionTables {
    fn default() -> Self {
        Self {
            dog: NutritionPlan {
                recommended_foods: to_strings(&[
                    "High-quality dog food (age-appropriate)",
                    "Lean chicken (cooked, boneless)",
                    "Rice or sweet potato",
                    "Carrots, green beans",
                ]),
                dangerous_foods: to_strings(&[
                    "Chocolate (toxic)",
                    "Grapes/raisins (kidney damage)",
                    "Onions/garlic (anemia)",
                    "Xylitol (hypoglycemia)",
                ]),
                hydration_plan:
                    "Fresh water always available. ~1 oz per pound body weight daily.".to_string(),
                feeding_schedule: "Adults: 2 meals daily. Puppies: 3-4 meals daily.".to_string(),
                special_considerations: to_strings(&[
                    "Transition diets gradually over 7-10 days",
                    "Monitor weight and adjust portions",
                ]),
            },
            cat: NutritionPlan {
                recommended_foods: to_strings(&[
                    "High-quality wet cat food (primary)",
                    "Premium dry food (supplementary)",
                    "Cooked chicken/fish (plain)",
                    "Cat grass",
                ]),
                dangerous_foods: to_strings(&[
                    "Onions/garlic (anemia)",
                    "Chocolate (toxic)",
                    "Grapes/raisins (kidney damage)",
                    "Tuna (mercury risk)",
                ]),
                hydration_plan:
                    "Multiple water sources. Wet food preferred for hydration.".to_string(),
                feeding_schedule:
                    "Adults: 2-3 small meals daily. Kittens: 4-6 meals daily.".to_string(),
                special_considerations: to_strings(&[
                    "Obligate carnivores - need meat-based diet",
                    "Wet food preferred for health",
                ]),
            },
            generic: NutritionPlan {
                recommended_foods: to_strings(&[
                    "Species-appropriate commercial food",
                    "Fresh water daily",
                ]),
                dangerous_foods: to_strings(&["Chocolate", "Onions/garlic", "Grapes/raisins"]),
                hydration_plan: "Fresh water daily. Monitor intake.".to_string(),
                feeding_schedule: "Follow species guidelines. Consult vet.".to_string(),
                special_considerations: to_strings(&[
                    "Avoid sudden diet changes",
                    "Consult veterinarian for specific needs",
                ]),
            },
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the nutrition plan for one analysis. The advisory reply is
/// accepted only when it is long enough to plausibly hold a plan and
/// actually parses; every other outcome lands on the species table.
pub async fn create_plan(
    vision: &VisionAnalysis,
    assessment: &MedicalAssessment,
    advisory: Option<&dyn AdvisoryModel>,
    tables: &NutritionTables,
    config: &TriageConfig,
) -> NutritionPlan {
    let prompt = nutrition_prompt(vision.species, vision, assessment);

    if let Some(reply) =
        generate_bounded(advisory, &prompt, &config.generation, config.advisory_timeout).await
    {
        if reply.trim().len() > MIN_USEFUL_REPLY_CHARS {
            if let Some(plan) = parse_nutrition_plan(&reply) {
                return plan;
            }
        }
    }

    log_info!(
        "using table nutrition plan for species {}",
        vision.species.as_str()
    );
    tables.plan_for(vision.species)
}
