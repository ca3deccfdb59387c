//! Analysis engine configuration

use serde::Deserialize;

use crate::domain::analysis::{EngineOptions, ProductContextCatalog, ProductContextRule, ScoreRange};

use super::error::ValidationError;

/// Engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Lowest valid payoff score
    #[serde(default = "default_score_min")]
    pub score_min: i32,

    /// Highest valid payoff score
    #[serde(default = "default_score_max")]
    pub score_max: i32,

    /// Reject payoffs outside `score_min..=score_max`
    #[serde(default)]
    pub enforce_score_range: bool,

    /// Product context rules; the built-in catalog is used when unset
    pub product_contexts: Option<Vec<ProductContextRule>>,
}

impl AnalysisConfig {
    pub fn score_range(&self) -> ScoreRange {
        ScoreRange::new(self.score_min, self.score_max)
    }

    /// Builds the engine options described by this configuration
    pub fn engine_options(&self) -> EngineOptions {
        let context_catalog = match &self.product_contexts {
            Some(rules) => ProductContextCatalog::new(rules.clone()),
            None => ProductContextCatalog::built_in(),
        };
        EngineOptions {
            score_range: self.score_range(),
            enforce_score_range: self.enforce_score_range,
            context_catalog,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.score_min >= self.score_max {
            return Err(ValidationError::InvalidScoreRange {
                min: self.score_min,
                max: self.score_max,
            });
        }
        if let Some(rules) = &self.product_contexts {
            let empty = |r: &ProductContextRule| {
                r.entity_keywords.is_empty() || r.segment_keywords.is_empty()
            };
            if let Some(index) = rules.iter().position(empty) {
                return Err(ValidationError::EmptyContextRule(index));
            }
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            score_min: default_score_min(),
            score_max: default_score_max(),
            enforce_score_range: false,
            product_contexts: None,
        }
    }
}

fn default_score_min() -> i32 {
    0
}

fn default_score_max() -> i32 {
    10
}
