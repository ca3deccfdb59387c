//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Generate advisory narratives with the AI provider
    #[serde(default = "default_enable_ai_advisory")]
    pub enable_ai_advisory: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_ai_advisory: default_enable_ai_advisory(),
            verbose_errors: false,
        }
    }
}

fn default_enable_ai_advisory() -> bool {
    true
}
