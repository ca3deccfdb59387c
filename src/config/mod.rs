//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STRATEGIX_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use strategix::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod analysis;
mod error;
mod features;
mod server;

pub use ai::AiConfig;
pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// server that falls back to templated advisories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration for advisory narratives
    #[serde(default)]
    pub ai: AiConfig,

    /// Engine settings (score range, product context rules)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads an optional `strategix.toml` (product context rules are easier to
    ///    express there than in environment variables)
    /// 3. Reads environment variables with `STRATEGIX` prefix, which override the file
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `STRATEGIX__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `STRATEGIX__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("strategix").required(false))
            .add_source(
                config::Environment::default()
                    .prefix("STRATEGIX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate(self.features.enable_ai_advisory)?;
        self.analysis.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// AI advisory is used only when enabled and a key is present
    pub fn ai_advisory_enabled(&self) -> bool {
        self.features.enable_ai_advisory && self.ai.api_key().is_some()
    }
}
