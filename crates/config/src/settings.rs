//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Dialogue policy configuration
    #[serde(default)]
    pub policy: PolicySettings,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Path to the ontology file (YAML)
    #[serde(default = "default_ontology_path")]
    pub ontology_path: String,
}

fn default_ontology_path() -> String {
    "config/ontology.yaml".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: RuntimeEnvironment::default(),
            policy: PolicySettings::default(),
            observability: ObservabilityConfig::default(),
            ontology_path: default_ontology_path(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_policy()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_policy(&self) -> Result<(), ConfigError> {
        if self.policy.example_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "policy.example_limit".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if self.environment.is_strict() && self.policy.random_seed.is_some() {
            tracing::warn!(
                environment = ?self.environment,
                "policy.random_seed is fixed; elicitation prompts will repeat across sessions"
            );
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        let level = self.observability.log_level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Expected one of {}, got {}",
                    LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }
        Ok(())
    }
}

/// Dialogue policy settings, fixed for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Conversation runs through a chat bot front end
    #[serde(default)]
    pub is_bot: bool,

    /// First conversation with this user
    #[serde(default = "default_true")]
    pub new_user: bool,

    /// Stop collecting example values once more than this many are found
    #[serde(default = "default_example_limit")]
    pub example_limit: usize,

    /// Seed for the policy's random source (entropy when unset)
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_true() -> bool {
    true
}
fn default_example_limit() -> usize {
    20
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            is_bot: false,
            new_user: true,
            example_limit: default_example_limit(),
            random_seed: None,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (MOVIEBOT__ prefix, `__` separator)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("MOVIEBOT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
