use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::convert::Into;
use std::path::Path;

const MAX_TRAIT_CHANGE_RATE: i64 = 100;
const MAX_PRUNE_AFTER_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub background: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("EMO", "un robot social inteligente y emocional")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Minimum emotional weight for a memory to count as important.
    pub important_threshold: u8,
    pub important_limit: usize,
    pub recent_limit: usize,
    /// How many memories end up in the prompt.
    pub context_limit: usize,
    pub prune_max_weight: u8,
    pub prune_after_days: i64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            important_threshold: 70,
            important_limit: 3,
            recent_limit: 5,
            context_limit: 5,
            prune_max_weight: 40,
            prune_after_days: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub trait_change_rate: i64,
}

impl EvolutionConfig {
    pub fn new(trait_change_rate: impl Into<i64>) -> Self {
        Self {
            trait_change_rate: trait_change_rate.into(),
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self { trait_change_rate: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub history_window: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_ms: 15_000,
            history_window: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub identity: Identity,
    pub memory: MemoryConfig,
    pub evolution: EvolutionConfig,
    pub generation: GenerationConfig,
}

impl CompanionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CompanionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.name.trim().is_empty() {
            return Err(ConfigError::Invalid("identity.name must not be empty".to_string()));
        }

        let thresholds = [
            ("memory.important_threshold", self.memory.important_threshold),
            ("memory.prune_max_weight", self.memory.prune_max_weight),
        ];
        for (name, value) in thresholds {
            if value > 100 {
                return Err(ConfigError::Invalid(format!(
                    "'{}' has value {}, but must be between 0 and 100",
                    name, value
                )));
            }
        }

        let limits = [
            ("memory.important_limit", self.memory.important_limit),
            ("memory.recent_limit", self.memory.recent_limit),
            ("memory.context_limit", self.memory.context_limit),
            ("generation.history_window", self.generation.history_window),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("'{}' must be greater than 0", name)));
            }
        }

        if self.generation.timeout_ms == 0 {
            return Err(ConfigError::Invalid("'generation.timeout_ms' must be greater than 0".to_string()));
        }
        if self.memory.prune_after_days <= 0 || self.memory.prune_after_days > MAX_PRUNE_AFTER_DAYS {
            return Err(ConfigError::Invalid(format!(
                "'memory.prune_after_days' has value {}, but must be between 1 and {}",
                self.memory.prune_after_days, MAX_PRUNE_AFTER_DAYS
            )));
        }
        if !(0..=MAX_TRAIT_CHANGE_RATE).contains(&self.evolution.trait_change_rate) {
            return Err(ConfigError::Invalid(format!(
                "'evolution.trait_change_rate' has value {}, but must be between 0 and {}",
                self.evolution.trait_change_rate, MAX_TRAIT_CHANGE_RATE
            )));
        }

        Ok(())
    }
}
