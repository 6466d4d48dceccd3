//! Evaluation settings for promptcheck
//!
//! Holds the models to evaluate per provider, the scoring weights applied to
//! each evaluation dimension, and the provider API keys. Extraction itself
//! never reads these; they are consumed by whatever drives the models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Anthropic API key
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("read settings {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("write settings {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("parse settings toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize settings toml: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("scoring weight '{name}' is negative: {value}")]
    NegativeWeight { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Top-level settings, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model identifiers to evaluate, keyed by provider name
    pub models: BTreeMap<String, Vec<String>>,

    /// Weight of each scoring dimension
    pub weights: ScoringWeights,

    /// Provider credentials, resolved from the environment
    #[serde(skip)]
    pub api_keys: ApiKeys,
}

/// Weights of the scoring dimensions; they must sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Adherence to explicit instructions and constraints
    pub constraint_compliance: f64,
    /// Clarity and traceability of the model's reasoning
    pub reasoning_transparency: f64,
    /// Recognizing ambiguity or contradictions and correcting them
    pub error_handling: f64,
}

/// API keys for the hosted providers
#[derive(Clone, Default, PartialEq)]
pub struct ApiKeys {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
}

impl ApiKeys {
    /// Read keys from the process environment; empty values count as unset
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai: get(OPENAI_API_KEY_VAR),
            anthropic: get(ANTHROPIC_API_KEY_VAR),
        }
    }
}

// Keys never show up in logs or debug output
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = |key: &Option<String>| if key.is_some() { "set" } else { "unset" };
        f.debug_struct("ApiKeys")
            .field("openai", &state(&self.openai))
            .field("anthropic", &state(&self.anthropic))
            .finish()
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.constraint_compliance + self.reasoning_transparency + self.error_handling
    }

    /// Dimension names with their weights
    pub fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("constraint_compliance", self.constraint_compliance),
            ("reasoning_transparency", self.reasoning_transparency),
            ("error_handling", self.error_handling),
        ]
    }

    /// Check that no weight is negative and that they sum to 1.0
    pub fn validate(&self) -> Result<()> {
        if let Some((name, value)) = self.entries().into_iter().find(|(_, v)| *v < 0.0) {
            return Err(SettingsError::NegativeWeight { name, value });
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(SettingsError::WeightSum(total));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            constraint_compliance: 0.4,
            reasoning_transparency: 0.3,
            error_handling: 0.3,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let models = [
            ("openai", vec!["gpt-3.5-turbo", "gpt-4"]),
            ("anthropic", vec!["claude-3-5-sonnet-20241022"]),
            ("ollama", vec!["llama3-70b", "llama3-70b-chat"]),
        ]
        .into_iter()
        .map(|(provider, ids)| (provider.to_string(), ids.into_iter().map(String::from).collect()))
        .collect();

        Self {
            models,
            weights: ScoringWeights::default(),
            api_keys: ApiKeys::default(),
        }
    }
}

impl Settings {
    /// Get the default settings path
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(".promptcheck/config.toml")
    }

    /// Load settings from `path`, or from the default path when it exists,
    /// falling back to built-in defaults. API keys come from the environment.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let default_path = Self::default_config_path();
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.exists() => Self::from_file(&default_path)?,
            None => {
                debug!("No settings file, using defaults");
                Self::default()
            }
        };

        settings.api_keys = ApiKeys::from_env();
        Ok(settings)
    }

    /// Load settings from a TOML file and validate the weights
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|source| SettingsError::Read { path: path.to_path_buf(), source })?;

        let settings = Self::from_toml(&content)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text and validate the weights
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.weights.validate()?;
        Ok(settings)
    }

    /// Save settings to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| SettingsError::Write { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|source| SettingsError::Write { path: path.to_path_buf(), source })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Models configured for a provider
    pub fn models_for(&self, provider: &str) -> &[String] {
        self.models.get(provider).map(Vec::as_slice).unwrap_or_default()
    }
}
