//! TOML-based application configuration.
//!
//! Stores tunables including:
//! - Assessment scoring thresholds and partial credit
//! - Simulated latencies for the fake asynchronous operations
//! - Starter values for freshly signed-in sessions
//!
//! Configuration is stored at `~/.config/skillpath/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Minimum quiz score (0-100) that counts as a pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
    /// Points awarded to a non-trivial free-text or code answer.
    #[serde(default = "default_partial_credit")]
    pub partial_credit: f64,
    /// A free-text answer must be longer than this many characters to earn credit.
    #[serde(default = "default_free_text_min_len")]
    pub free_text_min_len: usize,
    /// Job assessment score at or above which the advanced tier applies.
    #[serde(default = "default_job_advanced_threshold")]
    pub job_advanced_threshold: u32,
    /// Job assessment score at or above which the intermediate tier applies.
    #[serde(default = "default_job_intermediate_threshold")]
    pub job_intermediate_threshold: u32,
}

/// Latencies for the simulated asynchronous operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_path_generation_ms")]
    pub path_generation_ms: u64,
    #[serde(default = "default_search_ms")]
    pub search_ms: u64,
    #[serde(default = "default_execution_ms")]
    pub execution_ms: u64,
    /// Seed for the simulated code executor. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Values applied when a user signs in without onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_goal")]
    pub default_goal: String,
    #[serde(default = "default_starter_streak")]
    pub starter_streak: u32,
    #[serde(default = "default_starter_completed")]
    pub starter_completed: Vec<u32>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/skillpath/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

// Default functions
fn default_pass_threshold() -> u32 {
    70
}
fn default_partial_credit() -> f64 {
    0.7
}
fn default_free_text_min_len() -> usize {
    10
}
fn default_job_advanced_threshold() -> u32 {
    80
}
fn default_job_intermediate_threshold() -> u32 {
    60
}
fn default_path_generation_ms() -> u64 {
    3000
}
fn default_search_ms() -> u64 {
    1000
}
fn default_execution_ms() -> u64 {
    1500
}
fn default_goal() -> String {
    "frontend".into()
}
fn default_starter_streak() -> u32 {
    5
}
fn default_starter_completed() -> Vec<u32> {
    vec![1, 2]
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            partial_credit: default_partial_credit(),
            free_text_min_len: default_free_text_min_len(),
            job_advanced_threshold: default_job_advanced_threshold(),
            job_intermediate_threshold: default_job_intermediate_threshold(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            path_generation_ms: default_path_generation_ms(),
            search_ms: default_search_ms(),
            execution_ms: default_execution_ms(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// No artificial latency; used by tests and `--no-delay`.
    pub fn instant() -> Self {
        Self {
            path_generation_ms: 0,
            search_ms: 0,
            execution_ms: 0,
            seed: None,
        }
    }

    pub fn path_generation_delay(&self) -> Duration {
        Duration::from_millis(self.path_generation_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_goal: default_goal(),
            starter_streak: default_starter_streak(),
            starter_completed: default_starter_completed(),
        }
    }
}

/// Returns the configuration directory.
///
/// `SKILLPATH_HOME` wins when set. Otherwise `~/.config/skillpath[-dev]/`
/// based on `SKILLPATH_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SKILLPATH_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SKILLPATH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("skillpath-dev")
            } else {
                base_dir.join("skillpath")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional values serialize as null; accept a number or clear with "none".
                    serde_json::Value::Null => {
                        if value.eq_ignore_ascii_case("none") {
                            serde_json::Value::Null
                        } else {
                            serde_json::from_str(value)
                                .unwrap_or_else(|_| serde_json::Value::String(value.into()))
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// A file that parses but fails [`validate`](Self::validate) is rejected.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without touching disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Reject combinations the scoring code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.assessment;
        if a.pass_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                key: "assessment.pass_threshold".into(),
                message: "must be between 0 and 100".into(),
            });
        }
        if !(0.0..=1.0).contains(&a.partial_credit) {
            return Err(ConfigError::InvalidValue {
                key: "assessment.partial_credit".into(),
                message: "must be between 0.0 and 1.0".into(),
            });
        }
        if a.job_intermediate_threshold > a.job_advanced_threshold {
            return Err(ConfigError::InvalidValue {
                key: "assessment.job_intermediate_threshold".into(),
                message: "must not exceed job_advanced_threshold".into(),
            });
        }
        Ok(())
    }
}
