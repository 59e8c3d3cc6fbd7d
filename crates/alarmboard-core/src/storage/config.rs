//! TOML-based application configuration.
//!
//! Stores tunables for:
//! - Gesture timing (tap window, long-press threshold)
//! - Pattern pad geometry and minimum length
//! - Board capacity
//! - Recurrence search horizon
//!
//! Configuration is stored at `~/.config/alarmboard/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::gesture::{GestureTiming, DEFAULT_LONG_PRESS_MS, DEFAULT_TAP_WINDOW_MS};
use crate::pattern::{PatternGrid, MIN_PATTERN_NODES};
use crate::recurrence::{MAX_SEARCH_HORIZON_DAYS, SEARCH_HORIZON_DAYS};
use crate::store::DEFAULT_CAPACITY;

/// Gesture timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_tap_window_ms")]
    pub tap_window_ms: u64,
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
}

/// Pattern pad configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default = "default_min_nodes")]
    pub min_nodes: usize,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,
}

/// Alarm board configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of alarms; 0 means unbounded.
    #[serde(default = "default_max_alarms")]
    pub max_alarms: usize,
}

/// Recurrence engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceConfig {
    #[serde(default = "default_search_horizon_days")]
    pub search_horizon_days: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/alarmboard/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub pattern: PatternConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
}

// Default functions
fn default_tap_window_ms() -> u64 {
    DEFAULT_TAP_WINDOW_MS
}
fn default_long_press_ms() -> u64 {
    DEFAULT_LONG_PRESS_MS
}
fn default_min_nodes() -> usize {
    MIN_PATTERN_NODES
}
fn default_cell_size() -> f32 {
    PatternGrid::default().cell_size
}
fn default_hit_radius() -> f32 {
    PatternGrid::default().hit_radius
}
fn default_max_alarms() -> usize {
    DEFAULT_CAPACITY
}
fn default_search_horizon_days() -> i64 {
    SEARCH_HORIZON_DAYS
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_window_ms: default_tap_window_ms(),
            long_press_ms: default_long_press_ms(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_nodes: default_min_nodes(),
            cell_size: default_cell_size(),
            hit_radius: default_hit_radius(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_alarms: default_max_alarms(),
        }
    }
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            search_horizon_days: default_search_horizon_days(),
        }
    }
}

impl GestureConfig {
    pub fn timing(&self) -> GestureTiming {
        GestureTiming {
            tap_window_ms: self.tap_window_ms,
            long_press_ms: self.long_press_ms,
        }
    }
}

impl PatternConfig {
    pub fn grid(&self) -> PatternGrid {
        PatternGrid {
            cell_size: self.cell_size,
            hit_radius: self.hit_radius,
        }
    }
}

impl StoreConfig {
    pub fn capacity(&self) -> Option<usize> {
        (self.max_alarms > 0).then_some(self.max_alarms)
    }
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
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
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
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.gesture.tap_window_ms == 0 {
            return Err(invalid("gesture.tap_window_ms", "must be positive"));
        }
        if self.gesture.long_press_ms == 0 {
            return Err(invalid("gesture.long_press_ms", "must be positive"));
        }
        if !(MIN_PATTERN_NODES..=9).contains(&self.pattern.min_nodes) {
            return Err(invalid("pattern.min_nodes", "must be between 2 and 9"));
        }
        if self.pattern.hit_radius <= 0.0 || self.pattern.cell_size <= 0.0 {
            return Err(invalid("pattern", "grid dimensions must be positive"));
        }
        if !(0..=MAX_SEARCH_HORIZON_DAYS).contains(&self.recurrence.search_horizon_days) {
            return Err(invalid("recurrence.search_horizon_days", "must be between 0 and 1464"));
        }
        Ok(())
    }

    /// Load from `path`, or return defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if it holds invalid values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
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

    /// Set a config value by key, in memory. Returns error if the key is
    /// unknown or the resulting config is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gesture.tap_window_ms, 280);
        assert_eq!(parsed.store.max_alarms, 8);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[gesture]\nlong_press_ms = 600\n").unwrap();
        assert_eq!(parsed.gesture.long_press_ms, 600);
        assert_eq!(parsed.gesture.tap_window_ms, 280);
        assert_eq!(parsed.recurrence.search_horizon_days, 365);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("gesture.long_press_ms").as_deref(), Some("450"));
        assert_eq!(cfg.get("pattern.min_nodes").as_deref(), Some("2"));
        assert!(cfg.get("gesture.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("gesture.tap_window_ms", "300").unwrap();
        assert_eq!(cfg.gesture.tap_window_ms, 300);
        cfg.set("pattern.hit_radius", "30.5").unwrap();
        assert_eq!(cfg.pattern.hit_radius, 30.5);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("gesture.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("gesture", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("store.max_alarms", "many").is_err());
        assert!(cfg.set("gesture.long_press_ms", "0").is_err());
        assert_eq!(cfg.gesture.long_press_ms, 450);
        assert!(cfg.set("pattern.min_nodes", "1").is_err());
        assert!(cfg.set("pattern.min_nodes", "10").is_err());
        assert_eq!(cfg.pattern.min_nodes, 2);
        assert!(cfg.set("recurrence.search_horizon_days", "5000").is_err());
        assert!(cfg.set("recurrence.search_horizon_days", "-1").is_err());
        assert_eq!(cfg.recurrence.search_horizon_days, 365);
        cfg.set("recurrence.search_horizon_days", "1464").unwrap();
    }

    #[test]
    fn store_capacity_zero_is_unbounded() {
        let mut cfg = Config::default();
        assert_eq!(cfg.store.capacity(), Some(8));
        cfg.set("store.max_alarms", "0").unwrap();
        assert_eq!(cfg.store.capacity(), None);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().store.max_alarms, 8);

        let mut cfg = Config::default();
        cfg.set("recurrence.search_horizon_days", "30").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.recurrence.search_horizon_days, 30);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gesture = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
