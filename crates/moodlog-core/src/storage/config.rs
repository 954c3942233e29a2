//! TOML-based application configuration.
//!
//! Stores the statistics tuning knobs:
//! - Highlight significance thresholds
//! - Trailing window lengths for peaks and the mood chart
//! - Rating cutoffs for positive and negative peaks
//!
//! Configuration is stored at `~/.config/moodlog/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::engine::{HighlightThresholds, StatsConfig, WindowConfig, MAX_WINDOW_DAYS};
use crate::error::ConfigError;
use crate::stats::PeakThresholds;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/moodlog/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: HighlightThresholds,
    #[serde(default)]
    pub windows: WindowConfig,
    #[serde(default)]
    pub ratings: PeakThresholds,
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
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // Every knob is a non-negative integer; reject anything else
                // before it reaches deserialization.
                let new_value = match existing {
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                    _ => return Err(unknown()),
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

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Read a config file at an explicit location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let config: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field bounds that the types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("windows.peaks_window_days", self.windows.peaks_window_days),
            ("windows.chart_window_days", self.windows.chart_window_days),
        ];
        for (key, days) in windows {
            if days > MAX_WINDOW_DAYS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{days} exceeds the maximum of {MAX_WINDOW_DAYS} days"),
                });
            }
        }
        Ok(())
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit location.
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
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Dot-separated keys of every knob, sorted.
    pub fn keys(&self) -> Vec<String> {
        let Ok(json) = serde_json::to_value(self) else {
            return Vec::new();
        };
        let mut keys = Vec::new();
        if let Some(sections) = json.as_object() {
            for (section, values) in sections {
                if let Some(values) = values.as_object() {
                    keys.extend(values.keys().map(|k| format!("{section}.{k}")));
                }
            }
        }
        keys
    }

    pub fn stats(&self) -> StatsConfig {
        StatsConfig {
            thresholds: self.thresholds,
            windows: self.windows,
            ratings: self.ratings,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.thresholds.mood_avg_min_percentage, 40);
        assert_eq!(parsed.windows.peaks_window_days, 14);
        assert_eq!(parsed.ratings.positive_min, 4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(indoc! {r#"
            [thresholds]
            mood_chart_min_items = 7

            [ratings]
            negative_max = 3
        "#})
        .unwrap();
        assert_eq!(cfg.thresholds.mood_chart_min_items, 7);
        assert_eq!(cfg.thresholds.mood_avg_min_items, 5);
        assert_eq!(cfg.ratings.negative_max, 3);
        assert_eq!(cfg.ratings.positive_min, 4);
        assert_eq!(cfg.windows, WindowConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("thresholds.mood_peaks_min_days").as_deref(), Some("2"));
        assert_eq!(cfg.get("windows.chart_window_days").as_deref(), Some("14"));
        assert_eq!(cfg.get("thresholds"), None);
        assert_eq!(cfg.get("nope.value"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn set_value_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set_value("thresholds.tags_peaks_min_items", "8").unwrap();
        assert_eq!(cfg.thresholds.tags_peaks_min_items, 8);
        assert_eq!(cfg.stats().thresholds.tags_peaks_min_items, 8);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set_value("thresholds.nope", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
        let err = cfg.set_value("windows", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_value_rejects_invalid_numbers() {
        let mut cfg = Config::default();
        let err = cfg.set_value("ratings.positive_min", "high").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        // Does not fit in a u8
        let err = cfg.set_value("ratings.positive_min", "300").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_value_rejects_oversized_windows() {
        let mut cfg = Config::default();
        let err = cfg
            .set_value("windows.chart_window_days", "4000000000")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "windows.chart_window_days"));
        assert_eq!(cfg, Config::default());

        cfg.set_value("windows.peaks_window_days", &MAX_WINDOW_DAYS.to_string())
            .unwrap();
        assert_eq!(cfg.windows.peaks_window_days, MAX_WINDOW_DAYS);
    }

    #[test]
    fn load_from_rejects_oversized_windows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[windows]\npeaks_window_days = 100000\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn keys_cover_every_section() {
        let keys = Config::default().keys();
        assert!(keys.contains(&"thresholds.mood_avg_min_percentage".to_string()));
        assert!(keys.contains(&"windows.peaks_window_days".to_string()));
        assert!(keys.contains(&"ratings.negative_max".to_string()));
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set_value("windows.peaks_window_days", "30").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.windows.peaks_window_days, 30);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thresholds\nbroken").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
