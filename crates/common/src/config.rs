use crate::errors::Error;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// TOML configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 解析ヒューリスティックの閾値
///
/// いずれもデータ特性に合わせて調整するためのもので、普遍的な値ではない。
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_z_score_threshold")]
    pub z_score_threshold: f64,
    #[serde(default = "default_stability_band")]
    pub stability_band: f64,
    #[serde(default = "default_seasonality_confidence_cap")]
    pub seasonality_confidence_cap: f64,
    #[serde(default = "default_season_range_multiplier")]
    pub season_range_multiplier: f64,
    #[serde(default = "default_season_detection_ratio")]
    pub season_detection_ratio: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_rust_log_format")]
    pub rust_log_format: String,
}

// Default values
fn default_z_score_threshold() -> f64 {
    2.0
}
fn default_stability_band() -> f64 {
    0.05
}
fn default_seasonality_confidence_cap() -> f64 {
    0.99
}
fn default_season_range_multiplier() -> f64 {
    4.0
}
fn default_season_detection_ratio() -> f64 {
    0.5
}
fn default_rust_log_format() -> String {
    "term".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            z_score_threshold: default_z_score_threshold(),
            stability_band: default_stability_band(),
            seasonality_confidence_cap: default_seasonality_confidence_cap(),
            season_range_multiplier: default_season_range_multiplier(),
            season_detection_ratio: default_season_detection_ratio(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log_format: default_rust_log_format(),
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config files: {}. Using defaults.",
            e
        );
        Config::default()
    })
});

static CONFIG_STORE: Lazy<Arc<Mutex<HashMap<String, String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(HashMap::new())));

pub fn get(name: &str) -> anyhow::Result<String> {
    // Priority 1: CONFIG_STORE (runtime overrides)
    if let Some(value) = get_from_store(name) {
        if value.is_empty() {
            return Err(anyhow!("{} is empty", name));
        }
        return Ok(value);
    }

    // Priority 2: Environment variables
    if let Ok(val) = std::env::var(name)
        && !val.is_empty()
    {
        return Ok(val);
    }

    // Priority 3: TOML config
    let toml_value = match name {
        "ANALYSIS_Z_SCORE_THRESHOLD" => Some(CONFIG.analysis.z_score_threshold.to_string()),
        "ANALYSIS_STABILITY_BAND" => Some(CONFIG.analysis.stability_band.to_string()),
        "ANALYSIS_SEASONALITY_CONFIDENCE_CAP" => {
            Some(CONFIG.analysis.seasonality_confidence_cap.to_string())
        }
        "ANALYSIS_SEASON_RANGE_MULTIPLIER" => {
            Some(CONFIG.analysis.season_range_multiplier.to_string())
        }
        "ANALYSIS_SEASON_DETECTION_RATIO" => {
            Some(CONFIG.analysis.season_detection_ratio.to_string())
        }
        "RUST_LOG_FORMAT" => Some(CONFIG.logging.rust_log_format.clone()),
        _ => None,
    };

    if let Some(value) = toml_value
        && !value.is_empty()
    {
        return Ok(value);
    }

    Err(anyhow!("Configuration key not found: {}", name))
}

/// 設定値を取得して型変換する
///
/// キーが見つからない場合も、変換に失敗した場合も `InvalidConfig` を返す。
pub fn get_parsed<T>(name: &str) -> crate::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = get(name).map_err(|e| Error::InvalidConfig {
        key: name.to_string(),
        reason: e.to_string(),
    })?;
    value.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
        key: name.to_string(),
        reason: format!("{value:?}: {e}"),
    })
}

/// テスト用: 設定値を上書きする
///
/// 注: `#[cfg(test)]` にすると他クレート(analysis等)のテストから参照できないため
/// `#[doc(hidden)]` で公開している
#[doc(hidden)]
pub fn set(name: &str, value: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.insert(name.to_string(), value.to_string());
    }
}

/// テスト用: 設定値を CONFIG_STORE から削除する
#[doc(hidden)]
pub fn remove(name: &str) {
    if let Ok(mut store) = CONFIG_STORE.lock() {
        store.remove(name);
    }
}

/// テスト用: CONFIG_STORE に値をセットし、Drop 時に自動で元に戻す RAII ガード。
///
/// テストが途中で panic しても確実にクリーンアップされる。
#[doc(hidden)]
pub struct ConfigGuard {
    key: String,
    previous: Option<String>,
}

impl ConfigGuard {
    pub fn new(key: &str, value: &str) -> Self {
        let previous = get_from_store(key);
        set(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(prev) => set(&self.key, prev),
            None => remove(&self.key),
        }
    }
}

fn get_from_store(name: &str) -> Option<String> {
    if let Ok(store) = CONFIG_STORE.lock() {
        store.get(name).cloned()
    } else {
        None
    }
}

/// Load configuration from TOML files with priority:
/// 1. config/config.local.toml (git-ignored, for local overrides)
/// 2. config/config.toml (git-managed template)
/// 3. Default values
fn load_config() -> anyhow::Result<Config> {
    let mut config = Config::default();

    let base_path = "config/config.toml";
    if Path::new(base_path).exists() {
        let content = fs::read_to_string(base_path)?;
        config = toml::from_str(&content)?;
    }

    let local_path = "config/config.local.toml";
    if Path::new(local_path).exists() {
        let content = fs::read_to_string(local_path)?;
        let local_config: Config = toml::from_str(&content)?;
        merge_config(&mut config, local_config);
    }

    Ok(config)
}

/// Merge local config into base config (local values override base values)
fn merge_config(base: &mut Config, local: Config) {
    // Analysis
    if local.analysis.z_score_threshold != default_z_score_threshold() {
        base.analysis.z_score_threshold = local.analysis.z_score_threshold;
    }
    if local.analysis.stability_band != default_stability_band() {
        base.analysis.stability_band = local.analysis.stability_band;
    }
    if local.analysis.seasonality_confidence_cap != default_seasonality_confidence_cap() {
        base.analysis.seasonality_confidence_cap = local.analysis.seasonality_confidence_cap;
    }
    if local.analysis.season_range_multiplier != default_season_range_multiplier() {
        base.analysis.season_range_multiplier = local.analysis.season_range_multiplier;
    }
    if local.analysis.season_detection_ratio != default_season_detection_ratio() {
        base.analysis.season_detection_ratio = local.analysis.season_detection_ratio;
    }

    // Logging
    if local.logging.rust_log_format != default_rust_log_format() {
        base.logging.rust_log_format = local.logging.rust_log_format;
    }
}
