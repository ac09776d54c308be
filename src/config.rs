// src/config.rs
//! Runtime settings: defaults ← TOML file ← individual env overrides.
//!
//! File lookup: `$CALM_CONFIG_PATH` (must exist when set), else
//! `config/calm.toml` (optional).

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "CALM_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/calm.toml";

pub const ENV_TIPS_PATH: &str = "CALM_TIPS_PATH";
pub const ENV_SUMMARY_WINDOW: &str = "CALM_SUMMARY_WINDOW";
pub const ENV_MAX_TURNS: &str = "CALM_MAX_TURNS";
pub const ENV_TIPS_PER_TURN: &str = "CALM_TIPS_PER_TURN";
pub const ENV_ANALYTICS_MAX_RECORDS: &str = "CALM_ANALYTICS_MAX_RECORDS";

fn default_app_name() -> String {
    "CalmCompanion API".to_string()
}
fn default_tips_path() -> PathBuf {
    PathBuf::from("data/caregiver_guides/tips.md")
}
fn default_max_turns_kept() -> usize {
    200
}
fn default_summary_window() -> usize {
    5
}
fn default_tips_per_turn() -> usize {
    2
}
fn default_analytics_max_records() -> usize {
    1000
}

/// Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_tips_path")]
    pub tips_path: PathBuf,
    #[serde(default = "default_max_turns_kept")]
    pub max_turns_kept: usize,
    #[serde(default = "default_summary_window")]
    pub summary_window: usize,
    #[serde(default = "default_tips_per_turn")]
    pub tips_per_turn: usize,
    #[serde(default = "default_analytics_max_records")]
    pub analytics_max_records: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            tips_path: default_tips_path(),
            max_turns_kept: default_max_turns_kept(),
            summary_window: default_summary_window(),
            tips_per_turn: default_tips_per_turn(),
            analytics_max_records: default_analytics_max_records(),
        }
    }
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let cfg: Settings =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolve settings from the environment and optional config file.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
                if pb.exists() {
                    Self::load_from_file(&pb)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_env();
        Ok(cfg)
    }

    /// Individual env overrides; unparseable values are ignored.
    fn apply_env(&mut self) {
        if let Ok(p) = std::env::var(ENV_TIPS_PATH) {
            if !p.trim().is_empty() {
                self.tips_path = PathBuf::from(p.trim());
            }
        }
        if let Some(v) = env_usize(ENV_SUMMARY_WINDOW) {
            self.summary_window = v;
        }
        if let Some(v) = env_usize(ENV_MAX_TURNS) {
            self.max_turns_kept = v;
        }
        if let Some(v) = env_usize(ENV_TIPS_PER_TURN) {
            self.tips_per_turn = v;
        }
        if let Some(v) = env_usize(ENV_ANALYTICS_MAX_RECORDS) {
            self.analytics_max_records = v;
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Settings = toml::from_str("summary_window = 8\n").unwrap();
        assert_eq!(cfg.summary_window, 8);
        assert_eq!(cfg.max_turns_kept, 200);
        assert_eq!(cfg.tips_path, default_tips_path());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let cfg = Settings::load_from_file(&path).unwrap();
        assert_eq!(cfg, Settings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<Settings>("bind_addr = \"0.0.0.0:9000\"\n").unwrap_err();
        assert!(err.to_string().contains("bind_addr"), "{err}");
    }

    #[test]
    fn empty_toml_equals_default() {
        let cfg: Settings = toml::from_str("").unwrap();
        assert_eq!(cfg, Settings::default());
    }
}
