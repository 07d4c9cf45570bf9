//! Tool settings (`essaygrade.toml`).
//!
//! Settings tune the default matching primitives and feedback formatting.
//! They never change grading policy; that lives in the question file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level essaygrade settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fuzzy: FuzzySettings,
    #[serde(default)]
    pub feedback: FeedbackSettings,
}

/// Tolerances for approximate keyword matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySettings {
    /// Tolerated edit distance as a fraction of the keyword length.
    #[serde(default = "default_error_ratio")]
    pub max_error_ratio: f64,
    /// Keywords shorter than this (in characters) never match approximately.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for FuzzySettings {
    fn default() -> Self {
        Self {
            max_error_ratio: default_error_ratio(),
            min_length: default_min_length(),
        }
    }
}

fn default_error_ratio() -> f64 {
    0.25
}

fn default_min_length() -> usize {
    4
}

/// Formatting of the composed feedback text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSettings {
    /// Appended after the keyword messages when there are any.
    #[serde(default = "default_line_break")]
    pub line_break: String,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            line_break: default_line_break(),
        }
    }
}

fn default_line_break() -> String {
    "\n".to_string()
}

/// Load settings from well-known paths.
///
/// Search order:
/// 1. `essaygrade.toml` in the current directory
/// 2. `~/.config/essaygrade/config.toml`
///
/// Environment variable override: `ESSAYGRADE_LINE_BREAK`.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(None)
}

/// Load settings from an explicit path, or search the default locations.
pub fn load_settings_from(path: Option<&Path>) -> Result<Settings> {
    let settings_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("settings file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("essaygrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut settings = match settings_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let settings = parse_settings(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            tracing::debug!("loaded settings from {}", path.display());
            settings
        }
        None => Settings::default(),
    };

    if let Ok(line_break) = std::env::var("ESSAYGRADE_LINE_BREAK") {
        settings.feedback.line_break = line_break;
    }

    Ok(settings)
}

/// Parse and check a settings document.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content)?;
    anyhow::ensure!(
        (0.0..=1.0).contains(&settings.fuzzy.max_error_ratio),
        "fuzzy.max_error_ratio must be between 0.0 and 1.0"
    );
    Ok(settings)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("essaygrade"))
}
