use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "BURNDOWN_CONFIG_PATH";

/// Line interpolations the chart renderer understands. Canonical casing is
/// what gets handed to the renderer.
pub const INTERPOLATIONS: [&str; 11] = [
    "basis",
    "bundle",
    "cardinal",
    "catmullRom",
    "linear",
    "monotoneX",
    "monotoneY",
    "natural",
    "step",
    "stepAfter",
    "stepBefore",
];

pub const DEFAULT_INTERPOLATION: &str = "linear";

/// Map a user-supplied interpolation name onto its canonical renderer name.
/// Matching is case-insensitive and tolerant of surrounding whitespace.
pub fn canonical_interpolation(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    INTERPOLATIONS
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        .map(|candidate| candidate.to_string())
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interpolation: Option<String>,
    #[serde(default)]
    pub default_member: Option<String>,
}

impl Config {
    pub fn interpolation_or_default(&self) -> &str {
        self.interpolation.as_deref().unwrap_or(DEFAULT_INTERPOLATION)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub interpolation: Option<String>,
    pub default_member: Option<String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("burndown")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("burndown")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    normalize_interpolation(config)
}

fn normalize_interpolation(mut config: Config) -> Result<Config, AppError> {
    if let Some(raw) = config.interpolation.as_deref() {
        let canonical = canonical_interpolation(raw)
            .ok_or_else(|| AppError::invalid_data(format!("unknown interpolation '{raw}'")))?;
        config.interpolation = Some(canonical);
    }
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Result<Config, AppError> {
    let mut merged = base.clone();

    if let Some(raw) = overrides.interpolation.as_deref() {
        let canonical = canonical_interpolation(raw)
            .ok_or_else(|| AppError::invalid_input(format!("unknown interpolation '{raw}'")))?;
        merged.interpolation = Some(canonical);
    }

    if let Some(member) = overrides.default_member.as_deref() {
        merged.default_member = Some(member.trim().to_string());
    }

    Ok(merged)
}
