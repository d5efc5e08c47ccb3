use std::{fmt::Display, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    #[default]
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// User settings stored as json in the application directory. Every field has a default so
/// partially written files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Focused minutes a day needs to meet the goal.
    pub daily_goal_minutes: u32,
    pub date_style: DateStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            date_style: DateStyle::default(),
        }
    }
}

impl Config {
    /// Reads the config from `app_dir`. A missing file means defaults.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = app_dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded config from {path:?}");
                serde_json::from_str(&content).with_context(|| format!("Invalid config {path:?}"))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read config {path:?}")),
        }
    }

    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let path = app_dir.join(CONFIG_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!("Saved config to {path:?}");
        Ok(())
    }
}
