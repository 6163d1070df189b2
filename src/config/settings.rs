use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::hijri::HijriMethod;

fn default_hijri_method() -> HijriMethod {
    HijriMethod::UmmAlQura
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_journey_weeks() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HijriConfig {
    /// Conversion method: the Umm-al-Qura tables or the arithmetic civil
    /// calendar.
    #[serde(default = "default_hijri_method")]
    pub method: HijriMethod,
    /// Days to add/subtract from the Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub offset_days: i32,
}

impl Default for HijriConfig {
    fn default() -> Self {
        Self {
            method: default_hijri_method(),
            offset_days: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Weeks shown in the journey grid.
    #[serde(default = "default_journey_weeks")]
    pub weeks: usize,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            weeks: default_journey_weeks(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub hijri: HijriConfig,
    #[serde(default)]
    pub journey: JourneyConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "ibtida").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("ibtida.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
