//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{report::ResourceLevels, status::ResourceLevel};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where status updates are delivered.
    pub backend: BackendCfg,
    /// Slider behavior and starting positions.
    pub form: FormCfg,
}

/// Rescue coordination backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendCfg {
    /// Base URL such as `https://api.example.org`. Empty keeps reports local.
    pub base_url: String,
    /// Shelter identifier used in the status endpoint path.
    pub shelter_id: String,
    /// Bearer token sent with each update (optional).
    pub auth_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Slider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormCfg {
    /// Percent points per Left/Right press.
    pub step: u8,
    /// Percent points per PageUp/PageDown press.
    pub coarse_step: u8,
    pub initial_capacity: u8,
    pub initial_food: u8,
    pub initial_water: u8,
    pub initial_medical: u8,
}

impl BackendCfg {
    /// True when a backend URL is configured.
    pub fn is_remote(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

impl FormCfg {
    /// Starting slider positions, clamped to `0..=100`.
    pub fn initial_levels(&self) -> ResourceLevels {
        ResourceLevels {
            capacity: ResourceLevel::new(self.initial_capacity),
            food: ResourceLevel::new(self.initial_food),
            water: ResourceLevel::new(self.initial_water),
            medical: ResourceLevel::new(self.initial_medical),
        }
    }
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for BackendCfg {
    fn default() -> Self {
        Self {
            base_url: "".into(),
            shelter_id: "".into(),
            auth_token: "".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for FormCfg {
    /// Sliders start centered, like the reporting screen they replace.
    fn default() -> Self {
        Self {
            step: 1,
            coarse_step: 10,
            initial_capacity: 50,
            initial_food: 50,
            initial_water: 50,
            initial_medical: 50,
        }
    }
}
