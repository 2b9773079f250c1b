use crate::error::{Result, TrailheadError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A venue entry used by registration to validate the chosen city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Calendar days an employee must have served before the final exam can
    /// be opened or a promotion applied.
    #[serde(default = "default_tenure_days")]
    pub tenure_days: i64,
    /// Attraction catalog offered during registration, in display order.
    #[serde(default = "default_attractions")]
    pub attractions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

fn default_version() -> u32 {
    1
}

fn default_tenure_days() -> i64 {
    30
}

fn default_attractions() -> Vec<String> {
    ["Twister", "VR-Helicopter", "VR-Eggs", "Emotion"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            tenure_days: default_tenure_days(),
            attractions: default_attractions(),
            locations: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(TrailheadError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn knows_city(&self, city: &str) -> bool {
        self.locations.is_empty() || self.locations.iter().any(|l| l.city == city)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.tenure_days <= 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "tenure_days={} disables the tenure gate",
                    self.tenure_days
                ),
            });
        }

        for (i, name) in self.attractions.iter().enumerate() {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("attraction {} has an empty name", i + 1),
                });
            }
            if self.attractions[..i].contains(name) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("duplicate attraction '{name}'"),
                });
            }
        }

        for location in &self.locations {
            if location.city.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("location '{}' has an empty city", location.title),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
