//! Configuration and serialization module.

use crate::error::{FringeError, Result};
use crate::fringe::Shape;
use crate::session::Interval;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FRINGE_PROJECTOR_CONFIG";

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FringeConfig {
    /// Seconds each pattern stays on screen.
    pub interval_secs: f64,
    /// Ask for the interval on stdin before starting.
    pub prompt_for_interval: bool,
    /// Generate at `[height, width]` instead of the monitor resolution.
    pub shape_override: Option<[u32; 2]>,
    /// Monitor to go full-screen on.
    pub monitor_index: Option<usize>,
    /// Also write the generated sequence as PNG files here.
    pub export_dir: Option<PathBuf>,
}

impl Default for FringeConfig {
    fn default() -> Self {
        Self {
            interval_secs: Interval::DEFAULT_SECS,
            prompt_for_interval: true,
            shape_override: None,
            monitor_index: None,
            export_dir: None,
        }
    }
}

impl FringeConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("fringe-projector");
            p.push("config.json");
            p
        })
    }

    /// Load from `$FRINGE_PROJECTOR_CONFIG`, then the default path.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            FringeError::InvalidConfiguration(format!("{}: {}", path.display(), e))
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Configured interval, falling back to the default if invalid.
    pub fn interval(&self) -> Interval {
        Interval::from_secs_lossy(self.interval_secs)
    }

    pub fn shape_override(&self) -> Result<Option<Shape>> {
        self.shape_override
            .map(|[height, width]| Shape::new(height, width))
            .transpose()
    }
}
