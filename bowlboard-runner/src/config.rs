//! Serializable standings configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bowlboard_core::standings::EngineConfig;

/// Unique identifier for a configuration (content-addressable hash).
pub type ConfigId = String;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("judge panel size is not configured by the store or the config")]
    PanelSizeMissing,

    #[error("judge panel size must be at least 1")]
    PanelSizeZero,

    #[error("inconsistent judge panel size: store declares {declared}, config says {configured}")]
    PanelSizeMismatch { declared: usize, configured: usize },
}

/// Host-facing configuration for one standings computation.
///
/// The panel size normally comes from the store; a config value acts as a
/// cross-check and must agree when both are present. Ambiguity is fatal —
/// no standings are produced on inconsistent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsConfig {
    /// Judge-panel size. Optional when the store declares it.
    pub panel_size: Option<usize>,

    /// Master seed for coin-flip draws.
    pub master_seed: u64,

    /// Count only matches with `round <= through_round`, when set.
    pub through_round: Option<u32>,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            panel_size: None,
            master_seed: 0,
            through_round: None,
        }
    }
}

impl StandingsConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two computations with identical configs share a ConfigId, which lets
    /// hosts key caches and artifact directories.
    pub fn config_id(&self) -> ConfigId {
        let json = serde_json::to_string(self).expect("StandingsConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Reconcile the configured panel size with the store's declared one.
    pub fn resolve_panel_size(&self, declared: Option<usize>) -> Result<usize, ConfigError> {
        let panel_size = match (declared, self.panel_size) {
            (Some(d), Some(c)) if d != c => {
                return Err(ConfigError::PanelSizeMismatch {
                    declared: d,
                    configured: c,
                })
            }
            (Some(d), _) => d,
            (None, Some(c)) => c,
            (None, None) => return Err(ConfigError::PanelSizeMissing),
        };
        if panel_size == 0 {
            return Err(ConfigError::PanelSizeZero);
        }
        Ok(panel_size)
    }

    /// Build the core engine config, validating panel size on the way.
    pub fn to_engine_config(&self, declared: Option<usize>) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            panel_size: self.resolve_panel_size(declared)?,
            master_seed: self.master_seed,
            through_round: self.through_round,
        })
    }
}
