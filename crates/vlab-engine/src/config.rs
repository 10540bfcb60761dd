//! Lab configuration
//!
//! Loaded from TOML. Every key is optional; missing keys keep their
//! defaults.
//!
//! ```toml
//! history_limit = 8
//! log_profile = "production"
//!
//! [sampling]
//! rc_samples = 600
//! max_duration_s = 60.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use vlab_core::errors::{Result, VlabError};
use vlab_core::logging_facility::Profile;
use vlab_core::SamplingConfig;

/// Commands remembered by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Maximum number of distinct commands kept in history
    pub history_limit: usize,
    pub log_profile: Profile,
    pub sampling: SamplingConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_profile: Profile::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl LabConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the TOML is malformed or a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LabConfig = toml::from_str(text).map_err(|e| VlabError::InvalidConfig {
            reason: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` when the file can't be read, otherwise as [`LabConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| VlabError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| VlabError::Serialization {
            message: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// `InvalidConfig` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(VlabError::InvalidConfig {
                reason: "history_limit must be positive".to_string(),
            });
        }
        self.sampling.validate()
    }
}
