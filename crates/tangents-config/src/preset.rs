//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::settings::FilterSettings;
use crate::validation::ValidationResult;

/// A named filter setting stored as TOML.
///
/// Bus routing is a host concern and is not part of a preset.
///
/// # TOML Format
///
/// ```toml
/// name = "Acid Squelch"
/// description = "Resonant lowpass with the XX model"
/// sample_rate = 48000
///
/// [filter]
/// cutoff_hz = 650.0
/// resonance = 88.0
/// mode = "lowpass"
/// model = "xx"
/// oversample = 4
/// drive = 35.0
/// ```
///
/// Every `[filter]` key is optional and falls back to the parameter default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    /// Offline rendering uses the source file's rate instead and warns
    /// when the two differ.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Filter settings.
    #[serde(default)]
    pub filter: FilterSettings,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a preset with default filter settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: 48000,
            filter: FilterSettings::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the filter settings.
    pub fn with_filter(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    /// Load a preset from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string and validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the filter settings and sample rate.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();
        if let Err(e) = self.filter.validate() {
            errors.push(e);
        }
        if self.sample_rate == 0 {
            errors.push(crate::ValidationError::InvalidFormat {
                param: "sample_rate".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        crate::ValidationError::from_list(errors)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
