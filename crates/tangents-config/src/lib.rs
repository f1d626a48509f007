//! Presets and parameter validation for the Tangents filter.
//!
//! A preset is a small TOML file holding a name, a sample-rate hint and a
//! `[filter]` table in display units (Hz and percent). Presets convert to
//! the core's raw parameter table or directly to a [`ControlSnapshot`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tangents_config::{Preset, get_factory_preset, user_presets_dir};
//!
//! let mut preset = get_factory_preset("acid_squelch").unwrap();
//! preset.name = "Acid Variation".to_string();
//! preset.filter.set("cutoff", "1.2kHz").unwrap();
//!
//! let controls = preset.filter.to_controls().unwrap();
//! assert_eq!(controls.cutoff, 1200.0);
//!
//! preset.save(user_presets_dir().join("acid_variation.toml")).unwrap();
//! ```
//!
//! [`ControlSnapshot`]: tangents_core::ControlSnapshot

mod error;
mod preset;
mod settings;

/// Platform-specific paths for presets.
pub mod paths;

/// Parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, list_system_presets,
    list_user_presets, preset_name_from_path, system_presets_dir, user_presets_dir,
};
pub use preset::Preset;
pub use settings::{
    FilterSettings, MODE_KEYS, MODEL_KEYS, OVERSAMPLE_FACTORS, parse_mode, parse_model,
    parse_oversample,
};
pub use validation::{
    ValidationError, ValidationResult, display_range, parse_param_value, validate_value,
};
