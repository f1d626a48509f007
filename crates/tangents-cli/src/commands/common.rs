//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use tangents_config::{Preset, find_preset, get_factory_preset};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))
}

/// Load a preset by name or path.
///
/// Factory presets win, then user and system presets, then a file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Preset::load(&path)
            .with_context(|| format!("failed to load preset {}", path.display()));
    }

    anyhow::bail!(
        "Preset '{name}' not found. Use 'tangents presets list' to see available presets."
    )
}

/// Convert a linear level to dBFS, floored at -120 dB.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        (20.0 * linear.log10()).max(-120.0)
    }
}
