//! Built-in presets, embedded at compile time.

use crate::Preset;

/// Keys of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "acid_squelch",
    "warm_lowpass",
    "vowel_band",
    "thin_highpass",
    "phase_notch",
    "diode_scream",
    "sine_ring",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("acid_squelch", ACID_SQUELCH_PRESET),
    ("warm_lowpass", WARM_LOWPASS_PRESET),
    ("vowel_band", VOWEL_BAND_PRESET),
    ("thin_highpass", THIN_HIGHPASS_PRESET),
    ("phase_notch", PHASE_NOTCH_PRESET),
    ("diode_scream", DIODE_SCREAM_PRESET),
    ("sine_ring", SINE_RING_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Parameter defaults: 1 kHz lowpass, YU model, 2x oversampling"
"#;

const ACID_SQUELCH_PRESET: &str = r#"
name = "Acid Squelch"
description = "High-resonance lowpass pushed into the XX saturator"
[filter]
cutoff_hz = 650.0
resonance = 88.0
mode = "lowpass"
model = "xx"
oversample = 4
drive = 35.0
input = 65.0
"#;

const WARM_LOWPASS_PRESET: &str = r#"
name = "Warm Lowpass"
description = "Gentle darkening with soft YU saturation"
[filter]
cutoff_hz = 2200.0
resonance = 15.0
mode = "lowpass"
model = "yu"
oversample = 2
drive = 20.0
"#;

const VOWEL_BAND_PRESET: &str = r#"
name = "Vowel Band"
description = "Narrow bandpass for CV-swept formants"
[filter]
cutoff_hz = 900.0
resonance = 70.0
mode = "bandpass"
model = "ms"
oversample = 4
cv_cutoff_amount = 60.0
"#;

const THIN_HIGHPASS_PRESET: &str = r#"
name = "Thin Highpass"
description = "Removes low end for telephone-style lines"
[filter]
cutoff_hz = 1200.0
resonance = 25.0
mode = "highpass"
model = "yu"
oversample = 2
"#;

const PHASE_NOTCH_PRESET: &str = r#"
name = "Phase Notch"
description = "LP minus HP response for a moving notch"
[filter]
cutoff_hz = 1500.0
resonance = 40.0
mode = "allpass"
model = "yu"
oversample = 4
"#;

const DIODE_SCREAM_PRESET: &str = r#"
name = "Diode Scream"
description = "MS diode clipping driven hard with random input gain"
[filter]
cutoff_hz = 3000.0
resonance = 80.0
mode = "lowpass"
model = "ms"
oversample = 8
drive = 80.0
input = 20.0
"#;

const SINE_RING_PRESET: &str = r#"
name = "Sine Ring"
description = "Full resonance self-oscillation at 440 Hz"
[filter]
cutoff_hz = 440.0
resonance = 100.0
mode = "bandpass"
model = "yu"
oversample = 16
"#;

/// Parse every factory preset.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by key or display name, ignoring case.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| *key == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Check whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
