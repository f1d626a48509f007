//! The `[filter]` section of a preset.

use serde::{Deserialize, Serialize};
use tangents_core::{ControlSnapshot, FilterMode, FilterModel, Oversample, ParamIndex, RawParams};

use crate::validation::{ValidationError, ValidationResult, parse_param_value, validate_value};

/// Preset keys for the filter modes, indexed by [`FilterMode::index`].
pub const MODE_KEYS: [&str; 4] = ["lowpass", "bandpass", "highpass", "allpass"];

/// Preset keys for the saturation models, indexed by [`FilterModel::index`].
pub const MODEL_KEYS: [&str; 3] = ["yu", "ms", "xx"];

/// Accepted oversampling factors.
pub const OVERSAMPLE_FACTORS: [u32; 5] = [1, 2, 4, 8, 16];

/// Filter settings in display units.
///
/// Every field defaults to the parameter-table default, so a preset may
/// specify only what it changes.
///
/// # Example
///
/// ```rust
/// use tangents_config::FilterSettings;
/// use tangents_core::{FilterMode, ParamIndex};
///
/// let mut settings = FilterSettings::default();
/// settings.set("mode", "bp").unwrap();
/// settings.set("resonance", "75%").unwrap();
///
/// let raw = settings.to_raw_params().unwrap();
/// assert_eq!(raw.get(ParamIndex::Mode), FilterMode::Bandpass.index() as i32);
/// assert_eq!(raw.get(ParamIndex::Resonance), 750);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    /// Cutoff frequency in Hz (20 – 20000).
    pub cutoff_hz: f32,
    /// Resonance in percent (0 – 100).
    pub resonance: f32,
    /// Response: lowpass, bandpass, highpass or allpass.
    pub mode: String,
    /// Saturation model: yu, ms or xx.
    pub model: String,
    /// Oversampling factor: 1, 2, 4, 8 or 16.
    pub oversample: u32,
    /// Drive in percent (0 – 100, unity gain to 5×).
    pub drive: f32,
    /// AGR input control in percent (0 – 100, 50 = unity).
    pub input: f32,
    /// Cutoff CV depth in percent (−100 – 100).
    pub cv_cutoff_amount: f32,
    /// Resonance CV depth in percent (−100 – 100).
    pub cv_resonance_amount: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self::from_raw_params(&RawParams::default())
    }
}

impl FilterSettings {
    /// Settings equivalent to a raw parameter table (routing is ignored).
    pub fn from_raw_params(params: &RawParams) -> Self {
        let mode = FilterMode::from_index(params.get(ParamIndex::Mode));
        let model = FilterModel::from_index(params.get(ParamIndex::Model));
        let oversample = Oversample::from_index(params.get(ParamIndex::Oversample));

        Self {
            cutoff_hz: params.display_value(ParamIndex::Cutoff),
            resonance: params.display_value(ParamIndex::Resonance),
            mode: MODE_KEYS[mode.index()].to_string(),
            model: MODEL_KEYS[model.index()].to_string(),
            oversample: oversample.factor() as u32,
            drive: params.display_value(ParamIndex::Drive),
            input: params.display_value(ParamIndex::InputAgr),
            cv_cutoff_amount: params.display_value(ParamIndex::CvCutoffAmount),
            cv_resonance_amount: params.display_value(ParamIndex::CvResonanceAmount),
        }
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();
        for (param, value) in self.continuous() {
            if let Err(e) = validate_value(param, value) {
                errors.push(e);
            }
        }
        if let Err(e) = parse_mode(&self.mode) {
            errors.push(e);
        }
        if let Err(e) = parse_model(&self.model) {
            errors.push(e);
        }
        if let Err(e) = parse_oversample(self.oversample) {
            errors.push(e);
        }
        ValidationError::from_list(errors)
    }

    /// Encode into a raw parameter table with default routing.
    pub fn to_raw_params(&self) -> ValidationResult<RawParams> {
        self.validate()?;
        let mut params = RawParams::default();
        for (param, value) in self.continuous() {
            params.set(param, param.descriptor().raw_from_display(value));
        }
        params.set(ParamIndex::Mode, parse_mode(&self.mode)?.index() as i32);
        params.set(ParamIndex::Model, parse_model(&self.model)?.index() as i32);
        params.set(
            ParamIndex::Oversample,
            parse_oversample(self.oversample)?.index() as i32,
        );
        Ok(params)
    }

    /// Decode into per-block control targets.
    pub fn to_controls(&self) -> ValidationResult<ControlSnapshot> {
        Ok(ControlSnapshot::from_raw(&self.to_raw_params()?))
    }

    /// Set one field from a `key`/`value` string pair.
    ///
    /// Keys are case-insensitive; `-` and `_` are interchangeable. Besides
    /// the field names, `cutoff`, `res`, `agr`, `input_gain` and
    /// `oversampling` are accepted.
    pub fn set(&mut self, key: &str, value: &str) -> ValidationResult<()> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "mode" => {
                let mode = parse_mode(value)?;
                self.mode = MODE_KEYS[mode.index()].to_string();
            }
            "model" => {
                let model = parse_model(value)?;
                self.model = MODEL_KEYS[model.index()].to_string();
            }
            "oversample" | "oversampling" => {
                let factor = parse_param_value("oversample", value)?;
                if factor.fract() != 0.0 {
                    return Err(ValidationError::UnknownLabel {
                        param: "oversample".to_string(),
                        value: value.to_string(),
                        expected: "1, 2, 4, 8, 16".to_string(),
                    });
                }
                self.oversample = parse_oversample(factor as u32)?.factor() as u32;
            }
            _ => {
                let (param, field) = match key.as_str() {
                    "cutoff" | "cutoff_hz" => (ParamIndex::Cutoff, &mut self.cutoff_hz),
                    "resonance" | "res" => (ParamIndex::Resonance, &mut self.resonance),
                    "drive" => (ParamIndex::Drive, &mut self.drive),
                    "input" | "agr" | "input_gain" => (ParamIndex::InputAgr, &mut self.input),
                    "cv_cutoff_amount" => (ParamIndex::CvCutoffAmount, &mut self.cv_cutoff_amount),
                    "cv_resonance_amount" => {
                        (ParamIndex::CvResonanceAmount, &mut self.cv_resonance_amount)
                    }
                    _ => return Err(ValidationError::UnknownParameter(key.clone())),
                };
                let v = parse_param_value(param.descriptor().key, value)?;
                validate_value(param, v)?;
                *field = v;
            }
        }
        Ok(())
    }

    fn continuous(&self) -> [(ParamIndex, f32); 6] {
        [
            (ParamIndex::Cutoff, self.cutoff_hz),
            (ParamIndex::Resonance, self.resonance),
            (ParamIndex::Drive, self.drive),
            (ParamIndex::InputAgr, self.input),
            (ParamIndex::CvCutoffAmount, self.cv_cutoff_amount),
            (ParamIndex::CvResonanceAmount, self.cv_resonance_amount),
        ]
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect()
}

/// Parse a filter mode: a preset key, a display name or a two-letter
/// abbreviation (`lp`, `bp`, `hp`, `ap`).
pub fn parse_mode(label: &str) -> ValidationResult<FilterMode> {
    let norm = normalize_label(label);
    FilterMode::ALL
        .into_iter()
        .find(|m| {
            norm == MODE_KEYS[m.index()] || norm == m.short_name().to_ascii_lowercase()
        })
        .ok_or_else(|| ValidationError::UnknownLabel {
            param: "mode".to_string(),
            value: label.to_string(),
            expected: MODE_KEYS.join(", "),
        })
}

/// Parse a saturation model name (`yu`, `ms`, `xx`).
pub fn parse_model(label: &str) -> ValidationResult<FilterModel> {
    let norm = normalize_label(label);
    FilterModel::ALL
        .into_iter()
        .find(|m| norm == MODEL_KEYS[m.index()])
        .ok_or_else(|| ValidationError::UnknownLabel {
            param: "model".to_string(),
            value: label.to_string(),
            expected: MODEL_KEYS.join(", "),
        })
}

/// Parse an oversampling factor.
pub fn parse_oversample(factor: u32) -> ValidationResult<Oversample> {
    Oversample::from_factor(factor).ok_or_else(|| ValidationError::UnknownLabel {
        param: "oversample".to_string(),
        value: factor.to_string(),
        expected: "1, 2, 4, 8, 16".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parameter_table() {
        let s = FilterSettings::default();
        assert_eq!(s.cutoff_hz, 1000.0);
        assert_eq!(s.resonance, 0.0);
        assert_eq!(s.mode, "lowpass");
        assert_eq!(s.model, "yu");
        assert_eq!(s.oversample, 2);
        assert_eq!(s.drive, 0.0);
        assert_eq!(s.input, 50.0);
        assert_eq!(s.cv_cutoff_amount, 100.0);
        assert_eq!(s.to_raw_params().unwrap(), RawParams::default());
    }

    #[test]
    fn test_raw_roundtrip() {
        let raw = RawParams::default()
            .with(ParamIndex::Cutoff, 800)
            .with(ParamIndex::Resonance, 855)
            .with(ParamIndex::Mode, 2)
            .with(ParamIndex::Model, 2)
            .with(ParamIndex::Oversample, 3)
            .with(ParamIndex::Drive, 400)
            .with(ParamIndex::InputAgr, 120)
            .with(ParamIndex::CvResonanceAmount, -250);
        let s = FilterSettings::from_raw_params(&raw);
        assert_eq!(s.mode, "highpass");
        assert_eq!(s.model, "xx");
        assert_eq!(s.oversample, 8);
        assert_eq!(s.to_raw_params().unwrap(), raw);
    }

    #[test]
    fn test_set_fields() {
        let mut s = FilterSettings::default();
        s.set("Cutoff", "2.5kHz").unwrap();
        s.set("res", "40").unwrap();
        s.set("model", "MS").unwrap();
        s.set("mode", "All-pass").unwrap();
        s.set("oversampling", "16x").unwrap();
        s.set("input-gain", "10%").unwrap();
        assert_eq!(s.cutoff_hz, 2500.0);
        assert_eq!(s.resonance, 40.0);
        assert_eq!(s.model, "ms");
        assert_eq!(s.mode, "allpass");
        assert_eq!(s.oversample, 16);
        assert_eq!(s.input, 10.0);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut s = FilterSettings::default();
        assert!(matches!(
            s.set("wobble", "1"),
            Err(ValidationError::UnknownParameter(_))
        ));
        assert!(matches!(
            s.set("drive", "150"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            s.set("oversample", "3"),
            Err(ValidationError::UnknownLabel { .. })
        ));
        assert!(matches!(
            s.set("oversample", "2.5"),
            Err(ValidationError::UnknownLabel { .. })
        ));
        assert!(matches!(
            s.set("model", "moog"),
            Err(ValidationError::UnknownLabel { .. })
        ));
        // Rejected sets leave the settings untouched
        assert_eq!(s, FilterSettings::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let s = FilterSettings {
            cutoff_hz: 5.0,
            mode: "notch".to_string(),
            oversample: 6,
            ..Default::default()
        };
        match s.validate() {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected multiple errors, got {other:?}"),
        }
        assert!(s.to_raw_params().is_err());
    }

    #[test]
    fn test_parse_mode_aliases() {
        assert_eq!(parse_mode("LP").unwrap(), FilterMode::Lowpass);
        assert_eq!(parse_mode("band_pass").unwrap(), FilterMode::Bandpass);
        assert_eq!(parse_mode("ap").unwrap(), FilterMode::AllPass);
        assert!(parse_mode("comb").is_err());
    }

    #[test]
    fn test_to_controls() {
        let s = FilterSettings {
            drive: 100.0,
            resonance: 50.0,
            ..Default::default()
        };
        let c = s.to_controls().unwrap();
        assert_eq!(c.drive, 5.0);
        assert!((c.resonance - 0.5).abs() < 1e-6);
    }
}
