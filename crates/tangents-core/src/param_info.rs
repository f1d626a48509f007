//! Parameter table: the integer-encoded control surface shared with hosts.
//!
//! Hosts store every control as a raw `i32` in a fixed-size table
//! ([`RawParams`]) indexed by [`ParamIndex`]. Display scaling is metadata on
//! the [`ParamDescriptor`] only: a resonance of 47.5 % is stored as `475`.
//! The engine decodes the table into real units once per block (see
//! [`ControlSnapshot`](crate::ControlSnapshot)) and never writes to it.
//!
//! # Layout
//!
//! | Index | Name | Range | Default |
//! |-------|------|-------|---------|
//! | 0 | Input | 1–28 | 1 |
//! | 1 | Output | 1–28 | 13 |
//! | 2 | Output mode | 0–1 | 1 (replace) |
//! | 3 | Cutoff | 20–20000 Hz | 1000 |
//! | 4 | Resonance | 0–1000 (0.1 %) | 0 |
//! | 5 | Mode | 0–3 | 0 |
//! | 6 | Model | 0–2 | 0 |
//! | 7 | CV Cutoff | 0–28 (0 = none) | 0 |
//! | 8 | CV Cut Amt | −1000–1000 (0.1 %) | 1000 |
//! | 9 | CV Res | 0–28 (0 = none) | 0 |
//! | 10 | CV Res Amt | −1000–1000 (0.1 %) | 1000 |
//! | 11 | Input (AGR) | 0–1000 (0.1 %) | 500 |
//! | 12 | Drive | 0–1000 (0.1 %) | 0 |
//! | 13 | Oversample | 0–4 | 1 (2×) |
//!
//! # Example
//!
//! ```rust
//! use tangents_core::{ParamIndex, RawParams};
//!
//! let mut params = RawParams::default();
//! params.set(ParamIndex::Resonance, 5000); // clamped to 1000
//! assert_eq!(params.get(ParamIndex::Resonance), 1000);
//! assert_eq!(ParamIndex::Resonance.descriptor().display_value(475), 47.5);
//! ```

use crate::model::{MODE_NAMES, MODEL_NAMES, OVERSAMPLE_NAMES};

/// Number of busses a host exposes.
pub const MAX_BUSSES: i32 = 28;

/// Number of entries in the parameter table.
pub const NUM_PARAMS: usize = 14;

/// Unit type for formatting a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Hertz (Hz).
    Hertz,
    /// Percentage (%).
    Percent,
    /// Index into `enum_strings`.
    Enum,
    /// Audio input bus number.
    AudioInput,
    /// Audio output bus number.
    AudioOutput,
    /// Control-voltage input bus number, 0 = not connected.
    CvInput,
    /// Replace (1) or add (0).
    OutputMode,
}

impl ParamUnit {
    /// Unit suffix for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Percent => "%",
            _ => "",
        }
    }
}

/// Display scaling of the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScaling {
    /// Raw value shown as-is.
    #[default]
    None,
    /// Raw value shown divided by 10 (0.1 resolution).
    Tenths,
}

impl ParamScaling {
    /// Divisor from raw to display units.
    pub const fn divisor(self) -> f32 {
        match self {
            ParamScaling::None => 1.0,
            ParamScaling::Tenths => 10.0,
        }
    }
}

/// Metadata for one entry of the parameter table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name.
    pub name: &'static str,
    /// Stable snake_case key used by presets and the CLI.
    pub key: &'static str,
    /// Unit type.
    pub unit: ParamUnit,
    /// Minimum raw value.
    pub min: i32,
    /// Maximum raw value.
    pub max: i32,
    /// Default raw value.
    pub default: i32,
    /// Display scaling.
    pub scaling: ParamScaling,
    /// Labels for enum parameters.
    pub enum_strings: Option<&'static [&'static str]>,
}

impl ParamDescriptor {
    const fn new(
        name: &'static str,
        key: &'static str,
        unit: ParamUnit,
        min: i32,
        max: i32,
        default: i32,
    ) -> Self {
        Self {
            name,
            key,
            unit,
            min,
            max,
            default,
            scaling: ParamScaling::None,
            enum_strings: None,
        }
    }

    const fn tenths(mut self) -> Self {
        self.scaling = ParamScaling::Tenths;
        self
    }

    const fn with_enum(mut self, strings: &'static [&'static str]) -> Self {
        self.enum_strings = Some(strings);
        self
    }

    /// Clamp a raw value to `[min, max]`.
    #[inline]
    pub fn clamp(&self, raw: i32) -> i32 {
        raw.clamp(self.min, self.max)
    }

    /// Raw value in display units.
    #[inline]
    pub fn display_value(&self, raw: i32) -> f32 {
        raw as f32 / self.scaling.divisor()
    }

    /// Raw value for a display-unit value, rounded to the nearest step and
    /// clamped.
    pub fn raw_from_display(&self, value: f32) -> i32 {
        let raw = libm::roundf(value * self.scaling.divisor());
        self.clamp(raw as i32)
    }

    /// Label of an enum value, if this is an enum parameter and `raw` is in
    /// range.
    pub fn enum_label(&self, raw: i32) -> Option<&'static str> {
        let strings = self.enum_strings?;
        usize::try_from(raw).ok().and_then(|i| strings.get(i).copied())
    }

    /// Raw value of an enum label (case-insensitive).
    pub fn enum_value(&self, label: &str) -> Option<i32> {
        self.enum_strings?
            .iter()
            .position(|s| s.eq_ignore_ascii_case(label))
            .map(|i| i as i32)
    }
}

/// Position of each control in the parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ParamIndex {
    /// Audio input bus.
    Input,
    /// Audio output bus.
    Output,
    /// Replace or add into the output bus.
    OutputMode,
    /// Cutoff frequency.
    Cutoff,
    /// Resonance.
    Resonance,
    /// Filter response.
    Mode,
    /// Saturation model.
    Model,
    /// Cutoff CV bus.
    CvCutoff,
    /// Cutoff CV depth.
    CvCutoffAmount,
    /// Resonance CV bus.
    CvResonance,
    /// Resonance CV depth.
    CvResonanceAmount,
    /// Attenu-Gain-Randomizer.
    InputAgr,
    /// Drive.
    Drive,
    /// Oversampling factor.
    Oversample,
}

impl ParamIndex {
    /// All indices in table order.
    pub const ALL: [ParamIndex; NUM_PARAMS] = [
        ParamIndex::Input,
        ParamIndex::Output,
        ParamIndex::OutputMode,
        ParamIndex::Cutoff,
        ParamIndex::Resonance,
        ParamIndex::Mode,
        ParamIndex::Model,
        ParamIndex::CvCutoff,
        ParamIndex::CvCutoffAmount,
        ParamIndex::CvResonance,
        ParamIndex::CvResonanceAmount,
        ParamIndex::InputAgr,
        ParamIndex::Drive,
        ParamIndex::Oversample,
    ];

    /// Table position.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Descriptor for this entry.
    #[inline]
    pub const fn descriptor(self) -> &'static ParamDescriptor {
        &PARAMETERS[self as usize]
    }

    /// Look up by preset key or full name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let d = p.descriptor();
            d.key.eq_ignore_ascii_case(name) || d.name.eq_ignore_ascii_case(name)
        })
    }
}

/// Labels for the output-mode parameter.
pub const OUTPUT_MODE_NAMES: [&str; 2] = ["Add", "Replace"];

/// The parameter table, indexed by [`ParamIndex`].
pub static PARAMETERS: [ParamDescriptor; NUM_PARAMS] = [
    ParamDescriptor::new("Input", "input_bus", ParamUnit::AudioInput, 1, MAX_BUSSES, 1),
    ParamDescriptor::new("Output", "output_bus", ParamUnit::AudioOutput, 1, MAX_BUSSES, 13),
    ParamDescriptor::new("Output mode", "output_mode", ParamUnit::OutputMode, 0, 1, 1)
        .with_enum(&OUTPUT_MODE_NAMES),
    ParamDescriptor::new("Cutoff", "cutoff_hz", ParamUnit::Hertz, 20, 20000, 1000),
    ParamDescriptor::new("Resonance", "resonance", ParamUnit::Percent, 0, 1000, 0).tenths(),
    ParamDescriptor::new("Mode", "mode", ParamUnit::Enum, 0, 3, 0).with_enum(&MODE_NAMES),
    ParamDescriptor::new("Model", "model", ParamUnit::Enum, 0, 2, 0).with_enum(&MODEL_NAMES),
    ParamDescriptor::new("CV Cutoff", "cv_cutoff_bus", ParamUnit::CvInput, 0, MAX_BUSSES, 0),
    ParamDescriptor::new("CV Cut Amt", "cv_cutoff_amount", ParamUnit::Percent, -1000, 1000, 1000)
        .tenths(),
    ParamDescriptor::new("CV Res", "cv_resonance_bus", ParamUnit::CvInput, 0, MAX_BUSSES, 0),
    ParamDescriptor::new("CV Res Amt", "cv_resonance_amount", ParamUnit::Percent, -1000, 1000, 1000)
        .tenths(),
    ParamDescriptor::new("Input", "input", ParamUnit::Percent, 0, 1000, 500).tenths(),
    ParamDescriptor::new("Drive", "drive", ParamUnit::Percent, 0, 1000, 0).tenths(),
    ParamDescriptor::new("Oversample", "oversample", ParamUnit::Enum, 0, 4, 1)
        .with_enum(&OVERSAMPLE_NAMES),
];

/// A named group of parameters for paged host UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamPage {
    /// Page title.
    pub name: &'static str,
    /// Parameters on the page, in display order.
    pub params: &'static [ParamIndex],
}

/// Parameter pages: Filter, Input, CV, Routing.
pub static PAGES: [ParamPage; 4] = [
    ParamPage {
        name: "Filter",
        params: &[
            ParamIndex::Cutoff,
            ParamIndex::Resonance,
            ParamIndex::Mode,
            ParamIndex::Model,
            ParamIndex::Oversample,
        ],
    },
    ParamPage {
        name: "Input",
        params: &[ParamIndex::InputAgr, ParamIndex::Drive],
    },
    ParamPage {
        name: "CV",
        params: &[
            ParamIndex::CvCutoff,
            ParamIndex::CvCutoffAmount,
            ParamIndex::CvResonance,
            ParamIndex::CvResonanceAmount,
        ],
    },
    ParamPage {
        name: "Routing",
        params: &[
            ParamIndex::Input,
            ParamIndex::Output,
            ParamIndex::OutputMode,
        ],
    },
];

/// Host-owned table of raw parameter values.
///
/// [`set`](Self::set) clamps to the descriptor range, so a table built
/// through it is always in range. [`from_array`](Self::from_array) clamps
/// every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParams {
    values: [i32; NUM_PARAMS],
}

impl RawParams {
    /// Table with every parameter at its default.
    pub fn new() -> Self {
        let mut values = [0; NUM_PARAMS];
        for (v, d) in values.iter_mut().zip(PARAMETERS.iter()) {
            *v = d.default;
        }
        Self { values }
    }

    /// Table from raw host values, clamped to each descriptor's range.
    pub fn from_array(values: [i32; NUM_PARAMS]) -> Self {
        let mut params = Self { values };
        for p in ParamIndex::ALL {
            params.set(p, values[p.index()]);
        }
        params
    }

    /// Raw value of a parameter.
    #[inline]
    pub fn get(&self, index: ParamIndex) -> i32 {
        self.values[index.index()]
    }

    /// Set a raw value, clamped to the descriptor range.
    #[inline]
    pub fn set(&mut self, index: ParamIndex, raw: i32) {
        self.values[index.index()] = index.descriptor().clamp(raw);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, index: ParamIndex, raw: i32) -> Self {
        self.set(index, raw);
        self
    }

    /// Value of a parameter in display units.
    pub fn display_value(&self, index: ParamIndex) -> f32 {
        index.descriptor().display_value(self.get(index))
    }

    /// Raw values in table order.
    pub fn as_array(&self) -> &[i32; NUM_PARAMS] {
        &self.values
    }
}

impl Default for RawParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_index() {
        for (i, p) in ParamIndex::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
        assert_eq!(ParamIndex::Oversample.descriptor().name, "Oversample");
        assert_eq!(ParamIndex::InputAgr.descriptor().key, "input");
    }

    #[test]
    fn test_defaults_in_range() {
        for d in &PARAMETERS {
            assert!(d.min <= d.default && d.default <= d.max, "{}", d.name);
        }
        let p = RawParams::default();
        assert_eq!(p.get(ParamIndex::Cutoff), 1000);
        assert_eq!(p.get(ParamIndex::InputAgr), 500);
        assert_eq!(p.get(ParamIndex::Oversample), 1);
        assert_eq!(p.get(ParamIndex::CvCutoff), 0);
    }

    #[test]
    fn test_keys_unique() {
        for (i, a) in PARAMETERS.iter().enumerate() {
            for b in &PARAMETERS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn test_from_array_clamps() {
        let mut raw = *RawParams::default().as_array();
        raw[ParamIndex::Cutoff.index()] = 5;
        raw[ParamIndex::Drive.index()] = 99_999;
        raw[ParamIndex::CvCutoffAmount.index()] = -5000;
        let p = RawParams::from_array(raw);
        assert_eq!(p.get(ParamIndex::Cutoff), 20);
        assert_eq!(p.get(ParamIndex::Drive), 1000);
        assert_eq!(p.get(ParamIndex::CvCutoffAmount), -1000);
    }

    #[test]
    fn test_display_conversion() {
        let d = ParamIndex::Drive.descriptor();
        assert_eq!(d.display_value(250), 25.0);
        assert_eq!(d.raw_from_display(33.33), 333);
        assert_eq!(d.raw_from_display(150.0), 1000);
        let c = ParamIndex::Cutoff.descriptor();
        assert_eq!(c.raw_from_display(440.4), 440);
    }

    #[test]
    fn test_enum_labels() {
        let mode = ParamIndex::Mode.descriptor();
        assert_eq!(mode.enum_label(1), Some("Bandpass"));
        assert_eq!(mode.enum_label(9), None);
        assert_eq!(mode.enum_value("all-pass"), Some(3));
        assert_eq!(ParamIndex::Oversample.descriptor().enum_value("16x"), Some(4));
        assert_eq!(ParamIndex::Cutoff.descriptor().enum_value("x"), None);
    }

    #[test]
    fn test_pages_cover_every_param_once() {
        let mut seen = [0usize; NUM_PARAMS];
        for page in &PAGES {
            for p in page.params {
                seen[p.index()] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "{seen:?}");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(ParamIndex::from_name("cutoff_hz"), Some(ParamIndex::Cutoff));
        assert_eq!(ParamIndex::from_name("Resonance"), Some(ParamIndex::Resonance));
        assert_eq!(ParamIndex::from_name("CV Res Amt"), Some(ParamIndex::CvResonanceAmount));
        assert_eq!(ParamIndex::from_name("nope"), None);
    }
}
