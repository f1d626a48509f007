//! Discrete selectors: saturation model, output mode, oversampling factor.
//!
//! Each selector is a closed enum decoded from a small integer and backed by
//! an immutable label table. Dispatch is a plain `match`, so per-sample cost
//! is a predictable branch rather than an indirect call.
//!
//! Together, [`FilterModel`] and [`FilterMode`] form a 3 × 4 matrix of
//! variants sharing one recursion. Switching either takes effect at the next
//! block with no crossfade.

use crate::math::{aggressive_sat, diode_clip, fast_tanh};

/// Display names of the saturation models, indexed by [`FilterModel::index`].
pub const MODEL_NAMES: [&str; 3] = ["YU", "MS", "XX"];

/// Display names of the output modes, indexed by [`FilterMode::index`].
pub const MODE_NAMES: [&str; 4] = ["Lowpass", "Bandpass", "Highpass", "All-pass"];

/// Two-letter mode abbreviations for compact displays.
pub const MODE_SHORT_NAMES: [&str; 4] = ["LP", "BP", "HP", "AP"];

/// Display names of the oversampling factors, indexed by [`Oversample::index`].
pub const OVERSAMPLE_NAMES: [&str; 5] = ["1x", "2x", "4x", "8x", "16x"];

/// Saturation character of the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterModel {
    /// Smooth symmetric tanh (Yusynth-derived).
    #[default]
    Yu,
    /// Asymmetric diode clipping.
    Ms,
    /// Tanh fold-back, aggressive.
    Xx,
}

impl FilterModel {
    /// All models in table order.
    pub const ALL: [FilterModel; 3] = [FilterModel::Yu, FilterModel::Ms, FilterModel::Xx];

    /// Decode a raw selector value; out-of-range values fall back to YU.
    pub const fn from_index(index: i32) -> Self {
        match index {
            1 => FilterModel::Ms,
            2 => FilterModel::Xx,
            _ => FilterModel::Yu,
        }
    }

    /// Position in [`MODEL_NAMES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        MODEL_NAMES[self.index()]
    }

    /// Pre-recursion nonlinearity, driven harder as resonance rises.
    ///
    /// `res_amt` is [`FilterCoeffs::resonance_amount`](crate::FilterCoeffs::resonance_amount):
    ///
    /// - YU: `fast_tanh(x · (1 + r))`
    /// - MS: `diode_clip(x · (1 + r/2))`
    /// - XX: `aggressive_sat(x · (1 + 2r))`
    #[inline]
    pub fn drive(self, x: f32, res_amt: f32) -> f32 {
        match self {
            FilterModel::Yu => fast_tanh(x * (1.0 + res_amt)),
            FilterModel::Ms => diode_clip(x * (1.0 + res_amt * 0.5)),
            FilterModel::Xx => aggressive_sat(x * (1.0 + res_amt * 2.0)),
        }
    }

    /// Output saturation at unity drive.
    #[inline]
    pub fn saturate(self, x: f32) -> f32 {
        match self {
            FilterModel::Yu => fast_tanh(x),
            FilterModel::Ms => diode_clip(x),
            FilterModel::Xx => aggressive_sat(x),
        }
    }
}

/// Which filter response is sent to the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Low-pass output.
    #[default]
    Lowpass,
    /// Band-pass output.
    Bandpass,
    /// High-pass output.
    Highpass,
    /// `lowpass − highpass`, an all-pass-flavoured approximation.
    AllPass,
}

impl FilterMode {
    /// All modes in table order.
    pub const ALL: [FilterMode; 4] = [
        FilterMode::Lowpass,
        FilterMode::Bandpass,
        FilterMode::Highpass,
        FilterMode::AllPass,
    ];

    /// Decode a raw selector value; out-of-range values fall back to lowpass.
    pub const fn from_index(index: i32) -> Self {
        match index {
            1 => FilterMode::Bandpass,
            2 => FilterMode::Highpass,
            3 => FilterMode::AllPass,
            _ => FilterMode::Lowpass,
        }
    }

    /// Position in [`MODE_NAMES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        MODE_NAMES[self.index()]
    }

    /// Two-letter abbreviation.
    pub const fn short_name(self) -> &'static str {
        MODE_SHORT_NAMES[self.index()]
    }

    /// Pick this mode's contribution from the three filter states.
    #[inline]
    pub fn select(self, lp: f32, bp: f32, hp: f32) -> f32 {
        match self {
            FilterMode::Lowpass => lp,
            FilterMode::Bandpass => bp,
            FilterMode::Highpass => hp,
            FilterMode::AllPass => lp - hp,
        }
    }
}

/// Number of recursion sub-steps per output sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Oversample {
    /// No oversampling, lowest CPU.
    X1,
    /// 2× (construction default).
    #[default]
    X2,
    /// 4×.
    X4,
    /// 8×.
    X8,
    /// 16×, highest quality.
    X16,
}

impl Oversample {
    /// All factors in table order.
    pub const ALL: [Oversample; 5] = [
        Oversample::X1,
        Oversample::X2,
        Oversample::X4,
        Oversample::X8,
        Oversample::X16,
    ];

    /// Decode a raw selector value (`factor = 1 << index`), clamped to 0–4.
    pub const fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Oversample::X1,
            1 => Oversample::X2,
            2 => Oversample::X4,
            3 => Oversample::X8,
            _ => Oversample::X16,
        }
    }

    /// Factor for a plain integer ratio, if it is one of 1, 2, 4, 8, 16.
    pub const fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            1 => Some(Oversample::X1),
            2 => Some(Oversample::X2),
            4 => Some(Oversample::X4),
            8 => Some(Oversample::X8),
            16 => Some(Oversample::X16),
            _ => None,
        }
    }

    /// Position in [`OVERSAMPLE_NAMES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sub-steps per output sample.
    pub const fn factor(self) -> usize {
        1 << self.index()
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        OVERSAMPLE_NAMES[self.index()]
    }
}
