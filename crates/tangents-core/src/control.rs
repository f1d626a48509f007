//! Per-block decoding of the raw parameter table.
//!
//! The host's integer table is read once at the top of every block and turned
//! into a [`ControlSnapshot`] (real-unit targets plus discrete selectors) and
//! a [`Routing`] (bus numbers). Nothing downstream touches raw integers.

use crate::coeffs::MIN_CUTOFF_HZ;
use crate::model::{FilterMode, FilterModel, Oversample};
use crate::param_info::{ParamIndex, RawParams};

/// Drive gain added per raw step: raw 0 → 1.0, raw 1000 → 5.0.
pub const DRIVE_RAW_SCALE: f32 = 250.0;

/// Highest base cutoff a snapshot carries, in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20000.0;

/// Decoded control targets for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSnapshot {
    /// Base cutoff in Hz, before CV modulation.
    pub cutoff: f32,
    /// Base resonance in \[0, 1\], before CV modulation.
    pub resonance: f32,
    /// Output response.
    pub mode: FilterMode,
    /// Saturation model.
    pub model: FilterModel,
    /// Oversampling factor.
    pub oversample: Oversample,
    /// Linear drive gain in \[1, 5\].
    pub drive: f32,
    /// AGR control value in \[0, 100\].
    pub agr: f32,
    /// Cutoff CV depth in \[−1, 1\].
    pub cv_cutoff_amount: f32,
    /// Resonance CV depth in \[−1, 1\].
    pub cv_resonance_amount: f32,
    /// Overwrite the output bus (`true`) or add into it (`false`).
    pub replace: bool,
}

impl ControlSnapshot {
    /// Decode a raw parameter table, clamping every value to its range.
    pub fn from_raw(params: &RawParams) -> Self {
        let raw = |p: ParamIndex| p.descriptor().clamp(params.get(p));

        Self {
            cutoff: raw(ParamIndex::Cutoff) as f32,
            resonance: raw(ParamIndex::Resonance) as f32 / 1000.0,
            mode: FilterMode::from_index(raw(ParamIndex::Mode)),
            model: FilterModel::from_index(raw(ParamIndex::Model)),
            oversample: Oversample::from_index(raw(ParamIndex::Oversample)),
            drive: 1.0 + raw(ParamIndex::Drive) as f32 / DRIVE_RAW_SCALE,
            agr: raw(ParamIndex::InputAgr) as f32 / 10.0,
            cv_cutoff_amount: raw(ParamIndex::CvCutoffAmount) as f32 / 1000.0,
            cv_resonance_amount: raw(ParamIndex::CvResonanceAmount) as f32 / 1000.0,
            replace: raw(ParamIndex::OutputMode) != 0,
        }
    }

    /// Builder: cutoff in Hz, clamped to the parameter range. NaN maps to
    /// the lower bound.
    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = cutoff.max(MIN_CUTOFF_HZ).min(MAX_CUTOFF_HZ);
        self
    }

    /// Builder: resonance, clamped to \[0, 1\].
    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.resonance = resonance.clamp(0.0, 1.0);
        self
    }

    /// Builder: output response.
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: saturation model.
    pub fn with_model(mut self, model: FilterModel) -> Self {
        self.model = model;
        self
    }

    /// Builder: oversampling factor.
    pub fn with_oversample(mut self, oversample: Oversample) -> Self {
        self.oversample = oversample;
        self
    }

    /// Builder: linear drive gain, clamped to \[1, 5\].
    pub fn with_drive(mut self, drive: f32) -> Self {
        self.drive = drive.clamp(1.0, 5.0);
        self
    }

    /// Builder: AGR control value, clamped to \[0, 100\].
    pub fn with_agr(mut self, agr: f32) -> Self {
        self.agr = agr.clamp(0.0, 100.0);
        self
    }
}

impl Default for ControlSnapshot {
    fn default() -> Self {
        Self::from_raw(&RawParams::default())
    }
}

/// Bus assignment for one block, 1-based as the host numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    /// Audio input bus.
    pub input: usize,
    /// Audio output bus.
    pub output: usize,
    /// Cutoff CV bus, `None` when unconnected.
    pub cv_cutoff: Option<usize>,
    /// Resonance CV bus, `None` when unconnected.
    pub cv_resonance: Option<usize>,
}

impl Routing {
    /// Decode bus numbers from a raw parameter table. Bus 0 on a CV input
    /// means "not connected".
    pub fn from_raw(params: &RawParams) -> Self {
        let bus = |p: ParamIndex| p.descriptor().clamp(params.get(p)).max(0) as usize;
        let cv = |p: ParamIndex| Some(bus(p)).filter(|&b| b != 0);

        Self {
            input: bus(ParamIndex::Input),
            output: bus(ParamIndex::Output),
            cv_cutoff: cv(ParamIndex::CvCutoff),
            cv_resonance: cv(ParamIndex::CvResonance),
        }
    }

    /// Sample range of a 1-based bus inside a `channels × num_frames` buffer,
    /// if it fits.
    pub fn channel_range(
        bus: usize,
        num_frames: usize,
        buffer_len: usize,
    ) -> Option<core::ops::Range<usize>> {
        let start = bus.checked_sub(1)?.checked_mul(num_frames)?;
        let end = start.checked_add(num_frames)?;
        (end <= buffer_len).then_some(start..end)
    }
}
