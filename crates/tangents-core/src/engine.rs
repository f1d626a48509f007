//! The Tangents block processor.
//!
//! [`Tangents`] owns everything that persists between host callbacks: filter
//! state, per-block coefficients, the noise generator, the smoothed controls
//! and the level meters. Each block runs in three phases:
//!
//! 1. **Block setup**: decode controls, advance the smoothers (drive, AGR, CV
//!    depths first, then the CV-modulated cutoff and resonance) and compute
//!    coefficients once for `sample_rate × oversample`.
//! 2. **Sample loop**: AGR and drive condition each input sample, the
//!    oversampled core filters it and the model saturates the result.
//! 3. **Block end**: block peaks are folded into the meters.
//!
//! Two entry points share this cycle: [`Tangents::step`] for hosts with a
//! shared multi-channel bus and a raw parameter table, and
//! [`Tangents::process_block_with_cv`] for hosts with separate slices.
//!
//! # Example
//!
//! ```rust
//! use tangents_core::{ParamIndex, RawParams, Tangents};
//!
//! let frames = 64;
//! let mut filter = Tangents::new(48000.0);
//! let params = RawParams::default()
//!     .with(ParamIndex::Input, 1)
//!     .with(ParamIndex::Output, 2);
//!
//! let mut bus = vec![0.0; 2 * frames];
//! bus[0] = 1.0; // impulse on bus 1
//! filter.step(&mut bus, frames, &params);
//!
//! assert!(bus[frames..].iter().any(|&s| s != 0.0));
//! ```

use crate::agr::agr_gain;
use crate::coeffs::{FilterCoeffs, MAX_CUTOFF_RATIO, MIN_CUTOFF_HZ};
use crate::control::{ControlSnapshot, Routing};
use crate::math::sanitize;
use crate::meter::{BlockPeak, LevelMeter};
use crate::model::Oversample;
use crate::param::SmoothedParameters;
use crate::param_info::RawParams;
use crate::random::XorShift32;
use crate::svf::SteinerParker;

/// Octaves of cutoff sweep for a full-scale CV at 100 % depth.
pub const CV_CUTOFF_OCTAVES: f32 = 5.0;

/// Resonance offset for a full-scale CV at 100 % depth.
pub const CV_RESONANCE_RANGE: f32 = 0.5;

/// Input and output peak accumulators for one block.
#[derive(Debug, Clone, Copy, Default)]
struct BlockPeaks {
    input: BlockPeak,
    output: BlockPeak,
}

/// Steiner-Parker multimode filter with AGR input conditioning.
///
/// Single-threaded and allocation-free: the host's block callback is the
/// only mutator.
#[derive(Debug, Clone)]
pub struct Tangents {
    filter: SteinerParker,
    coeffs: FilterCoeffs,
    rng: XorShift32,
    smoothed: SmoothedParameters,
    input_meter: LevelMeter,
    output_meter: LevelMeter,
    controls: ControlSnapshot,
    sample_rate: f32,
}

impl Tangents {
    /// Create a filter ready to process at `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        let mut this = Self {
            filter: SteinerParker::new(),
            coeffs: FilterCoeffs::default(),
            rng: XorShift32::default(),
            smoothed: SmoothedParameters::new(),
            input_meter: LevelMeter::new(),
            output_meter: LevelMeter::new(),
            controls: ControlSnapshot::default(),
            sample_rate,
        };
        this.initialize(sample_rate);
        this
    }

    /// Return every field to its construction state for `sample_rate`.
    ///
    /// Zeroes the filter and meters, reseeds the generator, restores the
    /// smoothed defaults and computes coefficients at the default 2× rate.
    pub fn initialize(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.filter.reset();
        self.rng = XorShift32::default();
        self.smoothed = SmoothedParameters::new();
        self.input_meter.reset();
        self.output_meter.reset();
        self.controls = ControlSnapshot::default();
        self.update_coeffs(Oversample::default());

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "tangents initialized");
    }

    /// Replace the control targets used from the next block on.
    ///
    /// Discrete selectors switch at once; continuous targets are approached
    /// by the smoothers.
    pub fn set_controls(&mut self, controls: ControlSnapshot) {
        #[cfg(feature = "tracing")]
        {
            let old = &self.controls;
            if old.mode != controls.mode {
                tracing::debug!(mode = controls.mode.name(), "filter mode changed");
            }
            if old.model != controls.model {
                tracing::debug!(model = controls.model.name(), "filter model changed");
            }
            if old.oversample != controls.oversample {
                tracing::debug!(oversample = controls.oversample.factor(), "oversampling changed");
            }
        }
        self.controls = controls;
    }

    /// Current control targets.
    pub fn controls(&self) -> &ControlSnapshot {
        &self.controls
    }

    /// Host callback on a shared `channels × num_frames` bus.
    ///
    /// Routing, targets and the replace flag come from `params`; channel `c`
    /// occupies `bus[(c − 1)·num_frames ..]`. Input and output may be the same
    /// channel. A CV channel contributes its first sample of the block. If
    /// the input or output channel does not fit inside `bus`, the block is
    /// skipped and the bus left untouched.
    pub fn step(&mut self, bus: &mut [f32], num_frames: usize, params: &RawParams) {
        if num_frames == 0 {
            return;
        }
        let routing = Routing::from_raw(params);
        let Some(input) = Routing::channel_range(routing.input, num_frames, bus.len()) else {
            return;
        };
        let Some(output) = Routing::channel_range(routing.output, num_frames, bus.len()) else {
            return;
        };
        let cv_first = |ch: Option<usize>| {
            ch.and_then(|c| Routing::channel_range(c, num_frames, bus.len()))
                .map(|r| bus[r.start])
        };
        let cv_cutoff = cv_first(routing.cv_cutoff);
        let cv_resonance = cv_first(routing.cv_resonance);

        self.set_controls(ControlSnapshot::from_raw(params));
        self.begin_block(cv_cutoff, cv_resonance);

        let replace = self.controls.replace;
        let mut peaks = BlockPeaks::default();
        for i in 0..num_frames {
            let x = bus[input.start + i];
            let y = self.tick(x, &mut peaks);
            let out = &mut bus[output.start + i];
            if replace {
                *out = y;
            } else {
                *out += y;
            }
        }

        self.end_block(&peaks);
    }

    /// Process one block from separate slices using the current controls.
    ///
    /// Handles `min(input.len(), output.len())` frames. `cv_cutoff` and
    /// `cv_resonance` contribute their first sample; `None` or an empty slice
    /// means unconnected. The output is overwritten or summed into according
    /// to [`ControlSnapshot::replace`].
    pub fn process_block_with_cv(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        cv_cutoff: Option<&[f32]>,
        cv_resonance: Option<&[f32]>,
    ) {
        let frames = input.len().min(output.len());
        if frames == 0 {
            return;
        }
        let first = |cv: Option<&[f32]>| cv.and_then(|s| s.first().copied());
        self.begin_block(first(cv_cutoff), first(cv_resonance));
        let replace = self.controls.replace;
        self.run_block(&input[..frames], &mut output[..frames], replace);
    }

    /// Process a buffer in place as one block, without CV.
    pub fn process_inplace(&mut self, buffer: &mut [f32]) {
        if buffer.is_empty() {
            return;
        }
        self.begin_block(None, None);
        let mut peaks = BlockPeaks::default();
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample, &mut peaks);
        }
        self.end_block(&peaks);
    }

    /// Sample loop of a prepared block over equal-length slices.
    fn run_block(&mut self, input: &[f32], output: &mut [f32], replace: bool) {
        let mut peaks = BlockPeaks::default();
        for (x, out) in input.iter().zip(output.iter_mut()) {
            let y = self.tick(*x, &mut peaks);
            if replace {
                *out = y;
            } else {
                *out += y;
            }
        }

        self.end_block(&peaks);
    }

    /// Advance the smoothers and freeze coefficients for the coming block.
    fn begin_block(&mut self, cv_cutoff: Option<f32>, cv_resonance: Option<f32>) {
        let c = self.controls;
        let s = &mut self.smoothed;

        s.drive.advance_toward(c.drive);
        s.agr.advance_toward(c.agr);
        let cut_amt = s.cv_cutoff_amount.advance_toward(c.cv_cutoff_amount);
        let res_amt = s.cv_resonance_amount.advance_toward(c.cv_resonance_amount);

        let cutoff_target = match cv_cutoff {
            Some(cv) => c.cutoff * libm::exp2f(sanitize(cv) * cut_amt * CV_CUTOFF_OCTAVES),
            None => c.cutoff,
        };
        // Held inside the coefficient range so an overdriven CV cannot push
        // the smoother to infinity.
        let ceiling = self.sample_rate * c.oversample.factor() as f32 * MAX_CUTOFF_RATIO;
        let cutoff_target = cutoff_target.max(MIN_CUTOFF_HZ).min(ceiling);
        let resonance_target = match cv_resonance {
            Some(cv) => (c.resonance + sanitize(cv) * res_amt * CV_RESONANCE_RANGE).clamp(0.0, 1.0),
            None => c.resonance,
        };

        s.cutoff.advance_toward(cutoff_target);
        s.resonance.advance_toward(resonance_target);

        self.update_coeffs(c.oversample);
    }

    fn update_coeffs(&mut self, oversample: Oversample) {
        let rate = self.sample_rate * oversample.factor() as f32;
        self.coeffs = FilterCoeffs::calculate(
            self.smoothed.cutoff.get(),
            self.smoothed.resonance.get(),
            rate,
        );
    }

    /// One output sample with the block's frozen coefficients.
    #[inline]
    fn tick(&mut self, input: f32, peaks: &mut BlockPeaks) -> f32 {
        let c = &self.controls;
        let gain = agr_gain(self.smoothed.agr.get(), &mut self.rng);
        let x = input * gain * self.smoothed.drive.get();
        peaks.input.track(x);

        let y = self
            .filter
            .process(x, &self.coeffs, c.model, c.mode, c.oversample);
        let y = c.model.saturate(y);
        peaks.output.track(y);
        y
    }

    fn end_block(&mut self, peaks: &BlockPeaks) {
        self.input_meter.update(peaks.input.peak());
        self.output_meter.update(peaks.output.peak());
    }

    /// Decaying peak of the conditioned input.
    pub fn input_level(&self) -> f32 {
        self.input_meter.level()
    }

    /// Decaying peak of the output.
    pub fn output_level(&self) -> f32 {
        self.output_meter.level()
    }

    /// Coefficients frozen for the last block.
    pub fn coeffs(&self) -> &FilterCoeffs {
        &self.coeffs
    }

    /// Filter state.
    pub fn state(&self) -> &SteinerParker {
        &self.filter
    }

    /// Smoothed controls.
    pub fn smoothed(&self) -> &SmoothedParameters {
        &self.smoothed
    }

    /// Noise generator state.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Host sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the host rate, keeping filter state and smoothed controls.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coeffs(self.controls.oversample);

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "tangents sample rate changed");
    }

    /// Clear filter state and meters, keeping controls and smoothing.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.input_meter.reset();
        self.output_meter.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("tangents reset");
    }
}

impl Default for Tangents {
    fn default() -> Self {
        Self::new(48000.0)
    }
}
