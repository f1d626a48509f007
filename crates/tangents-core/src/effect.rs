//! Effect trait for offline and test hosts.
//!
//! Hosts that treat every processor as a mono effect (file renderers,
//! benchmarks, test harnesses) drive [`Tangents`] through [`Effect`]. The
//! trait methods always overwrite their output; the replace/add flag of the
//! control snapshot only applies to [`Tangents::step`] and
//! [`Tangents::process_block_with_cv`].

use crate::engine::Tangents;

/// Mono audio processor interface.
///
/// # Example
///
/// ```rust
/// use tangents_core::{Effect, Tangents};
///
/// let mut filter = Tangents::new(48000.0);
/// let input = [1.0, 0.0, 0.0, 0.0];
/// let mut output = [0.0; 4];
/// filter.process_block(&input, &mut output);
/// assert!(output.iter().all(|s| s.is_finite()));
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples.
    fn latency_samples(&self) -> usize {
        0
    }
}

impl Effect for Tangents {
    /// Runs the sample as a one-frame block, so smoothing advances per call.
    fn process(&mut self, input: f32) -> f32 {
        let mut buf = [input];
        self.process_inplace(&mut buf);
        buf[0]
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        let frames = input.len().min(output.len());
        output[..frames].copy_from_slice(&input[..frames]);
        self.process_inplace(&mut output[..frames]);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        self.process_inplace(buffer);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        Tangents::set_sample_rate(self, sample_rate);
    }

    fn reset(&mut self) {
        Tangents::reset(self);
    }
}
