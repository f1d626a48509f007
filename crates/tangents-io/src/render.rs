//! Offline block rendering through the filter.
//!
//! Files are fed to [`Tangents`] in host-sized blocks so smoothing, CV
//! sampling and metering behave exactly as they would under a real-time
//! host with the same block size.

use tangents_core::{ControlSnapshot, Tangents};

/// Default frames per block.
pub const DEFAULT_BLOCK_SIZE: usize = 128;

/// Optional control-voltage streams, aligned sample-for-sample with the
/// audio input.
///
/// Each block uses the first CV sample inside that block. Past the end of a
/// stream the corresponding input counts as unconnected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CvStreams<'a> {
    /// Cutoff CV.
    pub cutoff: Option<&'a [f32]>,
    /// Resonance CV.
    pub resonance: Option<&'a [f32]>,
}

/// Peak and RMS summary of a signal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalStats {
    /// Largest absolute sample.
    pub peak: f32,
    /// Root mean square.
    pub rms: f32,
}

impl SignalStats {
    /// Measure a buffer. Empty buffers measure as silence.
    pub fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let peak = samples.iter().map(|s| s.abs()).fold(0.0, f32::max);
        let sum: f32 = samples.iter().map(|s| s * s).sum();
        Self {
            peak,
            rms: (sum / samples.len() as f32).sqrt(),
        }
    }
}

/// Drives a [`Tangents`] instance over whole buffers.
#[derive(Debug, Clone)]
pub struct OfflineRenderer {
    filter: Tangents,
    block_size: usize,
}

impl OfflineRenderer {
    /// Create a renderer. A block size of zero is raised to one.
    pub fn new(sample_rate: f32, block_size: usize) -> Self {
        Self {
            filter: Tangents::new(sample_rate),
            block_size: block_size.max(1),
        }
    }

    /// Builder: control targets for the whole render.
    pub fn with_controls(mut self, controls: ControlSnapshot) -> Self {
        self.filter.set_controls(controls);
        self
    }

    /// Frames per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The filter being driven.
    pub fn filter(&self) -> &Tangents {
        &self.filter
    }

    /// Mutable access to the filter.
    pub fn filter_mut(&mut self) -> &mut Tangents {
        &mut self.filter
    }

    /// Render `input`, calling `on_block` with the number of frames done
    /// after each block.
    pub fn render_with_progress(
        &mut self,
        input: &[f32],
        cv: CvStreams<'_>,
        mut on_block: impl FnMut(usize),
    ) -> Vec<f32> {
        let mut output = vec![0.0; input.len()];
        let block = self.block_size;

        for (i, (in_chunk, out_chunk)) in input
            .chunks(block)
            .zip(output.chunks_mut(block))
            .enumerate()
        {
            let start = i * block;
            self.filter.process_block_with_cv(
                in_chunk,
                out_chunk,
                cv_from(cv.cutoff, start),
                cv_from(cv.resonance, start),
            );
            on_block(start + in_chunk.len());
        }

        tracing::debug!(
            frames = input.len(),
            block_size = block,
            output_level = self.filter.output_level(),
            "render complete"
        );
        output
    }

    /// Render `input` without progress reporting.
    pub fn render(&mut self, input: &[f32], cv: CvStreams<'_>) -> Vec<f32> {
        self.render_with_progress(input, cv, |_| {})
    }
}

fn cv_from(stream: Option<&[f32]>, start: usize) -> Option<&[f32]> {
    stream.and_then(|s| s.get(start..)).filter(|s| !s.is_empty())
}
