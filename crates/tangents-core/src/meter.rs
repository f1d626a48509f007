//! Decaying peak meters for the display layer.
//!
//! Each block reports its maximum absolute sample; the meter blends it in
//! with `level = level·0.95 + peak·0.05`. Meters are a pure side channel and
//! never feed back into the audio path.

/// Weight kept from the previous level each block.
pub const METER_DECAY: f32 = 0.95;

/// Weight given to the new block peak.
pub const METER_BLEND: f32 = 0.05;

/// Decaying block-peak tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelMeter {
    level: f32,
}

impl LevelMeter {
    /// Meter at zero.
    pub const fn new() -> Self {
        Self { level: 0.0 }
    }

    /// Fold one block's peak into the meter.
    #[inline]
    pub fn update(&mut self, block_peak: f32) {
        self.level = self.level * METER_DECAY + block_peak * METER_BLEND;
    }

    /// Current level.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Return to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

/// Running maximum of absolute sample values within one block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockPeak {
    peak: f32,
}

impl BlockPeak {
    /// Empty accumulator.
    pub const fn new() -> Self {
        Self { peak: 0.0 }
    }

    /// Track one sample.
    #[inline]
    pub fn track(&mut self, sample: f32) {
        let a = sample.abs();
        if a > self.peak {
            self.peak = a;
        }
    }

    /// Largest magnitude seen so far.
    #[inline]
    pub fn peak(&self) -> f32 {
        self.peak
    }
}
