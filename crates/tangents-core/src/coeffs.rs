//! Coefficient derivation for the trapezoidal (TPT) state-variable filter.
//!
//! Maps a cutoff frequency and a normalized resonance onto the three
//! coefficients consumed by the zero-delay-feedback recursion in
//! [`svf`](crate::svf):
//!
//! - `g = tan(π · fc / fs)`: pre-warped integrator gain
//! - `k = 2 − 1.9 · resonance`: damping, 2.0 (none) down to 0.1
//! - `g_inv = 1 / (1 + g·(g + k))`: solves the implicit loop in closed form
//!
//! `fs` is the *effective* rate (host rate × oversampling factor), so the
//! same cutoff lands at the same analog frequency for every factor.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f32::consts::PI;
use libm::tanf;

/// Lowest cutoff accepted by [`FilterCoeffs::calculate`], in Hz.
pub const MIN_CUTOFF_HZ: f32 = 20.0;

/// Highest cutoff as a fraction of the effective rate.
///
/// Keeps `tan` well away from its pole at 0.5.
pub const MAX_CUTOFF_RATIO: f32 = 0.45;

/// Damping at zero resonance.
pub const K_MAX: f32 = 2.0;

/// Damping range covered by the resonance control; `K_MAX - K_RANGE = 0.1`.
pub const K_RANGE: f32 = 1.9;

/// Per-block filter coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoeffs {
    /// Pre-warped frequency coefficient.
    pub g: f32,
    /// Damping coefficient, in \[0.1, 2.0\] for resonance in \[0, 1\].
    pub k: f32,
    /// Normalization factor `1 / (1 + g·(g + k))`.
    pub g_inv: f32,
}

impl FilterCoeffs {
    /// Derive coefficients from cutoff (Hz), resonance (0–1) and the
    /// effective sample rate (Hz).
    ///
    /// Cutoff is clamped to `[20, 0.45 · effective_rate]`. Resonance is taken
    /// as-is; the smoother may hand over values slightly outside \[0, 1\].
    /// Pure: identical inputs give bit-identical outputs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tangents_core::FilterCoeffs;
    ///
    /// let c = FilterCoeffs::calculate(1000.0, 0.0, 96000.0);
    /// assert_eq!(c.k, 2.0);
    /// assert!((c.g - (core::f32::consts::PI * 1000.0 / 96000.0).tan()).abs() < 1e-6);
    /// ```
    pub fn calculate(cutoff: f32, resonance: f32, effective_rate: f32) -> Self {
        // NaN falls to the lower bound, infinity to the upper.
        let cutoff = cutoff.max(MIN_CUTOFF_HZ).min(effective_rate * MAX_CUTOFF_RATIO);

        let g = tanf(PI * cutoff / effective_rate);
        let k = K_MAX - resonance * K_RANGE;
        let g_inv = 1.0 / (1.0 + g * (g + k));

        Self { g, k, g_inv }
    }

    /// Resonance-dependent pre-nonlinearity drive, `(2 − k) / 1.9`.
    ///
    /// 0.0 at no resonance, 1.0 at full resonance.
    #[inline]
    pub fn resonance_amount(&self) -> f32 {
        (K_MAX - self.k) / K_RANGE
    }
}

impl Default for FilterCoeffs {
    fn default() -> Self {
        Self::calculate(1000.0, 0.0, 96000.0)
    }
}
