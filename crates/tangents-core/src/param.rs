//! Block-rate parameter smoothing for zipper-free changes.
//!
//! Continuous controls (cutoff, resonance, drive, AGR, CV amounts) step
//! audibly if applied directly. Each one is routed through a [`SmoothedParam`]
//! that moves a fixed fraction of the remaining distance toward its target
//! once per processing block:
//!
//! `y[n] = y[n-1] + α · (target - y[n-1])`, α = [`BLOCK_SMOOTHING_COEFF`]
//!
//! With α = 0.1 a step change reaches ~65 % after 10 blocks
//! (`1 - 0.9^10 ≈ 0.651`), about 27 ms at 48 kHz with 128-frame blocks.
//!
//! Discrete selectors (mode, model, oversampling) are never smoothed.
//!
//! ## Usage
//!
//! ```rust
//! use tangents_core::SmoothedParam;
//!
//! let mut cutoff = SmoothedParam::new(1000.0);
//! cutoff.set_target(2000.0);
//!
//! // Once per block
//! let smoothed = cutoff.advance();
//! assert!((smoothed - 1100.0).abs() < 1e-3);
//! ```

/// Fixed one-pole coefficient applied once per block.
pub const BLOCK_SMOOTHING_COEFF: f32 = 0.1;

/// A control value smoothed toward its target once per block.
///
/// The smoothed value is never clamped: domain bounds belong on the target,
/// and the smoothed trajectory may overshoot a target bound transiently while
/// the target itself moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, toward 0 = very slow)
    coeff: f32,
}

impl SmoothedParam {
    /// Create a smoothed parameter at `initial` using [`BLOCK_SMOOTHING_COEFF`].
    pub const fn new(initial: f32) -> Self {
        Self::with_coeff(initial, BLOCK_SMOOTHING_COEFF)
    }

    /// Create a smoothed parameter with an explicit coefficient in (0, 1].
    pub const fn with_coeff(initial: f32, coeff: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff,
        }
    }

    /// Set the value to smooth toward.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and current value together (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Advance by one block and return the new smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }

    /// Set a new target and advance by one block.
    #[inline]
    pub fn advance_toward(&mut self, target: f32) -> f32 {
        self.target = target;
        self.advance()
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Smoothing coefficient.
    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Whether the smoothed value is within `1e-6` of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Jump straight to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// The six block-rate smoothed controls of the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedParameters {
    /// Cutoff in Hz, after CV modulation.
    pub cutoff: SmoothedParam,
    /// Normalized resonance, after CV modulation.
    pub resonance: SmoothedParam,
    /// Linear drive gain (1.0 – 5.0).
    pub drive: SmoothedParam,
    /// AGR control value (0 – 100).
    pub agr: SmoothedParam,
    /// Cutoff CV depth (−1.0 – 1.0).
    pub cv_cutoff_amount: SmoothedParam,
    /// Resonance CV depth (−1.0 – 1.0).
    pub cv_resonance_amount: SmoothedParam,
}

impl SmoothedParameters {
    /// Construction defaults: 1 kHz, no resonance, unity drive, unity AGR,
    /// full CV depth.
    pub const fn new() -> Self {
        Self {
            cutoff: SmoothedParam::new(1000.0),
            resonance: SmoothedParam::new(0.0),
            drive: SmoothedParam::new(1.0),
            agr: SmoothedParam::new(50.0),
            cv_cutoff_amount: SmoothedParam::new(1.0),
            cv_resonance_amount: SmoothedParam::new(1.0),
        }
    }

    /// Whether every control has reached its target.
    pub fn is_settled(&self) -> bool {
        self.cutoff.is_settled()
            && self.resonance.is_settled()
            && self.drive.is_settled()
            && self.agr.is_settled()
            && self.cv_cutoff_amount.is_settled()
            && self.cv_resonance_amount.is_settled()
    }
}

impl Default for SmoothedParameters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothed_param_single_step() {
        let mut param = SmoothedParam::new(0.0);
        param.set_target(1.0);
        assert!((param.advance() - 0.1).abs() < 1e-7);
        assert!((param.advance() - 0.19).abs() < 1e-6);
    }

    #[test]
    fn smoothed_param_ten_blocks() {
        let mut param = SmoothedParam::new(0.0);
        param.set_target(1.0);
        for _ in 0..10 {
            param.advance();
        }
        let expected = 1.0 - libm::powf(0.9, 10.0);
        assert!(
            (param.get() - expected).abs() < 1e-5,
            "expected ~{expected}, got {}",
            param.get()
        );
    }

    #[test]
    fn smoothed_param_monotonic_convergence() {
        let mut param = SmoothedParam::new(20.0);
        param.set_target(5000.0);
        let mut prev = param.get();
        for _ in 0..200 {
            let next = param.advance();
            assert!(next >= prev, "not monotonic: {prev} -> {next}");
            assert!(next <= 5000.0);
            prev = next;
        }
        assert!((param.get() - 5000.0).abs() < 0.01);
    }

    #[test]
    fn smoothed_param_immediate_and_snap() {
        let mut param = SmoothedParam::new(0.0);
        param.set_immediate(3.0);
        assert_eq!(param.get(), 3.0);
        assert!(param.is_settled());

        param.set_target(-1.0);
        assert!(!param.is_settled());
        param.snap_to_target();
        assert_eq!(param.get(), -1.0);
    }

    #[test]
    fn smoothed_parameters_defaults() {
        let params = SmoothedParameters::default();
        assert_eq!(params.cutoff.get(), 1000.0);
        assert_eq!(params.resonance.get(), 0.0);
        assert_eq!(params.drive.get(), 1.0);
        assert_eq!(params.agr.get(), 50.0);
        assert_eq!(params.cv_cutoff_amount.get(), 1.0);
        assert_eq!(params.cv_resonance_amount.get(), 1.0);
        assert!(params.is_settled());
    }
}
