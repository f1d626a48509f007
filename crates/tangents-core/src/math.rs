//! Numeric primitives for the filter core.
//!
//! Bounded saturation curves and the numerical safety nets used by the
//! Steiner-Parker recursion. All functions are allocation-free and suitable
//! for `no_std`.
//!
//! # Saturation Curves
//!
//! | Function | Character | Bound | Used by |
//! |----------|-----------|-------|---------|
//! | [`fast_tanh`] | Smooth, symmetric | ±1.0 | YU model |
//! | [`diode_clip`] | Asymmetric, exponential | (−0.5, 1.0) | MS model |
//! | [`aggressive_sat`] | Fold-back above 0.8 | ±0.8 | XX model |
//!
//! # Safety Nets
//!
//! - [`sanitize`] - hard reset of NaN / runaway values to zero
//! - [`soft_clamp`] - symmetric limiting of recursive state

use libm::expf;

/// Magnitude beyond which [`sanitize`] treats a value as diverged.
pub const SANITIZE_LIMIT: f32 = 1e10;

/// Bounded rational approximation of the hyperbolic tangent.
///
/// Uses `x·(27 + x²) / (27 + 9x²)`, accurate to about 0.001 for |x| < 3,
/// and returns exactly ±1.0 beyond that. The two branches meet at |x| = 3
/// (`3·36 / 108 = 1`), so the curve is continuous.
///
/// # Example
///
/// ```rust
/// use tangents_core::fast_tanh;
///
/// assert_eq!(fast_tanh(0.0), 0.0);
/// assert_eq!(fast_tanh(5.0), 1.0);
/// assert!((fast_tanh(0.5) - 0.5_f32.tanh()).abs() < 0.002);
/// ```
#[inline]
pub fn fast_tanh(x: f32) -> f32 {
    if x > 3.0 {
        return 1.0;
    }
    if x < -3.0 {
        return -1.0;
    }
    let x2 = x * x;
    x * (27.0 + x2) / (27.0 + 9.0 * x2)
}

/// Asymmetric exponential diode clipper.
///
/// Positive half: `1 − e^(−x)`, approaching 1.0.
/// Negative half: `−0.5·(1 − e^(2x))`, approaching −0.5.
///
/// The negative branch saturates at half the level of the positive one,
/// producing even harmonics.
#[inline]
pub fn diode_clip(x: f32) -> f32 {
    if x > 0.0 {
        1.0 - expf(-x)
    } else {
        -0.5 * (1.0 - expf(2.0 * x))
    }
}

/// Tanh-based fold-back saturation.
///
/// Computes `fast_tanh(2x)` and, when its magnitude exceeds 0.8, folds the
/// excess back toward zero at half slope. The output never exceeds ±0.8 and
/// never drops below ±0.7 once folding starts.
#[inline]
pub fn aggressive_sat(x: f32) -> f32 {
    let t = fast_tanh(x * 2.0);
    let mag = t.abs();
    if mag > 0.8 {
        let excess = mag - 0.8;
        let sign = if t > 0.0 { 1.0 } else { -1.0 };
        sign * (0.8 - excess * 0.5)
    } else {
        t
    }
}

/// Replace NaN, infinities and runaway magnitudes with zero.
///
/// This is a hard reset, not a clamp: a value beyond [`SANITIZE_LIMIT`]
/// returns 0.0 so one bad sample cannot poison the recursive state.
///
/// # Example
///
/// ```rust
/// use tangents_core::sanitize;
///
/// assert_eq!(sanitize(0.25), 0.25);
/// assert_eq!(sanitize(f32::NAN), 0.0);
/// assert_eq!(sanitize(f32::INFINITY), 0.0);
/// assert_eq!(sanitize(-2e10), 0.0);
/// ```
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_nan() || x > SANITIZE_LIMIT || x < -SANITIZE_LIMIT {
        0.0
    } else {
        x
    }
}

/// Symmetric clamp to `±limit`.
///
/// NaN passes through unchanged; pair with [`sanitize`].
#[inline]
pub fn soft_clamp(x: f32, limit: f32) -> f32 {
    if x > limit {
        limit
    } else if x < -limit {
        -limit
    } else {
        x
    }
}
