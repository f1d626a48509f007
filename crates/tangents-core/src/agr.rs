//! Attenu-Gain-Randomizer (AGR) input conditioning.
//!
//! A single control value in \[0, 100\] selects one of three behaviours:
//!
//! | Range | Zone | Gain |
//! |-------|------|------|
//! | 0 – 25 | Random | `v/50 + rand · (1 − v/25)` |
//! | 25 – 50 | Attenuate | 0.5 → 1.0, linear |
//! | 50 – 100 | Amplify | 1.0 → 4.0 (+12 dB), linear |
//!
//! The amplification zone is linear in the control value. Older control
//! metadata described it as quadratic; the linear curve is the shipped
//! behaviour and is kept as-is.
//!
//! In the random zone the weight of the random component falls from 1.0 at
//! 0 to 0.0 at 25, so the zone hands over continuously to the attenuation
//! zone at 0.5.
//!
//! The control value is truncated to a whole step before the zone and gain
//! are chosen: 25.9 still draws from the generator, 49.9 reads as 49.

use crate::random::XorShift32;
use libm::truncf;

/// Control value at which the random zone ends.
pub const RANDOM_ZONE_END: f32 = 25.0;

/// Control value giving unity gain.
pub const UNITY: f32 = 50.0;

/// Maximum gain at control value 100 (+12 dB).
pub const MAX_GAIN: f32 = 4.0;

/// Behavioural zone of an AGR control value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgrZone {
    /// Amplitude randomized every sample.
    Random,
    /// Fixed attenuation between −6 dB and unity.
    Attenuate,
    /// Fixed gain between unity and +12 dB.
    Amplify,
}

impl AgrZone {
    /// Zone of a control value, truncated to a whole step.
    pub fn of(value: f32) -> Self {
        let value = truncf(value);
        if value <= RANDOM_ZONE_END {
            AgrZone::Random
        } else if value <= UNITY {
            AgrZone::Attenuate
        } else {
            AgrZone::Amplify
        }
    }

    /// Three-letter label for compact displays.
    pub const fn label(self) -> &'static str {
        match self {
            AgrZone::Random => "RND",
            AgrZone::Attenuate => "ATN",
            AgrZone::Amplify => "AMP",
        }
    }
}

/// Gain multiplier for an AGR control value.
///
/// `value` is truncated to a whole step first. Draws exactly one value from
/// `rng` when the truncated value lies in the random zone and leaves it
/// untouched otherwise.
///
/// # Example
///
/// ```rust
/// use tangents_core::{agr_gain, XorShift32};
///
/// let mut rng = XorShift32::default();
/// assert_eq!(agr_gain(50.0, &mut rng), 1.0);
/// assert_eq!(agr_gain(100.0, &mut rng), 4.0);
/// assert!((agr_gain(49.9, &mut rng) - 0.98).abs() < 1e-6);
/// ```
#[inline]
pub fn agr_gain(value: f32, rng: &mut XorShift32) -> f32 {
    let value = truncf(value);
    if value <= RANDOM_ZONE_END {
        let random_mix = 1.0 - value / RANDOM_ZONE_END;
        let base_gain = value / UNITY;
        base_gain + rng.next_unit() * random_mix
    } else if value <= UNITY {
        let t = (value - RANDOM_ZONE_END) / RANDOM_ZONE_END;
        0.5 + t * 0.5
    } else {
        let t = (value - UNITY) / UNITY;
        1.0 + t * (MAX_GAIN - 1.0)
    }
}
