//! Xorshift32 noise source for the input randomizer.
//!
//! A 32-bit xorshift generator (Marsaglia 2003, shifts 13/17/5). Each step is
//! an invertible linear map over GF(2)³², so a nonzero state can never map to
//! zero; zero is the only fixed point and must never be seeded.

/// Default seed used at construction.
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// Xorshift32 pseudo-random generator.
///
/// # Example
///
/// ```rust
/// use tangents_core::XorShift32;
///
/// let mut rng = XorShift32::new(1);
/// let x = rng.next_unit();
/// assert!((0.0..=1.0).contains(&x));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator from `seed`.
    ///
    /// A zero seed would stall the sequence and is replaced by
    /// [`DEFAULT_SEED`].
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Current raw state.
    #[inline]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the next raw 32-bit state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Advance and return a uniform value in \[0.0, 1.0\].
    ///
    /// The sign bit is masked off and the remaining 31 bits are scaled by
    /// `1 / 0x7FFF_FFFF`.
    #[inline]
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u32() & 0x7FFF_FFFF) as f32 / 0x7FFF_FFFF as f32
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
