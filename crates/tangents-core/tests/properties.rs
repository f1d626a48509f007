//! Property-based tests for tangents-core.
//!
//! Filter stability under arbitrary settings, coefficient determinism, AGR
//! gain bounds, smoothing convergence and generator non-degeneracy, using
//! proptest for randomized input generation.

use proptest::prelude::*;
use tangents_core::{
    ControlSnapshot, FilterCoeffs, FilterMode, FilterModel, Oversample, ParamIndex, RawParams,
    SmoothedParam, Tangents, XorShift32, agr_gain, sanitize,
};

const SAMPLE_RATE: f32 = 48000.0;

fn white_noise(seed: u32, len: usize) -> Vec<f32> {
    let mut rng = XorShift32::new(seed);
    (0..len).map(|_| rng.next_unit() * 2.0 - 1.0).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any cutoff, resonance, drive, model, mode and oversampling factor with
    /// full-scale white noise yields finite output within the saturation
    /// bound, and filter state stays inside the safety envelope.
    #[test]
    fn filter_stability(
        cutoff in 20.0f32..21600.0f32,
        resonance in 0.0f32..=1.0f32,
        drive in 1.0f32..=5.0f32,
        agr in 0.0f32..=100.0f32,
        model in 0i32..3,
        mode in 0i32..4,
        oversample in 0i32..5,
        seed in 1u32..u32::MAX,
    ) {
        let mut filter = Tangents::new(SAMPLE_RATE);
        filter.set_controls(
            ControlSnapshot::default()
                .with_cutoff(cutoff)
                .with_resonance(resonance)
                .with_drive(drive)
                .with_agr(agr)
                .with_model(FilterModel::from_index(model))
                .with_mode(FilterMode::from_index(mode))
                .with_oversample(Oversample::from_index(oversample)),
        );

        let input = white_noise(seed, 1024);
        let mut output = vec![0.0; 1024];
        for (inp, out) in input.chunks(64).zip(output.chunks_mut(64)) {
            filter.process_block_with_cv(inp, out, None, None);
        }

        for &s in &output {
            prop_assert!(s.is_finite() && s.abs() <= 1.0, "output {} out of bounds", s);
        }
        prop_assert!(filter.state().lowpass().abs() <= 5.0);
        prop_assert!(filter.state().bandpass().abs() <= 5.0);
        prop_assert!(filter.state().highpass().is_finite());
    }

    /// Arbitrary raw parameter tables, including out-of-range values, never
    /// destabilise the shared-bus entry point.
    #[test]
    fn raw_table_stability(
        raw in prop::array::uniform14(-30_000i32..30_000),
        frames in 1usize..128,
    ) {
        let mut params = RawParams::from_array(raw);
        params.set(ParamIndex::Input, 1);
        params.set(ParamIndex::Output, 2);
        let mut filter = Tangents::new(SAMPLE_RATE);

        let noise = white_noise(7, 3 * frames);
        for _ in 0..4 {
            let mut bus = noise.clone();
            filter.step(&mut bus, frames, &params);
            for &s in &bus[frames..2 * frames] {
                prop_assert!(s.is_finite());
            }
        }
    }

    /// Equal inputs give bit-identical coefficients.
    #[test]
    fn coefficients_deterministic(
        cutoff in -100.0f32..100_000.0f32,
        resonance in 0.0f32..=1.0f32,
        rate in 8000.0f32..800_000.0f32,
    ) {
        let a = FilterCoeffs::calculate(cutoff, resonance, rate);
        let b = FilterCoeffs::calculate(cutoff, resonance, rate);
        prop_assert_eq!(a.g.to_bits(), b.g.to_bits());
        prop_assert_eq!(a.k.to_bits(), b.k.to_bits());
        prop_assert_eq!(a.g_inv.to_bits(), b.g_inv.to_bits());
        prop_assert!(a.g > 0.0 && a.g.is_finite());
        prop_assert!(a.g_inv > 0.0 && a.g_inv <= 1.0);
    }

    /// AGR gain stays within each zone's bounds.
    #[test]
    fn agr_gain_bounds(value in 0.0f32..=100.0f32, seed in 1u32..u32::MAX) {
        let mut rng = XorShift32::new(seed);
        let g = agr_gain(value, &mut rng);
        prop_assert!(g.is_finite());
        if value <= 25.0 {
            prop_assert!((0.0..=1.0).contains(&g), "random zone gain {}", g);
        } else if value <= 50.0 {
            prop_assert!((0.5..=1.0).contains(&g), "attenuation gain {}", g);
        } else {
            prop_assert!((1.0..=4.0).contains(&g), "amplification gain {}", g);
        }
    }

    /// A smoothed value approaches any constant target monotonically and
    /// gets within 1 % of the step within 50 blocks.
    #[test]
    fn smoothing_converges(
        start in -1000.0f32..1000.0f32,
        target in -1000.0f32..1000.0f32,
    ) {
        let mut p = SmoothedParam::new(start);
        p.set_target(target);
        let mut dist = (target - start).abs();
        for _ in 0..50 {
            p.advance();
            let d = (target - p.get()).abs();
            prop_assert!(d <= dist + 1e-3);
            dist = d;
        }
        prop_assert!(dist <= (target - start).abs() * 0.01 + 1e-3);
    }

    /// The generator never reaches zero from a nonzero seed.
    #[test]
    fn xorshift_never_zero(seed in 1u32..=u32::MAX) {
        let mut rng = XorShift32::new(seed);
        for _ in 0..10_000 {
            prop_assert_ne!(rng.next_u32(), 0);
        }
    }

    /// Sanitize removes every non-finite or runaway value.
    #[test]
    fn sanitize_bounds(x in prop::num::f32::ANY) {
        let y = sanitize(x);
        prop_assert!(y.is_finite() && y.abs() <= 1e10);
    }
}
