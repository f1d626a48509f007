//! Tangents Core - Steiner-Parker multimode filter DSP
//!
//! A resonant two-pole state-variable filter in the Steiner-Parker style,
//! with three saturation models, four output modes, up to 16× oversampling,
//! control-voltage modulation and an Attenu-Gain-Randomizer on the input.
//! Everything runs in the host's block callback with zero allocation.
//!
//! # Signal Flow
//!
//! ```text
//! input ─▶ AGR × drive ─▶ [model drive ─▶ TPT SVF] × N ─▶ average ─▶ model saturation ─▶ output
//!                                 ▲
//!            cutoff/resonance ── smoothing ◀── CV
//! ```
//!
//! # Core Abstractions
//!
//! ## Processing
//!
//! - [`Tangents`] - The block processor (shared-bus and slice entry points)
//! - [`Effect`] - Mono effect interface for offline hosts
//!
//! ## Filter
//!
//! - [`SteinerParker`] - Oversampled nonlinear SVF state
//! - [`FilterCoeffs`] - Per-block `g`, `k`, `g_inv`
//! - [`FilterModel`], [`FilterMode`], [`Oversample`] - Discrete selectors
//!
//! ## Controls
//!
//! - [`RawParams`], [`ParamIndex`], [`PARAMETERS`], [`PAGES`] - Integer parameter table
//! - [`ControlSnapshot`], [`Routing`] - Per-block decoded controls
//! - [`SmoothedParam`], [`SmoothedParameters`] - Block-rate smoothing
//!
//! ## Utilities
//!
//! - [`agr_gain`], [`AgrZone`] - Input conditioning
//! - [`XorShift32`] - Deterministic noise for the AGR random zone
//! - [`LevelMeter`] - Decaying block-peak meters
//! - Math functions: [`fast_tanh`], [`diode_clip`], [`aggressive_sat`], [`sanitize`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tangents-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use tangents_core::{ControlSnapshot, FilterMode, FilterModel, Oversample, Tangents};
//!
//! let mut filter = Tangents::new(48000.0);
//! filter.set_controls(
//!     ControlSnapshot::default()
//!         .with_cutoff(800.0)
//!         .with_resonance(0.7)
//!         .with_mode(FilterMode::Bandpass)
//!         .with_model(FilterModel::Ms)
//!         .with_oversample(Oversample::X4),
//! );
//!
//! let input = [0.25f32; 128];
//! let mut output = [0.0f32; 128];
//! filter.process_block_with_cv(&input, &mut output, None, None);
//! assert!(output.iter().all(|s| s.abs() <= 1.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod agr;
pub mod coeffs;
pub mod control;
pub mod effect;
pub mod engine;
pub mod math;
pub mod meter;
pub mod model;
pub mod param;
pub mod param_info;
pub mod random;
pub mod svf;

// Re-export main types at crate root
pub use agr::{AgrZone, agr_gain};
pub use coeffs::FilterCoeffs;
pub use control::{ControlSnapshot, Routing};
pub use effect::Effect;
pub use engine::Tangents;
pub use math::{aggressive_sat, diode_clip, fast_tanh, sanitize, soft_clamp};
pub use meter::LevelMeter;
pub use model::{
    FilterMode, FilterModel, MODE_NAMES, MODE_SHORT_NAMES, MODEL_NAMES, OVERSAMPLE_NAMES,
    Oversample,
};
pub use param::{SmoothedParam, SmoothedParameters};
pub use param_info::{
    MAX_BUSSES, NUM_PARAMS, PAGES, PARAMETERS, ParamDescriptor, ParamIndex, ParamPage, ParamScaling,
    ParamUnit, RawParams,
};
pub use random::XorShift32;
pub use svf::SteinerParker;
