//! File I/O and offline rendering for the Tangents filter.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving mono audio
//! - **Offline rendering**: [`OfflineRenderer`] for running files through the
//!   filter in host-sized blocks, with optional CV streams
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tangents_core::ControlSnapshot;
//! use tangents_io::{CvStreams, OfflineRenderer, read_wav, write_wav};
//!
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let mut renderer = OfflineRenderer::new(spec.sample_rate as f32, 128)
//!     .with_controls(ControlSnapshot::default().with_cutoff(800.0));
//! let processed = renderer.render(&samples, CvStreams::default());
//!
//! write_wav("output.wav", &processed, spec)?;
//! ```

mod render;
mod wav;

pub use render::{CvStreams, DEFAULT_BLOCK_SIZE, OfflineRenderer, SignalStats};
pub use wav::{
    SUPPORTED_BIT_DEPTHS, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested output bit depth is not supported.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
