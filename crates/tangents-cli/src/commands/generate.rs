//! Test signal generation command.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use tangents_core::XorShift32;
use tangents_io::{WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Options shared by every generator.
#[derive(Args, Clone, Copy)]
struct SignalOptions {
    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Peak amplitude
    #[arg(long, default_value = "0.8")]
    amplitude: f32,
}

impl SignalOptions {
    fn num_samples(&self) -> usize {
        (self.duration.max(0.0) * self.sample_rate as f32) as usize
    }
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Single-sample impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// White noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Generator seed (nonzero)
        #[arg(long, default_value = "305419896")]
        seed: u32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Naive sawtooth (rich in harmonics, good for filter sweeps)
    Saw {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "110.0")]
        freq: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Linear ramp from -amplitude to +amplitude, for use as a CV file
    Ramp {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: SignalOptions,
    },
}

fn impulse(len: usize, amplitude: f32) -> Vec<f32> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

fn noise(len: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut rng = XorShift32::new(seed.max(1));
    (0..len)
        .map(|_| (rng.next_unit() * 2.0 - 1.0) * amplitude)
        .collect()
}

fn sine(len: usize, amplitude: f32, freq: f32, sample_rate: u32) -> Vec<f32> {
    let w = std::f32::consts::TAU * freq / sample_rate as f32;
    (0..len).map(|i| (w * i as f32).sin() * amplitude).collect()
}

fn saw(len: usize, amplitude: f32, freq: f32, sample_rate: u32) -> Vec<f32> {
    let inc = freq / sample_rate as f32;
    let mut phase = 0.0_f32;
    (0..len)
        .map(|_| {
            let s = 2.0 * phase - 1.0;
            phase = (phase + inc).fract();
            s * amplitude
        })
        .collect()
}

fn ramp(len: usize, amplitude: f32) -> Vec<f32> {
    let denom = len.saturating_sub(1).max(1) as f32;
    (0..len)
        .map(|i| (2.0 * i as f32 / denom - 1.0) * amplitude)
        .collect()
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (output, options, samples) = match args.command {
        GenerateCommand::Impulse { output, options } => {
            println!("Generating impulse...");
            let samples = impulse(options.num_samples(), options.amplitude);
            (output, options, samples)
        }
        GenerateCommand::Noise {
            output,
            seed,
            options,
        } => {
            println!("Generating white noise...");
            let samples = noise(options.num_samples(), options.amplitude, seed);
            (output, options, samples)
        }
        GenerateCommand::Sine {
            output,
            freq,
            options,
        } => {
            println!("Generating {freq} Hz sine...");
            let samples = sine(
                options.num_samples(),
                options.amplitude,
                freq,
                options.sample_rate,
            );
            (output, options, samples)
        }
        GenerateCommand::Saw {
            output,
            freq,
            options,
        } => {
            println!("Generating {freq} Hz sawtooth...");
            let samples = saw(
                options.num_samples(),
                options.amplitude,
                freq,
                options.sample_rate,
            );
            (output, options, samples)
        }
        GenerateCommand::Ramp { output, options } => {
            println!("Generating ramp...");
            let samples = ramp(options.num_samples(), options.amplitude);
            (output, options, samples)
        }
    };

    println!("  {:.2}s at {} Hz", options.duration, options.sample_rate);

    let spec = WavSpec {
        channels: 1,
        sample_rate: options.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&output, &samples, spec)?;
    println!("Wrote {} samples to {}", samples.len(), output.display());

    Ok(())
}
