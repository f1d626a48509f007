//! File-based filter processing command.

use super::common::{linear_to_db, load_preset, parse_key_val};
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tangents_config::FilterSettings;
use tangents_io::{
    CvStreams, DEFAULT_BLOCK_SIZE, OfflineRenderer, SignalStats, WavSpec, read_wav, write_wav,
};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (multi-channel files are mixed to mono)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or path (TOML)
    #[arg(short, long)]
    preset: Option<String>,

    /// Cutoff frequency (e.g. "800", "1.2kHz")
    #[arg(long)]
    cutoff: Option<String>,

    /// Resonance in percent
    #[arg(long)]
    resonance: Option<String>,

    /// Filter mode: lowpass, bandpass, highpass, allpass (or lp/bp/hp/ap)
    #[arg(long)]
    mode: Option<String>,

    /// Saturation model: yu, ms, xx
    #[arg(long)]
    model: Option<String>,

    /// Drive in percent
    #[arg(long)]
    drive: Option<String>,

    /// AGR input control in percent (50 = unity)
    #[arg(long)]
    input_gain: Option<String>,

    /// Oversampling factor: 1, 2, 4, 8, 16
    #[arg(long)]
    oversample: Option<String>,

    /// Additional parameter overrides (e.g. "cv_cutoff_amount=-50")
    #[arg(long = "set", value_parser = parse_key_val, num_args = 1)]
    set: Vec<(String, String)>,

    /// WAV file modulating the cutoff (first sample of each block)
    #[arg(long, value_name = "WAV")]
    cv_cutoff: Option<PathBuf>,

    /// WAV file modulating the resonance (first sample of each block)
    #[arg(long, value_name = "WAV")]
    cv_resonance: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

impl ProcessArgs {
    /// Filter settings after preset and overrides, plus the preset's rate.
    fn settings(&self) -> anyhow::Result<(FilterSettings, Option<u32>)> {
        let (mut settings, preset_rate) = match &self.preset {
            Some(name) => {
                let preset = load_preset(name)?;
                println!("Loading preset: {}", preset.name);
                (preset.filter, Some(preset.sample_rate))
            }
            None => (FilterSettings::default(), None),
        };

        let flags = [
            ("cutoff", &self.cutoff),
            ("resonance", &self.resonance),
            ("mode", &self.mode),
            ("model", &self.model),
            ("drive", &self.drive),
            ("input", &self.input_gain),
            ("oversample", &self.oversample),
        ];
        let overrides = flags
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .chain(self.set.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        for (key, value) in overrides {
            settings
                .set(key, value)
                .with_context(|| format!("invalid value for {key}"))?;
        }
        Ok((settings, preset_rate))
    }
}

/// Warn when a preset was authored at a different rate than the input file.
/// Returns whether the rates differ.
fn check_preset_rate(preset_rate: Option<u32>, file_rate: u32) -> bool {
    match preset_rate {
        Some(rate) if rate != file_rate => {
            tracing::warn!(
                preset_rate = rate,
                file_rate,
                "preset sample rate differs from input; processing at the input rate"
            );
            true
        }
        _ => false,
    }
}

fn read_cv(path: Option<&Path>, sample_rate: u32) -> anyhow::Result<Option<Vec<f32>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let (samples, spec) =
        read_wav(path).with_context(|| format!("failed to read CV file {}", path.display()))?;
    if spec.sample_rate != sample_rate {
        tracing::warn!(
            path = %path.display(),
            cv_rate = spec.sample_rate,
            audio_rate = sample_rate,
            "CV sample rate differs from input; using samples as-is"
        );
    }
    Ok(Some(samples))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let (settings, preset_rate) = args.settings()?;
    let controls = settings.to_controls()?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    check_preset_rate(preset_rate, spec.sample_rate);

    let cv_cutoff = read_cv(args.cv_cutoff.as_deref(), spec.sample_rate)?;
    let cv_resonance = read_cv(args.cv_resonance.as_deref(), spec.sample_rate)?;

    println!(
        "Filter: {} {} @ {:.0} Hz, res {:.1}%, drive {:.1}%, input {:.1}%, {}x",
        controls.mode.name(),
        controls.model.name(),
        controls.cutoff,
        settings.resonance,
        settings.drive,
        settings.input,
        controls.oversample.factor()
    );

    let mut renderer =
        OfflineRenderer::new(sample_rate, args.block_size).with_controls(controls);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = renderer.render_with_progress(
        &samples,
        CvStreams {
            cutoff: cv_cutoff.as_deref(),
            resonance: cv_resonance.as_deref(),
        },
        |done| pb.set_position(done as u64),
    );
    pb.finish_with_message("done");

    let input_stats = SignalStats::measure(&samples);
    let output_stats = SignalStats::measure(&output);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB, Meter {:.1} dB",
        linear_to_db(input_stats.rms),
        linear_to_db(input_stats.peak),
        linear_to_db(renderer.filter().input_level())
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB, Meter {:.1} dB",
        linear_to_db(output_stats.rms),
        linear_to_db(output_stats.peak),
        linear_to_db(renderer.filter().output_level())
    );

    let out_spec = WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rate_mismatch() {
        assert!(check_preset_rate(Some(44100), 48000));
        assert!(!check_preset_rate(Some(48000), 48000));
        assert!(!check_preset_rate(None, 96000));
    }
}
