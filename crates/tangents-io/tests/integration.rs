//! Integration tests for tangents-io WAV I/O and offline rendering.

use tangents_core::{ControlSnapshot, FilterMode, FilterModel, Oversample};
use tangents_io::{
    CvStreams, OfflineRenderer, SignalStats, WavFormat, WavSpec, read_wav, read_wav_info,
    write_wav,
};
use tempfile::NamedTempFile;

/// Generate a sine wave at the given sample rate.
fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

// ---------------------------------------------------------------------------
// WAV roundtrip
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_f32_96000() {
    let sr = 96000;
    let samples = sine_wave(sr, 1000.0, sr as usize / 4);
    let spec = WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec, spec);
    for (a, b) in samples.iter().zip(loaded.iter()) {
        assert!((a - b).abs() < 1e-6, "sample mismatch: {a} vs {b}");
    }
}

#[test]
fn wav_roundtrip_i24() {
    let sr = 48000;
    let samples: Vec<f32> = sine_wave(sr, 440.0, 4800).iter().map(|s| s * 0.5).collect();
    let spec = WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 24,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.bits_per_sample, 24);
    assert_eq!(info.format, WavFormat::Pcm);

    let (loaded, _) = read_wav(file.path()).unwrap();
    for (a, b) in samples.iter().zip(loaded.iter()) {
        assert!((a - b).abs() < 1e-5);
    }
}

#[test]
fn wav_int_output_clamps_full_scale() {
    let file = NamedTempFile::new().unwrap();
    let spec = WavSpec {
        bits_per_sample: 16,
        ..Default::default()
    };
    write_wav(file.path(), &[2.0, -2.0], spec).unwrap();
    let (loaded, _) = read_wav(file.path()).unwrap();
    assert!(loaded[0] < 1.0 && loaded[0] > 0.999);
    assert_eq!(loaded[1], -1.0);
}

#[test]
fn missing_file_is_an_error() {
    assert!(read_wav("/nonexistent/tangents/in.wav").is_err());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn render_file_through_filter() {
    let sr = 48000;
    let input = sine_wave(sr, 110.0, sr as usize / 2);
    let controls = ControlSnapshot::default()
        .with_cutoff(400.0)
        .with_resonance(0.5)
        .with_model(FilterModel::Ms)
        .with_oversample(Oversample::X4);

    let mut renderer = OfflineRenderer::new(sr as f32, 256).with_controls(controls);
    let output = renderer.render(&input, CvStreams::default());

    let in_file = NamedTempFile::new().unwrap();
    let out_file = NamedTempFile::new().unwrap();
    write_wav(in_file.path(), &input, WavSpec::default()).unwrap();
    write_wav(out_file.path(), &output, WavSpec::default()).unwrap();

    let (reloaded, _) = read_wav(out_file.path()).unwrap();
    assert_eq!(reloaded.len(), input.len());
    let stats = SignalStats::measure(&reloaded);
    assert!(stats.peak <= 1.0);
    assert!(stats.rms > 0.05);
    assert!(renderer.filter().output_level() > 0.0);
}

#[test]
fn highpass_render_removes_low_sine() {
    let sr = 48000;
    let input: Vec<f32> = sine_wave(sr, 50.0, sr as usize).iter().map(|s| s * 0.5).collect();

    let mut lp = OfflineRenderer::new(sr as f32, 128)
        .with_controls(ControlSnapshot::default().with_cutoff(5000.0));
    let mut hp = OfflineRenderer::new(sr as f32, 128).with_controls(
        ControlSnapshot::default()
            .with_cutoff(5000.0)
            .with_mode(FilterMode::Highpass),
    );

    let lp_out = lp.render(&input, CvStreams::default());
    let hp_out = hp.render(&input, CvStreams::default());
    let settle = sr as usize / 2;
    let lp_rms = SignalStats::measure(&lp_out[settle..]).rms;
    let hp_rms = SignalStats::measure(&hp_out[settle..]).rms;
    assert!(hp_rms < lp_rms * 0.05, "hp {hp_rms} vs lp {lp_rms}");
}

#[test]
fn resonance_cv_stream_raises_resonance() {
    let sr = 48000.0;
    let input = vec![0.0; 128 * 100];
    let cv = vec![1.0; input.len()];

    let mut renderer = OfflineRenderer::new(sr, 128);
    renderer.render(
        &input,
        CvStreams {
            cutoff: None,
            resonance: Some(&cv),
        },
    );
    // Base 0 + 1.0 · 1.0 · 0.5
    let res = renderer.filter().smoothed().resonance.get();
    assert!((res - 0.5).abs() < 1e-3, "resonance {res}");
}
