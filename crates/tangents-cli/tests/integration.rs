//! Integration tests for the `tangents` binary.
//!
//! Tests cover argument handling, signal generation, end-to-end file
//! processing and preset commands.

use std::path::Path;
use std::process::{Command, Output};
use tangents_io::{SignalStats, WavSpec, read_wav, write_wav};
use tempfile::TempDir;

/// Helper to get the path to the `tangents` binary built by cargo.
fn tangents_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tangents"))
}

fn run(args: &[&str]) -> Output {
    tangents_bin()
        .args(args)
        .output()
        .expect("failed to run tangents")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_saw(path: &Path, sr: u32, len: usize) {
    let samples: Vec<f32> = (0..len)
        .map(|i| ((i % 200) as f32 / 100.0 - 1.0) * 0.5)
        .collect();
    let spec = WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 32,
    };
    write_wav(path, &samples, spec).unwrap();
}

// ---------------------------------------------------------------------------
// Basic invocation
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = run(&["--help"]);
    assert_success(&output, "tangents --help");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tangents Steiner-Parker filter CLI"));
    for cmd in ["process", "generate", "params", "presets"] {
        assert!(stdout.contains(cmd), "help should list '{cmd}'");
    }
}

#[test]
fn cli_version_works() {
    let output = run(&["--version"]);
    assert_success(&output, "tangents --version");
    assert!(String::from_utf8_lossy(&output.stdout).contains("tangents"));
}

#[test]
fn cli_params_lists_table() {
    let output = run(&["params"]);
    assert_success(&output, "tangents params");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["cutoff_hz", "resonance", "oversample", "cv_cutoff_bus", "drive"] {
        assert!(stdout.contains(key), "params should list '{key}'");
    }
}

#[test]
fn cli_params_json() {
    let output = run(&["params", "--json"]);
    assert_success(&output, "tangents params --json");

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 14);
    assert_eq!(rows[3]["key"], "cutoff_hz");
    assert_eq!(rows[3]["raw_default"], 1000);
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_saw() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saw.wav");

    let output = run(&[
        "generate",
        "saw",
        path.to_str().unwrap(),
        "--freq",
        "220",
        "--duration",
        "0.5",
        "--sample-rate",
        "44100",
    ]);
    assert_success(&output, "tangents generate saw");

    let (samples, spec) = read_wav(&path).unwrap();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(samples.len(), 22050);
    assert!(SignalStats::measure(&samples).peak <= 0.8 + 1e-6);
}

// ---------------------------------------------------------------------------
// process
// ---------------------------------------------------------------------------

#[test]
fn cli_process_with_overrides() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_saw(&input, 48000, 24000);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "--cutoff",
        "800Hz",
        "--resonance",
        "60",
        "--model",
        "ms",
        "--oversample",
        "4x",
        "--bit-depth",
        "24",
    ]);
    assert_success(&output, "tangents process");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Stats:"));
    assert!(stdout.contains("MS"));

    let (loaded, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.bits_per_sample, 24);
    assert_eq!(loaded.len(), 24000);
    let stats = SignalStats::measure(&loaded);
    assert!(stats.peak <= 1.0);
    assert!(stats.rms > 0.0);
}

#[test]
fn cli_process_factory_preset_with_cv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let cv = dir.path().join("cv.wav");
    let output_path = dir.path().join("out.wav");
    write_saw(&input, 48000, 9600);

    let gen_output = run(&[
        "generate",
        "ramp",
        cv.to_str().unwrap(),
        "--duration",
        "0.2",
        "--amplitude",
        "1.0",
    ]);
    assert_success(&gen_output, "tangents generate ramp");

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "--preset",
        "vowel_band",
        "--cv-cutoff",
        cv.to_str().unwrap(),
        "--block-size",
        "64",
    ]);
    assert_success(&output, "tangents process --preset");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Vowel Band"));

    let (loaded, _) = read_wav(&output_path).unwrap();
    assert_eq!(loaded.len(), 9600);
    assert!(loaded.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn cli_process_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_saw(&input, 48000, 480);

    for (flag, value) in [("--resonance", "150"), ("--oversample", "3"), ("--mode", "comb")] {
        let output = run(&[
            "process",
            input.to_str().unwrap(),
            output_path.to_str().unwrap(),
            flag,
            value,
        ]);
        assert!(!output.status.success(), "{flag} {value} should fail");
    }
    assert!(!output_path.exists());
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&[
        "process",
        "/nonexistent/tangents/in.wav",
        dir.path().join("out.wav").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// presets
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_factory() {
    let output = run(&["presets", "list", "--factory"]);
    assert_success(&output, "tangents presets list");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Factory Presets"));
    assert!(stdout.contains("Acid Squelch"));
    assert!(!stdout.contains("User Presets"));
}

#[test]
fn cli_presets_show() {
    let output = run(&["presets", "show", "sine_ring"]);
    assert_success(&output, "tangents presets show");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sine Ring"));
    assert!(stdout.contains("16x"));
}

#[test]
fn cli_presets_save_and_process() {
    let dir = TempDir::new().unwrap();
    let preset_path = dir.path().join("mine.toml");

    let output = run(&[
        "presets",
        "save",
        "Mine",
        preset_path.to_str().unwrap(),
        "--from",
        "acid_squelch",
        "--set",
        "cutoff=1.5kHz",
        "--description",
        "Brighter squelch",
    ]);
    assert_success(&output, "tangents presets save");

    let contents = std::fs::read_to_string(&preset_path).unwrap();
    assert!(contents.contains("name = \"Mine\""));
    assert!(contents.contains("cutoff_hz = 1500"));
    assert!(contents.contains("model = \"xx\""));

    // Refuses to overwrite without --force
    let again = run(&["presets", "save", "Mine", preset_path.to_str().unwrap()]);
    assert!(!again.status.success());

    let input = dir.path().join("in.wav");
    let out = dir.path().join("out.wav");
    write_saw(&input, 48000, 4800);
    let output = run(&[
        "process",
        input.to_str().unwrap(),
        out.to_str().unwrap(),
        "--preset",
        preset_path.to_str().unwrap(),
    ]);
    assert_success(&output, "tangents process with saved preset");
    assert!(out.exists());
}

#[test]
fn cli_process_warns_on_preset_rate_mismatch() {
    let dir = TempDir::new().unwrap();
    let preset_path = dir.path().join("cd.toml");
    let output = run(&[
        "presets",
        "save",
        "CD",
        preset_path.to_str().unwrap(),
        "--sample-rate",
        "44100",
    ]);
    assert_success(&output, "tangents presets save --sample-rate");
    let contents = std::fs::read_to_string(&preset_path).unwrap();
    assert!(contents.contains("sample_rate = 44100"));

    let input = dir.path().join("in.wav");
    let out = dir.path().join("out.wav");
    write_saw(&input, 48000, 4800);
    let process = |preset: &str| {
        tangents_bin()
            .env_remove("RUST_LOG")
            .args([
                "process",
                input.to_str().unwrap(),
                out.to_str().unwrap(),
                "--preset",
                preset,
            ])
            .output()
            .expect("failed to run tangents")
    };

    let output = process(preset_path.to_str().unwrap());
    assert_success(&output, "tangents process with 44.1 kHz preset");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("preset sample rate differs"), "{stderr}");
    // Rendered at the file's rate
    let (_, spec) = read_wav(&out).unwrap();
    assert_eq!(spec.sample_rate, 48000);

    let output = process("init");
    assert_success(&output, "tangents process with 48 kHz preset");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("preset sample rate differs"));
}
