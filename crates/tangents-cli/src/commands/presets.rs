//! Preset management commands.
//!
//! Provides commands to list, show and save filter presets.

use super::common::{load_preset, parse_key_val};
use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tangents_config::{
    FilterSettings, Preset, ensure_user_presets_dir, factory_presets, list_user_presets,
    preset_name_from_path, system_presets_dir, user_presets_dir,
};
use tangents_core::ParamIndex;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the preset as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Save filter settings as a preset
    Save {
        /// Name for the new preset
        name: String,

        /// Destination file (defaults to the user presets directory)
        path: Option<PathBuf>,

        /// Start from an existing preset instead of the defaults
        #[arg(long)]
        from: Option<String>,

        /// Parameter overrides (e.g. "cutoff=800", "model=xx")
        #[arg(long = "set", value_parser = parse_key_val, num_args = 1)]
        set: Vec<(String, String)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Sample rate the preset was tuned at
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            name,
            path,
            from,
            set,
            description,
            sample_rate,
            force,
        } => save_preset(
            &name,
            path,
            from.as_deref(),
            &set,
            description.as_deref(),
            sample_rate,
            force,
        ),
        PresetsCommand::Paths => show_paths(),
    }
}

fn summary(filter: &FilterSettings) -> String {
    format!(
        "{} {} {:.0} Hz res {:.0}%",
        filter.mode, filter.model, filter.cutoff_hz, filter.resonance
    )
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:16} {:32} {}", preset.name, summary(&preset.filter), desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: tangents presets save <name> --set cutoff=800\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => println!("  {:16} {}", name, summary(&preset.filter)),
                    Err(e) => println!("  {:16} (error loading: {e})", name),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str, as_toml: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    if as_toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Sample Rate: {} Hz", preset.sample_rate);
    println!();

    let raw = preset.filter.to_raw_params()?;
    println!("Filter:");
    for param in ParamIndex::ALL {
        let d = param.descriptor();
        if !matches!(
            param,
            ParamIndex::Input
                | ParamIndex::Output
                | ParamIndex::OutputMode
                | ParamIndex::CvCutoff
                | ParamIndex::CvResonance
        ) {
            let value = raw.get(param);
            let shown = d.enum_label(value).map_or_else(
                || format!("{}{}", d.display_value(value), d.unit.suffix()),
                str::to_string,
            );
            println!("  {:20} = {:>10}   (raw {})", d.key, shown, value);
        }
    }

    Ok(())
}

fn save_preset(
    name: &str,
    path: Option<PathBuf>,
    from: Option<&str>,
    overrides: &[(String, String)],
    description: Option<&str>,
    sample_rate: Option<u32>,
    force: bool,
) -> anyhow::Result<()> {
    let preset_path = match path {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(format!("{name}.toml")),
    };

    if preset_path.exists() && !force {
        anyhow::bail!(
            "Preset file '{}' already exists. Use --force to overwrite.",
            preset_path.display()
        );
    }

    let mut preset = match from {
        Some(source) => {
            let base = load_preset(source)?;
            Preset {
                name: name.to_string(),
                ..base
            }
        }
        None => Preset::new(name),
    };
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    if let Some(rate) = sample_rate {
        anyhow::ensure!(rate > 0, "sample rate must be positive");
        preset = preset.with_sample_rate(rate);
    }

    for (key, value) in overrides {
        preset
            .filter
            .set(key, value)
            .with_context(|| format!("invalid value for {key}"))?;
    }

    preset.save(&preset_path)?;
    tracing::debug!(path = %preset_path.display(), "preset saved");

    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());

    Ok(())
}
