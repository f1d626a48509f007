//! Parameter table listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use clap::Args;
use serde::Serialize;
use tangents_core::{PAGES, ParamIndex, ParamUnit};

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

/// One parameter as printed by `tangents params`.
#[derive(Debug, Serialize)]
struct ParamRow {
    index: usize,
    key: &'static str,
    name: &'static str,
    page: &'static str,
    unit: String,
    raw_min: i32,
    raw_max: i32,
    raw_default: i32,
    min: f32,
    max: f32,
    default: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<&'static [&'static str]>,
}

fn page_of(param: ParamIndex) -> &'static str {
    PAGES
        .iter()
        .find(|page| page.params.contains(&param))
        .map_or("", |page| page.name)
}

fn unit_name(unit: ParamUnit) -> &'static str {
    match unit {
        ParamUnit::Hertz => "hz",
        ParamUnit::Percent => "percent",
        ParamUnit::Enum => "enum",
        ParamUnit::AudioInput => "audio_input",
        ParamUnit::AudioOutput => "audio_output",
        ParamUnit::CvInput => "cv_input",
        ParamUnit::OutputMode => "output_mode",
    }
}

fn rows() -> Vec<ParamRow> {
    ParamIndex::ALL
        .iter()
        .map(|&param| {
            let d = param.descriptor();
            ParamRow {
                index: param.index(),
                key: d.key,
                name: d.name,
                page: page_of(param),
                unit: unit_name(d.unit).to_string(),
                raw_min: d.min,
                raw_max: d.max,
                raw_default: d.default,
                min: d.display_value(d.min),
                max: d.display_value(d.max),
                default: d.display_value(d.default),
                labels: d.enum_strings,
            }
        })
        .collect()
}

fn format_value(param: ParamIndex, raw: i32) -> String {
    let d = param.descriptor();
    match d.enum_label(raw) {
        Some(label) => label.to_string(),
        None => format!("{}{}", d.display_value(raw), d.unit.suffix()),
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let rows = rows();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Tangents Parameters");
    println!("===================");
    println!();
    println!(
        "  {:>2}  {:20}  {:12}  {:>10}  {:>10}  {:>10}",
        "#", "Key", "Name", "Min", "Max", "Default"
    );
    println!(
        "  {:>2}  {:20}  {:12}  {:>10}  {:>10}  {:>10}",
        "-", "---", "----", "---", "---", "-------"
    );
    for (param, row) in ParamIndex::ALL.iter().zip(&rows) {
        println!(
            "  {:>2}  {:20}  {:12}  {:>10}  {:>10}  {:>10}",
            row.index,
            row.key,
            row.name,
            format_value(*param, row.raw_min),
            format_value(*param, row.raw_max),
            format_value(*param, row.raw_default),
        );
    }

    println!();
    for page in PAGES.iter() {
        let keys: Vec<&str> = page.params.iter().map(|p| p.descriptor().key).collect();
        println!("  {:8} {}", page.name, keys.join(", "));
    }

    Ok(())
}
