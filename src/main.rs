//! Resume Signals CLI
//!
//! Measures skill bars from grayscale profiles and extracts the skills
//! section from OCR output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use resume_signals::bar::{CountScope, analyze_with_scope};
use resume_signals::input::ProfileSet;
use resume_signals::report::{build_report, export_to_json};
use resume_signals::skills::{OcrData, SkillExtractor};
use resume_signals::{SignalsConfig, log, paths};

#[derive(Parser)]
#[command(name = "resume-signals")]
#[command(about = "Extract skills and skill-bar levels from resume scans")]
#[command(version)]
struct Cli {
    /// Path to config.json (defaults to the one next to the executable)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure one bar profile and print the result as JSON
    Bar {
        /// Bar fill intensity
        #[arg(short, long, allow_negative_numbers = true)]
        bar_value: i64,

        /// Half-width of the intensity window (overrides config)
        #[arg(short, long, allow_negative_numbers = true)]
        tolerance: Option<i64>,

        /// Count only matches inside the detected bar span
        #[arg(long)]
        strict: bool,

        /// Grayscale samples along the bar
        #[arg(required = true, allow_negative_numbers = true)]
        pixels: Vec<i64>,
    },

    /// Extract the skills section from an OCR document (.json or .tsv)
    Skills {
        /// OCR document
        ocr: PathBuf,

        /// Line that opens the section (overrides config)
        #[arg(long)]
        start: Option<String>,

        /// Line that closes the section (overrides config)
        #[arg(long)]
        end: Option<String>,
    },

    /// Run both extractors and write a JSON report
    Report {
        /// OCR document (.json or .tsv)
        #[arg(long)]
        ocr: Option<PathBuf>,

        /// Pixel profile CSV (label,bar_value,pixels)
        #[arg(long)]
        profiles: PathBuf,

        /// Output path; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Write the default config.json for reference
    InitConfig,
}

fn main() -> Result<()> {
    // Log panics before the process dies
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Warning: could not create logs directory: {}", e);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(paths::get_default_config_path);

    match cli.command {
        Commands::InitConfig => {
            SignalsConfig::save_default(&config_path)?;
            log(&format!("Default config written to {}", config_path.display()));
        }
        Commands::Bar {
            bar_value,
            tolerance,
            strict,
            pixels,
        } => {
            let config = SignalsConfig::load(&config_path);
            let scope = if strict {
                CountScope::BarSpan
            } else {
                config.count_scope
            };
            let tolerance = tolerance.unwrap_or(config.tolerance);
            let profile = analyze_with_scope(&pixels, bar_value, tolerance, scope);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Skills { ocr, start, end } => {
            let config = SignalsConfig::load(&config_path);
            let data = OcrData::from_file(&ocr)?;
            let extractor = SkillExtractor::new(config.bugged_texts.iter().cloned())?;
            let start = start.unwrap_or(config.start_keyword);
            let end = end.unwrap_or(config.end_keyword);

            let skills = extractor.extract(&data, &start, &end);
            log(&format!("Found {} skills in {}", skills.len(), ocr.display()));
            for skill in skills {
                println!("{}", skill);
            }
        }
        Commands::Report { ocr, profiles, out } => {
            let config = SignalsConfig::load(&config_path);
            let ocr_data = ocr.as_deref().map(OcrData::from_file).transpose()?;
            let profile_set = ProfileSet::from_csv(&profiles)?;
            log(&format!("Loaded {} profiles from {}", profile_set.len(), profiles.display()));

            let report = build_report(&config, ocr_data.as_ref(), &profile_set)?;

            match out {
                Some(path) => {
                    export_to_json(&report, &path)?;
                    log(&format!("Report saved: {}", path.display()));
                }
                None => {
                    let json = serde_json::to_string_pretty(&report)
                        .context("Failed to serialize report to JSON")?;
                    println!("{}", json);
                }
            }
        }
    }

    Ok(())
}
