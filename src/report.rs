//! Combined report over both signals, with JSON export.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::bar::{BarProfile, analyze_with_scope, dominant_bar_value};
use crate::config::SignalsConfig;
use crate::input::{ProfileRow, ProfileSet};
use crate::skills::{OcrData, SkillExtractor};

/// Measurement for one profile row.
#[derive(Debug, Clone, Serialize)]
pub struct BarReport {
    pub label: String,
    /// Bar intensity used for the scan (`None` if none could be derived)
    pub bar_value: Option<i64>,
    pub profile: BarProfile,
}

/// Everything extracted from one set of inputs.
#[derive(Debug, Clone, Serialize)]
pub struct SignalsReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub skills: Vec<String>,
    pub bars: Vec<BarReport>,
}

/// Runs the skills extractor (if OCR data is given) and the bar analyzer
/// over every profile.
pub fn build_report(
    config: &SignalsConfig,
    ocr: Option<&OcrData>,
    profiles: &ProfileSet,
) -> Result<SignalsReport> {
    let skills = match ocr {
        Some(data) => {
            let extractor = SkillExtractor::new(config.bugged_texts.iter().cloned())?;
            extractor.extract(data, &config.start_keyword, &config.end_keyword)
        }
        None => Vec::new(),
    };

    crate::log(&format!(
        "Extracted {} skills between '{}' and '{}'",
        skills.len(),
        config.start_keyword,
        config.end_keyword
    ));

    let bars: Vec<BarReport> = profiles
        .rows
        .iter()
        .map(|row| measure_profile(config, row))
        .collect();

    crate::log(&format!("Measured {} bar profiles", bars.len()));

    Ok(SignalsReport {
        generated_at: Local::now().to_rfc3339(),
        skills,
        bars,
    })
}

/// Scans one row, deriving the bar value when the row leaves it blank.
pub fn measure_profile(config: &SignalsConfig, row: &ProfileRow) -> BarReport {
    let bar_value = row.bar_value.or_else(|| derive_bar_value(&row.pixels));

    let profile = match bar_value {
        Some(value) => analyze_with_scope(&row.pixels, value, config.tolerance, config.count_scope),
        None => {
            crate::log(&format!("No bar value for '{}': profile is all white", row.label));
            BarProfile::default()
        }
    };

    BarReport {
        label: row.label.clone(),
        bar_value,
        profile,
    }
}

/// Dominant non-white value among the in-range samples.
fn derive_bar_value(pixels: &[i64]) -> Option<i64> {
    let samples: Vec<u8> = pixels
        .iter()
        .filter_map(|&p| u8::try_from(p).ok())
        .collect();
    dominant_bar_value(&samples).map(i64::from)
}

/// Export the report to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(report: &SignalsReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::CountScope;
    use tempfile::tempdir;

    fn row(label: &str, bar_value: Option<i64>, pixels: &[i64]) -> ProfileRow {
        ProfileRow {
            label: label.to_string(),
            bar_value,
            pixels: pixels.to_vec(),
        }
    }

    fn sample_profiles() -> ProfileSet {
        ProfileSet {
            rows: vec![
                row("python", Some(165), &[200, 165, 165, 255, 255, 200]),
                row("rust", None, &[255, 120, 120, 121, 255, 255]),
                row("blank", None, &[255, 255, 255]),
            ],
        }
    }

    #[test]
    fn test_build_report() {
        let ocr = OcrData {
            text: ["SKILLS", "Rust", "", "Python", "CERTIFICATES"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let report = build_report(&SignalsConfig::default(), Some(&ocr), &sample_profiles()).unwrap();

        assert_eq!(report.skills, vec!["rust", "python"]);
        assert_eq!(report.bars.len(), 3);
        assert_eq!(report.bars[0].profile.as_tuple(), (2, 2, 1.0));
        assert_eq!(report.bars[1].bar_value, Some(120));
        assert_eq!(report.bars[1].profile.as_tuple(), (3, 3, 1.0));
        assert_eq!(report.bars[2].bar_value, None);
        assert!(report.bars[2].profile.is_empty());
    }

    #[test]
    fn test_report_without_ocr() {
        let report = build_report(&SignalsConfig::default(), None, &ProfileSet::default()).unwrap();
        assert!(report.skills.is_empty());
        assert!(report.bars.is_empty());
    }

    #[test]
    fn test_measure_profile_respects_count_scope() {
        let config = SignalsConfig {
            count_scope: CountScope::BarSpan,
            ..SignalsConfig::default()
        };
        let report = measure_profile(&config, &row("go", Some(165), &[165, 165, 165]));
        assert_eq!(report.profile.as_tuple(), (2, 2, 1.0));
    }

    #[test]
    fn test_derive_ignores_out_of_range_samples() {
        let report = measure_profile(
            &SignalsConfig::default(),
            &row("noisy", None, &[-3, 400, 400, 90, 255, 255]),
        );
        assert_eq!(report.bar_value, Some(90));
    }

    #[test]
    fn test_export_to_json() {
        let report = build_report(&SignalsConfig::default(), None, &sample_profiles()).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        export_to_json(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"label\": \"python\""));
        assert!(content.contains("\"bar_length\": 2"));
        assert!(content.contains("\"bar_value\": null"));
    }
}
