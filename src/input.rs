//! Input file readers.
//!
//! Loads OCR documents (JSON or Tesseract TSV) and pixel profile CSV files.

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::skills::{OcrData, parse_tsv_text};

impl OcrData {
    /// Load an OCR document from a JSON file of the form `{"text": [...]}`.
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read OCR file: {}", path.display()))?;
        serde_json::from_str(&content)
            .context(format!("Failed to parse OCR JSON: {}", path.display()))
    }

    /// Load an OCR document from Tesseract TSV output.
    pub fn from_tsv(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read OCR file: {}", path.display()))?;
        Ok(parse_tsv_text(&content))
    }

    /// Load an OCR document, choosing the format by file extension.
    /// `.tsv` is read as Tesseract output, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => Self::from_tsv(path),
            _ => Self::from_json(path),
        }
    }
}

/// One pixel profile from the CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    /// Free-form label (e.g. the skill the bar belongs to)
    pub label: String,
    /// Bar intensity, or `None` to derive it from the samples
    pub bar_value: Option<i64>,
    /// Grayscale samples along the bar
    pub pixels: Vec<i64>,
}

/// All profiles loaded from CSV.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    pub rows: Vec<ProfileRow>,
}

impl ProfileSet {
    /// Load profiles from a CSV file.
    ///
    /// CSV format expected:
    /// label,bar_value,pixels
    ///
    /// `pixels` is a whitespace-separated list of integers. `bar_value` may be
    /// left blank. Skips the header row and any malformed rows (with warning log).
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open CSV file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from CSV")?;

            // Skip header row
            if line_num == 0 {
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            match Self::parse_line(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    crate::log(&format!(
                        "Warning: Skipping malformed CSV row {}: {}",
                        line_num + 1,
                        e
                    ));
                }
            }
        }

        Ok(ProfileSet { rows })
    }

    /// Parse a single CSV line into a ProfileRow.
    fn parse_line(line: &str) -> Result<ProfileRow> {
        let parts: Vec<&str> = line.splitn(3, ',').collect();

        if parts.len() < 3 {
            return Err(anyhow!("Expected 3 columns, got {}", parts.len()));
        }

        let label = parts[0].trim().to_string();

        let bar_value = match parts[1].trim() {
            "" => None,
            value => Some(value.parse::<i64>().context("Invalid bar value")?),
        };

        let pixels = parts[2]
            .split_whitespace()
            .map(|p| {
                p.parse::<i64>()
                    .map_err(|e| anyhow!("Invalid pixel '{}': {}", p, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ProfileRow {
            label,
            bar_value,
            pixels,
        })
    }

    /// Number of profiles in the set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_valid_csv() {
        let csv_content = "label,bar_value,pixels
python,165,200 165 165 255 255 200
rust,,120 120 255 255";

        let file = create_test_file(".csv", csv_content);
        let set = ProfileSet::from_csv(file.path()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0].label, "python");
        assert_eq!(set.rows[0].bar_value, Some(165));
        assert_eq!(set.rows[0].pixels, vec![200, 165, 165, 255, 255, 200]);
        assert_eq!(set.rows[1].bar_value, None);
    }

    #[test]
    fn test_skip_malformed_and_empty_rows() {
        let csv_content = "label,bar_value,pixels
good,100,100 100

no_pixels_column
bad_value,abc,1 2 3
bad_pixel,100,1 x 3
empty_profile,100,";

        let file = create_test_file(".csv", csv_content);
        let set = ProfileSet::from_csv(file.path()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0].label, "good");
        assert_eq!(set.rows[1].label, "empty_profile");
        assert!(set.rows[1].pixels.is_empty());
    }

    #[test]
    fn test_header_only() {
        let file = create_test_file(".csv", "label,bar_value,pixels\n");
        assert!(ProfileSet::from_csv(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_csv_is_error() {
        assert!(ProfileSet::from_csv(Path::new("/nonexistent/profiles.csv")).is_err());
    }

    #[test]
    fn test_ocr_from_json_ignores_extra_keys() {
        let file = create_test_file(
            ".json",
            r#"{"text": ["SKILLS", "Rust", "CERTIFICATES"], "conf": [-1, 95, 90]}"#,
        );
        let data = OcrData::from_file(file.path()).unwrap();
        assert_eq!(data.text, vec!["SKILLS", "Rust", "CERTIFICATES"]);
    }

    #[test]
    fn test_ocr_from_tsv_by_extension() {
        let file = create_test_file(
            ".TSV",
            "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
             5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t96\tSKILLS\n",
        );
        let data = OcrData::from_file(file.path()).unwrap();
        assert_eq!(data.text, vec!["SKILLS"]);
    }

    #[test]
    fn test_ocr_invalid_json_is_error() {
        let file = create_test_file(".json", "[1, 2]");
        assert!(OcrData::from_json(file.path()).is_err());
    }
}
