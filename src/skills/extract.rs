use anyhow::Result;
use regex::Regex;

use super::OcrData;

/// Pattern for valid words: two or more ASCII letters on word boundaries.
const WORD_PATTERN: &str = r"\b[a-zA-Z]{2,}\b";

/// Leading words that OCR produces from icons and rules next to skill names.
pub const DEFAULT_BUGGED_TEXTS: [&str; 3] = ["ae", "eemeeeneeneenenmnen", "er"];

/// Extracts skill names from the section between two marker lines.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    word_regex: Regex,
    bugged_texts: Vec<String>,
}

impl SkillExtractor {
    pub fn new<I, S>(bugged_texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            word_regex: Regex::new(WORD_PATTERN)?,
            bugged_texts: bugged_texts.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the lowercase skills found strictly between the first line
    /// equal to `start_keyword` and the first line equal to `end_keyword`.
    ///
    /// Consecutive word-bearing lines are joined into one skill. A line with
    /// no valid words, or whose first word is a known OCR artefact, closes the
    /// current skill. Returns an empty list if either marker is missing or the
    /// start marker does not come first.
    pub fn extract(&self, data: &OcrData, start_keyword: &str, end_keyword: &str) -> Vec<String> {
        let Some((start, end)) = section_bounds(&data.text, start_keyword, end_keyword) else {
            return Vec::new();
        };

        let mut skills: Vec<String> = Vec::new();

        for line in &data.text[start + 1..end] {
            let words: Vec<&str> = self
                .word_regex
                .find_iter(line.trim())
                .map(|m| m.as_str())
                .collect();

            let current_open = skills.last().is_some_and(|s| !s.is_empty());

            match words.first() {
                Some(first) if !self.is_bugged(first) => {
                    let joined = words.join(" ");
                    match skills.last_mut() {
                        Some(last) if !last.is_empty() => {
                            last.push(' ');
                            last.push_str(&joined);
                        }
                        _ => skills.push(joined),
                    }
                }
                // Empty entry marks a break between skills
                _ if current_open => skills.push(String::new()),
                _ => {}
            }
        }

        skills
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_lowercase().trim().to_string())
            .collect()
    }

    fn is_bugged(&self, word: &str) -> bool {
        self.bugged_texts.iter().any(|b| b == word)
    }
}

/// Extracts skills using the default OCR artefact list.
pub fn create_skills_list(
    data: &OcrData,
    start_keyword: &str,
    end_keyword: &str,
) -> Result<Vec<String>> {
    let extractor = SkillExtractor::new(DEFAULT_BUGGED_TEXTS)?;
    Ok(extractor.extract(data, start_keyword, end_keyword))
}

/// Finds the first positions of both markers, if start precedes end.
fn section_bounds(lines: &[String], start_keyword: &str, end_keyword: &str) -> Option<(usize, usize)> {
    let start = lines.iter().position(|l| l == start_keyword)?;
    let end = lines.iter().position(|l| l == end_keyword)?;
    (start < end).then_some((start, end))
}
