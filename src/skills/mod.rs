//! Skills section extraction from OCR text-layout output.
//!
//! This module provides:
//! - The OCR document type (`{"text": [...]}`)
//! - Conversion from Tesseract TSV output
//! - The skills extractor

pub mod extract;
pub mod tsv;

pub use extract::{DEFAULT_BUGGED_TEXTS, SkillExtractor, create_skills_list};
pub use tsv::parse_tsv_text;

use serde::{Deserialize, Serialize};

/// OCR output for one page.
///
/// `text` holds one entry per layout box, in reading order. Non-word boxes
/// (blocks, paragraphs, lines) carry an empty string, which is what separates
/// one skill from the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrData {
    pub text: Vec<String>,
}
