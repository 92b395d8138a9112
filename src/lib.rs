//! Resume Signals
//!
//! Extracts two signals that feed resume screening: the skills listed in a
//! page's OCR text, and the fill level of skill bars measured from grayscale
//! intensity profiles.

pub mod bar;
pub mod config;
pub mod input;
pub mod paths;
pub mod report;
pub mod skills;

pub use bar::{BarProfile, CountScope, calculate_bar_length_and_ratio};
pub use config::SignalsConfig;
pub use skills::{OcrData, create_skills_list};

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to both stderr and log file with timestamp.
///
/// Stdout is left to command output. The file write is skipped silently if
/// the logs directory doesn't exist.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::get_log_file())
    {
        let _ = file.write_all(line.as_bytes());
    }
}
