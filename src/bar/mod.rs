//! Bar intensity analysis.
//!
//! This module provides:
//! - The single-pass bar profile scanner
//! - Helpers for pulling profiles out of grayscale image buffers

pub mod profile;
pub mod sample;

pub use profile::{
    BarProfile, CountScope, DEFAULT_TOLERANCE, ToleranceWindow, analyze, analyze_with_scope,
    calculate_bar_length_and_ratio,
};
pub use sample::{column_profile, dominant_bar_value, luma_from_rgba, measure_row, row_profile};
