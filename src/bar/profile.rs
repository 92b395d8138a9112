//! Single-pass scanner for bar intensity profiles.
//!
//! A profile is a row (or column) of grayscale samples taken through a
//! rendered bar. The scan looks for the first sample inside the tolerance
//! window (bar start) and the first run of two white samples after it
//! (bar end), counting window matches along the way.

use serde::{Deserialize, Serialize};

/// Default half-width of the acceptance window around the bar value.
pub const DEFAULT_TOLERANCE: i64 = 10;

/// Intensity of pure white background.
pub const WHITE: i64 = 255;

/// Inclusive intensity range `[bar_value - tolerance, bar_value + tolerance]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToleranceWindow {
    pub low: i64,
    pub high: i64,
}

impl ToleranceWindow {
    pub fn new(bar_value: i64, tolerance: i64) -> Self {
        Self {
            low: bar_value.saturating_sub(tolerance),
            high: bar_value.saturating_add(tolerance),
        }
    }

    /// Returns true if `value` lies inside the window. A negative tolerance
    /// yields an empty window.
    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Which window matches contribute to `bar_value_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountScope {
    /// Every match in the scanned prefix of the sequence. When no white gap
    /// is found this includes the final sample, so the count can exceed the
    /// bar length by one.
    #[default]
    Sequence,
    /// Only matches inside the half-open span `[bar_start, bar_end)`.
    /// Keeps `ratio` within `[0, 1]`.
    BarSpan,
}

/// Result of scanning one profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BarProfile {
    /// Index of the first sample inside the tolerance window
    pub bar_start: Option<usize>,
    /// Index of the first white pair after the start, or the last index
    pub bar_end: Option<usize>,
    /// `bar_end - bar_start`, or 0 when no start was found
    pub bar_length: usize,
    /// Number of samples inside the tolerance window
    pub bar_value_count: usize,
    /// `bar_value_count / bar_length`, or 0.0 when the length is 0
    pub ratio: f64,
}

impl BarProfile {
    /// Returns `(bar_length, bar_value_count, ratio)`.
    pub fn as_tuple(&self) -> (usize, usize, f64) {
        (self.bar_length, self.bar_value_count, self.ratio)
    }

    /// True when no sample ever entered the tolerance window.
    pub fn is_empty(&self) -> bool {
        self.bar_start.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    SeekingStart,
    SeekingEnd { start: usize },
}

/// Measures bar length, matching-pixel count and their ratio.
///
/// Samples of any integer type that widens into `i64` are accepted; values
/// outside `[0, 255]` are simply never matched. The function is total: empty
/// input, no matches and zero-length bars all produce zeros.
pub fn calculate_bar_length_and_ratio<T>(
    pixels: &[T],
    bar_value: i64,
    tolerance: i64,
) -> BarProfile
where
    T: Copy + Into<i64>,
{
    analyze_with_scope(pixels, bar_value, tolerance, CountScope::Sequence)
}

/// Same as [`calculate_bar_length_and_ratio`] with [`DEFAULT_TOLERANCE`].
pub fn analyze<T>(pixels: &[T], bar_value: i64) -> BarProfile
where
    T: Copy + Into<i64>,
{
    calculate_bar_length_and_ratio(pixels, bar_value, DEFAULT_TOLERANCE)
}

/// Scans `pixels` with an explicit count scope.
pub fn analyze_with_scope<T>(
    pixels: &[T],
    bar_value: i64,
    tolerance: i64,
    scope: CountScope,
) -> BarProfile
where
    T: Copy + Into<i64>,
{
    let window = ToleranceWindow::new(bar_value, tolerance);
    let mut state = ScanState::SeekingStart;
    let mut white_gap_at = None;
    let mut bar_value_count = 0usize;

    for (i, &pixel) in pixels.iter().enumerate() {
        let value: i64 = pixel.into();
        let in_window = window.contains(value);

        if state == ScanState::SeekingStart && in_window {
            state = ScanState::SeekingEnd { start: i };
        }

        // The sample that opens the white gap is never counted.
        if let ScanState::SeekingEnd { .. } = state {
            if value == WHITE && is_white_at(pixels, i + 1) {
                white_gap_at = Some(i);
                break;
            }
        }

        if in_window {
            bar_value_count += 1;
        }
    }

    let ScanState::SeekingEnd { start } = state else {
        return BarProfile::default();
    };

    let bar_end = match white_gap_at {
        Some(end) => end,
        None => {
            let last = pixels.len() - 1;
            // The implicit boundary sample sits outside the half-open span.
            if scope == CountScope::BarSpan && window.contains(pixels[last].into()) {
                bar_value_count -= 1;
            }
            last
        }
    };

    let bar_length = bar_end - start;
    let ratio = if bar_length > 0 {
        bar_value_count as f64 / bar_length as f64
    } else {
        0.0
    };

    BarProfile {
        bar_start: Some(start),
        bar_end: Some(bar_end),
        bar_length,
        bar_value_count,
        ratio,
    }
}

fn is_white_at<T>(pixels: &[T], index: usize) -> bool
where
    T: Copy + Into<i64>,
{
    pixels.get(index).is_some_and(|&p| Into::<i64>::into(p) == WHITE)
}
