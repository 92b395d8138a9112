//! Sampling intensity profiles out of in-memory grayscale images.

use image::{GrayImage, Luma, RgbaImage};
use std::collections::HashMap;

use super::profile::{BarProfile, CountScope, analyze_with_scope};

/// Converts an RGBA buffer to grayscale.
///
/// Uses the ITU-R BT.601 luma formula: Y = 0.299*R + 0.587*G + 0.114*B,
/// rounded to the nearest integer. Alpha is ignored.
pub fn luma_from_rgba(img: &RgbaImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;
        let luminance = 0.299 * r + 0.587 * g + 0.114 * b;
        output.put_pixel(x, y, Luma([luminance.round().min(255.0) as u8]));
    }

    output
}

/// Returns the samples of row `y`, or `None` if the row is out of bounds.
pub fn row_profile(img: &GrayImage, y: u32) -> Option<Vec<u8>> {
    if y >= img.height() {
        return None;
    }
    Some((0..img.width()).map(|x| img.get_pixel(x, y)[0]).collect())
}

/// Returns the samples of column `x`, or `None` if the column is out of bounds.
pub fn column_profile(img: &GrayImage, x: u32) -> Option<Vec<u8>> {
    if x >= img.width() {
        return None;
    }
    Some((0..img.height()).map(|y| img.get_pixel(x, y)[0]).collect())
}

/// Most frequent non-white intensity in the profile.
/// If there's a tie, returns the smallest value.
pub fn dominant_bar_value(pixels: &[u8]) -> Option<u8> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for &p in pixels.iter().filter(|&&p| p != u8::MAX) {
        *counts.entry(p).or_insert(0) += 1;
    }

    let max_count = counts.values().max().copied()?;

    counts
        .into_iter()
        .filter(|&(_, count)| count == max_count)
        .map(|(value, _)| value)
        .min()
}

/// Measures the bar crossing row `y`, using the row's dominant non-white
/// intensity as the bar value.
///
/// Returns `None` if the row is out of bounds or entirely white.
pub fn measure_row(
    img: &GrayImage,
    y: u32,
    tolerance: i64,
    scope: CountScope,
) -> Option<(u8, BarProfile)> {
    let pixels = row_profile(img, y)?;
    let bar_value = dominant_bar_value(&pixels)?;
    let profile = analyze_with_scope(&pixels, bar_value as i64, tolerance, scope);
    Some((bar_value, profile))
}
