//! Blank-page heuristic over rasterized page images.

use image::DynamicImage;

/// Grayscale intensity at or above which a pixel counts as white.
pub const WHITE_THRESHOLD: u8 = 240;

/// White-pixel fraction a page must strictly exceed to be considered blank.
pub const BLANK_RATIO: f64 = 0.97;

/// Fraction of pixels at or above [`WHITE_THRESHOLD`], over all pixels.
///
/// A zero-pixel image has a ratio of 0.0.
pub fn white_ratio(image: &DynamicImage) -> f64 {
    let gray = image.to_luma8();
    let total = gray.pixels().len();
    if total == 0 {
        return 0.0;
    }

    let white = gray
        .pixels()
        .filter(|pixel| pixel.0[0] >= WHITE_THRESHOLD)
        .count();

    white as f64 / total as f64
}

/// Classify a rendered page as blank.
///
/// The ratio must strictly exceed [`BLANK_RATIO`]: a page at exactly 97%
/// white is kept. This is a heuristic with an accepted tolerance, not an
/// exact emptiness test.
pub fn is_blank_image(image: &DynamicImage) -> bool {
    white_ratio(image) > BLANK_RATIO
}
