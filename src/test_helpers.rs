//! Shared test utilities for the folder-grid test suite.
//!
//! Synthetic images only: every fixture is generated on the fly into a
//! `TempDir`, so tests never depend on files checked into the repo.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_png(&tmp.path().join("a.png"), 8, 8, solid_rgba([255, 0, 0, 255]));
//! create_test_jpeg(&tmp.path().join("b.jpg"), 32, 16);
//! ```

use image::{ImageEncoder, Rgba, RgbImage, RgbaImage};
use std::path::Path;

/// Pixel function for a single flat colour.
pub fn solid_rgba(color: [u8; 4]) -> impl Fn(u32, u32) -> Rgba<u8> {
    move |_, _| Rgba(color)
}

/// Write an RGBA image to `path`; the format follows the extension
/// (`.png`, `.bmp`).
pub fn create_test_png(path: &Path, width: u32, height: u32, pixel: impl Fn(u32, u32) -> Rgba<u8>) {
    let img = RgbaImage::from_fn(width, height, pixel);
    img.save(path).unwrap();
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}
