//! Parameter types for grid composition.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`config`](crate::config) layer (which decides what
//! the user asked for) and the [`operations`](super::operations) module
//! (which does the pixel work).
//!
//! ## Types
//!
//! - [`GridSpec`]: Canvas width and cell size. Validated on construction.
//! - [`Sharpening`]: Gaussian sharpen parameters (sigma + radius).
//! - [`InterpolationMode`]: Filter selector for the legacy backend.
//! - [`BackendOptions`]: Which rendering backend to use, with its options.

use super::resampler::Resampler;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Grid dimensions must be non-zero (width {image_width}, cell {cell_width}x{cell_height})")]
    ZeroDimension {
        image_width: u32,
        cell_width: u32,
        cell_height: u32,
    },
    #[error("Cell width {cell_width} exceeds image width {image_width}: no column fits")]
    NoColumns { image_width: u32, cell_width: u32 },
    #[error("Cannot lay out an empty image set")]
    NoImages,
    #[error("Canvas {width}px wide with {rows} rows of {cell_height}px is too large to allocate")]
    CanvasTooLarge {
        width: u32,
        rows: u32,
        cell_height: u32,
    },
}

/// Canvas width and cell size for a grid.
///
/// `image_width` is the final canvas width. It is a hard input: the canvas is
/// never narrowed to `columns * cell_width`, so a strip on the right may stay
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    image_width: u32,
    cell_width: u32,
    cell_height: u32,
}

impl GridSpec {
    /// Build a spec, refusing any size that would produce zero columns.
    pub fn new(image_width: u32, cell_width: u32, cell_height: u32) -> Result<Self, LayoutError> {
        if image_width == 0 || cell_width == 0 || cell_height == 0 {
            return Err(LayoutError::ZeroDimension {
                image_width,
                cell_width,
                cell_height,
            });
        }
        if cell_width > image_width {
            return Err(LayoutError::NoColumns {
                image_width,
                cell_width,
            });
        }
        Ok(Self {
            image_width,
            cell_width,
            cell_height,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }
}

/// Gaussian sharpen parameters.
///
/// - `sigma`: standard deviation of the Gaussian (higher = broader sharpening)
/// - `radius`: half-width of the kernel; the kernel has `2 * radius + 1` taps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub sigma: f32,
    pub radius: u32,
}

impl Default for Sharpening {
    fn default() -> Self {
        Self {
            sigma: 4.5,
            radius: 2,
        }
    }
}

/// Interpolation quality for the legacy backend.
///
/// Numbered the way the old desktop tool numbered them, so existing
/// invocations (`--interpolation 7`) keep their meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    Default,
    Low,
    High,
    Bilinear,
    Bicubic,
    NearestNeighbor,
    HighQualityBilinear,
    #[default]
    HighQualityBicubic,
}

impl InterpolationMode {
    /// Look up a mode by number. Unknown numbers keep the default
    /// ([`InterpolationMode::HighQualityBicubic`]).
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => Self::Default,
            1 => Self::Low,
            2 => Self::High,
            3 => Self::Bilinear,
            4 => Self::Bicubic,
            5 => Self::NearestNeighbor,
            6 => Self::HighQualityBilinear,
            _ => Self::HighQualityBicubic,
        }
    }

    /// The `image` crate filter that stands in for this mode.
    pub fn filter(self) -> FilterType {
        match self {
            Self::Low | Self::NearestNeighbor => FilterType::Nearest,
            Self::Default | Self::Bilinear | Self::HighQualityBilinear => FilterType::Triangle,
            Self::High | Self::Bicubic => FilterType::CatmullRom,
            Self::HighQualityBicubic => FilterType::Lanczos3,
        }
    }
}

/// Rendering backend plus the options only that backend understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendOptions {
    /// Plain resize with the default resampler, no sharpening.
    None,
    /// Resize through an `image` crate filter, no sharpening.
    LegacyInterpolation(InterpolationMode),
    /// Resize with a registry resampler, then optionally sharpen the cell.
    SharpenedResample {
        resampler: Resampler,
        sharpening: Option<Sharpening>,
    },
}
