//! Resampler registry and exact-size resize.
//!
//! Each [`Resampler`] is a 1-D reconstruction kernel with a fixed support
//! radius. Resizing is delegated to `fast_image_resize`: the four kernels it
//! ships (box, bilinear, Catmull-Rom, Mitchell) are used as is, nearest
//! neighbour uses its sampling mode, and the rest are handed over as custom
//! convolution filters built from the functions below.
//!
//! The numeric ids are stable and shared with the command line:
//!
//! | Id | Resampler | Id | Resampler |
//! |---|---|---|---|
//! | 1 | Bicubic (default) | 8 | Mitchell-Netravali |
//! | 2 | Box | 9 | Nearest neighbor |
//! | 3 | Catmull-Rom | 10 | Robidoux |
//! | 4 | Hermite | 11 | Robidoux sharp |
//! | 5 | Lanczos 2 | 12 | Spline |
//! | 6 | Lanczos 5 | 13 | Triangle |
//! | 7 | Lanczos 8 | 14 | Welch |

use fast_image_resize::images::Image;
use fast_image_resize::{Filter, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbaImage;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("Resampler {name} has an invalid kernel: {reason}")]
    Filter { name: &'static str, reason: String },
    #[error("Invalid pixel buffer: {0}")]
    Buffer(#[from] fast_image_resize::ImageBufferError),
    #[error("Resize failed: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),
    #[error("Resized buffer does not match {width}x{height}")]
    Size { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Resampler {
    #[default]
    Bicubic,
    Box,
    CatmullRom,
    Hermite,
    Lanczos2,
    Lanczos5,
    Lanczos8,
    MitchellNetravali,
    NearestNeighbor,
    Robidoux,
    RobidouxSharp,
    Spline,
    Triangle,
    Welch,
}

/// Every resampler in id order (index 0 is id 1).
pub const ALL_RESAMPLERS: [Resampler; 14] = [
    Resampler::Bicubic,
    Resampler::Box,
    Resampler::CatmullRom,
    Resampler::Hermite,
    Resampler::Lanczos2,
    Resampler::Lanczos5,
    Resampler::Lanczos8,
    Resampler::MitchellNetravali,
    Resampler::NearestNeighbor,
    Resampler::Robidoux,
    Resampler::RobidouxSharp,
    Resampler::Spline,
    Resampler::Triangle,
    Resampler::Welch,
];

/// Resolve a resampler id. Ids outside `1..=14` fall back to
/// [`Resampler::Bicubic`], the same as id 1; this never fails.
pub fn resolve_resampler(id: i64) -> Resampler {
    usize::try_from(id)
        .ok()
        .and_then(|id| id.checked_sub(1))
        .and_then(|idx| ALL_RESAMPLERS.get(idx).copied())
        .unwrap_or_default()
}

impl Resampler {
    pub fn id(self) -> u8 {
        ALL_RESAMPLERS
            .iter()
            .position(|&r| r == self)
            .map(|idx| idx as u8 + 1)
            .unwrap_or(1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bicubic => "bicubic",
            Self::Box => "box",
            Self::CatmullRom => "catmull-rom",
            Self::Hermite => "hermite",
            Self::Lanczos2 => "lanczos2",
            Self::Lanczos5 => "lanczos5",
            Self::Lanczos8 => "lanczos8",
            Self::MitchellNetravali => "mitchell-netravali",
            Self::NearestNeighbor => "nearest-neighbor",
            Self::Robidoux => "robidoux",
            Self::RobidouxSharp => "robidoux-sharp",
            Self::Spline => "spline",
            Self::Triangle => "triangle",
            Self::Welch => "welch",
        }
    }

    /// Kernel support radius in source pixels (at scale 1).
    pub fn radius(self) -> f64 {
        match self {
            Self::Box => 0.5,
            Self::NearestNeighbor | Self::Triangle => 1.0,
            Self::Bicubic
            | Self::CatmullRom
            | Self::Hermite
            | Self::MitchellNetravali
            | Self::Robidoux
            | Self::RobidouxSharp
            | Self::Spline
            | Self::Lanczos2 => 2.0,
            Self::Welch => 3.0,
            Self::Lanczos5 => 5.0,
            Self::Lanczos8 => 8.0,
        }
    }

    /// The kernel as a plain function of the distance from the sample centre.
    pub fn kernel(self) -> fn(f64) -> f64 {
        match self {
            Self::Bicubic => bicubic,
            Self::Box => box_kernel,
            Self::CatmullRom => catmull_rom,
            Self::Hermite => hermite,
            Self::Lanczos2 => lanczos2,
            Self::Lanczos5 => lanczos5,
            Self::Lanczos8 => lanczos8,
            Self::MitchellNetravali => mitchell,
            Self::NearestNeighbor => nearest,
            Self::Robidoux => robidoux,
            Self::RobidouxSharp => robidoux_sharp,
            Self::Spline => spline,
            Self::Triangle => triangle,
            Self::Welch => welch,
        }
    }

    /// How `fast_image_resize` should run this resampler.
    fn algorithm(self) -> Result<ResizeAlg, ResampleError> {
        let builtin = match self {
            Self::NearestNeighbor => return Ok(ResizeAlg::Nearest),
            Self::Box => Some(FilterType::Box),
            Self::Triangle => Some(FilterType::Bilinear),
            Self::CatmullRom => Some(FilterType::CatmullRom),
            Self::MitchellNetravali => Some(FilterType::Mitchell),
            _ => None,
        };
        let filter = match builtin {
            Some(filter) => filter,
            None => {
                let custom = Filter::new(self.name(), self.kernel(), self.radius()).map_err(
                    |e| ResampleError::Filter {
                        name: self.name(),
                        reason: format!("{e:?}"),
                    },
                )?;
                FilterType::Custom(custom)
            }
        };
        Ok(ResizeAlg::Convolution(filter))
    }
}

fn sinc(x: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn lanczos(x: f64, lobes: f64) -> f64 {
    if x.abs() < lobes {
        sinc(x) * sinc(x / lobes)
    } else {
        0.0
    }
}

/// Keys cubic convolution with free parameter `a`.
fn keys_cubic(x: f64, a: f64) -> f64 {
    let x = x.abs();
    if x <= 1.0 {
        ((a + 2.0) * x - (a + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((a * x - 5.0 * a) * x + 8.0 * a) * x - 4.0 * a
    } else {
        0.0
    }
}

/// Mitchell-Netravali family cubic with parameters `b`, `c`.
fn bc_cubic(x: f64, b: f64, c: f64) -> f64 {
    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

fn bicubic(x: f64) -> f64 {
    keys_cubic(x, -0.5)
}

fn box_kernel(x: f64) -> f64 {
    if x > -0.5 && x <= 0.5 { 1.0 } else { 0.0 }
}

fn catmull_rom(x: f64) -> f64 {
    bc_cubic(x, 0.0, 0.5)
}

fn hermite(x: f64) -> f64 {
    bc_cubic(x, 0.0, 0.0)
}

fn lanczos2(x: f64) -> f64 {
    lanczos(x, 2.0)
}

fn lanczos5(x: f64) -> f64 {
    lanczos(x, 5.0)
}

fn lanczos8(x: f64) -> f64 {
    lanczos(x, 8.0)
}

fn mitchell(x: f64) -> f64 {
    bc_cubic(x, 1.0 / 3.0, 1.0 / 3.0)
}

fn nearest(x: f64) -> f64 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

fn robidoux(x: f64) -> f64 {
    bc_cubic(x, 0.378_215_75, 0.310_892_12)
}

fn robidoux_sharp(x: f64) -> f64 {
    bc_cubic(x, 0.262_014_5, 0.368_992_75)
}

fn spline(x: f64) -> f64 {
    bc_cubic(x, 1.0, 0.0)
}

fn triangle(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

fn welch(x: f64) -> f64 {
    if x.abs() < 3.0 {
        sinc(x) * (1.0 - x * x / 9.0)
    } else {
        0.0
    }
}

/// Resize `source` to exactly `width` x `height`. Aspect ratio is not kept.
pub fn resize_exact(
    source: &RgbaImage,
    width: u32,
    height: u32,
    resampler: Resampler,
) -> Result<RgbaImage, ResampleError> {
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return Ok(RgbaImage::new(width, height));
    }
    if (src_w, src_h) == (width, height) {
        return Ok(source.clone());
    }

    let src = Image::from_vec_u8(src_w, src_h, source.as_raw().clone(), PixelType::U8x4)?;
    let mut dst = Image::new(width, height, PixelType::U8x4);
    let options = ResizeOptions::new().resize_alg(resampler.algorithm()?);
    Resizer::new().resize(&src, &mut dst, &options)?;

    RgbaImage::from_raw(width, height, dst.into_vec()).ok_or(ResampleError::Size { width, height })
}
