//! Image processing in pure Rust, built on `image`, `imageproc` and
//! `fast_image_resize`.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (BMP, PNG, JPEG) |
//! | **Resize** | `fast_image_resize` with the kernels in [`resampler`], or `image::imageops::resize` for the legacy backend |
//! | **Sharpen** | `imageproc::filter::separable_filter_equal` with the kernel from [`sharpen`] |
//! | **Composite** | row bands via `rayon::par_chunks_mut`, `imageops::replace` for single cells |
//! | **Encode** | PNG via `DynamicImage::write_to` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for grid geometry (unit testable)
//! - **Parameters**: Data structures describing what to render
//! - **Resampler / Sharpen**: The pixel kernels
//! - **Operations**: Cell rendering and grid composition
//! - **Codec**: Load from and save to disk

mod calculations;
pub mod codec;
pub mod operations;
mod params;
pub mod resampler;
pub mod sharpen;

pub use calculations::{GridLayout, Placement, ceil_div, compute_layout};
pub use codec::{CodecError, load_image, save_png};
pub use operations::{RenderError, compose_grid, prepare_cell, render_cell};
pub use params::{BackendOptions, GridSpec, InterpolationMode, LayoutError, Sharpening};
pub use resampler::{ResampleError, Resampler, resolve_resampler};
