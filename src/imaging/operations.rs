//! Cell rendering and whole-grid composition.
//!
//! These functions combine the layout calculations with the pixel work.
//! Rendering one cell is always the same three steps, in this order:
//!
//! 1. Resize the source to exactly the cell size (aspect ratio is not kept).
//! 2. Sharpen the *resized* cell, if the backend asks for it.
//! 3. Copy the cell onto the canvas at its offset, replacing what was there.
//!
//! [`compose_grid`] runs steps 1–2 for every image on the rayon pool. The
//! canvas is split into one horizontal band per grid row with
//! `par_chunks_mut`; each task owns its band outright, so the copies in step
//! 3 need no locking.

use super::calculations::{GridLayout, Placement, compute_layout};
use super::params::{BackendOptions, GridSpec, LayoutError};
use super::resampler::{ResampleError, Resampler, resize_exact};
use super::sharpen::sharpen;
use image::{DynamicImage, RgbaImage, imageops};
use rayon::prelude::*;
use thiserror::Error;

const CHANNELS: usize = 4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Resample(#[from] ResampleError),
}

/// Resize (and, for the sharpened backend, sharpen) one image to cell size.
pub fn prepare_cell(
    image: &DynamicImage,
    spec: &GridSpec,
    options: &BackendOptions,
) -> Result<RgbaImage, ResampleError> {
    let (w, h) = (spec.cell_width(), spec.cell_height());
    let rgba = image.to_rgba8();

    match options {
        BackendOptions::None => resize_exact(&rgba, w, h, Resampler::default()),
        BackendOptions::LegacyInterpolation(mode) => {
            Ok(imageops::resize(&rgba, w, h, mode.filter()))
        }
        BackendOptions::SharpenedResample {
            resampler,
            sharpening,
        } => {
            let mut cell = resize_exact(&rgba, w, h, *resampler)?;
            if let Some(sharpening) = sharpening {
                sharpen(&mut cell, *sharpening);
            }
            Ok(cell)
        }
    }
}

/// Render one image into `canvas` at `at`, overwriting that rectangle.
///
/// Pixels outside the cell rectangle are never touched. No alpha blending:
/// a transparent source pixel leaves a transparent canvas pixel.
pub fn render_cell(
    image: &DynamicImage,
    spec: &GridSpec,
    options: &BackendOptions,
    canvas: &mut RgbaImage,
    at: Placement,
) -> Result<(), ResampleError> {
    let cell = prepare_cell(image, spec, options)?;
    imageops::replace(canvas, &cell, i64::from(at.x), i64::from(at.y));
    Ok(())
}

/// Lay out `images` in load order and render them onto a fresh transparent
/// canvas. The first cell that fails to resize fails the whole grid.
pub fn compose_grid(
    images: &[DynamicImage],
    spec: &GridSpec,
    options: &BackendOptions,
) -> Result<(GridLayout, RgbaImage), RenderError> {
    let layout = compute_layout(images.len(), spec)?;
    let mut canvas = RgbaImage::new(layout.canvas_width, layout.canvas_height);

    let row_stride = layout.canvas_width as usize * CHANNELS;
    let band_len = row_stride * layout.cell_height as usize;

    let buffer: &mut [u8] = &mut canvas;
    buffer
        .par_chunks_mut(band_len)
        .enumerate()
        .try_for_each(|(row, band)| {
            for index in layout.row_indices(row as u32, images.len()) {
                let cell = prepare_cell(&images[index], spec, options)?;
                copy_into_band(band, row_stride, &cell, layout.placement(index).x);
            }
            Ok::<(), ResampleError>(())
        })?;

    Ok((layout, canvas))
}

/// Copy `cell` into a band (one grid row of canvas scanlines) at column `x`.
fn copy_into_band(band: &mut [u8], row_stride: usize, cell: &RgbaImage, x: u32) {
    let cell_stride = cell.width() as usize * CHANNELS;
    let x_offset = x as usize * CHANNELS;
    for (y, src) in cell.as_raw().chunks_exact(cell_stride).enumerate() {
        let start = y * row_stride + x_offset;
        band[start..start + cell_stride].copy_from_slice(src);
    }
}
