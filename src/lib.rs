//! # folder-grid
//!
//! Two batch tools for folders of sprites and other small raster images:
//!
//! - **compose** lays every image found under one or more folders into a
//!   single grid, resizing each to a fixed cell, optionally sharpening it, and
//!   writes one PNG.
//! - **prune** deletes images whose corner pixels are fully transparent, a
//!   cheap test for sprites that were cropped badly.
//!
//! # Compose Pipeline
//!
//! ```text
//! scan      folders  →  paths           (recursive, bmp/png/jpg/jpeg)
//! decode    paths    →  images          (all or nothing)
//! layout    count    →  columns, rows   (pure integer math)
//! render    images   →  canvas          (resize → sharpen → copy, per cell)
//! write     canvas   →  Name (N).png    (first free name, at most 21 tried)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Extension filter and image discovery |
//! | [`imaging`] | Grid geometry, resamplers, sharpening, cell rendering, codecs |
//! | [`naming`] | Collision-free output filenames |
//! | [`compose`] | Compose driver: config → PNG |
//! | [`prune`] | Corner-transparency test and per-file deletion |
//! | [`config`] | Layered configuration: defaults → TOML file → CLI flags |
//! | [`output`] | CLI output formatting |
//! | [`logger`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Canvas Width Is an Input
//!
//! The canvas is exactly `image_width` wide. Columns are
//! `image_width / cell_width` (floor), rows are the ceiling of
//! `count / columns`. Leftover width on the right and unfilled cells in the
//! last row stay transparent. A cell wider than the canvas is a configuration
//! error, never clamped.
//!
//! ## Resize, Then Sharpen, Then Copy
//!
//! Every cell is resized to exactly the cell size (no letterboxing),
//! sharpened after the resize, and copied onto the canvas with no alpha
//! blending. The canvas itself is never filtered.
//!
//! ## Disjoint Bands Instead of Locks
//!
//! Each grid row maps to a contiguous band of canvas scanlines. Rendering
//! hands each band to its own rayon task with `par_chunks_mut`, so cells are
//! processed in parallel without any shared mutable state.
//!
//! ## Failure Policy
//!
//! Compose is all or nothing: any missing folder, undecodable file or bad
//! layout ends the run before an output file exists. Prune is per file: a
//! broken file is reported and skipped.

pub mod compose;
pub mod config;
pub mod imaging;
pub mod logger;
pub mod naming;
pub mod output;
pub mod prune;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
