//! Grid composition driver.
//!
//! Runs one compose invocation from validated config to a written PNG:
//!
//! ```text
//! validate config → check folders → resolve output name → scan
//!   → decode all → lay out → render cells → encode → write
//! ```
//!
//! ## All or nothing
//!
//! Every failure is terminal for the run and nothing is retried. A file that
//! matches by extension but fails to decode stops the whole run; it is not
//! skipped. The output file is only created once the canvas has been fully
//! rendered and encoded, so a failed run never leaves a partial grid behind.
//!
//! ## Parallel Processing
//!
//! Decoding and cell rendering run on the global [rayon](https://docs.rs/rayon)
//! pool. Decoding keeps load order (`collect` on an indexed parallel iterator),
//! so grid placement does not depend on thread timing.

use crate::config::{ConfigError, GridConfig};
use crate::imaging::{
    BackendOptions, CodecError, GridLayout, LayoutError, RenderError, ResampleError, compose_grid,
    load_image, save_png,
};
use crate::naming::{self, NamingError};
use crate::scan::{self, ScanError};
use image::DynamicImage;
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Directory does not exist: {0}")]
    InvalidDirectory(PathBuf),
    #[error("No images of a supported format found in {0}")]
    NoImagesFound(String),
    #[error("Decode failure: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("Invalid grid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    #[error("Render failure: {0}")]
    Render(#[from] ResampleError),
    #[error(transparent)]
    NamingExhausted(#[from] NamingError),
    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("Scan failed: {0}")]
    Scan(ScanError),
}

impl From<RenderError> for ComposeError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Layout(e) => ComposeError::InvalidLayout(e),
            RenderError::Resample(e) => ComposeError::Render(e),
        }
    }
}

impl From<ScanError> for ComposeError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingDirectory(path) => ComposeError::InvalidDirectory(path),
            other => ComposeError::Scan(other),
        }
    }
}

/// What a compose run needs besides the config.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    /// Input folders, searched recursively, in order.
    pub input_folders: Vec<PathBuf>,
    /// Existing directory the grid is written into.
    pub output_dir: PathBuf,
}

impl ComposeRequest {
    /// Build a request from a `;`-separated folder list.
    pub fn new(input: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_folders: scan::split_folder_list(input),
            output_dir: output_dir.into(),
        }
    }
}

/// Result of a successful compose run.
#[derive(Debug, Clone)]
pub struct ComposeSummary {
    pub output_path: PathBuf,
    pub image_count: usize,
    pub layout: GridLayout,
    pub backend: BackendOptions,
}

/// Compose every image found under the request's folders into one PNG.
pub fn compose(request: &ComposeRequest, config: &GridConfig) -> Result<ComposeSummary, ComposeError> {
    let spec = config.grid_spec()?;
    config.validate()?;
    let backend = config.backend.options();

    if request.input_folders.is_empty() {
        return Err(ComposeError::NoImagesFound(String::new()));
    }
    if let Some(missing) = request.input_folders.iter().find(|f| !f.is_dir()) {
        return Err(ComposeError::InvalidDirectory(missing.clone()));
    }
    if !request.output_dir.is_dir() {
        return Err(ComposeError::InvalidDirectory(request.output_dir.clone()));
    }

    let output_path = naming::resolve_output_path(&request.output_dir, &config.output_base_name())?;
    debug!(path = %output_path.display(), "resolved output path");

    let paths = scan::load_image_set(&request.input_folders, config.sort_paths)?;
    if paths.is_empty() {
        return Err(ComposeError::NoImagesFound(folder_list(&request.input_folders)));
    }
    info!(count = paths.len(), "found images");

    let images = decode_all(&paths)?;

    let (layout, canvas) = compose_grid(&images, &spec, &backend)?;
    info!(
        columns = layout.columns,
        rows = layout.rows,
        width = layout.canvas_width,
        height = layout.canvas_height,
        "rendered grid"
    );

    save_png(&canvas, &output_path).map_err(|source| ComposeError::Encode {
        path: output_path.clone(),
        source,
    })?;
    info!(path = %output_path.display(), "wrote grid");

    Ok(ComposeSummary {
        output_path,
        image_count: images.len(),
        layout,
        backend,
    })
}

/// Decode every path in order. The first failure aborts the run.
fn decode_all(paths: &[PathBuf]) -> Result<Vec<DynamicImage>, ComposeError> {
    paths
        .par_iter()
        .map(|path| {
            debug!(path = %path.display(), "decoding");
            load_image(path).map_err(|source| ComposeError::Decode {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

fn folder_list(folders: &[PathBuf]) -> String {
    folders
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(";")
}
