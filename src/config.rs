//! Grid configuration.
//!
//! Settings are layered, lowest priority first:
//!
//! ```text
//! stock defaults  →  --config grid.toml  →  command-line flags
//! ```
//!
//! The TOML file is sparse: override just the keys you want. Unknown keys
//! are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! image_width = 520          # Canvas width in pixels
//! cell_width = 26            # Width of one grid cell
//! cell_height = 26           # Height of one grid cell
//! output_file = "OutputGrid" # Base name; ".png" and " (N)" are added
//! sort_paths = false         # Sort inputs by path before layout
//!
//! [backend]
//! kind = "sharpened"         # "sharpened", "legacy" or "plain"
//! resampler_id = 1           # 1-14, unknown ids use bicubic (sharpened only)
//! sigma = 4.5                # Gaussian sharpen sigma (sharpened only)
//! radius = 2                 # Gaussian sharpen radius (sharpened only)
//! sharpen = true             # Skip sharpening when false (sharpened only)
//! interpolation_mode = 7     # 0-7, see InterpolationMode (legacy only)
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```

use crate::imaging::{
    BackendOptions, GridSpec, InterpolationMode, LayoutError, Sharpening, resolve_resampler,
};
use crate::naming::base_name_of;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid grid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration for a compose run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Canvas width in pixels. The canvas is never narrower or wider.
    pub image_width: u32,
    /// Width of one cell. Must not exceed `image_width`.
    pub cell_width: u32,
    /// Height of one cell.
    pub cell_height: u32,
    /// Output base name. Any extension is dropped; output is always PNG.
    pub output_file: String,
    /// Sort collected paths before layout instead of using directory order.
    pub sort_paths: bool,
    /// Rendering backend and its options.
    pub backend: BackendConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            image_width: 520,
            cell_width: 26,
            cell_height: 26,
            output_file: "OutputGrid".to_string(),
            sort_paths: false,
            backend: BackendConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// Which rendering backend a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Registry resampler, then Gaussian sharpen.
    #[default]
    Sharpened,
    /// `image` crate filter chosen by interpolation mode, no sharpening.
    Legacy,
    /// Default resampler, no sharpening.
    Plain,
}

/// Backend settings. Each backend reads only the keys it understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub resampler_id: i64,
    pub sigma: f32,
    pub radius: u32,
    pub sharpen: bool,
    pub interpolation_mode: i64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let sharpening = Sharpening::default();
        Self {
            kind: BackendKind::default(),
            resampler_id: 1,
            sigma: sharpening.sigma,
            radius: sharpening.radius,
            sharpen: true,
            interpolation_mode: 7,
        }
    }
}

impl BackendConfig {
    /// Resolve the backend into renderer options. Unknown resampler ids and
    /// interpolation modes fall back to their defaults here.
    pub fn options(&self) -> BackendOptions {
        match self.kind {
            BackendKind::Plain => BackendOptions::None,
            BackendKind::Legacy => {
                BackendOptions::LegacyInterpolation(InterpolationMode::from_id(
                    self.interpolation_mode,
                ))
            }
            BackendKind::Sharpened => BackendOptions::SharpenedResample {
                resampler: resolve_resampler(self.resampler_id),
                sharpening: self.sharpen.then_some(Sharpening {
                    sigma: self.sigma,
                    radius: self.radius,
                }),
            },
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl GridConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid_spec()?;
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_file must not be empty".into(),
            ));
        }
        let has_stem = Path::new(&self.output_file)
            .file_stem()
            .is_some_and(|stem| !stem.is_empty());
        if !has_stem {
            return Err(ConfigError::Validation(format!(
                "output_file '{}' has no file name",
                self.output_file
            )));
        }
        if self.backend.kind == BackendKind::Sharpened
            && self.backend.sharpen
            && !(self.backend.sigma.is_finite() && self.backend.sigma > 0.0)
        {
            return Err(ConfigError::Validation(
                "backend.sigma must be a positive number".into(),
            ));
        }
        Ok(())
    }

    /// The validated grid geometry.
    pub fn grid_spec(&self) -> Result<GridSpec, LayoutError> {
        GridSpec::new(self.image_width, self.cell_width, self.cell_height)
    }

    /// Output base name with any extension removed.
    pub fn output_base_name(&self) -> String {
        base_name_of(&self.output_file)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(GridConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse a TOML string and merge it on top of the stock defaults.
///
/// The result is not validated yet: command-line overrides still apply.
pub fn parse_config(content: &str) -> Result<GridConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    Ok(merged.try_into()?)
}

/// Load a config file, or the stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<GridConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(GridConfig::default()),
    }
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folder-grid configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# Canvas width in pixels. The grid gets floor(image_width / cell_width)
# columns; any leftover strip on the right stays transparent.
image_width = 520

# Size of one grid cell. Every image is resized to exactly this size,
# aspect ratio is not preserved.
cell_width = 26
cell_height = 26

# Output base name. The grid is written as "<name>.png", or
# "<name> (1).png" ... "<name> (20).png" if that already exists.
output_file = "OutputGrid"

# Sort input paths before layout. Off by default: images are placed in the
# order the filesystem lists them, which differs between platforms.
sort_paths = false

# ---------------------------------------------------------------------------
# Rendering backend
# ---------------------------------------------------------------------------
[backend]
# "sharpened": resize with a resampler from the table below, then sharpen.
# "legacy":    resize with a filter picked by interpolation_mode.
# "plain":     resize with bicubic, nothing else.
kind = "sharpened"

# Resampler for the sharpened backend. Unknown ids use 1 (bicubic).
#  1 bicubic       2 box            3 catmull-rom   4 hermite
#  5 lanczos2      6 lanczos5       7 lanczos8      8 mitchell-netravali
#  9 nearest       10 robidoux      11 robidoux-sharp
# 12 spline        13 triangle      14 welch
resampler_id = 1

# Gaussian sharpen applied to each resized cell.
sigma = 4.5
radius = 2
sharpen = true

# Interpolation for the legacy backend. Unknown values use 7.
# 0 default, 1 low, 2 high, 3 bilinear, 4 bicubic, 5 nearest-neighbor,
# 6 high-quality bilinear, 7 high-quality bicubic
interpolation_mode = 7

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
