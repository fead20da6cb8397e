//! Corner-transparency pruning.
//!
//! Deletes sprites that look improperly cropped: if any of the four corner
//! pixels is fully transparent (alpha 0), the file goes. Formats without an
//! alpha channel (JPEG, most BMPs) decode as opaque and are always kept.
//!
//! Unlike [`compose`](crate::compose), pruning isolates failures per file.
//! A file that fails to decode or delete, or a directory entry that cannot
//! be read, is recorded in the [`PruneReport`] and the pass moves on.

use crate::imaging::load_image;
use crate::scan::{self, Listing, ScanError};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("Directory does not exist: {0}")]
    InvalidDirectory(PathBuf),
    #[error("Scan failed: {0}")]
    Scan(ScanError),
}

impl From<ScanError> for PruneError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingDirectory(path) => PruneError::InvalidDirectory(path),
            other => PruneError::Scan(other),
        }
    }
}

/// The four corner coordinates of a `width` x `height` image.
///
/// For a 1-pixel-wide or -tall image, corners coincide.
pub fn corner_quad(width: u32, height: u32) -> [(u32, u32); 4] {
    let (right, bottom) = (width.saturating_sub(1), height.saturating_sub(1));
    [(0, 0), (right, 0), (0, bottom), (right, bottom)]
}

/// Whether an image should be deleted: true if any corner has alpha 0.
///
/// An empty image has no corners and is kept.
pub fn should_delete(image: &RgbaImage) -> bool {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return false;
    }
    corner_quad(width, height)
        .iter()
        .any(|&(x, y)| image.get_pixel(x, y).0[3] == 0)
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    Kept,
    Deleted,
    /// Would be deleted, but this is a dry run.
    WouldDelete,
    /// Gone between listing and checking.
    Vanished,
    Failed(String),
}

/// Per-file results of a prune pass, in path order.
#[derive(Debug, Default)]
pub struct PruneReport {
    pub entries: Vec<(PathBuf, PruneOutcome)>,
}

impl PruneReport {
    fn count(&self, pred: impl Fn(&PruneOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, PruneOutcome::Deleted | PruneOutcome::WouldDelete))
    }

    pub fn kept(&self) -> usize {
        self.count(|o| *o == PruneOutcome::Kept)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PruneOutcome::Failed(_)))
    }
}

/// Check one file and delete it if a corner is transparent.
pub fn prune_file(path: &Path, dry_run: bool) -> PruneOutcome {
    if !path.is_file() {
        return PruneOutcome::Vanished;
    }
    let image = match load_image(path) {
        Ok(img) => img.to_rgba8(),
        Err(e) => return PruneOutcome::Failed(e.to_string()),
    };
    if !should_delete(&image) {
        return PruneOutcome::Kept;
    }
    if dry_run {
        return PruneOutcome::WouldDelete;
    }
    match std::fs::remove_file(path) {
        Ok(()) => PruneOutcome::Deleted,
        Err(e) => PruneOutcome::Failed(format!("delete failed: {e}")),
    }
}

/// Prune every supported image directly inside `dir`.
///
/// Only a missing directory fails the pass; per-file problems end up in the
/// report.
pub fn prune_directory(dir: &Path, dry_run: bool) -> Result<PruneReport, PruneError> {
    let listing = scan::list_images(dir)?;
    Ok(prune_listing(dir, listing, dry_run))
}

/// Prune an already listed folder. Entries that could not be read are
/// reported as failures against `dir`.
fn prune_listing(dir: &Path, listing: Listing, dry_run: bool) -> PruneReport {
    info!(count = listing.images.len(), dir = %dir.display(), dry_run, "checking images");

    let mut report = PruneReport::default();
    for error in listing.unreadable {
        let reason = format!("unreadable directory entry: {error}");
        warn!(dir = %dir.display(), %reason, "skipped");
        report
            .entries
            .push((dir.to_path_buf(), PruneOutcome::Failed(reason)));
    }
    for path in listing.images {
        let outcome = prune_file(&path, dry_run);
        match &outcome {
            PruneOutcome::Failed(reason) => warn!(path = %path.display(), %reason, "skipped"),
            other => debug!(path = %path.display(), outcome = ?other, "checked"),
        }
        report.entries.push((path, outcome));
    }
    report
}
