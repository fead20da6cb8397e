//! Image discovery.
//!
//! Collects the raster files a run will work on. Two entry points:
//!
//! - [`load_image_set`]: the composer's loader. Takes one or more folders
//!   separated by `;`, walks each one recursively, and keeps files whose
//!   extension passes [`is_supported_image`].
//! - [`list_images`]: the pruner's loader. Only the top level of one folder.
//!
//! ## Ordering
//!
//! Paths come back in the order the filesystem enumerates them, folder by
//! folder. That order is platform dependent, and it decides where each image
//! lands in the grid. Pass `sort = true` to sort the collected paths
//! lexicographically for reproducible placement.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input directory does not exist: {0}")]
    MissingDirectory(PathBuf),
}

/// Extensions accepted as raster images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["bmp", "png", "jpg", "jpeg"];

/// Whether `path` names a supported raster format, by extension only.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Split a `;`-separated folder list, dropping empty entries.
pub fn split_folder_list(folders: &str) -> Vec<PathBuf> {
    folders
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Recursively collect supported images under every folder in `folders`.
///
/// Fails with [`ScanError::MissingDirectory`] if any folder is missing;
/// nothing is collected in that case.
pub fn load_image_set(folders: &[PathBuf], sort: bool) -> Result<Vec<PathBuf>, ScanError> {
    if let Some(missing) = folders.iter().find(|f| !f.is_dir()) {
        return Err(ScanError::MissingDirectory(missing.clone()));
    }

    let mut paths = Vec::new();
    for folder in folders {
        for entry in WalkDir::new(folder).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && is_supported_image(entry.path()) {
                paths.push(entry.into_path());
            }
        }
    }

    if sort {
        paths.sort();
    }
    Ok(paths)
}

/// The pruner's view of one folder.
#[derive(Debug, Default)]
pub struct Listing {
    /// Supported images, sorted.
    pub images: Vec<PathBuf>,
    /// Entries the directory iterator failed to read.
    pub unreadable: Vec<std::io::Error>,
}

/// Collect supported images directly inside `dir` (no recursion).
pub fn list_images(dir: &Path) -> Result<Listing, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(partition_entries(entries))
}

fn partition_entries(entries: impl IntoIterator<Item = std::io::Result<PathBuf>>) -> Listing {
    let mut listing = Listing::default();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() && is_supported_image(&path) => listing.images.push(path),
            Ok(_) => {}
            Err(e) => listing.unreadable.push(e),
        }
    }
    listing.images.sort();
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    // =========================================================================
    // Extension filter
    // =========================================================================

    #[test]
    fn supported_extensions_any_case() {
        for name in ["a.bmp", "a.PNG", "a.Jpg", "a.jpeg", "a.JPEG"] {
            assert!(is_supported_image(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn unsupported_extensions_rejected() {
        for name in ["a.gif", "a.webp", "a.txt", "png", "a.png.bak", "noext"] {
            assert!(!is_supported_image(Path::new(name)), "{name}");
        }
    }

    // =========================================================================
    // Folder list
    // =========================================================================

    #[test]
    fn split_folder_list_drops_empty_entries() {
        assert_eq!(
            split_folder_list("a;;b; ;c;"),
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }

    // =========================================================================
    // load_image_set
    // =========================================================================

    #[test]
    fn load_recurses_and_filters() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.png"));
        touch(&tmp.path().join("notes.txt"));
        touch(&tmp.path().join("nested/deeper/b.JPG"));
        touch(&tmp.path().join("nested/c.bmp"));

        let paths = load_image_set(&[tmp.path().to_path_buf()], true).unwrap();
        let mut found = names(&paths);
        found.sort();
        assert_eq!(found, vec!["a.png", "b.JPG", "c.bmp"]);
    }

    #[test]
    fn load_multiple_folders_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        touch(&first.path().join("z.png"));
        touch(&second.path().join("a.png"));

        let paths = load_image_set(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            false,
        )
        .unwrap();
        assert_eq!(names(&paths), vec!["z.png", "a.png"]);
    }

    #[test]
    fn load_sorted_is_lexicographic() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.png", "a.png", "b.png"] {
            touch(&tmp.path().join(name));
        }
        let paths = load_image_set(&[tmp.path().to_path_buf()], true).unwrap();
        assert_eq!(names(&paths), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn load_missing_folder_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let result = load_image_set(&[tmp.path().to_path_buf(), missing.clone()], false);
        assert!(matches!(result, Err(ScanError::MissingDirectory(p)) if p == missing));
    }

    #[test]
    fn load_empty_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("readme.md"));
        let paths = load_image_set(&[tmp.path().to_path_buf()], false).unwrap();
        assert!(paths.is_empty());
    }

    // =========================================================================
    // list_images
    // =========================================================================

    #[test]
    fn list_is_top_level_only() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("top.png"));
        touch(&tmp.path().join("sub/inner.png"));
        let listing = list_images(tmp.path()).unwrap();
        assert_eq!(names(&listing.images), vec!["top.png"]);
        assert!(listing.unreadable.is_empty());
    }

    #[test]
    fn unreadable_entries_are_kept_not_dropped() {
        let tmp = TempDir::new().unwrap();
        let b = tmp.path().join("b.png");
        let a = tmp.path().join("a.png");
        touch(&b);
        touch(&a);

        let listing = partition_entries(vec![
            Ok(b),
            Err(std::io::Error::other("stale handle")),
            Ok(a),
            Ok(tmp.path().join("missing.png")),
        ]);

        assert_eq!(names(&listing.images), vec!["a.png", "b.png"]);
        assert_eq!(listing.unreadable.len(), 1);
        assert_eq!(listing.unreadable[0].to_string(), "stale handle");
    }

    #[test]
    fn list_missing_dir_is_error() {
        let result = list_images(Path::new("/nonexistent/sprites"));
        assert!(matches!(result, Err(ScanError::MissingDirectory(_))));
    }
}
