//! Collision-free output filenames.
//!
//! The grid is always written as PNG. Given a base name, the first free
//! candidate in this sequence wins:
//!
//! ```text
//! OutputGrid.png
//! OutputGrid (1).png
//! OutputGrid (2).png
//! ...
//! OutputGrid (20).png
//! ```
//!
//! Twenty-one candidates in total. If every one already exists the run stops
//! with [`NamingError::Exhausted`] instead of overwriting a file or probing
//! forever.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Candidates tried, the bare name included.
pub const MAX_ATTEMPTS: u32 = 21;

const EXTENSION: &str = "png";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NamingError {
    #[error("No free output name for '{base_name}' in {directory} after {attempts} attempts")]
    Exhausted {
        directory: PathBuf,
        base_name: String,
        attempts: u32,
    },
}

/// Candidate filename for a given attempt: 0 is the bare name, `n` adds ` (n)`.
pub fn candidate_name(base_name: &str, attempt: u32) -> String {
    match attempt {
        0 => format!("{base_name}.{EXTENSION}"),
        n => format!("{base_name} ({n}).{EXTENSION}"),
    }
}

/// Reduce a user-supplied output name to its stem (`"grid.png"` → `"grid"`).
pub fn base_name_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Resolve the output path with the default attempt bound.
pub fn resolve_output_path(directory: &Path, base_name: &str) -> Result<PathBuf, NamingError> {
    resolve_output_path_with(directory, base_name, MAX_ATTEMPTS)
}

/// Return the first candidate under `directory` that does not exist yet.
pub fn resolve_output_path_with(
    directory: &Path,
    base_name: &str,
    max_attempts: u32,
) -> Result<PathBuf, NamingError> {
    (0..max_attempts)
        .map(|attempt| directory.join(candidate_name(base_name, attempt)))
        .find(|path| !path.exists())
        .ok_or_else(|| NamingError::Exhausted {
            directory: directory.to_path_buf(),
            base_name: base_name.to_string(),
            attempts: max_attempts,
        })
}
