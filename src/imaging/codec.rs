//! Decode and encode through the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (BMP, PNG, JPEG) | `image::ImageReader` with content sniffing |
//! | Encode → PNG | `ImageBuffer::write_to` into memory, then one exclusive write |
//!
//! The PNG is encoded into memory first, so a failed encode never touches the
//! output path. The file is created with `create_new`, so an existing file is
//! never overwritten, and it is removed again if writing fails partway.

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::fs::{self, File, OpenOptions};
use std::io::{Cursor, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file contents, falling back to the
/// extension, so a mislabelled file still decodes if it is a known format.
pub fn load_image(path: &Path) -> Result<DynamicImage, CodecError> {
    let decode_err = |source| CodecError::Decode {
        path: path.display().to_string(),
        source,
    };
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(decode_err)
}

/// Encode `image` as PNG and write it to `path`, which must not exist yet.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), CodecError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(CodecError::Encode)?;
    let bytes = buffer.into_inner();
    write_new_file(path, |file| file.write_all(&bytes))?;
    Ok(())
}

/// Create `path` exclusively and fill it with `write`. On a write error the
/// half-written file is deleted before the error is returned.
fn write_new_file(
    path: &Path,
    write: impl FnOnce(&mut File) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let result = write(&mut file).and_then(|()| file.sync_all());
    drop(file);
    if let Err(e) = result {
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}
