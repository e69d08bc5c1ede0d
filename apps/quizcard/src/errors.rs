use std::path::PathBuf;

use thiserror::Error;

/// Fatal run errors. Anything recoverable (provider failures, missing
/// optional glyphs, missing fonts) is handled where it happens and never
/// reaches this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Required asset not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slide {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to list artifacts in {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
