use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("image not found: {name}")]
    NotFound { name: String },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to create texture for {path:?}: {reason}")]
    Texture { path: PathBuf, reason: String },

    #[error("unsupported image format: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("no image files found in directory: {path:?}")]
    EmptyDirectory { path: PathBuf },
}

/// Turns an image name (bundle-relative) or path into a displayable image.
///
/// Failures are not fatal for the slideshow: the image is skipped.
pub trait ImageLoader {
    type Image;

    fn load(&mut self, name: &str) -> Result<Self::Image, LoadError>;
}
