use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("slide index {index} out of range (deck has {len} slides)")]
    OutOfRange { index: usize, len: usize },

    #[error("no images found in {0}")]
    EmptyDeck(PathBuf),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load image {path}: {reason}")]
    Texture { path: PathBuf, reason: String },
}
