//! Error types for feature file clean-up.

use std::{io, path::PathBuf, result};

use norad::error::FontLoadError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load UFO {}: {source}", .path.display())]
    Ufo {
        path: PathBuf,
        #[source]
        source: FontLoadError,
    },

    #[error("features file not found: {}", .0.display())]
    FeaturesNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build glyph pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = result::Result<T, Error>;
