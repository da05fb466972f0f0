//! Error types for master reconciliation.

use std::{path::PathBuf, result};

use norad::error::{FontLoadError, FontWriteError};

/// Errors that can occur while loading, reconciling or saving masters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("UFO not found: {}", .0.display())]
    MasterNotFound(PathBuf),

    #[error("failed to load UFO {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: FontLoadError,
    },

    #[error("failed to save UFO {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: FontWriteError,
    },

    #[error("failed to save {} of {total} masters: {}", .failed.len(), .failed.join(", "))]
    SaveBatch { failed: Vec<String>, total: usize },
}

pub type Result<T> = result::Result<T, Error>;
