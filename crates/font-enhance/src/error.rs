use std::result;

use read_fonts::ReadError;
use write_fonts::{BuilderError, error};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("no glyf table (CFF fonts not supported)")]
    NoGlyf,

    #[error("font would have {0} glyphs, more than 65535")]
    TooManyGlyphs(usize),

    #[error("malformed gvar table")]
    MalformedGvar,

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to write table: {0}")]
    Write(#[from] error::Error),
}

pub type Result<T> = result::Result<T, Error>;
