//! Sahel Core - maintenance pipelines for the Sahel font family.
//!
//! Each pipeline prints a human readable report and returns an error when
//! the run should end with a non-zero exit status.

use std::path::PathBuf;

pub mod config;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod styles;

pub use font_validate::ValidationOptions;
pub use pipeline::{
    CompatSummary, clean_features, compare_coverage, enhance_variable_font, fix_compatibility,
    fix_features, validate_dist,
};
pub use styles::{STATIC_STYLES, Style, default_statics};
pub use ufo_compat::FlaggedGlyphs;

/// The curated flagged glyph lists for the Sahel masters.
pub fn default_flagged_glyphs() -> FlaggedGlyphs {
    FlaggedGlyphs::new(
        config::COMPONENT_GLYPHS.iter().copied(),
        config::ANCHOR_GLYPHS.iter().copied(),
    )
}

/// Default master paths relative to the working directory.
pub fn default_masters() -> Vec<PathBuf> {
    config::MASTER_SOURCES.iter().map(PathBuf::from).collect()
}
