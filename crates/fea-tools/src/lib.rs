//! # Fea Tools
//!
//! Line-oriented fixes for OpenType feature files kept in UFO sources:
//!
//! - [`clean_ufo_features`] drops lines referencing `uniXXXX` glyphs the UFO
//!   does not contain.
//! - [`simplify_positioning`] removes empty pair positioning rules and
//!   flattens two-record pair rules.

mod error;
mod position;
mod prune;

pub use error::{Error, Result};
pub use position::{Simplified, fix_line, simplify_positioning, simplify_positioning_file};
pub use prune::{
    FEATURES_FILE, Pruned, clean_ufo_features, features_path, prune_missing_glyphs,
    referenced_glyphs, ufo_glyph_names,
};
