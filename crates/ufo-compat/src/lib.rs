//! # UFO Compat
//!
//! Make UFO masters structurally compatible for variable font compilation.
//!
//! Masters of an interpolating family must share the same glyph structure.
//! Given glyphs already known to disagree, this crate:
//!
//! - decomposes every component of a flagged glyph in every master, and
//! - reduces a flagged glyph's anchors to the names present in every master.
//!
//! ## Example
//!
//! ```no_run
//! use ufo_compat::{FlaggedGlyphs, MasterSet, reconcile};
//!
//! let mut masters = MasterSet::load(["Sahel.ufo", "Sahel-Bold.ufo"]).unwrap();
//! let flagged = FlaggedGlyphs::new(["uni0622"], ["NameMe.303"]);
//! for change in reconcile(&mut masters, &flagged) {
//!     println!("{change}");
//! }
//! masters.save_modified().into_result().unwrap();
//! ```

mod change;
mod error;
mod master;
mod reconcile;

#[cfg(any(test, feature = "test-fixtures"))]
#[doc(hidden)]
pub mod fixture;

pub use change::Change;
pub use error::{Error, Result};
pub use master::{Master, MasterSet, SaveReport, SaveStatus};
pub use reconcile::{
    FlaggedGlyphs, common_anchors, decompose_components, intersect_anchors, reconcile,
};
