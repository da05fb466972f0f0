//! # Font Enhance
//!
//! Copy glyphs a variable font lacks from one of its static instances.
//!
//! The variable font keeps its glyph order; missing glyphs are appended with
//! their outlines, advance widths and character mappings. Appended glyphs get
//! empty `gvar` entries, so they do not vary.
//!
//! ## Example
//!
//! ```no_run
//! use font_enhance::copy_missing_glyphs;
//!
//! let variable = std::fs::read("Sahel-VF.ttf").unwrap();
//! let regular = std::fs::read("Sahel.ttf").unwrap();
//! let enhanced = copy_missing_glyphs(&variable, &regular).unwrap();
//! println!("added {} glyphs", enhanced.added.len());
//! std::fs::write("Sahel-VF-Enhanced.ttf", enhanced.data).unwrap();
//! ```

mod cmap;
mod copy;
mod error;
mod gvar;

pub use copy::{Enhanced, copy_missing_glyphs, missing_glyphs};
pub use error::{Error, Result};
