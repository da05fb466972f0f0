//! Configuration constants for Sahel font maintenance.

/// UFO masters of the Sahel family, lightest first.
pub const MASTER_SOURCES: &[&str] = &["Sahel.ufo", "Sahel-Bold.ufo", "Sahel-Black.ufo"];

/// Glyphs whose components break interpolation between the masters.
pub const COMPONENT_GLYPHS: &[&str] =
    &["uni0622", "uni0623", "uniFB58", "uniFE91", "uniFE8A.compact"];

/// Glyphs whose anchor sets differ between the masters.
pub const ANCHOR_GLYPHS: &[&str] = &["NameMe.303"];

/// Directory holding compiled fonts.
pub const DIST_DIR: &str = "dist";

/// Variable font filename inside [`DIST_DIR`].
pub const VARIABLE_FONT_FILENAME: &str = "Sahel-VF.ttf";

/// Static instance the variable font borrows missing glyphs from.
pub const SOURCE_STATIC_FILENAME: &str = "Sahel.ttf";

/// Variable font with the borrowed glyphs.
pub const ENHANCED_FONT_FILENAME: &str = "Sahel-VF-Enhanced.ttf";

/// Lower bound for a plausible compiled font, in KiB.
pub const MIN_FONT_KB: f64 = 10.0;

/// Upper bound for a plausible compiled font, in KiB.
pub const MAX_FONT_KB: f64 = 500.0;

/// How many glyphs or characters a coverage report lists before eliding.
pub const PREVIEW_LIMIT: usize = 20;
