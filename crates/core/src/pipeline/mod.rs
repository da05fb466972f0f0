mod compat;
mod coverage;
mod enhance;
mod features;
mod validate;

pub use compat::{CompatSummary, fix_compatibility};
pub use coverage::compare_coverage;
pub use enhance::enhance_variable_font;
pub use features::{clean_features, fix_features};
pub use validate::validate_dist;
