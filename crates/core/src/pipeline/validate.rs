use std::path::Path;

use anyhow::{Result, bail};
use font_validate::{Summary, Validation, ValidationOptions, validate_files};

use crate::{io::glob_fonts, report};

/// Validate every `*.ttf` in `dist_dir`, failing if any font does not pass.
pub fn validate_dist(dist_dir: &Path, options: &ValidationOptions) -> Result<Summary> {
    if !dist_dir.is_dir() {
        bail!("Dist directory not found: {}", dist_dir.display());
    }
    let fonts = glob_fonts(dist_dir, "*.ttf")?;
    if fonts.is_empty() {
        bail!("No TTF fonts found in {}", dist_dir.display());
    }

    report::header(&format!("Validating {} fonts", fonts.len()));
    let validations = validate_files(&fonts, options);
    for validation in &validations {
        print_validation(validation);
    }

    let summary = Summary::new(&validations);
    report::section("Summary");
    println!("Total: {}", summary.total);
    println!("Passed: {}", summary.passed);
    println!("Failed: {}", summary.failed.len());
    if !summary.all_passed() {
        bail!("Validation failed for: {}", summary.failed.join(", "));
    }
    report::success("All fonts passed validation");
    Ok(summary)
}

fn print_validation(validation: &Validation) {
    let kind = if validation.is_variable { "variable" } else { "static" };
    report::section(&format!("{} ({kind})", validation.name));
    if let Some(size_kb) = validation.size_kb {
        println!("Size: {size_kb:.1} KB");
    }
    if !validation.tables.is_empty() {
        println!("Tables: {}", validation.tables.len());
    }
    for tag in &validation.missing_variable_tables {
        report::warning(format!("Missing variable font table: {tag}"));
    }
    match &validation.failure {
        None => report::success("Passed"),
        Some(failure) => report::failure(failure.to_string()),
    }
}
