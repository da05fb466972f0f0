use std::path::Path;

use anyhow::{Context, Result, bail};
use font_coverage::{
    Codepoint, CoverageComparison, FontCoverage, SetComparison, Verdict, compare, preview,
};
use log::debug;
use rayon::prelude::*;

use crate::{config::PREVIEW_LIMIT, io::read_font, report};

fn load_coverage(path: &Path) -> Result<FontCoverage> {
    let data = read_font(path)?;
    FontCoverage::from_data(&data)
        .with_context(|| format!("Failed to parse font: {}", path.display()))
}

fn describe(name: &str, font: &FontCoverage) -> String {
    format!(
        "{name}: {} glyphs, {} characters, {} tables",
        font.num_glyphs,
        font.codepoints.len(),
        font.tables.len()
    )
}

/// Compare the variable font in `dist_dir` with the static fonts next to it.
///
/// `statics` pairs a weight name with its file name. Missing statics are
/// skipped with a warning; the run fails when none of them exist.
pub fn compare_coverage(
    dist_dir: &Path,
    variable: &str,
    statics: &[(String, String)],
) -> Result<CoverageComparison> {
    if !dist_dir.is_dir() {
        bail!("Dist directory not found: {}", dist_dir.display());
    }
    let variable_path = dist_dir.join(variable);
    if !variable_path.exists() {
        bail!("Variable font not found: {}", variable_path.display());
    }

    report::header("Variable font coverage");

    let vf = load_coverage(&variable_path)?;
    report::success(describe(variable, &vf));
    if !vf.is_variable {
        report::warning(format!("{variable} has no fvar table"));
    }

    let present: Vec<(&str, &str)> = statics
        .iter()
        .filter(|(name, file)| {
            let exists = dist_dir.join(file).exists();
            if !exists {
                report::warning(format!("{name}: {file} not found"));
            }
            exists
        })
        .map(|(name, file)| (name.as_str(), file.as_str()))
        .collect();
    if present.is_empty() {
        bail!("No static fonts found in {}", dist_dir.display());
    }

    let loaded: Vec<(String, FontCoverage)> = present
        .par_iter()
        .map(|(name, file)| -> Result<(String, FontCoverage)> {
            debug!("Loading {file}");
            Ok((name.to_string(), load_coverage(&dist_dir.join(file))?))
        })
        .collect::<Result<_>>()?;
    for (name, font) in &loaded {
        report::success(describe(name, font));
    }

    let comparison = compare(&vf, &loaded);
    print_comparison(&comparison);
    Ok(comparison)
}

fn print_set<T: Ord + Clone>(
    label: &str,
    set: &SetComparison<T>,
    show: impl Fn(&T) -> String,
) {
    report::section(label);
    println!("Variable font: {}", set.variable_total);
    println!("Static fonts (union): {}", set.static_total);
    println!("Common: {} ({:.1}%)", set.common.len(), set.common_percent());
    let only_variable = set.variable_only.iter().map(&show);
    print_list("Only in variable font", only_variable, set.variable_only.len());
    let only_static = set.static_only.iter().map(&show);
    print_list("Only in static fonts", only_static, set.static_only.len());
}

fn print_list(label: &str, items: impl Iterator<Item = String>, count: usize) {
    if count == 0 {
        return;
    }
    let (shown, truncated) = preview(items, PREVIEW_LIMIT);
    report::warning(format!("{label} ({count}): {shown}{}", if truncated { ", ..." } else { "" }));
}

fn print_comparison(comparison: &CoverageComparison) {
    print_set("Glyphs", &comparison.glyphs, |name| name.clone());
    print_set("Characters", &comparison.codepoints, |cp| Codepoint(*cp).to_string());

    report::section("Per weight");
    for weight in &comparison.weights {
        println!(
            "{:<10} {:>5} glyphs {:>5} chars {:>6.1}% of VF glyphs, {} missing, {} extra",
            weight.name,
            weight.glyphs,
            weight.codepoints,
            weight.coverage_percent,
            weight.missing,
            weight.extra
        );
    }

    println!();
    match comparison.verdict() {
        Verdict::Identical => report::success("Identical coverage"),
        Verdict::SameGlyphSet => report::warning("Same glyph set, different characters"),
        Verdict::Different => report::warning("Different coverage"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    fn statics(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(n, f)| (n.to_string(), f.to_string())).collect()
    }

    #[test]
    fn test_missing_dist_dir() {
        let dir = tempdir().unwrap();
        let err = compare_coverage(&dir.path().join("dist"), "Sahel-VF.ttf", &[]).unwrap_err();
        assert!(err.to_string().starts_with("Dist directory not found"));
    }

    #[test]
    fn test_missing_variable_font() {
        let dir = tempdir().unwrap();
        let err = compare_coverage(dir.path(), "Sahel-VF.ttf", &[]).unwrap_err();
        assert!(err.to_string().starts_with("Variable font not found"));
    }

    #[test]
    fn test_no_statics_found() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();
        let statics = statics(&[("Bold", "Sahel-Bold.ttf")]);
        let err = compare_coverage(dir.path(), "Sahel-VF.ttf", &statics).unwrap_err();
        assert!(err.to_string().starts_with("No static fonts found"));
    }

    #[test]
    fn test_missing_static_only_warns() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();
        write(dir.path().join("Sahel.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();

        let comparison = compare_coverage(
            dir.path(),
            "Sahel-VF.ttf",
            &statics(&[("Regular", "Sahel.ttf"), ("Bold", "Sahel-Bold.ttf")]),
        )
        .unwrap();
        assert_eq!(comparison.weights.len(), 1);
        assert_eq!(comparison.verdict(), Verdict::Identical);
    }

    #[test]
    fn test_unreadable_static_fails() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();
        write(dir.path().join("Sahel.ttf"), b"not a font").unwrap();

        let statics = statics(&[("Regular", "Sahel.ttf")]);
        let err = compare_coverage(dir.path(), "Sahel-VF.ttf", &statics).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse font"));
    }

    #[test]
    fn test_describe_counts() {
        let font = FontCoverage::from_data(font_test_data::VAZIRMATN_VAR).unwrap();
        let line = describe("Sahel-VF.ttf", &font);
        assert_eq!(
            line,
            format!(
                "Sahel-VF.ttf: {} glyphs, {} characters, {} tables",
                font.glyphs.len(),
                font.codepoints.len(),
                font.tables.len()
            )
        );
        assert!(!font.tables.is_empty());
    }
}
