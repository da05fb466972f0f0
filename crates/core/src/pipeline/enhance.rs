use std::{fs::write, path::Path};

use anyhow::{Context, Result, bail};
use font_coverage::preview;
use font_enhance::{Enhanced, copy_missing_glyphs};

use crate::{config::PREVIEW_LIMIT, io::read_font, report};

/// Copy glyphs missing from the variable font in `dist_dir` over from the
/// static `source`, writing the result to `output` in the same directory.
pub fn enhance_variable_font(
    dist_dir: &Path,
    variable: &str,
    source: &str,
    output: &str,
) -> Result<Enhanced> {
    if !dist_dir.is_dir() {
        bail!("Dist directory not found: {}", dist_dir.display());
    }
    report::header("Enhancing variable font");

    let variable_data = read_font(dist_dir.join(variable))?;
    let source_data = read_font(dist_dir.join(source))?;
    let enhanced = copy_missing_glyphs(&variable_data, &source_data)
        .with_context(|| format!("Failed to copy glyphs from {source} into {variable}"))?;

    if enhanced.is_unchanged() {
        report::info(format!("{variable} already has every glyph of {source}"));
    } else {
        report::warning(format!("{} glyphs missing from {variable}", enhanced.added.len()));
        let (shown, elided) = preview(&enhanced.added, PREVIEW_LIMIT);
        println!("  {shown}{}", if elided { ", ..." } else { "" });
        report::success(format!(
            "Copied {} glyphs and {} character mappings from {source}",
            enhanced.added.len(),
            enhanced.codepoints
        ));
    }

    let output_path = dist_dir.join(output);
    write(&output_path, &enhanced.data)
        .with_context(|| format!("Failed to write font: {}", output_path.display()))?;
    report::success(format!("Wrote {}", output_path.display()));
    Ok(enhanced)
}

#[cfg(test)]
mod tests {
    use std::fs::read;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_dist_dir() {
        let dir = tempdir().unwrap();
        let dist = dir.path().join("dist");
        let err =
            enhance_variable_font(&dist, "Sahel-VF.ttf", "Sahel.ttf", "out.ttf").unwrap_err();
        assert!(err.to_string().starts_with("Dist directory not found"));
    }

    #[test]
    fn test_missing_source_font() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();
        let err =
            enhance_variable_font(dir.path(), "Sahel-VF.ttf", "Sahel.ttf", "out.ttf").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read font"));
        assert!(!dir.path().join("out.ttf").exists());
    }

    #[test]
    fn test_complete_font_written_unchanged() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();
        write(dir.path().join("Sahel.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();

        let enhanced =
            enhance_variable_font(dir.path(), "Sahel-VF.ttf", "Sahel.ttf", "Sahel-VF-Enhanced.ttf")
                .unwrap();
        assert!(enhanced.is_unchanged());
        let written = read(dir.path().join("Sahel-VF-Enhanced.ttf")).unwrap();
        assert_eq!(written, font_test_data::VAZIRMATN_VAR);
    }

    #[test]
    fn test_unparsable_variable_font() {
        let dir = tempdir().unwrap();
        write(dir.path().join("Sahel-VF.ttf"), b"not a font").unwrap();
        write(dir.path().join("Sahel.ttf"), font_test_data::VAZIRMATN_VAR).unwrap();

        let err =
            enhance_variable_font(dir.path(), "Sahel-VF.ttf", "Sahel.ttf", "out.ttf").unwrap_err();
        assert_eq!(err.to_string(), "Failed to copy glyphs from Sahel.ttf into Sahel-VF.ttf");
    }
}
