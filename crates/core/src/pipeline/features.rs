use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fea_tools::{clean_ufo_features, simplify_positioning_file};

use crate::{io::file_name, report};

/// Drop feature lines referencing glyphs missing from each UFO.
///
/// Every UFO is attempted; the run fails afterwards if any of them did.
pub fn clean_features(ufos: &[PathBuf]) -> Result<()> {
    report::header("Cleaning feature files");

    let mut failed = Vec::new();
    for ufo in ufos {
        let name = file_name(ufo);
        match clean_ufo_features(ufo) {
            Ok(pruned) if pruned.is_unchanged() => {
                report::success(format!("{name}: all referenced glyphs present"));
            }
            Ok(pruned) => {
                let missing: Vec<&str> = pruned.missing.iter().map(String::as_str).collect();
                report::warning(format!("{name}: missing glyphs {}", missing.join(", ")));
                report::success(format!("{name}: removed {} lines", pruned.removed_lines));
            }
            Err(e) => {
                report::failure(format!("{name}: {e}"));
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        bail!("Failed to clean {} of {} UFOs: {}", failed.len(), ufos.len(), failed.join(", "));
    }
    Ok(())
}

/// Simplify the positioning rules of `input`, writing the result to `output`.
pub fn fix_features(input: &Path, output: &Path) -> Result<()> {
    let simplified = simplify_positioning_file(input, output)
        .with_context(|| format!("Failed to fix features: {}", input.display()))?;
    report::success(format!(
        "Wrote {} ({} of {} lines removed)",
        output.display(),
        simplified.removed,
        simplified.lines
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::{read_to_string, write};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_clean_attempts_every_ufo() {
        let dir = tempdir().unwrap();
        let ufos = [dir.path().join("Sahel.ufo"), dir.path().join("Sahel-Bold.ufo")];
        let err = clean_features(&ufos).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to clean 2 of 2 UFOs: Sahel.ufo, Sahel-Bold.ufo"
        );
    }

    #[test]
    fn test_fix_features() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("features.fea");
        let output = dir.path().join("features-fixed.fea");
        write(&input, "pos uni0628 uni0645 < 0 0 0 0 >;\n} kern;\n").unwrap();

        fix_features(&input, &output).unwrap();
        assert_eq!(read_to_string(&output).unwrap(), "} kern;\n");
    }

    #[test]
    fn test_fix_features_missing_input() {
        let dir = tempdir().unwrap();
        let err = fix_features(&dir.path().join("missing.fea"), &dir.path().join("out.fea"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to fix features"));
    }
}
