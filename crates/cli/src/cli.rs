//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use sahel_core::{
    FlaggedGlyphs, ValidationOptions, clean_features, compare_coverage,
    config::{
        DIST_DIR, ENHANCED_FONT_FILENAME, MAX_FONT_KB, MIN_FONT_KB, SOURCE_STATIC_FILENAME,
        VARIABLE_FONT_FILENAME,
    },
    default_flagged_glyphs, default_masters, default_statics, enhance_variable_font,
    fix_compatibility, fix_features, validate_dist,
};

#[derive(Parser)]
#[command(name = "sahel-fonts")]
#[command(about = "Maintain the Sahel font sources and check compiled fonts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Make the UFO masters compatible for variable font compilation
    FixCompat {
        /// UFO masters (defaults to the Sahel masters)
        masters: Vec<PathBuf>,
        /// Glyph to decompose in every master (repeatable)
        #[arg(long = "component-glyph", value_name = "NAME")]
        component_glyphs: Vec<String>,
        /// Glyph to reduce to its common anchors (repeatable)
        #[arg(long = "anchor-glyph", value_name = "NAME")]
        anchor_glyphs: Vec<String>,
        /// Report changes without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Compare glyph and character coverage of the variable and static fonts
    Coverage {
        #[arg(long, default_value = DIST_DIR)]
        dist_dir: PathBuf,
        #[arg(long, default_value = VARIABLE_FONT_FILENAME)]
        variable: String,
        /// Static font as WEIGHT=FILE (repeatable, replaces the defaults)
        #[arg(long = "static", value_name = "WEIGHT=FILE", value_parser = parse_static)]
        statics: Vec<(String, String)>,
    },
    /// Copy glyphs missing from the variable font over from a static font
    Enhance {
        #[arg(long, default_value = DIST_DIR)]
        dist_dir: PathBuf,
        #[arg(long, default_value = VARIABLE_FONT_FILENAME)]
        variable: String,
        /// Static font to copy glyphs from
        #[arg(long, default_value = SOURCE_STATIC_FILENAME)]
        source: String,
        /// Output file name inside the dist directory
        #[arg(long, default_value = ENHANCED_FONT_FILENAME)]
        output: String,
    },
    /// Check size and table structure of every TTF in the dist directory
    Validate {
        #[arg(long, default_value = DIST_DIR)]
        dist_dir: PathBuf,
        #[arg(long, default_value_t = MIN_FONT_KB)]
        min_kb: f64,
        #[arg(long, default_value_t = MAX_FONT_KB)]
        max_kb: f64,
    },
    /// Drop feature lines referencing glyphs missing from each UFO
    CleanFeatures {
        /// UFO sources (defaults to the Sahel masters)
        ufos: Vec<PathBuf>,
    },
    /// Simplify pair positioning rules of a feature file
    FixFeatures { input: PathBuf, output: PathBuf },
}

fn parse_static(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, file)) if !name.is_empty() && !file.is_empty() => {
            Ok((name.to_string(), file.to_string()))
        }
        _ => Err(format!("Invalid static font '{s}', expected WEIGHT=FILE")),
    }
}

fn or_default_masters(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() { default_masters() } else { paths }
}

fn flagged_glyphs(components: Vec<String>, anchors: Vec<String>) -> FlaggedGlyphs {
    if components.is_empty() && anchors.is_empty() {
        debug!("No flagged glyphs given, using defaults");
        default_flagged_glyphs()
    } else {
        FlaggedGlyphs::new(components, anchors)
    }
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::FixCompat { masters, component_glyphs, anchor_glyphs, dry_run } => {
                let flagged = flagged_glyphs(component_glyphs, anchor_glyphs);
                fix_compatibility(&or_default_masters(masters), &flagged, dry_run)?;
            }
            Commands::Coverage { dist_dir, variable, statics } => {
                let statics = if statics.is_empty() { default_statics() } else { statics };
                compare_coverage(&dist_dir, &variable, &statics)?;
            }
            Commands::Enhance { dist_dir, variable, source, output } => {
                enhance_variable_font(&dist_dir, &variable, &source, &output)?;
            }
            Commands::Validate { dist_dir, min_kb, max_kb } => {
                validate_dist(&dist_dir, &ValidationOptions { min_kb, max_kb })?;
            }
            Commands::CleanFeatures { ufos } => {
                clean_features(&or_default_masters(ufos))?;
            }
            Commands::FixFeatures { input, output } => {
                fix_features(&input, &output)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static() {
        assert_eq!(
            parse_static("Bold=Sahel-Bold.ttf").unwrap(),
            ("Bold".to_string(), "Sahel-Bold.ttf".to_string())
        );
        assert!(parse_static("Sahel-Bold.ttf").is_err());
        assert!(parse_static("=Sahel-Bold.ttf").is_err());
    }

    #[test]
    fn test_fix_compat_flags() {
        let cli = Cli::parse_from([
            "sahel-fonts",
            "fix-compat",
            "A.ufo",
            "--component-glyph",
            "uni0622",
            "--component-glyph",
            "uni0623",
            "--dry-run",
        ]);
        match cli.command {
            Commands::FixCompat { masters, component_glyphs, anchor_glyphs, dry_run } => {
                assert_eq!(masters, [PathBuf::from("A.ufo")]);
                assert_eq!(component_glyphs, ["uni0622", "uni0623"]);
                assert!(anchor_glyphs.is_empty());
                assert!(dry_run);
            }
            _ => panic!("expected fix-compat"),
        }
    }

    #[test]
    fn test_defaults_when_nothing_flagged() {
        assert_eq!(flagged_glyphs(Vec::new(), Vec::new()), default_flagged_glyphs());
        let flagged = flagged_glyphs(Vec::new(), vec!["NameMe.303".to_string()]);
        assert!(flagged.components.is_empty());
        assert_eq!(or_default_masters(Vec::new()).len(), 3);
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::parse_from(["sahel-fonts", "validate"]);
        match cli.command {
            Commands::Validate { dist_dir, min_kb, max_kb } => {
                assert_eq!(dist_dir, PathBuf::from("dist"));
                assert_eq!((min_kb, max_kb), (10.0, 500.0));
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_coverage_static_overrides() {
        let cli = Cli::parse_from(["sahel-fonts", "coverage", "--static", "Regular=Sahel.ttf"]);
        match cli.command {
            Commands::Coverage { statics, variable, .. } => {
                assert_eq!(statics, [("Regular".to_string(), "Sahel.ttf".to_string())]);
                assert_eq!(variable, "Sahel-VF.ttf");
            }
            _ => panic!("expected coverage"),
        }
    }

    #[test]
    fn test_enhance_defaults() {
        let cli = Cli::parse_from(["sahel-fonts", "enhance"]);
        match cli.command {
            Commands::Enhance { dist_dir, variable, source, output } => {
                assert_eq!(dist_dir, PathBuf::from("dist"));
                assert_eq!(variable, "Sahel-VF.ttf");
                assert_eq!(source, "Sahel.ttf");
                assert_eq!(output, "Sahel-VF-Enhanced.ttf");
            }
            _ => panic!("expected enhance"),
        }

        let cli = Cli::parse_from(["sahel-fonts", "enhance", "--source", "Sahel-Bold.ttf"]);
        assert!(matches!(cli.command, Commands::Enhance { source, .. } if source == "Sahel-Bold.ttf"));
    }
}
