//! Remove feature rules that reference glyphs a UFO does not have.

use std::{
    collections::{BTreeSet, HashSet},
    fs::{read_to_string, write},
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use log::{debug, info};
use norad::Font;
use regex::Regex;

use crate::{Error, Result};

/// `uniXXXX` style glyph names, with an optional `.suffix`.
static GLYPH_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\buni[0-9A-Fa-f]{4,6}(?:\.[a-zA-Z0-9_]+)?\b").unwrap());

/// Feature file name inside a UFO.
pub const FEATURES_FILE: &str = "features.fea";

/// Result of pruning a feature file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pruned {
    /// The feature source with offending lines removed.
    pub content: String,
    /// Referenced glyph names not available in the font.
    pub missing: BTreeSet<String>,
    /// Number of lines dropped.
    pub removed_lines: usize,
}

impl Pruned {
    pub fn is_unchanged(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Collect every `uniXXXX` glyph name referenced in `content`.
pub fn referenced_glyphs(content: &str) -> BTreeSet<String> {
    GLYPH_REFERENCE.find_iter(content).map(|m| m.as_str().to_owned()).collect()
}

/// Drop every line of `content` mentioning, as a whole word, a referenced glyph
/// that is not in `available`.
///
/// Lines are split and re-joined on `\n`, so a trailing newline survives.
pub fn prune_missing_glyphs(content: &str, available: &HashSet<String>) -> Result<Pruned> {
    let missing: BTreeSet<String> = referenced_glyphs(content)
        .into_iter()
        .filter(|name| !available.contains(name))
        .collect();
    if missing.is_empty() {
        return Ok(Pruned { content: content.to_owned(), ..Default::default() });
    }

    let alternatives: Vec<String> = missing.iter().map(|name| regex::escape(name)).collect();
    let pattern = Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))?;

    let mut removed_lines = 0;
    let kept: Vec<&str> = content
        .split('\n')
        .filter(|line| {
            let hit = pattern.is_match(line);
            if hit {
                debug!("Dropping line: {}", line.trim());
                removed_lines += 1;
            }
            !hit
        })
        .collect();

    Ok(Pruned { content: kept.join("\n"), missing, removed_lines })
}

/// Glyph names in the default layer of a UFO.
pub fn ufo_glyph_names(ufo: &Path) -> Result<HashSet<String>> {
    let font =
        Font::load(ufo).map_err(|source| Error::Ufo { path: ufo.to_path_buf(), source })?;
    Ok(font.default_layer().iter().map(|glyph| glyph.name().to_string()).collect())
}

/// Path of the feature file belonging to a UFO.
pub fn features_path(ufo: &Path) -> PathBuf {
    ufo.join(FEATURES_FILE)
}

/// Prune `features.fea` of a UFO in place. The file is only rewritten when a
/// missing glyph was found.
pub fn clean_ufo_features(ufo: &Path) -> Result<Pruned> {
    let available = ufo_glyph_names(ufo)?;
    let path = features_path(ufo);

    let content = read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::FeaturesNotFound(path.clone()),
        _ => Error::Read { path: path.clone(), source },
    })?;

    let pruned = prune_missing_glyphs(&content, &available)?;
    if pruned.is_unchanged() {
        debug!("No missing glyphs referenced in {}", path.display());
        return Ok(pruned);
    }

    info!(
        "Removing {} lines referencing {} missing glyphs from {}",
        pruned.removed_lines,
        pruned.missing.len(),
        path.display()
    );
    write(&path, &pruned.content).map_err(|source| Error::Write { path: path.clone(), source })?;
    Ok(pruned)
}
