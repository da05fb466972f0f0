//! Glyph and character coverage of compiled fonts.
//!
//! Extracts glyph names and mapped codepoints from a font binary and compares
//! a variable font against the union of its static instances.

use std::{
    collections::{BTreeSet, HashMap},
    fmt::{Display, Formatter},
    result,
};

use read_fonts::{
    FontRef, ReadError, TableProvider,
    types::{GlyphId16, Tag},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),
}

pub type Result<T> = result::Result<T, Error>;

const FVAR: Tag = Tag::new(b"fvar");

/// What a single font covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCoverage {
    /// Glyph names from `post`; unnamed glyphs are called `glyphNNNNN`.
    pub glyphs: BTreeSet<String>,
    /// Codepoints mapped by any `cmap` subtable.
    pub codepoints: BTreeSet<u32>,
    /// Glyph count from `maxp`.
    pub num_glyphs: u16,
    /// Whether the font has an `fvar` table.
    pub is_variable: bool,
    /// Table tags in directory order.
    pub tables: Vec<Tag>,
}

impl FontCoverage {
    pub fn from_data(data: &[u8]) -> Result<Self> {
        Self::from_font(&FontRef::new(data)?)
    }

    pub fn from_font(font: &FontRef) -> Result<Self> {
        let tables: Vec<Tag> =
            font.table_directory.table_records().iter().map(|record| record.tag()).collect();
        let num_glyphs = font.maxp().map(|maxp| maxp.num_glyphs()).unwrap_or(0);
        let glyphs = glyph_order(font).into_iter().collect();

        let mut codepoints = BTreeSet::new();
        if let Ok(cmap) = font.cmap() {
            for record in cmap.encoding_records() {
                if let Ok(subtable) = record.subtable(cmap.offset_data()) {
                    codepoints.extend(subtable.iter().map(|(codepoint, _)| codepoint));
                }
            }
        }

        Ok(Self { glyphs, codepoints, num_glyphs, is_variable: tables.contains(&FVAR), tables })
    }
}

/// Glyph names in glyph id order, made unique.
///
/// Unnamed glyphs are called `glyphNNNNN`. A name seen again gets the first
/// free `#N` suffix, so `a, a, a` reads `a, a#1, a#2`.
pub fn glyph_order(font: &FontRef) -> Vec<String> {
    let num_glyphs = font.maxp().map(|maxp| maxp.num_glyphs()).unwrap_or(0);
    let post = font.post().ok();

    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(num_glyphs as usize);
    for gid in 0..num_glyphs {
        let name = post
            .as_ref()
            .and_then(|post| post.glyph_name(GlyphId16::new(gid)))
            .map(str::to_owned)
            .unwrap_or_else(|| format!("glyph{gid:05}"));
        names.push(unique_name(name, &mut next_suffix));
    }
    names
}

fn unique_name(name: String, next_suffix: &mut HashMap<String, usize>) -> String {
    let Some(&start) = next_suffix.get(&name) else {
        next_suffix.insert(name.clone(), 1);
        return name;
    };
    let mut n = start;
    while next_suffix.contains_key(&format!("{name}#{n}")) {
        n += 1;
    }
    next_suffix.insert(name.clone(), n + 1);
    let unique = format!("{name}#{n}");
    next_suffix.insert(unique.clone(), 1);
    unique
}

/// Set difference between the variable font and the static fonts combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComparison<T> {
    pub variable_total: usize,
    pub static_total: usize,
    pub common: BTreeSet<T>,
    pub variable_only: BTreeSet<T>,
    pub static_only: BTreeSet<T>,
}

impl<T: Ord + Clone> SetComparison<T> {
    pub fn new(variable: &BTreeSet<T>, statics: &BTreeSet<T>) -> Self {
        Self {
            variable_total: variable.len(),
            static_total: statics.len(),
            common: variable.intersection(statics).cloned().collect(),
            variable_only: variable.difference(statics).cloned().collect(),
            static_only: statics.difference(variable).cloned().collect(),
        }
    }

    /// Share of the variable font's items also found in the static fonts.
    pub fn common_percent(&self) -> f64 {
        percent(self.common.len(), self.variable_total)
    }

    pub fn is_identical(&self) -> bool {
        self.variable_only.is_empty() && self.static_only.is_empty()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

/// How one static weight compares with the variable font's glyph set.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCoverage {
    pub name: String,
    pub glyphs: usize,
    pub codepoints: usize,
    /// Percentage of variable font glyphs present in this weight.
    pub coverage_percent: f64,
    /// Variable font glyphs missing from this weight.
    pub missing: usize,
    /// Glyphs of this weight absent from the variable font.
    pub extra: usize,
}

/// Overall outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same glyphs and same characters.
    Identical,
    /// Same glyphs, different character mapping.
    SameGlyphSet,
    Different,
}

/// Full comparison of a variable font against its static instances.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageComparison {
    pub glyphs: SetComparison<String>,
    pub codepoints: SetComparison<u32>,
    pub weights: Vec<WeightCoverage>,
}

impl CoverageComparison {
    pub fn verdict(&self) -> Verdict {
        match (self.glyphs.is_identical(), self.codepoints.is_identical()) {
            (true, true) => Verdict::Identical,
            (true, false) => Verdict::SameGlyphSet,
            _ => Verdict::Different,
        }
    }
}

/// Compare `variable` with the union of `statics` (named by weight).
pub fn compare<S: AsRef<str>>(
    variable: &FontCoverage,
    statics: &[(S, FontCoverage)],
) -> CoverageComparison {
    let static_glyphs: BTreeSet<String> =
        statics.iter().flat_map(|(_, font)| font.glyphs.iter().cloned()).collect();
    let static_codepoints: BTreeSet<u32> =
        statics.iter().flat_map(|(_, font)| font.codepoints.iter().copied()).collect();

    let weights = statics
        .iter()
        .map(|(name, font)| WeightCoverage {
            name: name.as_ref().to_owned(),
            glyphs: font.glyphs.len(),
            codepoints: font.codepoints.len(),
            coverage_percent: percent(
                variable.glyphs.intersection(&font.glyphs).count(),
                variable.glyphs.len(),
            ),
            missing: variable.glyphs.difference(&font.glyphs).count(),
            extra: font.glyphs.difference(&variable.glyphs).count(),
        })
        .collect();

    CoverageComparison {
        glyphs: SetComparison::new(&variable.glyphs, &static_glyphs),
        codepoints: SetComparison::new(&variable.codepoints, &static_codepoints),
        weights,
    }
}

/// A codepoint as `U+0628 (ب)`, or `U+1EE00` outside the BMP.
pub struct Codepoint(pub u32);

impl Display for Codepoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cp = self.0;
        match char::from_u32(cp) {
            Some(c) if cp < 0x10000 => write!(f, "U+{cp:04X} ({c})"),
            _ if cp < 0x10000 => write!(f, "U+{cp:04X}"),
            _ => write!(f, "U+{cp:05X}"),
        }
    }
}

/// The first `limit` items joined with `, `, and whether the list was cut short.
pub fn preview<T, I>(items: I, limit: usize) -> (String, bool)
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let mut iter = items.into_iter();
    let shown: Vec<String> = iter.by_ref().take(limit).map(|item| item.to_string()).collect();
    (shown.join(", "), iter.next().is_some())
}
