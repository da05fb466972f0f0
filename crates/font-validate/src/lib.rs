//! Structural validation of compiled fonts.
//!
//! Each font goes through the same checks, stopping at the first failure:
//! the file exists, its size is plausible, it parses as an sfnt, and it carries
//! the tables every TrueType font needs. Variable fonts additionally get
//! warnings for missing variation tables.

use std::{
    fmt::{Display, Formatter},
    fs::read,
    io,
    path::{Path, PathBuf},
};

use log::debug;
use rayon::prelude::*;
use read_fonts::{FontRef, ReadError, types::Tag};

/// Tables every static or variable TrueType font must have.
pub const REQUIRED_TABLES: [Tag; 9] = [
    Tag::new(b"head"),
    Tag::new(b"hhea"),
    Tag::new(b"maxp"),
    Tag::new(b"post"),
    Tag::new(b"name"),
    Tag::new(b"cmap"),
    Tag::new(b"glyf"),
    Tag::new(b"loca"),
    Tag::new(b"hmtx"),
];

/// Tables a variable font is expected to have; missing ones only warn.
pub const VARIABLE_TABLES: [Tag; 3] = [Tag::new(b"fvar"), Tag::new(b"gvar"), Tag::new(b"HVAR")];

/// Accepted file size range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationOptions {
    pub min_kb: f64,
    pub max_kb: f64,
}

impl ValidationOptions {
    pub const DEFAULT: Self = Self { min_kb: 10.0, max_kb: 500.0 };

    pub fn size_status(&self, size_kb: f64) -> SizeStatus {
        if size_kb < self.min_kb {
            SizeStatus::TooSmall
        } else if size_kb > self.max_kb {
            SizeStatus::TooLarge
        } else {
            SizeStatus::Ok
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeStatus {
    TooSmall,
    Ok,
    TooLarge,
}

impl Display for SizeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SizeStatus::TooSmall => "too small",
            SizeStatus::Ok => "ok",
            SizeStatus::TooLarge => "too large",
        })
    }
}

/// The check a font failed.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("file not found")]
    NotFound,

    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("file size: {size_kb:.1} KB ({status})")]
    Size { size_kb: f64, status: SizeStatus },

    #[error("font structure validation failed: {0}")]
    Structure(#[from] ReadError),

    #[error("missing required tables: {}", join_tags(.0))]
    MissingTables(Vec<Tag>),
}

fn join_tags(tags: &[Tag]) -> String {
    tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Outcome of validating one font file.
#[derive(Debug)]
pub struct Validation {
    pub name: String,
    pub is_variable: bool,
    /// Size in KiB, once the file could be read.
    pub size_kb: Option<f64>,
    /// Table tags, once the font parsed.
    pub tables: Vec<Tag>,
    /// Variation tables a variable font lacks.
    pub missing_variable_tables: Vec<Tag>,
    pub failure: Option<Failure>,
}

impl Validation {
    fn new(name: impl Into<String>, is_variable: bool) -> Self {
        Self {
            name: name.into(),
            is_variable,
            size_kb: None,
            tables: Vec::new(),
            missing_variable_tables: Vec::new(),
            failure: None,
        }
    }

    fn fail(mut self, failure: impl Into<Failure>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Fonts whose file name contains `VF` are treated as variable.
pub fn is_variable_name(name: &str) -> bool {
    name.contains("VF")
}

/// Validate font bytes already in memory.
pub fn validate_data(
    name: &str,
    data: &[u8],
    is_variable: bool,
    options: &ValidationOptions,
) -> Validation {
    let mut validation = Validation::new(name, is_variable);

    let size_kb = data.len() as f64 / 1024.0;
    validation.size_kb = Some(size_kb);
    let status = options.size_status(size_kb);
    if status != SizeStatus::Ok {
        return validation.fail(Failure::Size { size_kb, status });
    }

    let font = match FontRef::new(data) {
        Ok(font) => font,
        Err(e) => return validation.fail(e),
    };
    validation.tables =
        font.table_directory.table_records().iter().map(|record| record.tag()).collect();
    debug!("{name}: {} tables", validation.tables.len());

    if is_variable {
        validation.missing_variable_tables = VARIABLE_TABLES
            .into_iter()
            .filter(|tag| !validation.tables.contains(tag))
            .collect();
    }

    let missing: Vec<Tag> =
        REQUIRED_TABLES.into_iter().filter(|tag| !validation.tables.contains(tag)).collect();
    if !missing.is_empty() {
        return validation.fail(Failure::MissingTables(missing));
    }

    validation
}

/// Validate a font file on disk.
pub fn validate_file(path: &Path, options: &ValidationOptions) -> Validation {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let is_variable = is_variable_name(&name);

    if !path.exists() {
        return Validation::new(name, is_variable).fail(Failure::NotFound);
    }
    match read(path) {
        Ok(data) => validate_data(&name, &data, is_variable, options),
        Err(e) => Validation::new(name, is_variable).fail(e),
    }
}

/// Validate many files in parallel. Results come back in input order.
pub fn validate_files(paths: &[PathBuf], options: &ValidationOptions) -> Vec<Validation> {
    paths.par_iter().map(|path| validate_file(path, options)).collect()
}

/// Pass/fail tally over a batch of validations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: Vec<String>,
}

impl Summary {
    pub fn new(validations: &[Validation]) -> Self {
        let failed: Vec<String> =
            validations.iter().filter(|v| !v.passed()).map(|v| v.name.clone()).collect();
        Self { total: validations.len(), passed: validations.len() - failed.len(), failed }
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }
}
