//! Loading and saving the set of UFO masters.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info};
use norad::{Font, Glyph};

use crate::{Error, Result};

/// One UFO master: a font source for a single weight, loaded into memory.
#[derive(Debug)]
pub struct Master {
    name: String,
    path: PathBuf,
    font: Font,
    modified: bool,
}

impl Master {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, font: Font) -> Self {
        Self { name: name.into(), path: path.into(), font, modified: false }
    }

    /// Load a master from a UFO directory. The master is named after the directory.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::MasterNotFound(path));
        }
        let font = Font::load(&path).map_err(|source| Error::Load { path: path.clone(), source })?;
        Ok(Self::new(master_name(&path), path, font))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a glyph in the default layer.
    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.font.default_layer().get_glyph(name)
    }

    pub(crate) fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.font.default_layer_mut().get_glyph_mut(name)
    }

    /// Whether reconciliation changed anything in this master.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Write the master back to the directory it was loaded from.
    pub fn save(&self) -> Result<()> {
        self.font
            .save(&self.path)
            .map_err(|source| Error::Save { path: self.path.clone(), source })
    }
}

fn master_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// What happened to one master when saving.
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    Unchanged,
    Failed(Error),
}

/// Per-master outcome of [`MasterSet::save_modified`], in master order.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub results: Vec<(String, SaveStatus)>,
}

impl SaveReport {
    pub fn saved(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|(_, status)| matches!(status, SaveStatus::Saved))
            .map(|(name, _)| name.as_str())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.results.iter().filter_map(|(name, status)| match status {
            SaveStatus::Failed(e) => Some((name.as_str(), e)),
            _ => None,
        })
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Collapse the report into an error naming every master that failed to save.
    pub fn into_result(self) -> Result<()> {
        let total = self.results.len();
        let failed: Vec<String> = self.failed().map(|(name, _)| name.to_owned()).collect();
        if failed.is_empty() { Ok(()) } else { Err(Error::SaveBatch { failed, total }) }
    }
}

/// The masters taking part in one reconciliation run, in the order given.
#[derive(Debug, Default)]
pub struct MasterSet {
    masters: IndexMap<String, Master>,
}

impl MasterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every master, failing before anything is loaded if a path is missing.
    pub fn load<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if let Some(missing) = paths.iter().find(|path| !path.exists()) {
            return Err(Error::MasterNotFound(missing.clone()));
        }

        let mut set = Self::new();
        for path in paths {
            info!("Loading {}", path.display());
            set.insert(Master::load(path)?);
        }
        Ok(set)
    }

    /// Add a master. A name collision falls back to keying by full path.
    pub fn insert(&mut self, master: Master) {
        let key = if self.masters.contains_key(master.name()) {
            master.path().display().to_string()
        } else {
            master.name().to_owned()
        };
        self.masters.insert(key, master);
    }

    pub fn get(&self, name: &str) -> Option<&Master> {
        self.masters.get(name)
    }

    pub fn len(&self) -> usize {
        self.masters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Master> {
        self.masters.values()
    }

    /// Masters with the key they are reported under.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Master)> {
        self.masters.iter_mut().map(|(key, master)| (key.as_str(), master))
    }

    /// Save every modified master. A failed save does not stop the others, and
    /// masters saved before it stay saved.
    pub fn save_modified(&self) -> SaveReport {
        let results = self
            .masters
            .iter()
            .map(|(key, master)| {
                let status = if !master.is_modified() {
                    debug!("{} unchanged, not saving", master.name());
                    SaveStatus::Unchanged
                } else {
                    match master.save() {
                        Ok(()) => SaveStatus::Saved,
                        Err(e) => SaveStatus::Failed(e),
                    }
                };
                (key.clone(), status)
            })
            .collect();
        SaveReport { results }
    }
}
