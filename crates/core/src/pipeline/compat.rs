use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use ufo_compat::{FlaggedGlyphs, MasterSet, SaveStatus, reconcile};

use crate::report;

/// Outcome of a compatibility run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CompatSummary {
    pub changes: usize,
    pub saved: Vec<String>,
}

/// Reconcile `masters` for the flagged glyphs and save the ones that changed.
///
/// With `dry_run` the changes are reported but nothing is written.
pub fn fix_compatibility(
    masters: &[PathBuf],
    flagged: &FlaggedGlyphs,
    dry_run: bool,
) -> Result<CompatSummary> {
    report::header("Fixing master compatibility");

    let mut set = MasterSet::load(masters).context("Failed to load masters")?;
    report::success(format!("Loaded {} masters", set.len()));

    report::section("Changes");
    let changes = reconcile(&mut set, flagged);
    for change in &changes {
        println!("  {change}");
    }
    if changes.is_empty() {
        report::info("Masters already compatible, nothing to change");
        return Ok(CompatSummary::default());
    }

    let mut summary = CompatSummary { changes: changes.len(), saved: Vec::new() };
    if dry_run {
        report::info(format!("Dry run: {} changes not saved", changes.len()));
        return Ok(summary);
    }

    report::section("Saving");
    let save = set.save_modified();
    for (name, status) in &save.results {
        match status {
            SaveStatus::Saved => {
                report::success(format!("Saved {name}"));
                summary.saved.push(name.clone());
            }
            SaveStatus::Unchanged => info!("{name} unchanged"),
            SaveStatus::Failed(e) => report::failure(format!("{name}: {e}")),
        }
    }
    save.into_result().context("Failed to save masters")?;

    report::success(format!("{} changes across {} masters", summary.changes, summary.saved.len()));
    Ok(summary)
}
