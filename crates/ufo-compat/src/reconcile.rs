//! Component and anchor reconciliation across masters.

use std::collections::BTreeSet;

use log::{debug, info, warn};
use norad::Glyph;

use crate::{Change, MasterSet};

/// Glyph names known to be incompatible across masters, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlaggedGlyphs {
    /// Glyphs whose component references differ; decomposed everywhere.
    pub components: Vec<String>,
    /// Glyphs whose anchor sets differ; reduced to the common anchors.
    pub anchors: Vec<String>,
}

impl FlaggedGlyphs {
    pub fn new<C, A, S>(components: C, anchors: A) -> Self
    where
        C: IntoIterator<Item = S>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
            anchors: anchors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.anchors.is_empty()
    }
}

/// Remove every component from `glyph_name` in every master that has it.
///
/// Components are removed one at a time, each producing a
/// [`Change::ComponentRemoved`]. Anything still left afterwards is cleared in
/// one step. Returns whether any master changed.
pub fn decompose_components(
    masters: &mut MasterSet,
    glyph_name: &str,
    changes: &mut Vec<Change>,
) -> bool {
    let mut fixed = false;

    for (key, master) in masters.iter_mut() {
        let master_name = key.to_owned();
        let Some(glyph) = master.glyph_mut(glyph_name) else {
            continue;
        };
        if glyph.components.is_empty() {
            continue;
        }

        let bases: Vec<String> =
            glyph.components.iter().map(|component| component.base.to_string()).collect();
        for base in bases {
            let Some(index) =
                glyph.components.iter().position(|component| component.base.as_str() == base)
            else {
                continue;
            };
            glyph.components.remove(index);
            debug!("Decomposed component '{base}' of {glyph_name} in {master_name}");
            changes.push(Change::ComponentRemoved {
                glyph: glyph_name.to_owned(),
                master: master_name.clone(),
                base,
            });
        }

        if !glyph.components.is_empty() {
            let count = glyph.components.len();
            warn!("Clearing {count} remaining components of {glyph_name} in {master_name}");
            glyph.components.clear();
            changes.push(Change::ComponentsCleared {
                glyph: glyph_name.to_owned(),
                master: master_name.clone(),
                count,
            });
        }

        master.mark_modified();
        fixed = true;
    }

    fixed
}

fn anchor_names(glyph: &Glyph) -> BTreeSet<Option<String>> {
    glyph.anchors.iter().map(|anchor| anchor.name.as_ref().map(ToString::to_string)).collect()
}

/// Names of the anchors `glyph_name` carries in every master that contains it.
///
/// Returns `None` when no master contains the glyph. An unnamed anchor is
/// represented as `None` inside the set.
pub fn common_anchors(masters: &MasterSet, glyph_name: &str) -> Option<BTreeSet<Option<String>>> {
    let per_master: Vec<BTreeSet<Option<String>>> =
        masters.iter().filter_map(|master| master.glyph(glyph_name)).map(anchor_names).collect();
    if per_master.is_empty() {
        return None;
    }

    let all: BTreeSet<Option<String>> = per_master.iter().flatten().cloned().collect();
    Some(all.into_iter().filter(|name| per_master.iter().all(|names| names.contains(name))).collect())
}

/// Drop anchors of `glyph_name` that are not present in every master containing it.
///
/// Retained anchors keep their coordinates. Returns whether any master changed.
pub fn intersect_anchors(
    masters: &mut MasterSet,
    glyph_name: &str,
    changes: &mut Vec<Change>,
) -> bool {
    let Some(common) = common_anchors(masters, glyph_name) else {
        return false;
    };
    let mut fixed = false;

    for (key, master) in masters.iter_mut() {
        let master_name = key.to_owned();
        let Some(glyph) = master.glyph_mut(glyph_name) else {
            continue;
        };

        let mut removed = Vec::new();
        glyph.anchors.retain(|anchor| {
            let name = anchor.name.as_ref().map(ToString::to_string);
            if common.contains(&name) {
                true
            } else {
                removed.push(name);
                false
            }
        });
        if removed.is_empty() {
            continue;
        }

        for anchor in removed {
            debug!("Removed anchor {anchor:?} of {glyph_name} from {master_name}");
            changes.push(Change::AnchorRemoved {
                glyph: glyph_name.to_owned(),
                master: master_name.clone(),
                anchor,
            });
        }
        master.mark_modified();
        fixed = true;
    }

    fixed
}

/// Apply component decomposition, then anchor intersection, for every flagged glyph.
///
/// Glyphs missing from every master are skipped. Returns the changes in the
/// order they were made.
pub fn reconcile(masters: &mut MasterSet, flagged: &FlaggedGlyphs) -> Vec<Change> {
    let mut changes = Vec::new();

    for glyph_name in &flagged.components {
        info!("Fixing glyph '{glyph_name}': decomposing all components");
        if !decompose_components(masters, glyph_name, &mut changes) {
            debug!("No components to decompose in '{glyph_name}'");
        }
    }

    for glyph_name in &flagged.anchors {
        info!("Fixing anchors in glyph '{glyph_name}'");
        if !intersect_anchors(masters, glyph_name, &mut changes) {
            debug!("Anchors of '{glyph_name}' already agree");
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::fixture::{TestGlyph, glyph, write_ufo};

    fn components(masters: &MasterSet, master: &str, glyph: &str) -> Vec<String> {
        masters
            .get(master)
            .and_then(|m| m.glyph(glyph))
            .map(|g| g.components.iter().map(|c| c.base.to_string()).collect())
            .unwrap_or_default()
    }

    fn anchors(masters: &MasterSet, master: &str, glyph: &str) -> Vec<String> {
        masters
            .get(master)
            .and_then(|m| m.glyph(glyph))
            .map(|g| g.anchors.iter().filter_map(|a| a.name.as_ref().map(|n| n.to_string())).collect())
            .unwrap_or_default()
    }

    fn load(dir: &TempDir, sources: Vec<(&str, Vec<TestGlyph>)>) -> MasterSet {
        let paths: Vec<_> = sources
            .into_iter()
            .map(|(name, glyphs)| write_ufo(dir.path(), name, &glyphs).unwrap())
            .collect();
        MasterSet::load(paths).unwrap()
    }

    fn bases() -> Vec<TestGlyph> {
        vec![glyph("alef"), glyph("madda"), glyph("hamza")]
    }

    #[test]
    fn test_decompose_removes_every_component() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![
                ("A.ufo", [bases(), vec![glyph("uni0622").components(&["alef", "madda"])]].concat()),
                ("B.ufo", [bases(), vec![glyph("uni0622").components(&["alef"])]].concat()),
                ("C.ufo", [bases(), vec![glyph("uni0622")]].concat()),
            ],
        );

        let mut changes = Vec::new();
        assert!(decompose_components(&mut masters, "uni0622", &mut changes));

        for master in ["A.ufo", "B.ufo", "C.ufo"] {
            assert!(components(&masters, master, "uni0622").is_empty());
        }
        assert_eq!(changes.len(), 3);
        assert_eq!(changes.iter().filter(|c| c.master() == "A.ufo").count(), 2);
        assert_eq!(changes.iter().filter(|c| c.master() == "B.ufo").count(), 1);
        assert!(changes.iter().all(|c| matches!(c, Change::ComponentRemoved { .. })));
        assert_eq!(
            changes[0],
            Change::ComponentRemoved {
                glyph: "uni0622".into(),
                master: "A.ufo".into(),
                base: "alef".into(),
            }
        );

        assert!(masters.get("A.ufo").unwrap().is_modified());
        assert!(masters.get("B.ufo").unwrap().is_modified());
        assert!(!masters.get("C.ufo").unwrap().is_modified());
    }

    #[test]
    fn test_decompose_duplicate_components() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![("A.ufo", [bases(), vec![glyph("uniFB58").components(&["alef", "alef"])]].concat())],
        );

        let mut changes = Vec::new();
        decompose_components(&mut masters, "uniFB58", &mut changes);
        assert!(components(&masters, "A.ufo", "uniFB58").is_empty());
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_decompose_absent_glyph_is_noop() {
        let dir = tempdir().unwrap();
        let mut masters = load(&dir, vec![("A.ufo", bases()), ("B.ufo", bases())]);

        let mut changes = Vec::new();
        assert!(!decompose_components(&mut masters, "uni0623", &mut changes));
        assert!(changes.is_empty());
        assert!(masters.iter().all(|m| !m.is_modified()));
    }

    #[test]
    fn test_changes_name_masters_by_set_key() {
        let dir = tempdir().unwrap();
        let flagged = |anchors: &[&str]| {
            [bases(), vec![glyph("uni0622").components(&["alef"]).anchors(anchors)]].concat()
        };
        let first = write_ufo(&dir.path().join("one"), "Sahel.ufo", &flagged(&["top", "bottom"])).unwrap();
        let second = write_ufo(&dir.path().join("two"), "Sahel.ufo", &flagged(&["top"])).unwrap();
        let second_key = second.display().to_string();
        let mut masters = MasterSet::load([first, second]).unwrap();

        let mut changes = Vec::new();
        decompose_components(&mut masters, "uni0622", &mut changes);
        intersect_anchors(&mut masters, "uni0622", &mut changes);

        assert_eq!(
            changes,
            [
                Change::ComponentRemoved {
                    glyph: "uni0622".into(),
                    master: "Sahel.ufo".into(),
                    base: "alef".into()
                },
                Change::ComponentRemoved {
                    glyph: "uni0622".into(),
                    master: second_key.clone(),
                    base: "alef".into()
                },
                Change::AnchorRemoved {
                    glyph: "uni0622".into(),
                    master: "Sahel.ufo".into(),
                    anchor: Some("bottom".into())
                },
            ]
        );
        assert!(changes.iter().all(|c| masters.get(c.master()).is_some()));
        assert!(components(&masters, &second_key, "uni0622").is_empty());
    }

    #[test]
    fn test_anchor_intersection() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![
                ("A.ufo", vec![glyph("NameMe.303").anchors(&["top", "bottom"])]),
                ("B.ufo", vec![glyph("NameMe.303").anchors(&["top"])]),
            ],
        );

        let mut changes = Vec::new();
        assert!(intersect_anchors(&mut masters, "NameMe.303", &mut changes));

        assert_eq!(anchors(&masters, "A.ufo", "NameMe.303"), ["top"]);
        assert_eq!(anchors(&masters, "B.ufo", "NameMe.303"), ["top"]);
        assert_eq!(
            changes,
            [Change::AnchorRemoved {
                glyph: "NameMe.303".into(),
                master: "A.ufo".into(),
                anchor: Some("bottom".into()),
            }]
        );
        assert!(!masters.get("B.ufo").unwrap().is_modified());
    }

    #[test]
    fn test_anchor_intersection_ignores_masters_without_glyph() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![
                ("A.ufo", vec![glyph("x").anchors(&["top", "bottom", "exit"])]),
                ("B.ufo", vec![glyph("y")]),
                ("C.ufo", vec![glyph("x").anchors(&["exit", "top", "entry"])]),
            ],
        );

        let common = common_anchors(&masters, "x").unwrap();
        assert_eq!(common, BTreeSet::from([Some("exit".to_string()), Some("top".to_string())]));

        let mut changes = Vec::new();
        intersect_anchors(&mut masters, "x", &mut changes);
        assert_eq!(anchors(&masters, "A.ufo", "x"), ["top", "exit"]);
        assert_eq!(anchors(&masters, "C.ufo", "x"), ["exit", "top"]);
        assert_eq!(changes.len(), 2);
        assert!(common_anchors(&masters, "missing").is_none());
    }

    #[test]
    fn test_reconcile_leaves_other_glyphs_alone() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![
                (
                    "A.ufo",
                    [
                        bases(),
                        vec![
                            glyph("uni0622").components(&["alef", "madda"]),
                            glyph("uni0624").components(&["alef", "hamza"]).anchors(&["top", "bottom"]),
                            glyph("NameMe.303").anchors(&["top", "bottom"]),
                        ],
                    ]
                    .concat(),
                ),
                (
                    "B.ufo",
                    [
                        bases(),
                        vec![
                            glyph("uni0622").components(&["alef"]),
                            glyph("uni0624").components(&["hamza"]).anchors(&["top"]),
                            glyph("NameMe.303").anchors(&["top"]),
                        ],
                    ]
                    .concat(),
                ),
            ],
        );

        let flagged = FlaggedGlyphs::new(["uni0622", "uniFE91"], ["NameMe.303"]);
        let changes = reconcile(&mut masters, &flagged);

        assert_eq!(changes.len(), 4);
        assert!(changes[..3].iter().all(Change::is_component_change));
        assert!(!changes[3].is_component_change());
        assert_eq!(components(&masters, "A.ufo", "uni0624"), ["alef", "hamza"]);
        assert_eq!(components(&masters, "B.ufo", "uni0624"), ["hamza"]);
        assert_eq!(anchors(&masters, "A.ufo", "uni0624"), ["top", "bottom"]);
    }

    #[test]
    fn test_reconcile_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut masters = load(
            &dir,
            vec![
                ("A.ufo", [bases(), vec![glyph("uni0622").components(&["alef"]).anchors(&["top"])]].concat()),
                ("B.ufo", [bases(), vec![glyph("uni0622").anchors(&["top", "bottom"])]].concat()),
            ],
        );
        let flagged = FlaggedGlyphs::new(["uni0622"], ["uni0622"]);

        assert_eq!(reconcile(&mut masters, &flagged).len(), 2);
        let after_first = (components(&masters, "B.ufo", "uni0622"), anchors(&masters, "B.ufo", "uni0622"));

        assert!(reconcile(&mut masters, &flagged).is_empty());
        let after_second = (components(&masters, "B.ufo", "uni0622"), anchors(&masters, "B.ufo", "uni0622"));
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_flagged_glyphs_empty() {
        assert!(FlaggedGlyphs::default().is_empty());
        assert!(!FlaggedGlyphs::new(Vec::<String>::new(), ["NameMe.303".to_string()]).is_empty());
    }
}
