//! Mutation records produced by reconciliation.

use std::fmt::{Display, Formatter, Result};

/// A single mutation applied to one glyph in one master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// One component reference was removed.
    ComponentRemoved { glyph: String, master: String, base: String },
    /// Components left over after individual removal were cleared in bulk.
    ComponentsCleared { glyph: String, master: String, count: usize },
    /// An anchor absent from at least one other master was removed.
    /// `None` stands for an unnamed anchor.
    AnchorRemoved { glyph: String, master: String, anchor: Option<String> },
}

impl Change {
    pub fn glyph(&self) -> &str {
        match self {
            Change::ComponentRemoved { glyph, .. }
            | Change::ComponentsCleared { glyph, .. }
            | Change::AnchorRemoved { glyph, .. } => glyph,
        }
    }

    pub fn master(&self) -> &str {
        match self {
            Change::ComponentRemoved { master, .. }
            | Change::ComponentsCleared { master, .. }
            | Change::AnchorRemoved { master, .. } => master,
        }
    }

    pub fn is_component_change(&self) -> bool {
        !matches!(self, Change::AnchorRemoved { .. })
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Change::ComponentRemoved { glyph, master, base } => {
                write!(f, "{glyph}: decomposed component '{base}' in {master}")
            }
            Change::ComponentsCleared { glyph, master, count } => {
                write!(f, "{glyph}: cleared {count} remaining components in {master}")
            }
            Change::AnchorRemoved { glyph, master, anchor: Some(anchor) } => {
                write!(f, "{glyph}: removed anchor '{anchor}' from {master}")
            }
            Change::AnchorRemoved { glyph, master, anchor: None } => {
                write!(f, "{glyph}: removed unnamed anchor from {master}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_component_removed() {
        let change = Change::ComponentRemoved {
            glyph: "uni0622".into(),
            master: "Sahel-Bold.ufo".into(),
            base: "uni0627".into(),
        };
        assert_eq!(change.to_string(), "uni0622: decomposed component 'uni0627' in Sahel-Bold.ufo");
        assert!(change.is_component_change());
    }

    #[test]
    fn test_display_unnamed_anchor() {
        let change = Change::AnchorRemoved {
            glyph: "NameMe.303".into(),
            master: "Sahel.ufo".into(),
            anchor: None,
        };
        assert_eq!(change.to_string(), "NameMe.303: removed unnamed anchor from Sahel.ufo");
        assert_eq!(change.glyph(), "NameMe.303");
        assert_eq!(change.master(), "Sahel.ufo");
        assert!(!change.is_component_change());
    }
}
