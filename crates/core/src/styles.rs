//! Static weights shipped alongside the variable font.

/// A static instance and the file it is compiled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub name: &'static str,
    pub file_name: &'static str,
}

impl Style {
    pub const fn new(name: &'static str, file_name: &'static str) -> Self {
        Self { name, file_name }
    }
}

pub const STATIC_STYLES: &[Style] = &[
    Style::new("Light", "Sahel-Light.ttf"),
    Style::new("Regular", "Sahel.ttf"),
    Style::new("SemiBold", "Sahel-SemiBold.ttf"),
    Style::new("Bold", "Sahel-Bold.ttf"),
    Style::new("Black", "Sahel-Black.ttf"),
];

/// Owned `(weight name, file name)` pairs for the default static styles.
pub fn default_statics() -> Vec<(String, String)> {
    STATIC_STYLES
        .iter()
        .map(|style| (style.name.to_owned(), style.file_name.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_is_unsuffixed() {
        let regular = STATIC_STYLES.iter().find(|s| s.name == "Regular").unwrap();
        assert_eq!(regular.file_name, "Sahel.ttf");
    }

    #[test]
    fn test_default_statics_keep_order() {
        let names: Vec<String> = default_statics().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Light", "Regular", "SemiBold", "Bold", "Black"]);
    }
}
