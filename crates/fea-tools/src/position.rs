//! Simplify pair positioning rules in a feature file.

use std::{
    borrow::Cow,
    fs::{read_to_string, write},
    io::ErrorKind,
    path::Path,
};

use crate::{Error, Result};

/// Trailing value record of a positioning rule that moves nothing.
const EMPTY_VALUE_RECORD: &str = "< 0 0 0 0 >;";

/// Token count of the two-glyph, two-value-record rules that get simplified.
const PAIR_RULE_TOKENS: usize = 11;

/// Fix one line of feature code (including its line ending, if any).
///
/// Only lines starting with `pos uni` are touched:
/// - rules ending in an empty value record are dropped (`None`);
/// - rules of exactly 11 tokens keep the command, both glyphs and the last
///   four tokens, and end with a newline;
/// - anything else is returned unchanged.
pub fn fix_line(line: &str) -> Option<Cow<'_, str>> {
    let trimmed = line.trim();
    if !trimmed.starts_with("pos uni") {
        return Some(Cow::Borrowed(line));
    }
    if trimmed.ends_with(EMPTY_VALUE_RECORD) {
        return None;
    }

    let parts: Vec<&str> = trimmed.split(' ').filter(|part| !part.is_empty()).collect();
    if parts.len() != PAIR_RULE_TOKENS {
        return Some(Cow::Borrowed(line));
    }

    let mut fixed = [parts[0], parts[1], parts[6]].join(" ");
    for part in &parts[PAIR_RULE_TOKENS - 4..] {
        fixed.push(' ');
        fixed.push_str(part);
    }
    fixed.push('\n');
    Some(Cow::Owned(fixed))
}

/// A rewritten feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    pub content: String,
    pub lines: usize,
    pub removed: usize,
}

/// Apply [`fix_line`] to every line of `content`.
pub fn simplify_positioning(content: &str) -> Simplified {
    let mut fixed = String::with_capacity(content.len());
    let mut lines = 0;
    let mut removed = 0;

    for line in content.split_inclusive('\n') {
        lines += 1;
        match fix_line(line) {
            Some(line) => fixed.push_str(&line),
            None => removed += 1,
        }
    }

    Simplified { content: fixed, lines, removed }
}

/// Read `input`, simplify its positioning rules and write the result to `output`.
pub fn simplify_positioning_file(input: &Path, output: &Path) -> Result<Simplified> {
    let content = read_to_string(input).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::FeaturesNotFound(input.to_path_buf()),
        _ => Error::Read { path: input.to_path_buf(), source },
    })?;

    let simplified = simplify_positioning(&content);
    write(output, &simplified.content)
        .map_err(|source| Error::Write { path: output.to_path_buf(), source })?;
    Ok(simplified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_lines_untouched() {
        for line in ["feature kern {\n", "  sub uni0628 by uni0628.fina;\n", "pos A B -20;\n", ""] {
            assert_eq!(fix_line(line).as_deref(), Some(line));
        }
    }

    #[test]
    fn test_empty_value_record_dropped() {
        assert_eq!(fix_line("    pos uni0628 uni0645 < 0 0 0 0 >;\n"), None);
    }

    #[test]
    fn test_pair_rule_simplified() {
        let line = "  pos uni0628 <0 0 0 0> uni0645 <10 0 20 0>;\n";
        assert_eq!(fix_line(line).as_deref(), Some("pos uni0628 uni0645 <10 0 20 0>;\n"));
    }

    #[test]
    fn test_unexpected_token_count_untouched() {
        let line = "pos uni0628 uni0645 <10 0 20 0>;\n";
        assert_eq!(fix_line(line).as_deref(), Some(line));
    }

    #[test]
    fn test_simplify_counts_removed_rules() {
        let fea = "feature kern {\n    pos uni0628 uni0645 < 0 0 0 0 >;\n    pos uni0628 <0 0 0 0> uni0645 <10 0 20 0>;\n} kern;";
        let simplified = simplify_positioning(fea);
        assert_eq!(simplified.lines, 4);
        assert_eq!(simplified.removed, 1);
        assert_eq!(simplified.content, "feature kern {\npos uni0628 uni0645 <10 0 20 0>;\n} kern;");
    }
}
