use std::collections::BTreeMap;

use read_fonts::tables::cmap::Cmap as ReadCmap;
use write_fonts::tables::cmap::{
    Cmap, Cmap12, CmapSubtable, EncodingRecord, PlatformId, SequentialMapGroup,
};

/// Every codepoint mapped by any subtable. Later subtables win.
pub fn mappings(cmap: &ReadCmap) -> BTreeMap<u32, u32> {
    let mut mappings = BTreeMap::new();
    for record in cmap.encoding_records() {
        if let Ok(subtable) = record.subtable(cmap.offset_data()) {
            mappings.extend(subtable.iter().map(|(codepoint, gid)| (codepoint, gid.to_u32())));
        }
    }
    mappings
}

/// Build a format 12 cmap under both the Unicode and Windows platforms.
pub fn build(mappings: &BTreeMap<u32, u32>) -> Cmap {
    let cmap12 = Cmap12 { language: 0, groups: sequential_groups(mappings) };
    Cmap::new(vec![
        EncodingRecord::new(PlatformId::Unicode, 4, CmapSubtable::Format12(cmap12.clone())),
        EncodingRecord::new(PlatformId::Windows, 10, CmapSubtable::Format12(cmap12)),
    ])
}

/// Runs of consecutive codepoints mapped to consecutive glyph ids.
fn sequential_groups(mappings: &BTreeMap<u32, u32>) -> Vec<SequentialMapGroup> {
    let mut groups = Vec::new();
    let mut run: Option<(u32, u32, u32)> = None;

    for (&codepoint, &gid) in mappings {
        run = match run {
            Some((start, end, start_gid))
                if codepoint == end + 1 && gid == start_gid + (codepoint - start) =>
            {
                Some((start, codepoint, start_gid))
            }
            Some((start, end, start_gid)) => {
                groups.push(SequentialMapGroup::new(start, end, start_gid));
                Some((codepoint, codepoint, gid))
            }
            None => Some((codepoint, codepoint, gid)),
        };
    }
    if let Some((start, end, start_gid)) = run {
        groups.push(SequentialMapGroup::new(start, end, start_gid));
    }
    groups
}
