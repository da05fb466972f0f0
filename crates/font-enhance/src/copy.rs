//! Copy glyphs a variable font lacks from a static instance.

use std::collections::{BTreeSet, HashMap};

use font_coverage::glyph_order;
use log::{debug, info};
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor as ReadAnchor, Glyph as ReadGlyph},
    types::{GlyphId, Tag},
};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, GlyfLocaBuilder,
            Glyph, SimpleGlyph, Transform,
        },
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        post::Post,
    },
    types::GlyphId16,
};

use crate::{Error, Result, cmap, gvar};

const GVAR: Tag = Tag::new(b"gvar");

const REPLACED_TABLES: [Tag; 9] = [
    Tag::new(b"glyf"),
    Tag::new(b"loca"),
    Tag::new(b"hmtx"),
    Tag::new(b"hhea"),
    Tag::new(b"head"),
    Tag::new(b"maxp"),
    Tag::new(b"cmap"),
    Tag::new(b"post"),
    GVAR,
];

/// Per-glyph tables that would no longer match the glyph count.
const REMOVED_TABLES: [Tag; 3] = [Tag::new(b"hdmx"), Tag::new(b"LTSH"), Tag::new(b"DSIG")];

/// Result of copying missing glyphs into a variable font.
#[derive(Debug, Clone)]
pub struct Enhanced {
    /// The rewritten font. Unchanged input when nothing was missing.
    pub data: Vec<u8>,
    /// Names of the appended glyphs, in their new glyph id order.
    pub added: Vec<String>,
    /// Codepoints now mapped to an appended glyph.
    pub codepoints: usize,
}

impl Enhanced {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
    }
}

/// Names in `source` that `variable` does not have, sorted.
pub fn missing_glyphs(variable: &FontRef, source: &FontRef) -> Vec<String> {
    let present: BTreeSet<String> = glyph_order(variable).into_iter().collect();
    let missing: BTreeSet<String> =
        glyph_order(source).into_iter().filter(|name| !present.contains(name)).collect();
    missing.into_iter().collect()
}

/// Append every glyph of `source` missing from `variable`.
///
/// Outlines, horizontal metrics and character mappings of the missing glyphs
/// are copied. The new glyphs get no variations, so they keep the static
/// shape at every location. Hinting instructions of copied glyphs are dropped
/// because they refer to the static font's programs.
pub fn copy_missing_glyphs(variable: &[u8], source: &[u8]) -> Result<Enhanced> {
    let vf = FontRef::new(variable)?;
    let src = FontRef::new(source)?;

    let added = missing_glyphs(&vf, &src);
    info!("{} glyphs missing from the variable font", added.len());
    if added.is_empty() {
        return Ok(Enhanced { data: variable.to_vec(), added, codepoints: 0 });
    }

    let vf_order = glyph_order(&vf);
    let src_order = glyph_order(&src);
    let total = vf_order.len() + added.len();
    let num_glyphs = u16::try_from(total).map_err(|_| Error::TooManyGlyphs(total))?;

    let new_gid: HashMap<&str, u16> = vf_order
        .iter()
        .chain(&added)
        .enumerate()
        .map(|(gid, name)| (name.as_str(), gid as u16))
        .collect();
    // Static glyph id to glyph id in the enhanced font.
    let src_to_new: Vec<u16> =
        src_order.iter().map(|name| new_gid.get(name.as_str()).copied().unwrap_or(0)).collect();
    let src_gid: HashMap<&str, u32> =
        src_order.iter().enumerate().map(|(gid, name)| (name.as_str(), gid as u32)).collect();
    let added_src: Vec<GlyphId> = added
        .iter()
        .filter_map(|name| src_gid.get(name.as_str()))
        .map(|&gid| GlyphId::new(gid))
        .collect();

    let vf_glyf = vf.glyf().map_err(|_| Error::NoGlyf)?;
    let vf_loca = vf.loca(None).map_err(|_| Error::NoGlyf)?;
    let src_glyf = src.glyf().map_err(|_| Error::NoGlyf)?;
    let src_loca = src.loca(None).map_err(|_| Error::NoGlyf)?;

    let mut glyf_builder = GlyfLocaBuilder::new();
    for gid in 0..vf_order.len() as u32 {
        let glyph = vf_loca.get_glyf(GlyphId::new(gid), &vf_glyf)?;
        glyf_builder.add_glyph(&convert_glyph(glyph.as_ref(), None, true))?;
    }
    let mut bounds: Option<Bbox> = None;
    let mut extents = Extents::default();
    for (name, gid) in added.iter().zip(&added_src) {
        let glyph = src_loca.get_glyf(*gid, &src_glyf)?;
        extents.update(glyph.as_ref());
        let glyph = convert_glyph(glyph.as_ref(), Some(&src_to_new), false);
        if let Some(bbox) = glyph_bbox(&glyph) {
            bounds = Some(bounds.map_or(bbox, |b| union(b, bbox)));
        }
        glyf_builder.add_glyph(&glyph)?;
        debug!("Copied {name}");
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let vf_hmtx = vf.hmtx()?;
    let src_hmtx = src.hmtx()?;
    let h_metrics: Vec<LongMetric> = (0..vf_order.len() as u32)
        .map(|gid| metric(&vf_hmtx, GlyphId::new(gid)))
        .chain(added_src.iter().map(|gid| metric(&src_hmtx, *gid)))
        .collect();
    let advance_width_max = h_metrics.iter().map(|m| m.advance).max().unwrap_or(0);
    let hmtx = Hmtx { h_metrics, left_side_bearings: Vec::new() };

    let mut hhea: Hhea = vf.hhea()?.to_owned_table();
    hhea.number_of_h_metrics = num_glyphs;
    hhea.advance_width_max = advance_width_max.into();

    let mut maxp: Maxp = vf.maxp()?.to_owned_table();
    maxp.num_glyphs = num_glyphs;
    extents.apply(&mut maxp);

    let mut head: Head = vf.head()?.to_owned_table();
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };
    if let Some(bbox) = bounds {
        head.x_min = head.x_min.min(bbox.x_min);
        head.y_min = head.y_min.min(bbox.y_min);
        head.x_max = head.x_max.max(bbox.x_max);
        head.y_max = head.y_max.max(bbox.y_max);
    }

    let mut mappings = cmap::mappings(&vf.cmap()?);
    let mut codepoints = 0;
    for (codepoint, gid) in cmap::mappings(&src.cmap()?) {
        let Some(name) = src_order.get(gid as usize) else {
            continue;
        };
        if let Ok(index) = added.binary_search(name) {
            mappings.insert(codepoint, (vf_order.len() + index) as u32);
            codepoints += 1;
        }
    }

    let names: Vec<&str> = vf_order.iter().chain(&added).map(String::as_str).collect();
    let vf_post = vf.post()?;
    let mut post = Post::new_v2(names);
    post.italic_angle = vf_post.italic_angle();
    post.underline_position = vf_post.underline_position();
    post.underline_thickness = vf_post.underline_thickness();
    post.is_fixed_pitch = vf_post.is_fixed_pitch();

    let mut builder = FontBuilder::new();
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;
    builder.add_table(&hmtx)?;
    builder.add_table(&hhea)?;
    builder.add_table(&maxp)?;
    builder.add_table(&head)?;
    builder.add_table(&cmap::build(&mappings))?;
    builder.add_table(&post)?;
    if let Some(data) = vf.table_data(GVAR) {
        builder.add_raw(GVAR, gvar::append_empty_glyphs(data.as_bytes(), added.len() as u16)?);
    }
    for record in vf.table_directory.table_records() {
        let tag = record.tag();
        if REMOVED_TABLES.contains(&tag) {
            debug!("Dropping {tag}");
            continue;
        }
        if !REPLACED_TABLES.contains(&tag)
            && let Some(data) = vf.table_data(tag)
        {
            builder.add_raw(tag, data);
        }
    }

    Ok(Enhanced { data: builder.build(), added, codepoints })
}

fn glyph_bbox(glyph: &Glyph) -> Option<Bbox> {
    match glyph {
        Glyph::Simple(simple) => Some(simple.bbox),
        Glyph::Composite(composite) => Some(composite.bbox),
        Glyph::Empty => None,
    }
}

fn union(a: Bbox, b: Bbox) -> Bbox {
    Bbox {
        x_min: a.x_min.min(b.x_min),
        y_min: a.y_min.min(b.y_min),
        x_max: a.x_max.max(b.x_max),
        y_max: a.y_max.max(b.y_max),
    }
}

fn metric(hmtx: &read_fonts::tables::hmtx::Hmtx, gid: GlyphId) -> LongMetric {
    LongMetric {
        advance: hmtx.advance(gid).unwrap_or(0),
        side_bearing: hmtx.side_bearing(gid).unwrap_or(0),
    }
}

/// Largest point, contour and component counts among copied glyphs.
#[derive(Debug, Default)]
struct Extents {
    points: u16,
    contours: u16,
    components: u16,
}

impl Extents {
    fn update(&mut self, glyph: Option<&ReadGlyph>) {
        match glyph {
            Some(ReadGlyph::Simple(simple)) => {
                self.points = self.points.max(simple.num_points() as u16);
                self.contours = self.contours.max(simple.end_pts_of_contours().len() as u16);
            }
            Some(ReadGlyph::Composite(composite)) => {
                self.components = self.components.max(composite.components().count() as u16);
            }
            None => {}
        }
    }

    fn apply(&self, maxp: &mut Maxp) {
        for (field, value) in [
            (&mut maxp.max_points, self.points),
            (&mut maxp.max_contours, self.contours),
            (&mut maxp.max_component_elements, self.components),
        ] {
            if let Some(current) = field {
                *current = (*current).max(value);
            }
        }
    }
}

/// Convert a parsed glyph for writing.
///
/// `remap` maps component glyph ids to their ids in the output font; `None`
/// keeps them as they are.
fn convert_glyph(glyph: Option<&ReadGlyph>, remap: Option<&[u16]>, keep_hinting: bool) -> Glyph {
    match glyph {
        None => Glyph::Empty,
        Some(ReadGlyph::Simple(simple)) => {
            if simple.num_points() == 0 {
                return Glyph::Empty;
            }
            let mut points = simple.points();
            let mut start = 0usize;
            let mut contours: Vec<Contour> = Vec::new();
            for end in simple.end_pts_of_contours() {
                let end = end.get() as usize;
                let contour: Vec<_> = points.by_ref().take((end + 1).saturating_sub(start)).collect();
                contours.push(contour.into());
                start = end + 1;
            }
            let bbox = Bbox {
                x_min: simple.x_min(),
                y_min: simple.y_min(),
                x_max: simple.x_max(),
                y_max: simple.y_max(),
            };
            let instructions =
                if keep_hinting { simple.instructions().to_vec() } else { Vec::new() };
            Glyph::Simple(SimpleGlyph { bbox, contours, instructions })
        }
        Some(ReadGlyph::Composite(composite)) => {
            let bbox = Bbox {
                x_min: composite.x_min(),
                y_min: composite.y_min(),
                x_max: composite.x_max(),
                y_max: composite.y_max(),
            };
            let mut components = composite.components().map(|component| {
                let gid = component.glyph.to_u16();
                let gid = remap.map_or(gid, |remap| remap.get(gid as usize).copied().unwrap_or(0));
                let anchor = match component.anchor {
                    ReadAnchor::Offset { x, y } => Anchor::Offset { x, y },
                    ReadAnchor::Point { base, component } => Anchor::Point { base, component },
                };
                let transform = Transform {
                    xx: component.transform.xx,
                    yx: component.transform.yx,
                    xy: component.transform.xy,
                    yy: component.transform.yy,
                };
                let flags: ComponentFlags = component.flags.into();
                Component { glyph: GlyphId16::new(gid), anchor, transform, flags }
            });
            let Some(first) = components.next() else {
                return Glyph::Empty;
            };
            let mut glyph = CompositeGlyph::new(first, bbox);
            for component in components {
                glyph.add_component(component, bbox);
            }
            Glyph::Composite(glyph)
        }
    }
}
