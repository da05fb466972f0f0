//! Minimal on-disk UFO sources for tests.
//!
//! Enabled inside this crate's own tests and, for other crates, through the
//! `test-fixtures` feature.

use std::{
    fmt::Write as _,
    fs::{create_dir_all, write},
    io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug)]
pub struct TestGlyph {
    name: String,
    advance: u32,
    contours: Vec<Vec<(i32, i32)>>,
    components: Vec<String>,
    anchors: Vec<(String, i32, i32)>,
}

pub fn glyph(name: &str) -> TestGlyph {
    TestGlyph {
        name: name.to_owned(),
        advance: 500,
        contours: Vec::new(),
        components: Vec::new(),
        anchors: Vec::new(),
    }
}

impl TestGlyph {
    pub fn advance(mut self, width: u32) -> Self {
        self.advance = width;
        self
    }

    /// Append a closed contour of line points.
    pub fn contour(mut self, points: &[(i32, i32)]) -> Self {
        self.contours.push(points.to_vec());
        self
    }

    pub fn components(mut self, bases: &[&str]) -> Self {
        self.components = bases.iter().map(|base| base.to_string()).collect();
        self
    }

    /// Replace the anchors with `names`, placed on a diagonal.
    pub fn anchors(mut self, names: &[&str]) -> Self {
        self.anchors = names
            .iter()
            .zip(0..)
            .map(|(name, i)| (name.to_string(), i * 10, i * 20))
            .collect();
        self
    }

    pub fn anchor(mut self, name: &str, x: i32, y: i32) -> Self {
        self.anchors.push((name.to_owned(), x, y));
        self
    }

    fn glif(&self) -> String {
        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<glyph name=\"{}\" format=\"2\">\n  <advance width=\"{}\"/>\n",
            self.name, self.advance
        );
        for (name, x, y) in &self.anchors {
            let _ = writeln!(xml, "  <anchor x=\"{x}\" y=\"{y}\" name=\"{name}\"/>");
        }
        xml.push_str("  <outline>\n");
        for contour in &self.contours {
            xml.push_str("    <contour>\n");
            for (x, y) in contour {
                let _ = writeln!(xml, "      <point x=\"{x}\" y=\"{y}\" type=\"line\"/>");
            }
            xml.push_str("    </contour>\n");
        }
        for base in &self.components {
            let _ = writeln!(xml, "    <component base=\"{base}\"/>");
        }
        xml.push_str("  </outline>\n</glyph>\n");
        xml
    }
}

const PLIST_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n<plist version=\"1.0\">\n";

/// Write a UFO 3 directory named `name` under `dir` holding `glyphs` in its default layer.
pub fn write_ufo(dir: &Path, name: &str, glyphs: &[TestGlyph]) -> io::Result<PathBuf> {
    let ufo = dir.join(name);
    let glyphs_dir = ufo.join("glyphs");
    create_dir_all(&glyphs_dir)?;

    write(
        ufo.join("metainfo.plist"),
        format!(
            "{PLIST_HEADER}<dict>\n  <key>creator</key>\n  <string>org.sahel.tests</string>\n  <key>formatVersion</key>\n  <integer>3</integer>\n</dict>\n</plist>\n"
        ),
    )?;
    write(
        ufo.join("layercontents.plist"),
        format!(
            "{PLIST_HEADER}<array>\n  <array>\n    <string>public.default</string>\n    <string>glyphs</string>\n  </array>\n</array>\n</plist>\n"
        ),
    )?;

    let mut contents = String::new();
    for (i, glyph) in glyphs.iter().enumerate() {
        let file_name = format!("glyph{i:03}.glif");
        let _ = writeln!(contents, "  <key>{}</key>\n  <string>{file_name}</string>", glyph.name);
        write(glyphs_dir.join(&file_name), glyph.glif())?;
    }
    write(glyphs_dir.join("contents.plist"), format!("{PLIST_HEADER}<dict>\n{contents}</dict>\n</plist>\n"))?;

    Ok(ufo)
}
