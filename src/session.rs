// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::Ordering;

use crate::options::Options;
use crate::schema::{self, GenericRecord, RecordData};
use crate::tree::Color;

/// The two recognized schema revisions.
///
/// They differ in a handful of field names and cardinalities, not in the
/// overall document shape. 2002 documents carry a `Fonts` table, 2003
/// documents a `FaceNames` table; both registries are kept, and font
/// lookups prefer the revision's own table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum SchemaRevision {
    Visio2002,
    Visio2003,
}

impl fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchemaRevision::Visio2002 => write!(f, "2002"),
            SchemaRevision::Visio2003 => write!(f, "2003"),
        }
    }
}

/// Per-import state: the document registries plus the page cursor.
///
/// Created when an import starts and dropped when it finishes, on every
/// exit path. Nothing here outlives the import.
pub(crate) struct ImportSession<'a> {
    colors: Vec<Option<Color>>,
    fonts: Vec<Option<String>>,
    face_names: Vec<Option<String>>,
    stylesheets: Vec<Option<GenericRecord>>,
    masters: Vec<Option<GenericRecord>>,

    /// Index of the page currently being converted. Only non-background
    /// pages advance it.
    pub page: usize,
    /// Number of layers created by background pages. Added to layer
    /// membership indices of later shapes.
    pub background_layers: usize,

    pub revision: SchemaRevision,
    pub opt: &'a Options,
}

/// Grows a sparse registry to fit an explicitly-indexed entry.
///
/// Source indices are not necessarily contiguous or zero-based.
fn set_sparse<T>(registry: &mut Vec<Option<T>>, index: usize, value: T) {
    if registry.len() <= index {
        registry.resize_with(index + 1, || None);
    }
    registry[index] = Some(value);
}

impl<'a> ImportSession<'a> {
    pub fn new(revision: SchemaRevision, opt: &'a Options) -> Self {
        ImportSession {
            colors: Vec::new(),
            fonts: Vec::new(),
            face_names: Vec::new(),
            stylesheets: Vec::new(),
            masters: Vec::new(),
            page: 0,
            background_layers: 0,
            revision,
            opt,
        }
    }

    pub fn aborted(&self) -> bool {
        match self.opt.abort {
            Some(ref flag) => flag.load(Ordering::Relaxed),
            None => false,
        }
    }

    pub fn collect_colors(&mut self, node: roxmltree::Node) {
        for child in node.children().filter(|n| n.is_element()) {
            if let Ok(rec) = self.decode_entry(child) {
                if let RecordData::ColorEntry(entry) = rec.data {
                    set_sparse(&mut self.colors, entry.ix as usize, entry.rgb);
                }
            }
        }
    }

    pub fn collect_face_names(&mut self, node: roxmltree::Node) {
        for child in node.children().filter(|n| n.is_element()) {
            if let Ok(rec) = self.decode_entry(child) {
                if let RecordData::FaceName(face) = rec.data {
                    set_sparse(&mut self.face_names, face.id as usize, face.name);
                }
            }
        }
    }

    pub fn collect_fonts(&mut self, node: roxmltree::Node) {
        for child in node.children().filter(|n| n.is_element()) {
            if let Ok(rec) = self.decode_entry(child) {
                if let RecordData::FontEntry(font) = rec.data {
                    set_sparse(&mut self.fonts, font.id as usize, font.name);
                }
            }
        }
    }

    pub fn collect_stylesheets(&mut self, node: roxmltree::Node) {
        for child in node.children().filter(|n| n.is_element()) {
            if let Ok(rec) = self.decode_entry(child) {
                if let RecordData::StyleSheet(ref sheet) = rec.data {
                    let id = sheet.id as usize;
                    set_sparse(&mut self.stylesheets, id, rec);
                }
            }
        }
    }

    pub fn collect_masters(&mut self, node: roxmltree::Node) {
        for child in node.children().filter(|n| n.is_element()) {
            if let Ok(rec) = self.decode_entry(child) {
                if let RecordData::Master(ref master) = rec.data {
                    let id = master.id as usize;
                    set_sparse(&mut self.masters, id, rec);
                }
            }
        }
    }

    fn decode_entry(&self, node: roxmltree::Node) -> Result<GenericRecord, schema::DecodeError> {
        match schema::decode(node, self) {
            Ok(rec) => Ok(rec),
            Err(schema::DecodeError::UnsupportedElement(tag)) => {
                log::warn!("Unsupported element '{}'.", tag);
                Err(schema::DecodeError::UnsupportedElement(tag))
            }
        }
    }

    /// Parses a color reference: either a literal hex triplet or a
    /// decimal index into the document's color table.
    pub fn parse_color(&self, text: &str) -> Color {
        if text.starts_with('#') {
            if let Ok(c) = svgtypes::Color::from_str(text) {
                return Color::new_rgb(c.red, c.green, c.blue);
            }
        } else if let Ok(index) = text.parse::<usize>() {
            return self.color(index);
        }

        log::warn!("Failed to parse color value: '{}'. Fallback to black.", text);
        Color::black()
    }

    /// Looks up the color table. Out-of-range indices fall back to black.
    pub fn color(&self, index: usize) -> Color {
        match self.colors.get(index).copied().flatten() {
            Some(color) => color,
            None => {
                log::warn!("Color index {} is out of range. Fallback to black.", index);
                Color::black()
            }
        }
    }

    /// Looks up a font name by index, trying the revision's own table
    /// first. Unresolved indices fall back to the default family.
    pub fn font_name(&self, index: u32) -> &str {
        let ix = index as usize;
        let (primary, secondary) = match self.revision {
            SchemaRevision::Visio2002 => (&self.fonts, &self.face_names),
            SchemaRevision::Visio2003 => (&self.face_names, &self.fonts),
        };

        if let Some(Some(name)) = primary.get(ix) {
            return name;
        }
        if let Some(Some(name)) = secondary.get(ix) {
            return name;
        }

        if !self.fonts.is_empty() || !self.face_names.is_empty() {
            log::warn!(
                "Font index {} is out of range. Fallback to '{}'.",
                index,
                self.opt.default_font_family
            );
        }
        &self.opt.default_font_family
    }

    pub fn stylesheet(&self, index: u32) -> Option<&GenericRecord> {
        self.stylesheets.get(index as usize)?.as_ref()
    }

    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Finds a shape inside a master, searching nested shape collections.
    ///
    /// `shape_id` 0 selects the first shape, as no shape has ID 0.
    pub fn master_shape(&self, master: u32, shape_id: u32) -> Option<&GenericRecord> {
        let master_rec = match self.masters.get(master as usize) {
            Some(Some(rec)) => rec,
            _ => {
                log::warn!("Master {} is out of range.", master);
                return None;
            }
        };

        let shapes = master_rec
            .children
            .iter()
            .find(|c| matches!(c.data, RecordData::Shapes))?;

        let found = find_shape_by_id(shapes, shape_id);
        if found.is_none() {
            log::warn!("Couldn't find shape {} in master {}.", shape_id, master);
        }
        found
    }
}

fn find_shape_by_id(shapes: &GenericRecord, id: u32) -> Option<&GenericRecord> {
    for child in &shapes.children {
        if let RecordData::Shape(ref shape) = child.data {
            if shape.id == id || id == 0 {
                return Some(child);
            }

            // A grouped shape may hold a nested collection.
            let sub = child
                .children
                .iter()
                .find(|c| matches!(c.data, RecordData::Shapes));
            if let Some(sub) = sub {
                if let Some(found) = find_shape_by_id(sub, id) {
                    return Some(found);
                }
            }
        }
    }

    None
}
