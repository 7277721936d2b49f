// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::error::Error;
use crate::geom::{FuzzyZero, Point};
use crate::options::Options;
use crate::schema::{self, GenericRecord, RecordData, ShapeType};
use crate::session::{ImportSession, SchemaRevision};
use crate::shapes;
use crate::style;
use crate::tree::{Color, Diagram, Group, Object, Text, TextAlign};
use crate::units::{self, Translation};

const VISIO_2002_NS: &str = "urn:schemas-microsoft-com:office:visio";
const VISIO_2003_NS: &str = "http://schemas.microsoft.com/visio/2003/core";

// 12pt, in source units.
const DEFAULT_TEXT_SIZE: f64 = 1.0 / 6.0;

/// Converts a parsed VDX document into a `Diagram`.
pub(crate) fn convert_doc(xml: &roxmltree::Document, opt: &Options) -> Result<Diagram, Error> {
    let root = xml.root_element();
    if root.tag_name().name() != "VisioDocument" {
        return Err(Error::UnsupportedRoot);
    }

    let revision = match root.tag_name().namespace() {
        Some(VISIO_2002_NS) => SchemaRevision::Visio2002,
        Some(VISIO_2003_NS) => SchemaRevision::Visio2003,
        _ => return Err(Error::UnsupportedRoot),
    };
    log::debug!("Visio schema revision: {}.", revision);

    let mut session = ImportSession::new(revision, opt);
    let mut diagram = Diagram::default();

    // Registries first: the document lists them before the pages, and
    // everything below resolves against them.
    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "Colors" => session.collect_colors(node),
            "FaceNames" => session.collect_face_names(node),
            "Fonts" => session.collect_fonts(node),
            "Masters" => session.collect_masters(node),
            "StyleSheets" => session.collect_stylesheets(node),
            "Pages" => convert_pages(node, &mut session, &mut diagram),
            _ => {}
        }
    }

    Ok(diagram)
}

/// The page-level default style indices, used when a shape omits its own.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
struct StyleIndices {
    fill: u32,
    line: u32,
    text: u32,
}

fn convert_pages(node: roxmltree::Node, session: &mut ImportSession, diagram: &mut Diagram) {
    for page in node.children().filter(|n| n.is_element()) {
        if page.tag_name().name() != "Page" {
            continue;
        }

        let background = page.attribute("Background").map_or(false, |v| v != "0");
        let mut defaults = StyleIndices::default();

        for child in page.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "PageSheet" => defaults = convert_page_sheet(child, session, diagram),
                "Shapes" => {
                    for shape in child.children().filter(|n| n.is_element()) {
                        convert_shape(shape, defaults, session, diagram);
                    }
                }
                _ => {}
            }
        }

        if background {
            // A background page shares page 0's band; its layers shift
            // the membership indices of everything that follows.
            session.background_layers = diagram.layers.len();
        } else {
            session.page += 1;
        }
    }
}

/// Reads the page sheet: its style defaults and its layer declarations.
///
/// The source lists layers front-to-back while the diagram stacks
/// back-to-front, so they are created in reverse declaration order. This
/// reversal is intentional. The last-created layer becomes the active
/// one.
fn convert_page_sheet(
    node: roxmltree::Node,
    session: &ImportSession,
    diagram: &mut Diagram,
) -> StyleIndices {
    let rec = match schema::decode(node, session) {
        Ok(rec) => rec,
        Err(schema::DecodeError::UnsupportedElement(tag)) => {
            log::warn!("Unsupported element '{}'.", tag);
            return StyleIndices::default();
        }
    };

    let defaults = match rec.data {
        RecordData::PageSheet(ref sheet) => StyleIndices {
            fill: sheet.fill_style,
            line: sheet.line_style,
            text: sheet.text_style,
        },
        _ => StyleIndices::default(),
    };

    let mut names = Vec::new();
    for child in &rec.children {
        if let RecordData::Layer(ref layer) = child.data {
            names.push(layer.name.clone());
        }
    }
    for name in names.into_iter().rev() {
        diagram.add_layer(name);
    }

    defaults
}

/// Decodes one top-level shape, plots it and routes the produced objects
/// into the layer its membership record names.
///
/// The decoded record tree is dropped as soon as the objects are routed.
fn convert_shape(
    node: roxmltree::Node,
    defaults: StyleIndices,
    session: &ImportSession,
    diagram: &mut Diagram,
) {
    if node.tag_name().name() != "Shape" {
        return;
    }

    let rec = match schema::decode(node, session) {
        Ok(rec) => rec,
        Err(schema::DecodeError::UnsupportedElement(tag)) => {
            log::warn!("Unsupported element '{}'.", tag);
            return;
        }
    };

    let shape = match rec.data {
        RecordData::Shape(ref shape) => shape,
        _ => return,
    };

    // A shape without a type is beyond salvaging.
    if shape.shape_type.is_none() {
        return;
    }

    log::debug!(
        "Shape {} [{}]",
        shape.id,
        shape.name.as_deref().unwrap_or("Unnamed")
    );

    let layer = find_child!(rec, LayerMem)
        .and_then(|m| m.member)
        .map(|ix| ix as usize + session.background_layers);

    let inherited = Inherited {
        translation: Translation::default(),
        master: None,
        defaults,
    };

    for object in plot_shape(&rec, &inherited, session) {
        diagram.route(layer, object);
    }
}

/// State a shape inherits from its surroundings: the composed group
/// translation, the group's master reference and the page defaults.
#[derive(Clone, Copy, Debug)]
struct Inherited {
    translation: Translation,
    master: Option<u32>,
    defaults: StyleIndices,
}

/// Plots one shape, recursing into group members.
///
/// Returns the produced objects in paint order; a group contributes one
/// `Group` object wrapping its members' objects.
fn plot_shape(
    rec: &GenericRecord,
    inherited: &Inherited,
    session: &ImportSession,
) -> Vec<Object> {
    let shape = match rec.data {
        RecordData::Shape(ref shape) => shape,
        _ => return Vec::new(),
    };

    if shape.del || session.aborted() {
        return Vec::new();
    }

    // Guides are construction aids, never rendered.
    if shape.shape_type == Some(ShapeType::Guide) {
        return Vec::new();
    }

    let xform = find_child!(rec, XForm);
    let xform1d = find_child!(rec, XForm1D);
    let text_xform = find_child!(rec, TextXForm);
    let text = find_child!(rec, Text);
    let mut fill = find_child!(rec, Fill);
    let mut line = find_child!(rec, Line);
    let mut character = find_child!(rec, Char);
    let mut para = find_child!(rec, Para);

    let geoms: Vec<&GenericRecord> = rec
        .children
        .iter()
        .filter(|c| matches!(c.data, RecordData::Geom(_)))
        .collect();

    let no_fill = geoms.iter().any(|g| geom_data(g).map_or(false, |g| g.no_fill));
    let no_line = geoms.iter().any(|g| geom_data(g).map_or(false, |g| g.no_line));

    // A master supplies Fill, Line and Char the shape itself omits.
    let master = shape.master.or(inherited.master);
    if let Some(master) = master {
        if let Some(master_shape) = session.master_shape(master, shape.master_shape.unwrap_or(0)) {
            if fill.is_none() && !no_fill {
                fill = find_child!(master_shape, Fill);
            }
            if line.is_none() && !no_line {
                line = find_child!(master_shape, Line);
            }
            if character.is_none() {
                character = find_child!(master_shape, Char);
            }
        }
    }

    // Then the stylesheet cascade, starting from the shape's own indices
    // or the page defaults.
    let fill_style = shape.fill_style.unwrap_or(inherited.defaults.fill);
    let line_style = shape.line_style.unwrap_or(inherited.defaults.line);
    let text_style = shape.text_style.unwrap_or(inherited.defaults.text);

    if fill.is_none() && !no_fill {
        fill = style::resolve_fill(session, fill_style);
    }
    if line.is_none() && !no_line {
        line = style::resolve_line(session, line_style);
    }
    if character.is_none() {
        character = style::resolve_char(session, text_style);
    }
    if para.is_none() {
        para = style::resolve_para(session, text_style);
    }

    let translation = xform
        .map(Translation::from_xform)
        .unwrap_or_default()
        .compose(inherited.translation);

    if let Some(xform) = xform {
        if !xform.angle.is_fuzzy_zero() || xform.flip_x || xform.flip_y {
            log::warn!(
                "Rotation and flips are not supported. Shape {} is imported axis-aligned.",
                shape.id
            );
        }
    }

    // A group wraps its members' objects in one Group object; nesting is
    // preserved, not flattened.
    if shape.shape_type == Some(ShapeType::Group) {
        if let Some(shapes) = rec
            .children
            .iter()
            .find(|c| matches!(c.data, RecordData::Shapes))
        {
            let child_inherited = Inherited {
                translation,
                master,
                defaults: inherited.defaults,
            };

            let mut members = Vec::new();
            for child in &shapes.children {
                if matches!(child.data, RecordData::Shape(_)) {
                    members.extend(plot_shape(child, &child_inherited, session));
                }
            }

            return vec![Object::Group(Group { children: members })];
        }
    }

    let (start_arrow, end_arrow) = style::convert_arrows(line);
    let ctx = shapes::Context {
        translation,
        xform1d,
        stroke: style::convert_stroke(line),
        fill: style::convert_fill(fill),
        start_arrow,
        end_arrow,
        page: session.page,
    };

    let mut objects = Vec::new();

    // A shape may own several disconnected geometry sections.
    for geom_rec in &geoms {
        if let Some(geom) = geom_data(geom_rec) {
            if let Some(object) = shapes::convert(geom, &geom_rec.children, &ctx) {
                objects.push(object);
            }
        }
    }

    // Text goes after the geometry it labels, so it paints on top.
    if let Some(text) = text {
        if !text.content.is_empty() {
            objects.push(plot_text(
                text,
                text_xform,
                translation,
                character,
                para,
                session,
            ));
        }
    }

    objects
}

fn geom_data(rec: &GenericRecord) -> Option<&schema::Geom> {
    match rec.data {
        RecordData::Geom(ref geom) => Some(geom),
        _ => None,
    }
}

fn plot_text(
    text: &schema::Text,
    text_xform: Option<&schema::TextXForm>,
    translation: Translation,
    character: Option<&schema::Char>,
    para: Option<&schema::Para>,
    session: &ImportSession,
) -> Object {
    let local = match text_xform {
        Some(t) => Point::new(t.pin_x - t.loc_pin_x, t.pin_y - t.loc_pin_y),
        None => Point::new(0.0, 0.0),
    };
    let position = units::diagram_point(translation.apply(local), session.page);

    let (font_family, size, color) = match character {
        Some(c) => {
            let size = if c.size > 0.0 { c.size } else { DEFAULT_TEXT_SIZE };
            (session.font_name(c.font).to_string(), size, c.color)
        }
        None => (
            session.opt.default_font_family.clone(),
            DEFAULT_TEXT_SIZE,
            Color::black(),
        ),
    };

    let align = match para.map(|p| p.horz_align) {
        Some(1) => TextAlign::Center,
        Some(2) => TextAlign::Right,
        _ => TextAlign::Left,
    };

    Object::Text(Text {
        position,
        content: text.content.clone(),
        font_family,
        size: size * units::FONT_SCALE,
        color,
        align,
    })
}
