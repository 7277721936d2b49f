// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The generic record decoder.
//!
//! Every recognized element decodes into a [`GenericRecord`]: a tagged
//! variant holding the scalar fields declared for that tag plus the list
//! of its remaining child records. Scalar fields arrive either as XML
//! attributes (`ID`, `Del`, ...) or as text-bearing child elements
//! (`<PinX>1.25</PinX>`); each record's decode table consumes the ones it
//! declares and everything else is decoded recursively into the fallback
//! list, so an unrecognized or rarely-used element never aborts its
//! parent.

use std::str::FromStr;

use crate::names::ElementId;
use crate::session::ImportSession;
use crate::tree::Color;

/// A decoding error.
#[derive(Debug)]
pub(crate) enum DecodeError {
    /// The element's tag is not part of the recognized vocabulary.
    ///
    /// Non-fatal to the parent: the caller keeps the element as an opaque
    /// fallback record.
    UnsupportedElement(String),
}

/// A decoded record: typed fields plus untyped fallback children.
#[derive(Debug)]
pub(crate) struct GenericRecord {
    pub data: RecordData,
    pub children: Vec<GenericRecord>,
}

/// The typed part of a record, keyed by the element tag.
#[derive(Debug)]
pub(crate) enum RecordData {
    ArcTo(ArcTo),
    Char(Char),
    ColorEntry(ColorEntry),
    Ellipse(Ellipse),
    EllipticalArcTo(EllipticalArcTo),
    FaceName(FaceName),
    Fill(Fill),
    FontEntry(FontEntry),
    Geom(Geom),
    Layer(Layer),
    LayerMem(LayerMem),
    Line(Line),
    LineTo(LineTo),
    Master(Master),
    MoveTo(MoveTo),
    PageSheet(PageSheet),
    Para(Para),
    Shape(Shape),
    Shapes,
    StyleSheet(StyleSheet),
    Text(Text),
    TextXForm(TextXForm),
    XForm(XForm),
    XForm1D(XForm1D),
    Unknown(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ShapeType {
    Shape,
    Group,
    Guide,
    Foreign,
}

impl ShapeType {
    fn from_str(s: &str) -> Option<ShapeType> {
        match s {
            "Shape" => Some(ShapeType::Shape),
            "Group" => Some(ShapeType::Group),
            "Guide" => Some(ShapeType::Guide),
            "Foreign" => Some(ShapeType::Foreign),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ColorEntry {
    pub ix: u32,
    pub rgb: Color,
}

#[derive(Debug)]
pub(crate) struct FaceName {
    pub id: u32,
    pub name: String,
}

#[derive(Debug)]
pub(crate) struct FontEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug)]
pub(crate) struct StyleSheet {
    pub id: u32,
    // Per-domain parent style indices. The domains may diverge at any
    // ancestor.
    pub fill_style: u32,
    pub line_style: u32,
    pub text_style: u32,
}

#[derive(Debug)]
pub(crate) struct Master {
    pub id: u32,
}

#[derive(Debug)]
pub(crate) struct Shape {
    pub id: u32,
    pub shape_type: Option<ShapeType>,
    pub del: bool,
    pub master: Option<u32>,
    pub master_shape: Option<u32>,
    pub name: Option<String>,
    pub fill_style: Option<u32>,
    pub line_style: Option<u32>,
    pub text_style: Option<u32>,
}

#[derive(Debug, Default)]
pub(crate) struct PageSheet {
    pub fill_style: u32,
    pub line_style: u32,
    pub text_style: u32,
}

#[derive(Debug)]
pub(crate) struct Layer {
    pub name: String,
}

#[derive(Debug, Default)]
pub(crate) struct LayerMem {
    pub member: Option<u32>,
}

#[derive(Debug)]
pub(crate) struct Fill {
    pub foreground: Color,
    pub background: Color,
    pub pattern: u32,
}

impl Default for Fill {
    fn default() -> Fill {
        Fill {
            foreground: Color::black(),
            background: Color::black(),
            pattern: 0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Line {
    pub weight: f64,
    pub color: Color,
    pub pattern: u32,
    pub cap: u32,
    pub begin_arrow: u32,
    pub begin_arrow_size: u32,
    pub end_arrow: u32,
    pub end_arrow_size: u32,
}

impl Default for Line {
    fn default() -> Line {
        Line {
            weight: 0.0,
            color: Color::black(),
            pattern: 0,
            cap: 0,
            begin_arrow: 0,
            begin_arrow_size: 0,
            end_arrow: 0,
            end_arrow_size: 0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Char {
    pub font: u32,
    pub color: Color,
    pub size: f64,
}

impl Default for Char {
    fn default() -> Char {
        Char {
            font: 0,
            color: Color::black(),
            size: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Para {
    pub horz_align: u32,
}

#[derive(Debug, Default)]
pub(crate) struct XForm {
    pub pin_x: f64,
    pub pin_y: f64,
    pub loc_pin_x: f64,
    pub loc_pin_y: f64,
    pub angle: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

#[derive(Debug, Default)]
pub(crate) struct XForm1D {
    pub begin_x: f64,
    pub begin_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

#[derive(Debug, Default)]
pub(crate) struct TextXForm {
    pub pin_x: f64,
    pub pin_y: f64,
    pub loc_pin_x: f64,
    pub loc_pin_y: f64,
}

#[derive(Debug, Default)]
pub(crate) struct Geom {
    pub no_fill: bool,
    pub no_line: bool,
}

#[derive(Debug, Default)]
pub(crate) struct MoveTo {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
pub(crate) struct LineTo {
    pub x: f64,
    pub y: f64,
}

/// A circular arc row: endpoint plus the signed distance from the chord
/// midpoint to the arc (the bulge).
#[derive(Debug, Default)]
pub(crate) struct ArcTo {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

/// An elliptical arc row: endpoint plus a control point on the arc. The
/// control point's offset from the chord stands in for the bulge.
#[derive(Debug, Default)]
pub(crate) struct EllipticalArcTo {
    pub x: f64,
    pub y: f64,
    pub a: f64,
    pub b: f64,
}

/// A full-ellipse row: center plus one point on each axis.
#[derive(Debug, Default)]
pub(crate) struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Default)]
pub(crate) struct Text {
    pub content: String,
}

/// Decodes one element into a record, recursively.
pub(crate) fn decode(
    node: roxmltree::Node,
    session: &ImportSession<'_>,
) -> Result<GenericRecord, DecodeError> {
    let name = node.tag_name().name();
    match ElementId::from_str(name) {
        Some(eid) => Ok(decode_known(eid, node, session)),
        None => Err(DecodeError::UnsupportedElement(name.to_string())),
    }
}

fn decode_known(eid: ElementId, node: roxmltree::Node, session: &ImportSession<'_>) -> GenericRecord {
    let mut children = Vec::new();
    let data = match eid {
        ElementId::ArcTo => RecordData::ArcTo(ArcTo::decode(node, session, &mut children)),
        ElementId::Char => RecordData::Char(Char::decode(node, session, &mut children)),
        ElementId::ColorEntry => {
            RecordData::ColorEntry(ColorEntry::decode(node, session, &mut children))
        }
        ElementId::Ellipse => RecordData::Ellipse(Ellipse::decode(node, session, &mut children)),
        ElementId::EllipticalArcTo => {
            RecordData::EllipticalArcTo(EllipticalArcTo::decode(node, session, &mut children))
        }
        ElementId::FaceName => RecordData::FaceName(FaceName::decode(node, session, &mut children)),
        ElementId::Fill => RecordData::Fill(Fill::decode(node, session, &mut children)),
        ElementId::FontEntry => {
            RecordData::FontEntry(FontEntry::decode(node, session, &mut children))
        }
        ElementId::Geom => RecordData::Geom(Geom::decode(node, session, &mut children)),
        ElementId::Layer => RecordData::Layer(Layer::decode(node, session, &mut children)),
        ElementId::LayerMem => RecordData::LayerMem(LayerMem::decode(node, session, &mut children)),
        ElementId::Line => RecordData::Line(Line::decode(node, session, &mut children)),
        ElementId::LineTo => RecordData::LineTo(LineTo::decode(node, session, &mut children)),
        ElementId::Master => RecordData::Master(Master::decode(node, session, &mut children)),
        ElementId::MoveTo => RecordData::MoveTo(MoveTo::decode(node, session, &mut children)),
        ElementId::PageSheet => {
            RecordData::PageSheet(PageSheet::decode(node, session, &mut children))
        }
        ElementId::Para => RecordData::Para(Para::decode(node, session, &mut children)),
        ElementId::Shape => RecordData::Shape(Shape::decode(node, session, &mut children)),
        ElementId::Shapes => {
            decode_children(node, session, &mut children, |_, _| false);
            RecordData::Shapes
        }
        ElementId::StyleSheet => {
            RecordData::StyleSheet(StyleSheet::decode(node, session, &mut children))
        }
        ElementId::Text => RecordData::Text(Text::decode(node, session, &mut children)),
        ElementId::TextXForm => {
            RecordData::TextXForm(TextXForm::decode(node, session, &mut children))
        }
        ElementId::XForm => RecordData::XForm(XForm::decode(node, session, &mut children)),
        ElementId::XForm1D => RecordData::XForm1D(XForm1D::decode(node, session, &mut children)),
    };

    GenericRecord { data, children }
}

/// Decodes an unrecognized element as an opaque record.
///
/// Its children still decode normally, so recognized records nested under
/// an unknown wrapper are not lost.
pub(crate) fn decode_unknown(node: roxmltree::Node, session: &ImportSession<'_>) -> GenericRecord {
    let mut children = Vec::new();
    decode_children(node, session, &mut children, |_, _| false);
    GenericRecord {
        data: RecordData::Unknown(node.tag_name().name().to_string()),
        children,
    }
}

/// Walks an element's children: scalar fields are consumed by the `field`
/// table, everything else decodes into the fallback list. Whitespace-only
/// text nodes are skipped.
fn decode_children<F>(
    node: roxmltree::Node,
    session: &ImportSession<'_>,
    children: &mut Vec<GenericRecord>,
    mut field: F,
) where
    F: FnMut(&str, roxmltree::Node) -> bool,
{
    for child in node.children() {
        if !child.is_element() {
            continue;
        }

        let name = child.tag_name().name();
        if field(name, child) {
            continue;
        }

        match decode(child, session) {
            Ok(rec) => children.push(rec),
            Err(DecodeError::UnsupportedElement(tag)) => {
                log::warn!("Unsupported element '{}'.", tag);
                children.push(decode_unknown(child, session));
            }
        }
    }
}

fn element_text<'a>(node: roxmltree::Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("")
}

fn parse_f64(node: roxmltree::Node) -> f64 {
    let text = element_text(node).trim();
    match svgtypes::Number::from_str(text) {
        Ok(n) => n.0,
        Err(_) => {
            log::warn!(
                "Failed to parse {} value: '{}'.",
                node.tag_name().name(),
                text
            );
            0.0
        }
    }
}

fn parse_u32(node: roxmltree::Node) -> u32 {
    let text = element_text(node).trim();
    match text.parse() {
        Ok(n) => n,
        // Integer fields occasionally carry float formatting.
        Err(_) => parse_f64(node) as u32,
    }
}

fn parse_bool(node: roxmltree::Node) -> bool {
    match element_text(node).trim() {
        "1" => true,
        "0" | "" => false,
        _ => parse_f64(node) != 0.0,
    }
}

fn parse_color(node: roxmltree::Node, session: &ImportSession<'_>) -> Color {
    session.parse_color(element_text(node).trim())
}

fn attr_u32(node: roxmltree::Node, name: &str) -> Option<u32> {
    let value = node.attribute(name)?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("Failed to parse {} value: '{}'.", name, value);
            None
        }
    }
}

fn attr_flag(node: roxmltree::Node, name: &str) -> bool {
    node.attribute(name).map_or(false, |v| v != "0")
}

fn attr_string(node: roxmltree::Node, name: &str) -> Option<String> {
    node.attribute(name).map(String::from)
}

impl ColorEntry {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        ColorEntry {
            ix: attr_u32(node, "IX").unwrap_or(0),
            rgb: session.parse_color(node.attribute("RGB").unwrap_or("").trim()),
        }
    }
}

impl FaceName {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        FaceName {
            id: attr_u32(node, "ID").unwrap_or(0),
            name: attr_string(node, "Name").unwrap_or_default(),
        }
    }
}

impl FontEntry {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        FontEntry {
            id: attr_u32(node, "ID").unwrap_or(0),
            name: attr_string(node, "Name").unwrap_or_default(),
        }
    }
}

impl StyleSheet {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        StyleSheet {
            id: attr_u32(node, "ID").unwrap_or(0),
            fill_style: attr_u32(node, "FillStyle").unwrap_or(0),
            line_style: attr_u32(node, "LineStyle").unwrap_or(0),
            text_style: attr_u32(node, "TextStyle").unwrap_or(0),
        }
    }
}

impl Master {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        Master {
            id: attr_u32(node, "ID").unwrap_or(0),
        }
    }
}

impl Shape {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);

        let shape_type = match node.attribute("Type") {
            Some(s) => {
                let t = ShapeType::from_str(s);
                if t.is_none() {
                    log::warn!("Unknown shape type '{}'.", s);
                }
                t
            }
            None => None,
        };

        Shape {
            id: attr_u32(node, "ID").unwrap_or(0),
            shape_type,
            del: attr_flag(node, "Del"),
            master: attr_u32(node, "Master"),
            master_shape: attr_u32(node, "MasterShape"),
            name: attr_string(node, "NameU").or_else(|| attr_string(node, "Name")),
            fill_style: attr_u32(node, "FillStyle"),
            line_style: attr_u32(node, "LineStyle"),
            text_style: attr_u32(node, "TextStyle"),
        }
    }
}

impl PageSheet {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        decode_children(node, session, children, |_, _| false);
        PageSheet {
            fill_style: attr_u32(node, "FillStyle").unwrap_or(0),
            line_style: attr_u32(node, "LineStyle").unwrap_or(0),
            text_style: attr_u32(node, "TextStyle").unwrap_or(0),
        }
    }
}

impl Layer {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut name = String::new();
        let mut name_univ = String::new();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "Name" => name = element_text(child).to_string(),
                "NameUniv" => name_univ = element_text(child).to_string(),
                "Visible" | "Print" | "Active" | "Lock" | "Snap" | "Glue" | "Color"
                | "ColorTrans" | "Status" => {}
                _ => return false,
            }
            true
        });

        if name.is_empty() {
            name = name_univ;
        }

        Layer { name }
    }
}

impl LayerMem {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut member = None;
        decode_children(node, session, children, |tag, child| {
            match tag {
                // A shape may belong to several layers; only the first
                // membership routes it.
                "LayerMember" => {
                    member = element_text(child)
                        .split(';')
                        .next()
                        .and_then(|s| s.trim().parse().ok());
                }
                _ => return false,
            }
            true
        });

        LayerMem { member }
    }
}

impl Fill {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = Fill::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "FillForegnd" => rec.foreground = parse_color(child, session),
                "FillBkgnd" => rec.background = parse_color(child, session),
                "FillPattern" => rec.pattern = parse_u32(child),
                "FillForegndTrans" | "FillBkgndTrans" | "ShdwForegnd" | "ShdwForegndTrans"
                | "ShdwBkgnd" | "ShdwBkgndTrans" | "ShdwPattern" | "ShapeShdwType"
                | "ShapeShdwOffsetX" | "ShapeShdwOffsetY" | "ShapeShdwObliqueAngle"
                | "ShapeShdwScaleFactor" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl Line {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = Line::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "LineWeight" => rec.weight = parse_f64(child),
                "LineColor" => rec.color = parse_color(child, session),
                "LinePattern" => rec.pattern = parse_u32(child),
                "LineCap" => rec.cap = parse_u32(child),
                "BeginArrow" => rec.begin_arrow = parse_u32(child),
                "BeginArrowSize" => rec.begin_arrow_size = parse_u32(child),
                "EndArrow" => rec.end_arrow = parse_u32(child),
                "EndArrowSize" => rec.end_arrow_size = parse_u32(child),
                "LineColorTrans" | "Rounding" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl Char {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = Char::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "Font" => rec.font = parse_u32(child),
                "Color" => rec.color = parse_color(child, session),
                "Size" => rec.size = parse_f64(child),
                "Style" | "Case" | "Pos" | "FontScale" | "Letterspace" | "ColorTrans"
                | "AsianFont" | "ComplexScriptFont" | "ComplexScriptSize" | "LangID"
                | "Locale" | "LocalizeFont" | "DblUnderline" | "Overline" | "Strikethru"
                | "DoubleStrikethrough" | "Highlight" | "Perpendicular" | "RTLText"
                | "UseVertical" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl Para {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = Para::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "HorzAlign" => rec.horz_align = parse_u32(child),
                "IndFirst" | "IndLeft" | "IndRight" | "SpLine" | "SpBefore" | "SpAfter"
                | "Bullet" | "BulletStr" | "BulletFont" | "BulletFontSize"
                | "LocalizeBulletFont" | "TextPosAfterBullet" | "Flags" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl XForm {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = XForm::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "PinX" => rec.pin_x = parse_f64(child),
                "PinY" => rec.pin_y = parse_f64(child),
                "LocPinX" => rec.loc_pin_x = parse_f64(child),
                "LocPinY" => rec.loc_pin_y = parse_f64(child),
                "Angle" => rec.angle = parse_f64(child),
                "FlipX" => rec.flip_x = parse_bool(child),
                "FlipY" => rec.flip_y = parse_bool(child),
                "Width" | "Height" | "ResizeMode" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl XForm1D {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = XForm1D::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "BeginX" => rec.begin_x = parse_f64(child),
                "BeginY" => rec.begin_y = parse_f64(child),
                "EndX" => rec.end_x = parse_f64(child),
                "EndY" => rec.end_y = parse_f64(child),
                _ => return false,
            }
            true
        });
        rec
    }
}

impl TextXForm {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = TextXForm::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "TxtPinX" => rec.pin_x = parse_f64(child),
                "TxtPinY" => rec.pin_y = parse_f64(child),
                "TxtLocPinX" => rec.loc_pin_x = parse_f64(child),
                "TxtLocPinY" => rec.loc_pin_y = parse_f64(child),
                "TxtWidth" | "TxtHeight" | "TxtAngle" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

impl Geom {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut rec = Geom::default();
        decode_children(node, session, children, |tag, child| {
            match tag {
                "NoFill" => rec.no_fill = parse_bool(child),
                "NoLine" => rec.no_line = parse_bool(child),
                "NoShow" | "NoSnap" => {}
                _ => return false,
            }
            true
        });
        rec
    }
}

macro_rules! decode_row {
    ($name:ident, $($field:ident => $tag:expr),+ $(; skip: $($ignored:pat),+)?) => {
        impl $name {
            fn decode(
                node: roxmltree::Node,
                session: &ImportSession<'_>,
                children: &mut Vec<GenericRecord>,
            ) -> Self {
                let mut rec = $name::default();
                decode_children(node, session, children, |tag, child| {
                    match tag {
                        $($tag => rec.$field = parse_f64(child),)+
                        "Del" => {}
                        $($($ignored => {})+)?
                        _ => return false,
                    }
                    true
                });
                rec
            }
        }
    };
}

decode_row!(MoveTo, x => "X", y => "Y");
decode_row!(LineTo, x => "X", y => "Y");
decode_row!(ArcTo, x => "X", y => "Y", a => "A");
decode_row!(EllipticalArcTo,
    x => "X", y => "Y", a => "A", b => "B"; skip: "C", "D");
decode_row!(Ellipse,
    x => "X", y => "Y", a => "A", b => "B", c => "C", d => "D");

impl Text {
    fn decode(
        node: roxmltree::Node,
        session: &ImportSession<'_>,
        children: &mut Vec<GenericRecord>,
    ) -> Self {
        let mut content = String::new();
        for child in node.children() {
            if child.is_text() {
                content.push_str(child.text().unwrap_or(""));
                continue;
            }

            if !child.is_element() {
                continue;
            }

            match child.tag_name().name() {
                // Formatting run markers carry no renderable content.
                "cp" | "pp" | "tp" | "fld" => {}
                _ => match decode(child, session) {
                    Ok(rec) => children.push(rec),
                    Err(DecodeError::UnsupportedElement(tag)) => {
                        log::warn!("Unsupported element '{}'.", tag);
                        children.push(decode_unknown(child, session));
                    }
                },
            }
        }

        Text {
            // The format stores line breaks as U+2028.
            content: content.replace('\u{2028}', "\n"),
        }
    }
}
