// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all recognized record tags.
///
/// Scalar value elements (`PinX`, `X`, `FillForegnd`, ...) are not listed
/// here. They are fields of their parent record and are consumed by the
/// parent's decode table, not decoded as records of their own.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ElementId {
    ArcTo,
    Char,
    ColorEntry,
    Ellipse,
    EllipticalArcTo,
    FaceName,
    Fill,
    FontEntry,
    Geom,
    Layer,
    LayerMem,
    Line,
    LineTo,
    Master,
    MoveTo,
    PageSheet,
    Para,
    Shape,
    Shapes,
    StyleSheet,
    Text,
    TextXForm,
    XForm,
    XForm1D,
}

impl ElementId {
    pub fn from_str(s: &str) -> Option<ElementId> {
        match s {
            "ArcTo" => Some(ElementId::ArcTo),
            "Char" => Some(ElementId::Char),
            "ColorEntry" => Some(ElementId::ColorEntry),
            "Ellipse" => Some(ElementId::Ellipse),
            "EllipticalArcTo" => Some(ElementId::EllipticalArcTo),
            "FaceName" => Some(ElementId::FaceName),
            "Fill" => Some(ElementId::Fill),
            "FontEntry" => Some(ElementId::FontEntry),
            "Geom" => Some(ElementId::Geom),
            "Layer" => Some(ElementId::Layer),
            "LayerMem" => Some(ElementId::LayerMem),
            "Line" => Some(ElementId::Line),
            "LineTo" => Some(ElementId::LineTo),
            "Master" => Some(ElementId::Master),
            "MoveTo" => Some(ElementId::MoveTo),
            "PageSheet" => Some(ElementId::PageSheet),
            "Para" => Some(ElementId::Para),
            "Shape" => Some(ElementId::Shape),
            "Shapes" => Some(ElementId::Shapes),
            "StyleSheet" => Some(ElementId::StyleSheet),
            "Text" => Some(ElementId::Text),
            "TextXForm" => Some(ElementId::TextXForm),
            "XForm" => Some(ElementId::XForm),
            "XForm1D" => Some(ElementId::XForm1D),
            _ => None,
        }
    }
}
