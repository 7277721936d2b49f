// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::geom::Point;
use crate::units;

/// A 8-bit RGB color.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Constructs a new `Color` from RGB values.
    #[inline]
    pub fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// Constructs a new `Color` set to black.
    #[inline]
    pub fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Constructs a new `Color` set to white.
    #[inline]
    pub fn white() -> Color {
        Color::new_rgb(255, 255, 255)
    }
}

/// A line cap.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// A dash pattern.
///
/// The source format stores dashing as a small enumerated pattern code;
/// codes without an exact counterpart map to `Dashed`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

/// A stroke style.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub style: LineStyle,
    pub dash_length: f64,
    pub cap: LineCap,
}

impl Default for Stroke {
    fn default() -> Stroke {
        Stroke {
            width: 0.1,
            color: Color::black(),
            style: LineStyle::Solid,
            dash_length: units::DASH_LENGTH,
            cap: LineCap::Round,
        }
    }
}

/// A filled-triangle arrowhead decoration.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Arrow {
    pub width: f64,
    pub length: f64,
}

/// A horizontal text alignment.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A path segment.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
}

/// A two-point line.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub stroke: Stroke,
    pub start_arrow: Option<Arrow>,
    pub end_arrow: Option<Arrow>,
}

/// An open run of straight segments.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub stroke: Stroke,
}

/// A closed run of straight segments.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

/// A circular arc between two points.
///
/// `curve_distance` is the signed distance from the chord midpoint to the
/// arc; `radius` is derived from it and the chord length.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub curve_distance: f64,
    pub radius: f64,
    pub stroke: Stroke,
    pub start_arrow: Option<Arrow>,
    pub end_arrow: Option<Arrow>,
}

/// An axis-aligned ellipse.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ellipse {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

/// An open cubic Bezier path.
///
/// The first segment is always a `MoveTo`.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Bezier {
    pub segments: Vec<PathSegment>,
    pub stroke: Stroke,
    pub start_arrow: Option<Arrow>,
    pub end_arrow: Option<Arrow>,
}

/// A closed cubic Bezier outline.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Beziergon {
    pub segments: Vec<PathSegment>,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

/// A group of objects.
///
/// Group nesting from the source document is preserved, not flattened.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Group {
    pub children: Vec<Object>,
}

/// A text label.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub font_family: String,
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
}

/// A diagram object.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum Object {
    Line(Line),
    Polyline(Polyline),
    Polygon(Polygon),
    Arc(Arc),
    Ellipse(Ellipse),
    Bezier(Bezier),
    Beziergon(Beziergon),
    Group(Group),
    Text(Text),
}

/// A diagram layer: a named, ordered list of objects.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Layer {
    pub name: String,
    pub objects: Vec<Object>,
}

impl Layer {
    /// Creates a new, empty layer.
    pub fn new(name: impl Into<String>) -> Layer {
        Layer {
            name: name.into(),
            objects: Vec::new(),
        }
    }
}

/// A diagram: an ordered list of layers.
///
/// Layers are stored back-to-front, so later layers paint above earlier
/// ones.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Diagram {
    /// The diagram layers, back to front.
    pub layers: Vec<Layer>,
    active: usize,
}

impl Diagram {
    /// Appends a new layer and makes it the active one.
    ///
    /// Returns the index of the new layer.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(Layer::new(name));
        self.active = self.layers.len() - 1;
        self.active
    }

    /// Returns the index of the active layer.
    pub fn active_layer(&self) -> usize {
        self.active
    }

    /// Appends an object to the given layer, or to the active layer when
    /// `layer` is `None`.
    ///
    /// A diagram without layers gets a default one first.
    pub(crate) fn route(&mut self, layer: Option<usize>, object: Object) {
        if self.layers.is_empty() {
            self.add_layer("Background");
        }

        let index = match layer {
            Some(index) if index < self.layers.len() => index,
            _ => self.active,
        };

        self.layers[index].objects.push(object);
    }
}
