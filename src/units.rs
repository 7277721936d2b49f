// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The source-space to diagram-space mapping.
//!
//! Source coordinates are in inches with the Y axis pointing up. Diagram
//! coordinates are in centimeters with the Y axis pointing down, shifted
//! so that a page's top-left lands in positive space. Successive pages are
//! laid out left to right on one flattened canvas, one `PAGE_WIDTH` apart.

use crate::geom::Point;
use crate::schema;

/// The horizontal stride between successive pages on the flattened canvas.
pub const PAGE_WIDTH: f64 = 30.0;

pub(crate) const POINT_SCALE: f64 = 2.54;
pub(crate) const LINE_SCALE: f64 = 2.54;
pub(crate) const FONT_SCALE: f64 = 2.54;
pub(crate) const Y_OFFSET: f64 = 24.0;
pub(crate) const Y_FLIP: f64 = -1.0;
pub(crate) const DASH_LENGTH: f64 = 0.2;

/// Arrowhead sizes in source units, indexed by the arrow-size code.
pub(crate) const ARROW_SIZES: [f64; 7] = [0.0625, 0.09375, 0.125, 0.1875, 0.25, 0.375, 0.5];
pub(crate) const ARROW_SCALE: f64 = 1.25;

/// Maps a source-space point into diagram space.
pub(crate) fn diagram_point(p: Point, page: usize) -> Point {
    Point::new(
        POINT_SCALE * p.x + PAGE_WIDTH * page as f64,
        Y_OFFSET + Y_FLIP * POINT_SCALE * p.y,
    )
}

/// Maps a source-space length into diagram space.
pub(crate) fn diagram_length(length: f64) -> f64 {
    POINT_SCALE * length
}

/// The translation part of a shape transform.
///
/// Shape and group transforms compose by translation only. Rotation and
/// flip are not propagated; the converter warns when it drops them.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub(crate) struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    /// The pin minus local-pin offset of a transform record.
    pub fn from_xform(xform: &schema::XForm) -> Translation {
        Translation {
            x: xform.pin_x - xform.loc_pin_x,
            y: xform.pin_y - xform.loc_pin_y,
        }
    }

    /// Adds another translation, e.g. the owning group's.
    pub fn compose(self, other: Translation) -> Translation {
        Translation {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Applies the translation to a source-space point.
    pub fn apply(self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }
}
