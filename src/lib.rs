// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vdxtree` converts a [Visio VDX] document into a simple diagram tree.

VDX is an XML interchange format for CAD-style diagrams. It is also a
fairly hostile one: values live in a mix of attributes and text-bearing
child elements, colors may be literal hex triplets or indices into a
per-document table, style properties cascade through per-domain parent
chains, and shape geometry is a list of drawing-operation rows that has
to be classified before it maps onto any sane primitive.

This crate hides all of that. It parses a VDX document and produces a
[`Diagram`]: an ordered list of layers, each holding vector objects
(lines, polylines, polygons, arcs, ellipses, Bezier paths, nested
groups and text) with already-transformed coordinates and fully
resolved style. Malformed input degrades to documented defaults instead
of failing; only an unreadable file, non-XML data or a non-Visio root
aborts the import.

Pages are laid out side by side on one flattened canvas, each page
shifted right by [`PAGE_WIDTH`]. Group transforms compose by
translation only; rotation and flip flags are ignored with a warning.

[Visio VDX]: https://learn.microsoft.com/en-us/office/client-developer/visio/xml-schema-reference-visio-xml
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

/// Extracts the first child record of the given variant.
macro_rules! find_child {
    ($rec:expr, $variant:ident) => {
        $rec.children.iter().find_map(|c| match c.data {
            crate::schema::RecordData::$variant(ref v) => Some(v),
            _ => None,
        })
    };
}

mod converter;
mod error;
mod geom;
mod names;
mod options;
mod schema;
mod session;
mod shapes;
mod style;
mod tree;
mod units;

pub use crate::error::*;
pub use crate::geom::{FuzzyEq, FuzzyZero, Point};
pub use crate::options::*;
pub use crate::tree::*;
pub use crate::units::PAGE_WIDTH;

impl Diagram {
    /// Parses a diagram from a VDX file.
    pub fn from_file(path: &std::path::Path, opt: &Options) -> Result<Diagram, Error> {
        let data = std::fs::read(path).map_err(|_| Error::FileOpenFailed)?;
        Diagram::from_data(&data, opt)
    }

    /// Parses a diagram from VDX data.
    pub fn from_data(data: &[u8], opt: &Options) -> Result<Diagram, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Diagram::from_str(text, opt)
    }

    /// Parses a diagram from a VDX string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str, opt: &Options) -> Result<Diagram, Error> {
        let xml = roxmltree::Document::parse(text)?;
        converter::convert_doc(&xml, opt)
    }
}
