// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The stylesheet cascade and the mapping of resolved style records onto
//! tree style values.
//!
//! Each style domain (fill, line, text) inherits through its own parent
//! index, so the chains may diverge at any ancestor. Stylesheet 0 is the
//! root: it has no parent and terminates every chain. An out-of-range
//! index acts as the root. Resolution is lazy, per lookup, with no
//! caching.

use crate::schema::{self, RecordData};
use crate::session::ImportSession;
use crate::tree::{Arrow, Color, LineCap, LineStyle, Stroke};
use crate::units;

macro_rules! cascade {
    ($name:ident, $variant:ident, $ty:ty, $parent:ident) => {
        pub(crate) fn $name<'a>(session: &'a ImportSession<'_>, index: u32) -> Option<&'a $ty> {
            let mut index = index;
            // The chain cannot be longer than the table without looping.
            for _ in 0..=session.stylesheet_count() {
                let sheet = session.stylesheet(index)?;
                if let Some(v) = find_child!(sheet, $variant) {
                    return Some(v);
                }

                if index == 0 {
                    return None;
                }

                index = match sheet.data {
                    RecordData::StyleSheet(ref s) => s.$parent,
                    _ => return None,
                };
            }

            log::warn!("Stylesheet {} has a looping parent chain.", index);
            None
        }
    };
}

cascade!(resolve_fill, Fill, schema::Fill, fill_style);
cascade!(resolve_line, Line, schema::Line, line_style);
cascade!(resolve_char, Char, schema::Char, text_style);
cascade!(resolve_para, Para, schema::Para, text_style);

/// Maps a resolved Line record onto a stroke.
///
/// An unresolved record falls back to the default stroke; pattern code 0
/// means the outline is not drawn at all.
pub(crate) fn convert_stroke(line: Option<&schema::Line>) -> Option<Stroke> {
    let line = match line {
        Some(line) => line,
        None => return Some(Stroke::default()),
    };

    if line.pattern == 0 {
        return None;
    }

    let width = line.weight * units::LINE_SCALE;
    let width = if width > 0.0 {
        width
    } else {
        Stroke::default().width
    };

    let style = match line.pattern {
        1 => LineStyle::Solid,
        3 => LineStyle::Dotted,
        4 => LineStyle::DashDot,
        _ => LineStyle::Dashed,
    };

    let cap = match line.cap {
        0 => LineCap::Round,
        1 => LineCap::Square,
        _ => LineCap::Butt,
    };

    Some(Stroke {
        width,
        color: line.color,
        style,
        dash_length: units::DASH_LENGTH,
        cap,
    })
}

/// Maps a resolved Fill record onto a fill color.
///
/// Pattern fills cannot be represented; pattern 1 (solid) keeps the
/// foreground and every other pattern degrades to the background color.
pub(crate) fn convert_fill(fill: Option<&schema::Fill>) -> Option<Color> {
    let fill = fill?;
    match fill.pattern {
        0 => None,
        1 => Some(fill.foreground),
        _ => Some(fill.background),
    }
}

/// Builds the begin/end arrowheads a Line record asks for.
pub(crate) fn convert_arrows(line: Option<&schema::Line>) -> (Option<Arrow>, Option<Arrow>) {
    let line = match line {
        Some(line) => line,
        None => return (None, None),
    };

    let begin = if line.begin_arrow != 0 {
        Some(make_arrow(line.begin_arrow_size))
    } else {
        None
    };

    let end = if line.end_arrow != 0 {
        Some(make_arrow(line.end_arrow_size))
    } else {
        None
    };

    (begin, end)
}

fn make_arrow(size_code: u32) -> Arrow {
    let code = if size_code > 6 { 0 } else { size_code as usize };
    let size = units::diagram_length(units::ARROW_SIZES[code] * units::ARROW_SCALE);
    Arrow {
        width: size,
        length: size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::session::SchemaRevision;

    fn with_session(stylesheets: &str, check: impl FnOnce(&ImportSession)) {
        let opt = Options::default();
        let text = format!("<StyleSheets>{}</StyleSheets>", stylesheets);
        let xml = roxmltree::Document::parse(&text).unwrap();
        let mut session = ImportSession::new(SchemaRevision::Visio2003, &opt);
        session.collect_stylesheets(xml.root_element());
        check(&session);
    }

    #[test]
    fn cascade_follows_domain_parent() {
        with_session(
            "<StyleSheet ID='0'>\
                <Line><LineWeight>0.01</LineWeight><LinePattern>1</LinePattern></Line>\
             </StyleSheet>\
             <StyleSheet ID='2' LineStyle='0' FillStyle='3'/>\
             <StyleSheet ID='3'>\
                <Fill><FillPattern>1</FillPattern></Fill>\
             </StyleSheet>",
            |session| {
                // The line chain ends at the root, the fill chain diverges to 3.
                assert!(resolve_line(session, 2).is_some());
                assert!(resolve_fill(session, 2).is_some());
                assert!(resolve_char(session, 2).is_none());
            },
        );
    }

    #[test]
    fn cascade_terminates_at_root() {
        with_session(
            "<StyleSheet ID='0'/><StyleSheet ID='1' FillStyle='0'/>",
            |session| {
                assert!(resolve_fill(session, 1).is_none());
            },
        );
    }

    #[test]
    fn cascade_survives_parent_cycle() {
        with_session(
            "<StyleSheet ID='0'/>\
             <StyleSheet ID='1' FillStyle='2'/>\
             <StyleSheet ID='2' FillStyle='1'/>",
            |session| {
                assert!(resolve_fill(session, 1).is_none());
            },
        );
    }

    #[test]
    fn out_of_range_index_acts_as_root() {
        with_session("<StyleSheet ID='0'/>", |session| {
            assert!(resolve_fill(session, 42).is_none());
        });
    }

    #[test]
    fn pattern_zero_means_no_stroke_and_no_fill() {
        let line = schema::Line::default();
        assert_eq!(convert_stroke(Some(&line)), None);

        let fill = schema::Fill::default();
        assert_eq!(convert_fill(Some(&fill)), None);
    }

    #[test]
    fn unresolved_line_falls_back_to_default_stroke() {
        assert_eq!(convert_stroke(None), Some(Stroke::default()));
    }
}
