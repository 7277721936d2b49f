// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The geometry classifier and plotter.
//!
//! A geometry section is an ordered list of drawing-operation rows. It
//! maps onto exactly one target object, picked in priority order: an
//! all-straight outline becomes a polygon or polyline depending on the
//! fill flag; a single non-move row becomes a line, arc or ellipse; any
//! remaining mix becomes a cubic Bezier path, closed when filled.

use crate::geom::Point;
use crate::schema::{self, GenericRecord, RecordData};
use crate::tree::{
    Arc, Arrow, Bezier, Beziergon, Color, Ellipse, Line, Object, PathSegment, Polygon, Polyline,
    Stroke,
};
use crate::units::{self, Translation};

const EPSILON: f64 = 1e-10;

/// Everything a geometry section needs besides its own rows: the active
/// transform and the already-resolved style.
pub(crate) struct Context<'a> {
    pub translation: Translation,
    pub xform1d: Option<&'a schema::XForm1D>,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
    pub start_arrow: Option<Arrow>,
    pub end_arrow: Option<Arrow>,
    pub page: usize,
}

impl Context<'_> {
    /// Maps a source point through the shape translation into diagram
    /// space.
    fn map(&self, p: Point) -> Point {
        units::diagram_point(self.translation.apply(p), self.page)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum TargetKind {
    Line,
    Polyline,
    Polygon,
    Arc,
    Ellipse,
    Bezier,
    Beziergon,
}

/// Converts one geometry section into at most one object.
///
/// A degenerate section (no drawing rows, or nothing to stroke and
/// nothing to fill) yields no object. This is normal for
/// construction-only shapes, not an error.
pub(crate) fn convert(
    geom: &schema::Geom,
    rows: &[GenericRecord],
    ctx: &Context,
) -> Option<Object> {
    let kind = classify(geom, rows, ctx)?;

    match kind {
        TargetKind::Line => plot_line(geom, rows, ctx),
        TargetKind::Polyline => plot_polyline(geom, rows, ctx),
        TargetKind::Polygon => plot_polygon(rows, ctx),
        TargetKind::Arc => plot_arc(geom, rows, ctx),
        TargetKind::Ellipse => plot_ellipse(rows, ctx),
        TargetKind::Bezier => plot_bezier(geom, rows, ctx),
        TargetKind::Beziergon => plot_beziergon(rows, ctx),
    }
}

fn classify(geom: &schema::Geom, rows: &[GenericRecord], ctx: &Context) -> Option<TargetKind> {
    let mut all_lines = true;
    let mut steps = 0;
    let mut last = None;

    for (i, row) in rows.iter().enumerate() {
        match row.data {
            RecordData::MoveTo(_) => {
                // Only a leading move keeps the outline a plain polyline.
                if i != 0 {
                    all_lines = false;
                }
            }
            RecordData::LineTo(_) => steps += 1,
            RecordData::ArcTo(_) | RecordData::EllipticalArcTo(_) | RecordData::Ellipse(_) => {
                all_lines = false;
                steps += 1;
            }
            _ => continue,
        }
        last = Some(&row.data);
    }

    last?;

    let mut kind = None;
    if all_lines {
        kind = Some(if geom.no_fill {
            TargetKind::Polyline
        } else {
            TargetKind::Polygon
        });
    }

    if steps == 1 {
        match last {
            Some(RecordData::ArcTo(_)) | Some(RecordData::EllipticalArcTo(_)) => {
                kind = Some(TargetKind::Arc)
            }
            Some(RecordData::Ellipse(_)) => kind = Some(TargetKind::Ellipse),
            Some(RecordData::LineTo(_)) => kind = Some(TargetKind::Line),
            _ => {}
        }

        // A 1-D transform carries the endpoints directly, so the section
        // is a connector-like line no matter what its single row says.
        if ctx.xform1d.is_some() {
            kind = Some(TargetKind::Line);
        }
    }

    Some(kind.unwrap_or(if geom.no_fill {
        TargetKind::Bezier
    } else {
        TargetKind::Beziergon
    }))
}

fn plot_line(geom: &schema::Geom, rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if geom.no_line {
        return None;
    }
    let stroke = ctx.stroke?;

    let (start, end) = if let Some(xform1d) = ctx.xform1d {
        // The 1-D endpoints already express rotation and scaling, so
        // they bypass the generic transform.
        let start = Point::new(xform1d.begin_x, xform1d.begin_y);
        let end = Point::new(xform1d.end_x, xform1d.end_y);
        (
            units::diagram_point(start, ctx.page),
            units::diagram_point(end, ctx.page),
        )
    } else {
        let (start, end) = line_endpoints(rows)?;
        (ctx.map(start), ctx.map(end))
    };

    Some(Object::Line(Line {
        start,
        end,
        stroke,
        start_arrow: ctx.start_arrow,
        end_arrow: ctx.end_arrow,
    }))
}

fn line_endpoints(rows: &[GenericRecord]) -> Option<(Point, Point)> {
    let mut start = Point::new(0.0, 0.0);
    let mut rows = rows.iter();
    let mut row = rows.next()?;

    if let RecordData::MoveTo(ref m) = row.data {
        start = Point::new(m.x, m.y);
        row = rows.next()?;
    }

    match row.data {
        RecordData::LineTo(ref l) => Some((start, Point::new(l.x, l.y))),
        ref other => {
            log::warn!("Unexpected line row: {:?}.", other);
            None
        }
    }
}

fn collect_points(rows: &[GenericRecord], ctx: &Context, kind: &str) -> Vec<Point> {
    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let p = match row.data {
            RecordData::MoveTo(ref m) => {
                if !points.is_empty() {
                    log::warn!("MoveTo after the start of a {}.", kind);
                }
                Point::new(m.x, m.y)
            }
            RecordData::LineTo(ref l) => Point::new(l.x, l.y),
            RecordData::Unknown(_) => continue,
            ref other => {
                log::warn!("Unexpected {} row: {:?}.", kind, other);
                continue;
            }
        };

        points.push(ctx.map(p));
    }

    points
}

fn plot_polyline(geom: &schema::Geom, rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if geom.no_line {
        return None;
    }
    let stroke = ctx.stroke?;

    let points = collect_points(rows, ctx, "polyline");
    if points.len() < 2 {
        log::warn!("Polyline has less than 2 points. Skipped.");
        return None;
    }

    Some(Object::Polyline(Polyline { points, stroke }))
}

fn plot_polygon(rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if ctx.stroke.is_none() && ctx.fill.is_none() {
        return None;
    }

    let points = collect_points(rows, ctx, "polygon");
    if points.len() < 2 {
        log::warn!("Polygon has less than 2 points. Skipped.");
        return None;
    }

    Some(Object::Polygon(Polygon {
        points,
        stroke: ctx.stroke,
        fill: ctx.fill,
    }))
}

fn plot_ellipse(rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if ctx.stroke.is_none() && ctx.fill.is_none() {
        return None;
    }

    let ellipse = rows.iter().find_map(|row| match row.data {
        RecordData::Ellipse(ref e) => Some(e),
        _ => None,
    })?;

    // The row stores the center plus one point on each axis.
    let center = Point::new(ellipse.x, ellipse.y);
    let width = 2.0 * center.distance(Point::new(ellipse.a, ellipse.b));
    let height = 2.0 * center.distance(Point::new(ellipse.c, ellipse.d));

    Some(Object::Ellipse(Ellipse {
        center: ctx.map(center),
        width: units::diagram_length(width),
        height: units::diagram_length(height),
        stroke: ctx.stroke,
        fill: ctx.fill,
    }))
}

/// The signed distance from the chord midpoint to the arc.
///
/// An arc row carries it directly; an elliptical-arc row carries a
/// control point on the arc instead, whose perpendicular offset from the
/// chord approximates it.
fn row_bulge(row: &RecordData, start: Point) -> Option<(Point, f64)> {
    match *row {
        RecordData::ArcTo(ref a) => Some((Point::new(a.x, a.y), a.a)),
        RecordData::EllipticalArcTo(ref e) => {
            let end = Point::new(e.x, e.y);
            let chord = end.distance(start);
            if chord < EPSILON {
                return Some((end, 0.0));
            }

            let vx = end.x - start.x;
            let vy = end.y - start.y;
            let bulge = (vx * (e.b - start.y) - vy * (e.a - start.x)) / chord;
            Some((end, bulge))
        }
        _ => None,
    }
}

fn plot_arc(geom: &schema::Geom, rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if geom.no_line {
        return None;
    }
    let stroke = ctx.stroke?;

    let mut start = Point::new(0.0, 0.0);
    let mut arc = None;
    for row in rows {
        match row.data {
            RecordData::MoveTo(ref m) => start = Point::new(m.x, m.y),
            ref other => {
                if let Some(found) = row_bulge(other, start) {
                    arc = Some(found);
                }
            }
        }
    }

    let (end, bulge) = arc?;

    // A flat arc degrades to a plain line.
    if bulge.abs() < EPSILON {
        return Some(Object::Line(Line {
            start: ctx.map(start),
            end: ctx.map(end),
            stroke,
            start_arrow: ctx.start_arrow,
            end_arrow: ctx.end_arrow,
        }));
    }

    let start = ctx.map(start);
    let end = ctx.map(end);
    let curve_distance = units::diagram_length(bulge);
    let chord = end.distance(start);
    let radius = (chord * chord + 4.0 * curve_distance * curve_distance) / (8.0 * curve_distance);

    Some(Object::Arc(Arc {
        start,
        end,
        curve_distance,
        radius,
        stroke,
        start_arrow: ctx.start_arrow,
        end_arrow: ctx.end_arrow,
    }))
}

fn bezier_segments(rows: &[GenericRecord], ctx: &Context) -> Vec<PathSegment> {
    let mut segments = Vec::with_capacity(rows.len());
    let mut current = Point::new(0.0, 0.0);

    for (i, row) in rows.iter().enumerate() {
        match row.data {
            RecordData::MoveTo(ref m) => {
                if i != 0 {
                    log::warn!("MoveTo not at the start of a Bezier.");
                }
                current = Point::new(m.x, m.y);
                let p = ctx.map(current);
                segments.push(PathSegment::MoveTo { x: p.x, y: p.y });
            }
            RecordData::LineTo(ref l) => {
                if segments.is_empty() {
                    log::warn!("MoveTo not at the start of a Bezier.");
                }
                current = Point::new(l.x, l.y);
                let p = ctx.map(current);
                segments.push(PathSegment::LineTo { x: p.x, y: p.y });
            }
            RecordData::ArcTo(_) | RecordData::EllipticalArcTo(_) => {
                if segments.is_empty() {
                    log::warn!("MoveTo not at the start of a Bezier.");
                }
                // `row_bulge` never fails for arc rows.
                if let Some((end, bulge)) = row_bulge(&row.data, current) {
                    let (c1, c2) = arc_control_points(current, end, bulge);
                    let (c1, c2, p) = (ctx.map(c1), ctx.map(c2), ctx.map(end));
                    segments.push(PathSegment::CurveTo {
                        x1: c1.x,
                        y1: c1.y,
                        x2: c2.x,
                        y2: c2.y,
                        x: p.x,
                        y: p.y,
                    });
                    current = end;
                }
            }
            RecordData::Unknown(_) => {}
            ref other => {
                log::warn!("Unexpected Bezier row: {:?}.", other);
            }
        }
    }

    segments
}

/// Derives the cubic control points of a circular arc from its endpoints
/// and bulge.
///
/// The control points lie along the arc tangents at the endpoints, with
/// the common distance chosen so the curve passes through the arc
/// midpoint at t = 0.5.
fn arc_control_points(start: Point, end: Point, bulge: f64) -> (Point, Point) {
    let straight = (
        Point::new(
            start.x + (end.x - start.x) / 3.0,
            start.y + (end.y - start.y) / 3.0,
        ),
        Point::new(
            start.x + (end.x - start.x) * 2.0 / 3.0,
            start.y + (end.y - start.y) * 2.0 / 3.0,
        ),
    );

    let vx = end.x - start.x;
    let vy = end.y - start.y;
    let chord2 = vx * vx + vy * vy;
    if chord2 < EPSILON || bulge.abs() < EPSILON {
        return straight;
    }
    let chord = chord2.sqrt();

    // Unit left normal of the chord; the bulge is measured along it.
    let nx = -vy / chord;
    let ny = vx / chord;

    // The arc midpoint and the circle center.
    let mx = (start.x + end.x) / 2.0 + nx * bulge;
    let my = (start.y + end.y) / 2.0 + ny * bulge;
    let radius = (chord2 + 4.0 * bulge * bulge) / (8.0 * bulge);
    let cx = mx - nx * radius;
    let cy = my - ny * radius;

    // Unit tangents at the endpoints, both oriented towards the arc
    // midpoint's side of the chord.
    let tangent_towards = |px: f64, py: f64| -> Option<(f64, f64)> {
        let (mut tx, mut ty) = (-(cy - py), cx - px);
        let len = (tx * tx + ty * ty).sqrt();
        if len < EPSILON {
            return None;
        }
        tx /= len;
        ty /= len;
        if tx * (mx - px) + ty * (my - py) < 0.0 {
            tx = -tx;
            ty = -ty;
        }
        Some((tx, ty))
    };

    let (t0x, t0y) = match tangent_towards(start.x, start.y) {
        Some(t) => t,
        None => return straight,
    };
    let (t3x, t3y) = match tangent_towards(end.x, end.y) {
        Some(t) => t,
        None => return straight,
    };

    let sx = t0x + t3x;
    let sy = t0y + t3y;
    let s2 = sx * sx + sy * sy;
    if s2 < EPSILON {
        return straight;
    }

    // B(0.5) = (start + end)/2 + 3k(T0 + T3)/8 must equal the arc
    // midpoint.
    let dx = mx - (start.x + end.x) / 2.0;
    let dy = my - (start.y + end.y) / 2.0;
    let k = (8.0 / 3.0) * (dx * sx + dy * sy) / s2;

    (
        Point::new(start.x + k * t0x, start.y + k * t0y),
        Point::new(end.x + k * t3x, end.y + k * t3y),
    )
}

fn plot_bezier(geom: &schema::Geom, rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if geom.no_line {
        return None;
    }
    let stroke = ctx.stroke?;

    let segments = bezier_segments(rows, ctx);
    if segments.len() < 2 {
        return None;
    }

    Some(Object::Bezier(Bezier {
        segments,
        stroke,
        start_arrow: ctx.start_arrow,
        end_arrow: ctx.end_arrow,
    }))
}

fn plot_beziergon(rows: &[GenericRecord], ctx: &Context) -> Option<Object> {
    if ctx.stroke.is_none() && ctx.fill.is_none() {
        return None;
    }

    let segments = bezier_segments(rows, ctx);
    if segments.len() < 2 {
        return None;
    }

    Some(Object::Beziergon(Beziergon {
        segments,
        stroke: ctx.stroke,
        fill: ctx.fill,
    }))
}
