// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! The bezier curve family.
//!
//! Anchor runs are stored as control/on-curve/control triples. Sampling and
//! hit queries walk the run from the first on-curve anchor, consuming
//! `[start, handle, handle, end]` position quadruples; closed strokes add a
//! wrap segment through the leading control handle back to the first
//! on-curve anchor. Handles on the ends of an open run dangle and take no
//! part in any walk.

use kurbo::BezPath;

use crate::anchor::Anchor;
use crate::coords::{Coord, is_straight, mix, sample_segment, subdivide_in_half};
use crate::stroke::{NearestPoint, Stroke, StrokeValidity};

/// Recursion cap for nearest-point subdivision.
const NEAREST_DEPTH: u32 = 10;

/// Build a stroke from a flat coordinate run, typed positionally.
pub(crate) fn from_coords(coords: &[Coord], closed: bool) -> Option<Stroke> {
    if coords.len() < 3 || coords.len() % 3 != 0 {
        tracing::warn!(
            n_coords = coords.len(),
            "coordinate run cannot form bezier triples"
        );
        return None;
    }

    let anchors = coords
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            if i % 3 == 1 {
                Anchor::on_curve(position)
            } else {
                Anchor::control(position)
            }
        })
        .collect();

    Some(Stroke::from_anchors(anchors, closed))
}

/// A fresh open stroke holding one triple at `start`.
pub(crate) fn new_moveto(start: Coord) -> Stroke {
    Stroke::from_anchors(
        vec![
            Anchor::control(start),
            Anchor::on_curve(start),
            Anchor::control(start),
        ],
        false,
    )
}

pub(crate) fn lineto(stroke: &mut Stroke, end: Coord) {
    assert!(!stroke.is_closed(), "lineto requires an open stroke");
    assert!(!stroke.is_empty(), "lineto requires a started stroke");

    let anchors = stroke.anchors_mut();
    anchors.push(Anchor::control(end));
    anchors.push(Anchor::on_curve(end));
    anchors.push(Anchor::control(end));
}

pub(crate) fn conicto(stroke: &mut Stroke, control: Coord, end: Coord) {
    assert!(!stroke.is_closed(), "conicto requires an open stroke");
    assert!(stroke.anchor_count() > 1, "conicto requires a started stroke");

    let anchors = stroke.anchors_mut();
    let start = anchors[anchors.len() - 2].position;

    // Promote the quadratic control point to the two cubic handles.
    let last = anchors.len() - 1;
    anchors[last].position = mix(2.0 / 3.0, control, 1.0 / 3.0, start);
    anchors.push(Anchor::control(mix(2.0 / 3.0, control, 1.0 / 3.0, end)));
    anchors.push(Anchor::on_curve(end));
    anchors.push(Anchor::control(end));
}

pub(crate) fn cubicto(stroke: &mut Stroke, control1: Coord, control2: Coord, end: Coord) {
    assert!(!stroke.is_closed(), "cubicto requires an open stroke");
    assert!(!stroke.is_empty(), "cubicto requires a started stroke");

    let anchors = stroke.anchors_mut();
    let last = anchors.len() - 1;
    anchors[last].position = control1;
    anchors.push(Anchor::control(control2));
    anchors.push(Anchor::on_curve(end));
    anchors.push(Anchor::control(end));
}

/// Sample the stroke at `precision`; see [`Stroke::interpolate`].
pub(crate) fn interpolate(stroke: &Stroke, precision: f64) -> Option<(Vec<Coord>, bool)> {
    match stroke.validity() {
        StrokeValidity::Empty => return None,
        StrokeValidity::Malformed => {
            tracing::debug!(
                anchors = stroke.anchor_count(),
                closed = stroke.is_closed(),
                "refusing to interpolate malformed stroke"
            );
            return None;
        }
        StrokeValidity::ValidOpen | StrokeValidity::ValidClosed => {}
    }

    let anchors = stroke.anchors();
    let mut out = Vec::new();
    let mut seg = [Coord::default(); 4];
    let mut count = 0;
    let mut need_endpoint = false;

    let first_on_curve = anchors.iter().position(|a| a.kind.is_on_curve());

    if let Some(start) = first_on_curve {
        for anchor in &anchors[start..] {
            seg[count] = anchor.position;
            count += 1;

            if count == 4 {
                sample_segment(&seg, precision, &mut out);
                seg[0] = seg[3];
                count = 1;
                need_endpoint = true;
            }
        }
    }

    if stroke.is_closed() {
        // Wrap through the leading handle back to the first on-curve anchor.
        while count < 3 {
            seg[count] = anchors[0].position;
            count += 1;
        }
        seg[3] = anchors.get(1).map_or(seg[0], |a| a.position);

        sample_segment(&seg, precision, &mut out);
        need_endpoint = true;
    }

    if need_endpoint {
        out.push(seg[3]);
    }

    if out.is_empty() {
        None
    } else {
        Some((out, stroke.is_closed()))
    }
}

/// Emit the stroke's descriptor fragment; see [`Stroke::make_bezier`].
pub(crate) fn make_bezier(stroke: &Stroke) -> Option<BezPath> {
    let points: Vec<Coord> = stroke.anchors().iter().map(|a| a.position).collect();

    if points.len() < 3 || points.len() % 3 != 0 {
        return None;
    }

    let mut path = BezPath::new();
    path.move_to(points[1].to_point());

    let mut i = 2;
    while i + 2 < points.len() {
        path.curve_to(
            points[i].to_point(),
            points[i + 1].to_point(),
            points[i + 2].to_point(),
        );
        i += 3;
    }

    if stroke.is_closed() {
        path.curve_to(
            points[i].to_point(),
            points[0].to_point(),
            points[1].to_point(),
        );
        path.close_path();
    }

    Some(path)
}

/// Closest point on the stroke to `coord`; see [`Stroke::nearest_point`].
pub(crate) fn nearest_point(stroke: &Stroke, coord: Coord, precision: f64) -> Option<NearestPoint> {
    let anchors = stroke.anchors();
    let start = anchors.iter().position(|a| a.kind.is_on_curve())?;

    let mut seg = [Coord::default(); 4];
    let mut count = 0;
    let mut best: Option<NearestPoint> = None;

    let consider = |seg: &[Coord; 4], best: &mut Option<NearestPoint>| {
        let (distance, point, t) = segment_nearest_point(seg, coord, precision, NEAREST_DEPTH);
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            *best = Some(NearestPoint { point, distance, t });
        }
    };

    for anchor in &anchors[start..] {
        seg[count] = anchor.position;
        count += 1;

        if count == 4 {
            consider(&seg, &mut best);
            seg[0] = seg[3];
            count = 1;
        }
    }

    if stroke.is_closed() {
        while count < 3 {
            seg[count] = anchors[0].position;
            count += 1;
        }
        seg[3] = anchors.get(1).map_or(seg[0], |a| a.position);

        consider(&seg, &mut best);
    }

    best
}

fn segment_nearest_point(
    seg: &[Coord; 4],
    coord: Coord,
    precision: f64,
    depth: u32,
) -> (f64, Coord, f64) {
    let handle1 = seg[1] - seg[0];
    let handle2 = seg[3] - seg[2];

    if depth == 0
        || (is_straight(seg, precision)
            && handle1.length_squared() < precision
            && handle2.length_squared() < precision)
    {
        let line = seg[3] - seg[0];
        let dcoord = coord - seg[0];

        let length2 = line.dot(line);
        let scalar = if length2 > 0.0 {
            (line.dot(dcoord) / length2).clamp(0.0, 1.0)
        } else {
            0.0
        };

        // A straight run of the cubic is parametrized differently from the
        // chord itself: recover t such that 3t^2(1-t) + t^3 equals the chord
        // fraction.
        let mut t = 0.5;
        let mut step = 0.5;
        for _ in 0..=15 {
            step *= 0.5;
            if 3.0 * t * t * (1.0 - t) + t * t * t < scalar {
                t += step;
            } else {
                t -= step;
            }
        }

        let point = mix(1.0, seg[0], scalar, line);
        let distance = (coord - point).length();
        (distance, point, t)
    } else {
        let sub = subdivide_in_half(seg);

        let (d1, p1, t1) =
            segment_nearest_point(&[sub[0], sub[1], sub[2], sub[3]], coord, precision, depth - 1);
        let (d2, p2, t2) =
            segment_nearest_point(&[sub[3], sub[4], sub[5], sub[6]], coord, precision, depth - 1);

        if d1 <= d2 {
            (d1, p1, 0.5 * t1)
        } else {
            (d2, p2, 0.5 + 0.5 * t2)
        }
    }
}
