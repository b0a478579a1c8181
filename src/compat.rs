// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! Codec for the legacy tagged-point array format.
//!
//! Old path tools flattened a whole path into one array of `(type, x, y)`
//! records: `1` an on-curve anchor, `2` a control handle, `3` an anchor that
//! also begins a new stroke, plus a single closed flag for the whole array.
//! Import rebuilds the stroke/anchor graph from such an array; export
//! flattens a path back, which only works when at most one stroke is open.
//!
//! The array has no per-stroke closed flags, so exporting a mix of open and
//! closed strokes conflates them into one flag and a re-import opens every
//! stroke. That lossiness is part of the format and is kept as is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchor::{Anchor, AnchorKind};
use crate::coords::Coord;
use crate::image::Image;
use crate::path::Path;
use crate::stroke::{Stroke, StrokeKind};

/// Errors for data the flat format cannot represent.
#[derive(Debug, Error)]
pub enum CompatError {
    /// The format has one trailing open run at most.
    #[error("more than one open stroke cannot be flattened")]
    MultipleOpenStrokes,
    /// A `type` discriminant outside the legacy set.
    #[error("unknown compat point type {0}")]
    UnknownPointType(u32),
}

/// The `type` discriminant of a legacy point record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompatPointType {
    Anchor = 1,
    Control = 2,
    NewStroke = 3,
}

impl From<CompatPointType> for u32 {
    fn from(kind: CompatPointType) -> u32 {
        kind as u32
    }
}

impl TryFrom<u32> for CompatPointType {
    type Error = CompatError;

    fn try_from(raw: u32) -> Result<Self, CompatError> {
        match raw {
            1 => Ok(CompatPointType::Anchor),
            2 => Ok(CompatPointType::Control),
            3 => Ok(CompatPointType::NewStroke),
            other => Err(CompatError::UnknownPointType(other)),
        }
    }
}

/// One record of the flat format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatPoint {
    #[serde(rename = "type")]
    pub kind: CompatPointType,
    pub x: f64,
    pub y: f64,
}

impl CompatPoint {
    pub fn new(kind: CompatPointType, x: f64, y: f64) -> Self {
        CompatPoint { kind, x, y }
    }
}

/// A path flattened to the legacy array.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatPoints {
    pub points: Vec<CompatPoint>,
    /// One flag for the whole array; true only when every stroke is closed.
    pub closed: bool,
}

/// Rebuild a path from a legacy point array.
///
/// The array is split at `NewStroke` markers; the marker itself becomes an
/// ordinary on-curve anchor at the head of the next run (a marker in the
/// very first slot is just a first point). Every run then gets the lead slot
/// its stroke expects:
///
/// - a run cut short by a marker copies its last point into the lead slot as
///   a control handle and stays open;
/// - the final run of an open array synthesizes a control handle at its
///   first point;
/// - the final run of a closed array moves its last point, kind and all,
///   into the lead slot, closing the loop.
///
/// Point kinds are otherwise carried through verbatim, so degenerate arrays
/// (an all-anchor polygon, say) survive a round trip unchanged. An empty
/// array yields a path with no strokes.
pub fn compat_new(name: impl Into<String>, points: &[CompatPoint], closed: bool) -> Path {
    let mut path = Path::new(name);

    let mut runs: Vec<Vec<Anchor>> = Vec::new();
    let mut run: Vec<Anchor> = Vec::new();

    for point in points {
        if point.kind == CompatPointType::NewStroke && !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
        let kind = match point.kind {
            CompatPointType::Control => AnchorKind::Control,
            CompatPointType::Anchor | CompatPointType::NewStroke => AnchorKind::OnCurve,
        };
        run.push(Anchor::new(kind, Coord::new(point.x, point.y)));
    }
    if !run.is_empty() {
        runs.push(run);
    }

    let n_runs = runs.len();
    for (index, mut run) in runs.into_iter().enumerate() {
        let is_final = index + 1 == n_runs;

        let stroke = if !is_final {
            // Marker close-out: the run's last point doubles as the lead.
            let lead = Anchor::control(run[run.len() - 1].position);
            run.insert(0, lead);
            Stroke::from_anchors(run, false)
        } else if closed {
            if let Some(lead) = run.pop() {
                run.insert(0, lead);
            }
            Stroke::from_anchors(run, true)
        } else {
            let lead = Anchor::control(run[0].position);
            run.insert(0, lead);
            Stroke::from_anchors(run, false)
        };

        path.stroke_add(stroke);
    }

    path
}

/// Flatten a path into a legacy point array.
///
/// Fails, with nothing emitted, when more than one stroke is open. Closed
/// strokes are emitted in stacking order with the open stroke, if any,
/// deferred to the very end (the format requires the open run last). Per
/// stroke the lead slot is skipped; closed strokes re-emit it verbatim at
/// their end. The first record of every stroke after the first is upgraded
/// to a `NewStroke` marker when it is on-curve.
pub fn compat_get_points(path: &Path) -> Result<CompatPoints, CompatError> {
    let open_count = path.strokes().iter().filter(|s| !s.is_closed()).count();
    if open_count > 1 {
        tracing::warn!(
            name = %path.name(),
            open_count,
            "path cannot be flattened to a legacy point array"
        );
        return Err(CompatError::MultipleOpenStrokes);
    }

    let closed = path.strokes().iter().all(|s| s.is_closed());

    let mut num_points = 0;
    for stroke in path.strokes() {
        if stroke.is_empty() {
            continue;
        }
        num_points += if stroke.is_closed() {
            stroke.anchor_count()
        } else {
            stroke.anchor_count() - 1
        };
    }

    let emission = path
        .strokes()
        .iter()
        .filter(|s| s.is_closed())
        .chain(path.strokes().iter().filter(|s| !s.is_closed()));

    let mut points = Vec::with_capacity(num_points);
    let mut first_stroke = true;

    for stroke in emission {
        if stroke.is_empty() {
            continue;
        }
        let anchors = stroke.anchors();

        for (i, anchor) in anchors.iter().enumerate().skip(1) {
            let mut kind = point_type(anchor.kind);
            if !first_stroke && i == 1 && kind == CompatPointType::Anchor {
                kind = CompatPointType::NewStroke;
            }
            points.push(CompatPoint::new(kind, anchor.position.x, anchor.position.y));
        }

        if stroke.is_closed() {
            let lead = anchors[0];
            points.push(CompatPoint::new(
                point_type(lead.kind),
                lead.position.x,
                lead.position.y,
            ));
        }

        first_stroke = false;
    }

    debug_assert_eq!(points.len(), num_points);

    Ok(CompatPoints { points, closed })
}

/// Whether every path of the image survives the flat format.
///
/// Requires each path to be invisible, made of bezier strokes only, and to
/// hold at most one open stroke.
pub fn compat_is_compatible(image: &Image) -> bool {
    for path in image.paths() {
        if path.visible() {
            return false;
        }

        let mut open_count = 0;
        for stroke in path.strokes() {
            if stroke.kind() != StrokeKind::Bezier {
                return false;
            }
            if !stroke.is_closed() {
                open_count += 1;
            }
        }
        if open_count > 1 {
            return false;
        }
    }

    true
}

fn point_type(kind: AnchorKind) -> CompatPointType {
    match kind {
        AnchorKind::OnCurve => CompatPointType::Anchor,
        AnchorKind::Control => CompatPointType::Control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(x: f64, y: f64) -> CompatPoint {
        CompatPoint::new(CompatPointType::Anchor, x, y)
    }

    fn c(x: f64, y: f64) -> CompatPoint {
        CompatPoint::new(CompatPointType::Control, x, y)
    }

    fn ns(x: f64, y: f64) -> CompatPoint {
        CompatPoint::new(CompatPointType::NewStroke, x, y)
    }

    fn square_stroke() -> Stroke {
        let mut stroke = Stroke::new_moveto(Coord::new(0.0, 0.0));
        stroke.lineto(Coord::new(10.0, 0.0));
        stroke.lineto(Coord::new(10.0, 10.0));
        stroke.lineto(Coord::new(0.0, 10.0));
        stroke.close();
        stroke
    }

    fn line_stroke() -> Stroke {
        let mut stroke = Stroke::new_moveto(Coord::new(20.0, 20.0));
        stroke.lineto(Coord::new(30.0, 20.0));
        stroke
    }

    #[test]
    fn test_single_open_stroke_round_trip() {
        let input = vec![a(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), a(3.0, 0.0), c(4.0, 0.0)];
        let path = compat_new("open", &input, false);

        assert_eq!(path.strokes().len(), 1);
        let stroke = &path.strokes()[0];
        assert!(!stroke.is_closed());
        assert_eq!(stroke.anchor_count(), 6);
        // The synthesized lead handle sits on the first point.
        assert_eq!(stroke.anchors()[0].kind, AnchorKind::Control);
        assert_eq!(stroke.anchors()[0].position, Coord::new(0.0, 0.0));

        let out = compat_get_points(&path).unwrap();
        assert!(!out.closed);
        assert_eq!(out.points, input);
    }

    #[test]
    fn test_closed_stroke_round_trip() {
        let input = vec![
            a(0.0, 0.0),
            c(1.0, 1.0),
            c(2.0, 2.0),
            a(3.0, 3.0),
            c(4.0, 4.0),
            c(5.0, 5.0),
        ];
        let path = compat_new("closed", &input, true);

        assert_eq!(path.strokes().len(), 1);
        let stroke = &path.strokes()[0];
        assert!(stroke.is_closed());
        assert_eq!(stroke.anchor_count(), 6);
        // The trailing handle moved into the lead slot.
        assert_eq!(stroke.anchors()[0].kind, AnchorKind::Control);
        assert_eq!(stroke.anchors()[0].position, Coord::new(5.0, 5.0));
        assert_eq!(stroke.anchors()[1].kind, AnchorKind::OnCurve);

        let out = compat_get_points(&path).unwrap();
        assert!(out.closed);
        assert_eq!(out.points, input);
    }

    #[test]
    fn test_all_anchor_square_round_trip() {
        // A 1.x polygon: four on-curve corners, no handles at all.
        let input = vec![a(0.0, 0.0), a(10.0, 0.0), a(10.0, 10.0), a(0.0, 10.0)];
        let path = compat_new("square", &input, true);

        assert_eq!(path.strokes().len(), 1);
        let stroke = &path.strokes()[0];
        assert!(stroke.is_closed());
        assert_eq!(stroke.anchor_count(), 4);
        assert!(stroke.anchors().iter().all(|an| an.kind == AnchorKind::OnCurve));

        let out = compat_get_points(&path).unwrap();
        assert!(out.closed);
        assert_eq!(out.points, input);
    }

    #[test]
    fn test_multi_stroke_order_and_markers() {
        let mut path = Path::new("multi");
        path.stroke_add(square_stroke());
        path.stroke_add(line_stroke());
        let mut far = square_stroke();
        far.translate(kurbo::Vec2::new(40.0, 40.0));
        path.stroke_add(far);

        let out = compat_get_points(&path).unwrap();
        // One open stroke makes the whole array open.
        assert!(!out.closed);
        // Two closed squares emit 12 records each, the open line 5.
        assert_eq!(out.points.len(), 29);

        // The open stroke was deferred behind both closed ones.
        assert_eq!(out.points[24].x, 20.0);
        assert_eq!(out.points[24].y, 20.0);

        let markers: Vec<usize> = out
            .points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == CompatPointType::NewStroke)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(markers, vec![12, 24]);

        // Closed strokes re-emit their lead handle at the end of their block.
        assert_eq!(out.points[11].kind, CompatPointType::Control);
        assert_eq!(out.points[23].kind, CompatPointType::Control);

        // The single closed flag cannot express the mix: a re-import opens
        // every stroke.
        let back = compat_new("multi", &out.points, out.closed);
        assert_eq!(back.strokes().len(), 3);
        assert!(back.strokes().iter().all(|s| !s.is_closed()));
    }

    #[test]
    fn test_two_open_strokes_are_rejected() {
        let mut path = Path::new("two open");
        path.stroke_add(line_stroke());
        path.stroke_add(line_stroke());

        let err = compat_get_points(&path).unwrap_err();
        assert!(matches!(err, CompatError::MultipleOpenStrokes));
    }

    #[test]
    fn test_empty_path_exports_empty_and_closed() {
        let out = compat_get_points(&Path::new("empty")).unwrap();
        assert!(out.points.is_empty());
        assert!(out.closed);
    }

    #[test]
    fn test_empty_input_imports_no_strokes() {
        let path = compat_new("none", &[], false);
        assert!(path.strokes().is_empty());
    }

    #[test]
    fn test_leading_marker_is_a_plain_point() {
        let input = vec![ns(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), a(3.0, 0.0), c(4.0, 0.0)];
        let path = compat_new("lead", &input, false);

        assert_eq!(path.strokes().len(), 1);
        let anchors = path.strokes()[0].anchors();
        assert_eq!(anchors[1].kind, AnchorKind::OnCurve);
        assert_eq!(anchors[1].position, Coord::new(0.0, 0.0));
    }

    #[test]
    fn test_consecutive_markers_split_runs() {
        let input = vec![a(0.0, 0.0), ns(5.0, 5.0), ns(9.0, 9.0)];
        let path = compat_new("tiny", &input, false);

        assert_eq!(path.strokes().len(), 3);
        for stroke in path.strokes() {
            assert_eq!(stroke.anchor_count(), 2);
            assert!(!stroke.is_closed());
            assert_eq!(stroke.anchors()[1].kind, AnchorKind::OnCurve);
        }
        assert_eq!(path.strokes()[1].anchors()[1].position, Coord::new(5.0, 5.0));
    }

    #[test]
    fn test_is_compatible() {
        let mut image = Image::new(64, 64);
        assert!(compat_is_compatible(&image));

        let mut path = Path::new("one open");
        path.stroke_add(square_stroke());
        path.stroke_add(line_stroke());
        image.add_path(path);
        assert!(compat_is_compatible(&image));

        image.paths_mut()[0].set_visible(true);
        assert!(!compat_is_compatible(&image));
        image.paths_mut()[0].set_visible(false);

        let mut two_open = Path::new("two open");
        two_open.stroke_add(line_stroke());
        two_open.stroke_add(line_stroke());
        image.add_path(two_open);
        assert!(!compat_is_compatible(&image));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(a(1.5, -2.0)).unwrap();
        assert_eq!(json, serde_json::json!({"type": 1, "x": 1.5, "y": -2.0}));

        let point: CompatPoint = serde_json::from_str(r#"{"type":3,"x":0.5,"y":4.0}"#).unwrap();
        assert_eq!(point, ns(0.5, 4.0));

        let bad = serde_json::from_str::<CompatPoint>(r#"{"type":7,"x":0.0,"y":0.0}"#);
        assert!(bad.is_err());
    }
}
