// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! One connected contour of a path.
//!
//! A [`Stroke`] owns an ordered run of [`Anchor`]s and an open/closed flag.
//! Curve behavior (sampling, descriptor building, hit queries) is dispatched
//! on [`StrokeKind`]; bezier is the only family today. Bezier strokes store
//! anchors in control/on-curve/control triples, usually with one leading
//! control handle, so a well-formed run is a multiple of three long (or one
//! more than that when it starts directly at an on-curve anchor).

pub mod bezier;

use kurbo::{Affine, BezPath, Vec2};

use crate::anchor::Anchor;
use crate::coords::{Coord, mix};

/// The curve family a stroke belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    /// Cubic bezier segments between on-curve anchors.
    Bezier,
}

/// Shape classes of a stroke's anchor run.
///
/// Interpolation refuses `Empty` and `Malformed` runs; everything else in
/// the crate tolerates them as benign degenerate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeValidity {
    Empty,
    ValidOpen,
    ValidClosed,
    Malformed,
}

/// A sample on a stroke at a requested arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAtDist {
    pub position: Coord,
    /// `dy/dx` of the containing sample segment; infinite when vertical.
    pub slope: f64,
}

/// Result of a nearest-point query against a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// The closest point on the curve.
    pub point: Coord,
    /// Euclidean distance from the query to `point`.
    pub distance: f64,
    /// Approximate bezier parameter of `point` within its segment.
    pub t: f64,
}

/// One open or closed contour.
#[derive(Debug, Clone)]
pub struct Stroke {
    kind: StrokeKind,
    id: Option<u32>,
    closed: bool,
    anchors: Vec<Anchor>,
}

impl Stroke {
    /// An empty open bezier stroke.
    pub fn new_bezier() -> Self {
        Stroke {
            kind: StrokeKind::Bezier,
            id: None,
            closed: false,
            anchors: Vec::new(),
        }
    }

    /// A bezier stroke built from an explicit anchor run.
    ///
    /// The run is stored verbatim; validity is classified lazily, so callers
    /// that assemble their own runs (the compat importer) keep full control
    /// of kinds and ordering.
    pub(crate) fn from_anchors(anchors: Vec<Anchor>, closed: bool) -> Self {
        Stroke {
            kind: StrokeKind::Bezier,
            id: None,
            closed,
            anchors,
        }
    }

    /// A bezier stroke from a flat coordinate array.
    ///
    /// Requires at least three coordinates and a multiple of three overall;
    /// they are typed positionally into control/on-curve/control triples.
    /// Returns `None` (with a log record) when the shape is wrong.
    pub fn from_coords(coords: &[Coord], closed: bool) -> Option<Self> {
        bezier::from_coords(coords, closed)
    }

    /// A new open bezier stroke whose first anchor sits at `start`.
    pub fn new_moveto(start: Coord) -> Self {
        bezier::new_moveto(start)
    }

    /// Append a straight segment ending at `end`.
    ///
    /// # Panics
    /// The stroke must be open and non-empty.
    pub fn lineto(&mut self, end: Coord) {
        match self.kind {
            StrokeKind::Bezier => bezier::lineto(self, end),
        }
    }

    /// Append a quadratic segment, promoted to the equivalent cubic.
    ///
    /// # Panics
    /// The stroke must be open and hold more than one anchor.
    pub fn conicto(&mut self, control: Coord, end: Coord) {
        match self.kind {
            StrokeKind::Bezier => bezier::conicto(self, control, end),
        }
    }

    /// Append a cubic segment with explicit handles.
    ///
    /// # Panics
    /// The stroke must be open and non-empty.
    pub fn cubicto(&mut self, control1: Coord, control2: Coord, end: Coord) {
        match self.kind {
            StrokeKind::Bezier => bezier::cubicto(self, control1, control2, end),
        }
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    /// The id assigned by the owning path, if any.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: u32) {
        debug_assert!(self.id.is_none(), "stroke already owned by a path");
        self.id = Some(id);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the stroke closed (the last anchor connects back to the first).
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub(crate) fn anchors_mut(&mut self) -> &mut Vec<Anchor> {
        &mut self.anchors
    }

    /// Classify the anchor run against the triple bookkeeping.
    pub fn validity(&self) -> StrokeValidity {
        let n = self.anchors.len();
        if n == 0 {
            return StrokeValidity::Empty;
        }
        if self.closed {
            if n % 3 == 0 {
                StrokeValidity::ValidClosed
            } else {
                StrokeValidity::Malformed
            }
        } else {
            // A leading-control run is a multiple of three; a run starting
            // right at an on-curve anchor is one longer. Both sample cleanly.
            match n % 3 {
                0 | 1 => StrokeValidity::ValidOpen,
                _ => StrokeValidity::Malformed,
            }
        }
    }

    /// Select or deselect the anchor at `index`.
    ///
    /// With `exclusive` set, every other anchor is deselected first.
    /// Returns false when the index is out of range.
    pub fn select_anchor(&mut self, index: usize, selected: bool, exclusive: bool) -> bool {
        if exclusive {
            for anchor in &mut self.anchors {
                anchor.selected = false;
            }
        }
        match self.anchors.get_mut(index) {
            Some(anchor) => {
                anchor.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Sample the stroke into a flat point run at the given precision.
    ///
    /// Returns the samples and the closed flag, or `None` for empty,
    /// malformed, or segment-less strokes. Smaller precision means denser
    /// sampling; there is no point cap.
    pub fn interpolate(&self, precision: f64) -> Option<(Vec<Coord>, bool)> {
        match self.kind {
            StrokeKind::Bezier => bezier::interpolate(self, precision),
        }
    }

    /// Arc length accumulated over the interpolated samples.
    ///
    /// Zero when the stroke yields fewer than two samples.
    pub fn get_length(&self, precision: f64) -> f64 {
        let Some((points, _)) = self.interpolate(precision) else {
            return 0.0;
        };
        points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// The point at arc length `dist` from the stroke start.
    ///
    /// `None` when the stroke is shorter than `dist` or yields no samples.
    pub fn point_at_dist(&self, dist: f64, precision: f64) -> Option<PointAtDist> {
        let (points, _) = self.interpolate(precision)?;

        let mut length = 0.0;
        for w in points.windows(2) {
            let segment_length = w[0].distance(w[1]);
            if length + segment_length < dist {
                length += segment_length;
                continue;
            }
            if segment_length == 0.0 {
                continue;
            }

            let u = (dist - length) / segment_length;
            let position = mix(1.0 - u, w[0], u, w[1]);
            let slope = if w[1].x == w[0].x {
                f64::INFINITY
            } else {
                (w[1].y - w[0].y) / (w[1].x - w[0].x)
            };
            return Some(PointAtDist { position, slope });
        }

        None
    }

    /// The closest point on the stroke to `coord`.
    pub fn nearest_point(&self, coord: Coord, precision: f64) -> Option<NearestPoint> {
        match self.kind {
            StrokeKind::Bezier => bezier::nearest_point(self, coord, precision),
        }
    }

    /// The stroke's renderer-consumable descriptor fragment.
    ///
    /// `None` when the run cannot form complete triples.
    pub fn make_bezier(&self) -> Option<BezPath> {
        match self.kind {
            StrokeKind::Bezier => bezier::make_bezier(self),
        }
    }

    /// Shift every anchor by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        for anchor in &mut self.anchors {
            anchor.position.x += offset.x;
            anchor.position.y += offset.y;
        }
    }

    /// Apply an affine map to every anchor position.
    pub fn transform(&mut self, affine: Affine) {
        for anchor in &mut self.anchors {
            let p = affine * anchor.position.to_point();
            anchor.position.x = p.x;
            anchor.position.y = p.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::AnchorKind;

    fn line_stroke() -> Stroke {
        let mut stroke = Stroke::new_moveto(Coord::new(0.0, 0.0));
        stroke.lineto(Coord::new(10.0, 0.0));
        stroke
    }

    #[test]
    fn test_moveto_builds_one_triple() {
        let stroke = Stroke::new_moveto(Coord::new(2.0, 3.0));
        let kinds: Vec<_> = stroke.anchors().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AnchorKind::Control, AnchorKind::OnCurve, AnchorKind::Control]
        );
        assert!(stroke.anchors().iter().all(|a| a.position.x == 2.0));
        assert!(!stroke.is_closed());
    }

    #[test]
    fn test_lineto_appends_a_triple() {
        let stroke = line_stroke();
        assert_eq!(stroke.anchor_count(), 6);
        assert_eq!(stroke.validity(), StrokeValidity::ValidOpen);

        // The new triple sits at the line end.
        for anchor in &stroke.anchors()[3..] {
            assert_eq!(anchor.position.x, 10.0);
            assert_eq!(anchor.position.y, 0.0);
        }
    }

    #[test]
    fn test_cubicto_moves_trailing_handle() {
        let mut stroke = Stroke::new_moveto(Coord::new(0.0, 0.0));
        stroke.cubicto(
            Coord::new(0.0, 5.0),
            Coord::new(10.0, 5.0),
            Coord::new(10.0, 0.0),
        );

        // The trailing handle of the start triple was retargeted to control1.
        assert_eq!(stroke.anchors()[2].position, Coord::new(0.0, 5.0));
        assert_eq!(stroke.anchors()[3].position, Coord::new(10.0, 5.0));
        assert_eq!(stroke.anchors()[4].position, Coord::new(10.0, 0.0));
        assert_eq!(stroke.anchor_count(), 6);
    }

    #[test]
    fn test_validity_classes() {
        let mut stroke = Stroke::new_bezier();
        assert_eq!(stroke.validity(), StrokeValidity::Empty);

        stroke = line_stroke();
        assert_eq!(stroke.validity(), StrokeValidity::ValidOpen);

        stroke.close();
        assert_eq!(stroke.validity(), StrokeValidity::ValidClosed);

        // Two anchors cannot form triples in any reading.
        let broken = Stroke::from_anchors(
            vec![
                Anchor::on_curve(Coord::new(0.0, 0.0)),
                Anchor::control(Coord::new(1.0, 0.0)),
            ],
            false,
        );
        assert_eq!(broken.validity(), StrokeValidity::Malformed);
    }

    #[test]
    fn test_length_of_straight_line() {
        let stroke = line_stroke();
        let length = stroke.get_length(0.1);
        assert!((length - 10.0).abs() < 1e-6, "length was {length}");
    }

    #[test]
    fn test_length_degenerate_is_zero() {
        let empty = Stroke::new_bezier();
        assert_eq!(empty.get_length(0.2), 0.0);

        // One triple holds a single on-curve anchor: no segment, no length.
        let dot = Stroke::new_moveto(Coord::new(4.0, 4.0));
        assert_eq!(dot.get_length(0.2), 0.0);
    }

    #[test]
    fn test_point_at_dist_midline() {
        let stroke = line_stroke();
        let hit = stroke.point_at_dist(5.0, 0.1).unwrap();
        assert!((hit.position.x - 5.0).abs() < 1e-6);
        assert!(hit.position.y.abs() < 1e-9);
        assert!(hit.slope.abs() < 1e-9);

        // Beyond the end there is no point.
        assert!(stroke.point_at_dist(11.0, 0.1).is_none());
    }

    #[test]
    fn test_point_at_dist_vertical_slope() {
        let mut stroke = Stroke::new_moveto(Coord::new(0.0, 0.0));
        stroke.lineto(Coord::new(0.0, 10.0));
        let hit = stroke.point_at_dist(5.0, 0.1).unwrap();
        assert!(hit.slope.is_infinite());
        assert!((hit.position.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_select_anchor_exclusive() {
        let mut stroke = line_stroke();
        assert!(stroke.select_anchor(1, true, false));
        assert!(stroke.select_anchor(4, true, false));
        assert_eq!(stroke.anchors().iter().filter(|a| a.selected).count(), 2);

        assert!(stroke.select_anchor(1, true, true));
        let selected: Vec<_> = stroke
            .anchors()
            .iter()
            .enumerate()
            .filter(|(_, a)| a.selected)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(selected, vec![1]);

        assert!(!stroke.select_anchor(99, true, false));
    }

    #[test]
    fn test_translate_and_transform() {
        let mut stroke = line_stroke();
        stroke.translate(Vec2::new(1.0, 2.0));
        assert_eq!(stroke.anchors()[1].position, Coord::new(1.0, 2.0));

        stroke.transform(Affine::scale(2.0));
        assert_eq!(stroke.anchors()[1].position, Coord::new(2.0, 4.0));
        // Auxiliary fields are untouched by geometry transforms.
        assert_eq!(stroke.anchors()[1].position.pressure, 1.0);
    }
}
