// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! The extensible coordinate record and low-level bezier sampling.
//!
//! A [`Coord`] is a 2-D position plus the auxiliary input fields (pressure,
//! tilt, wheel) that ride along through every geometric operation. All
//! arithmetic here runs over the full field set so interpolated samples keep
//! blended auxiliary values, not just blended positions.

use std::ops::Sub;

use kurbo::Point;

/// Default pressure for a synthesized coordinate.
pub const DEFAULT_PRESSURE: f64 = 1.0;
/// Default pen tilt (both axes) for a synthesized coordinate.
pub const DEFAULT_TILT: f64 = 0.0;
/// Default airbrush wheel value for a synthesized coordinate.
pub const DEFAULT_WHEEL: f64 = 0.5;

/// Recursion cap for the midpoint-subdivision sampler.
const SUBDIVIDE_DEPTH: u32 = 10;

/// A point on (or controlling) a curve, with auxiliary input fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
    pub xtilt: f64,
    pub ytilt: f64,
    pub wheel: f64,
}

impl Default for Coord {
    fn default() -> Self {
        Coord {
            x: 0.0,
            y: 0.0,
            pressure: DEFAULT_PRESSURE,
            xtilt: DEFAULT_TILT,
            ytilt: DEFAULT_TILT,
            wheel: DEFAULT_WHEEL,
        }
    }
}

impl Coord {
    /// A coordinate at `(x, y)` with default auxiliary fields.
    pub fn new(x: f64, y: f64) -> Self {
        Coord {
            x,
            y,
            ..Coord::default()
        }
    }

    /// The 2-D position, dropping the auxiliary fields.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dot product over all fields.
    pub fn dot(self, other: Coord) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.pressure * other.pressure
            + self.xtilt * other.xtilt
            + self.ytilt * other.ytilt
            + self.wheel * other.wheel
    }

    /// Squared length over all fields.
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length over all fields.
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Coord) -> f64 {
        (self - other).length()
    }

    /// Manhattan distance to `other`, summed over all fields.
    pub fn manhattan_dist(self, other: Coord) -> f64 {
        (self.x - other.x).abs()
            + (self.y - other.y).abs()
            + (self.pressure - other.pressure).abs()
            + (self.xtilt - other.xtilt).abs()
            + (self.ytilt - other.ytilt).abs()
            + (self.wheel - other.wheel).abs()
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            pressure: self.pressure - rhs.pressure,
            xtilt: self.xtilt - rhs.xtilt,
            ytilt: self.ytilt - rhs.ytilt,
            wheel: self.wheel - rhs.wheel,
        }
    }
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Coord::new(p.x, p.y)
    }
}

/// Weighted mix `k1 * a + k2 * b` over all fields.
///
/// `mix(1.0 - t, a, t, b)` is linear interpolation; other weight pairs show
/// up in the bezier evaluation formulas.
pub fn mix(k1: f64, a: Coord, k2: f64, b: Coord) -> Coord {
    Coord {
        x: k1 * a.x + k2 * b.x,
        y: k1 * a.y + k2 * b.y,
        pressure: k1 * a.pressure + k2 * b.pressure,
        xtilt: k1 * a.xtilt + k2 * b.xtilt,
        ytilt: k1 * a.ytilt + k2 * b.ytilt,
        wheel: k1 * a.wheel + k2 * b.wheel,
    }
}

fn average(a: Coord, b: Coord) -> Coord {
    mix(0.5, a, 0.5, b)
}

/// Whether a cubic segment deviates from its chord by less than `precision`.
///
/// Compares each control point against the point a third of the way along
/// the ideal straight line; a true result means sampling the chord endpoints
/// is already accurate enough.
pub(crate) fn is_straight(segment: &[Coord; 4], precision: f64) -> bool {
    let pt1 = mix(2.0 / 3.0, segment[0], 1.0 / 3.0, segment[3]);
    let pt2 = mix(1.0 / 3.0, segment[0], 2.0 / 3.0, segment[3]);

    segment[1].manhattan_dist(pt1) < precision && segment[2].manhattan_dist(pt2) < precision
}

/// De Casteljau split of a cubic segment at t = 0.5.
///
/// Returns seven coordinates: `[0..=3]` is the first half, `[3..=6]` the
/// second, sharing the midpoint at index 3.
pub(crate) fn subdivide_in_half(segment: &[Coord; 4]) -> [Coord; 7] {
    let mid_handle = average(segment[1], segment[2]);
    let s1 = average(segment[0], segment[1]);
    let s5 = average(segment[2], segment[3]);
    let s2 = average(s1, mid_handle);
    let s4 = average(mid_handle, s5);
    let s3 = average(s2, s4);

    [segment[0], s1, s2, s3, s4, s5, segment[3]]
}

/// Sample one cubic segment into `out` at the given precision.
///
/// Emits the start point of every leaf sub-segment and *not* the final
/// endpoint; a caller stitching consecutive segments appends the last
/// endpoint once, after the final segment.
pub(crate) fn sample_segment(segment: &[Coord; 4], precision: f64, out: &mut Vec<Coord>) {
    sample_segment_rec(segment, precision, out, SUBDIVIDE_DEPTH);
}

fn sample_segment_rec(segment: &[Coord; 4], precision: f64, out: &mut Vec<Coord>, depth: u32) {
    if depth == 0 || is_straight(segment, precision) {
        out.push(segment[0]);
        return;
    }

    let sub = subdivide_in_half(segment);

    sample_segment_rec(&[sub[0], sub[1], sub[2], sub[3]], precision, out, depth - 1);
    sample_segment_rec(&[sub[3], sub[4], sub[5], sub[6]], precision, out, depth - 1);
}
