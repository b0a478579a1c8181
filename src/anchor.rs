// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! The anchor value type: one on-curve or control point of a stroke.

use crate::coords::Coord;

/// What role an anchor plays in its stroke's curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// A point the curve passes through.
    OnCurve,
    /// An off-curve handle shaping the segment around its on-curve anchor.
    Control,
}

impl AnchorKind {
    pub fn is_on_curve(self) -> bool {
        self == AnchorKind::OnCurve
    }

    pub fn is_control(self) -> bool {
        self == AnchorKind::Control
    }
}

/// A single point of a stroke.
///
/// Anchors are plain values owned by exactly one stroke; `Clone` is the copy
/// operation and dropping releases them. The position is always well-defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub kind: AnchorKind,
    pub position: Coord,
    pub selected: bool,
}

impl Anchor {
    /// A new, unselected anchor of the given kind.
    pub fn new(kind: AnchorKind, position: Coord) -> Self {
        Anchor {
            kind,
            position,
            selected: false,
        }
    }

    /// Shorthand for an on-curve anchor.
    pub fn on_curve(position: Coord) -> Self {
        Anchor::new(AnchorKind::OnCurve, position)
    }

    /// Shorthand for a control handle.
    pub fn control(position: Coord) -> Self {
        Anchor::new(AnchorKind::Control, position)
    }
}
