// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! Tuning constants.
//!
//! This module holds the sampling precisions and the binary's defaults.
//! Nothing here changes behavior semantically; it only trades fidelity
//! against work.

// ============================================================================
// SAMPLING SETTINGS
// ============================================================================
/// Default precision for path-level queries (length, hit tests).
///
/// Precision bounds how far a sampled segment's control points may sit from
/// the chord before subdivision stops; smaller is denser.
const PATH_PRECISION: f64 = 0.2;

/// Precision used by the preview renderer.
///
/// Previews are tiny, so a coarser sampling is plenty.
const PREVIEW_PRECISION: f64 = 0.5;

// ============================================================================
// PREVIEW SETTINGS
// ============================================================================
/// Default preview edge length (pixels) used by the binary.
const PREVIEW_SIZE: u32 = 128;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Sampling precisions.
pub mod sampling {
    /// Default path-level sampling precision.
    pub const PATH_PRECISION: f64 = super::PATH_PRECISION;

    /// Preview sampling precision.
    pub const PREVIEW_PRECISION: f64 = super::PREVIEW_PRECISION;
}

/// Preview buffer defaults.
pub mod preview {
    /// Default preview width and height used by the binary.
    pub const SIZE: u32 = super::PREVIEW_SIZE;
}
