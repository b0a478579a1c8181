// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! A named, ordered collection of strokes.
//!
//! [`Path`] owns its strokes, hands out ids when they are added, and keeps a
//! lazily rebuilt cache of the combined bezier descriptor and its bounding
//! box. Every mutating method runs inside a freeze/thaw pair: the outermost
//! freeze drops the cache, the matching thaw delivers at most one change
//! notification no matter how many mutations happened in between. Callers
//! batching several mutations wrap them in their own freeze/thaw.

use std::fmt;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Rect, Shape, Vec2};

use crate::settings;
use crate::stroke::Stroke;

/// Combined descriptor and bounds, always rebuilt together.
struct PathCache {
    descriptor: Arc<BezPath>,
    bounds: Option<Rect>,
}

/// An ordered collection of strokes with change batching.
pub struct Path {
    name: String,
    visible: bool,
    strokes: Vec<Stroke>,
    last_stroke_id: u32,
    precision: f64,
    freeze_count: u32,
    pending_change: bool,
    cache: Option<PathCache>,
    observer: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("strokes", &self.strokes)
            .field("last_stroke_id", &self.last_stroke_id)
            .field("freeze_count", &self.freeze_count)
            .finish_non_exhaustive()
    }
}

impl Path {
    /// An empty, invisible path.
    pub fn new(name: impl Into<String>) -> Self {
        Path {
            name: name.into(),
            visible: false,
            strokes: Vec::new(),
            last_stroke_id: 0,
            precision: settings::sampling::PATH_PRECISION,
            freeze_count: 0,
            pending_change: false,
            cache: None,
            observer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Sampling precision used by path-level queries.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Append a stroke and return the id assigned to it.
    pub fn stroke_add(&mut self, mut stroke: Stroke) -> u32 {
        self.freeze();
        let id = self.last_stroke_id + 1;
        self.last_stroke_id = id;
        stroke.assign_id(id);
        self.strokes.push(stroke);
        self.pending_change = true;
        self.thaw();
        id
    }

    /// Remove and return the stroke with the given id.
    pub fn stroke_remove(&mut self, id: u32) -> Option<Stroke> {
        self.freeze();
        let removed = self
            .strokes
            .iter()
            .position(|s| s.id() == Some(id))
            .map(|index| self.strokes.remove(index));
        if removed.is_some() {
            self.pending_change = true;
        }
        self.thaw();
        removed
    }

    /// The strokes in stacking order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_get_by_id(&self, id: u32) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == Some(id))
    }

    /// Run a mutation against the stroke with the given id.
    ///
    /// The edit is wrapped in freeze/thaw like every other mutation, so one
    /// notification fires when the path is not otherwise frozen. Returns
    /// `None` (and fires nothing) when the id is unknown.
    pub fn modify_stroke<R>(&mut self, id: u32, edit: impl FnOnce(&mut Stroke) -> R) -> Option<R> {
        self.freeze();
        let result = self
            .strokes
            .iter_mut()
            .find(|s| s.id() == Some(id))
            .map(edit);
        if result.is_some() {
            self.pending_change = true;
        }
        self.thaw();
        result
    }

    /// Enter a batch: bump the freeze count, dropping caches on 0 -> 1.
    pub fn freeze(&mut self) {
        self.freeze_count += 1;
        if self.freeze_count == 1 {
            self.cache = None;
        }
    }

    /// Leave a batch: on 1 -> 0, notify once if anything changed.
    ///
    /// A thaw without a matching freeze is a caller error; it is logged and
    /// ignored.
    pub fn thaw(&mut self) {
        if self.freeze_count == 0 {
            tracing::warn!(name = %self.name, "thaw without matching freeze");
            return;
        }
        self.freeze_count -= 1;
        if self.freeze_count == 0 && self.pending_change {
            self.pending_change = false;
            if let Some(observer) = &mut self.observer {
                observer();
            }
        }
    }

    /// Register the change callback; replaces any previous one.
    pub fn set_change_observer(&mut self, observer: impl FnMut() + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// The combined bezier descriptor of every stroke, in stroke order.
    ///
    /// Strokes that cannot form a descriptor fragment are skipped. The
    /// result is cached until the next mutation.
    pub fn bezier(&mut self) -> Arc<BezPath> {
        self.cache().descriptor.clone()
    }

    /// The bounding box of the combined descriptor; `None` when empty.
    pub fn bounds(&mut self) -> Option<Rect> {
        self.cache().bounds
    }

    /// Length of the stroke with the given id, at the path's precision.
    pub fn stroke_length(&self, id: u32) -> Option<f64> {
        self.stroke_get_by_id(id)
            .map(|s| s.get_length(self.precision))
    }

    /// Shift every stroke by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        self.freeze();
        for stroke in &mut self.strokes {
            stroke.translate(offset);
        }
        self.pending_change = true;
        self.thaw();
    }

    /// Apply an affine map to every stroke.
    pub fn transform(&mut self, affine: Affine) {
        self.freeze();
        for stroke in &mut self.strokes {
            stroke.transform(affine);
        }
        self.pending_change = true;
        self.thaw();
    }

    fn cache(&mut self) -> &PathCache {
        if self.cache.is_none() {
            tracing::debug!(
                name = %self.name,
                strokes = self.strokes.len(),
                "rebuilding descriptor cache"
            );
        }
        let strokes = &self.strokes;
        self.cache.get_or_insert_with(|| build_cache(strokes))
    }
}

fn build_cache(strokes: &[Stroke]) -> PathCache {
    let mut descriptor = BezPath::new();
    for stroke in strokes {
        if let Some(fragment) = stroke.make_bezier() {
            for el in fragment.elements() {
                descriptor.push(*el);
            }
        }
    }

    let bounds = if descriptor.elements().is_empty() {
        None
    } else {
        Some(descriptor.bounding_box())
    };

    PathCache {
        descriptor: Arc::new(descriptor),
        bounds,
    }
}
