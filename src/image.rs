// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! The owning canvas for paths.
//!
//! Only what the rest of the crate needs from an image: pixel dimensions
//! (the preview scale derives from them) and the ordered list of paths it
//! owns (the compatibility check is image-wide).

use crate::path::Path;

#[derive(Debug)]
pub struct Image {
    width: u32,
    height: u32,
    paths: Vec<Path>,
}

impl Image {
    /// An empty image.
    ///
    /// # Panics
    /// Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be positive");
        Image {
            width,
            height,
            paths: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// The paths in stacking order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut [Path] {
        &mut self.paths
    }
}
