// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! Low-resolution path previews.
//!
//! A preview is a single-channel byte buffer: white background, one black
//! pixel per interpolated sample. Samples land at image coordinates scaled
//! into the requested size and rounded; anything outside the buffer is
//! dropped. No anti-aliasing and no line joining, which is plenty for a
//! thumbnail-sized hint of the path's shape.

use crate::image::Image;
use crate::path::Path;
use crate::settings;

const BACKGROUND: u8 = 255;
const INK: u8 = 0;

/// A width x height single-channel pixel buffer, row major.
#[derive(Debug, Clone)]
pub struct PreviewBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PreviewBuffer {
    fn new(width: u32, height: u32) -> Self {
        PreviewBuffer {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at (x, y).
    ///
    /// # Panics
    /// Both coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of range");
        self.data[(y * self.width + x) as usize]
    }

    fn plot(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height) {
            self.data[(y * i64::from(self.width) + x) as usize] = INK;
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Render a preview of `path` at the requested size.
///
/// The scale maps the owning image's pixel space onto the buffer, so the
/// preview shows the path where it sits on the canvas.
pub fn render_preview(path: &Path, image: &Image, width: u32, height: u32) -> PreviewBuffer {
    let mut buffer = PreviewBuffer::new(width, height);

    let xscale = f64::from(width) / f64::from(image.width());
    let yscale = f64::from(height) / f64::from(image.height());

    for stroke in path.strokes() {
        let Some((points, _)) = stroke.interpolate(settings::sampling::PREVIEW_PRECISION) else {
            continue;
        };

        for point in points {
            let x = (point.x * xscale).round() as i64;
            let y = (point.y * yscale).round() as i64;
            buffer.plot(x, y);
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coord;
    use crate::stroke::Stroke;
    use kurbo::Vec2;

    fn line_path(from: Coord, to: Coord) -> Path {
        let mut stroke = Stroke::new_moveto(from);
        stroke.lineto(to);
        let mut path = Path::new("line");
        path.stroke_add(stroke);
        path
    }

    #[test]
    fn test_empty_path_is_all_white() {
        let image = Image::new(64, 64);
        let buffer = render_preview(&Path::new("empty"), &image, 16, 16);

        assert_eq!(buffer.width(), 16);
        assert_eq!(buffer.height(), 16);
        assert!(buffer.data().iter().all(|&px| px == 255));
    }

    #[test]
    fn test_line_plots_both_endpoints() {
        let image = Image::new(10, 10);
        let path = line_path(Coord::new(0.0, 0.0), Coord::new(9.0, 0.0));
        let buffer = render_preview(&path, &image, 10, 10);

        assert_eq!(buffer.pixel(0, 0), 0);
        assert_eq!(buffer.pixel(9, 0), 0);
        // Nothing strays off the sampled row.
        for y in 1..10 {
            for x in 0..10 {
                assert_eq!(buffer.pixel(x, y), 255);
            }
        }
    }

    #[test]
    fn test_scale_maps_image_onto_buffer() {
        let image = Image::new(100, 100);
        let path = line_path(Coord::new(40.0, 50.0), Coord::new(60.0, 50.0));
        let buffer = render_preview(&path, &image, 10, 10);

        assert_eq!(buffer.pixel(5, 5), 0);
        assert_eq!(buffer.pixel(5, 4), 255);
        assert_eq!(buffer.pixel(5, 6), 255);
    }

    #[test]
    fn test_out_of_bounds_samples_are_dropped() {
        let image = Image::new(64, 64);
        let mut path = line_path(Coord::new(0.0, 0.0), Coord::new(10.0, 10.0));
        path.translate(Vec2::new(1000.0, 1000.0));
        let buffer = render_preview(&path, &image, 8, 8);
        assert!(buffer.data().iter().all(|&px| px == 255));

        path.translate(Vec2::new(-2000.0, -2000.0));
        let buffer = render_preview(&path, &image, 8, 8);
        assert!(buffer.data().iter().all(|&px| px == 255));
    }
}
