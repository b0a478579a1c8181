// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! Anchorage: a bezier path model with a legacy point-array codec

pub mod anchor;
pub mod compat;
pub mod coords;
pub mod dump;
pub mod image;
pub mod path;
pub mod preview;
pub mod settings;
pub mod stroke;

pub use anchor::{Anchor, AnchorKind};
pub use compat::{
    CompatError, CompatPoint, CompatPointType, CompatPoints, compat_get_points,
    compat_is_compatible, compat_new,
};
pub use coords::Coord;
pub use image::Image;
pub use path::Path;
pub use preview::{PreviewBuffer, render_preview};
pub use stroke::{Stroke, StrokeKind, StrokeValidity};

/// Entry point for the anchorage inspection binary.
///
/// Loads a JSON path dump, rebuilds the stroke graph from it, reports what
/// came out, checks that it flattens back, and optionally renders a preview
/// PNG.
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("anchorage=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        anyhow::bail!("Usage: anchorage <dump.json> [preview.png]");
    }

    let dump_path = std::path::PathBuf::from(&args[1]);
    let dump = dump::PathDump::load(&dump_path)?;
    tracing::info!(
        name = %dump.name,
        points = dump.points.len(),
        closed = dump.closed,
        "loaded dump"
    );

    let mut path = compat_new(dump.name.as_str(), &dump.points, dump.closed);
    tracing::info!(strokes = path.strokes().len(), "rebuilt stroke graph");

    for stroke in path.strokes() {
        tracing::info!(
            id = stroke.id().unwrap_or(0),
            anchors = stroke.anchor_count(),
            closed = stroke.is_closed(),
            length = stroke.get_length(path.precision()),
            "stroke"
        );
    }

    match path.bounds() {
        Some(bounds) => tracing::info!(
            x0 = bounds.x0,
            y0 = bounds.y0,
            x1 = bounds.x1,
            y1 = bounds.y1,
            "descriptor bounds"
        ),
        None => tracing::info!("path has no descriptor"),
    }

    match compat_get_points(&path) {
        Ok(out) => tracing::info!(
            points = out.points.len(),
            closed = out.closed,
            "flattened back to the legacy array"
        ),
        Err(err) => tracing::warn!(%err, "path does not flatten back"),
    }

    if let Some(out_path) = args.get(2) {
        save_preview(&mut path, std::path::Path::new(out_path))?;
    }

    Ok(())
}

/// Render the path onto a canvas just large enough to hold it and save the
/// preview as a PNG.
fn save_preview(path: &mut Path, out: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let (width, height) = match path.bounds() {
        Some(b) => ((b.x1.ceil() as u32).max(1), (b.y1.ceil() as u32).max(1)),
        None => (1, 1),
    };
    let canvas = Image::new(width, height);

    let buffer = render_preview(
        path,
        &canvas,
        settings::preview::SIZE,
        settings::preview::SIZE,
    );
    let gray = ::image::GrayImage::from_raw(buffer.width(), buffer.height(), buffer.into_vec())
        .ok_or_else(|| anyhow::anyhow!("preview buffer size mismatch"))?;
    gray.save(out)
        .with_context(|| format!("Failed to save preview: {}", out.display()))?;

    tracing::info!(file = %out.display(), "saved preview");
    Ok(())
}
