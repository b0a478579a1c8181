// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0

//! The on-disk dump document.
//!
//! A dump holds one path in the legacy flat form: the name, the single
//! closed flag, and the tagged point records with their wire field names
//! (`type`, `x`, `y`). JSON keeps the surface inspectable by hand.

use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::compat::CompatPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDump {
    pub name: String,
    pub closed: bool,
    pub points: Vec<CompatPoint>,
}

impl PathDump {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dump: {}", path.display()))?;
        let dump = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse dump: {}", path.display()))?;
        Ok(dump)
    }

    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("Failed to encode dump")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write dump: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::CompatPointType;

    #[test]
    fn test_parse_wire_document() {
        let raw = r#"{
            "name": "flower",
            "closed": true,
            "points": [
                {"type": 1, "x": 1.0, "y": 2.0},
                {"type": 2, "x": 3.0, "y": 4.0},
                {"type": 3, "x": 5.0, "y": 6.0}
            ]
        }"#;

        let dump: PathDump = serde_json::from_str(raw).unwrap();
        assert_eq!(dump.name, "flower");
        assert!(dump.closed);
        assert_eq!(dump.points.len(), 3);
        assert_eq!(dump.points[2].kind, CompatPointType::NewStroke);

        let reencoded = serde_json::to_string(&dump).unwrap();
        let back: PathDump = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(back, dump);
    }

    #[test]
    fn test_save_and_load_file() {
        let dump = PathDump {
            name: "disk".into(),
            closed: false,
            points: vec![
                CompatPoint::new(CompatPointType::Anchor, 0.0, 0.0),
                CompatPoint::new(CompatPointType::Control, 1.5, -2.5),
            ],
        };

        let file = std::env::temp_dir().join(format!("anchorage-dump-{}.json", std::process::id()));
        dump.save(&file).unwrap();
        let back = PathDump::load(&file).unwrap();
        let _ = fs::remove_file(&file);

        assert_eq!(back, dump);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let missing = std::path::Path::new("/nonexistent/anchorage.json");
        let err = PathDump::load(missing).unwrap_err();
        assert!(err.to_string().contains("anchorage.json"));
    }
}
