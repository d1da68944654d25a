//! Save files: JSON, gzip-compressed when the path ends in `.gz`.

use crate::error::{IoError, Result};
use crate::persistence::LayerSnapshot;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn to_json(snapshot: &LayerSnapshot) -> Result<String> {
    serde_json::to_string(snapshot)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

pub fn from_json(json: &str) -> Result<LayerSnapshot> {
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }
    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Writes a snapshot to `path`.
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &LayerSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(snapshot)?;
    let context = || format!("saving {}", path.display());

    let mut file = File::create(path).map_err(|e| IoError::from(e).with_context(context()))?;
    if is_gzip_path(path) {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(json.as_bytes())
            .map_err(|e| IoError::compression(e.to_string()).with_context(context()))?;
        encoder
            .finish()
            .map_err(|e| IoError::compression(e.to_string()).with_context(context()))?;
    } else {
        file.write_all(json.as_bytes())
            .map_err(|e| IoError::from(e).with_context(context()))?;
    }
    tracing::debug!(path = %path.display(), submaps = snapshot.submaps.len(), "Fields saved");
    Ok(())
}

/// Reads a snapshot from `path`. Compressed files are recognised by their
/// content, not their name.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<LayerSnapshot> {
    let path = path.as_ref();
    let context = || format!("loading {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| IoError::from(e).with_context(context()))?;
    let json = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut decoded)
            .map_err(|e| IoError::compression(e.to_string()).with_context(context()))?;
        decoded
    } else {
        String::from_utf8(bytes)
            .map_err(|e| IoError::serialization(e.to_string()).with_context(context()))?
    };
    from_json(&json).map_err(|e| e.with_context(context()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miasma_core::FieldLayer;
    use miasma_data::{FieldType, Point};

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("miasma_io_{}_{name}", std::process::id()))
    }

    fn sample() -> LayerSnapshot {
        let mut layer = FieldLayer::new(2, 1);
        layer.add_field(Point::new(5, 5), FieldType::Fire, 3, -100);
        layer.add_field(Point::new(20, 7), FieldType::NukeGas, 1, 12);
        LayerSnapshot::capture(&layer)
    }

    #[test]
    fn test_json_layout_uses_type_keys() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains(r#"[5,5,{"type":"fire","density":3,"age":-100}]"#));
        assert!(json.contains(r#""type":"nuke_gas""#));
    }

    #[test]
    fn test_empty_json_is_rejected() {
        assert!(matches!(from_json("  "), Err(IoError::Validation(_))));
        assert!(matches!(from_json("{"), Err(IoError::Serialization(_))));
    }

    #[test]
    fn test_plain_and_gzip_files_load_alike() {
        let plain = scratch("fields.json");
        let packed = scratch("fields.json.gz");
        let snapshot = sample();
        save_snapshot(&snapshot, &plain).unwrap();
        save_snapshot(&snapshot, &packed).unwrap();

        let head = std::fs::read(&packed).unwrap();
        assert!(head.starts_with(&GZIP_MAGIC));
        assert_eq!(load_snapshot(&plain).unwrap(), snapshot);
        assert_eq!(load_snapshot(&packed).unwrap(), snapshot);

        std::fs::remove_file(plain).ok();
        std::fs::remove_file(packed).ok();
    }

    #[test]
    fn test_missing_file_carries_path_context() {
        let err = load_snapshot(scratch("nowhere.json")).unwrap_err();
        assert!(matches!(err, IoError::Context { .. }));
        assert!(err.to_string().contains("nowhere.json"));
    }
}
