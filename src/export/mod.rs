//! Export module for generated fringe sequences.

use crate::error::Result;
use crate::fringe::{Orientation, Sequence, SequenceFrame};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest entry describing one exported frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub file: String,
    pub orientation: Orientation,
    pub phase_shift: f64,
}

/// Index of an exported sequence, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceManifest {
    pub height: u32,
    pub width: u32,
    pub frames: Vec<ManifestEntry>,
}

/// Writes sequences to disk.
pub struct SequenceExporter;

impl SequenceExporter {
    pub const MANIFEST_FILE: &'static str = "manifest.json";

    /// File name used for a frame.
    pub fn frame_file_name(index: usize, frame: &SequenceFrame) -> String {
        let degrees = frame.phase_shift.to_degrees().round() as i64;
        format!("frame_{}_{}_{:03}.png", index, frame.orientation, degrees)
    }

    /// Export every frame as 8-bit grayscale PNG plus `manifest.json`.
    ///
    /// Returns the image paths in sequence order.
    pub fn export(sequence: &Sequence, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let shape = sequence.shape();
        let mut manifest = SequenceManifest {
            height: shape.height,
            width: shape.width,
            frames: Vec::with_capacity(sequence.len()),
        };
        let mut paths = Vec::with_capacity(sequence.len());

        for (index, frame) in sequence.iter().enumerate() {
            let file = Self::frame_file_name(index, frame);
            let path = output_dir.join(&file);
            frame.image.to_gray_image().save(&path)?;
            log::info!("Exported fringe pattern: {}", path.display());

            manifest.frames.push(ManifestEntry {
                index,
                file,
                orientation: frame.orientation,
                phase_shift: frame.phase_shift,
            });
            paths.push(path);
        }

        let json = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(output_dir.join(Self::MANIFEST_FILE), json)?;

        Ok(paths)
    }
}

/// Load a manifest written by [`SequenceExporter::export`].
pub fn load_manifest(output_dir: &Path) -> Result<SequenceManifest> {
    let contents = std::fs::read_to_string(output_dir.join(SequenceExporter::MANIFEST_FILE))?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fringe::{build_sequence, Shape, PHASE_SHIFTS};

    #[test]
    fn test_export_writes_frames_and_manifest() {
        let dir = std::env::temp_dir().join(format!("fringe-export-{}", std::process::id()));
        let sequence = build_sequence(Shape::new(9, 16).unwrap()).unwrap();

        let paths = SequenceExporter::export(&sequence, &dir).unwrap();
        assert_eq!(paths.len(), 8);
        assert!(paths[0].ends_with("frame_0_vertical_000.png"));
        assert!(paths[5].ends_with("frame_5_horizontal_090.png"));
        assert!(paths[7].ends_with("frame_7_horizontal_270.png"));

        let decoded = image::open(&paths[6]).unwrap().into_luma8();
        assert_eq!(decoded.as_raw().as_slice(), sequence.frames()[6].image.as_bytes());

        let manifest = load_manifest(&dir).unwrap();
        assert_eq!((manifest.height, manifest.width), (9, 16));
        assert_eq!(manifest.frames.len(), 8);
        assert_eq!(manifest.frames[3].orientation, Orientation::Vertical);
        assert_eq!(manifest.frames[4].orientation, Orientation::Horizontal);
        assert!((manifest.frames[6].phase_shift - PHASE_SHIFTS[2]).abs() < 1e-12);

        std::fs::remove_dir_all(&dir).ok();
    }
}
