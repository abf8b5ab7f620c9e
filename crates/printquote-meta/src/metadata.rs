//! Extracted print metadata types.

use serde::{Deserialize, Serialize};

use crate::dialect::Slicer;

/// Sentinel for color and material fields that could not be recovered.
pub const UNKNOWN: &str = "unknown";

/// One logical material/extruder slot of a print job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentSlot {
    /// 1-based logical slot number. Not necessarily contiguous and not
    /// necessarily equal to the slot's position in the list.
    pub slot_index: u32,
    /// Filament consumed by this slot (grams).
    pub weight_grams: f64,
    /// Filament color as "#RRGGBB", or [`UNKNOWN`].
    pub color_hex: String,
    /// Material type (e.g. "PLA", "PETG"), or [`UNKNOWN`].
    pub material: String,
}

impl FilamentSlot {
    /// A slot with sentinel color and material.
    pub fn bare(slot_index: u32, weight_grams: f64) -> Self {
        Self {
            slot_index,
            weight_grams,
            color_hex: UNKNOWN.to_string(),
            material: UNKNOWN.to_string(),
        }
    }
}

/// Metadata recovered from one sliced-model file.
///
/// Every field has a documented "unknown" default, so a sparse record is a
/// normal outcome, not a failure. `0` for layer height and layer count
/// means "unknown", never a legitimate zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrintMetadata {
    /// Total print duration in minutes. Hosts may let the user edit this.
    pub duration_minutes: u32,
    /// Duration as first parsed. Never changes after assembly; lets a host
    /// revert user edits to `duration_minutes`.
    pub original_duration_minutes: u32,
    /// Total filament weight (grams), always the sum over `slots`.
    pub total_weight_grams: f64,
    /// Layer height (mm). 0.0 means unknown.
    pub layer_height_mm: f64,
    /// Number of layers. 0 means unknown.
    pub layer_count: u32,
    /// Which slicer convention supplied the duration. Informational only.
    pub detected_slicer: Slicer,
    /// Per-slot filament breakdown, in slot order. Empty only when no
    /// weight information was found at all.
    pub slots: Vec<FilamentSlot>,
    /// Embedded preview image (PNG bytes), if the file carried one.
    pub thumbnail_png: Option<Vec<u8>>,
}

impl PrintMetadata {
    /// Duration split into whole hours and leftover minutes, for display.
    pub fn duration_hm(&self) -> (u32, u32) {
        (self.duration_minutes / 60, self.duration_minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_hm() {
        let meta = PrintMetadata {
            duration_minutes: 225,
            ..Default::default()
        };
        assert_eq!(meta.duration_hm(), (3, 45));
    }

    #[test]
    fn test_default_is_sparse_not_invalid() {
        let meta = PrintMetadata::default();
        assert_eq!(meta.duration_minutes, 0);
        assert_eq!(meta.detected_slicer, Slicer::Unknown);
        assert!(meta.slots.is_empty());
    }
}
