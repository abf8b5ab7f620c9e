#![warn(missing_docs)]

//! Slicer-output metadata extraction for printquote.
//!
//! This crate recovers structured print metadata (duration, per-slot
//! filament weights, colors and material types, layer statistics, an
//! embedded preview image) from the comment annotations slicers write
//! into their output files. Several incompatible vendor dialects are
//! understood; fields the file does not carry degrade to documented
//! defaults and sentinels instead of failing the extraction.
//!
//! The extractor is a pure text-to-structure transform: no I/O, no shared
//! state, bit-for-bit identical output for identical input. Only the
//! optional [`read_print_file`] helper is fallible.
//!
//! # Example
//!
//! ```ignore
//! use printquote_meta::{extract_metadata, read_print_file};
//!
//! let text = read_print_file("benchy_2h30m.gcode")?;
//! let meta = extract_metadata(&text, "benchy_2h30m.gcode");
//!
//! println!("Duration: {} min", meta.duration_minutes);
//! println!("Filament: {:.1} g over {} slot(s)", meta.total_weight_grams, meta.slots.len());
//! ```

pub mod dialect;
pub mod error;
pub mod fields;
pub mod metadata;
pub mod slots;
pub mod thumbnail;

pub use dialect::{detect_duration, DurationMatch, Slicer};
pub use error::{MetaError, Result};
pub use metadata::{FilamentSlot, PrintMetadata, UNKNOWN};
pub use slots::{reconcile, SlotArrays};
pub use thumbnail::extract_thumbnail;

use std::path::Path;

use tracing::debug;

/// Read a sliced-model file into text.
///
/// This is the only fallible step of the pipeline: a file that cannot be
/// read, or is not UTF-8 text, yields an error and no partial metadata.
pub fn read_print_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}

/// Extract print metadata from file text and its display filename.
///
/// Never fails: a file with no recognizable annotations still yields a
/// record, with zeroed durations, empty slots and `Slicer::Unknown`, which
/// a host should treat as "needs manual entry". Assembly rules:
///
/// 1. In-content duration detectors run in priority order, first success
///    wins; with no in-content match, an `<int>h<int>m` pattern in the
///    filename is the last resort.
/// 2. The detected duration is snapshotted into both `duration_minutes`
///    and `original_duration_minutes`; they diverge only through later
///    host-side edits.
/// 3. Total weight is always recomputed as the sum over the reconciled
///    slot list, never trusted from a separately-parsed aggregate line
///    when a per-slot breakdown exists.
pub fn extract_metadata(text: &str, filename: &str) -> PrintMetadata {
    let duration = dialect::detect_duration(text)
        .or_else(|| dialect::detect_filename(filename));
    let (minutes, slicer) = match duration {
        Some(m) => (m.minutes, m.slicer),
        None => (0, Slicer::Unknown),
    };

    let weights = fields::weight_list(text);
    // The length-only fallback is consulted only when no gram figure
    // exists anywhere in the file.
    let aggregate = if weights.is_empty() {
        fields::aggregate_weight(text).or_else(|| fields::filament_length_grams(text))
    } else {
        None
    };
    let arrays = SlotArrays {
        weights,
        colors: fields::color_list(text),
        materials: fields::material_list(text),
        slot_ids: fields::slot_ids(text),
        aggregate_grams: aggregate,
    };
    let slots = slots::reconcile(&arrays);
    let total_weight_grams = slots.iter().map(|s| s.weight_grams).sum();

    debug!(
        minutes,
        slicer = ?slicer,
        slot_count = slots.len(),
        total_weight_grams,
        "metadata assembled"
    );

    PrintMetadata {
        duration_minutes: minutes,
        original_duration_minutes: minutes,
        total_weight_grams,
        layer_height_mm: fields::layer_height(text).unwrap_or(0.0),
        layer_count: fields::layer_count(text).unwrap_or(0),
        detected_slicer: slicer,
        slots,
        thumbnail_png: thumbnail::extract_thumbnail(text),
    }
}
