//! Filament slot reconciliation.
//!
//! The per-field extractors produce four independent parallel arrays:
//! weights (indexed by appearance order, one entry per slot used by the
//! job), colors and material types (indexed by physical slot number, one
//! entry per installed slot), and optional active slot ids mapping the
//! first index space onto the second. The arrays routinely have different
//! lengths, so they cannot be zipped positionally; [`reconcile`] performs
//! the index remapping explicitly.

use crate::metadata::{FilamentSlot, UNKNOWN};

/// The independently-extracted parallel arrays for one file.
#[derive(Debug, Clone, Default)]
pub struct SlotArrays {
    /// Per-slot weights in grams; authoritative for how many slots exist.
    pub weights: Vec<f64>,
    /// Colors per physical slot ("#RRGGBB").
    pub colors: Vec<String>,
    /// Material types per physical slot.
    pub materials: Vec<String>,
    /// 1-based physical slot id for each weight position, when the file
    /// declares one.
    pub slot_ids: Vec<u32>,
    /// Aggregate weight, used only when no per-slot weights exist.
    pub aggregate_grams: Option<f64>,
}

/// Align the parallel arrays into an ordered slot list.
///
/// Weight order is preserved and slots are never reordered afterwards.
/// Color and material are looked up by physical slot number
/// (`slot_index - 1`), falling back to the array's first entry, then to
/// the sentinel. With no per-slot weights but an aggregate figure, a
/// single synthetic slot wraps the aggregate.
pub fn reconcile(arrays: &SlotArrays) -> Vec<FilamentSlot> {
    if arrays.weights.is_empty() {
        let Some(total) = arrays.aggregate_grams else {
            return Vec::new();
        };
        return vec![FilamentSlot {
            slot_index: 1,
            weight_grams: total,
            color_hex: first_or_sentinel(&arrays.colors),
            material: first_or_sentinel(&arrays.materials),
        }];
    }

    arrays
        .weights
        .iter()
        .enumerate()
        .map(|(i, &weight)| {
            // Slot indices are 1-based; a stray 0 id is lifted to 1.
            let slot_index = arrays
                .slot_ids
                .get(i)
                .copied()
                .unwrap_or(i as u32 + 1)
                .max(1);
            let lookup = slot_index.saturating_sub(1) as usize;
            FilamentSlot {
                slot_index,
                weight_grams: weight,
                color_hex: lookup_or_first(&arrays.colors, lookup),
                material: lookup_or_first(&arrays.materials, lookup),
            }
        })
        .collect()
}

fn lookup_or_first(values: &[String], index: usize) -> String {
    values
        .get(index)
        .or_else(|| values.first())
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn first_or_sentinel(values: &[String]) -> String {
    values
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_parallel_arrays() {
        let arrays = SlotArrays {
            weights: vec![5.0, 3.0],
            colors: strings(&["#FF0000", "#00FF00"]),
            materials: strings(&["PLA", "PETG"]),
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot_index, 1);
        assert_eq!(slots[0].color_hex, "#FF0000");
        assert_eq!(slots[1].slot_index, 2);
        assert_eq!(slots[1].material, "PETG");
    }

    #[test]
    fn test_short_color_array_falls_back_to_first() {
        let arrays = SlotArrays {
            weights: vec![5.0, 3.0, 1.0],
            colors: strings(&["#123456"]),
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots.len(), 3);
        for slot in &slots {
            assert_eq!(slot.color_hex, "#123456");
            assert_eq!(slot.material, UNKNOWN);
        }
    }

    #[test]
    fn test_slot_ids_remap_physical_slots() {
        // Two weights, declared as physical slots 2 and 4.
        let arrays = SlotArrays {
            weights: vec![5.0, 3.0],
            colors: strings(&["#111111", "#222222", "#333333", "#444444"]),
            materials: strings(&["PLA", "ABS", "PLA", "PETG"]),
            slot_ids: vec![2, 4],
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots[0].slot_index, 2);
        assert_eq!(slots[0].color_hex, "#222222");
        assert_eq!(slots[0].material, "ABS");
        assert_eq!(slots[1].slot_index, 4);
        assert_eq!(slots[1].color_hex, "#444444");
        assert_eq!(slots[1].material, "PETG");
    }

    #[test]
    fn test_short_slot_id_array_uses_position() {
        let arrays = SlotArrays {
            weights: vec![5.0, 3.0],
            slot_ids: vec![3],
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots[0].slot_index, 3);
        assert_eq!(slots[1].slot_index, 2);
    }

    #[test]
    fn test_zero_slot_id_lifted_to_one() {
        let arrays = SlotArrays {
            weights: vec![5.0],
            colors: strings(&["#ABCDEF"]),
            slot_ids: vec![0],
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots[0].slot_index, 1);
        assert_eq!(slots[0].color_hex, "#ABCDEF");
    }

    #[test]
    fn test_aggregate_only_synthesizes_one_slot() {
        let arrays = SlotArrays {
            aggregate_grams: Some(9.9),
            materials: strings(&["PLA"]),
            ..Default::default()
        };
        let slots = reconcile(&arrays);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].slot_index, 1);
        assert_eq!(slots[0].weight_grams, 9.9);
        assert_eq!(slots[0].material, "PLA");
        assert_eq!(slots[0].color_hex, UNKNOWN);
    }

    #[test]
    fn test_nothing_found() {
        assert!(reconcile(&SlotArrays::default()).is_empty());
    }
}
