//! Per-field metadata extractors.
//!
//! Each extractor recovers one field independently, tolerating the unit
//! and separator variance of the vendor dialects, and returns a typed
//! default (empty list or `None`) instead of failing. Malformed numeric
//! tokens are dropped, never coerced to zero, and never abort the scan.

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[0-9A-Fa-f]{6}").unwrap());
static CURA_LENGTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";Filament used:\s*(\d+\.?\d*)\s*m").unwrap());
static CURA_MATERIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r";MATERIAL:(\w+)").unwrap());

/// Grams of PLA per metre of 1.75 mm filament, for the length-only Cura
/// fallback when no gram figure exists anywhere in the file.
const GRAMS_PER_METRE: f64 = 3.0;

/// First line carrying `label`, returned as (label side, value side),
/// split at the `:` or `=` separator following the label.
fn find_labeled<'a>(text: &'a str, label: &str) -> Option<(&'a str, &'a str)> {
    for line in text.lines() {
        let line = line.trim();
        if let Some(pos) = line.find(label) {
            let rest = &line[pos + label.len()..];
            if let Some(sep) = rest.find([':', '=']) {
                let label_side = &line[..pos + label.len() + sep];
                return Some((label_side, rest[sep + 1..].trim()));
            }
        }
    }
    None
}

/// Parse one numeric token, stripping any non-numeric characters first.
/// Tokens with nothing numeric left (`"abc"`) yield `None`. Every field
/// these extractors serve is non-negative, so a negative token is
/// malformed data and is dropped rather than sign-stripped or zeroed.
fn parse_numeric_token(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok().filter(|v: &f64| *v >= 0.0)
}

/// Split a delimiter-separated list value on commas and semicolons.
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split([',', ';']).map(str::trim).filter(|t| !t.is_empty())
}

/// Per-slot filament weights in grams, from `filament used [g]`.
///
/// Unparsable tokens are dropped and do not shift the positions of the
/// surviving entries relative to each other.
pub fn weight_list(text: &str) -> Vec<f64> {
    let Some((_, value)) = find_labeled(text, "filament used [g]") else {
        return Vec::new();
    };
    split_list(value).filter_map(parse_numeric_token).collect()
}

/// Aggregate filament weight in grams, from `total filament weight [g]`.
pub fn aggregate_weight(text: &str) -> Option<f64> {
    let (_, value) = find_labeled(text, "total filament weight [g]")?;
    parse_numeric_token(value)
}

/// Length-only Cura fallback: `;Filament used: 1.2m` converted at a flat
/// 3 g/m. Only consulted when no gram figure exists anywhere in the file.
pub fn filament_length_grams(text: &str) -> Option<f64> {
    let caps = CURA_LENGTH_RE.captures(text)?;
    let metres: f64 = caps[1].parse().ok()?;
    Some(metres * GRAMS_PER_METRE)
}

/// Per-slot colors: every `#RRGGBB` token on the `filament_colour` (or
/// `filament_color`) line, in left-to-right order. A matched line with no
/// hex tokens yields an empty list, which is not an error.
pub fn color_list(text: &str) -> Vec<String> {
    let line = find_labeled(text, "filament_colour")
        .or_else(|| find_labeled(text, "filament_color"));
    let Some((_, value)) = line else {
        return Vec::new();
    };
    HEX_COLOR_RE
        .find_iter(value)
        .map(|m| m.as_str().to_uppercase())
        .collect()
}

/// Per-slot material types from `filament_type`, quotes stripped per
/// token; falls back to the single-value Cura `;MATERIAL:` tag.
pub fn material_list(text: &str) -> Vec<String> {
    if let Some((_, value)) = find_labeled(text, "filament_type") {
        let types: Vec<String> = split_list(value)
            .map(|t| t.trim_matches(['"', '\'']).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !types.is_empty() {
            return types;
        }
    }
    CURA_MATERIAL_RE
        .captures(text)
        .map(|c| vec![c[1].to_string()])
        .unwrap_or_default()
}

/// Active slot ids from `filament_ids`: which 1-based physical slot each
/// parallel-array position refers to. Absent list means positions map
/// 1:1 to sequential slots starting at 1.
pub fn slot_ids(text: &str) -> Vec<u32> {
    let Some((_, value)) = find_labeled(text, "filament_ids") else {
        return Vec::new();
    };
    split_list(value)
        .filter_map(|t| t.parse::<u32>().ok())
        .collect()
}

/// Layer height labels, checked in order. A matching line whose label side
/// contains "min" or "max" is a range sub-field and never matches.
const LAYER_HEIGHT_LABELS: &[&str] = &["layer_height", "Layer height", "LAYER_HEIGHT"];

/// Layer height in millimetres.
pub fn layer_height(text: &str) -> Option<f64> {
    for line in text.lines() {
        let line = line.trim();
        for label in LAYER_HEIGHT_LABELS {
            let Some(pos) = line.find(label) else {
                continue;
            };
            let rest = &line[pos + label.len()..];
            let Some(sep) = rest.find([':', '=']) else {
                continue;
            };
            let label_side = &line[..pos + label.len() + sep];
            // Range and first-layer sub-fields share the label substring.
            if ["min", "max", "first", "initial"]
                .iter()
                .any(|sub| label_side.contains(sub))
            {
                continue;
            }
            if let Some(v) = parse_numeric_token(rest[sep + 1..].trim()) {
                return Some(v);
            }
        }
    }
    None
}

/// Total layer count, from `total layer number` or `;LAYER_COUNT:`.
pub fn layer_count(text: &str) -> Option<u32> {
    let value = find_labeled(text, "total layer number")
        .or_else(|| find_labeled(text, "LAYER_COUNT"))
        .map(|(_, v)| v)?;
    parse_numeric_token(value).map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_list_comma_separated() {
        let text = "; filament used [g] = 5.02,3.11,0.87\n";
        assert_eq!(weight_list(text), vec![5.02, 3.11, 0.87]);
    }

    #[test]
    fn test_weight_list_drops_malformed_tokens() {
        let text = "; filament used [g] = 12.5, abc, 7.0\n";
        assert_eq!(weight_list(text), vec![12.5, 7.0]);
    }

    #[test]
    fn test_weight_list_drops_negative_tokens() {
        let text = "; filament used [g] = 12.5, -5, 7.0\n";
        assert_eq!(weight_list(text), vec![12.5, 7.0]);
    }

    #[test]
    fn test_weight_list_strips_unit_suffixes() {
        let text = "; filament used [g] : 12.5g; 7.0g\n";
        assert_eq!(weight_list(text), vec![12.5, 7.0]);
    }

    #[test]
    fn test_weight_list_absent() {
        assert!(weight_list("G1 X0 Y0\n").is_empty());
    }

    #[test]
    fn test_aggregate_weight() {
        let text = "; total filament weight [g] : 9.91\n";
        assert_eq!(aggregate_weight(text), Some(9.91));
    }

    #[test]
    fn test_length_fallback_three_grams_per_metre() {
        let text = ";Filament used: 1.2m\n";
        let grams = filament_length_grams(text).unwrap();
        assert!((grams - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_color_list_in_order() {
        let text = "; filament_colour = #00AE42;#FFFFFF;#1a2b3c\n";
        assert_eq!(color_list(text), vec!["#00AE42", "#FFFFFF", "#1A2B3C"]);
    }

    #[test]
    fn test_color_list_no_hex_tokens() {
        let text = "; filament_colour = none\n";
        assert!(color_list(text).is_empty());
    }

    #[test]
    fn test_material_list_quoted() {
        let text = "; filament_type = \"PLA\";\"PETG\"\n";
        assert_eq!(material_list(text), vec!["PLA", "PETG"]);
    }

    #[test]
    fn test_material_cura_tag() {
        let text = ";MATERIAL:PLA\n";
        assert_eq!(material_list(text), vec!["PLA"]);
    }

    #[test]
    fn test_slot_ids() {
        let text = "; filament_ids = 1,3\n";
        assert_eq!(slot_ids(text), vec![1, 3]);
    }

    #[test]
    fn test_slot_ids_drop_bad_entries() {
        let text = "; filament_ids = 2,x,4\n";
        assert_eq!(slot_ids(text), vec![2, 4]);
    }

    #[test]
    fn test_layer_height_skips_min_max_range_fields() {
        let text = "; min_layer_height = 0.08\n; max_layer_height = 0.28\n; layer_height = 0.2\n";
        assert_eq!(layer_height(text), Some(0.2));
    }

    #[test]
    fn test_layer_height_skips_first_layer_field() {
        let text = "; first_layer_height = 0.25\n; layer_height = 0.2\n";
        assert_eq!(layer_height(text), Some(0.2));
    }

    #[test]
    fn test_layer_height_cura_tag() {
        assert_eq!(layer_height(";LAYER_HEIGHT:0.28\n"), Some(0.28));
    }

    #[test]
    fn test_layer_count() {
        assert_eq!(layer_count("; total layer number: 197\n"), Some(197));
        assert_eq!(layer_count(";LAYER_COUNT:42\n"), Some(42));
    }
}
