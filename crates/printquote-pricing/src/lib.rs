#![warn(missing_docs)]

//! Cost and price computation for printquote.
//!
//! A pure, deterministic formula over extracted print metadata and
//! user-configurable cost parameters. No I/O and no hidden state: the
//! same metadata and settings always produce the same breakdown.
//!
//! # Example
//!
//! ```ignore
//! use printquote_meta::extract_metadata;
//! use printquote_pricing::{compute_quote, CostSettings};
//!
//! let meta = extract_metadata(&text, "benchy.gcode");
//! let quote = compute_quote(&meta, &CostSettings::default())?;
//!
//! println!("Suggested price: {:.2}", quote.total);
//! ```

pub mod error;

pub use error::{PricingError, Result};

use printquote_meta::PrintMetadata;
use serde::{Deserialize, Serialize};

/// Cost parameters for quoting a print job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSettings {
    /// Default material price (currency per kg).
    pub material_price_per_kg: f64,
    /// Per-physical-slot price overrides (currency per kg), indexed by
    /// slot number minus one. Slots beyond the list use the default.
    pub slot_prices_per_kg: Vec<f64>,
    /// Energy price (currency per kWh).
    pub energy_price_per_kwh: f64,
    /// Printer power draw while printing (watts).
    pub printer_watts: f64,
    /// Machine depreciation (currency per print hour).
    pub depreciation_per_hour: f64,
    /// Labor rate (currency per hour).
    pub labor_rate_per_hour: f64,
    /// Fixed hands-on time per job (minutes): setup, removal, cleanup.
    pub prep_minutes: f64,
    /// Profit margin (percent of production cost).
    pub margin_percent: f64,
    /// Failure-rate buffer (percent of raw cost) covering reprints.
    pub failure_percent: f64,
    /// Apply tax to the final price?
    pub tax_enabled: bool,
    /// Tax rate (percent of the net price).
    pub tax_percent: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            material_price_per_kg: 20.0,
            slot_prices_per_kg: Vec::new(),
            energy_price_per_kwh: 0.15,
            printer_watts: 300.0,
            depreciation_per_hour: 0.0,
            labor_rate_per_hour: 0.0,
            prep_minutes: 0.0,
            margin_percent: 30.0,
            failure_percent: 0.0,
            tax_enabled: false,
            tax_percent: 21.0,
        }
    }
}

impl CostSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("material_price_per_kg", self.material_price_per_kg),
            ("energy_price_per_kwh", self.energy_price_per_kwh),
            ("printer_watts", self.printer_watts),
            ("depreciation_per_hour", self.depreciation_per_hour),
            ("labor_rate_per_hour", self.labor_rate_per_hour),
            ("prep_minutes", self.prep_minutes),
            ("margin_percent", self.margin_percent),
            ("failure_percent", self.failure_percent),
            ("tax_percent", self.tax_percent),
        ];
        for (name, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(PricingError::InvalidSettings(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if self.slot_prices_per_kg.iter().any(|p| *p < 0.0 || !p.is_finite()) {
            return Err(PricingError::InvalidSettings(
                "slot prices must be non-negative numbers".into(),
            ));
        }
        Ok(())
    }

    fn price_for_slot(&self, slot_index: u32) -> f64 {
        let lookup = slot_index.saturating_sub(1) as usize;
        self.slot_prices_per_kg
            .get(lookup)
            .copied()
            .unwrap_or(self.material_price_per_kg)
    }
}

/// Itemized cost breakdown and suggested price for one print job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Filament cost over all slots.
    pub material_cost: f64,
    /// Electricity cost for the print duration.
    pub energy_cost: f64,
    /// Machine depreciation for the print duration.
    pub machine_cost: f64,
    /// Hands-on labor cost.
    pub labor_cost: f64,
    /// Sum of the four cost items.
    pub raw_cost: f64,
    /// Failure-rate buffer applied to the raw cost.
    pub failure_buffer: f64,
    /// Raw cost plus failure buffer.
    pub production_cost: f64,
    /// Profit margin on the production cost.
    pub margin: f64,
    /// Production cost plus margin.
    pub net_price: f64,
    /// Tax on the net price (0 when tax is disabled).
    pub tax: f64,
    /// Final suggested price.
    pub total: f64,
}

/// Compute a quote for extracted metadata under the given settings.
///
/// Pure function: reads `meta` and `settings`, produces a breakdown.
/// Unknown metadata fields (zero duration, no slots) simply contribute
/// zero cost; they do not fail the computation.
pub fn compute_quote(meta: &PrintMetadata, settings: &CostSettings) -> Result<QuoteBreakdown> {
    settings.validate()?;

    let hours = f64::from(meta.duration_minutes) / 60.0;

    let material_cost: f64 = meta
        .slots
        .iter()
        .map(|slot| slot.weight_grams / 1000.0 * settings.price_for_slot(slot.slot_index))
        .sum();
    let energy_cost = settings.printer_watts / 1000.0 * hours * settings.energy_price_per_kwh;
    let machine_cost = settings.depreciation_per_hour * hours;
    let labor_cost = settings.labor_rate_per_hour * settings.prep_minutes / 60.0;

    let raw_cost = material_cost + energy_cost + machine_cost + labor_cost;
    let failure_buffer = raw_cost * settings.failure_percent / 100.0;
    let production_cost = raw_cost + failure_buffer;
    let margin = production_cost * settings.margin_percent / 100.0;
    let net_price = production_cost + margin;
    let tax = if settings.tax_enabled {
        net_price * settings.tax_percent / 100.0
    } else {
        0.0
    };

    Ok(QuoteBreakdown {
        material_cost,
        energy_cost,
        machine_cost,
        labor_cost,
        raw_cost,
        failure_buffer,
        production_cost,
        margin,
        net_price,
        tax,
        total: net_price + tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use printquote_meta::FilamentSlot;

    fn meta_with(minutes: u32, weights: &[f64]) -> PrintMetadata {
        let slots: Vec<FilamentSlot> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| FilamentSlot::bare(i as u32 + 1, *w))
            .collect();
        PrintMetadata {
            duration_minutes: minutes,
            original_duration_minutes: minutes,
            total_weight_grams: weights.iter().sum(),
            slots,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_settings_quote() {
        // 2 h print, 100 g of filament at the defaults:
        // material 2.00, energy 0.3 kW * 2 h * 0.15 = 0.09, margin 30 %.
        let meta = meta_with(120, &[100.0]);
        let quote = compute_quote(&meta, &CostSettings::default()).unwrap();

        assert_relative_eq!(quote.material_cost, 2.0, epsilon = 1e-9);
        assert_relative_eq!(quote.energy_cost, 0.09, epsilon = 1e-9);
        assert_relative_eq!(quote.machine_cost, 0.0, epsilon = 1e-9);
        assert_relative_eq!(quote.raw_cost, 2.09, epsilon = 1e-9);
        assert_relative_eq!(quote.margin, 0.627, epsilon = 1e-9);
        assert_relative_eq!(quote.total, 2.717, epsilon = 1e-9);
    }

    #[test]
    fn test_per_slot_price_override() {
        let meta = meta_with(0, &[100.0, 100.0]);
        let settings = CostSettings {
            slot_prices_per_kg: vec![20.0, 50.0],
            ..Default::default()
        };
        let quote = compute_quote(&meta, &settings).unwrap();
        assert_relative_eq!(quote.material_cost, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_failure_buffer_and_tax() {
        let meta = meta_with(60, &[50.0]);
        let settings = CostSettings {
            margin_percent: 0.0,
            failure_percent: 10.0,
            tax_enabled: true,
            tax_percent: 21.0,
            ..Default::default()
        };
        let quote = compute_quote(&meta, &settings).unwrap();

        // material 1.00 + energy 0.045 = 1.045; +10% buffer = 1.1495
        assert_relative_eq!(quote.raw_cost, 1.045, epsilon = 1e-9);
        assert_relative_eq!(quote.production_cost, 1.1495, epsilon = 1e-9);
        assert_relative_eq!(quote.tax, 1.1495 * 0.21, epsilon = 1e-9);
        assert_relative_eq!(quote.total, 1.1495 * 1.21, epsilon = 1e-9);
    }

    #[test]
    fn test_sparse_metadata_costs_nothing() {
        let quote = compute_quote(&PrintMetadata::default(), &CostSettings::default()).unwrap();
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn test_labor_cost() {
        let meta = meta_with(0, &[]);
        let settings = CostSettings {
            labor_rate_per_hour: 30.0,
            prep_minutes: 20.0,
            margin_percent: 0.0,
            ..Default::default()
        };
        let quote = compute_quote(&meta, &settings).unwrap();
        assert_relative_eq!(quote.labor_cost, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = CostSettings {
            material_price_per_kg: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = CostSettings {
            slot_prices_per_kg: vec![f64::NAN],
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
