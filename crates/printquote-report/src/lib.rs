#![warn(missing_docs)]

//! Printable quote document rendering for printquote.
//!
//! Consumes already-computed totals (never raw extractor output) and
//! produces a fixed-layout plain-text quote suitable for printing or
//! pasting into an email.

use printquote_pricing::QuoteBreakdown;
use serde::{Deserialize, Serialize};

const RULE: &str = "----------------------------------------";

/// The job figures a quote document displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job name, usually the uploaded file's display name.
    pub name: String,
    /// Print duration (minutes).
    pub duration_minutes: u32,
    /// Filament weight (grams).
    pub total_weight_grams: f64,
    /// Number of material slots used.
    pub slot_count: usize,
}

/// A renderable quote document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    /// Shop or issuer name printed in the header.
    pub shop_name: String,
    /// Issue date, already formatted for display.
    pub issued_on: String,
    /// Currency symbol.
    pub currency: String,
    /// The quoted job.
    pub job: JobSummary,
    /// The computed cost breakdown.
    pub breakdown: QuoteBreakdown,
}

impl QuoteDocument {
    /// Render the document as fixed-layout plain text.
    pub fn render_text(&self) -> String {
        let b = &self.breakdown;
        let (hours, minutes) = (
            self.job.duration_minutes / 60,
            self.job.duration_minutes % 60,
        );

        let mut out = String::new();
        out.push_str(&format!("{}\n", self.shop_name));
        out.push_str(&format!("Quote issued {}\n", self.issued_on));
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("Job:        {}\n", self.job.name));
        out.push_str(&format!("Duration:   {}h {:02}m\n", hours, minutes));
        out.push_str(&format!(
            "Filament:   {:.1} g ({} slot{})\n",
            self.job.total_weight_grams,
            self.job.slot_count,
            if self.job.slot_count == 1 { "" } else { "s" }
        ));
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&self.money_line("Material", b.material_cost));
        out.push_str(&self.money_line("Energy", b.energy_cost));
        out.push_str(&self.money_line("Machine", b.machine_cost));
        out.push_str(&self.money_line("Labor", b.labor_cost));
        if b.failure_buffer > 0.0 {
            out.push_str(&self.money_line("Failure buffer", b.failure_buffer));
        }
        out.push_str(&self.money_line("Margin", b.margin));
        if b.tax > 0.0 {
            out.push_str(&self.money_line("Tax", b.tax));
        }
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&self.money_line("TOTAL", b.total));
        out
    }

    fn money_line(&self, label: &str, amount: f64) -> String {
        format!("{:<18}{:>18.2} {}\n", label, amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> QuoteDocument {
        QuoteDocument {
            shop_name: "Test Shop".into(),
            issued_on: "2026-08-28".into(),
            currency: "EUR".into(),
            job: JobSummary {
                name: "benchy.gcode".into(),
                duration_minutes: 135,
                total_weight_grams: 42.5,
                slot_count: 2,
            },
            breakdown: QuoteBreakdown {
                material_cost: 0.85,
                energy_cost: 0.10,
                machine_cost: 0.0,
                labor_cost: 0.0,
                raw_cost: 0.95,
                failure_buffer: 0.095,
                production_cost: 1.045,
                margin: 0.3135,
                net_price: 1.3585,
                tax: 0.0,
                total: 1.3585,
            },
        }
    }

    #[test]
    fn test_render_layout() {
        let text = document().render_text();
        assert!(text.contains("Test Shop"));
        assert!(text.contains("Job:        benchy.gcode"));
        assert!(text.contains("Duration:   2h 15m"));
        assert!(text.contains("Filament:   42.5 g (2 slots)"));
        assert!(text.contains("Failure buffer"));
        assert!(!text.contains("Tax"));
        assert!(text.trim_end().ends_with("EUR"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("1.36 EUR"));
    }

    #[test]
    fn test_singular_slot_label() {
        let mut doc = document();
        doc.job.slot_count = 1;
        assert!(doc.render_text().contains("(1 slot)"));
    }

    #[test]
    fn test_tax_line_only_when_nonzero() {
        let mut doc = document();
        doc.breakdown.tax = 0.29;
        assert!(doc.render_text().contains("Tax"));
    }
}
