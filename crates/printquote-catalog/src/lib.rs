#![warn(missing_docs)]

//! Printer/material catalogs and saved quotes for printquote.
//!
//! Catalogs are plain data behind an explicit repository interface: the
//! in-memory [`Catalog`] offers create/read/update/delete on printers,
//! materials and saved quotes, and a [`CatalogRepository`] implementation
//! decides where it persists. The bundled [`JsonCatalogStore`] keeps a
//! single JSON file, read and written whole.
//!
//! Saved quotes are frozen numeric snapshots: they copy the figures of an
//! issued quote and never reference live metadata or catalog entries, so
//! later edits cannot alter them.

pub mod error;

pub use error::{CatalogError, Result};

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use printquote_pricing::QuoteBreakdown;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A printer in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printer {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Power draw while printing (watts).
    pub watts: f64,
    /// Depreciation rate (currency per print hour).
    pub depreciation_per_hour: f64,
}

/// A filament material in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Material type (e.g. "PLA", "PETG").
    pub material_type: String,
    /// Price (currency per kg).
    pub price_per_kg: f64,
    /// Display color as "#RRGGBB".
    pub color_hex: String,
}

/// A saved quote: the frozen numeric snapshot of an issued price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuote {
    /// Generated id.
    pub id: String,
    /// Quote name, usually the uploaded file's display name.
    pub name: String,
    /// When the quote was issued.
    pub created_at: DateTime<Utc>,
    /// Print duration at issue time (minutes).
    pub duration_minutes: u32,
    /// Filament weight at issue time (grams).
    pub total_weight_grams: f64,
    /// The full cost breakdown at issue time.
    pub breakdown: QuoteBreakdown,
}

impl SavedQuote {
    /// Freeze a quote under a new generated id, stamped with the current
    /// time.
    pub fn freeze(
        name: &str,
        duration_minutes: u32,
        total_weight_grams: f64,
        breakdown: QuoteBreakdown,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            duration_minutes,
            total_weight_grams,
            breakdown,
        }
    }
}

/// The full catalog: printers, materials and saved quotes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Printers, in insertion order.
    pub printers: Vec<Printer>,
    /// Materials, in insertion order.
    pub materials: Vec<Material>,
    /// Saved quotes, oldest first.
    pub quotes: Vec<SavedQuote>,
}

impl Catalog {
    /// A catalog seeded with a few common printers and materials.
    pub fn with_defaults() -> Self {
        Self {
            printers: vec![
                Printer {
                    name: "Generic".into(),
                    watts: 300.0,
                    depreciation_per_hour: 0.0,
                },
                Printer {
                    name: "Bambu Lab X1 Carbon".into(),
                    watts: 350.0,
                    depreciation_per_hour: 0.25,
                },
                Printer {
                    name: "Creality Ender 3".into(),
                    watts: 270.0,
                    depreciation_per_hour: 0.05,
                },
                Printer {
                    name: "Prusa MK4".into(),
                    watts: 240.0,
                    depreciation_per_hour: 0.15,
                },
            ],
            materials: vec![
                Material {
                    name: "Generic PLA".into(),
                    material_type: "PLA".into(),
                    price_per_kg: 20.0,
                    color_hex: "#FFFFFF".into(),
                },
                Material {
                    name: "Generic PETG".into(),
                    material_type: "PETG".into(),
                    price_per_kg: 24.0,
                    color_hex: "#FF8800".into(),
                },
                Material {
                    name: "Generic ABS".into(),
                    material_type: "ABS".into(),
                    price_per_kg: 22.0,
                    color_hex: "#222222".into(),
                },
            ],
            quotes: Vec::new(),
        }
    }

    /// Add a printer. Fails if the name is taken.
    pub fn add_printer(&mut self, printer: Printer) -> Result<()> {
        if self.printer(&printer.name).is_some() {
            return Err(CatalogError::Duplicate(printer.name));
        }
        self.printers.push(printer);
        Ok(())
    }

    /// Look up a printer by name.
    pub fn printer(&self, name: &str) -> Option<&Printer> {
        self.printers.iter().find(|p| p.name == name)
    }

    /// Replace a printer by name. Fails if absent.
    pub fn update_printer(&mut self, printer: Printer) -> Result<()> {
        match self.printers.iter_mut().find(|p| p.name == printer.name) {
            Some(slot) => {
                *slot = printer;
                Ok(())
            }
            None => Err(CatalogError::NotFound(printer.name)),
        }
    }

    /// Remove a printer by name. Fails if absent.
    pub fn remove_printer(&mut self, name: &str) -> Result<()> {
        let before = self.printers.len();
        self.printers.retain(|p| p.name != name);
        if self.printers.len() == before {
            return Err(CatalogError::NotFound(name.to_string()));
        }
        Ok(())
    }

    /// Add a material. Fails if the name is taken.
    pub fn add_material(&mut self, material: Material) -> Result<()> {
        if self.material(&material.name).is_some() {
            return Err(CatalogError::Duplicate(material.name));
        }
        self.materials.push(material);
        Ok(())
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Replace a material by name. Fails if absent.
    pub fn update_material(&mut self, material: Material) -> Result<()> {
        match self.materials.iter_mut().find(|m| m.name == material.name) {
            Some(slot) => {
                *slot = material;
                Ok(())
            }
            None => Err(CatalogError::NotFound(material.name)),
        }
    }

    /// Remove a material by name. Fails if absent.
    pub fn remove_material(&mut self, name: &str) -> Result<()> {
        let before = self.materials.len();
        self.materials.retain(|m| m.name != name);
        if self.materials.len() == before {
            return Err(CatalogError::NotFound(name.to_string()));
        }
        Ok(())
    }

    /// Append a saved quote.
    pub fn add_quote(&mut self, quote: SavedQuote) {
        self.quotes.push(quote);
    }

    /// Look up a saved quote by id.
    pub fn quote(&self, id: &str) -> Option<&SavedQuote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// Remove a saved quote by id. Fails if absent.
    pub fn remove_quote(&mut self, id: &str) -> Result<()> {
        let before = self.quotes.len();
        self.quotes.retain(|q| q.id != id);
        if self.quotes.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Where a catalog persists.
///
/// Injected into callers instead of being ambient global state, so hosts
/// and tests can substitute their own storage.
pub trait CatalogRepository {
    /// Load the catalog, or a seeded default when none exists yet.
    fn load(&self) -> Result<Catalog>;
    /// Persist the full catalog.
    fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// Repository keeping the catalog in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    /// A store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CatalogRepository for JsonCatalogStore {
    fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Ok(Catalog::with_defaults());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "catalog saved");
        Ok(())
    }
}
