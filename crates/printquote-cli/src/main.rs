//! printquote CLI - price 3D-print jobs from sliced-model files.
//!
//! Extracts print metadata from slicer output, combines it with the cost
//! parameters of the local printer/material catalog, and prints a quote.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use printquote_catalog::{CatalogRepository, JsonCatalogStore, Material, Printer, SavedQuote};
use printquote_meta::{extract_metadata, read_print_file, PrintMetadata};
use printquote_pricing::{compute_quote, CostSettings};
use printquote_report::{JobSummary, QuoteDocument};

#[derive(Parser)]
#[command(name = "printquote")]
#[command(about = "Price 3D-print jobs from sliced-model files", long_about = None)]
struct Cli {
    /// Catalog file (created on first save)
    #[arg(long, global = true, default_value = "printquote-catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the metadata extracted from a sliced-model file
    Inspect {
        /// Path to the slicer output file
        file: PathBuf,
    },
    /// Compute and print a quote for a sliced-model file
    Quote(QuoteArgs),
    /// Manage the printer catalog
    Printer {
        #[command(subcommand)]
        action: PrinterAction,
    },
    /// Manage the material catalog
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },
    /// List and remove saved quotes
    Quotes {
        #[command(subcommand)]
        action: QuotesAction,
    },
}

#[derive(Args)]
struct QuoteArgs {
    /// Path to the slicer output file
    file: PathBuf,
    /// Catalog printer supplying wattage and depreciation
    #[arg(short, long)]
    printer: Option<String>,
    /// Catalog material supplying the price per kg
    #[arg(short, long)]
    material: Option<String>,
    /// Override the extracted duration (minutes)
    #[arg(long)]
    duration: Option<u32>,
    /// Profit margin percent
    #[arg(long, default_value_t = 30.0)]
    margin: f64,
    /// Failure-rate buffer percent
    #[arg(long, default_value_t = 0.0)]
    failure: f64,
    /// Apply tax at this percent rate
    #[arg(long)]
    tax: Option<f64>,
    /// Labor rate per hour
    #[arg(long, default_value_t = 0.0)]
    labor_rate: f64,
    /// Hands-on prep time (minutes)
    #[arg(long, default_value_t = 0.0)]
    prep_minutes: f64,
    /// Shop name on the quote header
    #[arg(long, default_value = "printquote")]
    shop: String,
    /// Currency symbol on the quote
    #[arg(long, default_value = "EUR")]
    currency: String,
    /// Save the quote snapshot to the catalog
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum PrinterAction {
    /// List catalog printers
    List,
    /// Add a printer
    Add {
        /// Printer name
        name: String,
        /// Power draw (watts)
        #[arg(long, default_value_t = 300.0)]
        watts: f64,
        /// Depreciation per print hour
        #[arg(long, default_value_t = 0.0)]
        depreciation: f64,
    },
    /// Remove a printer by name
    Remove {
        /// Printer name
        name: String,
    },
}

#[derive(Subcommand)]
enum MaterialAction {
    /// List catalog materials
    List,
    /// Add a material
    Add {
        /// Material name
        name: String,
        /// Material type (PLA, PETG, ...)
        #[arg(long, default_value = "PLA")]
        kind: String,
        /// Price per kg
        #[arg(long, default_value_t = 20.0)]
        price: f64,
        /// Display color (#RRGGBB)
        #[arg(long, default_value = "#FFFFFF")]
        color: String,
    },
    /// Remove a material by name
    Remove {
        /// Material name
        name: String,
    },
}

#[derive(Subcommand)]
enum QuotesAction {
    /// List saved quotes
    List,
    /// Remove a saved quote by id
    Remove {
        /// Quote id
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonCatalogStore::new(&cli.catalog);

    match cli.command {
        Commands::Inspect { file } => inspect_file(&file)?,
        Commands::Quote(args) => quote_file(&store, &args)?,
        Commands::Printer { action } => manage_printers(&store, action)?,
        Commands::Material { action } => manage_materials(&store, action)?,
        Commands::Quotes { action } => manage_quotes(&store, action)?,
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

fn load_metadata(file: &Path) -> Result<PrintMetadata> {
    let text = read_print_file(file)?;
    Ok(extract_metadata(&text, &display_name(file)))
}

fn inspect_file(file: &Path) -> Result<()> {
    let meta = load_metadata(file)?;
    let (hours, minutes) = meta.duration_hm();

    println!("{}", display_name(file));
    println!("  Slicer:       {:?}", meta.detected_slicer);
    println!("  Duration:     {}h {:02}m ({} min)", hours, minutes, meta.duration_minutes);
    println!("  Filament:     {:.2} g", meta.total_weight_grams);
    if meta.layer_height_mm > 0.0 {
        println!("  Layer height: {} mm", meta.layer_height_mm);
    }
    if meta.layer_count > 0 {
        println!("  Layers:       {}", meta.layer_count);
    }
    println!(
        "  Thumbnail:    {}",
        match &meta.thumbnail_png {
            Some(png) => format!("{} bytes (PNG)", png.len()),
            None => "none".to_string(),
        }
    );

    if !meta.slots.is_empty() {
        println!("\nSlots:");
        for slot in &meta.slots {
            println!(
                "  {}: {:>8.2} g  {:<8} {}",
                slot.slot_index, slot.weight_grams, slot.material, slot.color_hex
            );
        }
    }
    Ok(())
}

fn quote_file(store: &JsonCatalogStore, args: &QuoteArgs) -> Result<()> {
    let mut meta = load_metadata(&args.file)?;
    if let Some(minutes) = args.duration {
        // User-edited duration; the original stays untouched in the record.
        meta.duration_minutes = minutes;
    }

    let mut catalog = store.load()?;
    let mut settings = CostSettings {
        margin_percent: args.margin,
        failure_percent: args.failure,
        labor_rate_per_hour: args.labor_rate,
        prep_minutes: args.prep_minutes,
        ..Default::default()
    };
    if let Some(rate) = args.tax {
        settings.tax_enabled = true;
        settings.tax_percent = rate;
    }
    if let Some(name) = &args.printer {
        let printer = catalog
            .printer(name)
            .ok_or_else(|| anyhow::anyhow!("unknown printer: {name}"))?;
        settings.printer_watts = printer.watts;
        settings.depreciation_per_hour = printer.depreciation_per_hour;
    }
    if let Some(name) = &args.material {
        let material = catalog
            .material(name)
            .ok_or_else(|| anyhow::anyhow!("unknown material: {name}"))?;
        settings.material_price_per_kg = material.price_per_kg;
    }

    let breakdown = compute_quote(&meta, &settings)?;
    let document = QuoteDocument {
        shop_name: args.shop.clone(),
        issued_on: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        currency: args.currency.clone(),
        job: JobSummary {
            name: display_name(&args.file),
            duration_minutes: meta.duration_minutes,
            total_weight_grams: meta.total_weight_grams,
            slot_count: meta.slots.len(),
        },
        breakdown: breakdown.clone(),
    };
    println!("{}", document.render_text());

    if args.save {
        let quote = SavedQuote::freeze(
            &display_name(&args.file),
            meta.duration_minutes,
            meta.total_weight_grams,
            breakdown,
        );
        let id = quote.id.clone();
        catalog.add_quote(quote);
        store.save(&catalog)?;
        println!("Saved quote {}", id);
    }
    Ok(())
}

fn manage_printers(store: &JsonCatalogStore, action: PrinterAction) -> Result<()> {
    let mut catalog = store.load()?;
    match action {
        PrinterAction::List => {
            for printer in &catalog.printers {
                println!(
                    "{:<28} {:>6.0} W  {:>6.2}/h",
                    printer.name, printer.watts, printer.depreciation_per_hour
                );
            }
        }
        PrinterAction::Add {
            name,
            watts,
            depreciation,
        } => {
            catalog.add_printer(Printer {
                name: name.clone(),
                watts,
                depreciation_per_hour: depreciation,
            })?;
            store.save(&catalog)?;
            println!("Added printer {}", name);
        }
        PrinterAction::Remove { name } => {
            catalog.remove_printer(&name)?;
            store.save(&catalog)?;
            println!("Removed printer {}", name);
        }
    }
    Ok(())
}

fn manage_materials(store: &JsonCatalogStore, action: MaterialAction) -> Result<()> {
    let mut catalog = store.load()?;
    match action {
        MaterialAction::List => {
            for material in &catalog.materials {
                println!(
                    "{:<24} {:<6} {:>7.2}/kg  {}",
                    material.name, material.material_type, material.price_per_kg, material.color_hex
                );
            }
        }
        MaterialAction::Add {
            name,
            kind,
            price,
            color,
        } => {
            catalog.add_material(Material {
                name: name.clone(),
                material_type: kind,
                price_per_kg: price,
                color_hex: color,
            })?;
            store.save(&catalog)?;
            println!("Added material {}", name);
        }
        MaterialAction::Remove { name } => {
            catalog.remove_material(&name)?;
            store.save(&catalog)?;
            println!("Removed material {}", name);
        }
    }
    Ok(())
}

fn manage_quotes(store: &JsonCatalogStore, action: QuotesAction) -> Result<()> {
    let mut catalog = store.load()?;
    match action {
        QuotesAction::List => {
            for quote in &catalog.quotes {
                println!(
                    "{}  {}  {:>4} min  {:>8.1} g  {:>10.2}",
                    quote.id,
                    quote.created_at.format("%Y-%m-%d"),
                    quote.duration_minutes,
                    quote.total_weight_grams,
                    quote.breakdown.total
                );
            }
        }
        QuotesAction::Remove { id } => {
            catalog.remove_quote(&id)?;
            store.save(&catalog)?;
            println!("Removed quote {}", id);
        }
    }
    Ok(())
}
