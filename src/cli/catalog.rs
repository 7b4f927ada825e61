use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::FamilyCatalog;
use crate::cli::OutputFormat;
use crate::core::types::GenomeId;
use crate::signature::source::AnnotationSource;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Show genome, family and set counts
    Summary {
        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// List named genome sets
    Sets {
        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Show the families of one genome
    Show {
        /// Genome ID
        #[arg(required = true)]
        genome: String,

        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Export the catalog as JSON
    Export {
        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::Summary { catalog } => run_summary(catalog, format),
        CatalogCommands::Sets { catalog } => run_sets(catalog, format),
        CatalogCommands::Show { genome, catalog } => run_show(&genome, catalog, format),
        CatalogCommands::Export { catalog, output } => run_export(catalog, output, verbose),
    }
}

fn run_summary(catalog_path: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = FamilyCatalog::load_from_file(&catalog_path)?;
    let genomes = catalog.genome_count();
    let families = catalog.family_count();
    let annotated = catalog.annotated_count();
    let sets = catalog.genome_sets().len();

    match format {
        OutputFormat::Text => {
            println!("Catalog: {}\n", catalog_path.display());
            println!("Genomes:            {genomes}");
            println!("Families:           {families}");
            println!("Annotated families: {annotated}");
            println!("Genome sets:        {sets}");
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "genomes": genomes,
                "families": families,
                "annotated_families": annotated,
                "genome_sets": sets,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("genomes\tfamilies\tannotated_families\tgenome_sets");
            println!("{genomes}\t{families}\t{annotated}\t{sets}");
        }
    }

    Ok(())
}

fn run_sets(catalog_path: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = FamilyCatalog::load_from_file(&catalog_path)?;
    let sets = catalog.genome_sets();

    match format {
        OutputFormat::Text => {
            if sets.is_empty() {
                println!("No named genome sets in catalog.");
                return Ok(());
            }
            let name_width = sets.iter().map(|(n, _)| n.len()).max().unwrap_or(4).max(4);
            println!("{:<name_w$} {:>8}", "Name", "Genomes", name_w = name_width);
            println!("{}", "-".repeat(name_width + 9));
            for (name, size) in &sets {
                println!("{name:<name_w$} {size:>8}", name_w = name_width);
            }
        }
        OutputFormat::Json => {
            let json: serde_json::Map<String, serde_json::Value> = sets
                .iter()
                .map(|(name, size)| ((*name).to_string(), serde_json::json!(size)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("name\tgenomes");
            for (name, size) in &sets {
                println!("{name}\t{size}");
            }
        }
    }

    Ok(())
}

fn run_show(genome: &str, catalog_path: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = FamilyCatalog::load_from_file(&catalog_path)?;
    let entry = catalog
        .get(&GenomeId::new(genome))
        .ok_or_else(|| anyhow::anyhow!("Genome '{}' not found", genome))?;

    match format {
        OutputFormat::Text => {
            println!("Genome: {} ({} families)\n", entry.id, entry.families.len());
            for family in &entry.families {
                println!(
                    "{:<20} {}",
                    family.as_str(),
                    catalog.product_of(family).unwrap_or_default()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
        OutputFormat::Tsv => {
            println!("family_id\tproduct");
            for family in &entry.families {
                println!(
                    "{}\t{}",
                    family,
                    catalog.product_of(family).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn run_export(
    catalog_path: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = FamilyCatalog::load_from_file(&catalog_path)?;
    let json = catalog.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!(
                "Exported {} genomes to {}",
                catalog.genome_count(),
                path.display()
            );
        }
        None => {
            println!("{json}");
            if verbose {
                eprintln!("Exported {} genomes", catalog.genome_count());
            }
        }
    }

    Ok(())
}
