//! Command-line interface for famsig.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **signatures**: Find families common in an in-set and rare in an out-set
//! - **catalog**: Summarise, inspect or export a family catalog
//!
//! ## Usage
//!
//! ```text
//! # Signature families of two named catalog sets
//! famsig signatures --catalog families.json --in-set pathogens --out-set commensals
//!
//! # Genome lists from files, relaxed thresholds, TSV for scripting
//! famsig -f tsv signatures --catalog families.tsv.gz \
//!     --in-set in.txt --out-set out.txt --min-in 0.8 --max-out 0.2
//!
//! # What is in a catalog
//! famsig catalog summary --catalog families.json
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod signatures;

#[derive(Parser)]
#[command(name = "famsig")]
#[command(version)]
#[command(about = "Find gene/protein families that distinguish one set of genomes from another")]
#[command(
    long_about = "famsig finds signature families: families present in most genomes of an in-set and in few genomes of an out-set.\n\nGenome membership and product annotations come from a local family catalog (JSON or a genome/family/product table). Genome sets are named sets from the catalog or files with one genome ID per line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find signature families between two genome sets
    Signatures(signatures::SignaturesArgs),

    /// Inspect a family catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
