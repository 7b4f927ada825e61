//! Signatures command - find families common in one genome set and rare in another.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::sets::resolve_genome_set;
use crate::catalog::store::FamilyCatalog;
use crate::cli::OutputFormat;
use crate::signature::config::{
    RetryPolicy, SignatureConfig, DEFAULT_MAX_OUT, DEFAULT_MAX_RETRIES, DEFAULT_MIN_IN,
    DEFAULT_PROGRESS_INTERVAL,
};
use crate::signature::engine::{SignatureEngine, SignatureError, SignatureReport};
use crate::signature::progress::{CancellationToken, TracingProgress};

/// Arguments for the signatures command
#[derive(Args)]
pub struct SignaturesArgs {
    /// Family catalog (JSON, or genome/family/product table, optionally gzipped)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// In-set: catalog set name or file with one genome ID per line
    #[arg(long = "in-set", required = true)]
    pub in_set: String,

    /// Out-set: catalog set name or file with one genome ID per line
    #[arg(long = "out-set", required = true)]
    pub out_set: String,

    /// Minimum fraction of in-set genomes that must contain a family
    #[arg(long, default_value_t = DEFAULT_MIN_IN, allow_negative_numbers = true)]
    pub min_in: f64,

    /// Maximum fraction of out-set genomes allowed to contain a family
    #[arg(long, default_value_t = DEFAULT_MAX_OUT, allow_negative_numbers = true)]
    pub max_out: f64,

    /// Worker threads (defaults to available cores, at most 8)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Genomes between progress messages (0 to disable)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,

    /// Retries per genome when the data source is unavailable
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,
}

impl SignaturesArgs {
    fn config(&self) -> Result<SignatureConfig, SignatureError> {
        let mut config = SignatureConfig::new(self.min_in, self.max_out)?
            .with_progress_interval(self.progress_interval)
            .with_retry(RetryPolicy {
                max_retries: self.max_retries,
                ..RetryPolicy::default()
            });
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Execute the signatures command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the catalog or a genome
/// set cannot be loaded, or the run fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SignaturesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Thresholds are checked before any data is read
    let config = args.config()?;

    let catalog = FamilyCatalog::load_from_file(&args.catalog)?;
    if verbose {
        eprintln!(
            "Loaded catalog with {} genomes, {} families ({} annotated)",
            catalog.genome_count(),
            catalog.family_count(),
            catalog.annotated_count()
        );
    }

    let in_set = resolve_genome_set(&args.in_set, &catalog)?;
    let out_set = resolve_genome_set(&args.out_set, &catalog)?;
    if verbose {
        eprintln!(
            "In-set '{}': {} genomes; out-set '{}': {} genomes",
            in_set.name,
            in_set.len(),
            out_set.name,
            out_set.len()
        );
        eprintln!(
            "Thresholds: min_in {:.2}, max_out {:.2}, {} threads",
            config.min_in, config.max_out, config.threads
        );
    }

    let engine = SignatureEngine::new(&catalog, &catalog, config)?;
    let report = engine.run(&in_set, &out_set, &TracingProgress, &CancellationToken::new())?;

    if !report.skipped.is_empty() {
        eprintln!(
            "Warning: {} genome(s) skipped (not found or malformed)",
            report.skipped.len()
        );
        if verbose {
            for skipped in &report.skipped {
                eprintln!("  {} {}: {}", skipped.set, skipped.genome, skipped.reason);
            }
        }
    }

    match format {
        OutputFormat::Text => print_text_results(&report, &in_set.name, &out_set.name),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_results(&report),
    }

    Ok(())
}

fn print_text_results(report: &SignatureReport, in_name: &str, out_name: &str) {
    println!(
        "Signature families: {} ({} in '{in_name}', {} in '{out_name}')\n",
        report.families.len(),
        report.in_set_size,
        report.out_set_size
    );

    if report.families.is_empty() {
        println!("No families passed the thresholds.");
        return;
    }

    let id_width = report
        .families
        .iter()
        .map(|f| f.family_id.as_str().len())
        .max()
        .unwrap_or(9)
        .max(9);

    println!(
        "{:<id_w$} {:>10} {:>10}  Product",
        "Family",
        "In",
        "Out",
        id_w = id_width
    );
    println!("{}", "-".repeat(id_width + 31));
    for family in &report.families {
        println!(
            "{:<id_w$} {:>10} {:>10}  {}",
            family.family_id.as_str(),
            format!("{}/{}", family.count_in_a, report.in_set_size),
            format!("{}/{}", family.count_in_b, report.out_set_size),
            family.product,
            id_w = id_width
        );
    }
}

fn print_tsv_results(report: &SignatureReport) {
    println!("family_id\tcount_in_a\tcount_in_b\tproduct");
    for family in &report.families {
        println!(
            "{}\t{}\t{}\t{}",
            family.family_id, family.count_in_a, family.count_in_b, family.product
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(extra: &[&str]) -> SignaturesArgs {
        let mut argv = vec![
            "famsig",
            "signatures",
            "--catalog",
            "catalog.json",
            "--in-set",
            "pathogens",
            "--out-set",
            "commensals",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Signatures(args) => args,
            Commands::Catalog(_) => panic!("expected signatures command"),
        }
    }

    #[test]
    fn test_default_args_use_default_retry_policy() {
        let config = parse(&[]).config().unwrap();
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.min_in, DEFAULT_MIN_IN);
        assert_eq!(config.max_out, DEFAULT_MAX_OUT);
    }

    #[test]
    fn test_max_retries_overrides_only_the_retry_count() {
        let config = parse(&["--max-retries", "7"]).config().unwrap();
        assert_eq!(
            config.retry,
            RetryPolicy {
                max_retries: 7,
                ..RetryPolicy::default()
            }
        );
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        let err = parse(&["--threads", "0"]).config().unwrap_err();
        assert!(matches!(err, SignatureError::Configuration(_)));
    }
}
