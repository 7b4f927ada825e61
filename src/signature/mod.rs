//! Signature-family discovery engine.
//!
//! Given an in-set and an out-set of genomes, finds the families present in
//! at least `min_in` of the in-set genomes and at most `max_out` of the
//! out-set genomes.
//!
//! - [`SignatureEngine`](engine::SignatureEngine): orchestrates a run
//! - [`FamilyAccumulator`](accumulator::FamilyAccumulator): per-family counts, mergeable
//! - [`select`](filter::select): threshold filter with deterministic ordering
//! - [`annotate`](annotation::annotate): product annotation join
//! - [`MembershipSource`](source::MembershipSource),
//!   [`AnnotationSource`](source::AnnotationSource),
//!   [`ProgressSink`](progress::ProgressSink): capabilities supplied by the caller
//!
//! ## Algorithm
//!
//! 1. Each set is split across a bounded rayon pool. Every worker fetches
//!    one genome at a time and folds its distinct families into a local
//!    accumulator.
//! 2. Worker accumulators are merged by per-family summation.
//! 3. Families are kept when `count_in_a / |A| >= min_in` and
//!    `count_in_b / |B| <= max_out`; a fraction over an empty set is zero.
//! 4. Survivors are annotated with their product description.
//!
//! Genomes the source reports as missing or malformed are skipped and
//! listed in the report. An unreachable source is retried with backoff and
//! ends the run when the retry budget runs out.
//!
//! ## Example
//!
//! ```rust,no_run
//! use famsig::{FamilyCatalog, GenomeSet, SignatureConfig, SignatureEngine};
//! use famsig::signature::progress::{CancellationToken, TracingProgress};
//! use std::path::Path;
//!
//! let catalog = FamilyCatalog::load_from_file(Path::new("catalog.json")).unwrap();
//! let in_set = catalog.genome_set("pathogens").unwrap();
//! let out_set = catalog.genome_set("commensals").unwrap();
//!
//! let config = SignatureConfig::new(0.9, 0.1).unwrap();
//! let engine = SignatureEngine::new(&catalog, &catalog, config).unwrap();
//! let report = engine
//!     .run(&in_set, &out_set, &TracingProgress, &CancellationToken::new())
//!     .unwrap();
//!
//! for family in &report.families {
//!     println!("{}\t{}\t{}\t{}", family.family_id, family.count_in_a, family.count_in_b, family.product);
//! }
//! ```

pub mod accumulator;
pub mod annotation;
pub mod config;
pub mod engine;
pub mod filter;
pub mod progress;
pub mod source;
