//! # famsig
//!
//! A library for finding signature gene/protein families between two
//! collections of genomes.
//!
//! Comparative genomics often asks which families set one group of genomes
//! apart from another: present in nearly every pathogen, absent from nearly
//! every commensal, for example. `famsig` answers this with a
//! presence/absence count over predefined families: a family is a
//! *signature family* when it occurs in at least `min_in` of the in-set
//! genomes and at most `max_out` of the out-set genomes.
//!
//! ## Features
//!
//! - **Parallel counting**: genomes are fetched and counted on a bounded worker
//!   pool, with worker-local counts merged at the end
//! - **Per-genome fault tolerance**: missing or malformed genomes are skipped
//!   and reported instead of failing the run
//! - **Retry with backoff**: transient data-source outages are retried
//! - **Cancellation**: a run can be stopped between genomes with no partial output
//! - **Pluggable sources**: membership, annotation and progress are traits; a
//!   local [`FamilyCatalog`] implements the first two
//!
//! ## Example
//!
//! ```rust
//! use famsig::{FamilyCatalog, FamilyId, GenomeId, GenomeSet, SignatureConfig, SignatureEngine};
//! use famsig::signature::progress::{CancellationToken, SilentProgress};
//!
//! let mut catalog = FamilyCatalog::new();
//! catalog.add_genome(GenomeId::new("g1"), vec![FamilyId::new("f1"), FamilyId::new("f2")]).unwrap();
//! catalog.add_genome(GenomeId::new("g2"), vec![FamilyId::new("f1")]).unwrap();
//! catalog.add_genome(GenomeId::new("g3"), vec![FamilyId::new("f2")]).unwrap();
//!
//! let in_set = GenomeSet::new("in", vec![GenomeId::new("g1"), GenomeId::new("g2")]);
//! let out_set = GenomeSet::new("out", vec![GenomeId::new("g3")]);
//!
//! let config = SignatureConfig::new(0.5, 0.5).unwrap();
//! let engine = SignatureEngine::new(&catalog, &catalog, config).unwrap();
//! let report = engine
//!     .run(&in_set, &out_set, &SilentProgress, &CancellationToken::new())
//!     .unwrap();
//!
//! assert_eq!(report.families.len(), 1);
//! assert_eq!(report.families[0].family_id, FamilyId::new("f1"));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Local genome/family catalog and genome-set resolution
//! - [`core`]: Identifiers, genome sets and family records
//! - [`signature`]: Accumulation, thresholding, annotation and the engine
//! - [`parsing`]: Parsers for genome lists and membership tables
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod signature;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::FamilyCatalog;
pub use crate::core::family::{FamilyCounts, FamilyRecord};
pub use crate::core::genome_set::GenomeSet;
pub use crate::core::types::*;
pub use signature::config::SignatureConfig;
pub use signature::engine::{SignatureEngine, SignatureError, SignatureReport};
