//! Parsers for the plain-text inputs of a run.
//!
//! This module provides parsers for:
//!
//! - **Genome lists**: one genome ID per line, the genome-set reader input
//! - **Membership tables**: `genome_id<TAB>family_id[<TAB>product]` rows
//!   used to build a [`FamilyCatalog`](crate::catalog::store::FamilyCatalog)
//!
//! Both accept gzip/bgzip compressed files (`.gz`, `.bgz`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use famsig::parsing::genome_list::parse_genome_list_file;
//! use famsig::parsing::membership::parse_membership_text;
//! use std::path::Path;
//!
//! let genomes = parse_genome_list_file(Path::new("pathogens.txt")).unwrap();
//!
//! let rows = parse_membership_text("g1\tPGF_00000001\tChaperone protein DnaK\n").unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

pub mod genome_list;
pub mod input;
pub mod membership;
