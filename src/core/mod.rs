//! Core data types for signature-family discovery.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GenomeId`](types::GenomeId), [`FamilyId`](types::FamilyId): opaque identifiers
//! - [`SetLabel`](types::SetLabel): which genome set (in or out) an observation belongs to
//! - [`GenomeSet`](genome_set::GenomeSet): a named, ordered list of genomes
//! - [`FamilyCounts`](family::FamilyCounts), [`FamilyRecord`](family::FamilyRecord):
//!   per-family occurrence counts and the annotated result row
//!
//! ## Terminology
//!
//! | Term | Meaning |
//! |------|---------|
//! | Family | Predefined grouping of homologous genes/proteins |
//! | In-set (A) | Genomes the signature families should be common in |
//! | Out-set (B) | Genomes the signature families should be rare in |
//! | Signature family | A family passing both the `min_in` and `max_out` thresholds |

pub mod family;
pub mod genome_set;
pub mod types;
