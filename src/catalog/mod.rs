//! Local genome/family catalog.
//!
//! The catalog records which families each genome contains, a product
//! description per family, and named genome sets. It implements both
//! [`MembershipSource`](crate::signature::source::MembershipSource) and
//! [`AnnotationSource`](crate::signature::source::AnnotationSource), so it can
//! feed the signature engine directly.
//!
//! ## Formats
//!
//! A catalog is loaded from either:
//!
//! - **JSON** (`.json`): genomes with their family lists, a product map and
//!   named genome sets, as written by [`FamilyCatalog::to_json`](store::FamilyCatalog::to_json)
//! - **Membership table** (any other extension, optionally gzipped):
//!   `genome_id<TAB>family_id[<TAB>product]`, one family per row
//!
//! ## Example
//!
//! ```rust,no_run
//! use famsig::FamilyCatalog;
//! use famsig::catalog::sets::resolve_genome_set;
//! use std::path::Path;
//!
//! let catalog = FamilyCatalog::load_from_file(Path::new("families.tsv.gz")).unwrap();
//! println!("{} genomes, {} families", catalog.genome_count(), catalog.family_count());
//!
//! // Named catalog set, or a file with one genome ID per line
//! let in_set = resolve_genome_set("pathogens.txt", &catalog).unwrap();
//! ```

pub mod sets;
pub mod store;
