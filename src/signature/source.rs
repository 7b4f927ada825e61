//! Capability interfaces consumed by the signature engine.

use thiserror::Error;

use crate::core::types::{FamilyId, GenomeId};

/// Failure fetching one genome's family membership
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The genome is unknown to the data source
    #[error("Genome not found: {0}")]
    NotFound(GenomeId),

    /// The genome record exists but could not be interpreted
    #[error("Malformed data for genome {genome}: {reason}")]
    DataError { genome: GenomeId, reason: String },

    /// The data source could not be reached; worth retrying
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Yields the families present in a genome.
///
/// Implementations may perform blocking I/O and are called concurrently from
/// worker threads. Repeated family IDs in the returned list are allowed; the
/// engine deduplicates them.
pub trait MembershipSource: Send + Sync {
    /// # Errors
    ///
    /// `SourceError::NotFound` for an unknown genome, `SourceError::DataError`
    /// for a malformed record, `SourceError::Unavailable` when the backing
    /// store cannot be reached.
    fn families_of(&self, genome: &GenomeId) -> Result<Vec<FamilyId>, SourceError>;
}

/// Yields the product description of a family, if annotated.
pub trait AnnotationSource {
    fn product_of(&self, family: &FamilyId) -> Option<String>;
}

impl<T: MembershipSource + ?Sized> MembershipSource for &T {
    fn families_of(&self, genome: &GenomeId) -> Result<Vec<FamilyId>, SourceError> {
        (**self).families_of(genome)
    }
}

impl<T: AnnotationSource + ?Sized> AnnotationSource for &T {
    fn product_of(&self, family: &FamilyId) -> Option<String> {
        (**self).product_of(family)
    }
}

impl AnnotationSource for std::collections::HashMap<FamilyId, String> {
    fn product_of(&self, family: &FamilyId) -> Option<String> {
        self.get(family).cloned()
    }
}
