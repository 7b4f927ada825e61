use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::GenomeId;

/// A named, ordered collection of genome IDs.
///
/// Order has no effect on results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeSet {
    pub name: String,
    pub genomes: Vec<GenomeId>,
}

impl GenomeSet {
    /// Build a set, collapsing repeated IDs to their first occurrence.
    ///
    /// A genome listed twice would otherwise be counted twice and push a
    /// family count past the set size.
    pub fn new(name: impl Into<String>, ids: impl IntoIterator<Item = GenomeId>) -> Self {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut genomes = Vec::new();
        let mut duplicates = 0usize;

        for id in ids {
            if seen.insert(id.clone()) {
                genomes.push(id);
            } else {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!("Genome set '{name}' listed {duplicates} genome(s) more than once; duplicates ignored");
        }

        Self { name, genomes }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenomeId> {
        self.genomes.iter()
    }
}

impl<'a> IntoIterator for &'a GenomeSet {
    type Item = &'a GenomeId;
    type IntoIter = std::slice::Iter<'a, GenomeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.genomes.iter()
    }
}
