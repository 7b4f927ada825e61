use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::core::family::FamilyCounts;
use crate::core::types::{FamilyId, GenomeId, SetLabel};

/// Per-family occurrence counts across the in-set and out-set.
///
/// Accumulation is commutative, so workers can each fill their own
/// accumulator and combine them with [`FamilyAccumulator::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyAccumulator {
    counts: HashMap<FamilyId, FamilyCounts>,
    genomes_a: usize,
    genomes_b: usize,
}

impl FamilyAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one genome's family membership.
    ///
    /// Each distinct family is counted once for this genome, however many
    /// times the membership lists it.
    pub fn accumulate<'f>(
        &mut self,
        genome: &GenomeId,
        label: SetLabel,
        membership: impl IntoIterator<Item = &'f FamilyId>,
    ) {
        let distinct: HashSet<&FamilyId> = membership.into_iter().collect();
        trace!("{label} genome {genome}: {} distinct families", distinct.len());
        for family in distinct {
            self.counts
                .entry(family.clone())
                .or_default()
                .increment(label);
        }

        match label {
            SetLabel::InSet => self.genomes_a += 1,
            SetLabel::OutSet => self.genomes_b += 1,
        }
    }

    /// Fold another accumulator into this one by per-family summation
    pub fn merge(&mut self, other: FamilyAccumulator) {
        // Fold the smaller map into the larger one
        let mut other = other;
        if other.counts.len() > self.counts.len() {
            std::mem::swap(&mut self.counts, &mut other.counts);
        }
        for (family, counts) in other.counts {
            self.counts.entry(family).or_default().add(counts);
        }
        self.genomes_a += other.genomes_a;
        self.genomes_b += other.genomes_b;
    }

    /// Counts for one family, if any genome contained it
    #[must_use]
    pub fn get(&self, family: &FamilyId) -> Option<FamilyCounts> {
        self.counts.get(family).copied()
    }

    /// Number of accumulated genomes for a set
    #[must_use]
    pub fn genomes(&self, label: SetLabel) -> usize {
        match label {
            SetLabel::InSet => self.genomes_a,
            SetLabel::OutSet => self.genomes_b,
        }
    }

    /// Number of distinct families observed
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> &HashMap<FamilyId, FamilyCounts> {
        &self.counts
    }
}
