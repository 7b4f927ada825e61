//! Selection of families that are common in the in-set and rare in the out-set.

use std::collections::HashMap;

use crate::core::family::FamilyCounts;
use crate::core::types::FamilyId;
use crate::utils::validation::fraction;

/// Thresholds and set sizes a family is judged against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_in: f64,
    pub max_out: f64,
    /// Number of genomes in the in-set
    pub size_a: usize,
    /// Number of genomes in the out-set
    pub size_b: usize,
}

impl Thresholds {
    /// Whether a family with these counts is a signature family.
    ///
    /// Fractions over an empty set are zero: an empty in-set only passes
    /// `min_in == 0`, and an empty out-set never excludes anything.
    #[must_use]
    pub fn qualifies(&self, counts: FamilyCounts) -> bool {
        counts.in_a > 0
            && fraction(counts.in_a, self.size_a) >= self.min_in
            && fraction(counts.in_b, self.size_b) <= self.max_out
    }
}

/// Select qualifying families in a deterministic order.
///
/// Ordered by descending in-set count, then ascending out-set count, then
/// family ID.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn select(
    counts: &HashMap<FamilyId, FamilyCounts>,
    thresholds: &Thresholds,
) -> Vec<(FamilyId, FamilyCounts)> {
    let mut selected: Vec<(FamilyId, FamilyCounts)> = counts
        .iter()
        .filter(|(_, c)| thresholds.qualifies(**c))
        .map(|(f, c)| (f.clone(), *c))
        .collect();

    selected.sort_by(|(fa, ca), (fb, cb)| {
        cb.in_a
            .cmp(&ca.in_a)
            .then_with(|| ca.in_b.cmp(&cb.in_b))
            .then_with(|| fa.cmp(fb))
    });

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, usize, usize)]) -> HashMap<FamilyId, FamilyCounts> {
        entries
            .iter()
            .map(|(f, a, b)| (FamilyId::new(*f), FamilyCounts { in_a: *a, in_b: *b }))
            .collect()
    }

    fn ids(selected: &[(FamilyId, FamilyCounts)]) -> Vec<&str> {
        selected.iter().map(|(f, _)| f.as_str()).collect()
    }

    #[test]
    fn test_select_two_genome_scenario() {
        let c = counts(&[("f1", 2, 0), ("f2", 1, 1)]);
        let t = Thresholds {
            min_in: 0.5,
            max_out: 0.5,
            size_a: 2,
            size_b: 1,
        };
        assert_eq!(ids(&select(&c, &t)), vec!["f1"]);
    }

    #[test]
    fn test_exact_threshold_is_inclusive() {
        // 9/10 == 0.9 and 1/10 == 0.1 sit exactly on the defaults
        let c = counts(&[("edge", 9, 1), ("below", 8, 0), ("above_out", 10, 2)]);
        let t = Thresholds {
            min_in: 0.9,
            max_out: 0.1,
            size_a: 10,
            size_b: 10,
        };
        assert_eq!(ids(&select(&c, &t)), vec!["edge"]);
    }

    #[test]
    fn test_empty_in_set_selects_nothing() {
        let c = counts(&[("f1", 0, 1)]);
        let t = Thresholds {
            min_in: 0.5,
            max_out: 1.0,
            size_a: 0,
            size_b: 1,
        };
        assert!(select(&c, &t).is_empty());
    }

    #[test]
    fn test_empty_out_set_never_excludes() {
        let c = counts(&[("f1", 3, 0), ("f2", 2, 0)]);
        let t = Thresholds {
            min_in: 0.5,
            max_out: 0.0,
            size_a: 3,
            size_b: 0,
        };
        assert_eq!(ids(&select(&c, &t)), vec!["f1", "f2"]);
    }

    #[test]
    fn test_min_in_zero_requires_presence_in_a() {
        let c = counts(&[("in_a", 1, 5), ("only_b", 0, 5)]);
        let t = Thresholds {
            min_in: 0.0,
            max_out: 1.0,
            size_a: 4,
            size_b: 5,
        };
        assert_eq!(ids(&select(&c, &t)), vec!["in_a"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let c = counts(&[("fc", 3, 1), ("fa", 3, 1), ("fb", 3, 0), ("fd", 4, 1)]);
        let t = Thresholds {
            min_in: 0.0,
            max_out: 1.0,
            size_a: 4,
            size_b: 4,
        };
        assert_eq!(ids(&select(&c, &t)), vec!["fd", "fb", "fa", "fc"]);
    }
}
