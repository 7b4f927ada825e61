use serde::{Deserialize, Serialize};

use crate::core::types::{FamilyId, SetLabel};

/// Marker used when the annotation source has no product for a family
pub const UNKNOWN_PRODUCT: &str = "unknown";

/// Occurrence counts of one family across the two genome sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyCounts {
    /// Number of in-set genomes containing the family
    pub in_a: usize,
    /// Number of out-set genomes containing the family
    pub in_b: usize,
}

impl FamilyCounts {
    pub fn increment(&mut self, label: SetLabel) {
        match label {
            SetLabel::InSet => self.in_a += 1,
            SetLabel::OutSet => self.in_b += 1,
        }
    }

    /// Sum another worker's counts for the same family into this one
    pub fn add(&mut self, other: FamilyCounts) {
        self.in_a += other.in_a;
        self.in_b += other.in_b;
    }
}

/// A signature family as handed to downstream table writers.
///
/// Field order matches the output column order:
/// `family_id, count_in_a, count_in_b, product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRecord {
    pub family_id: FamilyId,
    pub count_in_a: usize,
    pub count_in_b: usize,
    /// Product description, `UNKNOWN_PRODUCT` when unannotated
    pub product: String,
}

impl FamilyRecord {
    pub fn new(family_id: FamilyId, counts: FamilyCounts, product: impl Into<String>) -> Self {
        Self {
            family_id,
            count_in_a: counts.in_a,
            count_in_b: counts.in_b,
            product: product.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_by_label() {
        let mut counts = FamilyCounts::default();
        counts.increment(SetLabel::InSet);
        counts.increment(SetLabel::InSet);
        counts.increment(SetLabel::OutSet);
        assert_eq!(counts, FamilyCounts { in_a: 2, in_b: 1 });
    }

    #[test]
    fn test_add_sums_both_sides() {
        let mut counts = FamilyCounts { in_a: 1, in_b: 4 };
        counts.add(FamilyCounts { in_a: 2, in_b: 0 });
        assert_eq!(counts, FamilyCounts { in_a: 3, in_b: 4 });
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = FamilyRecord::new(
            FamilyId::new("f1"),
            FamilyCounts { in_a: 2, in_b: 0 },
            "DNA gyrase subunit A",
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"family_id":"f1","count_in_a":2,"count_in_b":0,"product":"DNA gyrase subunit A"}"#
        );
    }
}
