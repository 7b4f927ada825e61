use crate::core::family::{FamilyCounts, FamilyRecord, UNKNOWN_PRODUCT};
use crate::core::types::FamilyId;
use crate::signature::source::AnnotationSource;

/// Attach product descriptions to the selected families.
///
/// A family without an annotation, or with a blank one, gets
/// [`UNKNOWN_PRODUCT`] so every row has the same columns.
pub fn annotate<A: AnnotationSource + ?Sized>(
    selected: Vec<(FamilyId, FamilyCounts)>,
    source: &A,
) -> Vec<FamilyRecord> {
    selected
        .into_iter()
        .map(|(family, counts)| {
            let product = source
                .product_of(&family)
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
            FamilyRecord::new(family, counts, product)
        })
        .collect()
}
