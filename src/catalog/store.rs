use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::genome_set::GenomeSet;
use crate::core::types::{FamilyId, GenomeId};
use crate::parsing::membership::{parse_membership_file, MembershipRow, ParseError};
use crate::signature::source::{AnnotationSource, MembershipSource, SourceError};
use crate::utils::validation::{check_genome_limit, validate_identifier};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to parse membership table: {0}")]
    TableError(#[from] ParseError),

    #[error("Too many genomes: {0} exceeds maximum allowed (1000000)")]
    TooManyGenomes(usize),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Family membership of one genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeEntry {
    pub id: GenomeId,
    #[serde(default)]
    pub families: Vec<FamilyId>,
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub genomes: Vec<GenomeEntry>,
    /// Product description per family
    #[serde(default)]
    pub products: BTreeMap<FamilyId, String>,
    /// Named genome sets that can be used as in-set or out-set
    #[serde(default)]
    pub genome_sets: BTreeMap<String, Vec<GenomeId>>,
}

/// Local genome/family database: membership, annotation and named sets
#[derive(Debug, Default)]
pub struct FamilyCatalog {
    /// All genomes, in load order
    genomes: Vec<GenomeEntry>,

    /// Index: genome ID -> index in genomes vec
    id_to_index: HashMap<GenomeId, usize>,

    /// Family -> product description
    products: HashMap<FamilyId, String>,

    /// Set name -> genome IDs
    genome_sets: BTreeMap<String, Vec<GenomeId>>,
}

impl FamilyCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file: `.json` as catalog JSON, anything else as a membership table
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let content = std::fs::read_to_string(path)?;
            Self::from_json(&content)
        } else {
            let rows = parse_membership_file(path)?;
            Self::from_membership_rows(rows)
        }
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid, or the catalog or one of its
    /// named sets holds too many genomes.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut catalog = Self::new();
        for entry in data.genomes {
            catalog.add_genome(entry.id, entry.families)?;
        }
        catalog.products.extend(data.products);
        for (name, genomes) in data.genome_sets {
            catalog.add_genome_set(name, genomes)?;
        }

        Ok(catalog)
    }

    /// Build a catalog from membership table rows.
    ///
    /// The first non-empty product seen for a family wins.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TooManyGenomes` if the genome limit is exceeded.
    pub fn from_membership_rows(rows: Vec<MembershipRow>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for row in rows {
            if let Some(product) = row.product {
                catalog.products.entry(row.family.clone()).or_insert(product);
            }
            catalog.add_genome(row.genome, vec![row.family])?;
        }
        debug!(
            "Built catalog of {} genomes from membership table",
            catalog.genome_count()
        );
        Ok(catalog)
    }

    /// Add families to a genome, creating the genome if needed.
    ///
    /// Families are stored as given; repeats are removed by the engine.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TooManyGenomes` if adding a new genome exceeds the limit.
    pub fn add_genome(
        &mut self,
        id: GenomeId,
        families: impl IntoIterator<Item = FamilyId>,
    ) -> Result<(), CatalogError> {
        if let Some(&idx) = self.id_to_index.get(&id) {
            self.genomes[idx].families.extend(families);
            return Ok(());
        }

        if check_genome_limit(self.genomes.len()).is_some() {
            return Err(CatalogError::TooManyGenomes(self.genomes.len()));
        }

        self.id_to_index.insert(id.clone(), self.genomes.len());
        self.genomes.push(GenomeEntry {
            id,
            families: families.into_iter().collect(),
        });
        Ok(())
    }

    /// Set the product description of a family
    pub fn set_product(&mut self, family: FamilyId, product: impl Into<String>) {
        self.products.insert(family, product.into());
    }

    /// Register a named genome set
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TooManyGenomes` if the set lists more genomes than allowed.
    pub fn add_genome_set(
        &mut self,
        name: impl Into<String>,
        genomes: Vec<GenomeId>,
    ) -> Result<(), CatalogError> {
        // The last genome of the set must itself fit under the limit
        if check_genome_limit(genomes.len().saturating_sub(1)).is_some() {
            return Err(CatalogError::TooManyGenomes(genomes.len()));
        }
        self.genome_sets.insert(name.into(), genomes);
        Ok(())
    }

    /// Get a named genome set, duplicates collapsed
    #[must_use]
    pub fn genome_set(&self, name: &str) -> Option<GenomeSet> {
        self.genome_sets
            .get(name)
            .map(|ids| GenomeSet::new(name, ids.iter().cloned()))
    }

    /// Names and sizes of all named genome sets, sorted by name
    #[must_use]
    pub fn genome_sets(&self) -> Vec<(&str, usize)> {
        self.genome_sets
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.len()))
            .collect()
    }

    /// Get a genome's stored membership
    #[must_use]
    pub fn get(&self, id: &GenomeId) -> Option<&GenomeEntry> {
        self.id_to_index.get(id).map(|&idx| &self.genomes[idx])
    }

    /// Number of genomes in catalog
    #[must_use]
    pub fn genome_count(&self) -> usize {
        self.genomes.len()
    }

    /// Number of distinct families referenced by any genome
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.genomes
            .iter()
            .flat_map(|g| g.families.iter())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of families with a product description
    #[must_use]
    pub fn annotated_count(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            genomes: self.genomes.clone(),
            products: self
                .products
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            genome_sets: self.genome_sets.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

impl MembershipSource for FamilyCatalog {
    fn families_of(&self, genome: &GenomeId) -> Result<Vec<FamilyId>, SourceError> {
        let entry = self
            .get(genome)
            .ok_or_else(|| SourceError::NotFound(genome.clone()))?;

        if let Some(bad) = entry
            .families
            .iter()
            .find(|f| validate_identifier(f.as_str()).is_err())
        {
            return Err(SourceError::DataError {
                genome: genome.clone(),
                reason: format!("invalid family ID '{bad}'"),
            });
        }

        Ok(entry.families.clone())
    }
}

impl AnnotationSource for FamilyCatalog {
    fn product_of(&self, family: &FamilyId) -> Option<String> {
        self.products.get(family).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "version": "1.0.0",
        "created_at": "2026-01-01T00:00:00Z",
        "genomes": [
            {"id": "g1", "families": ["f1", "f2"]},
            {"id": "g2", "families": ["f1", "f1"]},
            {"id": "g3", "families": ["f2", ""]}
        ],
        "products": {"f1": "Chaperone protein DnaK"},
        "genome_sets": {"pathogens": ["g1", "g2", "g1"], "commensals": ["g3"]}
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = FamilyCatalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.genome_count(), 3);
        assert_eq!(catalog.family_count(), 3); // f1, f2 and the empty ID
        assert_eq!(catalog.annotated_count(), 1);
        assert_eq!(catalog.genome_sets(), vec![("commensals", 1), ("pathogens", 3)]);
    }

    #[test]
    fn test_families_of() {
        let catalog = FamilyCatalog::from_json(CATALOG_JSON).unwrap();

        let families = catalog.families_of(&GenomeId::new("g2")).unwrap();
        assert_eq!(families, vec![FamilyId::new("f1"), FamilyId::new("f1")]);

        assert_eq!(
            catalog.families_of(&GenomeId::new("nope")),
            Err(SourceError::NotFound(GenomeId::new("nope")))
        );
        assert!(matches!(
            catalog.families_of(&GenomeId::new("g3")),
            Err(SourceError::DataError { .. })
        ));
    }

    #[test]
    fn test_product_of() {
        let catalog = FamilyCatalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(
            catalog.product_of(&FamilyId::new("f1")).as_deref(),
            Some("Chaperone protein DnaK")
        );
        assert!(catalog.product_of(&FamilyId::new("f2")).is_none());
    }

    #[test]
    fn test_genome_set_collapses_duplicates() {
        let catalog = FamilyCatalog::from_json(CATALOG_JSON).unwrap();
        let set = catalog.genome_set("pathogens").unwrap();
        assert_eq!(set.name, "pathogens");
        assert_eq!(set.genomes, vec![GenomeId::new("g1"), GenomeId::new("g2")]);
        assert!(catalog.genome_set("unknown").is_none());
    }

    #[test]
    fn test_from_membership_rows() {
        let rows = vec![
            MembershipRow {
                genome: GenomeId::new("g1"),
                family: FamilyId::new("f1"),
                product: Some("first".to_string()),
            },
            MembershipRow {
                genome: GenomeId::new("g1"),
                family: FamilyId::new("f2"),
                product: None,
            },
            MembershipRow {
                genome: GenomeId::new("g2"),
                family: FamilyId::new("f1"),
                product: Some("second".to_string()),
            },
        ];
        let catalog = FamilyCatalog::from_membership_rows(rows).unwrap();
        assert_eq!(catalog.genome_count(), 2);
        assert_eq!(catalog.get(&GenomeId::new("g1")).unwrap().families.len(), 2);
        assert_eq!(catalog.product_of(&FamilyId::new("f1")).as_deref(), Some("first"));
    }

    #[test]
    fn test_to_json_round_trip_keeps_sets() {
        let mut catalog = FamilyCatalog::new();
        catalog
            .add_genome(GenomeId::new("g1"), vec![FamilyId::new("f1")])
            .unwrap();
        catalog.set_product(FamilyId::new("f1"), "Ribosomal protein L2");
        catalog.add_genome_set("in", vec![GenomeId::new("g1")]).unwrap();

        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"version\": \"1.0.0\""));
        assert!(json.contains("Ribosomal protein L2"));

        let reloaded = FamilyCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.genome_count(), 1);
        assert_eq!(reloaded.genome_sets(), vec![("in", 1)]);
    }

    #[test]
    fn test_add_genome_set_enforces_limit() {
        use crate::utils::validation::MAX_GENOMES;

        let mut catalog = FamilyCatalog::new();
        let oversized = vec![GenomeId::new("g"); MAX_GENOMES + 1];
        assert!(matches!(
            catalog.add_genome_set("huge", oversized),
            Err(CatalogError::TooManyGenomes(n)) if n == MAX_GENOMES + 1
        ));
        assert!(catalog.genome_sets().is_empty());
    }

    #[test]
    fn test_from_json_rejects_oversized_set() {
        use crate::utils::validation::MAX_GENOMES;

        let members = vec!["\"g1\""; MAX_GENOMES + 1].join(",");
        let json = format!(
            r#"{{"version": "1.0.0", "created_at": "", "genomes": [],
                "genome_sets": {{"huge": [{members}]}}}}"#
        );
        assert!(matches!(
            FamilyCatalog::from_json(&json),
            Err(CatalogError::TooManyGenomes(_))
        ));
    }

    #[test]
    fn test_load_membership_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.tsv");
        std::fs::write(&path, "genome_id\tfamily_id\tproduct\ng1\tf1\tDnaK\ng2\tf1\n").unwrap();

        let catalog = FamilyCatalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.genome_count(), 2);
        assert_eq!(catalog.product_of(&FamilyId::new("f1")).as_deref(), Some("DnaK"));
    }
}
