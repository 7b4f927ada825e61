use std::path::Path;

use tracing::debug;

use crate::catalog::store::FamilyCatalog;
use crate::core::genome_set::GenomeSet;
use crate::parsing::genome_list::parse_genome_list_file;
use crate::signature::engine::SignatureError;

/// Resolve a genome-set identifier to an ordered list of genomes.
///
/// A named set in the catalog takes precedence; otherwise the identifier is
/// read as a genome list file, and the set is named after the file stem.
///
/// # Errors
///
/// Returns `SignatureError::Configuration` if the identifier is empty, names
/// no catalog set and no readable file, or the file is malformed.
pub fn resolve_genome_set(spec: &str, catalog: &FamilyCatalog) -> Result<GenomeSet, SignatureError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(SignatureError::Configuration(
            "genome set name must not be empty".to_string(),
        ));
    }

    if let Some(set) = catalog.genome_set(spec) {
        debug!("Resolved genome set '{spec}' from catalog ({} genomes)", set.len());
        return Ok(set);
    }

    let path = Path::new(spec);
    if !path.is_file() {
        return Err(SignatureError::Configuration(format!(
            "genome set '{spec}' is neither a catalog set nor a readable file"
        )));
    }

    let genomes = parse_genome_list_file(path).map_err(|e| {
        SignatureError::Configuration(format!("failed to read genome set {spec}: {e}"))
    })?;

    let name = path
        .file_stem()
        .map_or_else(|| spec.to_string(), |s| s.to_string_lossy().into_owned());
    debug!("Read genome set '{name}' from {spec} ({} genomes)", genomes.len());

    Ok(GenomeSet::new(name, genomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GenomeId;

    fn catalog() -> FamilyCatalog {
        let mut catalog = FamilyCatalog::new();
        catalog
            .add_genome_set("pathogens", vec![GenomeId::new("g1"), GenomeId::new("g2")])
            .unwrap();
        catalog
    }

    #[test]
    fn test_resolve_named_set() {
        let set = resolve_genome_set("pathogens", &catalog()).unwrap();
        assert_eq!(set.name, "pathogens");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outgroup.txt");
        std::fs::write(&path, "g7\ng8\ng7\n").unwrap();

        let set = resolve_genome_set(path.to_str().unwrap(), &catalog()).unwrap();
        assert_eq!(set.name, "outgroup");
        assert_eq!(set.genomes, vec![GenomeId::new("g7"), GenomeId::new("g8")]);
    }

    #[test]
    fn test_resolve_missing_is_configuration_error() {
        let err = resolve_genome_set("no_such_set", &catalog()).unwrap_err();
        assert!(matches!(err, SignatureError::Configuration(_)));

        let err = resolve_genome_set("  ", &catalog()).unwrap_err();
        assert!(matches!(err, SignatureError::Configuration(_)));
    }
}
