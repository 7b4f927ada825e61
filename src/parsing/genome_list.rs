use std::io::BufRead;
use std::path::Path;

use crate::core::types::GenomeId;
use crate::parsing::input::open_text;
use crate::parsing::membership::ParseError;
use crate::utils::validation::{check_genome_limit, validate_identifier};

/// Parse a genome list file: one genome ID per line
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_genome_list_file(path: &Path) -> Result<Vec<GenomeId>, ParseError> {
    parse_genome_list_reader(open_text(path)?)
}

/// Parse genome IDs from any reader.
///
/// Only the first whitespace-separated field of each line is used, so the
/// first column of a wider table also works. Blank lines, `#` comments and a
/// `genome_id` header line are skipped. Order is preserved and duplicates
/// are kept; [`GenomeSet::new`](crate::core::genome_set::GenomeSet::new)
/// collapses them.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for an invalid identifier or
/// `ParseError::TooManyGenomes` if the limit is exceeded.
pub fn parse_genome_list_reader<R: BufRead>(reader: R) -> Result<Vec<GenomeId>, ParseError> {
    let mut genomes = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(id) = line.split_whitespace().next() else {
            continue;
        };
        if id.starts_with('#') {
            continue;
        }
        if genomes.is_empty() && matches!(id.to_lowercase().as_str(), "genome_id" | "genome.genome_id") {
            continue;
        }

        validate_identifier(id)
            .map_err(|e| ParseError::InvalidFormat(format!("Line {}: {e}", i + 1)))?;

        if check_genome_limit(genomes.len()).is_some() {
            return Err(ParseError::TooManyGenomes(genomes.len()));
        }

        genomes.push(GenomeId::new(id));
    }

    Ok(genomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genome_list() {
        let text = "genome_id\n# in-set\n83333.1\n\n562.99\textra column\n83333.1\n";
        let genomes = parse_genome_list_reader(text.as_bytes()).unwrap();
        assert_eq!(
            genomes,
            vec![
                GenomeId::new("83333.1"),
                GenomeId::new("562.99"),
                GenomeId::new("83333.1"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let genomes = parse_genome_list_reader("# nothing here\n".as_bytes()).unwrap();
        assert!(genomes.is_empty());
    }

    #[test]
    fn test_parse_genome_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.txt");
        std::fs::write(&path, "g1\ng2\n").unwrap();
        let genomes = parse_genome_list_file(&path).unwrap();
        assert_eq!(genomes.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_genome_list_file(Path::new("/nonexistent/genomes.txt")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
