use std::io::BufRead;
use std::path::Path;

use thiserror::Error;

use crate::core::types::{FamilyId, GenomeId};
use crate::parsing::input::open_text;
use crate::utils::validation::validate_identifier;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Too many genomes: {0} exceeds maximum allowed (1000000)")]
    TooManyGenomes(usize),
}

/// One row of a membership table: a family observed in a genome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRow {
    pub genome: GenomeId,
    pub family: FamilyId,
    pub product: Option<String>,
}

/// Parse a membership table file, gzipped or plain
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if a line is malformed.
pub fn parse_membership_file(path: &Path) -> Result<Vec<MembershipRow>, ParseError> {
    parse_membership_reader(open_text(path)?)
}

/// Parse membership text with columns: genome_id, family_id, [product]
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields or
/// contain invalid identifiers.
pub fn parse_membership_text(text: &str) -> Result<Vec<MembershipRow>, ParseError> {
    parse_membership_reader(text.as_bytes())
}

/// Parse a tab-separated membership table from any reader.
///
/// Blank lines and `#` comments are skipped. The first data line is treated
/// as a header when its first field names the genome column.
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure or `ParseError::InvalidFormat`
/// on a malformed line.
pub fn parse_membership_reader<R: BufRead>(reader: R) -> Result<Vec<MembershipRow>, ParseError> {
    let mut rows = Vec::new();
    let mut first_data_line = true;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            if is_header(fields[0]) {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 2 fields"
            )));
        }

        for id in &fields[..2] {
            validate_identifier(id).map_err(|e| {
                ParseError::InvalidFormat(format!("Line {line_num}: {e}"))
            })?;
        }

        let product = fields
            .get(2)
            .filter(|p| !p.is_empty())
            .map(|p| (*p).to_string());

        rows.push(MembershipRow {
            genome: GenomeId::new(fields[0]),
            family: FamilyId::new(fields[1]),
            product,
        });
    }

    Ok(rows)
}

fn is_header(first_field: &str) -> bool {
    matches!(
        first_field.to_lowercase().as_str(),
        "genome" | "genome_id" | "genome.genome_id"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_membership_text() {
        let tsv = "genome_id\tfamily_id\tproduct
83333.1\tPGF_00000001\tChaperone protein DnaK
83333.1\tPGF_00000002
562.99\tPGF_00000001\t
";
        let rows = parse_membership_text(tsv).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].genome, GenomeId::new("83333.1"));
        assert_eq!(rows[0].family, FamilyId::new("PGF_00000001"));
        assert_eq!(rows[0].product.as_deref(), Some("Chaperone protein DnaK"));
        assert!(rows[1].product.is_none());
        assert!(rows[2].product.is_none());
    }

    #[test]
    fn test_parse_without_header_and_with_comments() {
        let tsv = "# exported families\n\ng1\tf1\ng2\tf1\tproduct text\n";
        let rows = parse_membership_text(tsv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].product.as_deref(), Some("product text"));
    }

    #[test]
    fn test_too_few_fields_reports_line() {
        let err = parse_membership_text("g1\tf1\ng2\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{err}");
    }

    #[test]
    fn test_empty_family_rejected() {
        let err = parse_membership_text("g1\t\tsome product\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }
}
