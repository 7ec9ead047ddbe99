use std::fs;
use std::path::Path;

use crate::domain::Accession;
use crate::error::FetchError;

/// Parsing strategies tried in order over the same non-comment lines.
/// The first strategy to succeed wins; the run is fatal only when every
/// strategy errors out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStrategy {
    /// Strict TSV: optional header row, uniform field count across rows,
    /// out-of-range column degrades to column 0 with a warning.
    Tabular,
    /// Lenient per-line split: take the requested column where it exists,
    /// skip short lines and empty cells.
    Manual,
}

/// Reads `path` and produces the ordered accession list for the run.
pub fn resolve_accessions(path: &Path, column: usize) -> Result<Vec<Accession>, FetchError> {
    let raw = fs::read_to_string(path).map_err(|_| FetchError::InputRead(path.to_path_buf()))?;
    resolve_from_str(&raw, column)
}

pub fn resolve_from_str(raw: &str, column: usize) -> Result<Vec<Accession>, FetchError> {
    let lines: Vec<&str> = raw
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .collect();

    let mut failures = Vec::new();
    for strategy in [ParseStrategy::Tabular, ParseStrategy::Manual] {
        match apply_strategy(strategy, &lines, column) {
            Ok(accessions) => return Ok(accessions),
            Err(message) => {
                tracing::warn!("{strategy:?} parse failed: {message}");
                failures.push(format!("{strategy:?}: {message}"));
            }
        }
    }
    Err(FetchError::InputParse(failures.join("; ")))
}

fn apply_strategy(
    strategy: ParseStrategy,
    lines: &[&str],
    column: usize,
) -> Result<Vec<Accession>, String> {
    match strategy {
        ParseStrategy::Tabular => parse_tabular(lines, column),
        ParseStrategy::Manual => Ok(parse_manual(lines, column)),
    }
}

fn parse_tabular(lines: &[&str], column: usize) -> Result<Vec<Accession>, String> {
    let Some(first) = lines.first() else {
        return Ok(Vec::new());
    };

    let header_fields: Vec<&str> = first.split('\t').collect();
    let has_header = looks_like_header(&header_fields);
    let data = if has_header { &lines[1..] } else { lines };
    let width = header_fields.len();

    let mut rows = Vec::with_capacity(data.len());
    for (index, line) in data.iter().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != width {
            return Err(format!(
                "row {} has {} fields, expected {}",
                index + 1,
                fields.len(),
                width
            ));
        }
        rows.push(fields);
    }

    let selected = if column < width {
        column
    } else {
        tracing::warn!("column index {column} is out of range; using first column instead");
        0
    };

    Ok(rows
        .iter()
        .filter_map(|fields| fields[selected].parse::<Accession>().ok())
        .collect())
}

/// Header rows are word-like labels (`assembly_accession`, `organism_name`);
/// accession data always carries digits. A first line qualifies as a header
/// only when it is multi-column and every cell is digit-free. A header with
/// a digit in a label (`accession_2024`) is therefore kept as data: its
/// first cell becomes one wasted download attempt, recovered like any other
/// per-accession failure.
fn looks_like_header(fields: &[&str]) -> bool {
    fields.len() > 1
        && fields
            .iter()
            .all(|field| !field.chars().any(|ch| ch.is_ascii_digit()))
}

fn parse_manual(lines: &[&str], column: usize) -> Vec<Accession> {
    lines
        .iter()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            fields.get(column)?.parse::<Accession>().ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn names(accessions: &[Accession]) -> Vec<&str> {
        accessions.iter().map(|acc| acc.as_str()).collect()
    }

    #[test]
    fn resolves_data_rows_without_header() {
        let raw = "#comment\nGCF_000001.1\tOrganismA\nGCF_000002.1\tOrganismB\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1", "GCF_000002.1"]);
    }

    #[test]
    fn skips_header_row() {
        let raw = "assembly_accession\torganism_name\nGCF_000001.1\tOrganismA\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1"]);
    }

    #[test]
    fn selects_requested_column() {
        let raw = "OrganismA\tGCF_000001.1\nOrganismB\tGCF_000002.1\n";
        let accessions = resolve_from_str(raw, 1).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1", "GCF_000002.1"]);
    }

    #[test]
    fn out_of_range_column_falls_back_to_first() {
        let raw = "GCF_000001.1\tOrganismA\nGCF_000002.1\tOrganismB\n";
        let accessions = resolve_from_str(raw, 7).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1", "GCF_000002.1"]);
    }

    #[test]
    fn comment_only_input_yields_empty_list() {
        let raw = "# a comment\n# another\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert!(accessions.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let accessions = resolve_from_str("", 0).unwrap();
        assert!(accessions.is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let raw = "GCF_000001.1\tOrganismA\n\nGCF_000002.1\tOrganismB\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1", "GCF_000002.1"]);
    }

    #[test]
    fn drops_blank_and_missing_cells() {
        let raw = "GCF_000001.1\tOrganismA\n\tOrganismB\nNA\tOrganismC\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1"]);
    }

    #[test]
    fn ragged_rows_fall_back_to_manual_split() {
        // Tabular parsing rejects the inconsistent widths; the manual
        // strategy still pulls column 0 from every usable line.
        let raw = "GCF_000001.1\tOrganismA\nGCF_000002.1\nGCF_000003.1\tX\tY\n";
        let accessions = resolve_from_str(raw, 0).unwrap();
        assert_eq!(
            names(&accessions),
            vec!["GCF_000001.1", "GCF_000002.1", "GCF_000003.1"]
        );
    }

    #[test]
    fn manual_fallback_skips_short_lines_for_later_columns() {
        let raw = "OrganismA\tGCF_000001.1\nlonely\nOrganismB\tGCF_000002.1\n";
        let accessions = resolve_from_str(raw, 1).unwrap();
        assert_eq!(names(&accessions), vec!["GCF_000001.1", "GCF_000002.1"]);
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let err = resolve_accessions(Path::new("/nonexistent/input.tsv"), 0).unwrap_err();
        assert_matches!(err, FetchError::InputRead(_));
    }
}
