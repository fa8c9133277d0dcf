//! Tab-separated similarity edge lists

use crate::error::{CoConservationError, Result};
use crate::ids::{NodeKind, ProteinId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A two-column edge list as produced by the upstream clustering step
#[derive(Debug, Clone)]
pub struct EdgeList {
    /// File the edges were read from
    pub path: PathBuf,

    /// Node kind carried by both columns
    pub kind: NodeKind,

    /// Edge pairs in file order
    pub pairs: Vec<(String, String)>,
}

impl EdgeList {
    /// Build an edge list from in-memory pairs (ids are not validated)
    pub fn from_pairs<I, A, B>(kind: NodeKind, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            path: PathBuf::from("<memory>"),
            kind,
            pairs: pairs.into_iter().map(|(a, b)| (a.into(), b.into())).collect(),
        }
    }

    /// Distinct ids of the first column, the upstream cluster anchors
    pub fn central_ids(&self) -> HashSet<&str> {
        self.pairs.iter().map(|(central, _)| central.as_str()).collect()
    }

    /// Distinct ids appearing in either column
    pub fn distinct_ids(&self) -> HashSet<&str> {
        self.pairs
            .iter()
            .flat_map(|(a, b)| [a.as_str(), b.as_str()])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Load an edge list, failing the whole batch on the first malformed row
pub fn load_edge_list(path: impl AsRef<Path>, kind: NodeKind) -> Result<EdgeList> {
    let path = path.as_ref();
    log::info!("Reading {} edge list: {}", kind, path.display());

    if !path.exists() {
        return Err(CoConservationError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_path(path)?;

    let mut pairs = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut line: u64 = 0;

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                return Err(input_error(path, line + 1, format!("unreadable row: {}", err)));
            }
        }
        line = record.position().map_or(line + 1, |pos| pos.line());

        if record.len() != 2 {
            return Err(input_error(
                path,
                line,
                format!("expected 2 tab-separated columns, found {}", record.len()),
            ));
        }

        let src = record[0].trim();
        let dst = record[1].trim();
        if src.is_empty() || dst.is_empty() {
            return Err(input_error(path, line, "empty node id".to_string()));
        }

        if kind == NodeKind::Protein {
            for id in [src, dst] {
                ProteinId::parse(id).map_err(|err| input_error(path, line, err.to_string()))?;
            }
        }

        pairs.push((src.to_string(), dst.to_string()));
    }

    log::info!("Found {} edges in {}", pairs.len(), path.display());

    Ok(EdgeList {
        path: path.to_path_buf(),
        kind,
        pairs,
    })
}

fn input_error(path: &Path, line: u64, reason: String) -> CoConservationError {
    CoConservationError::InputFormat {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tsv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_two_column_rows() {
        let file = write_tsv("A1_#0\tA1_#1\nA2_#0\tA3_#0\n");
        let edges = load_edge_list(file.path(), NodeKind::Protein).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.pairs[1], ("A2_#0".to_string(), "A3_#0".to_string()));

        let central = edges.central_ids();
        assert_eq!(central.len(), 2);
        assert!(central.contains("A1_#0") && central.contains("A2_#0"));
        assert_eq!(edges.distinct_ids().len(), 4);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let file = write_tsv("A1\tA2\nA3\tA4\tA5\n");
        match load_edge_list(file.path(), NodeKind::Array) {
            Err(CoConservationError::InputFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected input format error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_ids() {
        let file = write_tsv("A1\t \n");
        assert!(matches!(
            load_edge_list(file.path(), NodeKind::Array),
            Err(CoConservationError::InputFormat { .. })
        ));
    }

    #[test]
    fn rejects_protein_ids_without_ordinal() {
        let file = write_tsv("A1_#0\tA1\n");
        assert!(matches!(
            load_edge_list(file.path(), NodeKind::Protein),
            Err(CoConservationError::InputFormat { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_edge_list("/nonexistent/edges.tsv", NodeKind::Array),
            Err(CoConservationError::Io { .. })
        ));
    }
}
