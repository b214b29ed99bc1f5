//! Reading networks and similarity tables from whitespace-separated files.
//!
//! Node names are mapped to dense indices in order of first appearance in
//! the edge list. Lines starting with `#` are ignored.

use std::fs::File;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use netalign_common::{AlignError, Graph, SimilarityMatrix};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    Malformed {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("{path}:{line}: node {name:?} does not appear in the network")]
    UnknownNode {
        path: PathBuf,
        line: u64,
        name: String,
    },
    #[error("{path}:{line}: invalid score {value:?}")]
    InvalidScore {
        path: PathBuf,
        line: u64,
        value: String,
    },
    #[error(transparent)]
    Align(#[from] AlignError),
}

/// A graph together with its node names, indexed like the graph's nodes.
#[derive(Debug)]
pub struct Network {
    pub graph: Graph,
    pub names: IndexSet<String>,
}

impl Network {
    /// Name of node `index`; every index below the node count has one.
    pub fn name(&self, index: usize) -> &str {
        self.names.get_index(index).map_or("", String::as_str)
    }
}

fn reader(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(file))
}

/// Splits a record into non-empty fields, so runs of tabs act as one separator.
fn fields(record: &csv::StringRecord) -> Vec<&str> {
    record
        .iter()
        .flat_map(str::split_whitespace)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Loads an undirected network from an edge list.
pub fn load_network(path: &Path) -> Result<Network, LoadError> {
    let mut names: IndexSet<String> = IndexSet::new();
    let mut edges = Vec::new();
    for record in reader(path)?.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let fields = fields(&record);
        if fields.is_empty() {
            continue;
        }
        let [a, b] = fields[..] else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line,
                expected: 2,
                found: fields.len(),
            });
        };
        let (ia, _) = names.insert_full(a.to_owned());
        let (ib, _) = names.insert_full(b.to_owned());
        edges.push((ia, ib));
    }
    let graph = Graph::from_edges(names.len(), edges)?;
    info!(
        "loaded {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(Network { graph, names })
}

/// Loads sparse similarity triples between two networks' nodes.
///
/// Pairs absent from the file score zero. Triples naming nodes outside the
/// networks are an error.
pub fn load_similarity(
    path: &Path,
    net1: &Network,
    net2: &Network,
) -> Result<SimilarityMatrix, LoadError> {
    let mut entries = Vec::new();
    for record in reader(path)?.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let fields = fields(&record);
        if fields.is_empty() {
            continue;
        }
        let [a, b, score] = fields[..] else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line,
                expected: 3,
                found: fields.len(),
            });
        };
        let lookup = |net: &Network, name: &str| {
            net.names.get_index_of(name).ok_or_else(|| LoadError::UnknownNode {
                path: path.to_path_buf(),
                line,
                name: name.to_owned(),
            })
        };
        let value: f64 = score.parse().map_err(|_| LoadError::InvalidScore {
            path: path.to_path_buf(),
            line,
            value: score.to_owned(),
        })?;
        entries.push((lookup(net1, a)?, lookup(net2, b)?, value));
    }
    if entries.is_empty() {
        warn!("{} holds no similarity entries", path.display());
    }
    let sim = SimilarityMatrix::from_entries(
        net1.graph.node_count(),
        net2.graph.node_count(),
        entries,
    )?;
    info!("loaded similarity from {}", path.display());
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_network_and_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let g1 = write(&dir, "g1.tab", "# yeast\nA\tB\nB\tC\nC\tA\n");
        let g2 = write(&dir, "g2.tab", "x y\ny z\n");
        let sim = write(&dir, "sim.tab", "A\tx\t2.5\nC\tz\t1\n");

        let net1 = load_network(&g1).unwrap();
        let net2 = load_network(&g2).unwrap();
        assert_eq!(net1.graph.node_count(), 3);
        assert_eq!(net1.graph.edge_count(), 3);
        assert_eq!(net2.graph.edge_count(), 2);
        assert_eq!(net1.name(2), "C");

        let table = load_similarity(&sim, &net1, &net2).unwrap();
        assert_eq!(table.values()[0], 2.5);
        assert_eq!(table.values()[2 * 3 + 2], 1.0);
        assert_eq!(table.values().iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_errors_name_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let g = write(&dir, "g.tab", "A\tB\nC\n");
        let err = load_network(&g).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line: 2, found: 1, .. }), "{err}");

        let ok = write(&dir, "ok.tab", "A\tB\n");
        let net = load_network(&ok).unwrap();
        let sim = write(&dir, "sim.tab", "A\tB\t1\nA\tQ\t1\n");
        let err = load_similarity(&sim, &net, &net).unwrap_err();
        assert!(matches!(err, LoadError::UnknownNode { line: 2, .. }), "{err}");

        let bad = write(&dir, "bad.tab", "A\tB\tlots\n");
        let err = load_similarity(&bad, &net, &net).unwrap_err();
        assert!(matches!(err, LoadError::InvalidScore { .. }), "{err}");
    }
}
