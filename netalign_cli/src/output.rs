//! Writing an alignment report next to the names it refers to.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use netalign_core::{AlignmentReport, AnnealStep, Metrics};
use serde::Serialize;
use tracing::info;

use crate::loader::Network;

pub const PAIRS_FILE: &str = "alignment.tsv";
pub const EDGES_FILE: &str = "conserved_edges.tsv";
pub const ROUNDS_FILE: &str = "rounds.csv";
pub const REPORT_FILE: &str = "report.json";

#[derive(Serialize)]
struct Summary<'r> {
    metrics: &'r Metrics,
    seeds: Vec<(&'r str, &'r str, f64)>,
    anneal: Option<&'r [AnnealStep]>,
}

/// Writes every output file into `dir`, creating it if needed.
pub fn write_report(
    dir: &Path,
    report: &AlignmentReport,
    net1: &Network,
    net2: &Network,
) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let mut pairs = tsv_writer(&dir.join(PAIRS_FILE))?;
    for p in &report.pairs {
        pairs.serialize((net1.name(p.node1.as_usize()), net2.name(p.node2.as_usize()), p.score))?;
    }
    pairs.flush()?;

    let mut edges = tsv_writer(&dir.join(EDGES_FILE))?;
    for e in &report.pair_edges {
        edges.serialize((
            net1.name(e.first.0.as_usize()),
            net1.name(e.second.0.as_usize()),
            net2.name(e.first.1.as_usize()),
            net2.name(e.second.1.as_usize()),
        ))?;
    }
    edges.flush()?;

    let mut rounds = csv::Writer::from_path(dir.join(ROUNDS_FILE))?;
    for round in &report.rounds {
        rounds.serialize(round)?;
    }
    rounds.flush()?;

    let summary = Summary {
        metrics: &report.metrics,
        seeds: report
            .seeds
            .iter()
            .map(|p| (net1.name(p.node1.as_usize()), net2.name(p.node2.as_usize()), p.score))
            .collect(),
        anneal: report.anneal.as_deref(),
    };
    let file = BufWriter::new(File::create(dir.join(REPORT_FILE))?);
    serde_json::to_writer_pretty(file, &summary)?;

    info!("wrote {} pairs to {}", report.pairs.len(), dir.display());
    Ok(())
}

fn tsv_writer(path: &Path) -> io::Result<csv::Writer<File>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_network;
    use netalign_common::{Config, SimilarityMatrix};
    use netalign_core::Aligner;

    #[test]
    fn test_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let edges = dir.path().join("g.tab");
        fs::write(&edges, "a\tb\nb\tc\n").unwrap();
        let net = load_network(&edges).unwrap();
        let sim = SimilarityMatrix::from_entries(3, 3, (0..3).map(|i| (i, i, 1.0))).unwrap();
        let config = Config::builder().rng_seed(Some(1)).build();
        let report = Aligner::new(&config, &net.graph, &net.graph, &sim, None)
            .unwrap()
            .run()
            .unwrap();

        let out = dir.path().join("out");
        write_report(&out, &report, &net, &net).unwrap();

        let pairs = fs::read_to_string(out.join(PAIRS_FILE)).unwrap();
        let mut lines: Vec<&str> = pairs.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["a\ta\t1.0", "b\tb\t1.0", "c\tc\t1.0"]);
        assert_eq!(fs::read_to_string(out.join(EDGES_FILE)).unwrap().lines().count(), 2);

        let rounds = fs::read_to_string(out.join(ROUNDS_FILE)).unwrap();
        assert!(rounds.starts_with("round,selected1,selected2,matched,kept"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(REPORT_FILE)).unwrap()).unwrap();
        assert_eq!(json["metrics"]["conserved_edges"], 2);
        assert!(json["anneal"].is_null());
    }
}
