//! netalign CLI
//!
//! Loads two interaction networks and a similarity table, aligns them and
//! writes the mapping, its conserved edges and a quality report.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod loader;
mod output;

use clap::Parser;
use netalign_core::Aligner;
use tracing::info;

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();

    let net1 = loader::load_network(&args.graph1)?;
    let net2 = loader::load_network(&args.graph2)?;
    let similarity = loader::load_similarity(&args.similarity, &net1, &net2)?;
    let seed_similarity = args
        .seed_similarity
        .as_deref()
        .map(|path| loader::load_similarity(path, &net1, &net2))
        .transpose()?;

    let aligner = Aligner::new(
        &config,
        &net1.graph,
        &net2.graph,
        &similarity,
        seed_similarity.as_ref(),
    )?;
    let report = aligner.run()?;
    output::write_report(&args.output, &report, &net1, &net2)?;

    info!("writing summary to stdout");
    println!("{}", serde_json::to_string_pretty(&report.metrics)?);
    Ok(())
}
