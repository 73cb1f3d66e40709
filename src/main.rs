use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use label_hierarchy::nlp::lemma::BaseForms;
use label_hierarchy::pipeline::TracingObserver;
use label_hierarchy::{HierarchyPipeline, HierarchySpec, LabelCorpus, NodeLinkGraph};

/// Induce a label hierarchy from a JSON-lines corpus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Corpus file, one JSON object with a `label` array per line
    corpus: PathBuf,

    /// Hierarchy spec (JSON)
    #[arg(long, env = "LABEL_HIERARCHY_CONFIG")]
    config: Option<PathBuf>,

    /// Write the node-link graph here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also export the sub-hierarchy below this label (repeatable)
    #[arg(long = "subgraph", value_name = "LABEL")]
    subgraphs: Vec<String>,

    /// Directory for sub-hierarchy files
    #[arg(long, default_value = ".")]
    subgraph_dir: PathBuf,

    /// Print the real-label roots, one per line, to stderr
    #[arg(long)]
    roots: bool,

    /// Keep the raw containment graph
    #[arg(long)]
    no_prune: bool,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn subgraph_file_name(label: &str) -> String {
    let slug: Vec<String> = label
        .split_whitespace()
        .map(|w| {
            w.chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect()
        })
        .collect();
    format!("subgraph-{}.json", slug.join("_"))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let spec = match &cli.config {
        Some(path) => HierarchySpec::from_path(path)
            .with_context(|| format!("loading spec {}", path.display()))?,
        None => HierarchySpec::default(),
    };
    let pipeline = HierarchyPipeline::from_spec(&spec)
        .context("building pipeline")?
        .with_pruning(!cli.no_prune);

    let corpus = LabelCorpus::from_path(&cli.corpus)
        .with_context(|| format!("loading corpus {}", cli.corpus.display()))?;
    info!(documents = corpus.len(), "corpus loaded");

    let result = pipeline
        .run_with_observer(corpus.label_sets(), &mut TracingObserver)
        .context("building hierarchy")?;
    if let Some(stats) = &result.prune_stats {
        info!(
            rounds = stats.rounds,
            transitive_edges_removed = stats.transitive_edges_removed,
            synthetic_nodes_removed = stats.synthetic_nodes_removed,
            "pruning finished"
        );
    }

    let doc = NodeLinkGraph::from(result.graph());
    match &cli.output {
        Some(path) => {
            doc.write_to_path(path, !cli.compact)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "graph written");
        }
        None => doc
            .write_json(io::stdout().lock(), !cli.compact)
            .context("writing graph to stdout")?,
    }

    if !cli.subgraphs.is_empty() {
        let base_forms = BaseForms::from_labels(corpus.distinct_labels());
        for label in &cli.subgraphs {
            let root = base_forms.lemmatize(label);
            let sub = result
                .subgraph(std::slice::from_ref(&root))
                .with_context(|| format!("extracting sub-hierarchy for {label:?}"))?;
            let path = cli.subgraph_dir.join(subgraph_file_name(label));
            NodeLinkGraph::from(&sub)
                .write_to_path(&path, !cli.compact)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(label = %label, nodes = sub.node_count(), path = %path.display(), "sub-hierarchy written");
        }
    }

    if cli.roots {
        for root in result.graph().real_roots() {
            eprintln!("{}", root.text());
        }
    }

    Ok(())
}
