use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use graphwalk::{
    graph::{Graph, Orientation, VertexIndex},
    logging,
    parser::{self, BatchMode, ReadOptions},
};
use itertools::Itertools;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Bfs,
    Dfs,
    TopoDfs,
    TopoKahn,
    All,
}

#[derive(Parser, Debug)]
#[command(
    name = "graphwalk",
    about = "Read 1-based edge pairs from stdin and print BFS, DFS and topological orders (0-based)."
)]
struct Cli {
    /// Number of vertices.
    #[arg(short = 'n', long, value_name = "N", env = "GRAPHWALK_VERTICES", default_value_t = 10)]
    vertices: usize,
    /// Number of edge pairs per batch.
    #[arg(short = 'e', long, value_name = "E", env = "GRAPHWALK_EDGES", default_value_t = 5)]
    edges: usize,
    /// Read the vertex and edge counts from the first two input tokens.
    #[arg(long, action = ArgAction::SetTrue)]
    header: bool,
    /// Treat each pair as a directed edge source -> sink.
    #[arg(long, action = ArgAction::SetTrue)]
    directed: bool,
    /// Read one batch for the adjacency matrix, then a second one for the list.
    #[arg(long, action = ArgAction::SetTrue)]
    dual_batch: bool,
    /// 1-based vertex the BFS starts from.
    #[arg(long, value_name = "VERTEX", default_value_t = 1)]
    source: usize,
    /// Algorithms to run, in order (defaults to all).
    #[arg(short, long = "algorithm", value_enum, action = ArgAction::Append)]
    algorithms: Vec<Algorithm>,
    /// Fail instead of printing a partial or invalid topological order.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn read_options(&self) -> ReadOptions {
        ReadOptions {
            vertex_count: self.vertices,
            edge_count: self.edges,
            orientation: Orientation::from(self.directed),
            batch_mode: if self.dual_batch {
                BatchMode::Dual
            } else {
                BatchMode::Single
            },
            header: self.header,
        }
    }

    fn algorithms(&self) -> Vec<Algorithm> {
        if self.algorithms.is_empty() || self.algorithms.contains(&Algorithm::All) {
            vec![
                Algorithm::Bfs,
                Algorithm::Dfs,
                Algorithm::TopoDfs,
                Algorithm::TopoKahn,
            ]
        } else {
            self.algorithms.clone()
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    let options = cli.read_options();
    let graph = parser::read_graph(io::stdin().lock(), &options)
        .context("failed to read graph from stdin")?;
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_algorithms(&cli, &graph, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Prints one line per selected algorithm.
fn run_algorithms(cli: &Cli, graph: &Graph, out: &mut impl Write) -> Result<()> {
    for algorithm in cli.algorithms() {
        match algorithm {
            Algorithm::Bfs => {
                let order = if graph.is_empty() {
                    Vec::new()
                } else {
                    graph.bfs_sweep_from(bfs_source(graph, cli.source)?)
                };
                print_order(out, "bfs", &order)?;
            }
            Algorithm::Dfs => {
                write!(out, "dfs: ")?;
                graph.dfs_print(out)?;
                writeln!(out)?;
            }
            Algorithm::TopoDfs => {
                let order = if cli.strict {
                    graph
                        .topo_sort_dfs_checked()
                        .context("DFS topological sort failed")?
                } else {
                    graph.topo_sort_dfs()
                };
                print_order(out, "topo-dfs", &order)?;
            }
            Algorithm::TopoKahn => {
                let order = if cli.strict {
                    graph
                        .topo_sort_kahn_checked()
                        .context("Kahn topological sort failed")?
                } else {
                    graph.topo_sort_kahn()
                };
                print_order(out, "topo-kahn", &order)?;
            }
            Algorithm::All => unreachable!("expanded by Cli::algorithms"),
        }
    }
    Ok(())
}

fn bfs_source(graph: &Graph, source: usize) -> Result<VertexIndex> {
    if !(1..=graph.vertex_count()).contains(&source) {
        bail!(
            "BFS source {source} is outside 1..={}",
            graph.vertex_count()
        );
    }
    Ok(VertexIndex(source - 1))
}

fn print_order(out: &mut impl Write, name: &str, order: &[VertexIndex]) -> io::Result<()> {
    writeln!(out, "{name}: {}", order.iter().join(" "))
}
