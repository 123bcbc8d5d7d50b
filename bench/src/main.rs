use std::collections::HashSet;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use graph_centrality_core::{
    all_shortest_paths, all_simple_paths, shortest_path, top_k_betweenness_centrality,
    top_k_ranked, Graph, RankedVertex, VertexId,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Betweenness centrality demo and synthetic-topology benchmark
#[derive(Parser)]
#[command(name = "graph-centrality-bench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Graph to run: the fixed demo graph or a synthetic topology
    #[arg(value_enum, default_value_t = Mode::Demo)]
    mode: Mode,

    /// Vertex count for synthetic topologies (path enumeration is exponential; keep it small)
    #[arg(short, long, default_value_t = 12)]
    nodes: u32,

    /// Number of top betweenness scores to report
    #[arg(short = 'k', long, default_value_t = 5)]
    top: usize,

    /// Emit results as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Fixed 6-vertex, 8-edge graph
    Demo,
    /// Path graph 0-1-...-(n-1)
    Chain,
    /// Hub 0 with n-1 leaves
    Star,
    /// Ring of n vertices
    Cycle,
    /// Two rails joined by rungs (many equal-length geodesics)
    Ladder,
    /// Two cliques joined by a short bridge
    Barbell,
    /// Erdos-Renyi random edges
    Random,
    /// Every synthetic topology in turn
    All,
}

#[derive(Serialize)]
struct Report {
    name: &'static str,
    vertices: usize,
    edges: usize,
    memory_bytes: usize,
    build_ms: f64,
    probe: Option<PathProbe>,
    top_k: Vec<f64>,
    ranked: Vec<RankedVertex>,
    centrality_ms: f64,
}

/// Path statistics between the first and last vertex.
#[derive(Serialize)]
struct PathProbe {
    from: VertexId,
    to: VertexId,
    shortest: Option<Vec<VertexId>>,
    simple_paths: usize,
    geodesics: usize,
    elapsed_ms: f64,
}

type Generator = fn(VertexId) -> Result<Graph>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let runs: Vec<(&'static str, Generator)> = match cli.mode {
        Mode::Demo => vec![("Demo (6 vertices, 8 edges)", gen_demo as Generator)],
        Mode::Chain => vec![("Chain", gen_chain as Generator)],
        Mode::Star => vec![("Star", gen_star as Generator)],
        Mode::Cycle => vec![("Cycle", gen_cycle as Generator)],
        Mode::Ladder => vec![("Ladder", gen_ladder as Generator)],
        Mode::Barbell => vec![("Barbell (clique-bridge-clique)", gen_barbell as Generator)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random as Generator)],
        Mode::All => vec![
            ("Chain", gen_chain as Generator),
            ("Star", gen_star),
            ("Cycle", gen_cycle),
            ("Ladder", gen_ladder),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("Erdos-Renyi random", gen_random),
        ],
    };

    if cli.mode == Mode::Demo && !cli.json {
        // Plain top-k listing, nothing else
        let graph = gen_demo(0)?;
        let scores = top_k_betweenness_centrality(&graph, cli.top)?;
        println!("{:?}", scores);
        return Ok(());
    }

    let mut reports = Vec::with_capacity(runs.len());
    for (name, generator) in runs {
        let report = run_benchmark(name, generator, VertexId::from(cli.nodes), cli.top)?;
        if !cli.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_benchmark(name: &'static str, generator: Generator, node_count: VertexId, k: usize) -> Result<Report> {
    tracing::info!(name, node_count, "building graph");

    let t = Instant::now();
    let graph = generator(node_count)?;
    let build_ms = t.elapsed().as_secs_f64() * 1000.0;

    let probe = match (graph.vertices().first(), graph.vertices().last()) {
        (Some(&from), Some(&to)) => {
            let t = Instant::now();
            let shortest = shortest_path(&graph, from, to);
            let simple_paths = all_simple_paths(&graph, from, to).len();
            let geodesics = all_shortest_paths(&graph, from, to).len();
            Some(PathProbe {
                from,
                to,
                shortest,
                simple_paths,
                geodesics,
                elapsed_ms: t.elapsed().as_secs_f64() * 1000.0,
            })
        }
        _ => None,
    };

    let t = Instant::now();
    let top_k = top_k_betweenness_centrality(&graph, k)?;
    let ranked = top_k_ranked(&graph, k)?;
    let centrality_ms = t.elapsed().as_secs_f64() * 1000.0;

    Ok(Report {
        name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        build_ms,
        probe,
        top_k,
        ranked,
        centrality_ms,
    })
}

fn print_report(report: &Report) {
    println!("--- {} ---", report.name);
    println!(
        "Built in {:.2}ms: {} vertices, {} edges, ~{}B",
        report.build_ms, report.vertices, report.edges, report.memory_bytes
    );

    if let Some(probe) = &report.probe {
        match &probe.shortest {
            Some(path) => println!(
                "Shortest path {} → {}: {:?} ({} simple paths, {} geodesics, {:.1}ms)",
                probe.from, probe.to, path, probe.simple_paths, probe.geodesics, probe.elapsed_ms
            ),
            None => println!(
                "Shortest path {} → {}: no path ({:.1}ms)",
                probe.from, probe.to, probe.elapsed_ms
            ),
        }
    }

    println!();
    println!("{:>6} {:>10} {:>12}", "rank", "vertex", "betweenness");
    println!("{:->6} {:->10} {:->12}", "", "", "");
    for (i, r) in report.ranked.iter().enumerate() {
        println!("{:>6} {:>10} {:>12.4}", i + 1, r.vertex, r.score);
    }
    println!("Centrality in {:.1}ms", report.centrality_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic and small, all built through Graph::new
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn gen_demo(_node_count: VertexId) -> Result<Graph> {
    let vertices = vec![1, 2, 3, 4, 5, 6];
    let edges = vec![(1, 2), (1, 5), (2, 3), (2, 5), (3, 4), (3, 6), (4, 5), (4, 6)];
    Ok(Graph::new(vertices, edges)?)
}

fn gen_chain(n: VertexId) -> Result<Graph> {
    Ok(Graph::new(0..n, (1..n).map(|i| (i - 1, i)))?)
}

fn gen_star(n: VertexId) -> Result<Graph> {
    Ok(Graph::new(0..n, (1..n).map(|i| (0, i)))?)
}

/// Rings need at least three vertices to avoid a self-loop or a doubled edge.
fn gen_cycle(n: VertexId) -> Result<Graph> {
    let n = n.max(3);
    Ok(Graph::new(0..n, (0..n).map(|i| (i, (i + 1) % n)))?)
}

/// Rails 0..m and m..2m, rung i joins i and m+i. Every rung doubles the
/// geodesics crossing it, which stresses geodesic enumeration.
fn gen_ladder(n: VertexId) -> Result<Graph> {
    let m = (n / 2).max(1);
    let rails = (1..m).flat_map(|i| [(i - 1, i), (m + i - 1, m + i)]);
    let rungs = (0..m).map(|i| (i, m + i));
    Ok(Graph::new(0..2 * m, rails.chain(rungs))?)
}

/// Two complete cliques joined by a chain of bridge vertices. The bridge
/// vertices carry every cross-clique geodesic.
fn gen_barbell(n: VertexId) -> Result<Graph> {
    const BRIDGE_LEN: VertexId = 2;
    let clique = ((n - BRIDGE_LEN) / 2).max(2);
    let b_start = clique + BRIDGE_LEN;
    let total = b_start + clique;

    let clique_edges = |offset: VertexId| {
        (0..clique).flat_map(move |i| (i + 1..clique).map(move |j| (offset + i, offset + j)))
    };

    let mut edges: Vec<(VertexId, VertexId)> = clique_edges(0).chain(clique_edges(b_start)).collect();
    // clique A's last vertex → bridge → clique B's first vertex
    for id in clique..=b_start {
        edges.push((id - 1, id));
    }

    Ok(Graph::new(0..total, edges)?)
}

/// Erdos-Renyi: about two edges per vertex, self-loops and repeats dropped.
fn gen_random(n: VertexId) -> Result<Graph> {
    let mut rng = FastRng::new(54321);
    let count = n.max(1) as u64;
    let mut seen: HashSet<(VertexId, VertexId)> = HashSet::new();
    let mut edges = Vec::new();

    for _ in 0..count * 2 {
        let a = rng.next(count) as VertexId;
        let b = rng.next(count) as VertexId;
        if a != b && seen.insert((a.min(b), a.max(b))) {
            edges.push((a, b));
        }
    }

    Ok(Graph::new(0..n, edges)?)
}
