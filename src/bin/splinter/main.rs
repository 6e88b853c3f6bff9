//! Splinter CLI - partition procedurally generated meshes into islands.
//!
//! Usage: splinter <COMMAND> [OPTIONS]
//!
//! Run `splinter --help` for available commands.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use nalgebra::Point3;

use splinter::algo::partition::{partition_with_progress, PartitionOptions, Strategy};
use splinter::algo::validate::validate_partition;
use splinter::algo::Progress;
use splinter::mesh::{DegeneratePolicy, IndexedMesh};

#[derive(Parser)]
#[command(name = "splinter")]
#[command(author, version, about = "Mesh island partitioning CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition an N x N grid of quads
    Grid {
        /// Number of quads along each side
        #[arg(short, long, default_value = "64")]
        size: usize,

        /// Duplicate the vertices along the middle column, as a UV seam would
        #[arg(long)]
        seams: bool,

        /// Put each row of quads in its own sub-mesh
        #[arg(long)]
        row_submeshes: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Partition a set of disjoint triangles
    Shards {
        /// Number of triangles
        #[arg(short, long, default_value = "1000")]
        count: usize,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Partition a triangle fan around a centre vertex
    Fan {
        /// Number of triangles in the fan
        #[arg(short, long, default_value = "16")]
        segments: usize,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Grouping strategy
    #[arg(long, value_enum, default_value = "greedy")]
    strategy: StrategyArg,

    /// Weld vertices closer than this distance (default: exact equality)
    #[arg(long)]
    weld_tolerance: Option<f64>,

    /// Keep triangles with repeated vertex indices instead of failing
    #[arg(long)]
    allow_degenerate: bool,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,

    /// Check the result for completeness, connectivity and maximality
    #[arg(long)]
    verify: bool,

    /// Number of islands to list
    #[arg(long, default_value = "10")]
    show: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Greedy per-island flood-fill (order dependent)
    Greedy,
    /// Union-find connected components (order independent)
    UnionFind,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::UnionFind => Strategy::UnionFind,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Grid {
            size,
            seams,
            row_submeshes,
            common,
        } => {
            let mesh = grid_mesh(size, seams, row_submeshes);
            cmd_partition("grid", &mesh, &common)?;
        }

        Commands::Shards { count, common } => {
            let mesh = shards_mesh(count);
            cmd_partition("shards", &mesh, &common)?;
        }

        Commands::Fan { segments, common } => {
            let mesh = fan_mesh(segments);
            cmd_partition("fan", &mesh, &common)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Track highest percent seen (monotonic)

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Sub-meshes finish out of order on the thread pool; never move backwards
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_partition(
    name: &str,
    mesh: &IndexedMesh,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Generated {} mesh: {} vertices, {} triangles, {} submeshes",
        name,
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.num_submeshes()
    );

    let mut options = PartitionOptions::default()
        .with_strategy(common.strategy.into())
        .with_parallel(!common.sequential);
    if let Some(eps) = common.weld_tolerance {
        options = options.with_weld_tolerance(eps);
    }
    if common.allow_degenerate {
        options = options.with_degenerate(DegeneratePolicy::Allow);
    }

    let mode = if common.sequential { "sequential" } else { "parallel" };
    println!(
        "Partitioning {} triangles ({:?}, {})...",
        mesh.num_triangles(),
        options.strategy,
        mode
    );

    let progress = create_progress();
    let start = Instant::now();
    let partition = partition_with_progress(mesh, &options, &progress)?;
    let elapsed = start.elapsed();

    println!(
        "Result: {} islands over {} submeshes ({:.2?})",
        partition.num_islands(),
        partition.num_submeshes(),
        elapsed
    );

    if let Some((id, island)) = partition.largest_island() {
        println!(
            "Largest island: {:?} in {:?} with {} triangles",
            id,
            island.submesh(),
            island.num_triangles()
        );
    }

    for (k, island) in partition.islands().enumerate().take(common.show) {
        println!(
            "  island {:>4}: {:?}, {} triangles",
            k,
            island.submesh(),
            island.num_triangles()
        );
    }
    if partition.num_islands() > common.show {
        println!("  ... {} more", partition.num_islands() - common.show);
    }

    if common.verify {
        let report = validate_partition(mesh, &partition, &options)?;
        println!(
            "Verify: {} (missing {}, extra {}, disconnected {}, maximality {})",
            if report.is_valid() { "ok" } else { "FAILED" },
            report.missing_triangles,
            report.extra_triangles,
            report.disconnected_islands,
            report.maximality_violations
        );
        if !report.is_valid() {
            return Err("partition failed verification".into());
        }
    }

    Ok(())
}

/// N x N quads, two triangles each. With `seams`, vertices on the middle
/// column are duplicated and the right half references the copies.
fn grid_mesh(n: usize, seams: bool, row_submeshes: bool) -> IndexedMesh {
    let n = n.max(1);
    let side = n + 1;
    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(side * side + side);
    for j in 0..side {
        for i in 0..side {
            positions.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let seam_col = n / 2;
    let seam_base = positions.len();
    if seams {
        for j in 0..side {
            positions.push(Point3::new(seam_col as f64, j as f64, 0.0));
        }
    }

    let vertex = |i: usize, j: usize, right_half: bool| -> u32 {
        if seams && right_half && i == seam_col {
            (seam_base + j) as u32
        } else {
            (j * side + i) as u32
        }
    };

    let mut mesh = IndexedMesh::new(positions);
    let mut indices: Vec<u32> = Vec::with_capacity(n * n * 6);
    for j in 0..n {
        for i in 0..n {
            let right = i >= seam_col;
            let v00 = vertex(i, j, right);
            let v10 = vertex(i + 1, j, right);
            let v01 = vertex(i, j + 1, right);
            let v11 = vertex(i + 1, j + 1, right);
            indices.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
        }
        if row_submeshes {
            mesh.add_submesh(std::mem::take(&mut indices));
        }
    }
    if !row_submeshes {
        mesh.add_submesh(indices);
    }
    mesh
}

/// `count` unit triangles spaced out along the x axis.
fn shards_mesh(count: usize) -> IndexedMesh {
    let mut positions = Vec::with_capacity(count * 3);
    let mut indices: Vec<u32> = Vec::with_capacity(count * 3);
    for k in 0..count {
        let x = k as f64 * 2.0;
        positions.push(Point3::new(x, 0.0, 0.0));
        positions.push(Point3::new(x + 1.0, 0.0, 0.0));
        positions.push(Point3::new(x, 1.0, 0.0));
        let base = (k * 3) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    IndexedMesh::new(positions).with_submesh(indices)
}

/// Open fan of `segments` triangles around vertex 0.
fn fan_mesh(segments: usize) -> IndexedMesh {
    let segments = segments.max(1);
    let mut positions = vec![Point3::origin()];
    let step = std::f64::consts::PI / segments as f64;
    for k in 0..=segments {
        let a = k as f64 * step;
        positions.push(Point3::new(a.cos(), a.sin(), 0.0));
    }
    let indices: Vec<u32> = (1..=segments as u32)
        .flat_map(|k| [0, k, k + 1])
        .collect();
    IndexedMesh::new(positions).with_submesh(indices)
}
