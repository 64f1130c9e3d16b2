//! Catmull CLI - quad mesh subdivision command-line tool.
//!
//! Usage: catmull <COMMAND> [OPTIONS]
//!
//! Run `catmull --help` for available commands. Set `RUST_LOG=debug` for
//! per-pass statistics.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use catmull::algo::subdivide::{
    catmull_clark_subdivide_with_progress, BoundaryRule, EdgeTable, SubdivideOptions,
};
use catmull::algo::Progress;
use catmull::mesh::{grid, unit_cube, QuadMesh};

#[derive(Parser)]
#[command(name = "catmull")]
#[command(author, version, about = "Catmull-Clark subdivision CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display control mesh information
    Info {
        /// Control mesh to inspect
        #[arg(short, long, value_enum, default_value = "cube")]
        shape: Shape,

        /// Grid resolution (quads per side)
        #[arg(long, default_value = "4")]
        size: usize,
    },

    /// Subdivide a control mesh
    Subdivide {
        /// Control mesh to subdivide
        #[arg(short, long, value_enum, default_value = "cube")]
        shape: Shape,

        /// Grid resolution (quads per side)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Number of subdivision iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Keep open boundaries sharp
        #[arg(long)]
        crease: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Unit cube (closed, 6 quads)
    Cube,
    /// Planar grid (open, size x size quads)
    Grid,
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
        Commands::Info { shape, size } => {
            let mesh = control_mesh(shape, size)?;
            print_info(&mesh)?;
        }

        Commands::Subdivide {
            shape,
            size,
            iterations,
            crease,
            sequential,
        } => {
            let mesh = control_mesh(shape, size)?;
            cmd_subdivide(&mesh, iterations, crease, sequential)?;
        }
    }

    Ok(())
}

fn control_mesh(shape: Shape, size: usize) -> catmull::error::Result<QuadMesh> {
    match shape {
        Shape::Cube => Ok(unit_cube()),
        Shape::Grid => grid(size, size),
    }
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only redraw when the bar advances
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

fn print_info(mesh: &QuadMesh) -> Result<(), Box<dyn std::error::Error>> {
    let edges = EdgeTable::build(mesh)?;

    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", edges.len());
    println!("Faces: {}", mesh.num_faces());
    println!("Euler characteristic: {}", mesh.euler_characteristic(edges.len()));

    let boundary = edges.num_boundary_edges();
    if boundary == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        println!("Topology: Open ({} boundary edges)", boundary);
    }

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(())
}

fn cmd_subdivide(
    mesh: &QuadMesh,
    iterations: usize,
    crease: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Control mesh: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    let rule = if crease { BoundaryRule::Crease } else { BoundaryRule::Uniform };
    let options = SubdivideOptions::new(iterations)
        .with_boundary_rule(rule)
        .with_parallel(!sequential);
    let mode = if sequential { "sequential" } else { "parallel" };
    let progress = create_progress();

    println!("Applying Catmull-Clark subdivision ({} iterations, {:?} boundary, {})...", iterations, rule, mode);
    let start = Instant::now();
    let refined = catmull_clark_subdivide_with_progress(mesh, &options, &progress)?;
    let elapsed = start.elapsed();

    println!("Result ({:.2?}):", elapsed);
    print_info(&refined)?;

    Ok(())
}
