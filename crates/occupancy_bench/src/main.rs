//! Occupancy octree vs sparse voxel grid benchmark driver.
//!
//! Datasets:
//! - real: a plain-text XYZ scan (`--points`), or a dense sphere shell
//!   stand-in when no file is given
//! - sparse: the configured synthetic clustered world
//!
//! Modes:
//! - single: one build per dataset at `max_depth`, printed as a comparative
//!   summary
//! - sweep: every depth in `depth_sweep`, printed as a table and optionally
//!   written as JSON rows for plotting

mod config;
mod points;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use occupancy_map::{
	BenchmarkConfig, BenchmarkReport, Dataset, Harness, PointSource, SphereShell,
};
use std::path::PathBuf;

/// Occupancy octree vs sparse voxel grid benchmark.
#[derive(Parser, Debug)]
#[command(name = "occupancy_bench")]
#[command(about = "Compares a probabilistic occupancy octree against a sparse voxel grid")]
struct Args {
	/// Path to configuration TOML file (defaults apply when omitted).
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Plain-text XYZ point file used as the real dataset.
	#[arg(short, long, global = true)]
	points: Option<PathBuf>,

	/// Point count of the sphere shell stand-in when no point file is given.
	#[arg(long, global = true, default_value_t = 100_000)]
	shell_points: usize,

	/// Which datasets to run.
	#[arg(short, long, global = true, value_enum, default_value_t = Which::Both)]
	dataset: Which,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Build once per dataset and print a comparative summary.
	Single {
		/// Octree depth (overrides `max_depth`).
		#[arg(long)]
		depth: Option<u8>,

		/// Grid voxel size (overrides `voxel_size`; matched to the leaf edge
		/// when neither is set).
		#[arg(long)]
		voxel_size: Option<f64>,
	},
	/// Sweep `depth_sweep` for every dataset.
	Sweep {
		/// Write rows and failures as JSON.
		#[arg(long)]
		json: Option<PathBuf>,
	},
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Which {
	Real,
	Sparse,
	Both,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => {
			info!("Loading config from: {}", path.display());
			config::load(path)?
		}
		None => BenchmarkConfig::default(),
	};
	let harness = Harness::new(config).context("Invalid benchmark configuration")?;
	let datasets = load_datasets(&args, &harness)?;

	match args.command {
		Command::Single { depth, voxel_size } => {
			let depth = depth.unwrap_or(harness.config().max_depth);
			let voxel_size = voxel_size.or(harness.config().voxel_size);
			for dataset in &datasets {
				let summary = harness
					.single_build(dataset, depth, voxel_size)
					.with_context(|| format!("Single build failed for {}", dataset.label()))?;
				println!("{}\n", summary);
			}
		}
		Command::Sweep { json } => {
			let report = harness.run(&datasets);
			print_table(&report);
			if let Some(path) = json {
				let text = serde_json::to_string_pretty(&report)
					.context("Failed to serialize benchmark report")?;
				std::fs::write(&path, text)
					.with_context(|| format!("Failed to write JSON: {}", path.display()))?;
				info!("Rows written to: {}", path.display());
			}
			if !report.is_complete() {
				warn!("{} sweep step(s) failed", report.failures.len());
			}
		}
	}

	Ok(())
}

fn load_datasets(args: &Args, harness: &Harness) -> Result<Vec<Dataset>> {
	let mut datasets = Vec::new();

	if args.dataset != Which::Sparse {
		let real = match &args.points {
			Some(path) => {
				info!("Loading real point cloud from: {}", path.display());
				let points = points::load_xyz(path)?;
				let label = path
					.file_stem()
					.map(|stem| stem.to_string_lossy().into_owned())
					.unwrap_or_else(|| "real".to_owned());
				Dataset::new(label, points)
			}
			None => {
				info!("No point file given, using a {} point sphere shell", args.shell_points);
				SphereShell::new()
					.with_count(args.shell_points)
					.generate()
					.context("Failed to generate sphere shell")?
			}
		};
		info!("{}: {} points", real.label(), real.len());
		datasets.push(real);
	}

	if args.dataset != Which::Real {
		let sparse = harness
			.sparse_dataset()
			.context("Failed to generate sparse world")?;
		info!("{}: {} points", sparse.label(), sparse.len());
		datasets.push(sparse);
	}

	Ok(datasets)
}

fn print_table(report: &BenchmarkReport) {
	println!(
		"{:<16} {:>5} {:>10} {:>12} {:>10} {:>12} {:>12} {:>10} {:>10}",
		"dataset",
		"depth",
		"voxel",
		"octree_us",
		"dense_us",
		"nodes",
		"occupied",
		"voxels",
		"mem_ratio"
	);
	for row in &report.rows {
		let octree_bytes = row.metrics_octree.estimated_memory_bytes().max(1);
		let ratio = row.metrics_dense.estimated_memory_bytes() as f64 / octree_bytes as f64;
		println!(
			"{:<16} {:>5} {:>10.5} {:>12} {:>10} {:>12} {:>12} {:>10} {:>10.3}",
			row.dataset_label,
			row.depth,
			row.voxel_size,
			row.build_time_octree_us,
			row.build_time_dense_us,
			row.metrics_octree.total(),
			row.metrics_octree.occupied(),
			row.metrics_dense.total(),
			ratio
		);
	}
	for failure in &report.failures {
		println!(
			"{:<16} {:>5} FAILED: {}",
			failure.dataset_label, failure.depth, failure.error
		);
	}
}
