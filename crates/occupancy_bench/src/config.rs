//! Configuration loading for the benchmark driver.

use anyhow::{Context, Result};
use occupancy_map::BenchmarkConfig;
use std::path::Path;

/// Load and validate a benchmark configuration from a TOML file.
pub fn load(path: &Path) -> Result<BenchmarkConfig> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("Failed to read config file: {}", path.display()))?;
	parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate TOML. Missing fields take their defaults.
pub fn parse(content: &str) -> Result<BenchmarkConfig> {
	let config: BenchmarkConfig =
		toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
	config.validate()?;
	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_file_is_default() {
		assert_eq!(parse("").unwrap(), BenchmarkConfig::default());
	}

	#[test]
	fn test_partial_override() {
		let config = parse(
			r#"
			max_depth = 8
			voxel_size = 0.05
			depth_sweep = [2, 4]

			[sparse_world]
			cluster_count = 10
			seed = 9

			[memory]
			octree_node_bytes = 96
			"#,
		)
		.unwrap();

		assert_eq!(config.max_depth, 8);
		assert_eq!(config.voxel_size, Some(0.05));
		assert_eq!(config.depth_sweep, vec![2, 4]);
		assert_eq!(config.sparse_world.cluster_count, 10);
		assert_eq!(config.sparse_world.seed, 9);
		assert_eq!(config.sparse_world.points_per_cluster, 300);
		assert_eq!(config.memory.octree_node_bytes, 96);
		assert_eq!(config.memory.voxel_entry_bytes, 50);
		assert_eq!(config.sensor, Default::default());
	}

	#[test]
	fn test_invalid_values_rejected() {
		assert!(parse("max_depth = 0").is_err());
		assert!(parse("max_depth = 30").is_err());
		assert!(parse("depth_sweep = []").is_err());
		assert!(parse("voxel_size = -0.5").is_err());
		assert!(parse("[sensor]\nclamp_max = -1.0").is_err());
		assert!(parse("[sparse_world]\nworld_extent = 0.0").is_err());
	}

	#[test]
	fn test_malformed_toml() {
		let err = parse("max_depth = \"deep\"").unwrap_err();
		assert!(err.to_string().contains("parse"));
	}

	#[test]
	fn test_missing_file() {
		let err = load(Path::new("/nonexistent/occupancy.toml")).unwrap_err();
		assert!(err.to_string().contains("Failed to read config file"));
	}
}
