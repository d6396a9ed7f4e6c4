//! Plain-text XYZ point loading.
//!
//! One point per line: `x y z` separated by whitespace or commas. Extra
//! columns (colors, normals, intensity) are ignored. Blank lines and lines
//! starting with `#` or `//` are skipped.

use anyhow::{bail, Context, Result};
use glam::DVec3;
use std::io::BufRead;
use std::path::Path;

/// Load every point from an XYZ file.
pub fn load_xyz(path: &Path) -> Result<Vec<DVec3>> {
	let file = std::fs::File::open(path)
		.with_context(|| format!("Failed to open point file: {}", path.display()))?;
	let points = parse_xyz(std::io::BufReader::new(file))
		.with_context(|| format!("Failed to read point file: {}", path.display()))?;
	if points.is_empty() {
		bail!("Point file contains no points: {}", path.display());
	}
	Ok(points)
}

/// Parse XYZ lines from any buffered reader.
pub fn parse_xyz(reader: impl BufRead) -> Result<Vec<DVec3>> {
	let mut points = Vec::new();
	for (index, line) in reader.lines().enumerate() {
		let line = line?;
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
			continue;
		}

		let mut coords = [0.0f64; 3];
		let mut fields = line
			.split(|c: char| c.is_whitespace() || c == ',')
			.filter(|field| !field.is_empty());
		for (axis, coord) in coords.iter_mut().enumerate() {
			let field = fields
				.next()
				.with_context(|| format!("line {}: expected 3 coordinates", index + 1))?;
			*coord = field.parse().with_context(|| {
				format!("line {}: bad coordinate {} {:?}", index + 1, axis, field)
			})?;
		}

		let point = DVec3::from_array(coords);
		if !point.is_finite() {
			bail!("line {}: non-finite point {}", index + 1, point);
		}
		points.push(point);
	}
	Ok(points)
}
