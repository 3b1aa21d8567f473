use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;

use crate::DokgenError;
use crate::DokgenResult;

/// Build a `GlobSet` from exclude patterns, rejecting invalid globs.
pub fn build_exclude_set(patterns: &[String]) -> DokgenResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			DokgenError::InvalidPattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| {
		DokgenError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Collect every file beneath `root`, sorted for deterministic ordering.
///
/// Hidden directories are skipped, as is anything whose path relative to
/// `root` matches `exclude`. Files of every extension are returned; deciding
/// what is a guide source is left to the pipeline.
pub fn collect_sources(root: &Path, exclude: &GlobSet) -> DokgenResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	walk_dir(root, root, exclude, &mut files)?;
	files.sort();
	Ok(files)
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	exclude: &GlobSet,
	files: &mut Vec<PathBuf>,
) -> DokgenResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.starts_with('.'))
		{
			continue;
		}

		if let Ok(rel_path) = path.strip_prefix(root) {
			if exclude.is_match(rel_path) {
				tracing::debug!(path = %path.display(), "excluded from scan");
				continue;
			}
		}

		if path.is_dir() {
			walk_dir(root, &path, exclude, files)?;
		} else if path.is_file() {
			files.push(path);
		}
	}

	Ok(())
}
