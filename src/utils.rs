use crate::config::IndexingConfig;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use iter_tools::Itertools;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Exclusion rules from `indexing.exclude_patterns`. A trailing `/` names a directory
/// anywhere in the tree, everything else is a glob over the root-relative path or the
/// file name.
struct Exclusions {
	dirs: Vec<String>,
	globs: GlobSet,
}

impl Exclusions {
	fn new(patterns: &[String]) -> Result<Self> {
		let mut dirs = Vec::new();
		let mut builder = GlobSetBuilder::new();

		for pattern in patterns {
			match pattern.strip_suffix('/') {
				Some(dir) if !dir.is_empty() && !dir.contains('*') => dirs.push(dir.to_string()),
				_ => {
					builder.add(
						Glob::new(pattern)
							.with_context(|| format!("invalid exclude pattern '{pattern}'"))?,
					);
				}
			}
		}

		Ok(Self {
			dirs,
			globs: builder.build()?,
		})
	}

	fn is_excluded(&self, relative: &Path) -> bool {
		let in_excluded_dir = relative.components().any(|c| match c {
			Component::Normal(name) => self.dirs.iter().any(|d| name == d.as_str()),
			_ => false,
		});

		in_excluded_dir
			|| self.globs.is_match(relative)
			|| relative
				.file_name()
				.is_some_and(|name| self.globs.is_match(name))
	}
}

/// Walks every configured directory (or single file) below `root` and returns the files
/// whose name ends in one of the configured extensions, minus exclusions. Entries that do
/// not exist are skipped.
pub fn find_indexable_files<P: AsRef<Path>>(
	root: P,
	indexing: &IndexingConfig,
) -> Result<Vec<PathBuf>> {
	let root = root.as_ref();
	let exclusions = Exclusions::new(&indexing.exclude_patterns)?;
	let mut files = Vec::new();

	for entry_point in &indexing.directories {
		let start = root.join(entry_point);
		if !start.exists() {
			debug!("skipping missing index path {}", start.display());
			continue;
		}

		for entry in WalkDir::new(&start) {
			let entry = entry?;
			let path = entry.path();
			if !path.is_file() {
				continue;
			}

			let relative = path.strip_prefix(root).unwrap_or(path);
			let relative = relative.strip_prefix(".").unwrap_or(relative);
			if exclusions.is_excluded(relative) || !has_extension(path, &indexing.extensions) {
				continue;
			}

			files.push(root.join(relative));
		}
	}

	Ok(files.into_iter().sorted().dedup().collect_vec())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
	let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
		return false;
	};
	extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
