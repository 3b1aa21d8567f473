use std::path::Path;
use std::path::PathBuf;

use crate::DokgenResult;
use crate::NamespaceLabel;
use crate::paths::relative_dir;
use crate::paths::relative_path;

/// Extension of annotated guide sources.
pub const SOURCE_EXTENSION: &str = "kt";

/// Extension of the retired markdown guide format.
pub const LEGACY_EXTENSION: &str = "md";

/// How the pipeline treats a candidate file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceFormat {
	/// An annotated Kotlin guide source.
	Kotlin,
	/// A markdown guide from before sources were annotated Kotlin. These must
	/// be converted and are never processed.
	LegacyMarkdown,
}

impl SourceFormat {
	/// Detect the format of `path`, or `None` for files the pipeline ignores.
	pub fn detect(path: &Path) -> Option<Self> {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some(SOURCE_EXTENSION) => Some(Self::Kotlin),
			Some(LEGACY_EXTENSION) => Some(Self::LegacyMarkdown),
			_ => None,
		}
	}
}

/// One input document located beneath the sources root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
	/// The path as supplied by the directory scan.
	pub path: PathBuf,
	/// `path` relative to the sources root.
	pub relative_path: PathBuf,
	/// Parent directory of `relative_path`; empty for top-level files.
	pub relative_dir: PathBuf,
	/// File name without its extension.
	pub name: String,
	/// File extension, reused for every generated snippet.
	pub extension: String,
}

impl SourceUnit {
	pub fn new(root: &Path, path: &Path) -> DokgenResult<Self> {
		let relative = relative_path(root, path)?.to_path_buf();
		let relative_dir = relative_dir(root, path)?;
		let name = path
			.file_stem()
			.map(|stem| stem.to_string_lossy().into_owned())
			.unwrap_or_default();
		let extension = path
			.extension()
			.map(|ext| ext.to_string_lossy().into_owned())
			.unwrap_or_default();

		Ok(Self {
			path: path.to_path_buf(),
			relative_path: relative,
			relative_dir,
			name,
			extension,
		})
	}

	pub fn namespace(&self) -> NamespaceLabel {
		NamespaceLabel::from_relative_dir(&self.relative_dir)
	}
}
