use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DokgenError;
use crate::DokgenResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["dokgen.toml", ".dokgen.toml", ".config/dokgen.toml"];

pub const DEFAULT_SOURCES_ROOT: &str = "src/main/kotlin/docs";
pub const DEFAULT_DOCS_DIR: &str = "build/dokgen/jekyll/docs";
pub const DEFAULT_RUNNABLE_DIR: &str = "build/dokgen/examples";
pub const DEFAULT_EXPORT_DIR: &str = "build/dokgen/examples-export";

/// Configuration loaded from a `dokgen.toml` file.
///
/// ```toml
/// citation_prefix = "src/main/kotlin/docs"
///
/// [sources]
/// root = "src/main/kotlin/docs"
/// exclude = ["**/drafts/**"]
///
/// [output]
/// docs = "build/dokgen/jekyll/docs"
/// runnable = "build/dokgen/examples"
/// export = "build/dokgen/examples-export"
///
/// [web]
/// root_url = "https://github.com/openrndr/openrndr-examples/blob/master/src/main/kotlin"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DokgenConfig {
	/// Where the annotated guide sources live.
	#[serde(default)]
	pub sources: SourcesConfig,
	/// Destination directories of the three generated trees.
	#[serde(default)]
	pub output: OutputConfig,
	/// Public location of exported examples.
	#[serde(default)]
	pub web: WebConfig,
	/// Path prefix cited in generated page headers. Defaults to the sources
	/// root as configured.
	#[serde(default)]
	pub citation_prefix: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct SourcesConfig {
	#[serde(default = "default_sources_root")]
	pub root: PathBuf,
	/// Glob patterns, relative to `root`, of files that are never scanned.
	#[serde(default)]
	pub exclude: Vec<String>,
}

impl Default for SourcesConfig {
	fn default() -> Self {
		Self {
			root: default_sources_root(),
			exclude: Vec::new(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
	/// Documentation pages.
	#[serde(default = "default_docs_dir")]
	pub docs: PathBuf,
	/// Programs run to produce media.
	#[serde(default = "default_runnable_dir")]
	pub runnable: PathBuf,
	/// Programs published to the examples repository.
	#[serde(default = "default_export_dir")]
	pub export: PathBuf,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			docs: default_docs_dir(),
			runnable: default_runnable_dir(),
			export: default_export_dir(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct WebConfig {
	/// Base URL exported examples are published under. When absent, exported
	/// examples carry no link.
	#[serde(default)]
	pub root_url: Option<String>,
}

fn default_sources_root() -> PathBuf {
	PathBuf::from(DEFAULT_SOURCES_ROOT)
}

fn default_docs_dir() -> PathBuf {
	PathBuf::from(DEFAULT_DOCS_DIR)
}

fn default_runnable_dir() -> PathBuf {
	PathBuf::from(DEFAULT_RUNNABLE_DIR)
}

fn default_export_dir() -> PathBuf {
	PathBuf::from(DEFAULT_EXPORT_DIR)
}

impl DokgenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> DokgenResult<Option<DokgenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			tracing::debug!(root = %root.display(), "no config file found, using defaults");
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: DokgenConfig =
			toml::from_str(&content).map_err(|e| DokgenError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");
		Ok(Some(config))
	}
}
