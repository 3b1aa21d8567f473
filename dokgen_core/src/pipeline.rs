use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::AnnotationProcessor;
use crate::DokgenConfig;
use crate::DokgenError;
use crate::DokgenResult;
use crate::LinkBuilder;
use crate::PageHeader;
use crate::ProcessError;
use crate::ProcessedSource;
use crate::SourceFormat;
use crate::SourceProcessor;
use crate::SourceUnit;
use crate::URL_DIRECTIVE;
use crate::paths::capitalize_first;
use crate::paths::padded_index;
use crate::paths::slash_path;

/// Extension of generated documentation pages.
pub const DOCS_EXTENSION: &str = "markdown";

/// Resolved inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
	/// Root the sources, and therefore namespaces and export paths, are
	/// relative to.
	pub sources_root: PathBuf,
	/// Destination of documentation pages.
	pub docs_dir: PathBuf,
	/// Destination of runnable programs.
	pub runnable_dir: PathBuf,
	/// Destination of exported programs.
	pub export_dir: PathBuf,
	/// Public base URL of exported programs.
	pub root_url: Option<String>,
	/// Prefix of the source path cited in page headers. Falls back to
	/// `sources_root`.
	pub citation_prefix: Option<PathBuf>,
	/// Glob patterns, relative to `sources_root`, excluded from scanning.
	pub exclude: Vec<String>,
}

impl GenerateOptions {
	pub fn new(
		sources_root: impl Into<PathBuf>,
		docs_dir: impl Into<PathBuf>,
		runnable_dir: impl Into<PathBuf>,
		export_dir: impl Into<PathBuf>,
	) -> Self {
		Self {
			sources_root: sources_root.into(),
			docs_dir: docs_dir.into(),
			runnable_dir: runnable_dir.into(),
			export_dir: export_dir.into(),
			root_url: None,
			citation_prefix: None,
			exclude: Vec::new(),
		}
	}

	/// Set the public base URL exported programs link to.
	#[must_use]
	pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
		self.root_url = Some(root_url.into());
		self
	}

	/// Set the prefix cited in page headers.
	#[must_use]
	pub fn with_citation_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
		self.citation_prefix = Some(prefix.into());
		self
	}

	/// Construct [`GenerateOptions`] from an optional [`DokgenConfig`],
	/// resolving every configured directory against `project_root`.
	pub fn from_config(project_root: &Path, config: Option<&DokgenConfig>) -> Self {
		let default_config = DokgenConfig::default();
		let config = config.unwrap_or(&default_config);
		let citation_prefix = config
			.citation_prefix
			.clone()
			.unwrap_or_else(|| config.sources.root.clone());

		Self {
			sources_root: project_root.join(&config.sources.root),
			docs_dir: project_root.join(&config.output.docs),
			runnable_dir: project_root.join(&config.output.runnable),
			export_dir: project_root.join(&config.output.export),
			root_url: config.web.root_url.clone(),
			citation_prefix: Some(citation_prefix),
			exclude: config.sources.exclude.clone(),
		}
	}

	fn cited_path(&self, unit: &SourceUnit) -> PathBuf {
		self.citation_prefix
			.as_deref()
			.unwrap_or(&self.sources_root)
			.join(&unit.relative_path)
	}
}

/// Files written for one successfully processed source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
	pub page: PathBuf,
	pub runnable: Vec<PathBuf>,
	pub exported: Vec<PathBuf>,
}

/// Why a source produced no output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SkipReason {
	/// The annotation processor rejected the source.
	#[error(transparent)]
	Malformed(#[from] ProcessError),
}

/// Result of handing one candidate file to the pipeline.
///
/// Conditions that must stop the whole run are not outcomes: they are the
/// `Err` side of [`process_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
	/// All outputs of the source were written.
	Generated(GeneratedFiles),
	/// The source was reported and skipped; the run continues.
	Skipped(SkipReason),
	/// Not a guide source; nothing to do.
	Ignored,
}

/// A source that was reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
	/// Source path relative to the sources root.
	pub file: PathBuf,
	pub reason: SkipReason,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
	/// Documentation pages written.
	pub pages: Vec<PathBuf>,
	/// Runnable programs written.
	pub runnable: Vec<PathBuf>,
	/// Exported programs written.
	pub exported: Vec<PathBuf>,
	/// Sources that were reported and skipped.
	pub skipped: Vec<SkippedFile>,
	/// Number of candidates that were not guide sources.
	pub ignored: usize,
}

impl GenerationReport {
	/// Returns true when no source was skipped.
	pub fn is_ok(&self) -> bool {
		self.skipped.is_empty()
	}

	fn record(&mut self, file: PathBuf, outcome: FileOutcome) {
		match outcome {
			FileOutcome::Generated(files) => {
				self.pages.push(files.page);
				self.runnable.extend(files.runnable);
				self.exported.extend(files.exported);
			}
			FileOutcome::Skipped(reason) => self.skipped.push(SkippedFile { file, reason }),
			FileOutcome::Ignored => self.ignored += 1,
		}
	}
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

/// Generate every output for `files` with the [`AnnotationProcessor`].
pub fn generate(files: &[PathBuf], options: &GenerateOptions) -> DokgenResult<GenerationReport> {
	generate_with(&AnnotationProcessor, files, options)
}

/// Generate every output for `files`, in order, with `processor`.
///
/// Malformed sources are reported and skipped. Unsupported formats, a missing
/// `URL` directive and any I/O failure abort the run.
#[instrument(skip_all, fields(files = files.len()))]
pub fn generate_with(
	processor: &impl SourceProcessor,
	files: &[PathBuf],
	options: &GenerateOptions,
) -> DokgenResult<GenerationReport> {
	let mut report = GenerationReport::default();

	for file in files {
		let outcome = process_file(processor, file, options)?;
		let relative = file
			.strip_prefix(&options.sources_root)
			.unwrap_or(file)
			.to_path_buf();
		report.record(relative, outcome);
	}

	info!(
		pages = report.pages.len(),
		runnable = report.runnable.len(),
		exported = report.exported.len(),
		skipped = report.skipped.len(),
		"generation complete"
	);

	Ok(report)
}

/// Run a single candidate file through the pipeline.
pub fn process_file(
	processor: &impl SourceProcessor,
	file: &Path,
	options: &GenerateOptions,
) -> DokgenResult<FileOutcome> {
	match SourceFormat::detect(file) {
		Some(SourceFormat::Kotlin) => {}
		Some(SourceFormat::LegacyMarkdown) => {
			return Err(DokgenError::UnsupportedFormat {
				path: file.display().to_string(),
			});
		}
		None => {
			debug!(path = %file.display(), "not a guide source, ignoring");
			return Ok(FileOutcome::Ignored);
		}
	}

	let unit = SourceUnit::new(&options.sources_root, file)?;
	let content = normalize_line_endings(&std::fs::read_to_string(file)?);
	let package = unit.namespace().examples_package();
	let links = LinkBuilder::for_source(options.root_url.as_deref(), &unit);

	let processed = match processor.process(&content, &package, links.as_ref()) {
		Ok(processed) => processed,
		Err(e) => {
			let file_path = slash_path(&unit.relative_path);
			error!(file = %file_path, message = %e.message, line = e.line, "Error in {file_path}: {e}");
			return Ok(FileOutcome::Skipped(SkipReason::Malformed(e)));
		}
	};

	write_outputs(&unit, &processed, options).map(FileOutcome::Generated)
}

fn write_outputs(
	unit: &SourceUnit,
	processed: &ProcessedSource,
	options: &GenerateOptions,
) -> DokgenResult<GeneratedFiles> {
	let url = processed
		.directives
		.get(URL_DIRECTIVE)
		.map(|url| url.trim().trim_start_matches('/'))
		.filter(|url| !url.is_empty())
		.ok_or_else(|| {
			DokgenError::MissingDirective {
				directive: URL_DIRECTIVE.to_string(),
				file: slash_path(&unit.relative_path),
			}
		})?;

	// Pages and runnable programs follow the publish location, exported
	// programs follow the source layout.
	let url_path = Path::new(url);
	let url_dir = url_path.parent().unwrap_or_else(|| Path::new(""));
	let url_name = url_path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();

	let docs_dir = options.docs_dir.join(url_dir);
	create_dir(&docs_dir)?;
	let page = docs_dir.join(format!("{url_name}.{DOCS_EXTENSION}"));
	let header = PageHeader::new(&options.cited_path(unit), &processed.directives);
	info!("writing documentation page to {}", page.display());
	std::fs::write(&page, format!("{header}{}", processed.doc))?;

	let mut runnable = Vec::with_capacity(processed.runnable.len());
	if !processed.runnable.is_empty() {
		let runnable_dir = options.runnable_dir.join(url_dir);
		create_dir(&runnable_dir)?;
		// Runnable programs are executed by class name, which must start
		// with an uppercase letter.
		let class_name = capitalize_first(&url_name);
		for (index, program) in processed.runnable.iter().enumerate() {
			let target = runnable_dir.join(format!(
				"{class_name}{}.{}",
				padded_index(index),
				unit.extension
			));
			info!("writing runnable example to {}", target.display());
			std::fs::write(&target, program)?;
			runnable.push(target);
		}
	}

	let mut exported = Vec::with_capacity(processed.exportable.len());
	if !processed.exportable.is_empty() {
		let export_dir = options.export_dir.join(&unit.relative_dir);
		create_dir(&export_dir)?;
		for (index, program) in processed.exportable.iter().enumerate() {
			let target = export_dir.join(format!(
				"{}{}.{}",
				unit.name,
				padded_index(index),
				unit.extension
			));
			info!("writing exported example to {}", target.display());
			std::fs::write(&target, program)?;
			exported.push(target);
		}
	}

	Ok(GeneratedFiles {
		page,
		runnable,
		exported,
	})
}

fn create_dir(dir: &Path) -> DokgenResult<()> {
	std::fs::create_dir_all(dir)?;
	debug!(path = %dir.display(), "ensured output directory");
	Ok(())
}
