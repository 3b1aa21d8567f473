use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DokgenError {
	#[error(transparent)]
	#[diagnostic(code(dokgen::io_error))]
	Io(#[from] std::io::Error),

	#[error("unsupported source format: `{path}`")]
	#[diagnostic(
		code(dokgen::unsupported_format),
		help("dokgen only reads annotated .kt sources, please convert this file to .kt")
	)]
	UnsupportedFormat { path: String },

	#[error("missing `{directive}` directive in `{file}`")]
	#[diagnostic(
		code(dokgen::missing_directive),
		help("add `@file:{directive}(\"...\")` to the top of the source file")
	)]
	MissingDirective { directive: String, file: String },

	#[error("source `{path}` is not inside the sources root `{root}`")]
	#[diagnostic(code(dokgen::source_outside_root))]
	SourceOutsideRoot { path: String, root: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(dokgen::config_parse),
		help("check that dokgen.toml is valid TOML with [sources], [output] and/or [web] sections")
	)]
	ConfigParse(String),

	#[error("invalid exclude pattern `{pattern}`: {reason}")]
	#[diagnostic(code(dokgen::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },
}

/// A structural problem found by the annotation processor.
///
/// These are expected content issues: the pipeline reports them and moves on
/// to the next source instead of aborting.
#[derive(Debug, Clone, Diagnostic, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
#[diagnostic(code(dokgen::malformed_source))]
pub struct ProcessError {
	/// Human readable description of the problem.
	pub message: String,
	/// 1-indexed line number where the problem was detected.
	pub line: usize,
}

impl ProcessError {
	pub fn new(line: usize, message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			line,
		}
	}
}

pub type DokgenResult<T> = Result<T, DokgenError>;
pub type ProcessResult<T> = Result<T, ProcessError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
