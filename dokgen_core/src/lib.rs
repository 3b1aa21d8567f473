//! `dokgen_core` turns annotated Kotlin guide sources into three trees of
//! generated files: documentation pages for the website, runnable programs
//! that produce the media shown on those pages, and exported programs for a
//! public examples repository.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Guide source (.kt)
//!   → Path normalizer (relative directory, escaped namespace label)
//!   → Link builder (public URL of each exported program, when configured)
//!   → Annotation processor (directives, documentation body, programs)
//!   → Header synthesizer (front matter citing the real source)
//!   → Pipeline (pages, runnable programs, exported programs on disk)
//! ```
//!
//! A source the annotation processor rejects is reported and skipped; the
//! rest of the batch is still generated. Legacy `.md` sources, a missing
//! `URL` directive and I/O failures stop the run.
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `dokgen.toml`.
//! - [`scan`]: directory walking that supplies the candidate files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use dokgen_core::DokgenConfig;
//! use dokgen_core::GenerateOptions;
//! use dokgen_core::generate;
//! use dokgen_core::scan::build_exclude_set;
//! use dokgen_core::scan::collect_sources;
//!
//! let root = Path::new(".");
//! let config = DokgenConfig::load(root).unwrap();
//! let options = GenerateOptions::from_config(root, config.as_ref());
//! let exclude = build_exclude_set(&options.exclude).unwrap();
//! let files = collect_sources(&options.sources_root, &exclude).unwrap();
//!
//! let report = generate(&files, &options).unwrap();
//! for skipped in &report.skipped {
//! 	eprintln!("skipped {}: {}", skipped.file.display(), skipped.reason);
//! }
//! ```

pub use class_names::*;
pub use config::*;
pub use error::*;
pub use header::*;
pub use link::*;
pub use paths::*;
pub use pipeline::*;
pub use processor::*;
pub use source::*;

mod class_names;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod header;
pub(crate) mod lexer;
mod link;
mod paths;
mod pipeline;
mod processor;
pub mod scan;
mod source;

#[cfg(test)]
mod __fixtures;
