use crate::EXAMPLES_NAMESPACE;
use crate::SourceUnit;
use crate::paths::padded_index;
use crate::paths::slash_path;

/// Builds the public URL an exported snippet will be published at.
///
/// Only exists when a public base URL is configured; callers hold an
/// `Option<LinkBuilder>` and the processor receives `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
	prefix: String,
	name: String,
	extension: String,
}

impl LinkBuilder {
	pub fn new(base_url: &str, source: &SourceUnit) -> Self {
		let base = base_url.trim_end_matches('/');
		let dir = slash_path(&source.relative_dir);
		let prefix = if dir.is_empty() {
			format!("{base}/{EXAMPLES_NAMESPACE}")
		} else {
			format!("{base}/{EXAMPLES_NAMESPACE}/{dir}")
		};

		Self {
			prefix,
			name: source.name.clone(),
			extension: source.extension.clone(),
		}
	}

	/// `Some` builder when `base_url` is configured, `None` otherwise.
	pub fn for_source(base_url: Option<&str>, source: &SourceUnit) -> Option<Self> {
		base_url.map(|base| Self::new(base, source))
	}

	/// Public URL of the exported snippet at `index`.
	pub fn link(&self, index: usize) -> String {
		format!(
			"{}/{}{}.{}",
			self.prefix,
			self.name,
			padded_index(index),
			self.extension
		)
	}
}
