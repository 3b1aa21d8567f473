use std::borrow::Cow;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use derive_more::Display;

use crate::DokgenError;
use crate::DokgenResult;

/// Namespace that every generated example lives under.
pub const EXAMPLES_NAMESPACE: &str = "examples";

/// Delimiter wrapped around namespace segments that are not plain
/// identifiers.
pub const ESCAPE_DELIMITER: char = '`';

/// Minimum width of the zero-padded index in generated file names.
pub const INDEX_WIDTH: usize = 3;

/// Return the parent directory of `file` relative to `root`.
///
/// A file placed directly inside `root` yields an empty path.
pub fn relative_dir(root: &Path, file: &Path) -> DokgenResult<PathBuf> {
	let relative = relative_path(root, file)?;
	Ok(relative.parent().map(Path::to_path_buf).unwrap_or_default())
}

/// Return `file` relative to `root`.
pub fn relative_path<'a>(root: &Path, file: &'a Path) -> DokgenResult<&'a Path> {
	file.strip_prefix(root)
		.map_err(|_| {
			DokgenError::SourceOutsideRoot {
				path: file.display().to_string(),
				root: root.display().to_string(),
			}
		})
}

/// Escape a single namespace segment.
///
/// Segments made only of alphabetic characters are returned unchanged, any
/// other segment is wrapped in backticks. Segments that are already wrapped
/// are left alone so escaping never nests.
pub fn escape_segment(segment: &str) -> Cow<'_, str> {
	if is_escaped(segment) || segment.chars().all(char::is_alphabetic) {
		Cow::Borrowed(segment)
	} else {
		Cow::Owned(format!("{ESCAPE_DELIMITER}{segment}{ESCAPE_DELIMITER}"))
	}
}

fn is_escaped(segment: &str) -> bool {
	segment.len() >= 2
		&& segment.starts_with(ESCAPE_DELIMITER)
		&& segment.ends_with(ESCAPE_DELIMITER)
}

/// Dot separated, escaped form of a relative directory.
///
/// ```
/// use std::path::Path;
///
/// use dokgen_core::NamespaceLabel;
///
/// let label = NamespaceLabel::from_relative_dir(Path::new("50_Animation/easing"));
/// assert_eq!(label.as_str(), "`50_Animation`.easing");
/// assert_eq!(label.examples_package(), "examples.`50_Animation`.easing");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, Display)]
pub struct NamespaceLabel(String);

impl NamespaceLabel {
	pub fn from_relative_dir(dir: &Path) -> Self {
		let segments: Vec<String> = dir
			.components()
			.filter_map(|component| {
				match component {
					Component::Normal(part) => Some(part.to_string_lossy()),
					_ => None,
				}
			})
			.map(|part| escape_segment(&part).into_owned())
			.collect();

		Self(segments.join("."))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The package generated examples for this label are declared in.
	pub fn examples_package(&self) -> String {
		if self.0.is_empty() {
			EXAMPLES_NAMESPACE.to_string()
		} else {
			format!("{EXAMPLES_NAMESPACE}.{}", self.0)
		}
	}
}

/// Zero-pad a snippet index for use in file names and links.
pub fn padded_index(index: usize) -> String {
	format!("{index:0width$}", width = INDEX_WIDTH)
}

/// Uppercase the first character of `name`, leaving the rest untouched.
pub fn capitalize_first(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
	path.components()
		.filter_map(|component| {
			match component {
				Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
				Component::RootDir => Some(String::new()),
				Component::Prefix(prefix) => {
					Some(prefix.as_os_str().to_string_lossy().into_owned())
				}
				Component::ParentDir => Some("..".to_string()),
				Component::CurDir => None,
			}
		})
		.collect::<Vec<_>>()
		.join("/")
}
