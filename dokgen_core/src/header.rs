use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::paths::slash_path;

/// Directive naming the page title.
pub const TITLE_DIRECTIVE: &str = "Title";
/// Directive naming the parent section title.
pub const PARENT_DIRECTIVE: &str = "ParentTitle";
/// Directive holding the navigation order.
pub const ORDER_DIRECTIVE: &str = "Order";
/// Directive holding the publish location, `dir/name`, of the page.
pub const URL_DIRECTIVE: &str = "URL";

/// Parent value that marks a page as the root of its section.
pub const ROOT_PARENT: &str = "~";

/// Base names of sources that act as the index page of their section.
pub const SECTION_INDEX_NAMES: [&str; 2] = ["index", "home"];

/// Directive name to value, as declared at the top of a source file.
pub type Directives = BTreeMap<String, String>;

/// Returns `true` when `path` names a section index source (`index.kt`,
/// `home.kt`).
pub fn is_section_index(path: &Path) -> bool {
	path.file_stem()
		.and_then(|stem| stem.to_str())
		.is_some_and(|stem| SECTION_INDEX_NAMES.contains(&stem))
}

/// Front matter placed at the top of every generated documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
	/// Path of the real source, cited so editors go there instead.
	pub source: String,
	pub title: Option<String>,
	pub parent: Option<String>,
	pub nav_order: Option<String>,
	pub has_children: bool,
}

impl PageHeader {
	/// Build the header for the source at `source` (as it should be cited)
	/// from its directives.
	///
	/// Section indexes always get the root parent and `has_children`, whatever
	/// their `ParentTitle` directive says.
	pub fn new(source: &Path, directives: &Directives) -> Self {
		let has_children = is_section_index(source);
		let parent = if has_children {
			Some(ROOT_PARENT.to_string())
		} else {
			directives.get(PARENT_DIRECTIVE).cloned()
		};

		Self {
			source: slash_path(source),
			title: directives.get(TITLE_DIRECTIVE).cloned(),
			parent,
			nav_order: directives.get(ORDER_DIRECTIVE).cloned(),
			has_children,
		}
	}
}

impl fmt::Display for PageHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "---")?;
		writeln!(f, "# File generated by dokgen. Do not edit.")?;
		writeln!(f, "# Edit '{}' instead.", self.source)?;
		writeln!(f, "layout: default")?;
		write_field(f, "title", self.title.as_deref())?;
		write_field(f, "parent", self.parent.as_deref())?;
		write_field(f, "nav_order", self.nav_order.as_deref())?;
		writeln!(f, "has_children: {}", self.has_children)?;
		writeln!(f, "---")
	}
}

fn write_field(f: &mut fmt::Formatter<'_>, key: &str, value: Option<&str>) -> fmt::Result {
	match value {
		Some(value) => writeln!(f, "{key}: {value}"),
		None => writeln!(f, "{key}:"),
	}
}
