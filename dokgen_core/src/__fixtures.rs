use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use crate::Directives;
use crate::LinkBuilder;
use crate::ProcessError;
use crate::ProcessResult;
use crate::ProcessedSource;
use crate::SourceProcessor;

pub const ANIMATION_SOURCE: &str = r#"@file:Suppress("UNUSED_EXPRESSION")
@file:Title("Basic animation")
@file:ParentTitle("Animation")
@file:Order("50")
@file:URL("animation/basicAnimations")

package docs.`50_Animation`

import org.openrndr.application
import org.openrndr.dokgen.annotations.*

fun main() {

    @Text
    """
    # Basic animation

    In this example we draw a circle.
    """

    @Code
    application {
        program {
            extend {
                drawer.circle(width / 2.0, height / 2.0, 100.0)
            }
        }
    }
}
"#;

pub const ANIMATION_DOC: &str = "# Basic animation

In this example we draw a circle.

```kotlin
application {
    program {
        extend {
            drawer.circle(width / 2.0, height / 2.0, 100.0)
        }
    }
}
```
";

pub const ANIMATION_PROGRAM: &str = "package examples.`50_Animation`

import org.openrndr.application

fun main() {
    application {
        program {
            extend {
                drawer.circle(width / 2.0, height / 2.0, 100.0)
            }
        }
    }
}
";

/// A source with every kind of code block: two runnable programs (`@Code`,
/// `@Application`) and two exported ones (`@Code`, `@Code.Export`).
pub const MIXED_SOURCE: &str = r#"@file:Title("Mixed")
@file:URL("guide/mixed")

import org.openrndr.application

fun main() {
    @Text """Intro"""

    @Code
    application { }

    @Code.Block
    val radius = 10.0

    @Code.Export
    application {
        program { }
    }

    @Application
    application {
        program {
            // render media
        }
    }

    @Media.Image "../media/mixed-001.png"
}
"#;

/// Build a minimal source declaring `url` with `runnable` `@Application`
/// blocks and `exported` `@Code.Export` blocks.
pub fn source_with(url: &str, title: &str, runnable: usize, exported: usize) -> String {
	let mut source = format!("@file:Title(\"{title}\")\n@file:URL(\"{url}\")\n\nfun main() {{\n");
	for index in 0..runnable {
		source.push_str(&format!("    @Application\n    application {{ run({index}) }}\n\n"));
	}
	for index in 0..exported {
		source.push_str(&format!("    @Code.Export\n    application {{ export({index}) }}\n\n"));
	}
	source.push_str("}\n");
	source
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_source(root: &Path, relative: &str, content: &str) -> PathBuf {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write source: {e}"));
	path
}

/// A processor that records what the pipeline hands it and returns a fixed
/// result.
#[derive(Debug, Default)]
pub struct RecordingProcessor {
	pub result: ProcessedSource,
	pub contents: RefCell<Vec<String>>,
	pub packages: RefCell<Vec<String>>,
	pub links: RefCell<Vec<Option<LinkBuilder>>>,
	pub fail_with: Option<ProcessError>,
}

impl RecordingProcessor {
	pub fn returning(directives: &[(&str, &str)], runnable: usize, exportable: usize) -> Self {
		let directives: Directives = directives
			.iter()
			.map(|(key, value)| ((*key).to_string(), (*value).to_string()))
			.collect();

		Self {
			result: ProcessedSource {
				directives,
				doc: "body\n".to_string(),
				runnable: (0..runnable).map(|index| format!("run {index}")).collect(),
				exportable: (0..exportable)
					.map(|index| format!("export {index}"))
					.collect(),
			},
			..Self::default()
		}
	}
}

impl SourceProcessor for RecordingProcessor {
	fn process(
		&self,
		content: &str,
		package: &str,
		links: Option<&LinkBuilder>,
	) -> ProcessResult<ProcessedSource> {
		self.contents.borrow_mut().push(content.to_string());
		self.packages.borrow_mut().push(package.to_string());
		self.links.borrow_mut().push(links.cloned());

		match &self.fail_with {
			Some(error) => Err(error.clone()),
			None => Ok(self.result.clone()),
		}
	}
}
