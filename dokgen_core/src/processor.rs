use crate::Directives;
use crate::LinkBuilder;
use crate::ProcessError;
use crate::ProcessResult;
use crate::lexer::lex_directive;
use crate::lexer::lex_string_literal;

/// Imports of the annotation library itself, dropped from generated programs.
const ANNOTATIONS_IMPORT: &str = "dokgen.annotations";
const TEXT_DELIMITER: &str = "\"\"\"";
const CODE_LANGUAGE: &str = "kotlin";
const INDENT: &str = "    ";

/// Turns the content of an annotated source into a documentation body and
/// snippet programs.
///
/// Implementations report malformed sources with a [`ProcessError`]; the
/// pipeline treats that as a per-file problem and carries on.
pub trait SourceProcessor {
	/// Process `content`. `package` is the package generated programs are
	/// declared in and `links` is present only when a public base URL is
	/// configured.
	fn process(
		&self,
		content: &str,
		package: &str,
		links: Option<&LinkBuilder>,
	) -> ProcessResult<ProcessedSource>;
}

/// Everything extracted from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSource {
	/// File-level directives, `Title`, `URL` and friends.
	pub directives: Directives,
	/// Documentation body, without front matter.
	pub doc: String,
	/// Programs run to produce media for the documentation.
	pub runnable: Vec<String>,
	/// Programs published to the public examples repository.
	pub exportable: Vec<String>,
}

/// [`SourceProcessor`] for annotated Kotlin guides.
///
/// ```kotlin
/// @file:Title("Basic animation")
/// @file:URL("animation/basicAnimations")
///
/// package docs.`50_Animation`
///
/// import org.openrndr.application
///
/// fun main() {
///     @Text """
///     # Basic animation
///     """
///
///     @Code
///     application {
///         program { }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationProcessor;

impl SourceProcessor for AnnotationProcessor {
	fn process(
		&self,
		content: &str,
		package: &str,
		links: Option<&LinkBuilder>,
	) -> ProcessResult<ProcessedSource> {
		let scanned = Scanner::new(content).scan()?;
		Ok(scanned.assemble(package, links))
	}
}

/// How a code block is used once extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeKind {
	/// `@Code`: shown, run and exported.
	Shown,
	/// `@Code.Block`: shown only.
	Block,
	/// `@Code.Export`: shown and exported, never run.
	Export,
	/// `@Application`: run only.
	Application,
}

impl CodeKind {
	fn from_marker(marker: &str) -> Option<Self> {
		match marker {
			"Code" => Some(Self::Shown),
			"Code.Block" => Some(Self::Block),
			"Code.Export" => Some(Self::Export),
			"Application" => Some(Self::Application),
			_ => None,
		}
	}

	fn in_docs(self) -> bool {
		!matches!(self, Self::Application)
	}

	fn is_runnable(self) -> bool {
		matches!(self, Self::Shown | Self::Application)
	}

	fn is_exported(self) -> bool {
		matches!(self, Self::Shown | Self::Export)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
	Image,
	Video,
}

impl MediaKind {
	fn render(self, path: &str) -> String {
		match self {
			Self::Image => format!("![]({path})"),
			Self::Video => {
				format!("<video controls>\n{INDENT}<source src=\"{path}\" type=\"video/mp4\">\n</video>")
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
	Text(String),
	Code { kind: CodeKind, code: String },
	Media { kind: MediaKind, path: String },
}

/// Where the scanner is within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
	/// Directives, `package` and imports before `fun main`.
	Preamble,
	/// Inside `fun main`, between annotated blocks.
	Body,
	/// After the closing brace of `fun main`.
	Trailer,
}

#[derive(Debug, Default)]
struct Scanned {
	directives: Directives,
	imports: Vec<String>,
	blocks: Vec<Block>,
}

struct Scanner<'a> {
	lines: Vec<&'a str>,
	/// Index of the next unread line.
	cursor: usize,
}

impl<'a> Scanner<'a> {
	fn new(content: &'a str) -> Self {
		let lines = content
			.lines()
			.map(|line| line.strip_suffix('\r').unwrap_or(line))
			.collect();

		Self { lines, cursor: 0 }
	}

	/// Consume the next line, returning it with its 1-indexed line number.
	fn next_line(&mut self) -> Option<(usize, &'a str)> {
		let line = self.lines.get(self.cursor).copied()?;
		self.cursor += 1;
		Some((self.cursor, line))
	}

	/// Look at the next non-blank line without consuming it.
	fn peek_non_blank(&self) -> Option<(usize, &'a str)> {
		self.lines
			.iter()
			.enumerate()
			.skip(self.cursor)
			.find(|(_, line)| !line.trim().is_empty())
			.map(|(index, line)| (index + 1, *line))
	}

	fn scan(mut self) -> ProcessResult<Scanned> {
		let mut scanned = Scanned::default();
		let mut state = ScanState::Preamble;

		while let Some((line_number, line)) = self.next_line() {
			let trimmed = line.trim();
			if trimmed.is_empty() || trimmed.starts_with("//") {
				continue;
			}
			if let Some(comment) = trimmed.strip_prefix("/*") {
				self.skip_block_comment(comment, line_number)?;
				continue;
			}

			match state {
				ScanState::Preamble => {
					if trimmed.starts_with("@file:") {
						let directive = lex_directive(trimmed, line_number)?;
						scanned.directives.insert(directive.name, directive.value);
					} else if trimmed.starts_with("import ") {
						if !trimmed.contains(ANNOTATIONS_IMPORT) {
							scanned.imports.push(trimmed.to_string());
						}
					} else if is_main_declaration(trimmed) {
						state = ScanState::Body;
					} else if !trimmed.starts_with("package ") {
						return Err(ProcessError::new(
							line_number,
							format!("unexpected `{trimmed}` before `fun main() {{`"),
						));
					}
				}
				ScanState::Body => {
					if trimmed == "}" {
						state = ScanState::Trailer;
					} else if let Some(marker) = trimmed.strip_prefix('@') {
						let block = self.scan_block(marker, line_number)?;
						scanned.blocks.push(block);
					} else {
						return Err(ProcessError::new(
							line_number,
							format!("`{trimmed}` is outside of an annotated block"),
						));
					}
				}
				ScanState::Trailer => {
					return Err(ProcessError::new(
						line_number,
						"unexpected content after the end of `fun main`",
					));
				}
			}
		}

		let last_line = self.lines.len().max(1);
		match state {
			ScanState::Preamble => {
				Err(ProcessError::new(
					last_line,
					"missing `fun main() {` entry point",
				))
			}
			ScanState::Body => {
				Err(ProcessError::new(
					last_line,
					"`fun main` is missing its closing `}`",
				))
			}
			ScanState::Trailer => Ok(scanned),
		}
	}

	/// Consume a `/* ... */` comment whose text after the opening `/*` is
	/// `rest`.
	fn skip_block_comment(&mut self, rest: &str, opening_line: usize) -> ProcessResult<()> {
		if rest.contains("*/") {
			return Ok(());
		}

		while let Some((_, line)) = self.next_line() {
			if line.contains("*/") {
				return Ok(());
			}
		}

		Err(ProcessError::new(
			opening_line,
			"unterminated block comment, missing closing `*/`",
		))
	}

	fn scan_block(&mut self, marker: &'a str, line_number: usize) -> ProcessResult<Block> {
		let end = marker
			.find(|ch: char| !(ch.is_alphanumeric() || ch == '.'))
			.unwrap_or(marker.len());
		let (name, rest) = (&marker[..end], marker[end..].trim());

		match name {
			"Text" => self.scan_text(rest, line_number).map(Block::Text),
			"Media.Image" => {
				let path = lex_string_literal(rest, line_number)?;
				Ok(Block::Media {
					kind: MediaKind::Image,
					path,
				})
			}
			"Media.Video" => {
				let path = lex_string_literal(rest, line_number)?;
				Ok(Block::Media {
					kind: MediaKind::Video,
					path,
				})
			}
			other => {
				let Some(kind) = CodeKind::from_marker(other) else {
					return Err(ProcessError::new(
						line_number,
						format!("unknown annotation `@{other}`"),
					));
				};
				let code = self.scan_code(other, rest, line_number)?;
				Ok(Block::Code { kind, code })
			}
		}
	}

	/// Read the triple-quoted string following `@Text`.
	fn scan_text(&mut self, rest: &'a str, marker_line: usize) -> ProcessResult<String> {
		let (opening_line, opening) = if rest.is_empty() {
			match self.peek_non_blank() {
				Some((number, line)) if line.trim().starts_with(TEXT_DELIMITER) => {
					self.cursor = number;
					(number, line.trim())
				}
				_ => {
					return Err(ProcessError::new(
						marker_line,
						"`@Text` must be followed by a \"\"\" string",
					));
				}
			}
		} else {
			(marker_line, rest)
		};

		let Some(first) = opening.strip_prefix(TEXT_DELIMITER) else {
			return Err(ProcessError::new(
				opening_line,
				"`@Text` must be followed by a \"\"\" string",
			));
		};

		if let Some(end) = first.find(TEXT_DELIMITER) {
			check_text_trailer(&first[end + TEXT_DELIMITER.len()..], opening_line)?;
			return Ok(first[..end].trim().to_string());
		}

		let mut lines = vec![first];
		loop {
			let Some((number, line)) = self.next_line() else {
				return Err(ProcessError::new(
					opening_line,
					"unterminated text block, missing closing \"\"\"",
				));
			};

			if let Some(end) = line.find(TEXT_DELIMITER) {
				check_text_trailer(&line[end + TEXT_DELIMITER.len()..], number)?;
				lines.push(&line[..end]);
				break;
			}

			lines.push(line);
		}

		Ok(trim_indent(&lines))
	}

	/// Read the brace-balanced statement following a code marker.
	fn scan_code(
		&mut self,
		marker: &str,
		rest: &'a str,
		marker_line: usize,
	) -> ProcessResult<String> {
		let (start_line, first, inline) = if rest.is_empty() {
			match self.peek_non_blank() {
				Some((number, line)) if !is_block_boundary(line.trim()) => {
					self.cursor = number;
					(number, line, false)
				}
				_ => {
					return Err(ProcessError::new(
						marker_line,
						format!("`@{marker}` is not followed by a code block"),
					));
				}
			}
		} else {
			(marker_line, rest, true)
		};

		let unbalanced = || {
			ProcessError::new(
				start_line,
				format!("unbalanced braces in the `@{marker}` block starting here"),
			)
		};

		let mut braces = BraceCounter::default();
		let mut lines = vec![first];
		let mut depth = braces.line_delta(first);
		while depth > 0 || braces.in_raw_string {
			let Some((_, line)) = self.next_line() else {
				return Err(unbalanced());
			};
			depth += braces.line_delta(line);
			lines.push(line);
		}

		if depth < 0 {
			return Err(unbalanced());
		}

		if inline {
			// The first line was already trimmed off the marker, only the
			// continuation lines carry the source indentation.
			let continuation = trim_indent(&lines[1..]);
			if continuation.is_empty() {
				return Ok(first.to_string());
			}
			return Ok(format!("{first}\n{continuation}"));
		}

		Ok(trim_indent(&lines))
	}
}

impl Scanned {
	fn assemble(self, package: &str, links: Option<&LinkBuilder>) -> ProcessedSource {
		let mut sections = Vec::new();
		let mut runnable = Vec::new();
		let mut exportable = Vec::new();

		for block in self.blocks {
			match block {
				Block::Text(text) => {
					if !text.is_empty() {
						sections.push(text);
					}
				}
				Block::Media { kind, path } => sections.push(kind.render(&path)),
				Block::Code { kind, code } => {
					if kind.in_docs() {
						sections.push(format!("```{CODE_LANGUAGE}\n{code}\n```"));
					}
					if kind.is_runnable() {
						runnable.push(render_program(package, &self.imports, &code, None));
					}
					if kind.is_exported() {
						let link = links.map(|links| links.link(exportable.len()));
						exportable.push(render_program(
							package,
							&self.imports,
							&code,
							link.as_deref(),
						));
					}
				}
			}
		}

		let mut doc = sections.join("\n\n");
		if !doc.is_empty() {
			doc.push('\n');
		}

		ProcessedSource {
			directives: self.directives,
			doc,
			runnable,
			exportable,
		}
	}
}

/// Wrap `code` into a standalone program declared in `package`.
fn render_program(package: &str, imports: &[String], code: &str, link: Option<&str>) -> String {
	let mut program = String::new();

	if let Some(link) = link {
		program.push_str(&format!("// This example is published at {link}\n\n"));
	}

	program.push_str(&format!("package {package}\n\n"));
	for import in imports {
		program.push_str(import);
		program.push('\n');
	}
	if !imports.is_empty() {
		program.push('\n');
	}

	program.push_str("fun main() {\n");
	for line in code.lines() {
		if !line.is_empty() {
			program.push_str(INDENT);
			program.push_str(line);
		}
		program.push('\n');
	}
	program.push_str("}\n");

	program
}

fn is_main_declaration(line: &str) -> bool {
	let compact: String = line.split_whitespace().collect();
	compact == "funmain(){"
}

fn is_block_boundary(trimmed: &str) -> bool {
	trimmed == "}" || trimmed.starts_with('@')
}

fn check_text_trailer(trailer: &str, line: usize) -> ProcessResult<()> {
	match trailer.trim() {
		"" | ".trimIndent()" | ".trimMargin()" => Ok(()),
		other => {
			Err(ProcessError::new(
				line,
				format!("unexpected `{other}` after closing \"\"\""),
			))
		}
	}
}

/// Tracks brace depth through Kotlin code, ignoring braces inside string and
/// character literals and after a line comment. Raw `"""` strings may span
/// lines, so their state is carried from one line to the next.
#[derive(Debug, Default)]
struct BraceCounter {
	in_raw_string: bool,
}

impl BraceCounter {
	/// Net change in brace depth for one line.
	fn line_delta(&mut self, line: &str) -> i64 {
		let chars: Vec<char> = line.chars().collect();
		let mut depth = 0;
		let mut quote: Option<char> = None;
		let mut escaped = false;
		let mut index = 0;

		while index < chars.len() {
			let ch = chars[index];

			if self.in_raw_string {
				if opens_raw_string(&chars, index) {
					self.in_raw_string = false;
					index += TEXT_DELIMITER.len();
				} else {
					index += 1;
				}
				continue;
			}

			if let Some(delimiter) = quote {
				if escaped {
					escaped = false;
				} else if ch == '\\' {
					escaped = true;
				} else if ch == delimiter {
					quote = None;
				}
				index += 1;
				continue;
			}

			match ch {
				'"' if opens_raw_string(&chars, index) => {
					self.in_raw_string = true;
					index += TEXT_DELIMITER.len();
					continue;
				}
				'"' | '\'' => quote = Some(ch),
				'/' if chars.get(index + 1) == Some(&'/') => break,
				'{' => depth += 1,
				'}' => depth -= 1,
				_ => {}
			}
			index += 1;
		}

		depth
	}
}

fn opens_raw_string(chars: &[char], index: usize) -> bool {
	chars.get(index..index + 3) == Some(&['"', '"', '"'][..])
}

/// Remove leading and trailing blank lines and the indentation shared by all
/// non-blank lines. Whitespace-only lines become empty.
pub(crate) fn trim_indent(lines: &[&str]) -> String {
	let Some(start) = lines.iter().position(|line| !is_blank(line)) else {
		return String::new();
	};
	let end = lines
		.iter()
		.rposition(|line| !is_blank(line))
		.map_or(start, |index| index + 1);
	let lines = &lines[start..end];

	let indent = lines
		.iter()
		.filter(|line| !is_blank(line))
		.map(|line| line.chars().take_while(|ch| ch.is_whitespace()).count())
		.min()
		.unwrap_or(0);

	lines
		.iter()
		.map(|line| {
			if is_blank(line) {
				""
			} else {
				let offset = line
					.char_indices()
					.nth(indent)
					.map_or(line.len(), |(index, _)| index);
				&line[offset..]
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn is_blank(line: &str) -> bool {
	line.trim().is_empty()
}
