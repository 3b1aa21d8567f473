use std::ops::Range;

use logos::Logos;
use snailquote::unescape;

use crate::ProcessError;
use crate::ProcessResult;

/// Raw tokens of a file-level directive such as `@file:Title("Basics")`.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r]+")]
enum DirectiveToken {
	#[token("@file")]
	FileTarget,
	#[token(":")]
	Colon,
	#[token("(")]
	ParenOpen,
	#[token(")")]
	ParenClose,
	#[token(",")]
	Comma,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*")]
	Ident,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"-?[0-9]+")]
	Number,
}

/// A single `name = value` pair declared with `@file:Name("value")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
	pub name: String,
	pub value: String,
}

/// Walks the token stream of one directive line.
struct DirectiveWalker<'a> {
	source: &'a str,
	tokens: Vec<(Result<DirectiveToken, ()>, Range<usize>)>,
	cursor: usize,
	line: usize,
}

impl<'a> DirectiveWalker<'a> {
	fn new(source: &'a str, line: usize) -> Self {
		Self {
			source,
			tokens: DirectiveToken::lexer(source).spanned().collect(),
			cursor: 0,
			line,
		}
	}

	fn error(&self, reason: &str) -> ProcessError {
		ProcessError::new(
			self.line,
			format!("malformed directive `{}`: {reason}", self.source.trim()),
		)
	}

	/// Take the next token, failing on unrecognized input.
	fn next(&mut self) -> ProcessResult<Option<(DirectiveToken, &'a str)>> {
		let Some((result, span)) = self.tokens.get(self.cursor) else {
			return Ok(None);
		};
		self.cursor += 1;

		match result {
			Ok(token) => Ok(Some((*token, &self.source[span.clone()]))),
			Err(()) => {
				Err(self.error(&format!(
					"unexpected `{}`",
					&self.source[span.clone()]
				)))
			}
		}
	}

	fn expect(&mut self, expected: DirectiveToken, reason: &str) -> ProcessResult<&'a str> {
		match self.next()? {
			Some((token, slice)) if token == expected => Ok(slice),
			_ => Err(self.error(reason)),
		}
	}

	fn walk(mut self) -> ProcessResult<Directive> {
		self.expect(DirectiveToken::FileTarget, "expected `@file`")?;
		self.expect(DirectiveToken::Colon, "expected `:` after `@file`")?;
		let name = self
			.expect(DirectiveToken::Ident, "expected a directive name")?
			.to_string();
		self.expect(DirectiveToken::ParenOpen, "expected `(` after the name")?;

		let mut values = Vec::new();
		loop {
			match self.next()? {
				Some((DirectiveToken::DoubleQuotedString, slice)) => {
					values.push(self.string_value(slice)?);
				}
				Some((DirectiveToken::Number, slice)) => values.push(slice.to_string()),
				Some((DirectiveToken::ParenClose, _)) if values.is_empty() => break,
				_ => return Err(self.error("expected a string argument")),
			}

			match self.next()? {
				Some((DirectiveToken::Comma, _)) => {}
				Some((DirectiveToken::ParenClose, _)) => break,
				_ => return Err(self.error("expected `,` or `)`")),
			}
		}

		if self.next()?.is_some() {
			return Err(self.error("unexpected content after `)`"));
		}

		Ok(Directive {
			name,
			value: values.join(", "),
		})
	}

	/// Strip quotes and unescape if needed.
	fn string_value(&self, slice: &str) -> ProcessResult<String> {
		let inner = &slice[1..slice.len() - 1];
		if !inner.contains('\\') {
			return Ok(inner.to_string());
		}

		unescape(slice).map_err(|e| self.error(&e.to_string()))
	}
}

/// Lex a `@file:Name("value")` line. `line` is the 1-indexed line number
/// used in errors.
pub fn lex_directive(source: &str, line: usize) -> ProcessResult<Directive> {
	DirectiveWalker::new(source, line).walk()
}

/// Parse a string literal argument such as the path after `@Media.Image`.
pub fn lex_string_literal(source: &str, line: usize) -> ProcessResult<String> {
	let trimmed = source.trim();
	let mut lexer = DirectiveToken::lexer(trimmed);
	let is_single_string = matches!(lexer.next(), Some(Ok(DirectiveToken::DoubleQuotedString)))
		&& lexer.span() == (0..trimmed.len())
		&& lexer.next().is_none();

	if !is_single_string {
		return Err(ProcessError::new(
			line,
			format!("expected a string literal, found `{trimmed}`"),
		));
	}

	let inner = &trimmed[1..trimmed.len() - 1];
	if !inner.contains('\\') {
		return Ok(inner.to_string());
	}

	unescape(trimmed).map_err(|e| ProcessError::new(line, e.to_string()))
}
