use std::path::Path;
use std::path::PathBuf;

use crate::DokgenResult;
use crate::ESCAPE_DELIMITER;
use crate::SourceFormat;
use crate::SourceUnit;

/// Suffix the Kotlin compiler gives the class holding a file's top-level
/// `main`.
pub const ENTRY_POINT_SUFFIX: &str = "Kt";

const PACKAGE_KEYWORD: &str = "package ";

/// Fully qualified entry point class of every guide source in `files`.
///
/// Backticks are stripped from the package because the JVM launcher does not
/// accept them. Files that are not guide sources are left out.
pub fn example_class_names(files: &[PathBuf], root: &Path) -> DokgenResult<Vec<String>> {
	files
		.iter()
		.filter(|file| is_kotlin(file))
		.map(|file| {
			let unit = SourceUnit::new(root, file)?;
			Ok(class_name(&unit.namespace().examples_package(), &unit.name))
		})
		.collect()
}

/// Fully qualified entry point class of every generated program in `files`.
///
/// Runnable programs live under the directory of their publish location but
/// declare the package of their source, so the `package` line of each program
/// wins over its location. Programs without one fall back to the package
/// derived from their directory below `root`.
pub fn program_class_names(files: &[PathBuf], root: &Path) -> DokgenResult<Vec<String>> {
	files
		.iter()
		.filter(|file| is_kotlin(file))
		.map(|file| {
			let content = std::fs::read_to_string(file)?;
			let unit = SourceUnit::new(root, file)?;
			let package = declared_package(&content)
				.map_or_else(|| unit.namespace().examples_package(), str::to_string);

			Ok(class_name(&package, &unit.name))
		})
		.collect()
}

/// The package named by the first `package` line of a Kotlin program.
pub fn declared_package(content: &str) -> Option<&str> {
	content
		.lines()
		.map(str::trim)
		.find_map(|line| line.strip_prefix(PACKAGE_KEYWORD))
		.map(str::trim)
		.filter(|package| !package.is_empty())
}

fn is_kotlin(file: &Path) -> bool {
	SourceFormat::detect(file) == Some(SourceFormat::Kotlin)
}

fn class_name(package: &str, name: &str) -> String {
	let package: String = package.chars().filter(|ch| *ch != ESCAPE_DELIMITER).collect();
	format!("{package}.{name}{ENTRY_POINT_SUFFIX}")
}
