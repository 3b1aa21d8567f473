mod common;

use dokgen_core::AnyEmptyResult;
use predicates::str::contains;

const GUIDE: &str = r#"@file:Title("Basic animation")
@file:URL("animation/basicAnimations")

package docs.`50_Animation`

import org.openrndr.application

fun main() {
    @Code
    application {
        program { }
    }
}
"#;

#[test]
fn class_names_follow_package_of_generated_programs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "guides/50_Animation/C50_BasicAnimation.kt", GUIDE)?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--sources", "guides"])
		.assert()
		.success();

	let program = std::fs::read_to_string(
		tmp.path()
			.join("build/dokgen/examples/animation/BasicAnimations000.kt"),
	)?;
	assert!(program.starts_with("package examples.`50_Animation`\n"));

	common::dokgen_cmd()?
		.arg("class-names")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("examples.50_Animation.BasicAnimations000Kt\n");

	Ok(())
}

#[test]
fn class_names_without_package_use_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let runnable = "build/dokgen/examples";
	common::write_file(tmp.path(), &format!("{runnable}/animation/BasicAnimations000.kt"), "")?;
	common::write_file(tmp.path(), &format!("{runnable}/animation/BasicAnimations001.kt"), "")?;
	common::write_file(tmp.path(), &format!("{runnable}/Index000.kt"), "")?;
	common::write_file(tmp.path(), &format!("{runnable}/animation/media.png"), "")?;

	common::dokgen_cmd()?
		.arg("class-names")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			"examples.Index000Kt\nexamples.animation.BasicAnimations000Kt\nexamples.animation.\
			 BasicAnimations001Kt\n",
		);

	Ok(())
}

#[test]
fn class_names_strips_escaping_from_packages() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "out/50_Animation/Easing000.kt", "")?;

	common::dokgen_cmd()?
		.arg("class-names")
		.arg("--path")
		.arg(tmp.path())
		.args(["--dir", "out"])
		.assert()
		.success()
		.stdout("examples.50_Animation.Easing000Kt\n");

	Ok(())
}

#[test]
fn class_names_json_format() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "out/shapes/Circle000.kt", "")?;

	common::dokgen_cmd()?
		.arg("class-names")
		.arg("--path")
		.arg(tmp.path())
		.args(["--dir", "out", "--format", "json"])
		.assert()
		.success()
		.stdout(contains("[\n  \"examples.shapes.Circle000Kt\"\n]"));

	Ok(())
}

#[test]
fn class_names_of_missing_directory_is_empty() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::dokgen_cmd()?
		.arg("class-names")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("");

	Ok(())
}
