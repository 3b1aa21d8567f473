mod common;

use dokgen_core::AnyEmptyResult;
use predicates::str::contains;

const GUIDE: &str = r#"@file:Title("Basic animation")
@file:ParentTitle("Animation")
@file:Order("50")
@file:URL("animation/basicAnimations")

package docs.`50_Animation`

import org.openrndr.application
import org.openrndr.dokgen.annotations.*

fun main() {
    @Text """
    # Basic animation
    """

    @Code
    application {
        program { }
    }
}
"#;

#[test]
fn generate_writes_pages_and_examples() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "guide/50_Animation/C50_BasicAnimation.kt", GUIDE)?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--sources", "guide"])
		.args(["--docs", "out/docs"])
		.args(["--runnable", "out/runnable"])
		.args(["--export", "out/export"])
		.assert()
		.success()
		.stdout(contains(
			"Generated 1 page(s), 1 runnable and 1 exported example(s).",
		))
		.stderr(contains("writing runnable example to"));

	let page = std::fs::read_to_string(tmp.path().join("out/docs/animation/basicAnimations.markdown"))?;
	assert!(page.starts_with("---\n# File generated by dokgen. Do not edit.\n"));
	assert!(page.contains("# Edit 'guide/50_Animation/C50_BasicAnimation.kt' instead."));
	assert!(page.contains("\ntitle: Basic animation\nparent: Animation\nnav_order: 50\n"));
	assert!(page.ends_with("# Basic animation\n\n```kotlin\napplication {\n    program { }\n}\n```\n"));

	let runnable = std::fs::read_to_string(
		tmp.path().join("out/runnable/animation/BasicAnimations000.kt"),
	)?;
	assert!(runnable.starts_with("package examples.`50_Animation`\n\nimport org.openrndr.application\n"));
	assert!(!runnable.contains("dokgen.annotations"));

	assert!(tmp
		.path()
		.join("out/export/50_Animation/C50_BasicAnimation000.kt")
		.is_file());

	Ok(())
}

#[test]
fn generate_reads_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"dokgen.toml",
		"[sources]\nroot = \"guides\"\nexclude = [\"**/drafts/**\"]\n\n[output]\ndocs = \
		 \"site\"\nrunnable = \"run\"\nexport = \"export\"\n\n[web]\nroot_url = \
		 \"https://example.org/repo\"\n",
	)?;
	common::write_file(tmp.path(), "guides/shapes/circle.kt", GUIDE)?;
	common::write_file(tmp.path(), "guides/drafts/unfinished.md", "# Not yet\n")?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("site/animation/basicAnimations.markdown").is_file());
	assert!(tmp.path().join("run/animation/BasicAnimations000.kt").is_file());

	let exported = std::fs::read_to_string(tmp.path().join("export/shapes/circle000.kt"))?;
	assert!(exported.starts_with(
		"// This example is published at https://example.org/repo/examples/shapes/circle000.kt\n\npackage examples.shapes\n"
	));

	let page = std::fs::read_to_string(tmp.path().join("site/animation/basicAnimations.markdown"))?;
	assert!(page.contains("# Edit 'guides/shapes/circle.kt' instead."));

	Ok(())
}

#[test]
fn generate_root_url_flag_overrides_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		".dokgen.toml",
		"[sources]\nroot = \"guides\"\n\n[web]\nroot_url = \"https://example.org/old\"\n",
	)?;
	common::write_file(tmp.path(), "guides/circle.kt", GUIDE)?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--root-url", "https://example.org/new/"])
		.assert()
		.success();

	let exported = std::fs::read_to_string(
		tmp.path().join("build/dokgen/examples-export/circle000.kt"),
	)?;
	assert!(exported.starts_with(
		"// This example is published at https://example.org/new/examples/circle000.kt\n"
	));

	Ok(())
}

#[test]
fn generate_skips_malformed_sources_and_exits_with_one() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "guides/a_bad.kt", "fun main() {\n    oops()\n}\n")?;
	common::write_file(tmp.path(), "guides/b_good.kt", GUIDE)?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--sources", "guides"])
		.assert()
		.code(1)
		.stderr(contains("Error in a_bad.kt"))
		.stderr(contains("skipped a_bad.kt"))
		.stdout(contains("1 file(s) skipped."));

	assert!(tmp
		.path()
		.join("build/dokgen/jekyll/docs/animation/basicAnimations.markdown")
		.is_file());

	Ok(())
}

#[test]
fn generate_rejects_legacy_markdown_sources() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "guides/old.md", "# Old guide\n")?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--sources", "guides"])
		.assert()
		.code(2)
		.stderr(contains("unsupported source format"))
		.stderr(contains("dokgen::unsupported_format"));

	assert!(!tmp.path().join("build").exists());

	Ok(())
}

#[test]
fn generate_requires_url_directive() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"guides/page.kt",
		"@file:Title(\"Page\")\n\nfun main() {\n}\n",
	)?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.args(["--sources", "guides"])
		.assert()
		.code(2)
		.stderr(contains("missing `URL` directive in `page.kt`"));

	Ok(())
}

#[test]
fn generate_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "dokgen.toml", "[sources\n")?;

	common::dokgen_cmd()?
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(contains("failed to parse config file"));

	Ok(())
}

#[test]
fn missing_subcommand_fails() -> AnyEmptyResult {
	common::dokgen_cmd()?
		.assert()
		.code(1)
		.stderr(contains("No subcommand specified"));

	Ok(())
}
