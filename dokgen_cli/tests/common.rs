use std::path::Path;

use assert_cmd::Command;
use dokgen_core::AnyResult;

pub fn dokgen_cmd() -> AnyResult<Command> {
	let mut cmd = Command::cargo_bin("dokgen")?;
	cmd.env("NO_COLOR", "1").env_remove("DOKGEN_LOG");
	Ok(cmd)
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> AnyResult<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	Ok(())
}
