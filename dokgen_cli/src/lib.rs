use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate documentation pages and runnable examples from annotated Kotlin guides.",
	long_about = "dokgen turns annotated Kotlin guide sources into three trees of generated \
	              files: documentation pages for the website, runnable programs that produce \
	              the media shown on those pages, and exported programs for a public examples \
	              repository.\n\nQuick start:\n  dokgen init         Create a dokgen.toml\n  \
	              dokgen generate     Regenerate every output\n  dokgen class-names  List the \
	              entry points of the runnable programs"
)]
pub struct DokgenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize dokgen in a project by creating a sample `dokgen.toml`.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Regenerate documentation pages, runnable programs and exported
	/// programs from every guide source.
	///
	/// Every invocation is a full regeneration. Sources with malformed
	/// annotations are reported and skipped, the rest of the batch is still
	/// written and the command exits with status 1. Legacy `.md` sources, a
	/// missing `URL` directive and I/O failures stop the run with status 2.
	///
	/// Flags override the matching `dokgen.toml` values.
	Generate {
		/// Directory holding the annotated guide sources.
		#[arg(long)]
		sources: Option<PathBuf>,

		/// Output directory of documentation pages.
		#[arg(long)]
		docs: Option<PathBuf>,

		/// Output directory of runnable programs.
		#[arg(long)]
		runnable: Option<PathBuf>,

		/// Output directory of exported programs.
		#[arg(long)]
		export: Option<PathBuf>,

		/// Public base URL exported programs are published under. Exported
		/// programs start with a comment linking to their public location.
		#[arg(long)]
		root_url: Option<String>,
	},
	/// Print the fully qualified entry point class of every generated
	/// program.
	///
	/// Scans the runnable output directory by default, which is what an
	/// external step executes to produce the media of the documentation.
	/// Each class is named after the `package` line of its program and the
	/// program's file name.
	ClassNames {
		/// Directory of generated programs to scan.
		#[arg(long)]
		dir: Option<PathBuf>,

		/// Output format. Use `text` for one class name per line or `json`
		/// for a JSON array.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// One entry per line.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
