use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dokgen_cli::Commands;
use dokgen_cli::DokgenCli;
use dokgen_cli::OutputFormat;
use dokgen_core::DokgenConfig;
use dokgen_core::GenerateOptions;
use dokgen_core::GenerationReport;
use dokgen_core::generate;
use dokgen_core::program_class_names;
use dokgen_core::scan::build_exclude_set;
use dokgen_core::scan::collect_sources;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "DOKGEN_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

/// Outcome of a command that ran to completion.
enum Status {
	Success,
	/// Completed, but some sources were skipped.
	Partial,
}

fn main() {
	let args = DokgenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Generate {
			sources,
			docs,
			runnable,
			export,
			root_url,
		}) => {
			let overrides = Overrides {
				sources: sources.clone(),
				docs: docs.clone(),
				runnable: runnable.clone(),
				export: export.clone(),
				root_url: root_url.clone(),
			};
			run_generate(&args, overrides)
		}
		Some(Commands::ClassNames { dir, format }) => run_class_names(&args, dir.as_deref(), *format),
		None => {
			eprintln!("No subcommand specified. Run `dokgen --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(Status::Success) => {}
		Ok(Status::Partial) => process::exit(1),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<dokgen_core::DokgenError>() {
				Ok(dokgen_err) => {
					let report: miette::Report = (*dokgen_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Log to stderr, filtered by `DOKGEN_LOG` when set.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &DokgenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `generate` flags that take precedence over `dokgen.toml`.
#[derive(Debug, Default)]
struct Overrides {
	sources: Option<PathBuf>,
	docs: Option<PathBuf>,
	runnable: Option<PathBuf>,
	export: Option<PathBuf>,
	root_url: Option<String>,
}

fn resolve_options(
	root: &Path,
	overrides: Overrides,
) -> Result<GenerateOptions, Box<dyn std::error::Error>> {
	let config = DokgenConfig::load(root)?;
	let mut options = GenerateOptions::from_config(root, config.as_ref());

	if let Some(sources) = overrides.sources {
		options.sources_root = root.join(&sources);
		// Cite the directory as it was given, like a configured root.
		if config.as_ref().is_none_or(|config| config.citation_prefix.is_none()) {
			options.citation_prefix = Some(sources);
		}
	}
	if let Some(docs) = overrides.docs {
		options.docs_dir = root.join(docs);
	}
	if let Some(runnable) = overrides.runnable {
		options.runnable_dir = root.join(runnable);
	}
	if let Some(export) = overrides.export {
		options.export_dir = root.join(export);
	}
	if let Some(root_url) = overrides.root_url {
		options.root_url = Some(root_url);
	}

	Ok(options)
}

fn run_init(args: &DokgenCli) -> Result<Status, Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = DokgenConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(Status::Success);
	}

	let config_path = root.join("dokgen.toml");
	let sample_config = "# dokgen configuration\n\n# Path prefix cited in the header of generated \
	                     pages.\n# citation_prefix = \"src/main/kotlin/docs\"\n\n[sources]\nroot \
	                     = \"src/main/kotlin/docs\"\n# exclude = [\"**/drafts/**\"]\n\n[output]\ndocs \
	                     = \"build/dokgen/jekyll/docs\"\nrunnable = \
	                     \"build/dokgen/examples\"\nexport = \
	                     \"build/dokgen/examples-export\"\n\n# Public location of exported \
	                     examples.\n# [web]\n# root_url = \
	                     \"https://github.com/<owner>/<repo>/blob/main/src/main/kotlin\"\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Point [sources] root at your annotated guides");
	println!("  2. Run `dokgen generate` to write pages and examples");

	Ok(Status::Success)
}

fn run_generate(
	args: &DokgenCli,
	overrides: Overrides,
) -> Result<Status, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let options = resolve_options(&root, overrides)?;
	tracing::debug!(?options, "resolved generation options");
	let exclude = build_exclude_set(&options.exclude)?;
	let files = collect_sources(&options.sources_root, &exclude)?;

	if args.verbose {
		println!(
			"Scanned {}: {} candidate file(s)",
			make_relative(&options.sources_root, &root),
			files.len()
		);
	}

	let report = generate(&files, &options)?;
	print_report(&report, &root, args.verbose);

	if report.is_ok() {
		Ok(Status::Success)
	} else {
		Ok(Status::Partial)
	}
}

fn print_report(report: &GenerationReport, root: &Path, verbose: bool) {
	if verbose {
		for path in report
			.pages
			.iter()
			.chain(&report.runnable)
			.chain(&report.exported)
		{
			println!("  {}", make_relative(path, root));
		}
	}

	for skipped in &report.skipped {
		eprintln!(
			"{} skipped {}: {}",
			colored!("warning:", yellow),
			skipped.file.display(),
			skipped.reason
		);
	}

	let summary = format!(
		"Generated {} page(s), {} runnable and {} exported example(s).",
		report.pages.len(),
		report.runnable.len(),
		report.exported.len()
	);
	if report.is_ok() {
		println!("{}", colored!(summary, green));
	} else {
		println!("{summary}");
		println!(
			"{}",
			colored!(format!("{} file(s) skipped.", report.skipped.len()), red)
		);
	}
}

fn run_class_names(
	args: &DokgenCli,
	dir: Option<&Path>,
	format: OutputFormat,
) -> Result<Status, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let dir = match dir {
		Some(dir) => root.join(dir),
		None => resolve_options(&root, Overrides::default())?.runnable_dir,
	};

	let files = collect_sources(&dir, &build_exclude_set(&[])?)?;
	let names = program_class_names(&files, &dir)?;

	match format {
		OutputFormat::Text => {
			for name in &names {
				println!("{name}");
			}
		}
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&names)?);
		}
	}

	Ok(Status::Success)
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
