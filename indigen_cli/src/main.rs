use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use indigen_cli::Commands;
use indigen_cli::IndigenCli;
use indigen_core::DEFAULT_TEMPLATES;
use indigen_core::DEFAULT_TEMPLATES_DIR;
use indigen_core::IndicatorCode;
use indigen_core::IndigenConfig;
use indigen_core::export_to_csv;
use indigen_core::plan_scaffold;
use indigen_core::write_plan;
use owo_colors::OwoColorize;

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
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = IndigenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	if args.verbose {
		tracing_subscriber::fmt()
			.with_env_filter("indigen_core=debug,indigen_cli=debug")
			.with_writer(std::io::stderr)
			.with_ansi(use_color)
			.init();
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

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Add { ref code, dry_run }) => run_add(&args, code, dry_run),
		Some(Commands::Export {
			ref infile,
			ref outfile,
		}) => run_export(infile, outfile),
		None => {
			eprintln!("No subcommand specified. Run `indigen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<indigen_core::IndigenError>() {
			Ok(indigen_err) => {
				let report: miette::Report = (*indigen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &IndigenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &IndigenCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join("indigen.toml");
	let templates_dir = root.join(DEFAULT_TEMPLATES_DIR);

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
	} else {
		let sample_config = "# indigen configuration\n\n# Where the boilerplate templates \
		                     live.\n# [templates]\n# path = \
		                     \"docs/contributing/templates\"\n\n# Registration targets that can \
		                     be switched off for projects\n# without benchmarks or a docs \
		                     settings file.\n# [targets]\n# benches = true\n# settings_ini = \
		                     true\n";
		std::fs::write(&config_path, sample_config)?;
		println!("Created indigen.toml");
	}

	let mut created_templates = 0;
	std::fs::create_dir_all(&templates_dir)?;
	for (name, content) in DEFAULT_TEMPLATES {
		let path = templates_dir.join(name);
		if path.exists() {
			continue;
		}
		std::fs::write(&path, content)?;
		created_templates += 1;
	}

	if created_templates > 0 {
		println!(
			"Created {created_templates} template(s) in {}",
			templates_dir.display()
		);
		println!();
		println!("Next steps:");
		println!("  1. Edit the templates to match your project's boilerplate");
		println!("  2. Run `indigen add R001` to register your first indicator");
	}

	Ok(())
}

fn run_add(args: &IndigenCli, code: &str, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let code = IndicatorCode::parse(code)?;
	let config = IndigenConfig::load(&root)?.unwrap_or_default();

	let plan = plan_scaffold(&root, &code, &config)?;

	if dry_run {
		println!(
			"{}",
			colored!(format!("Dry run for {code}; nothing written."), bold)
		);
	}

	for file in &plan.created {
		println!(
			"{} {}",
			colored!(if dry_run { "would create" } else { "created" }, green),
			file.path.display()
		);
	}
	for file in &plan.patched {
		println!(
			"{} {}",
			colored!(if dry_run { "would patch" } else { "patched" }, yellow),
			file.path.display()
		);
	}

	if !dry_run {
		write_plan(&plan)?;
		println!("Registered indicator {}", colored!(code, bold));
	}

	Ok(())
}

fn run_export(infile: &Path, outfile: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let rows = export_to_csv(infile, outfile)?;
	println!("Writing {rows} rows");
	Ok(())
}
