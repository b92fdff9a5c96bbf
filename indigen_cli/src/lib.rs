use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Register new indicator modules across hand-maintained source files.",
	long_about = "indigen scaffolds procurement-indicator modules.\n\nAdding an indicator \
	              touches half a dozen hand-maintained files: the module registry, the settings \
	              struct, the library root, benchmarks, and docs. indigen generates the \
	              boilerplate from templates and inserts each registration line at its \
	              alphabetically-sorted position, leaving every other line untouched.\n\nQuick \
	              start:\n  indigen init        Create indigen.toml and the default templates\n  \
	              indigen add R038    Register a new indicator\n  indigen export      Merge \
	              results JSON into a CSV"
)]
pub struct IndigenCli {
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
	/// Initialize indigen in a project by creating the config file and the
	/// default templates directory.
	///
	/// Creates `indigen.toml` and one template per generated file kind under
	/// `docs/contributing/templates/`. Existing files are left alone, so
	/// re-running is safe.
	Init,
	/// Add boilerplate for a new indicator.
	///
	/// Generates the indicator module, test fixtures, and docs pages from the
	/// templates, and inserts a registration line into each hand-maintained
	/// target (`src/indicators/mod.rs`, `src/lib.rs`, `benches/main.rs`,
	/// `docs/examples/settings.ini`) at the code's sorted position.
	///
	/// Fails without writing anything if the code is malformed, already
	/// registered, or a registration target is missing an expected section.
	Add {
		/// The indicator code: one letter followed by three digits, e.g.
		/// `R038`. Case-insensitive on input.
		code: String,

		/// Print the files that would be created and patched without writing
		/// anything.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Convert an indicator results JSON file to CSV, merging into an
	/// existing output file.
	///
	/// Appends one row per ocid/subject/code result. Rows already present in
	/// the output file are skipped, so repeated exports never duplicate
	/// results. The header is written only when the output file is created.
	Export {
		/// The results JSON file produced by an indicators run.
		infile: PathBuf,

		/// The CSV file to create or append to.
		outfile: PathBuf,
	},
}
