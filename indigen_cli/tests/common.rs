use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn indigen_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("indigen"));
	cmd.env("NO_COLOR", "1");
	cmd
}

/// A minimal indicators project with two registered indicators (`R001` and
/// `R025`), ready for `indigen add`.
#[allow(dead_code)]
pub fn write_fixture_project(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let templates = root.join("docs/contributing/templates");
	std::fs::create_dir_all(&templates)?;
	std::fs::write(templates.join("rs"), "pub struct R999 {}\n")?;
	std::fs::write(templates.join("md"), "# R/999\n")?;
	std::fs::write(templates.join("jsonl"), "{\"ocid\": \"x\"}\n")?;
	std::fs::write(templates.join("expected"), "{}\n")?;

	std::fs::create_dir_all(root.join("src/indicators"))?;
	std::fs::write(
		root.join("src/indicators/mod.rs"),
		"pub mod r001;\npub mod r025;\n\npub struct Settings {\n    pub R001: Option<Empty>,\n    \
		 pub R025: Option<Empty>,\n}\n\npub enum Indicator {\n    R001,\n    R025,\n}\n",
	)?;
	std::fs::write(
		root.join("src/lib.rs"),
		"use crate::indicators::r001::R001;\nuse crate::indicators::r025::R025;\n\npub fn run() \
		 {\n    add_indicators!(\n            R001,\n            R025,\n    );\n}\n",
	)?;

	std::fs::create_dir_all(root.join("benches"))?;
	std::fs::write(
		root.join("benches/main.rs"),
		"fn main() {\n    run(Settings {\n                    R001: \
		 Some(Default::default()),\n                    R025: Some(Default::default()),\n        \
		 })\n}\n",
	)?;

	std::fs::create_dir_all(root.join("docs/examples"))?;
	std::fs::write(root.join("docs/examples/settings.ini"), "[R001]\n[R025]\n")?;

	Ok(())
}
