use std::path::Path;
use std::path::PathBuf;

use crate::IndigenError;
use crate::IndigenResult;
use crate::code::IndicatorCode;
use crate::config::IndigenConfig;
use crate::patch::PatchInstruction;
use crate::patch::apply_patches;

/// A file the scaffold run will write, with its full content already
/// rendered.
#[derive(Debug)]
pub struct PlannedFile {
	pub path: PathBuf,
	pub content: String,
}

/// Everything an `add` run will do, computed up front. Nothing is written
/// until [`write_plan`], so a failure while planning leaves the project
/// untouched and `--dry-run` is just a plan that is never written.
#[derive(Debug)]
pub struct ScaffoldPlan {
	/// New files copied from templates with the code substituted in.
	pub created: Vec<PlannedFile>,
	/// Existing registration targets with the new entry inserted at its
	/// sorted position.
	pub patched: Vec<PlannedFile>,
}

/// Default template contents written by `indigen init`, keyed by the template
/// file name (which doubles as the generated file's extension). `R999` and
/// `R/999` are the substitution placeholders.
pub const DEFAULT_TEMPLATES: [(&str, &str); 4] = [
	(
		"rs",
		"use serde_json::{Map, Value};\n\nuse crate::indicators::{Calculate, Indicators, \
		 Settings};\n\n#[derive(Default)]\npub struct R999 {}\n\nimpl Calculate for R999 {\n    \
		 fn new(settings: &mut Settings) -> Self {\n        \
		 Self::default()\n    }\n\n    fn fold(&self, item: &mut Indicators, release: \
		 &Map<String, Value>, ocid: &str) {\n        todo!()\n    }\n}\n",
	),
	(
		"md",
		"# R/999\n\nDescribe the red flag calculated by the R999 indicator, the methodology, \
		 and any configurable thresholds.\n\n## Output\n\n```console\n$ indigen results \
		 R999.jsonl\n```\n",
	),
	("jsonl", "{\"ocid\": \"F\", \"bids\": {\"details\": []}}\n"),
	("expected", "{}\n"),
];

/// Substitute the new indicator's code into rendered template text. `R999`
/// becomes the canonical code and `R/999` the letter/number split used in
/// docs paths.
fn render_template(template: &str, code: &IndicatorCode) -> String {
	template.replace("R999", code.upper()).replace(
		"R/999",
		&format!("{}/{}", code.letter(), code.number()),
	)
}

/// The five files generated for a new indicator, as pairs of destination
/// path and template name.
fn template_targets(code: &IndicatorCode) -> Vec<(PathBuf, &'static str)> {
	let upper = code.upper();
	let lower = code.lower();
	let letter = code.letter();
	let number = code.number();

	vec![
		(
			["tests", "fixtures", "indicators", &format!("{upper}.jsonl")]
				.iter()
				.collect(),
			"jsonl",
		),
		(
			["tests", "fixtures", "indicators", &format!("{upper}.expected")]
				.iter()
				.collect(),
			"expected",
		),
		(
			["src", "indicators", &format!("{lower}.rs")].iter().collect(),
			"rs",
		),
		(
			["docs", "cli", "indicators", &letter.to_string(), &format!("{number}.md")]
				.iter()
				.collect(),
			"md",
		),
		(
			["docs", "examples", &letter.to_string(), &format!("{number}.jsonl")]
				.iter()
				.collect(),
			"jsonl",
		),
	]
}

/// Instruction queues for the hand-maintained registration targets, in
/// file order within each file.
fn registration_queues(
	code: &IndicatorCode,
	config: &IndigenConfig,
) -> IndigenResult<Vec<(PathBuf, Vec<PatchInstruction>)>> {
	let upper = code.upper();
	let lower = code.lower();
	let mut queues = Vec::new();

	queues.push((
		PathBuf::from("src/indicators/mod.rs"),
		vec![
			PatchInstruction::new(
				r"mod [a-z]\d{3}",
				"",
				lower.as_str(),
				format!("pub mod {lower};\n"),
			)?,
			PatchInstruction::new(
				r"struct Settings \{",
				r"^\}\s*$",
				upper,
				format!("    pub {upper}: Option<Empty>,\n"),
			)?,
			PatchInstruction::new(
				r"enum Indicator \{",
				r"^\}\s*$",
				upper,
				format!("    {upper},\n"),
			)?,
		],
	));

	queues.push((
		PathBuf::from("src/lib.rs"),
		vec![
			PatchInstruction::new(
				r"^use crate::indicators::[a-z]\d{3}",
				"",
				lower.as_str(),
				format!("use crate::indicators::{lower}::{upper};\n"),
			)?,
			PatchInstruction::new(
				r"add_indicators!",
				r"\)",
				upper,
				format!("            {upper},\n"),
			)?,
		],
	));

	if config.targets.benches {
		queues.push((
			PathBuf::from("benches/main.rs"),
			vec![PatchInstruction::new(
				r"[A-Z]\d{3}: Some\(",
				r"\}",
				upper,
				format!("                    {upper}: Some(Default::default()),\n"),
			)?],
		));
	}

	if config.targets.settings_ini {
		queues.push((
			PathBuf::from("docs/examples/settings.ini"),
			vec![PatchInstruction::new(
				r"\[[A-Z]\d{3}",
				"",
				upper,
				format!("[{upper}]\n"),
			)?],
		));
	}

	Ok(queues)
}

/// Compute the full scaffold for a new indicator: the template-derived files
/// and the patched registration targets. Every buffer is built in memory
/// before anything is written.
pub fn plan_scaffold(
	root: &Path,
	code: &IndicatorCode,
	config: &IndigenConfig,
) -> IndigenResult<ScaffoldPlan> {
	let templates_dir = root.join(&config.templates.path);
	let mut created = Vec::new();

	for (rel_path, template_name) in template_targets(code) {
		let template_path = templates_dir.join(template_name);
		if !template_path.is_file() {
			return Err(IndigenError::MissingTemplate(
				template_path.display().to_string(),
			));
		}
		let template = std::fs::read_to_string(&template_path)?;
		created.push(PlannedFile {
			path: root.join(rel_path),
			content: render_template(&template, code),
		});
	}

	let mut patched = Vec::new();
	for (rel_path, queue) in registration_queues(code, config)? {
		let path = root.join(rel_path);
		let text = std::fs::read_to_string(&path)?;
		let content = apply_patches(&text, &queue, &path)?;
		patched.push(PlannedFile { path, content });
	}

	tracing::debug!(
		code = %code,
		created = created.len(),
		patched = patched.len(),
		"planned scaffold"
	);

	Ok(ScaffoldPlan { created, patched })
}

/// Persist a plan: write the generated files (creating parent directories)
/// and overwrite the registration targets with their patched buffers.
pub fn write_plan(plan: &ScaffoldPlan) -> IndigenResult<()> {
	for file in &plan.created {
		if let Some(parent) = file.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&file.path, &file.content)?;
	}

	for file in &plan.patched {
		std::fs::write(&file.path, &file.content)?;
	}

	Ok(())
}
