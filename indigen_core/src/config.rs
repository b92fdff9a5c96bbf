use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::IndigenError;
use crate::IndigenResult;

/// Default templates directory, relative to the project root.
pub const DEFAULT_TEMPLATES_DIR: &str = "docs/contributing/templates";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["indigen.toml", ".indigen.toml", ".config/indigen.toml"];

/// Configuration loaded from an `indigen.toml` file.
///
/// ```toml
/// [templates]
/// path = "docs/contributing/templates"
///
/// [targets]
/// benches = true
/// settings_ini = true
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct IndigenConfig {
	/// Where the boilerplate templates live.
	#[serde(default)]
	pub templates: TemplatesConfig,
	/// Which optional registration targets to patch.
	#[serde(default)]
	pub targets: TargetsConfig,
}

/// Templates directory configuration.
#[derive(Debug, Deserialize)]
pub struct TemplatesConfig {
	/// Directory containing one template per generated file extension
	/// (`rs`, `md`, `jsonl`, `expected`), relative to the project root.
	#[serde(default = "default_templates_path")]
	pub path: PathBuf,
}

impl Default for TemplatesConfig {
	fn default() -> Self {
		Self {
			path: default_templates_path(),
		}
	}
}

/// Optional registration targets. The module registry and library root are
/// always patched; benchmark and docs-settings registration can be switched
/// off for projects that lack those files.
#[derive(Debug, Deserialize)]
pub struct TargetsConfig {
	/// Patch `benches/main.rs` with a settings entry for the new indicator.
	#[serde(default = "default_true")]
	pub benches: bool,
	/// Patch `docs/examples/settings.ini` with a section for the new
	/// indicator.
	#[serde(default = "default_true")]
	pub settings_ini: bool,
}

impl Default for TargetsConfig {
	fn default() -> Self {
		Self {
			benches: true,
			settings_ini: true,
		}
	}
}

impl IndigenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> IndigenResult<Option<IndigenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: IndigenConfig =
			toml::from_str(&content).map_err(|e| IndigenError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}

fn default_templates_path() -> PathBuf {
	PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

fn default_true() -> bool {
	true
}
