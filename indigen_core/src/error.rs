use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum IndigenError {
	#[error(transparent)]
	#[diagnostic(code(indigen::io_error))]
	Io(#[from] std::io::Error),

	#[error("malformed indicator code: `{0}`")]
	#[diagnostic(
		code(indigen::malformed_code),
		help("indicator codes are one uppercase letter followed by three digits, e.g. `R038`")
	)]
	MalformedCode(String),

	#[error("invalid window pattern: {0}")]
	#[diagnostic(code(indigen::invalid_pattern))]
	InvalidPattern(#[from] regex::Error),

	#[error("code `{code}` is already registered in {file}")]
	#[diagnostic(
		code(indigen::duplicate_key),
		help("each indicator code may be registered only once; pick an unused code")
	)]
	DuplicateKey { code: String, file: String },

	#[error("no insertion point for `{pattern}` in {file}")]
	#[diagnostic(
		code(indigen::window_not_found),
		help(
			"registration targets must contain every expected section, in the order the patches \
			 are applied; the file was left unmodified"
		)
	)]
	WindowNotFound { pattern: String, file: String },

	#[error("missing template file: {0}")]
	#[diagnostic(
		code(indigen::missing_template),
		help("run `indigen init` to create the default templates directory")
	)]
	MissingTemplate(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(indigen::config_parse),
		help("check that indigen.toml is valid TOML with [templates] and/or [targets] sections")
	)]
	ConfigParse(String),

	#[error("failed to parse results file `{path}`: {reason}")]
	#[diagnostic(code(indigen::results_parse))]
	ResultsParse { path: String, reason: String },
}

pub type IndigenResult<T> = Result<T, IndigenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
