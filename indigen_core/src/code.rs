use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::IndigenError;
use crate::IndigenResult;

/// Matches the first code-shaped token in a line. Case-insensitive on the
/// letter because registration targets mix `r038` (module paths) and `R038`
/// (type names), and each instruction's key carries the matching case.
static CODE_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[A-Za-z]\d{3}").expect("code token pattern is valid"));

/// A canonical indicator code: one uppercase letter followed by exactly three
/// digits (e.g. `R038`).
///
/// Ordering is plain lexicographic comparison of the canonical string. The
/// digit field is fixed-width and zero-padded, so lexicographic order equals
/// numeric order within a letter, and codes with different letters sort by
/// letter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndicatorCode(String);

impl IndicatorCode {
	/// Parse and validate a user-supplied token. The input is upcased before
	/// validation, so `r038` and `R038` are the same code.
	pub fn parse(input: &str) -> IndigenResult<Self> {
		let upper = input.trim().to_uppercase();
		let mut chars = upper.chars();
		let shape_ok = chars.next().is_some_and(|c| c.is_ascii_uppercase())
			&& chars.clone().count() == 3
			&& chars.all(|c| c.is_ascii_digit());

		if shape_ok {
			Ok(Self(upper))
		} else {
			Err(IndigenError::MalformedCode(input.to_string()))
		}
	}

	/// The canonical uppercase form, e.g. `R038`.
	pub fn upper(&self) -> &str {
		&self.0
	}

	/// The lowercase form used for module names and file stems, e.g. `r038`.
	pub fn lower(&self) -> String {
		self.0.to_lowercase()
	}

	/// The leading letter, e.g. `R`.
	pub fn letter(&self) -> char {
		// Validated at construction: never empty.
		self.0.chars().next().unwrap_or_default()
	}

	/// The three-digit remainder, e.g. `038`.
	pub fn number(&self) -> &str {
		&self.0[1..]
	}
}

impl fmt::Display for IndicatorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Extract the first code-shaped token from a line, if any. A line with no
/// extractable token is treated as window syntax rather than a sorted entry.
pub fn extract_code(line: &str) -> Option<&str> {
	CODE_TOKEN.find(line).map(|m| m.as_str())
}
