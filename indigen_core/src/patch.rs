use std::path::Path;

use regex::Regex;

use crate::IndigenError;
use crate::IndigenResult;
use crate::code::extract_code;

/// A single declarative edit against one registration target: where the scan
/// window opens and closes, the code that sorts the new entry, and the exact
/// text to insert.
///
/// Instructions are immutable. Each one is constructed for a single
/// registration run and consumed at most once by [`apply_patches`].
#[derive(Debug)]
pub struct PatchInstruction {
	start: Regex,
	end: Regex,
	key: String,
	content: String,
}

impl PatchInstruction {
	/// Build an instruction from its two window boundary patterns, the
	/// insertion key, and the fully rendered content. The content must carry
	/// its own line terminator so the inserted line is indistinguishable from
	/// a hand-written one.
	pub fn new(
		start: &str,
		end: &str,
		key: impl Into<String>,
		content: impl Into<String>,
	) -> IndigenResult<Self> {
		Ok(Self {
			start: Regex::new(start)?,
			end: Regex::new(end)?,
			key: key.into(),
			content: content.into(),
		})
	}

	/// The code driving the sort comparison inside the window.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The rendered text inserted when the instruction fires.
	pub fn content(&self) -> &str {
		&self.content
	}
}

/// Outcome of examining one line against the active instruction.
enum Scan {
	/// No decision yet; keep scanning.
	Skip,
	/// This line is the insertion point: insert before it.
	Fire,
	/// The window already contains an entry equal to the insertion key.
	Duplicate(String),
}

/// Decides whether `line` is the insertion point for the active instruction,
/// updating `started` as the window opens.
///
/// The line that matches the start pattern flips `started` before the
/// same-pass checks below run, so a window whose start and end patterns match
/// the same line fires on that line.
fn scan_line(started: &mut bool, instruction: &PatchInstruction, line: &str) -> Scan {
	if !*started && instruction.start.is_match(line) {
		*started = true;
	}

	if *started {
		if let Some(code) = extract_code(line) {
			// Entries in the window are already sorted, so the first strictly
			// greater code marks the insertion point. An equal code means the
			// key is already registered.
			if code == instruction.key.as_str() {
				return Scan::Duplicate(code.to_string());
			}
			if code > instruction.key.as_str() {
				return Scan::Fire;
			}
		} else if instruction.end.is_match(line) {
			// The sorted run ended without a greater code: append as the last
			// entry, before the window's closing syntax.
			return Scan::Fire;
		}
	}

	Scan::Skip
}

/// Applies an ordered instruction queue to the full text of one file in a
/// single top-to-bottom pass.
///
/// Queue order must match the order in which the windows appear in the file;
/// the runner never backtracks. Each instruction fires exactly once, and the
/// line it fires on is appended immediately after the inserted content.
/// `origin` names the file in error diagnostics.
///
/// Line terminators round-trip verbatim (including `\r\n`); inserted content
/// carries its own terminator.
pub fn apply_patches(
	text: &str,
	queue: &[PatchInstruction],
	origin: &Path,
) -> IndigenResult<String> {
	let inserted: usize = queue.iter().map(|i| i.content.len()).sum();
	let mut output = String::with_capacity(text.len() + inserted);
	let mut index = 0;
	let mut started = false;

	for line in text.split_inclusive('\n') {
		if let Some(instruction) = queue.get(index) {
			match scan_line(&mut started, instruction, line) {
				Scan::Skip => {}
				Scan::Fire => {
					output.push_str(&instruction.content);
					tracing::debug!(key = %instruction.key, "inserted entry");
					index += 1;
					started = false;
				}
				Scan::Duplicate(code) => {
					return Err(IndigenError::DuplicateKey {
						code,
						file: origin.display().to_string(),
					});
				}
			}
		}
		output.push_str(line);
	}

	// Reaching the end of the file with unconsumed instructions means a
	// window was missing or out of order. Fail loudly rather than drop the
	// remaining insertions.
	if let Some(unconsumed) = queue.get(index) {
		return Err(IndigenError::WindowNotFound {
			pattern: unconsumed.start.as_str().to_string(),
			file: origin.display().to_string(),
		});
	}

	Ok(output)
}

/// Patch one file on disk: read the whole file, run the pass in memory, then
/// overwrite the file with the reconstructed buffer. The file is only written
/// after the entire pass has succeeded, so a failed run leaves it untouched.
pub fn patch_file(path: &Path, queue: &[PatchInstruction]) -> IndigenResult<()> {
	let text = std::fs::read_to_string(path)?;
	let patched = apply_patches(&text, queue, path)?;
	std::fs::write(path, patched)?;
	tracing::debug!(file = %path.display(), patches = queue.len(), "patched file");
	Ok(())
}
