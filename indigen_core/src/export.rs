use std::collections::HashMap;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::IndigenError;
use crate::IndigenResult;

const FIELDNAMES: [&str; 8] = [
	"ocid",
	"subject",
	"code",
	"result",
	"buyer_id",
	"procuring_entity_id",
	"tenderer_id",
	"created_at",
];

/// Subjects carrying per-identifier results in the input document, paired
/// with the output column their identifier lands in.
const SUBJECTS: [(&str, &str); 3] = [
	("Buyer", "buyer_id"),
	("ProcuringEntity", "procuring_entity_id"),
	("Tenderer", "tenderer_id"),
];

/// One output row. Identifier columns are empty except for the column
/// matching the row's subject.
#[derive(Debug, Default, PartialEq)]
pub struct ExportRow {
	pub ocid: String,
	pub subject: String,
	pub code: String,
	pub result: String,
	pub buyer_id: String,
	pub procuring_entity_id: String,
	pub tenderer_id: String,
	pub created_at: String,
}

impl ExportRow {
	/// The columns that identify a row for deduplication: the result value
	/// and timestamp are excluded so a re-export never duplicates a row whose
	/// result merely changed.
	fn dedup_key(&self) -> (String, String, String, String, String) {
		(
			self.ocid.clone(),
			self.code.clone(),
			self.buyer_id.clone(),
			self.procuring_entity_id.clone(),
			self.tenderer_id.clone(),
		)
	}

	fn to_csv_line(&self) -> String {
		let fields = [
			&self.ocid,
			&self.subject,
			&self.code,
			&self.result,
			&self.buyer_id,
			&self.procuring_entity_id,
			&self.tenderer_id,
			&self.created_at,
		];
		let escaped: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
		escaped.join(",")
	}
}

/// Quote a CSV field only when it contains a delimiter, quote, or newline.
fn escape_field(field: &str) -> String {
	if field.contains(',') || field.contains('"') || field.contains('\n') {
		format!("\"{}\"", field.replace('"', "\"\""))
	} else {
		field.to_string()
	}
}

/// Split one CSV line of the fixed 8-column schema, honoring quoted fields.
fn split_csv_line(line: &str) -> Vec<String> {
	let mut fields = Vec::new();
	let mut field = String::new();
	let mut in_quotes = false;
	let mut chars = line.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'"' if in_quotes => {
				if chars.peek() == Some(&'"') {
					chars.next();
					field.push('"');
				} else {
					in_quotes = false;
				}
			}
			'"' => in_quotes = true,
			',' if !in_quotes => {
				fields.push(std::mem::take(&mut field));
			}
			_ => field.push(c),
		}
	}
	fields.push(field);
	fields
}

/// The map id keying `Maps` entries for a subject and code. Buyer and
/// procuring-entity maps are per-code; tenderer maps are shared across all
/// tenderer codes.
fn map_id(subject: &str, code: &str) -> String {
	match subject {
		"Tenderer" => "ocid_tenderer".to_string(),
		_ => format!("ocid_{}_{}", subject.to_lowercase(), code.to_lowercase()),
	}
}

fn parse_error(path: &Path, reason: impl ToString) -> IndigenError {
	IndigenError::ResultsParse {
		path: path.display().to_string(),
		reason: reason.to_string(),
	}
}

/// Render a result value the way it appears in the JSON document, without
/// quoting strings.
fn render_result(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Convert a results JSON document into CSV rows and append them to
/// `outfile`, skipping rows already present. The header is written only when
/// the file is created. Returns the number of rows written.
pub fn export_to_csv(infile: &Path, outfile: &Path) -> IndigenResult<usize> {
	let created_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
	export_to_csv_at(infile, outfile, &created_at)
}

/// [`export_to_csv`] with an explicit `created_at` timestamp.
pub fn export_to_csv_at(
	infile: &Path,
	outfile: &Path,
	created_at: &str,
) -> IndigenResult<usize> {
	let exists = outfile.is_file();

	// Rows already exported in previous runs.
	let mut seen = HashSet::new();
	if exists {
		let existing = std::fs::read_to_string(outfile)?;
		for line in existing.lines().skip(1) {
			let fields = split_csv_line(line);
			if fields.len() == FIELDNAMES.len() {
				seen.insert((
					fields[0].clone(),
					fields[2].clone(),
					fields[4].clone(),
					fields[5].clone(),
					fields[6].clone(),
				));
			}
		}
	}

	let content = std::fs::read_to_string(infile)?;
	let data: Value =
		serde_json::from_str(&content).map_err(|e| parse_error(infile, e))?;

	// Invert Maps into identifier -> ocids, per map id. Buyer and
	// procuring-entity maps hold a single identifier per ocid, tenderer maps
	// hold a list.
	let mut identifier_to_ocids: HashMap<String, HashMap<String, Vec<String>>> = HashMap::new();
	if let Some(maps) = data.get("Maps").and_then(Value::as_object) {
		for (id, mapping) in maps {
			let inverted = identifier_to_ocids.entry(id.clone()).or_default();
			let Some(mapping) = mapping.as_object() else {
				return Err(parse_error(infile, format!("map `{id}` is not an object")));
			};
			for (ocid, identifiers) in mapping {
				match identifiers {
					Value::String(identifier) => {
						inverted
							.entry(identifier.clone())
							.or_default()
							.push(ocid.clone());
					}
					Value::Array(identifiers) => {
						for identifier in identifiers {
							if let Value::String(identifier) = identifier {
								inverted
									.entry(identifier.clone())
									.or_default()
									.push(ocid.clone());
							}
						}
					}
					_ => {}
				}
			}
		}
	}

	let mut rows = Vec::new();

	// Per-ocid results.
	if let Some(ocids) = data.get("OCID").and_then(Value::as_object) {
		for (ocid, results) in ocids {
			let Some(results) = results.as_object() else {
				continue;
			};
			for (code, result) in results {
				let row = ExportRow {
					ocid: ocid.clone(),
					subject: "OCID".to_string(),
					code: code.clone(),
					result: render_result(result),
					created_at: created_at.to_string(),
					..ExportRow::default()
				};
				if !seen.contains(&row.dedup_key()) {
					rows.push(row);
				}
			}
		}
	}

	// Per-identifier results, joined back to ocids through the maps.
	for (subject, column) in SUBJECTS {
		let Some(identifiers) = data.get(subject).and_then(Value::as_object) else {
			continue;
		};
		for (identifier, results) in identifiers {
			let Some(results) = results.as_object() else {
				continue;
			};
			for (code, result) in results {
				let ocids = identifier_to_ocids
					.get(&map_id(subject, code))
					.and_then(|inverted| inverted.get(identifier));
				let Some(ocids) = ocids else {
					continue;
				};
				for ocid in ocids {
					let mut row = ExportRow {
						ocid: ocid.clone(),
						subject: subject.to_string(),
						code: code.clone(),
						result: render_result(result),
						created_at: created_at.to_string(),
						..ExportRow::default()
					};
					match column {
						"buyer_id" => row.buyer_id = identifier.clone(),
						"procuring_entity_id" => row.procuring_entity_id = identifier.clone(),
						_ => row.tenderer_id = identifier.clone(),
					}
					if !seen.contains(&row.dedup_key()) {
						seen.insert(row.dedup_key());
						rows.push(row);
					}
				}
			}
		}
	}

	let mut file = OpenOptions::new().create(true).append(true).open(outfile)?;
	if !exists {
		writeln!(file, "{}", FIELDNAMES.join(","))?;
	}
	for row in &rows {
		writeln!(file, "{}", row.to_csv_line())?;
	}

	tracing::debug!(rows = rows.len(), file = %outfile.display(), "exported results");
	Ok(rows.len())
}
