use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::gender::Gender;
use crate::error::{NamesError, Result};
use crate::io;

/// Outcome of a frequency lookup.
///
/// `NotFound` means no record matched; callers wanting the historical
/// "treat missing as zero" behavior use [`Lookup::births`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
	Found(u32),
	NotFound,
}

impl Lookup {
	/// Birth count, with `NotFound` mapped to 0.
	pub fn births(self) -> u32 {
		match self {
			Lookup::Found(births) => births,
			Lookup::NotFound => 0,
		}
	}

	pub fn is_found(self) -> bool {
		matches!(self, Lookup::Found(_))
	}
}

/// One `name,gender,births` line of a yearly file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct YearRecord {
	pub name: String,
	pub gender: Gender,
	pub births: u32,
}

impl YearRecord {
	/// Parses one line of a yearly file.
	///
	/// # Errors
	/// Returns `MalformedRecord` when the line does not hold exactly three
	/// fields, the gender is not a single `M`/`F` letter, or births is not
	/// a non-negative integer.
	pub fn parse(line: &str, line_number: usize) -> Result<Self> {
		let malformed = |reason: String| NamesError::MalformedRecord { line: line_number, reason };

		let fields: Vec<&str> = line.trim().split(',').collect();
		let [name, gender, births] = fields.as_slice() else {
			return Err(malformed(format!("expected 3 fields, got {}", fields.len())));
		};

		let name = name.trim();
		if name.is_empty() {
			return Err(malformed("empty name".to_owned()));
		}
		let gender = match gender.trim() {
			"M" | "m" => Gender::Male,
			"F" | "f" => Gender::Female,
			other => return Err(malformed(format!("invalid gender '{other}'"))),
		};
		let births = births
			.trim()
			.parse::<u32>()
			.map_err(|e| malformed(format!("invalid births '{births}': {e}")))?;

		Ok(Self { name: name.to_owned(), gender, births })
	}

	/// Case-insensitive exact match on both name and gender.
	///
	/// `lowercase_name` must already be lower-cased.
	fn matches(&self, lowercase_name: &str, gender: Gender) -> bool {
		self.gender == gender && self.name.to_lowercase() == lowercase_name
	}
}

/// All records of one birth-year, in file order.
///
/// # Invariants
/// - Every record parsed cleanly; malformed lines were dropped at load time
/// - (name, gender) pairs are expected to be unique; lookups return the first match
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct YearDataset {
	year: u16,
	records: Vec<YearRecord>,
}

impl YearDataset {
	/// Builds a dataset from the raw bytes of a yearly file.
	///
	/// Each line is decoded on its own. Blank lines are ignored; malformed
	/// lines, including ones that are not valid UTF-8, are logged and skipped.
	pub fn parse<B: AsRef<[u8]>>(year: u16, data: B) -> Self {
		let mut records = Vec::new();
		for (index, bytes) in io::split_lines(io::strip_bom(data.as_ref())).enumerate() {
			let parsed = std::str::from_utf8(bytes)
				.map_err(|e| NamesError::MalformedRecord { line: index + 1, reason: format!("invalid UTF-8: {e}") })
				.and_then(|line| {
					if line.trim().is_empty() { Ok(None) } else { YearRecord::parse(line, index + 1).map(Some) }
				});
			match parsed {
				Ok(Some(record)) => records.push(record),
				Ok(None) => (),
				Err(e) => warn!("yob{year}.txt: skipping {e}"),
			}
		}
		Self { year, records }
	}

	/// Loads a yearly file from disk.
	///
	/// # Errors
	/// - `DatasetMissing` if the file does not exist
	/// - `Io` for any other read failure
	pub fn load<P: AsRef<Path>>(year: u16, path: P) -> Result<Self> {
		let data = match io::read_file(&path) {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(NamesError::DatasetMissing { year });
			}
			Err(e) => return Err(e.into()),
		};
		let dataset = Self::parse(year, &data);
		debug!("loaded {} records for {year}", dataset.records.len());
		Ok(dataset)
	}

	pub fn year(&self) -> u16 {
		self.year
	}

	pub fn records(&self) -> &[YearRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Linear scan for the first record matching `name` and `gender`.
	///
	/// Matching ignores case only; surrounding whitespace is not stripped.
	pub fn lookup(&self, name: &str, gender: Gender) -> Lookup {
		let name = name.to_lowercase();
		self.records
			.iter()
			.find(|record| record.matches(&name, gender))
			.map_or(Lookup::NotFound, |record| Lookup::Found(record.births))
	}

	/// Records of the given gender, or all records when `gender` is `None`.
	pub fn filter(&self, gender: Option<Gender>) -> Vec<&YearRecord> {
		self.records
			.iter()
			.filter(|record| gender.is_none_or(|g| record.gender == g))
			.collect()
	}
}

/// Upper-cases the first letter and lower-cases the rest.
///
/// Examples:
/// - `"SMITH"` → `"Smith"`
/// - `"o'brien"` → `"O'brien"`
pub fn capitalize(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
