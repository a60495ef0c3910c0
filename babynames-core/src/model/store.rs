use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{error, info};

use super::gender::Gender;
use super::record::{Lookup, YearDataset};
use crate::config::DatasetConfig;
use crate::error::{NamesError, Result};
use crate::io;

/// Read-only view over a directory of yearly files and a surname file.
///
/// # Responsibilities
/// - Resolve the supported year range (pinned by configuration or discovered on disk)
/// - Load a year's records, optionally through a read-through cache
/// - Answer single-year frequency lookups
/// - Load the trimmed surname population
///
/// # Invariants
/// - `first_year <= last_year`
/// - A cached year is inserted at most once and never mutated afterwards
#[derive(Debug)]
pub struct DatasetStore {
	data_dir: PathBuf,
	surname_path: PathBuf,
	surname_header_rows: usize,
	surname_trailer_rows: usize,
	first_year: u16,
	last_year: u16,
	cache: Option<RwLock<HashMap<u16, Arc<YearDataset>>>>,
}

impl DatasetStore {
	/// Opens the corpus described by `config`.
	///
	/// # Behavior
	/// - A pinned `first_year` / `last_year` wins over discovery.
	/// - Missing bounds are discovered from the `yobNNNN.txt` files in `data_dir`.
	///
	/// # Errors
	/// - `DataUnavailable` if a bound is not pinned and no yearly file exists
	/// - `InvalidArgument` if the resulting range is inverted
	/// - `Io` if discovery is needed and `data_dir` cannot be listed
	pub fn open(config: &DatasetConfig) -> Result<Self> {
		let data_dir = io::normalize_folder(&config.data_dir);

		let (first_year, last_year) = match (config.first_year, config.last_year) {
			(Some(first), Some(last)) => (first, last),
			(first, last) => {
				let (found_first, found_last) = Self::discover_years(&data_dir)?;
				(first.unwrap_or(found_first), last.unwrap_or(found_last))
			}
		};

		if first_year > last_year {
			return Err(NamesError::InvalidArgument(format!(
				"first year {first_year} is after last year {last_year}"
			)));
		}

		info!("dataset store at {} covers {first_year}..={last_year}", data_dir.display());

		Ok(Self {
			surname_path: config.surname_path(),
			data_dir,
			surname_header_rows: config.surname_header_rows,
			surname_trailer_rows: config.surname_trailer_rows,
			first_year,
			last_year,
			cache: config.cache_years.then(|| RwLock::new(HashMap::new())),
		})
	}

	/// Smallest and largest year with a `yobNNNN.txt` file in `dir`.
	fn discover_years(dir: &Path) -> Result<(u16, u16)> {
		let mut years = io::list_files(dir, "txt")?
			.into_iter()
			.filter_map(|file| io::year_from_filename(&file));

		let first = years
			.next()
			.ok_or_else(|| NamesError::DataUnavailable(format!("no yearly files in {}", dir.display())))?;
		Ok(years.fold((first, first), |(lo, hi), year| (lo.min(year), hi.max(year))))
	}

	/// Supported years, inclusive.
	pub fn years(&self) -> RangeInclusive<u16> {
		self.first_year..=self.last_year
	}

	pub fn first_year(&self) -> u16 {
		self.first_year
	}

	pub fn last_year(&self) -> u16 {
		self.last_year
	}

	pub fn contains_year(&self, year: u16) -> bool {
		self.years().contains(&year)
	}

	/// Path of the yearly file for `year`, whether or not it exists.
	pub fn year_path(&self, year: u16) -> PathBuf {
		io::year_file_path(&self.data_dir, year)
	}

	/// Loads the records of one year.
	///
	/// With the cache enabled, the first successful load of a year is kept
	/// and shared by every later call. Missing years are never cached.
	///
	/// # Errors
	/// - `DatasetMissing` if the year has no file
	/// - `Io` on read failure
	pub fn load_year(&self, year: u16) -> Result<Arc<YearDataset>> {
		let Some(cache) = &self.cache else {
			return Ok(Arc::new(YearDataset::load(year, self.year_path(year))?));
		};

		if let Some(dataset) = cache.read().map_err(|_| poisoned())?.get(&year) {
			return Ok(Arc::clone(dataset));
		}

		// Loaded outside the lock; a concurrent loader may win the insert.
		let loaded = Arc::new(YearDataset::load(year, self.year_path(year))?);
		let mut entries = cache.write().map_err(|_| poisoned())?;
		Ok(Arc::clone(entries.entry(year).or_insert(loaded)))
	}

	/// Frequency lookup that keeps "no data" distinct from "not used".
	///
	/// # Errors
	/// Returns `DatasetMissing` when the year has no file.
	pub fn find(&self, year: u16, name: &str, gender: Gender) -> Result<Lookup> {
		Ok(self.load_year(year)?.lookup(name, gender))
	}

	/// Number of births for `name` / `gender` in `year`.
	///
	/// Returns 0 when no record matches or the year has no file.
	pub fn lookup(&self, year: u16, name: &str, gender: Gender) -> u32 {
		match self.find(year, name, gender) {
			Ok(outcome) => outcome.births(),
			Err(NamesError::DatasetMissing { .. }) => 0,
			Err(e) => {
				error!("lookup of {name}/{gender} in {year} failed: {e}");
				0
			}
		}
	}

	/// Loads the surname population, without header and trailing rows.
	///
	/// Each entry is the raw first column of a data row.
	///
	/// # Errors
	/// - `Io` / `Csv` if the file cannot be read
	/// - `DataUnavailable` if no row remains after trimming
	pub fn load_surnames(&self) -> Result<Vec<String>> {
		let text = io::read_text(&self.surname_path)?;
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.from_reader(text.as_bytes());

		let mut rows = Vec::new();
		for record in reader.records() {
			let record = record?;
			rows.push(record.get(0).unwrap_or_default().trim().to_owned());
		}

		let end = rows.len().saturating_sub(self.surname_trailer_rows);
		let surnames: Vec<String> = rows
			.into_iter()
			.take(end)
			.skip(self.surname_header_rows)
			.filter(|surname| !surname.is_empty())
			.collect();

		if surnames.is_empty() {
			return Err(NamesError::DataUnavailable(format!(
				"no surnames left in {} after trimming",
				self.surname_path.display()
			)));
		}
		Ok(surnames)
	}
}

fn poisoned() -> NamesError {
	NamesError::DataUnavailable("year cache lock poisoned".to_owned())
}
