use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NamesError, Result};
use crate::io;

/// Location and layout of the name corpus.
///
/// # Defaults
/// - `data_dir`: `./names_files`
/// - `surname_file`: `surnames.csv`, relative to `data_dir`
/// - year range: discovered from the `yobNNNN.txt` files present
/// - 3 header rows and 3 trailing rows excluded from the surname population
/// - year cache disabled
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
	/// Directory holding one `yob{YEAR}.txt` file per birth-year.
	pub data_dir: PathBuf,

	/// Surname reference file. Relative paths resolve against `data_dir`.
	pub surname_file: PathBuf,

	/// First supported year (inclusive). Discovered when `None`.
	pub first_year: Option<u16>,

	/// Last supported year (inclusive). Discovered when `None`.
	pub last_year: Option<u16>,

	/// Leading rows of the surname file that are not surnames.
	pub surname_header_rows: usize,

	/// Trailing rows of the surname file that are not surnames.
	pub surname_trailer_rows: usize,

	/// Keep parsed yearly datasets in memory once loaded.
	pub cache_years: bool,
}

impl Default for DatasetConfig {
	fn default() -> Self {
		Self {
			data_dir: PathBuf::from("./names_files"),
			surname_file: PathBuf::from("surnames.csv"),
			first_year: None,
			last_year: None,
			surname_header_rows: 3,
			surname_trailer_rows: 3,
			cache_years: false,
		}
	}
}

impl DatasetConfig {
	/// Creates a configuration rooted at `data_dir`, all other fields defaulted.
	pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
		Self {
			data_dir: data_dir.as_ref().to_path_buf(),
			..Self::default()
		}
	}

	/// Pins the supported year range instead of discovering it.
	pub fn with_years(mut self, first_year: u16, last_year: u16) -> Self {
		self.first_year = Some(first_year);
		self.last_year = Some(last_year);
		self
	}

	/// Loads a configuration from a JSON file. Missing fields take their defaults.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = io::read_text(path)?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Default configuration overlaid with `BABYNAMES_*` environment variables.
	///
	/// # Errors
	/// Returns `InvalidArgument` if a numeric or boolean variable cannot be parsed.
	pub fn from_env() -> Result<Self> {
		let mut config = Self::default();

		if let Ok(dir) = env::var("BABYNAMES_DATA_DIR") {
			config.data_dir = PathBuf::from(dir);
		}
		if let Ok(file) = env::var("BABYNAMES_SURNAME_FILE") {
			config.surname_file = PathBuf::from(file);
		}
		if let Some(year) = parse_env::<u16>("BABYNAMES_FIRST_YEAR")? {
			config.first_year = Some(year);
		}
		if let Some(year) = parse_env::<u16>("BABYNAMES_LAST_YEAR")? {
			config.last_year = Some(year);
		}
		if let Some(cache) = parse_env::<bool>("BABYNAMES_CACHE")? {
			config.cache_years = cache;
		}

		Ok(config)
	}

	/// Absolute or `data_dir`-relative path of the surname file.
	pub fn surname_path(&self) -> PathBuf {
		if self.surname_file.is_absolute() {
			self.surname_file.clone()
		} else {
			self.data_dir.join(&self.surname_file)
		}
	}
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
	match env::var(key) {
		Ok(value) => value
			.trim()
			.parse()
			.map(Some)
			.map_err(|_| NamesError::InvalidArgument(format!("{key}={value} cannot be parsed"))),
		Err(_) => Ok(None),
	}
}
