use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::gender::Gender;
use super::record::{capitalize, YearRecord};
use super::store::DatasetStore;
use crate::error::{NamesError, Result};

/// Upper bound on names or surnames generated by one request.
pub const MAX_NAMES_PER_REQUEST: usize = 100;

/// Validates a batch size.
///
/// # Errors
/// Returns `InvalidArgument` if `count` is 0 or above [`MAX_NAMES_PER_REQUEST`].
pub fn check_count(count: usize) -> Result<usize> {
	if !(1..=MAX_NAMES_PER_REQUEST).contains(&count) {
		return Err(NamesError::InvalidArgument(format!(
			"count must be between 1 and {MAX_NAMES_PER_REQUEST}, got {count}"
		)));
	}
	Ok(count)
}

/// Parameters of a batch of random names.
///
/// # Invariants
/// - `1 <= count <= MAX_NAMES_PER_REQUEST`; the count only changes through [`NameRequest::set_count`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRequest {
	/// Restrict first names to this gender; `None` draws from every record.
	pub gender: Option<Gender>,

	/// Append a random surname to each first name.
	pub include_surname: bool,

	count: usize,
}

impl Default for NameRequest {
	fn default() -> Self {
		Self { gender: None, include_surname: false, count: 1 }
	}
}

impl NameRequest {
	pub fn new(gender: Option<Gender>, include_surname: bool) -> Self {
		Self { gender, include_surname, count: 1 }
	}

	pub fn count(&self) -> usize {
		self.count
	}

	/// Sets the number of names to generate.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `count` is 0 or above [`MAX_NAMES_PER_REQUEST`].
	pub fn set_count(&mut self, count: usize) -> Result<()> {
		self.count = check_count(count)?;
		Ok(())
	}
}

/// A first name drawn from the corpus, with the year it was drawn from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NameDraw {
	pub year: u16,
	pub record: YearRecord,
}

/// Random first-name and surname sampling over a [`DatasetStore`].
///
/// Sampling is uniform over records, never weighted by birth counts:
/// a year is drawn uniformly from the supported range, then a record
/// uniformly from that year's (optionally gender-filtered) records.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
	store: &'a DatasetStore,
}

impl<'a> Generator<'a> {
	pub fn new(store: &'a DatasetStore) -> Self {
		Self { store }
	}

	/// Draws one first-name record using the given random source.
	///
	/// # Errors
	/// - `DatasetMissing` if the drawn year has no file
	/// - `DataUnavailable` if the year holds no record of the requested gender
	pub fn random_record_with<R: Rng>(&self, rng: &mut R, gender: Option<Gender>) -> Result<NameDraw> {
		let year = rng.random_range(self.store.years());
		let dataset = self.store.load_year(year)?;

		let population = dataset.filter(gender);
		let record = population.choose(rng).ok_or_else(|| {
			let wanted = gender.map_or_else(|| "any".to_owned(), |g| g.to_string());
			NamesError::DataUnavailable(format!("no {wanted} names recorded in {year}"))
		})?;
		debug!("drew {} ({}) from {year} out of {}", record.name, record.gender, population.len());

		Ok(NameDraw { year, record: (*record).clone() })
	}

	/// Random first name, optionally followed by a space and a random surname.
	pub fn random_name_with<R: Rng>(&self, rng: &mut R, gender: Option<Gender>, include_surname: bool) -> Result<String> {
		let mut name = self.random_record_with(rng, gender)?.record.name;
		if include_surname {
			name.push(' ');
			name.push_str(&self.random_surname_with(rng)?);
		}
		Ok(name)
	}

	/// [`Generator::random_name_with`] using the thread-local random source.
	pub fn random_name(&self, gender: Option<Gender>, include_surname: bool) -> Result<String> {
		self.random_name_with(&mut rand::rng(), gender, include_surname)
	}

	/// Random surname, capitalized (`"SMITH"` → `"Smith"`).
	///
	/// # Errors
	/// Returns `DataUnavailable` if the trimmed surname population is empty.
	pub fn random_surname_with<R: Rng>(&self, rng: &mut R) -> Result<String> {
		let surnames = self.store.load_surnames()?;
		Self::pick_surname(rng, &surnames)
	}

	/// [`Generator::random_surname_with`] using the thread-local random source.
	pub fn random_surname(&self) -> Result<String> {
		self.random_surname_with(&mut rand::rng())
	}

	/// Generates `request.count()` independent names.
	///
	/// The surname file is read once for the whole batch.
	pub fn random_names_with<R: Rng>(&self, rng: &mut R, request: &NameRequest) -> Result<Vec<String>> {
		let surnames = if request.include_surname { Some(self.store.load_surnames()?) } else { None };

		(0..request.count())
			.map(|_| -> Result<String> {
				let mut name = self.random_record_with(rng, request.gender)?.record.name;
				if let Some(surnames) = &surnames {
					name.push(' ');
					name.push_str(&Self::pick_surname(rng, surnames)?);
				}
				Ok(name)
			})
			.collect()
	}

	pub fn random_names(&self, request: &NameRequest) -> Result<Vec<String>> {
		self.random_names_with(&mut rand::rng(), request)
	}

	/// Generates `count` independent surnames.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `count` is 0 or above [`MAX_NAMES_PER_REQUEST`].
	pub fn random_surnames(&self, count: usize) -> Result<Vec<String>> {
		let count = check_count(count)?;
		let surnames = self.store.load_surnames()?;
		let mut rng = rand::rng();
		(0..count).map(|_| Self::pick_surname(&mut rng, &surnames)).collect()
	}

	fn pick_surname<R: Rng>(rng: &mut R, surnames: &[String]) -> Result<String> {
		surnames
			.choose(rng)
			.map(|surname| capitalize(surname))
			.ok_or_else(|| NamesError::DataUnavailable("surname population is empty".to_owned()))
	}
}
