use log::warn;
use serde::{Deserialize, Serialize};

use super::gender::Gender;
use super::store::DatasetStore;
use crate::error::{NamesError, Result};

/// Births recorded for a name in one year.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearCount {
	pub year: u16,
	pub births: u32,
}

/// One heatmap cell: a year placed by decade and position within the decade.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecadeCell {
	pub decade: u16,
	pub year_in_decade: u16,
	pub births: u32,
}

/// Per-year birth counts of a name over an inclusive year range.
///
/// # Invariants
/// - `points` holds exactly one entry per year of the range, ascending, no gaps
/// - Years without a backing file appear in `points` with 0 births
///   and are also listed in `missing_years`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PopularitySeries {
	pub name: String,
	pub gender: Gender,
	pub points: Vec<YearCount>,
	pub missing_years: Vec<u16>,
}

impl PopularitySeries {
	fn empty(name: &str, gender: Gender) -> Self {
		Self { name: name.to_owned(), gender, points: Vec::new(), missing_years: Vec::new() }
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Sum of births over the whole range.
	pub fn total(&self) -> u64 {
		self.points.iter().map(|point| u64::from(point.births)).sum()
	}

	/// Year with the most births; the earliest one on ties.
	///
	/// Returns `None` for an empty series or one where every count is 0.
	pub fn peak(&self) -> Option<YearCount> {
		self.points
			.iter()
			.filter(|point| point.births > 0)
			.fold(None, |best: Option<YearCount>, point| match best {
				Some(b) if b.births >= point.births => Some(b),
				_ => Some(*point),
			})
	}

	/// Series laid out by decade, for a heatmap renderer.
	pub fn decade_cells(&self) -> Vec<DecadeCell> {
		self.points
			.iter()
			.map(|point| DecadeCell {
				decade: point.year / 10 * 10,
				year_in_decade: point.year % 10,
				births: point.births,
			})
			.collect()
	}
}

impl DatasetStore {
	/// Births of `name` / `gender` for every year in `start_year..=end_year`.
	///
	/// # Behavior
	/// - `end_year < start_year` yields an empty series.
	/// - Every year produces an entry, with 0 births when the name is absent.
	/// - Years with no file are logged and recorded in `missing_years`.
	///
	/// # Errors
	/// - `InvalidArgument` if either bound lies outside the supported range
	/// - `Io` if an existing yearly file cannot be read
	pub fn popularity(&self, name: &str, gender: Gender, start_year: u16, end_year: u16) -> Result<PopularitySeries> {
		let mut series = PopularitySeries::empty(name, gender);
		if end_year < start_year {
			return Ok(series);
		}

		for year in [start_year, end_year] {
			if !self.contains_year(year) {
				return Err(NamesError::InvalidArgument(format!(
					"year {year} outside supported range {}..={}",
					self.first_year(),
					self.last_year()
				)));
			}
		}

		series.points.reserve(usize::from(end_year - start_year) + 1);
		for year in start_year..=end_year {
			let births = match self.find(year, name, gender) {
				Ok(outcome) => outcome.births(),
				Err(NamesError::DatasetMissing { .. }) => {
					warn!("no dataset for {year}; counting {name}/{gender} as 0");
					series.missing_years.push(year);
					0
				}
				Err(e) => return Err(e),
			};
			series.points.push(YearCount { year, births });
		}

		Ok(series)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn series(counts: &[(u16, u32)]) -> PopularitySeries {
		PopularitySeries {
			name: "Emma".to_owned(),
			gender: Gender::Female,
			points: counts.iter().map(|&(year, births)| YearCount { year, births }).collect(),
			missing_years: Vec::new(),
		}
	}

	#[test]
	fn peak_prefers_earliest_maximum() {
		let s = series(&[(1988, 3), (1989, 7), (1990, 7)]);
		assert_eq!(s.peak(), Some(YearCount { year: 1989, births: 7 }));
		assert_eq!(series(&[(1988, 0)]).peak(), None);
		assert_eq!(s.total(), 17);
	}

	#[test]
	fn decade_cells_split_years() {
		let cells = series(&[(1989, 4), (1990, 5)]).decade_cells();
		assert_eq!(
			cells,
			vec![
				DecadeCell { decade: 1980, year_in_decade: 9, births: 4 },
				DecadeCell { decade: 1990, year_in_decade: 0, births: 5 },
			]
		);
	}
}
