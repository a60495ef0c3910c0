use std::fs;
use std::path::Path;

use babynames_core::model::generator::{MAX_NAMES_PER_REQUEST, NameDraw};
use babynames_core::{DatasetConfig, DatasetStore, Gender, Generator, Lookup, NameRequest, NamesError, YearCount};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SURNAMES: &str = "\
\u{feff}Table: Top 1000 surnames,,
Source: 2010 Census,,
SURNAME,RANK,COUNT
GARCIA,1,1166120
NGUYEN,2,437645
O'NEIL,3,100000
Note: counts rounded,,
Footnote,,
End of table,,
";

/// Corpus with 1988 and 1989 lacking Emma, 1990 holding her, and 1991 missing.
fn write_corpus(dir: &Path) {
	fs::write(dir.join("yob1988.txt"), "Jessica,F,51000\nMichael,M,64000\nNoah,M,300\n").unwrap();
	fs::write(dir.join("yob1989.txt"), "Jessica,F,47000\nMichael,M,65000\n").unwrap();
	fs::write(dir.join("yob1990.txt"), "\u{feff}Emma,F,500\nNoah,M,450\nthis line is broken\nAva,F,120\n").unwrap();
	fs::write(dir.join("yob1992.txt"), "Emma,F,640\nEmma,M,7\nLiam,M,90\n").unwrap();
	fs::write(dir.join("surnames.csv"), SURNAMES).unwrap();
}

fn open(dir: &Path) -> DatasetStore {
	DatasetStore::open(&DatasetConfig::new(dir)).unwrap()
}

#[test]
fn lookup_is_case_insensitive() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	assert_eq!(store.lookup(1990, "emma", "f".parse().unwrap()), 500);
	assert_eq!(store.lookup(1990, "NOAH", Gender::Male), 450);
}

#[test]
fn lookup_returns_exact_births_or_zero() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	assert_eq!(store.lookup(1992, "Emma", Gender::Female), 640);
	assert_eq!(store.lookup(1992, "Emma", Gender::Male), 7);
	assert_eq!(store.lookup(1989, "Emma", Gender::Female), 0);
	assert_eq!(store.lookup(1991, "Emma", Gender::Female), 0);
	assert_eq!(store.lookup(1850, "Emma", Gender::Female), 0);
	assert_eq!(store.find(1989, "Emma", Gender::Female).unwrap(), Lookup::NotFound);
}

#[test]
fn non_utf8_line_does_not_hide_the_rest_of_its_year() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	fs::write(dir.path().join("yob1990.txt"), b"Emma,F,500\nNoah,M,450\nJos\xe9,M,12\n").unwrap();
	let store = open(dir.path());

	assert_eq!(store.find(1990, "Emma", Gender::Female).unwrap(), Lookup::Found(500));
	assert_eq!(store.lookup(1990, "Noah", Gender::Male), 450);
	let series = store.popularity("Emma", Gender::Female, 1989, 1990).unwrap();
	assert_eq!(series.points[1], YearCount { year: 1990, births: 500 });
	assert!(series.missing_years.is_empty());
}

#[test]
fn lookup_is_idempotent() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let first = store.lookup(1988, "Michael", Gender::Male);
	let second = store.lookup(1988, "Michael", Gender::Male);
	assert_eq!(first, 64000);
	assert_eq!(first, second);
}

#[test]
fn popularity_fills_absent_years_with_zero() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let series = store.popularity("Emma", Gender::Female, 1988, 1990).unwrap();
	assert_eq!(
		series.points,
		vec![
			YearCount { year: 1988, births: 0 },
			YearCount { year: 1989, births: 0 },
			YearCount { year: 1990, births: 500 },
		]
	);
	assert!(series.missing_years.is_empty());
}

#[test]
fn popularity_reports_missing_years() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let series = store.popularity("emma", Gender::Female, 1990, 1992).unwrap();
	let births: Vec<u32> = series.points.iter().map(|p| p.births).collect();
	assert_eq!(births, vec![500, 0, 640]);
	assert_eq!(series.missing_years, vec![1991]);
	assert_eq!(series.peak(), Some(YearCount { year: 1992, births: 640 }));
}

#[test]
fn popularity_has_one_ascending_entry_per_year_and_agrees_with_lookup() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	for (start, end) in [(1988, 1988), (1988, 1992), (1989, 1991)] {
		let series = store.popularity("Noah", Gender::Male, start, end).unwrap();
		assert_eq!(series.len(), usize::from(end - start) + 1);
		assert!(series.points.windows(2).all(|w| w[0].year + 1 == w[1].year));
		assert_eq!(series.points.first().map(|p| p.year), Some(start));
		for point in &series.points {
			assert_eq!(point.births, store.lookup(point.year, "Noah", Gender::Male));
		}
	}
}

#[test]
fn popularity_with_inverted_range_is_empty() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let series = store.popularity("Emma", Gender::Female, 1990, 1988).unwrap();
	assert!(series.is_empty());
}

#[test]
fn popularity_rejects_years_outside_range() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let result = store.popularity("Emma", Gender::Female, 1980, 1990);
	assert!(matches!(result, Err(NamesError::InvalidArgument(_))));
}

#[test]
fn cached_and_uncached_stores_agree() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let plain = open(dir.path());
	let cached = DatasetStore::open(&DatasetConfig { cache_years: true, ..DatasetConfig::new(dir.path()) }).unwrap();

	let a = plain.popularity("Emma", Gender::Female, 1988, 1992).unwrap();
	let b = cached.popularity("Emma", Gender::Female, 1988, 1992).unwrap();
	let c = cached.popularity("Emma", Gender::Female, 1988, 1992).unwrap();
	assert_eq!(a, b);
	assert_eq!(b, c);
}

#[test]
fn gender_filtered_names_match_their_year_record() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	// Without 1991, whose file is missing.
	let store = DatasetStore::open(&DatasetConfig::new(dir.path()).with_years(1988, 1990)).unwrap();
	let generator = Generator::new(&store);
	let mut rng = StdRng::seed_from_u64(7);

	for _ in 0..50 {
		let NameDraw { year, record } = generator.random_record_with(&mut rng, Some(Gender::Female)).unwrap();
		assert_eq!(record.gender, Gender::Female);
		assert!(store.lookup(year, &record.name, Gender::Female) > 0);

		let name = generator.random_name_with(&mut rng, Some(Gender::Female), false).unwrap();
		assert!(["Jessica", "Emma", "Ava"].contains(&name.as_str()), "{name}");
	}
}

#[test]
fn unfiltered_sampling_covers_both_genders() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = DatasetStore::open(&DatasetConfig::new(dir.path()).with_years(1990, 1990)).unwrap();
	let generator = Generator::new(&store);
	let mut rng = StdRng::seed_from_u64(42);

	let mut seen = std::collections::HashSet::new();
	for _ in 0..200 {
		seen.insert(generator.random_name_with(&mut rng, None, false).unwrap());
	}
	let expected: std::collections::HashSet<String> = ["Emma", "Noah", "Ava"].iter().map(|s| s.to_string()).collect();
	assert_eq!(seen, expected);
}

#[test]
fn empty_gender_population_is_data_unavailable() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	// 1989 has no male records.
	fs::write(dir.path().join("yob1989.txt"), "Jessica,F,47000\n").unwrap();
	let store = DatasetStore::open(&DatasetConfig::new(dir.path()).with_years(1989, 1989)).unwrap();
	let generator = Generator::new(&store);

	let result = generator.random_name(Some(Gender::Male), false);
	assert!(matches!(result, Err(NamesError::DataUnavailable(_))));
}

#[test]
fn surnames_exclude_boundary_rows_and_are_capitalized() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());
	let generator = Generator::new(&store);
	let mut rng = StdRng::seed_from_u64(3);

	for _ in 0..100 {
		let surname = generator.random_surname_with(&mut rng).unwrap();
		assert!(["Garcia", "Nguyen", "O'neil"].contains(&surname.as_str()), "{surname}");
	}
}

#[test]
fn full_names_join_first_name_and_surname() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = DatasetStore::open(&DatasetConfig::new(dir.path()).with_years(1990, 1990)).unwrap();
	let generator = Generator::new(&store);

	let mut request = NameRequest::new(Some(Gender::Male), true);
	request.set_count(10).unwrap();
	let names = generator.random_names(&request).unwrap();

	assert_eq!(names.len(), 10);
	for name in names {
		let (first, last) = name.split_once(' ').unwrap();
		assert_eq!(first, "Noah");
		assert!(["Garcia", "Nguyen", "O'neil"].contains(&last), "{last}");
	}
}

#[test]
fn surname_only_batches() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());

	let surnames = Generator::new(&store).random_surnames(5).unwrap();
	assert_eq!(surnames.len(), 5);
}

#[test]
fn surname_batches_share_the_request_bound() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	let store = open(dir.path());
	let generator = Generator::new(&store);

	assert_eq!(generator.random_surnames(MAX_NAMES_PER_REQUEST).unwrap().len(), MAX_NAMES_PER_REQUEST);
	assert!(matches!(generator.random_surnames(0), Err(NamesError::InvalidArgument(_))));
	assert!(matches!(generator.random_surnames(MAX_NAMES_PER_REQUEST + 1), Err(NamesError::InvalidArgument(_))));
}

#[test]
fn missing_surname_file_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	write_corpus(dir.path());
	fs::remove_file(dir.path().join("surnames.csv")).unwrap();
	let store = open(dir.path());

	assert!(matches!(Generator::new(&store).random_surname(), Err(NamesError::Io(_))));
}
