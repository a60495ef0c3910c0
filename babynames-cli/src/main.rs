mod command;

use std::io::{self, BufRead, Write};

use babynames_core::{DatasetConfig, DatasetStore, Generator, NamesError};
use command::{Command, USAGE};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn logger(env: env_logger::Env<'_>) -> env_logger::Builder {
	env_logger::Builder::from_env(env.default_filter_or(DEFAULT_LOG_FILTER))
}

fn run(store: &DatasetStore, command: Command) -> Result<(), NamesError> {
	let generator = Generator::new(store);
	match command {
		Command::Popularity { name, gender, start_year, end_year } => {
			let series = store.popularity(&name, gender, start_year, end_year)?;
			for point in &series.points {
				if series.missing_years.contains(&point.year) {
					println!("{}: no data", point.year);
				} else {
					println!("{}: {}", point.year, point.births);
				}
			}
			match series.peak() {
				Some(peak) => println!("{name} ({gender}) peaked in {} with {} births", peak.year, peak.births),
				None => println!("{name} ({gender}) was not recorded between {start_year} and {end_year}"),
			}
		}
		Command::Names(request) => {
			for name in generator.random_names(&request)? {
				println!("{name}");
			}
		}
		Command::Surnames(count) => {
			for surname in generator.random_surnames(count)? {
				println!("{surname}");
			}
		}
		Command::Quit => (),
	}
	Ok(())
}

fn main() -> anyhow::Result<()> {
	logger(env_logger::Env::default()).init();

	// Dataset location and year range come from BABYNAMES_* variables
	let store = DatasetStore::open(&DatasetConfig::from_env()?)?;
	println!("Baby names {}..={}", store.first_year(), store.last_year());
	println!("{USAGE}");

	let stdin = io::stdin();
	let mut stdout = io::stdout();
	loop {
		print!("> ");
		stdout.flush()?;

		let mut line = String::new();
		if stdin.lock().read_line(&mut line)? == 0 {
			break;
		}

		match Command::parse(&line) {
			Ok(Command::Quit) => break,
			Ok(command) => {
				if let Err(e) = run(&store, command) {
					println!("ERROR: {e}");
				}
			}
			Err(e) => println!("ERROR: {e}\n{USAGE}"),
		}
	}

	Ok(())
}
