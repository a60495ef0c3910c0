use thiserror::Error;

/// Errors raised by the dataset store, the popularity sweep and the samplers.
///
/// `DatasetMissing` and `MalformedRecord` are mostly recovered internally:
/// a missing year reads as zero births and a malformed line is skipped.
/// They are still surfaced by the lower-level APIs so callers can tell
/// "no data" apart from "zero population".
#[derive(Debug, Error)]
pub enum NamesError {
	#[error("no dataset for year {year}")]
	DatasetMissing { year: u16 },

	#[error("malformed record at line {line}: {reason}")]
	MalformedRecord { line: usize, reason: String },

	#[error("data unavailable: {0}")]
	DataUnavailable(String),

	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("configuration error: {0}")]
	Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NamesError>;
