use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NamesError;

/// Gender tag of a yearly record, stored as `M` / `F` in the files.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
	#[serde(rename = "M")]
	Male,
	#[serde(rename = "F")]
	Female,
}

impl Gender {
	/// Single-letter code used by the yearly files.
	pub fn code(self) -> char {
		match self {
			Gender::Male => 'M',
			Gender::Female => 'F',
		}
	}

	/// Parses an optional gender filter.
	///
	/// An empty or blank string means "any gender" and yields `None`.
	///
	/// # Errors
	/// Returns `InvalidArgument` for any other unsupported code.
	pub fn parse_optional(value: &str) -> Result<Option<Self>, NamesError> {
		let value = value.trim();
		if value.is_empty() {
			return Ok(None);
		}
		value.parse().map(Some)
	}
}

impl FromStr for Gender {
	type Err = NamesError;

	/// Case-insensitive: `m`, `male`, `boy` / `f`, `female`, `girl`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"m" | "male" | "boy" => Ok(Gender::Male),
			"f" | "female" | "girl" => Ok(Gender::Female),
			other => Err(NamesError::InvalidArgument(format!("unsupported gender code '{other}'"))),
		}
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}
