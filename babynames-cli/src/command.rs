use babynames_core::{Gender, NameRequest, NamesError, Result, check_count};

pub const USAGE: &str = "\
Commands:
  p NAME GENDER START END   births of NAME (gender m/f) for each year START..=END
  r [m|f] [COUNT] [s]       random first names, with surnames when 's' is given
  r [COUNT] s               random surnames only
  q                         quit";

/// One parsed line of the interactive prompt.
#[derive(Debug, PartialEq)]
pub enum Command {
	Popularity { name: String, gender: Gender, start_year: u16, end_year: u16 },
	Names(NameRequest),
	Surnames(usize),
	Quit,
}

impl Command {
	/// Parses a prompt line.
	///
	/// # Errors
	/// Returns `InvalidArgument` for unknown commands or malformed arguments.
	pub fn parse(line: &str) -> Result<Self> {
		let tokens: Vec<&str> = line.split_whitespace().collect();
		match tokens.as_slice() {
			["q"] => Ok(Command::Quit),
			["p", name, gender, start, end] => Ok(Command::Popularity {
				name: (*name).to_owned(),
				gender: gender.parse()?,
				start_year: parse_number(start)?,
				end_year: parse_number(end)?,
			}),
			["r", rest @ ..] => Self::parse_random(rest),
			_ => Err(invalid(line)),
		}
	}

	fn parse_random(tokens: &[&str]) -> Result<Self> {
		let names = |gender: Option<Gender>, count: usize, include_surname: bool| -> Result<Self> {
			let mut request = NameRequest::new(gender, include_surname);
			request.set_count(count)?;
			Ok(Command::Names(request))
		};

		match tokens {
			[] => names(None, 1, false),
			["s"] => Ok(Command::Surnames(1)),
			[count] if is_count(count) => names(None, parse_number(count)?, false),
			[gender] => names(Some(gender.parse()?), 1, false),
			[count, "s"] if is_count(count) => Ok(Command::Surnames(check_count(parse_number(count)?)?)),
			[gender, "s"] => names(Some(gender.parse()?), 1, true),
			[gender, count] if is_count(count) => names(Some(gender.parse()?), parse_number(count)?, false),
			[gender, count, "s"] if is_count(count) => names(Some(gender.parse()?), parse_number(count)?, true),
			_ => Err(invalid(&tokens.join(" "))),
		}
	}
}

fn is_count(token: &str) -> bool {
	!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T> {
	token
		.parse()
		.map_err(|_| NamesError::InvalidArgument(format!("'{token}' is not a valid number")))
}

fn invalid(input: &str) -> NamesError {
	NamesError::InvalidArgument(format!("unrecognized input '{input}'"))
}
