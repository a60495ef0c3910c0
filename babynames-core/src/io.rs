use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

const BOM: &[u8] = b"\xef\xbb\xbf";

/// Drops a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
	bytes.strip_prefix(BOM).unwrap_or(bytes)
}

/// Reads a whole file as raw bytes, dropping a leading UTF-8 byte order mark.
///
/// No decoding happens here, so one invalid byte cannot fail the whole file.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	File::open(filename)?.read_to_end(&mut contents)?;
	let bom = contents.len() - strip_bom(&contents).len();
	contents.drain(..bom);
	Ok(contents)
}

/// Reads a whole file as UTF-8 text, dropping a leading byte order mark.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	String::from_utf8(read_file(filename)?).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Splits raw bytes on `\n`, dropping a trailing `\r` from each line.
///
/// Lines are left undecoded.
pub(crate) fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
	bytes
		.split(|&b| b == b'\n')
		.map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Path of the yearly file for `year` inside `dir`.
///
/// Example:
/// `names_files` + `1990` → `names_files/yob1990.txt`
pub(crate) fn year_file_path<P: AsRef<Path>>(dir: P, year: u16) -> PathBuf {
	dir.as_ref().join(format!("yob{year}.txt"))
}

/// Extracts the year from a yearly file name.
///
/// Examples:
/// - `"yob1990.txt"` → `Some(1990)`
/// - `"surnames.csv"` → `None`
pub(crate) fn year_from_filename(file_name: &str) -> Option<u16> {
	let stem = Path::new(file_name).file_stem()?.to_str()?;
	let digits = stem.strip_prefix("yob")?;
	if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths).
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	Ok(files)
}
