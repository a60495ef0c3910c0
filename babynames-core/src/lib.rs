//! Baby-name frequency lookup and random name generation.
//!
//! This crate works over a directory of yearly birth-record files
//! (`yob1880.txt`, `yob1881.txt`, ...) and a surname reference file, and provides:
//! - Per-year frequency lookup of a (name, gender) pair
//! - Popularity series over an inclusive year range
//! - Uniform random sampling of first names (optionally gender-filtered)
//! - Uniform random sampling of surnames
//!
//! Only the high-level API is exposed publicly. File-format helpers
//! are kept internal.

/// Dataset configuration (paths, year range, surname trimming rules).
pub mod config;

/// Error taxonomy shared by every operation of the crate.
pub mod error;

/// Records, dataset store, popularity aggregation and name generation.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use config::DatasetConfig;
pub use error::{NamesError, Result};
pub use model::gender::Gender;
pub use model::generator::{Generator, NameRequest, check_count};
pub use model::popularity::{PopularitySeries, YearCount};
pub use model::record::Lookup;
pub use model::store::DatasetStore;
