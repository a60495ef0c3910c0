//! Top-level module for the name corpus.
//!
//! This module provides:
//! - Gender tags as stored in the yearly files (`Gender`)
//! - Parsed yearly records and lookup outcomes (`YearRecord`, `YearDataset`, `Lookup`)
//! - The read-only corpus view (`DatasetStore`)
//! - Year-range aggregation (`PopularitySeries`)
//! - Random first-name and surname sampling (`Generator`)

/// `M` / `F` gender tag with case-insensitive parsing.
pub mod gender;

/// Yearly record parsing and single-year linear lookup.
pub mod record;

/// Directory-backed corpus: year range, year loading, optional cache, surnames.
pub mod store;

/// Per-year birth series over an inclusive range of years.
pub mod popularity;

/// Uniform random sampling of first names and surnames.
pub mod generator;
