use std::time::Duration;

use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GENDERIZE_URL: &str = "https://api.genderize.io";
const AGIFY_URL: &str = "https://api.agify.io";
const NATIONALIZE_URL: &str = "https://api.nationalize.io";

/// Predicted gender for a first name (genderize.io).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenderPrediction {
	#[serde(default)]
	pub gender: Option<String>,
	#[serde(default)]
	pub probability: f64,
}

/// Predicted age for a first name (agify.io).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgePrediction {
	#[serde(default)]
	pub age: Option<u32>,
}

/// One candidate country for a surname (nationalize.io).
///
/// `country_id` is the raw ISO 3166-1 alpha-2 code.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CountryPrediction {
	pub country_id: String,
	pub probability: f64,
}

#[derive(Deserialize)]
struct NationalizeResponse {
	#[serde(default)]
	country: Vec<CountryPrediction>,
}

/// Result of one remote prediction. A failure is reported, not propagated.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Prediction<T> {
	Ok(T),
	Error(String),
}

impl<T> From<reqwest::Result<T>> for Prediction<T> {
	fn from(result: reqwest::Result<T>) -> Self {
		match result {
			Ok(value) => Prediction::Ok(value),
			Err(e) if e.is_timeout() => Prediction::Error("prediction service timed out".to_owned()),
			Err(e) => {
				warn!("prediction request failed: {e}");
				Prediction::Error(e.to_string())
			}
		}
	}
}

/// Everything the prediction services say about a (possibly full) name.
#[derive(Serialize, Clone, Debug)]
pub struct NameInformation {
	pub first_name: String,
	pub last_name: String,
	pub gender: Prediction<GenderPrediction>,
	pub age: Prediction<AgePrediction>,
	pub nationality: Prediction<Vec<CountryPrediction>>,
}

/// HTTP client for the genderize / agify / nationalize services.
///
/// Every request is bounded by the client timeout.
#[derive(Clone, Debug)]
pub struct Predictor {
	client: Client,
}

impl Predictor {
	pub fn new(timeout: Duration) -> reqwest::Result<Self> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client })
	}

	async fn fetch<T: for<'de> Deserialize<'de>>(&self, url: &str, name: &str) -> reqwest::Result<T> {
		self.client
			.get(url)
			.query(&[("name", name)])
			.send()
			.await?
			.error_for_status()?
			.json::<T>()
			.await
	}

	pub async fn genderize(&self, first_name: &str) -> Prediction<GenderPrediction> {
		self.fetch(GENDERIZE_URL, first_name).await.into()
	}

	pub async fn agify(&self, first_name: &str) -> Prediction<AgePrediction> {
		self.fetch(AGIFY_URL, first_name).await.into()
	}

	/// Candidate countries, most probable first.
	pub async fn nationalize(&self, last_name: &str) -> Prediction<Vec<CountryPrediction>> {
		self.fetch::<NationalizeResponse>(NATIONALIZE_URL, last_name)
			.await
			.map(|response| {
				let mut countries = response.country;
				countries.sort_by(|a, b| b.probability.total_cmp(&a.probability));
				countries
			})
			.into()
	}

	/// Gender and age are predicted from the first name, nationality from the last one.
	pub async fn name_information(&self, full_name: &str) -> NameInformation {
		let (first_name, last_name) = split_full_name(full_name);
		NameInformation {
			gender: self.genderize(&first_name).await,
			age: self.agify(&first_name).await,
			nationality: self.nationalize(&last_name).await,
			first_name,
			last_name,
		}
	}
}

/// Splits a full name into its first and last tokens.
///
/// A single token is both the first and the last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
	let mut tokens = full_name.split_whitespace();
	let first = tokens.next().unwrap_or_default().to_owned();
	let last = tokens.last().map_or_else(|| first.clone(), str::to_owned);
	(first, last)
}
