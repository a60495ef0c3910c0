mod predict;

use std::env;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{get, web, App, HttpResponse, HttpServer, ResponseError};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use babynames_core::model::popularity::DecadeCell;
use babynames_core::{DatasetConfig, DatasetStore, Gender, Generator, NameRequest, NamesError, PopularitySeries};
use predict::Predictor;

const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_PREDICT_TIMEOUT_SECS: u64 = 10;

struct SharedData {
	store: DatasetStore,
	predictor: Predictor,
}

/// Errors returned by the routes, rendered as `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
enum ApiError {
	#[error(transparent)]
	Names(#[from] NamesError),

	#[error("background task failed")]
	Blocking,
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Names(NamesError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
			ApiError::Names(NamesError::DataUnavailable(_) | NamesError::DatasetMissing { .. }) => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
	}
}

/// Runs a file-scanning closure on the blocking thread pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
	F: FnOnce() -> Result<T, NamesError> + Send + 'static,
	T: Send + 'static,
{
	Ok(web::block(f).await.map_err(|_| ApiError::Blocking)??)
}

#[derive(Deserialize)]
struct LookupParams {
	name: String,
	gender: String,
	year: u16,
}

#[derive(Serialize)]
struct LookupResponse {
	year: u16,
	name: String,
	gender: Gender,
	births: u32,
}

#[derive(Deserialize)]
struct PopularityParams {
	name: String,
	gender: String,
	start_year: u16,
	end_year: u16,
}

#[derive(Serialize)]
struct PopularityResponse {
	#[serde(flatten)]
	series: PopularitySeries,
	total: u64,
	decades: Vec<DecadeCell>,
}

#[derive(Deserialize)]
struct RandomNameParams {
	gender: Option<String>,
	count: Option<usize>,
	surname: Option<bool>,
}

impl RandomNameParams {
	/// Builds the sampling request; a missing or blank gender means any gender.
	fn request(&self) -> Result<NameRequest, NamesError> {
		let gender = Gender::parse_optional(self.gender.as_deref().unwrap_or_default())?;
		let mut request = NameRequest::new(gender, self.surname.unwrap_or(false));
		request.set_count(self.count.unwrap_or(1))?;
		Ok(request)
	}
}

#[derive(Deserialize)]
struct InformationParams {
	name: String,
}

/// HTTP GET endpoint `/v1/years`
///
/// Returns the inclusive year range served by the dataset store.
#[get("/v1/years")]
async fn get_years(data: web::Data<SharedData>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"first_year": data.store.first_year(),
		"last_year": data.store.last_year(),
	}))
}

/// HTTP GET endpoint `/v1/lookup`
///
/// Births of a name for one year; 0 when the name or the year is absent.
#[get("/v1/lookup")]
async fn get_lookup(data: web::Data<SharedData>, query: web::Query<LookupParams>) -> Result<HttpResponse, ApiError> {
	let gender: Gender = query.gender.parse()?;
	let LookupParams { name, year, .. } = query.into_inner();

	let scan_name = name.clone();
	let births = blocking(move || Ok(data.store.lookup(year, &scan_name, gender))).await?;

	Ok(HttpResponse::Ok().json(LookupResponse { year, name, gender, births }))
}

/// HTTP GET endpoint `/v1/popularity`
///
/// Per-year births over `start_year..=end_year`, plus decade cells for a heatmap.
#[get("/v1/popularity")]
async fn get_popularity(data: web::Data<SharedData>, query: web::Query<PopularityParams>) -> Result<HttpResponse, ApiError> {
	let gender: Gender = query.gender.parse()?;
	let PopularityParams { name, start_year, end_year, .. } = query.into_inner();

	let series = blocking(move || data.store.popularity(&name, gender, start_year, end_year)).await?;

	Ok(HttpResponse::Ok().json(PopularityResponse {
		total: series.total(),
		decades: series.decade_cells(),
		series,
	}))
}

/// HTTP GET endpoint `/v1/random_name`
///
/// Generates `count` independent random names, optionally with surnames.
#[get("/v1/random_name")]
async fn get_random_name(data: web::Data<SharedData>, query: web::Query<RandomNameParams>) -> Result<HttpResponse, ApiError> {
	let request = query.request()?;
	let names = blocking(move || Generator::new(&data.store).random_names(&request)).await?;
	Ok(HttpResponse::Ok().json(json!({ "names": names })))
}

/// HTTP GET endpoint `/v1/random_surname`
#[get("/v1/random_surname")]
async fn get_random_surname(data: web::Data<SharedData>) -> Result<HttpResponse, ApiError> {
	let surname = blocking(move || Generator::new(&data.store).random_surname()).await?;
	Ok(HttpResponse::Ok().json(json!({ "surname": surname })))
}

/// HTTP GET endpoint `/v1/name_information`
///
/// Forwards the name to the remote prediction services. Never touches the dataset.
#[get("/v1/name_information")]
async fn get_name_information(data: web::Data<SharedData>, query: web::Query<InformationParams>) -> Result<HttpResponse, ApiError> {
	if query.name.trim().is_empty() {
		return Err(NamesError::InvalidArgument("name must not be empty".to_owned()).into());
	}
	let information = data.predictor.name_information(&query.name).await;
	Ok(HttpResponse::Ok().json(information))
}

fn predict_timeout() -> anyhow::Result<Duration> {
	let secs = match env::var("BABYNAMES_PREDICT_TIMEOUT_SECS") {
		Ok(value) => value.trim().parse()?,
		Err(_) => DEFAULT_PREDICT_TIMEOUT_SECS,
	};
	Ok(Duration::from_secs(secs))
}

/// Main entry point for the server.
///
/// Opens the dataset store described by the `BABYNAMES_*` environment
/// variables and serves the JSON routes.
///
/// # Notes
/// - The server binds to `BABYNAMES_BIND` (default 127.0.0.1:5000).
/// - The store is read-only, so it is shared without a lock.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = DatasetConfig::from_env()?;
	let shared_data = web::Data::new(SharedData {
		store: DatasetStore::open(&config)?,
		predictor: Predictor::new(predict_timeout()?)?,
	});

	let bind = env::var("BABYNAMES_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_owned());
	info!("listening on {bind}");

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.service(get_years)
			.service(get_lookup)
			.service(get_popularity)
			.service(get_random_name)
			.service(get_random_surname)
			.service(get_name_information)
	})
		.bind(bind)?
		.run()
		.await?;

	Ok(())
}
