pub mod errors;
pub mod models;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::models::{ApiError, CurrentResponse, CurrentWeather, Forecast, ForecastResponse};

/// Struct for fetching current conditions and forecasts from OpenWeatherMap
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching weather data
    ///
    /// All values are requested in metric units, i.e. Celsius and meter per second.
    ///
    /// # Arguments
    ///
    /// * 'base_url' - API root, e.g. "https://api.openweathermap.org/data/2.5"
    /// * 'api_key' - OpenWeatherMap application id
    /// * 'timeout_secs' - request timeout
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<OWM, OwmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Retrieves current conditions for a city
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, optionally with country code as in "Paris,FR"
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, OwmError> {
        let response: CurrentResponse = self
            .get("weather", &[("q", city.to_string())], "Failed to fetch weather data")
            .await?;

        response.into_current()
    }

    /// Retrieves current conditions at a coordinate, used to resolve the user's location into a city
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude, -90 to 90
    /// * 'lon' - longitude, -180 to 180
    pub async fn current_weather_at(&self, lat: f64, lon: f64) -> Result<CurrentWeather, OwmError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(OwmError::Input(format!("Invalid coordinates: {}, {}", lat, lon)));
        }

        let response: CurrentResponse = self
            .get("weather", &[("lat", lat.to_string()), ("lon", lon.to_string())], "Failed to get location data")
            .await?;

        response.into_current()
    }

    /// Retrieves the 5 day forecast in 3 hour steps for a city
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, optionally with country code as in "Paris,FR"
    pub async fn forecast(&self, city: &str) -> Result<Forecast, OwmError> {
        let response: ForecastResponse = self
            .get("forecast", &[("q", city.to_string())], "Failed to fetch forecast data")
            .await?;

        response.into_forecast()
    }

    /// Makes a GET request and parses the json document
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - path below the base url
    /// * 'query' - query parameters besides api key and units
    /// * 'fallback' - error message when the service gives none
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)], fallback: &str) -> Result<T, OwmError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("requesting {} with {:?}", url, query);

        let req = self.client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send().await?;

        let status = req.status();
        let json = req.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&json)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback.to_string());
            return Err(OwmError::Api(message));
        }

        Ok(serde_json::from_str(&json)?)
    }
}

/// Returns the url of the pictogram for a condition icon code
///
/// # Arguments
///
/// * 'code' - icon code, e.g. "01d"
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", code)
}
