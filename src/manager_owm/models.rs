use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use crate::forecast::models::RawSample;
use crate::manager_owm::errors::OwmError;

#[derive(Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    #[serde(default)]
    pub pressure: Option<u32>,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[serde_as]
#[derive(Deserialize)]
pub struct Sys {
    pub country: Option<String>,
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    pub sunset: Option<DateTime<Utc>>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub main: CurrentMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Wind,
    pub sys: Sys,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub visibility: Option<u32>,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp: Option<f64>,
}

#[derive(Deserialize)]
pub struct ForecastEntry {
    pub dt: Option<i64>,
    pub main: Option<ForecastMain>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub pop: Option<f64>,
}

#[derive(Deserialize)]
pub struct ForecastCity {
    pub timezone: Option<i32>,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    pub list: Option<Vec<ForecastEntry>>,
    pub city: Option<ForecastCity>,
}

/// Current conditions for one place, temperatures in Celsius and wind in m/s
#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: Option<String>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// Sea level pressure in hPa
    pub pressure: Option<u32>,
    /// Visibility in meters
    pub visibility: Option<u32>,
    pub wind_speed: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub observed_at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub utc_offset_secs: i32,
}

/// Forecast time series together with the zone reported for the place
#[derive(Debug, Clone)]
pub struct Forecast {
    pub samples: Vec<RawSample>,
    pub utc_offset_secs: Option<i32>,
}

impl CurrentResponse {
    /// Converts the document into current conditions, the first listed condition being the primary one
    pub fn into_current(self) -> Result<CurrentWeather, OwmError> {
        let condition = self.weather.into_iter().next()
            .ok_or_else(|| OwmError::Document("current weather has no condition".to_string()))?;

        Ok(CurrentWeather {
            city: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            visibility: self.visibility,
            wind_speed: self.wind.speed,
            condition: condition.main,
            description: condition.description,
            icon: condition.icon,
            observed_at: self.dt,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            utc_offset_secs: self.timezone,
        })
    }
}

impl ForecastEntry {
    /// Builds a sample from the entry, the first listed condition being the primary one
    fn to_sample(&self) -> Result<RawSample, String> {
        let dt = self.dt.ok_or("missing dt")?;
        if DateTime::from_timestamp(dt, 0).is_none() {
            return Err(format!("dt {} out of range", dt));
        }
        let temp = self.main.as_ref().and_then(|m| m.temp).ok_or("missing main.temp")?;
        let condition = self.weather.first().ok_or("missing weather condition")?;

        let sample = RawSample::new(dt, temp, &condition.icon, &condition.description);
        Ok(match self.pop {
            Some(pop) => sample.with_precipitation(pop),
            None => sample,
        })
    }
}

impl ForecastResponse {
    /// Converts the document into a forecast.
    ///
    /// A missing list gives an empty forecast, while a single malformed entry rejects the whole batch.
    pub fn into_forecast(self) -> Result<Forecast, OwmError> {
        let samples = self.list.unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_sample()
                .map_err(|e| OwmError::Document(format!("forecast entry {}: {}", i, e))))
            .collect::<Result<Vec<RawSample>, OwmError>>()?;

        Ok(Forecast {
            samples,
            utc_offset_secs: self.city.and_then(|c| c.timezone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(dt: i64, temp: f64, icon: &str) -> serde_json::Value {
        json!({
            "dt": dt,
            "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 80 },
            "weather": [ { "id": 800, "main": "Clear", "description": "clear sky", "icon": icon } ],
            "pop": 0.2
        })
    }

    fn parse(value: serde_json::Value) -> Result<Forecast, OwmError> {
        let response: ForecastResponse = serde_json::from_value(value)?;
        response.into_forecast()
    }

    #[test]
    fn test_forecast_maps_fields() {
        let forecast = parse(json!({
            "cod": "200",
            "list": [ entry(1705309200, 4.5, "01d"), entry(1705320000, 6.0, "02d") ],
            "city": { "name": "London", "country": "GB", "timezone": 3600 }
        })).unwrap();

        assert_eq!(forecast.utc_offset_secs, Some(3600));
        assert_eq!(forecast.samples.len(), 2);
        assert_eq!(
            forecast.samples[0],
            RawSample::new(1705309200, 4.5, "01d", "clear sky").with_precipitation(0.2)
        );
        assert_eq!(forecast.samples[1].condition_icon, "02d");
    }

    #[test]
    fn test_missing_pop_is_none() {
        let forecast = parse(json!({
            "list": [ { "dt": 1705309200, "main": { "temp": 1.0 }, "weather": [ { "description": "mist", "icon": "50n" } ] } ]
        })).unwrap();

        assert_eq!(forecast.samples[0].precipitation_probability, None);
        assert_eq!(forecast.utc_offset_secs, None);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let forecast = parse(json!({ "cod": "200" })).unwrap();
        assert!(forecast.samples.is_empty());
    }

    #[test]
    fn test_empty_weather_rejects_batch() {
        let result = parse(json!({
            "list": [ entry(1705309200, 4.5, "01d"), { "dt": 1705320000, "main": { "temp": 3.0 }, "weather": [] } ]
        }));

        match result {
            Err(OwmError::Document(e)) => assert_eq!(e, "forecast entry 1: missing weather condition"),
            _ => panic!("expected a document error"),
        }
    }

    #[test]
    fn test_missing_dt_rejects_batch() {
        let result = parse(json!({
            "list": [ { "main": { "temp": 3.0 }, "weather": [ { "description": "mist", "icon": "50n" } ] } ]
        }));

        match result {
            Err(OwmError::Document(e)) => assert_eq!(e, "forecast entry 0: missing dt"),
            _ => panic!("expected a document error"),
        }
    }

    #[test]
    fn test_missing_temp_rejects_batch() {
        let result = parse(json!({
            "list": [ { "dt": 1705309200, "weather": [ { "description": "mist", "icon": "50n" } ] } ]
        }));

        assert!(matches!(result, Err(OwmError::Document(_))));
    }

    #[test]
    fn test_current_weather() {
        let response: CurrentResponse = serde_json::from_value(json!({
            "name": "London",
            "dt": 1705309200,
            "timezone": 0,
            "main": { "temp": 7.2, "feels_like": 4.1, "humidity": 81, "pressure": 1012 },
            "visibility": 8500,
            "weather": [ { "main": "Clouds", "description": "overcast clouds", "icon": "04d" } ],
            "wind": { "speed": 4.6 },
            "sys": { "country": "GB", "sunrise": 1705305600, "sunset": 1705335600 }
        })).unwrap();

        let current = response.into_current().unwrap();
        assert_eq!(current.city, "London");
        assert_eq!(current.country.as_deref(), Some("GB"));
        assert_eq!(current.condition, "Clouds");
        assert_eq!(current.icon, "04d");
        assert_eq!(current.observed_at.timestamp(), 1705309200);
        assert_eq!(current.sunrise.map(|t| t.timestamp()), Some(1705305600));
        assert_eq!(current.pressure, Some(1012));
        assert_eq!(current.visibility, Some(8500));
    }

    #[test]
    fn test_current_weather_without_condition() {
        let response: CurrentResponse = serde_json::from_value(json!({
            "name": "Nowhere",
            "dt": 1705309200,
            "main": { "temp": 7.2, "feels_like": 4.1, "humidity": 81 },
            "weather": [],
            "wind": { "speed": 4.6 },
            "sys": {}
        })).unwrap();

        assert_eq!(response.main.pressure, None);
        assert_eq!(response.visibility, None);
        assert!(response.into_current().is_err());
    }
}
