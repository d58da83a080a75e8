use serde::Serialize;

/// One forecast entry as delivered by the upstream provider, temperatures in Celsius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub condition_icon: String,
    pub condition_text: String,
    pub precipitation_probability: Option<f64>,
}

impl RawSample {
    /// Returns a new sample
    ///
    /// # Arguments
    ///
    /// * 'timestamp' - validity time in seconds since epoch
    /// * 'temperature' - temperature in Celsius
    /// * 'condition_icon' - provider pictogram code, e.g. "01d"
    /// * 'condition_text' - human-readable condition
    pub fn new(timestamp: i64, temperature: f64, condition_icon: &str, condition_text: &str) -> Self {
        Self {
            timestamp,
            temperature,
            condition_icon: condition_icon.to_string(),
            condition_text: condition_text.to_string(),
            precipitation_probability: None,
        }
    }

    /// Sets the probability of precipitation (0-1)
    pub fn with_precipitation(mut self, probability: f64) -> Self {
        self.precipitation_probability = Some(probability);
        self
    }
}

/// One row of the multi-day forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date_key: String,
    pub weekday_label: String,
    pub temperature_celsius: i64,
    /// Unrounded mean, for converting into another unit before rounding
    pub mean_celsius: f64,
    pub icon_code: String,
    pub description: String,
    pub sample_count: usize,
}
