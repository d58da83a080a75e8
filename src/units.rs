use serde::{Deserialize, Serialize};

/// Temperature unit selected for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn use_celsius(&self) -> bool {
        *self == TemperatureUnit::Celsius
    }

    /// Unit suffix as shown next to a temperature
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

/// Converts a Celsius value for display.
/// The result is not rounded so that repeated conversions don't compound rounding errors.
///
/// # Arguments
///
/// * 'celsius' - temperature in Celsius
/// * 'use_celsius' - if true the value is returned unchanged, otherwise converted to Fahrenheit
pub fn to_display_temperature(celsius: f64, use_celsius: bool) -> f64 {
    if use_celsius {
        celsius
    } else {
        celsius * 9.0 / 5.0 + 32.0
    }
}

/// Rounds a displayed value to an integer, halves away from zero
///
/// # Arguments
///
/// * 'value' - value to round
pub fn display_round(value: f64) -> i64 {
    value.round() as i64
}
