//! Dashboard view model
//!
//! Combines current conditions with the aggregated forecast and converts every temperature
//! into the unit the user asked for.

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use crate::forecast::{group_by_day, take_hourly};
use crate::forecast::format::{format_clock_time, format_date_key};
use crate::forecast::models::{DailySummary, RawSample};
use crate::initialization::DashboardConfig;
use crate::manager_owm::icon_url;
use crate::manager_owm::models::{CurrentWeather, Forecast};
use crate::units::{display_round, to_display_temperature, TemperatureUnit};

#[derive(Debug, Serialize)]
pub struct CurrentCard {
    pub city: String,
    pub country: Option<String>,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: u8,
    pub pressure_hpa: Option<u32>,
    pub visibility_km: Option<f64>,
    pub wind_kmh: i64,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub icon_url: String,
    pub date: String,
    pub time: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HourlyCard {
    pub time: String,
    pub temperature: i64,
    pub rain_chance: Option<i64>,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DailyCard {
    pub date: String,
    pub day: String,
    pub temperature: i64,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub unit: &'static str,
    pub current: CurrentCard,
    pub hourly: Vec<HourlyCard>,
    pub daily: Vec<DailyCard>,
}

/// Zone used for every date and time label.
/// A configured offset wins over the one the provider reports for the place.
fn display_zone(settings: &DashboardConfig, current: &CurrentWeather, forecast: &Forecast) -> FixedOffset {
    let offset = settings.utc_offset_secs
        .or(forecast.utc_offset_secs)
        .unwrap_or(current.utc_offset_secs);

    FixedOffset::east_opt(offset).unwrap_or(Utc.fix())
}

/// Builds the dashboard for one place
///
/// # Arguments
///
/// * 'current' - current conditions
/// * 'forecast' - forecast time series
/// * 'unit' - unit to show temperatures in
/// * 'settings' - hourly and daily lengths plus optional fixed display offset
pub fn build_dashboard(current: &CurrentWeather, forecast: &Forecast, unit: TemperatureUnit, settings: &DashboardConfig) -> Dashboard {
    let zone = display_zone(settings, current, forecast);
    let use_celsius = unit.use_celsius();

    let hourly = take_hourly(&forecast.samples, settings.hourly_count)
        .iter()
        .map(|s| hourly_card(s, use_celsius, &zone))
        .collect();

    let daily = group_by_day(&forecast.samples, &zone)
        .iter()
        .take(settings.forecast_days)
        .map(|d| daily_card(d, use_celsius))
        .collect();

    Dashboard {
        unit: unit.label(),
        current: current_card(current, use_celsius, &zone),
        hourly,
        daily,
    }
}

fn current_card(current: &CurrentWeather, use_celsius: bool, zone: &FixedOffset) -> CurrentCard {
    let observed = current.observed_at.timestamp();

    CurrentCard {
        city: current.city.clone(),
        country: current.country.clone(),
        temperature: display_round(to_display_temperature(current.temperature, use_celsius)),
        feels_like: display_round(to_display_temperature(current.feels_like, use_celsius)),
        humidity: current.humidity,
        pressure_hpa: current.pressure,
        visibility_km: current.visibility.map(|m| (m as f64 / 100.0).round() / 10.0),
        wind_kmh: display_round(current.wind_speed * 3.6),
        condition: current.condition.clone(),
        description: current.description.clone(),
        icon: current.icon.clone(),
        icon_url: icon_url(&current.icon),
        date: format_date_key(observed, zone),
        time: format_clock_time(observed, zone),
        sunrise: current.sunrise.map(|t| format_clock_time(t.timestamp(), zone)),
        sunset: current.sunset.map(|t| format_clock_time(t.timestamp(), zone)),
    }
}

fn hourly_card(sample: &RawSample, use_celsius: bool, zone: &FixedOffset) -> HourlyCard {
    HourlyCard {
        time: format_clock_time(sample.timestamp, zone),
        temperature: display_round(to_display_temperature(sample.temperature, use_celsius)),
        rain_chance: sample.precipitation_probability
            .filter(|p| *p > 0.0)
            .map(|p| display_round(p * 100.0)),
        icon: sample.condition_icon.clone(),
        icon_url: icon_url(&sample.condition_icon),
        description: sample.condition_text.clone(),
    }
}

fn daily_card(summary: &DailySummary, use_celsius: bool) -> DailyCard {
    DailyCard {
        date: summary.date_key.clone(),
        day: summary.weekday_label.clone(),
        temperature: if use_celsius {
            summary.temperature_celsius
        } else {
            display_round(to_display_temperature(summary.mean_celsius, false))
        },
        icon: summary.icon_code.clone(),
        icon_url: icon_url(&summary.icon_code),
        description: summary.description.clone(),
    }
}
