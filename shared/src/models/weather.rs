//! Weather observation models

use serde::{Deserialize, Serialize};

/// Current weather conditions at a scan location.
///
/// Resolved by the backend's weather client; the risk assessment consumes
/// only `temperature` and `humidity`, the rest is passed through to the app
/// for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Perceived temperature in degrees Celsius
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Short condition description, e.g. "Scattered Clouds"
    pub description: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Resolved city name, "Unknown" if the provider has none
    pub city: String,
    /// ISO country code, empty if unknown
    pub country: String,
    /// Cloud coverage in percent
    pub clouds: i32,
    /// Rain volume over the last hour in mm
    pub rain_1h: f64,
    /// Rain volume over the last three hours in mm
    pub rain_3h: f64,
}
