//! External service clients
//!
//! Clients for third-party APIs used by the platform

pub mod weather;

pub use weather::WeatherClient;
