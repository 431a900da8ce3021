//! Shared types and decision logic for the LeafLens backend
//!
//! This crate contains the framework-free core of the system: the disease
//! enumeration, scan result models, the static treatment database, and the
//! weather-based risk assessment. The backend crate composes these behind
//! its HTTP surface.

pub mod models;
pub mod risk;
pub mod treatment;
pub mod types;

pub use models::*;
pub use risk::*;
pub use treatment::*;
pub use types::*;
