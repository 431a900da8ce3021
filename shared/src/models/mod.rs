//! Domain models for the LeafLens backend

pub mod risk;
pub mod scan;
pub mod treatment;
pub mod weather;

pub use risk::*;
pub use scan::*;
pub use treatment::*;
pub use weather::*;
