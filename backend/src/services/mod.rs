//! Business logic services for the LeafLens backend

pub mod classifier;
pub mod leaf_validator;

pub use classifier::Classifier;
pub use leaf_validator::validate_leaf_image;
