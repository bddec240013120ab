//! Utility functions

pub mod validation;

pub use validation::{page_bounds, validate_code, validate_language_id, validate_source_size};
