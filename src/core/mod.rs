//! # Core Module
//!
//! Shared value types, configuration and error handling for placekit.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod error;
pub mod geometry;

// Re-export commonly used items
pub use config::{Config, ProviderEndpoints};
pub use error::{FetchError, FetchResult, PlaceError};
pub use geometry::{Dimension, NumericRange, Point, Rect};
