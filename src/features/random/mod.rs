//! # Feature: Random Data
//!
//! Synchronous generators for numbers, geometry, names and phone numbers.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod engine;
pub mod pools;
pub mod source;

pub use engine::RandomEngine;
pub use pools::WordPools;
pub use source::{RandomSource, SeededRandom, ThreadRandom};
