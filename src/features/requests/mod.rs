//! # Feature: Provider Requests
//!
//! Maps typed image and text parameters onto the fixed provider URL templates.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod builder;

pub use builder::{
    normalize_category, ImageProvider, ParagraphLength, RemoteResourceRequest, RequestBuilder,
    ResponseKind, TextOptions,
};
