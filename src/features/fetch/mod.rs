//! # Feature: Remote Fetching
//!
//! Asynchronous retrieval of provider images and text with single-shot
//! delivery of the decoded result.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod decode;
pub mod gateway;
pub mod transport;

pub use decode::{decode_text, ImageDecoder, RasterDecoder};
pub use gateway::{CompletionContext, FetchGateway, FetchHandle, Fetched};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
