//! # Features Layer
//!
//! - `random`: synchronous data and geometry generators
//! - `requests`: provider URL composition
//! - `fetch`: asynchronous retrieval and decoding

pub mod fetch;
pub mod random;
pub mod requests;

pub use fetch::{
    CompletionContext, FetchGateway, FetchHandle, Fetched, ImageDecoder, RasterDecoder,
    ReqwestTransport, Transport, TransportResponse,
};
pub use random::{RandomEngine, RandomSource, SeededRandom, ThreadRandom, WordPools};
pub use requests::{
    ImageProvider, ParagraphLength, RemoteResourceRequest, RequestBuilder, ResponseKind,
    TextOptions,
};
