// Core layer - shared types, configuration and errors
pub mod core;

// Features layer - random data, request composition, remote fetching
pub mod features;

// Facade layer - the public placeholder operations
pub mod kit;

// Re-export core items
pub use crate::core::{
    Config, Dimension, FetchError, FetchResult, NumericRange, PlaceError, Point,
    ProviderEndpoints, Rect,
};

// Re-export feature items
pub use features::{
    // Fetching
    CompletionContext, FetchGateway, FetchHandle, Fetched, ImageDecoder, RasterDecoder,
    ReqwestTransport, Transport, TransportResponse,
    // Random data
    RandomEngine, RandomSource, SeededRandom, ThreadRandom, WordPools,
    // Requests
    ImageProvider, ParagraphLength, RemoteResourceRequest, RequestBuilder, ResponseKind,
    TextOptions,
};

pub use kit::PlaceKit;
