//! # PlaceKit Facade
//!
//! The stable entry points. Image and text operations validate their
//! arguments, compose the provider request and hand off to the
//! [`FetchGateway`]; they return as soon as the fetch is scheduled and the
//! completion receives the result. Data and geometry operations answer
//! immediately from the [`RandomEngine`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use image::DynamicImage;
use log::{debug, info};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::core::{Config, Dimension, FetchResult, NumericRange, PlaceError, Point, Rect};
use crate::features::fetch::{CompletionContext, FetchGateway, FetchHandle, ReqwestTransport};
use crate::features::random::{RandomEngine, RandomSource, SeededRandom, ThreadRandom, WordPools};
use crate::features::requests::{ImageProvider, ParagraphLength, RequestBuilder, TextOptions};

#[derive(Debug, Clone)]
pub struct PlaceKit {
    requests: RequestBuilder,
    gateway: FetchGateway,
    random: RandomEngine,
}

impl PlaceKit {
    pub fn new(requests: RequestBuilder, gateway: FetchGateway, random: RandomEngine) -> Self {
        PlaceKit {
            requests,
            gateway,
            random,
        }
    }

    /// Wire up the reqwest transport, provider endpoints, word pools and random source
    pub fn from_config(config: &Config) -> Result<Self> {
        let source: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => {
                info!("Using seeded random source ({seed})");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        };

        let pools = match &config.pools_path {
            Some(path) => {
                info!("Loading word pools from {path}");
                WordPools::load(path)?
            }
            None => WordPools::default(),
        };
        let random = RandomEngine::with_pools(source, pools)?;

        let transport = ReqwestTransport::from_config(config)?;
        debug!("Provider endpoints: {:?}", config.endpoints);

        Ok(PlaceKit::new(
            RequestBuilder::new(config.endpoints.clone()),
            FetchGateway::new(Arc::new(transport)),
            random,
        ))
    }

    /// Deliver completions on `context` instead of the caller's runtime
    pub fn with_completion_context(mut self, context: CompletionContext) -> Self {
        self.gateway = self.gateway.with_completion_context(context);
        self
    }

    /// Run fetches on a dedicated runtime, which also allows calls from outside tokio
    pub fn with_background(mut self, handle: Handle) -> Self {
        self.gateway = self.gateway.with_background(handle);
        self
    }

    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    pub fn gateway(&self) -> &FetchGateway {
        &self.gateway
    }

    pub fn random(&self) -> &RandomEngine {
        &self.random
    }

    // ------------------------------------------------------------------
    // Placeholder images
    // ------------------------------------------------------------------

    /// Place an image from any provider; every image operation goes through here
    pub fn place_image<F>(
        &self,
        provider: ImageProvider,
        size: Dimension,
        category: Option<&str>,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        let request = self.requests.image(provider, size, category)?;
        debug!("Placing {provider} image: {}", request.url());
        self.gateway.fetch_image_with(request, completion)
    }

    /// Kitten image from placekitten.com
    pub fn place_kitten_image<F>(
        &self,
        size: Dimension,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::Kitten, size, None, completion)
    }

    pub fn place_greyscale_kitten_image<F>(
        &self,
        size: Dimension,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::GreyscaleKitten, size, None, completion)
    }

    /// Bacon or other meat from baconmockup.com
    pub fn place_bacon_image<F>(
        &self,
        size: Dimension,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::Bacon, size, None, completion)
    }

    /// Generic grey box with the size printed on it
    pub fn place_holder_image<F>(
        &self,
        size: Dimension,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::PlaceHolder, size, None, completion)
    }

    /// Random photo, optionally limited to one category (e.g. `"city"`)
    pub fn place_random_image<F>(
        &self,
        size: Dimension,
        category: Option<&str>,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::Random, size, category, completion)
    }

    pub fn place_random_greyscale_image<F>(
        &self,
        size: Dimension,
        category: Option<&str>,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        self.place_image(ImageProvider::GreyscaleRandom, size, category, completion)
    }

    // ------------------------------------------------------------------
    // Placeholder text
    // ------------------------------------------------------------------

    pub fn place_text<F>(
        &self,
        paragraphs: u32,
        length: ParagraphLength,
        options: TextOptions,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<String>) + Send + 'static,
    {
        let request = self.requests.text(paragraphs, length, options)?;
        debug!("Placing text: {}", request.url());
        self.gateway.fetch_text_with(request, completion)
    }

    // ------------------------------------------------------------------
    // Placeholder data
    // ------------------------------------------------------------------

    pub fn place_random_first_name(&self) -> String {
        self.random.random_first_name()
    }

    pub fn place_random_last_name(&self) -> String {
        self.random.random_last_name()
    }

    pub fn place_random_full_name(&self) -> String {
        self.random.random_full_name()
    }

    pub fn place_random_business_name(&self, words: usize) -> Result<String, PlaceError> {
        self.random.random_business_name(words)
    }

    pub fn place_random_phone_number(&self) -> String {
        self.random.random_phone_number()
    }

    // ------------------------------------------------------------------
    // Random numbers
    // ------------------------------------------------------------------

    pub fn place_random_integer(&self, less_than: i64) -> Result<i64, PlaceError> {
        self.random.random_integer(less_than)
    }

    pub fn place_random_float(&self, less_than: f64) -> Result<f64, PlaceError> {
        self.random.random_float(less_than)
    }

    pub fn place_random_float_in(&self, range: NumericRange) -> f64 {
        self.random.random_float_in(range)
    }

    pub fn place_random_percentage(&self) -> f64 {
        self.random.random_percentage()
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    pub fn place_random_size(
        &self,
        dimension_range: NumericRange,
    ) -> Result<Dimension, PlaceError> {
        self.random.random_dimension(dimension_range)
    }

    pub fn place_random_size_xy(
        &self,
        x_range: NumericRange,
        y_range: NumericRange,
    ) -> Result<Dimension, PlaceError> {
        self.random.random_dimension_xy(x_range, y_range)
    }

    pub fn place_random_rect(&self, within: &Rect) -> Result<Rect, PlaceError> {
        self.random.random_rect(within)
    }

    pub fn place_random_point(&self, within: &Rect) -> Result<Point, PlaceError> {
        self.random.random_point(within)
    }
}
