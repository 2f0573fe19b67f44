//! # Feature: Fetch Gateway
//!
//! Issues one GET per request, checks the status, decodes the body into an
//! image or a string and hands exactly one result back. Non-success statuses
//! are reported without ever calling the decoder, and decode problems are
//! reported separately from transport problems.
//!
//! Callback-style calls go through [`FetchGateway::dispatch`]: the work runs
//! on a background runtime and the completion is delivered once on the
//! configured [`CompletionContext`]. Cancelling through the returned
//! [`FetchHandle`] before the work finishes means the completion never runs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use image::DynamicImage;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::decode::{decode_text, ImageDecoder, RasterDecoder};
use super::transport::Transport;
use crate::core::{FetchError, FetchResult, PlaceError};
use crate::features::requests::{RemoteResourceRequest, ResponseKind};

/// Where a completion runs once its fetch has finished
#[derive(Debug, Clone, Default)]
pub enum CompletionContext {
    /// The tokio runtime that was current when the call was made.
    ///
    /// Falls back to `Background` when the caller is not inside a runtime.
    #[default]
    Caller,
    /// Directly on the task that performed the fetch
    Background,
    /// A specific runtime, e.g. one dedicated to UI updates.
    ///
    /// If that runtime has shut down by the time the fetch finishes, the
    /// completion runs on the fetch task instead and a warning is logged.
    Runtime(Handle),
}

/// Decoded body, matching the request's [`ResponseKind`]
#[derive(Debug, Clone)]
pub enum Fetched {
    Image(DynamicImage),
    Text(String),
}

impl Fetched {
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            Fetched::Image(image) => Some(image),
            Fetched::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Fetched::Text(text) => Some(text),
            Fetched::Image(_) => None,
        }
    }
}

/// Handle to an outstanding dispatched fetch.
///
/// Dropping the handle does not cancel the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    task: JoinHandle<()>,
}

impl FetchHandle {
    /// Abort the fetch; if it had not finished yet, the completion is never called
    pub fn cancel(&self) {
        debug!("Cancelling outstanding fetch");
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the fetch task has finished or was cancelled.
    ///
    /// With `CompletionContext::Background` the completion has run by then;
    /// other contexts may still be about to run it.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            if e.is_panic() {
                warn!("Fetch task panicked: {e}");
            }
        }
    }
}

#[derive(Clone)]
pub struct FetchGateway {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn ImageDecoder>,
    background: Option<Handle>,
    completion_context: CompletionContext,
}

impl fmt::Debug for FetchGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchGateway")
            .field("background", &self.background.is_some())
            .field("completion_context", &self.completion_context)
            .finish_non_exhaustive()
    }
}

impl FetchGateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        FetchGateway {
            transport,
            decoder: Arc::new(RasterDecoder),
            background: None,
            completion_context: CompletionContext::default(),
        }
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Run dispatched fetches on this runtime instead of the caller's
    pub fn with_background(mut self, handle: Handle) -> Self {
        self.background = Some(handle);
        self
    }

    pub fn with_completion_context(mut self, context: CompletionContext) -> Self {
        self.completion_context = context;
        self
    }

    /// GET the request's URL and return the body of a successful response
    async fn retrieve(&self, request: &RemoteResourceRequest) -> FetchResult<Vec<u8>> {
        let url = request.url();
        debug!("Fetching {url}");

        let response = self.transport.get(url).await.map_err(|e| {
            warn!("Fetch failed: {e}");
            e
        })?;

        if !response.is_success() {
            warn!("{url} returned HTTP {}", response.status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }

    pub async fn fetch_image(&self, request: &RemoteResourceRequest) -> FetchResult<DynamicImage> {
        let bytes = self.retrieve(request).await?;
        let image = self.decoder.decode(&bytes).map_err(|e| {
            warn!("Could not decode image from {}: {e}", request.url());
            FetchError::Decode {
                url: request.url().to_string(),
                reason: e.to_string(),
            }
        })?;

        info!(
            "Fetched {}x{} image from {}",
            image.width(),
            image.height(),
            request.url()
        );
        Ok(image)
    }

    pub async fn fetch_text(&self, request: &RemoteResourceRequest) -> FetchResult<String> {
        let bytes = self.retrieve(request).await?;
        let text = decode_text(&bytes).map_err(|e| {
            warn!("Could not decode text from {}: {e}", request.url());
            FetchError::Decode {
                url: request.url().to_string(),
                reason: e.to_string(),
            }
        })?;

        info!("Fetched {} characters from {}", text.len(), request.url());
        Ok(text)
    }

    /// Fetch and decode according to the request's response kind
    pub async fn fetch(&self, request: &RemoteResourceRequest) -> FetchResult<Fetched> {
        match request.kind() {
            ResponseKind::Image => self.fetch_image(request).await.map(Fetched::Image),
            ResponseKind::Text => self.fetch_text(request).await.map(Fetched::Text),
        }
    }

    /// Run `work` in the background and hand its result to `completion` exactly once.
    ///
    /// Fails with [`PlaceError::NoRuntime`] when no background runtime is
    /// configured and the caller is not inside one.
    pub fn dispatch<T, Fut, F>(&self, work: Fut, completion: F) -> Result<FetchHandle, PlaceError>
    where
        T: Send + 'static,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
        F: FnOnce(FetchResult<T>) + Send + 'static,
    {
        let caller = Handle::try_current().ok();
        let background = self
            .background
            .clone()
            .or_else(|| caller.clone())
            .ok_or(PlaceError::NoRuntime)?;

        let deliver_on = match &self.completion_context {
            CompletionContext::Caller => caller,
            CompletionContext::Background => None,
            CompletionContext::Runtime(handle) => Some(handle.clone()),
        };

        let task = background.spawn(async move {
            let result = work.await;
            match deliver_on {
                Some(handle) => {
                    let slot = Arc::new(Mutex::new(Some((completion, result))));
                    let pending = slot.clone();
                    let delivery = handle.spawn(async move {
                        let taken = pending.lock().take();
                        if let Some((completion, result)) = taken {
                            completion(result);
                        }
                    });
                    // A runtime that has shut down drops the delivery task unrun
                    if delivery.await.is_err() {
                        let taken = slot.lock().take();
                        if let Some((completion, result)) = taken {
                            warn!("Completion runtime is gone, delivering on the fetch task");
                            completion(result);
                        }
                    }
                }
                None => completion(result),
            }
        });

        Ok(FetchHandle { task })
    }

    /// Callback form of [`FetchGateway::fetch_image`]
    pub fn fetch_image_with<F>(
        &self,
        request: RemoteResourceRequest,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<DynamicImage>) + Send + 'static,
    {
        let gateway = self.clone();
        self.dispatch(
            async move { gateway.fetch_image(&request).await },
            completion,
        )
    }

    /// Callback form of [`FetchGateway::fetch_text`]
    pub fn fetch_text_with<F>(
        &self,
        request: RemoteResourceRequest,
        completion: F,
    ) -> Result<FetchHandle, PlaceError>
    where
        F: FnOnce(FetchResult<String>) + Send + 'static,
    {
        let gateway = self.clone();
        self.dispatch(
            async move { gateway.fetch_text(&request).await },
            completion,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fetch::decode::png_bytes;
    use crate::features::fetch::transport::TransportResponse;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// Transport that answers every GET with the same response
    struct StubTransport {
        status: u16,
        body: Vec<u8>,
        calls: AtomicUsize,
    }

    impl StubTransport {
        fn new(status: u16, body: impl Into<Vec<u8>>) -> Arc<Self> {
            Arc::new(StubTransport {
                status,
                body: body.into(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get(&self, _url: &str) -> FetchResult<TransportResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransportResponse::new(self.status, self.body.clone()))
        }
    }

    struct UnreachableTransport;

    #[async_trait]
    impl Transport for UnreachableTransport {
        async fn get(&self, url: &str) -> FetchResult<TransportResponse> {
            Err(FetchError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    /// Transport whose requests never complete
    struct HangingTransport;

    #[async_trait]
    impl Transport for HangingTransport {
        async fn get(&self, _url: &str) -> FetchResult<TransportResponse> {
            std::future::pending().await
        }
    }

    struct CountingDecoder {
        calls: AtomicUsize,
    }

    impl ImageDecoder for CountingDecoder {
        fn decode(&self, _bytes: &[u8]) -> anyhow::Result<DynamicImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("should not be reached"))
        }
    }

    fn image_request() -> RemoteResourceRequest {
        RemoteResourceRequest::new("https://placekitten.com/200/300", ResponseKind::Image)
    }

    fn text_request() -> RemoteResourceRequest {
        RemoteResourceRequest::new(
            "https://loripsum.net/api/1/short/plaintext",
            ResponseKind::Text,
        )
    }

    #[tokio::test]
    async fn test_fetch_image_success() {
        let transport = StubTransport::new(200, png_bytes(3, 5));
        let gateway = FetchGateway::new(transport.clone());

        let image = gateway.fetch_image(&image_request()).await.unwrap();
        assert_eq!((image.width(), image.height()), (3, 5));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_image_is_a_decode_failure() {
        let gateway = FetchGateway::new(StubTransport::new(200, b"definitely not a png".to_vec()));

        let err = gateway.fetch_image(&image_request()).await.unwrap_err();
        assert!(err.is_decode_failure(), "{err:?}");
        assert!(!err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_error_status_skips_decoding() {
        let decoder = Arc::new(CountingDecoder {
            calls: AtomicUsize::new(0),
        });
        let gateway = FetchGateway::new(StubTransport::new(404, png_bytes(1, 1)))
            .with_decoder(decoder.clone());

        let err = gateway.fetch_image(&image_request()).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                url: "https://placekitten.com/200/300".to_string(),
                status: 404,
            }
        );
        assert!(err.is_transport_failure());
        assert_eq!(decoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_is_a_transport_failure() {
        let gateway = FetchGateway::new(Arc::new(UnreachableTransport));
        let err = gateway.fetch_text(&text_request()).await.unwrap_err();
        assert!(err.is_transport_failure());
    }

    #[tokio::test]
    async fn test_fetch_text() {
        let gateway = FetchGateway::new(StubTransport::new(200, "Lorem ipsum dolor."));
        assert_eq!(
            gateway.fetch_text(&text_request()).await.unwrap(),
            "Lorem ipsum dolor."
        );

        let gateway = FetchGateway::new(StubTransport::new(200, vec![0xc3, 0x28]));
        assert!(gateway
            .fetch_text(&text_request())
            .await
            .unwrap_err()
            .is_decode_failure());
    }

    #[tokio::test]
    async fn test_fetch_follows_response_kind() {
        let gateway = FetchGateway::new(StubTransport::new(200, png_bytes(1, 1)));
        assert!(gateway
            .fetch(&image_request())
            .await
            .unwrap()
            .into_image()
            .is_some());

        let gateway = FetchGateway::new(StubTransport::new(200, "text"));
        let fetched = gateway.fetch(&text_request()).await.unwrap();
        assert_eq!(fetched.into_text().as_deref(), Some("text"));
    }

    #[tokio::test]
    async fn test_dispatch_delivers_exactly_once() {
        let transport = StubTransport::new(200, "once");
        let gateway = FetchGateway::new(transport.clone());
        let deliveries = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let counter = deliveries.clone();
        gateway
            .fetch_text_with(text_request(), move |result| {
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(result);
            })
            .unwrap();

        assert_eq!(rx.await.unwrap().unwrap(), "once");
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(deliveries.load(Ordering::SeqCst), 1);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_failures_through_the_completion() {
        let gateway = FetchGateway::new(StubTransport::new(500, Vec::new()));
        let (tx, rx) = oneshot::channel();

        gateway
            .fetch_image_with(image_request(), move |result| {
                let _ = tx.send(result);
            })
            .unwrap();

        let err = rx.await.unwrap().unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_cancelled_fetch_never_completes() {
        let gateway = FetchGateway::new(Arc::new(HangingTransport));
        let (tx, rx) = oneshot::channel::<FetchResult<String>>();

        let handle = gateway
            .fetch_text_with(text_request(), move |result| {
                let _ = tx.send(result);
            })
            .unwrap();
        assert!(!handle.is_finished());

        handle.cancel();
        // The aborted task drops the completion, and with it the sender
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_background_completion_has_run_after_join() {
        let gateway = FetchGateway::new(StubTransport::new(200, "done"))
            .with_completion_context(CompletionContext::Background);
        let delivered = Arc::new(AtomicUsize::new(0));

        let counter = delivered.clone();
        let handle = gateway
            .fetch_text_with(text_request(), move |result| {
                assert!(result.is_ok());
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        handle.join().await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_completion_on_dedicated_runtime() {
        let delivery_runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("delivery")
            .enable_all()
            .build()
            .unwrap();
        let context = CompletionContext::Runtime(delivery_runtime.handle().clone());
        let gateway = FetchGateway::new(StubTransport::new(200, "elsewhere"))
            .with_completion_context(context);
        let (tx, rx) = oneshot::channel();

        gateway
            .fetch_text_with(text_request(), move |result| {
                let thread = std::thread::current().name().map(str::to_string);
                let _ = tx.send((result, thread));
            })
            .unwrap();

        let (result, thread) = rx.await.unwrap();
        assert_eq!(result.unwrap(), "elsewhere");
        assert_eq!(thread.as_deref(), Some("delivery"));
        delivery_runtime.shutdown_background();
    }

    #[tokio::test]
    async fn test_completion_survives_a_shut_down_delivery_runtime() {
        let delivery_runtime = tokio::runtime::Runtime::new().unwrap();
        let context = CompletionContext::Runtime(delivery_runtime.handle().clone());
        delivery_runtime.shutdown_background();

        let gateway =
            FetchGateway::new(StubTransport::new(200, "late")).with_completion_context(context);
        let delivered = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let counter = delivered.clone();
        let handle = gateway
            .fetch_text_with(text_request(), move |result| {
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(result);
            })
            .unwrap();

        assert_eq!(rx.await.unwrap().unwrap(), "late");
        handle.join().await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_outside_a_runtime_needs_a_background_handle() {
        let gateway = FetchGateway::new(StubTransport::new(200, "x"));
        let err = gateway
            .fetch_text_with(text_request(), |_| {})
            .unwrap_err();
        assert_eq!(err, PlaceError::NoRuntime);

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let gateway = gateway.with_background(runtime.handle().clone());
        let (tx, rx) = mpsc::channel();
        gateway
            .fetch_text_with(text_request(), move |result| {
                let _ = tx.send(result);
            })
            .unwrap();

        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.unwrap(), "x");
    }
}
