//! Background fetch loop and the consumer-side stream

use super::types::{CursorPage, FetchState, Page, PageRequest};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Auth, RequestExecutor};
use futures::Stream;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Undelivered pages the loop may hold
const PAGE_BUFFER: usize = 1;

/// Lazy sequence of page batches backed by one background fetch loop
///
/// Yields pages in fetch order and ends when the loop stops. After the
/// stream ends, `take_error` reports whether it stopped because of a
/// failure. Dropping the stream cancels the loop.
#[derive(Debug)]
pub struct PageStream<T> {
    pages: PageReceiver<T>,
    error: ErrorReceiver,
}

impl<T> PageStream<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Start fetching `request` through `executor`
    ///
    /// `enrich` runs on every item before its page is delivered. Must be
    /// called from within a Tokio runtime.
    pub fn spawn<F>(executor: Arc<dyn RequestExecutor>, request: PageRequest, enrich: F) -> Self
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        let (pages_tx, pages_rx) = mpsc::channel(PAGE_BUFFER);
        let (error_tx, error_rx) = oneshot::channel();

        tokio::spawn(fetch_loop(executor, request, enrich, pages_tx, error_tx));

        Self {
            pages: PageReceiver { rx: pages_rx },
            error: ErrorReceiver { rx: error_rx },
        }
    }
}

impl<T> PageStream<T> {
    /// Wait for the next page; `None` once the loop has stopped
    pub async fn next_page(&mut self) -> Option<Page<T>> {
        self.pages.next_page().await
    }

    /// The error that stopped the loop, if any
    ///
    /// Only conclusive after the stream has returned `None`.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.try_recv()
    }

    /// Split into the page channel and the error channel
    pub fn into_parts(self) -> (PageReceiver<T>, ErrorReceiver) {
        (self.pages, self.error)
    }

    /// Drain the stream, returning every item delivered and the stopping error
    pub async fn collect_items(mut self) -> (Vec<T>, Option<Error>) {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page);
        }
        (items, self.take_error())
    }

    /// Drain the stream into a `Result`, discarding partial data on failure
    pub async fn try_collect_items(self) -> Result<Vec<T>> {
        match self.collect_items().await {
            (_, Some(err)) => Err(err),
            (items, None) => Ok(items),
        }
    }
}

impl<T> Stream for PageStream<T> {
    type Item = Page<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().pages).poll_next(cx)
    }
}

/// Page half of a split `PageStream`
#[derive(Debug)]
pub struct PageReceiver<T> {
    rx: mpsc::Receiver<Page<T>>,
}

impl<T> PageReceiver<T> {
    /// Wait for the next page; `None` once the loop has stopped
    pub async fn next_page(&mut self) -> Option<Page<T>> {
        self.rx.recv().await
    }
}

impl<T> Stream for PageReceiver<T> {
    type Item = Page<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// Error half of a split `PageStream`
///
/// Receives at most one error: the one that stopped the loop.
#[derive(Debug)]
pub struct ErrorReceiver {
    rx: oneshot::Receiver<Error>,
}

impl ErrorReceiver {
    /// Wait until the loop stops, then report its error if it failed
    ///
    /// The loop cannot stop while a page is waiting to be delivered, so
    /// keep draining the page half (or drop it) before awaiting this.
    pub async fn recv(self) -> Option<Error> {
        self.rx.await.ok()
    }

    /// Non-blocking check for the stopping error
    pub fn try_recv(&mut self) -> Option<Error> {
        self.rx.try_recv().ok()
    }
}

/// One fetch loop per stream; exits on limit, exhausted cursor, error or
/// consumer disinterest.
async fn fetch_loop<T, F>(
    executor: Arc<dyn RequestExecutor>,
    request: PageRequest,
    mut enrich: F,
    pages_tx: mpsc::Sender<Page<T>>,
    error_tx: oneshot::Sender<Error>,
) where
    T: DeserializeOwned + Send + 'static,
    F: FnMut(&mut T) + Send + 'static,
{
    let mut state = FetchState::new(request.page_limit);

    loop {
        if state.limit_reached() {
            debug!(
                "Page limit reached after {} pages: {}",
                state.pages_fetched, request.url
            );
            return;
        }

        // Wait until the previous page has been taken before fetching the next one
        let Ok(permit) = pages_tx.reserve().await else {
            debug!("Consumer dropped, stopping: {}", request.url);
            return;
        };

        let url = request.url_for(state.cursor.as_deref());
        let fetched = tokio::select! {
            fetched = fetch_page::<T>(executor.as_ref(), &url, request.auth) => fetched,
            () = pages_tx.closed() => {
                debug!("Consumer dropped mid-request, stopping: {}", request.url);
                return;
            }
        };

        match fetched {
            Ok(page) => {
                let CursorPage {
                    mut data,
                    next_page_cursor,
                } = page;
                data.iter_mut().for_each(&mut enrich);

                let number = state.pages_fetched + 1;
                debug!("Page {}: {} items from {}", number, data.len(), request.url);
                permit.send(Page::new(number, data));

                if !state.advance(next_page_cursor) {
                    debug!("No further pages after page {}: {}", number, request.url);
                    return;
                }
            }
            Err(err) => {
                warn!(
                    "Stopping after {} pages of {}: {}",
                    state.pages_fetched, request.url, err
                );
                let _ = error_tx.send(err);
                return;
            }
        }
    }
}

/// Fetch and decode a single page
async fn fetch_page<T: DeserializeOwned>(
    executor: &dyn RequestExecutor,
    url: &str,
    auth: Auth,
) -> Result<CursorPage<T>> {
    let mut request = ApiRequest::get(url);
    request.auth = auth;

    executor.execute(request).await?.error_for_status()?.json()
}
