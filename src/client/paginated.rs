//! Cursor-based pagination over list endpoints.
//!
//! Robinhood list endpoints return a page of results plus a `next` link;
//! an absent (or empty) link is the sole termination signal. This module
//! provides [`Paginated`], a forward-only cursor over such endpoints, and
//! [`PageStream`], a lazy [`Stream`] adapter over individual items.

use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;

use super::http::{ClientInner, Page};
use crate::{Error, Result};

/// A forward-only, single-pass cursor over a paginated endpoint.
///
/// Once advanced, a page cannot be re-fetched; callers needing replay must
/// keep the pages themselves. A failed fetch leaves the cursor where it
/// was, so the same page may be requested again.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
/// let mut orders = client.orders().iter_options();
/// while orders.has_next() {
///     for order in orders.next_page().await? {
///         println!("{} {:?}", order.chain_symbol, order.state);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Paginated<T> {
    inner: Arc<ClientInner>,
    next: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Paginated<T> {
    pub(crate) fn new(inner: Arc<ClientInner>, start_url: impl Into<String>) -> Self {
        Self {
            inner,
            next: Some(start_url.into()),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if another page exists. No side effects; safe to call
    /// repeatedly.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Fetch the next page and return its results.
    ///
    /// Advances the cursor to the page's `next` link on success. Executor
    /// errors propagate unchanged and leave the cursor in place.
    ///
    /// # Errors
    ///
    /// Calling this after [`has_next`](Self::has_next) reports `false` is a
    /// caller error and yields [`Error::InvalidInput`].
    pub async fn next_page(&mut self) -> Result<Vec<T>> {
        let url = match &self.next {
            Some(url) => url.clone(),
            None => {
                return Err(Error::InvalidInput(
                    "next_page called on an exhausted cursor".into(),
                ))
            }
        };

        let page: Page<T> = self.inner.get_and_decode(&url).await?;
        self.next = page.next.filter(|n| !n.is_empty());
        Ok(page.results)
    }
}

impl<T> std::fmt::Debug for Paginated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginated").field("next", &self.next).finish()
    }
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// A stream that lazily fetches pages and yields individual items.
///
/// The next page is requested only once the current one is exhausted; the
/// stream ends when a page carries no `next` link. On a fetch error the
/// error is yielded once and the stream terminates.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(client: robinhood_rs::RobinhoodClient) -> robinhood_rs::Result<()> {
/// let mut stream = client.orders().iter_options().into_stream();
/// while let Some(order) = stream.next().await {
///     println!("{:?}", order?.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PageStream<T> {
    /// Function to fetch a page by URL.
    fetch_page: Box<dyn Fn(String) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>,
    /// Current page of items being yielded.
    current_items: Vec<T>,
    /// Next URL to fetch, None if exhausted.
    next_url: Option<String>,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
}

impl<T> Paginated<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Convert this cursor into a lazy stream of individual items.
    pub fn into_stream(self) -> PageStream<T> {
        let inner = self.inner;
        PageStream {
            fetch_page: Box::new(move |url: String| {
                let inner = inner.clone();
                Box::pin(async move { inner.get_and_decode::<Page<T>>(&url).await })
            }),
            current_items: Vec::new(),
            next_url: self.next,
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PageStream<T>
where
    T: Unpin,
{
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            // Yield from the current page first.
            if !this.current_items.is_empty() {
                let item = this.current_items.remove(0);
                return Poll::Ready(Some(Ok(item)));
            }

            // Current page exhausted; drive any in-flight fetch.
            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.current_items = page.results;
                        this.next_url = page.next.filter(|n| !n.is_empty());

                        if !this.current_items.is_empty() {
                            continue;
                        }
                        if this.next_url.is_some() {
                            // Empty page with a next link; keep going.
                            continue;
                        }
                        return Poll::Ready(None);
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_url = None; // Stop on error
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            // Start the next fetch if a link remains.
            if let Some(url) = this.next_url.take() {
                let fut = (this.fetch_page)(url);
                this.pending_fetch = Some(fut);
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PageStream<T> {}
