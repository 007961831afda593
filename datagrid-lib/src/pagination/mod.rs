//! Pagination controller.
//!
//! One interface over two modes:
//!
//! - **client**: pages are slices of an in-memory row set; the controller only
//!   tracks `page_index`/`page_size` and the table derives the counts,
//! - **server**: every page change goes through a [`PageFetcher`]; the
//!   controller stores the returned rows and totals.
//!
//! Server responses are fenced by sequence number: only the response to the
//! most recently issued request is applied, so a slow early response can't
//! overwrite a later page.

mod fetch;

pub use fetch::{FnFetcher, PageFetcher, PageRequest, PageResponse, fetcher_fn};

use std::sync::{Arc, RwLock};

use crate::error::FetchError;

/// Whether pages are sliced locally or fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    Client,
    Server,
}

/// Snapshot of the pagination footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_rows: usize,
}

impl PaginationState {
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// `ceil(total_rows / page_size)`, zero for an empty set.
pub fn page_count_for(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

#[derive(Debug)]
struct PaginationInner<T> {
    page_index: usize,
    page_size: usize,
    /// Rows of the current server page.
    data: Vec<T>,
    total_rows: usize,
    page_count: usize,
    loading: bool,
    error: Option<String>,
    /// Sequence number of the latest issued fetch.
    issued: u64,
    has_mounted: bool,
}

/// Pagination state shared between a table and its in-flight fetches.
///
/// Cheap to clone; clones share state.
pub struct Pagination<T> {
    inner: Arc<RwLock<PaginationInner<T>>>,
    fetcher: Option<Arc<dyn PageFetcher<T>>>,
    fetch_on_mount: bool,
}

impl<T> Clone for Pagination<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            fetcher: self.fetcher.clone(),
            fetch_on_mount: self.fetch_on_mount,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Pagination<T> {
    /// Client-mode controller.
    pub fn client(page_index: usize, page_size: usize) -> Self {
        Self::build(page_index, page_size, None, false)
    }

    /// Server-mode controller backed by `fetcher`.
    pub fn server(
        page_index: usize,
        page_size: usize,
        fetcher: Arc<dyn PageFetcher<T>>,
        fetch_on_mount: bool,
    ) -> Self {
        Self::build(page_index, page_size, Some(fetcher), fetch_on_mount)
    }

    fn build(
        page_index: usize,
        page_size: usize,
        fetcher: Option<Arc<dyn PageFetcher<T>>>,
        fetch_on_mount: bool,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PaginationInner {
                page_index,
                page_size: page_size.max(1),
                data: Vec::new(),
                total_rows: 0,
                page_count: 0,
                loading: false,
                error: None,
                issued: 0,
                has_mounted: false,
            })),
            fetcher,
            fetch_on_mount,
        }
    }

    pub fn mode(&self) -> PaginationMode {
        if self.fetcher.is_some() {
            PaginationMode::Server
        } else {
            PaginationMode::Client
        }
    }

    pub fn page_index(&self) -> usize {
        self.inner.read().map(|g| g.page_index).unwrap_or(0)
    }

    pub fn page_size(&self) -> usize {
        self.inner.read().map(|g| g.page_size).unwrap_or(1)
    }

    /// `true` while the latest fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|g| g.loading).unwrap_or(false)
    }

    /// Message of the last failed fetch, cleared by the next success.
    pub fn error(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.error.clone())
    }

    /// Rows of the current server page. Empty in client mode.
    pub fn server_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.data.clone())
            .unwrap_or_default()
    }

    /// Footer state. `client_total` is the filtered row count and is only
    /// used in client mode; server mode reports the server's totals.
    pub fn state(&self, client_total: usize) -> PaginationState {
        let mode = self.mode();
        self.inner
            .read()
            .map(|g| match mode {
                PaginationMode::Client => PaginationState {
                    page_index: g.page_index,
                    page_size: g.page_size,
                    page_count: page_count_for(client_total, g.page_size),
                    total_rows: client_total,
                },
                PaginationMode::Server => PaginationState {
                    page_index: g.page_index,
                    page_size: g.page_size,
                    page_count: g.page_count,
                    total_rows: g.total_rows,
                },
            })
            .unwrap_or_default()
    }

    /// Go to page `index`.
    ///
    /// The index is not clamped; callers check `can_next`/`can_previous`.
    /// In server mode this fetches the page and resolves when the response
    /// has been applied (or discarded as stale). The index is committed
    /// before the fetch and kept if it fails, while `data` stays on the
    /// last good page.
    pub async fn set_page_index(&self, index: usize) {
        let request = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            guard.page_index = index;
            PageRequest {
                page_index: index,
                page_size: guard.page_size,
            }
        };
        self.fetch(request).await;
    }

    /// Change the page size. Always resets to the first page before fetching.
    pub async fn set_page_size(&self, size: usize) {
        let request = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            guard.page_index = 0;
            guard.page_size = size.max(1);
            PageRequest {
                page_index: 0,
                page_size: guard.page_size,
            }
        };
        self.fetch(request).await;
    }

    /// Re-fetch the current page without changing any state.
    pub async fn refresh(&self) {
        let request = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            PageRequest {
                page_index: guard.page_index,
                page_size: guard.page_size,
            }
        };
        self.fetch(request).await;
    }

    /// Mount-time fetch. Fires at most once per controller, and only in
    /// server mode with fetch-on-mount enabled. Returns `true` if it fetched.
    pub async fn mount(&self) -> bool {
        if self.fetcher.is_none() || !self.fetch_on_mount {
            return false;
        }
        let request = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            if guard.has_mounted {
                return false;
            }
            guard.has_mounted = true;
            PageRequest {
                page_index: guard.page_index,
                page_size: guard.page_size,
            }
        };
        self.fetch(request).await;
        true
    }

    /// Reset to the first page without fetching. Used in client mode when
    /// the filtered row set changes.
    pub(crate) fn reset_page_index(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.page_index = 0;
        }
    }

    async fn fetch(&self, request: PageRequest) {
        let Some(fetcher) = self.fetcher.clone() else {
            return;
        };
        let Some(seq) = self.issue(request) else {
            return;
        };
        let result = fetcher.fetch(request).await;
        self.complete(seq, request, result);
    }

    fn issue(&self, request: PageRequest) -> Option<u64> {
        let mut guard = self.inner.write().ok()?;
        guard.issued += 1;
        guard.loading = true;
        log::debug!(
            "Fetching page {} (size {}), request #{}",
            request.page_index,
            request.page_size,
            guard.issued
        );
        Some(guard.issued)
    }

    fn complete(
        &self,
        seq: u64,
        request: PageRequest,
        result: Result<PageResponse<T>, FetchError>,
    ) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if seq != guard.issued {
            log::debug!(
                "Discarding stale response #{} for page {} (latest is #{})",
                seq,
                request.page_index,
                guard.issued
            );
            return;
        }
        guard.loading = false;
        match result {
            Ok(response) => {
                guard.data = response.data;
                guard.total_rows = response.total_rows;
                guard.page_count = response.page_count;
                guard.error = None;
            }
            Err(e) => {
                let message = e.display_message();
                log::warn!("Fetching page {} failed: {}", request.page_index, message);
                // Stale-while-error: keep the last good page on screen.
                guard.error = Some(message);
            }
        }
    }
}
