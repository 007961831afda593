//! Server fetch contract.

use std::future::Future;

use async_trait::async_trait;

use crate::error::FetchError;

/// Page requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

/// A page of rows returned by the server, with the totals needed to
/// render the footer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total_rows: usize,
    pub page_count: usize,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, total_rows: usize, page_count: usize) -> Self {
        Self {
            data,
            total_rows,
            page_count,
        }
    }
}

/// Fetches one page of rows from wherever they live.
///
/// The table places no constraint on transport; it only awaits the result
/// and surfaces the error message on failure.
///
/// # Example
///
/// ```ignore
/// struct ContactsApi { client: reqwest::Client }
///
/// #[async_trait]
/// impl PageFetcher<Contact> for ContactsApi {
///     async fn fetch(&self, request: PageRequest) -> Result<PageResponse<Contact>, FetchError> {
///         let body: ContactsPage = self.client
///             .get("/api/contacts")
///             .query(&[("page", request.page_index), ("size", request.page_size)])
///             .send().await.map_err(|e| FetchError::new(e.to_string()))?
///             .json().await.map_err(|e| FetchError::new(e.to_string()))?;
///         Ok(PageResponse::new(body.items, body.total, body.pages))
///     }
/// }
/// ```
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse<T>, FetchError>;
}

/// Adapter turning an async closure into a [`PageFetcher`].
pub struct FnFetcher<F>(F);

/// Wrap an async closure as a [`PageFetcher`].
///
/// ```
/// use datagrid_lib::pagination::{fetcher_fn, PageResponse};
///
/// let fetcher = fetcher_fn(|request| async move {
///     let rows: Vec<u32> = (0..request.page_size as u32).collect();
///     Ok(PageResponse::new(rows, 100, 10))
/// });
/// # let _ = fetcher;
/// ```
pub fn fetcher_fn<T, F, Fut>(f: F) -> FnFetcher<F>
where
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageResponse<T>, FetchError>> + Send,
{
    FnFetcher(f)
}

#[async_trait]
impl<T, F, Fut> PageFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageResponse<T>, FetchError>> + Send,
{
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse<T>, FetchError> {
        (self.0)(request).await
    }
}
