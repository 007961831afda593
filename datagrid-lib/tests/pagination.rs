//! Server-side pagination: mount, fencing and error handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use datagrid_lib::pagination::page_count_for;
use datagrid_lib::prelude::*;

/// A fake backend of `total` numbered rows.
#[derive(Clone, Default)]
struct Backend {
    total: usize,
    requests: Arc<Mutex<Vec<PageRequest>>>,
    failing: Arc<AtomicBool>,
    /// Page index answered slowly, to provoke out-of-order responses.
    slow_page: Option<usize>,
    error_message: &'static str,
}

impl Backend {
    fn new(total: usize) -> Self {
        Self {
            total,
            error_message: "backend unavailable",
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher<usize> for Backend {
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse<usize>, FetchError> {
        self.requests.lock().unwrap().push(request);
        let delay = if self.slow_page == Some(request.page_index) {
            50
        } else {
            5
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::from(self.error_message));
        }
        let start = request.page_index * request.page_size;
        let end = (start + request.page_size).min(self.total);
        Ok(PageResponse::new(
            (start..end).collect(),
            self.total,
            page_count_for(self.total, request.page_size),
        ))
    }
}

fn table(backend: &Backend, config: TableConfig) -> DataTable<usize> {
    DataTable::builder(vec![ColumnDef::new("n", "N", |n: &usize| {
        CellValue::Number(*n as f64)
    })])
    .with_config(config)
    .with_fetcher(backend.clone())
    .build()
}

// =============================================================================
// Mount
// =============================================================================

#[tokio::test]
async fn test_mount_fetches_once_with_initial_request() {
    let backend = Backend::new(100);
    let table = table(
        &backend,
        TableConfig::default()
            .with_initial_page_index(2)
            .with_page_size(5),
    );
    assert_eq!(table.mode(), PaginationMode::Server);

    assert!(table.mount().await);
    assert!(!table.mount().await);

    assert_eq!(
        backend.requests(),
        vec![PageRequest {
            page_index: 2,
            page_size: 5
        }]
    );
    assert_eq!(table.rows(), vec![10, 11, 12, 13, 14]);
    let state = table.pagination_state();
    assert_eq!(state.total_rows, 100);
    assert_eq!(state.page_count, 20);
}

#[tokio::test]
async fn test_mount_disabled() {
    let backend = Backend::new(100);
    let table = table(&backend, TableConfig::default().with_fetch_on_mount(false));

    assert!(!table.mount().await);
    assert!(backend.requests().is_empty());
    assert!(table.rows().is_empty());
}

#[tokio::test]
async fn test_loading_while_in_flight() {
    let backend = Backend::new(30);
    let table = table(&backend, TableConfig::default());

    let (_, loading, body) = tokio::join!(table.mount(), async { table.is_loading() }, async {
        table.view(1024).body
    });

    assert!(loading);
    assert_eq!(body, TableBody::Loading { colspan: 2 });
    assert!(!table.is_loading());
}

// =============================================================================
// Page changes
// =============================================================================

#[tokio::test]
async fn test_page_size_change_fetches_first_page() {
    let backend = Backend::new(100);
    let table = table(&backend, TableConfig::default());
    table.mount().await;
    table.set_page_index(3).await;

    table.set_page_size(20).await;

    assert_eq!(
        backend.requests().last(),
        Some(&PageRequest {
            page_index: 0,
            page_size: 20
        })
    );
    let state = table.pagination_state();
    assert_eq!(state.page_index, 0);
    assert_eq!(state.page_count, 5);
    assert_eq!(table.rows().len(), 20);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let backend = Backend {
        slow_page: Some(1),
        ..Backend::new(100)
    };
    let table = table(&backend, TableConfig::default());

    // Page 1 answers after page 2 does.
    tokio::join!(table.set_page_index(1), table.set_page_index(2));

    assert_eq!(table.pagination_state().page_index, 2);
    assert_eq!(table.rows(), (20..30).collect::<Vec<_>>());
    assert!(!table.is_loading());
}

#[tokio::test]
async fn test_selection_cleared_on_page_fetch() {
    let backend = Backend::new(100);
    let table = table(&backend, TableConfig::default());
    table.mount().await;
    table.toggle_all_on_page(true);
    assert_eq!(table.selected_ids().len(), 10);

    // Default ids are positions on the page, so a new page shares none.
    table.set_page_size(5).await;

    assert!(table.selected_ids().is_empty());
}

#[tokio::test]
async fn test_next_page_does_not_carry_selection() {
    let backend = Backend::new(100);
    let table = table(&backend, TableConfig::default());
    table.mount().await;
    assert!(table.toggle_row("0"));
    assert_eq!(table.selected_rows(), vec![0]);

    table.next_page().await;

    assert_eq!(table.rows()[0], 10);
    assert!(table.selected_rows().is_empty());
    assert_eq!(table.view(1024).header.select_all, CheckState::Unchecked);
}

#[tokio::test]
async fn test_selection_kept_with_row_ids() {
    let backend = Backend::new(100);
    let table = DataTable::builder(vec![ColumnDef::new("n", "N", |n: &usize| {
        CellValue::Number(*n as f64)
    })])
    .with_fetcher(backend.clone())
    .with_row_id(|n: &usize, _| n.to_string())
    .build();
    table.mount().await;
    table.toggle_all_on_page(true);

    table.set_page_size(5).await;

    assert_eq!(table.selected_rows(), vec![0, 1, 2, 3, 4]);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_error_keeps_previous_page() {
    let backend = Backend::new(100);
    let table = table(&backend, TableConfig::default());
    table.mount().await;
    let first_page = table.rows();

    backend.fail(true);
    table.next_page().await;

    assert_eq!(table.error().as_deref(), Some("backend unavailable"));
    assert_eq!(table.rows(), first_page);
    // The requested page stays committed so refresh retries it.
    assert_eq!(table.pagination_state().page_index, 1);
    let view = table.view(1024);
    assert_eq!(view.error.as_deref(), Some("backend unavailable"));
    assert!(matches!(view.body, TableBody::Rows(_)));

    backend.fail(false);
    table.refresh().await;

    assert_eq!(table.error(), None);
    assert_eq!(table.rows(), (10..20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_blank_error_uses_fallback_message() {
    let backend = Backend {
        error_message: "  ",
        ..Backend::new(10)
    };
    backend.fail(true);
    let table = table(&backend, TableConfig::default());

    table.mount().await;

    assert_eq!(table.error().as_deref(), Some("Failed to fetch data"));
    assert_eq!(
        table.view(1024).body,
        TableBody::Empty { colspan: 2 }
    );
}

// =============================================================================
// Quick filters over a server page
// =============================================================================

#[tokio::test]
async fn test_quick_filter_narrows_page_only() {
    let calls = Arc::new(Mutex::new(0));
    let fetcher = fetcher_fn({
        let calls = Arc::clone(&calls);
        move |request: PageRequest| {
            *calls.lock().unwrap() += 1;
            async move {
                let start = request.page_index * request.page_size;
                Ok(PageResponse::new(
                    (start..start + request.page_size).collect::<Vec<usize>>(),
                    100,
                    page_count_for(100, request.page_size),
                ))
            }
        }
    });
    let table = DataTable::builder(vec![ColumnDef::new("n", "N", |n: &usize| {
        CellValue::Number(*n as f64)
    })])
    .with_fetcher(fetcher)
    .with_quick_filter(QuickFilter::new("Even", |n: &usize| n % 2 == 0))
    .build();
    table.mount().await;

    table.toggle_quick_filter("Even");

    assert_eq!(table.rows(), vec![0, 2, 4, 6, 8]);
    assert_eq!(table.pagination_state().total_rows, 100);
    assert_eq!(*calls.lock().unwrap(), 1);
}
