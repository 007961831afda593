//! Column configuration through the table API, and the view model.

use std::sync::Arc;

use datagrid_lib::prelude::*;

#[derive(Debug, Clone)]
struct Server {
    host: &'static str,
    region: &'static str,
    cpu: f64,
    healthy: bool,
}

fn servers() -> Vec<Server> {
    vec![
        Server { host: "web-1", region: "eu-west", cpu: 0.42, healthy: true },
        Server { host: "web-2", region: "eu-west", cpu: 0.97, healthy: false },
        Server { host: "db-1", region: "us-east", cpu: 0.15, healthy: true },
    ]
}

fn columns() -> Vec<ColumnDef<Server>> {
    vec![
        ColumnDef::new("host", "Host", |s: &Server| s.host.into()).no_hide(),
        ColumnDef::new("region", "Region", |s: &Server| s.region.into()),
        ColumnDef::new("cpu", "CPU", |s: &Server| s.cpu.into()).no_filter(),
        ColumnDef::new("healthy", "Healthy", |s: &Server| s.healthy.into()),
    ]
}

fn builder() -> datagrid_lib::DataTableBuilder<Server> {
    DataTable::builder(columns()).with_rows(servers())
}

fn visible(table: &DataTable<Server>) -> Vec<String> {
    table.visible_columns().into_iter().map(|c| c.id).collect()
}

// =============================================================================
// Visibility and order
// =============================================================================

#[test]
fn test_hide_all_keeps_required_columns() {
    let table = builder().build();

    table.hide_all_columns();
    assert_eq!(visible(&table), vec!["host"]);

    table.show_all_columns();
    assert_eq!(visible(&table), vec!["host", "region", "cpu", "healthy"]);
}

#[test]
fn test_cannot_hide_required_column() {
    let table = builder().build();
    assert!(!table.toggle_column("host"));
    assert!(!table.set_column_visibility("host", false));
    assert!(!table.toggle_column("nope"));
    assert!(table.column_config().is_visible("host"));
}

#[test]
fn test_pinned_columns_display_first_and_last() {
    let table = builder().build();

    assert!(table.pin_column("healthy", Some(PinSide::Left)));
    assert!(table.pin_column("host", Some(PinSide::Right)));
    assert_eq!(visible(&table), vec!["healthy", "region", "cpu", "host"]);

    let view = table.view(1024);
    assert_eq!(view.header.cells[0].pinned, Some(PinSide::Left));
    assert_eq!(view.header.cells[3].pinned, Some(PinSide::Right));

    table.pin_column("host", None);
    assert_eq!(visible(&table), vec!["healthy", "host", "region", "cpu"]);
}

#[test]
fn test_reorder() {
    let table = builder().build();
    assert!(table.reorder_columns(3, 0));
    assert_eq!(visible(&table), vec!["healthy", "host", "region", "cpu"]);
    assert!(!table.reorder_columns(0, 9));
}

#[test]
fn test_default_column_config() {
    let table = builder()
        .with_default_columns(
            ColumnConfig::for_columns(["host", "region", "cpu", "healthy"]).hidden("cpu"),
        )
        .build();
    assert_eq!(visible(&table), vec!["host", "region", "healthy"]);

    table.show_all_columns();
    table.reset_columns();
    assert_eq!(visible(&table), vec!["host", "region", "healthy"]);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_config_survives_rebuild() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());
    let config = TableConfig::default().with_storage_key("servers");

    let first = builder()
        .with_config(config.clone())
        .with_store(Arc::clone(&store))
        .build();
    first.toggle_column("region");
    first.pin_column("cpu", Some(PinSide::Left));
    assert!(store.get("servers").unwrap().is_some());

    let second = builder()
        .with_config(config)
        .with_store(Arc::clone(&store))
        .build();
    assert_eq!(visible(&second), vec!["cpu", "host", "healthy"]);

    second.reset_columns();
    assert_eq!(visible(&second), vec!["host", "region", "cpu", "healthy"]);
    let stored: ColumnConfig =
        serde_json::from_value(store.get("servers").unwrap().unwrap()).unwrap();
    assert_eq!(stored, second.column_config());
}

#[test]
fn test_no_storage_key_means_no_writes() {
    let store = Arc::new(MemoryStore::new());
    let table = builder().with_store(store.clone()).build();

    table.toggle_column("region");

    assert!(store.is_empty());
}

// =============================================================================
// View
// =============================================================================

#[test]
fn test_mobile_cards_below_breakpoint() {
    let table = builder()
        .with_mobile_card(|s: &Server| {
            MobileCard::new(s.host).field("Region", s.region)
        })
        .build();

    let wide = table.view(1280);
    assert_eq!(wide.layout, BodyLayout::Grid);
    assert!(matches!(wide.body, TableBody::Rows(ref rows) if rows.len() == 3));

    let narrow = table.view(375);
    assert_eq!(narrow.layout, BodyLayout::Cards);
    let TableBody::Cards(cards) = narrow.body else {
        panic!("expected cards");
    };
    assert_eq!(cards[2].card.title, "db-1");
    assert_eq!(cards[2].card.fields, vec![("Region".to_string(), "us-east".to_string())]);
}

#[test]
fn test_narrow_without_card_renderer_stays_grid() {
    let table = builder().build();
    assert_eq!(table.view(375).layout, BodyLayout::Grid);
}

#[test]
fn test_row_cells_follow_visible_columns() {
    let table = builder().build();
    table.toggle_column("region");

    let TableBody::Rows(rows) = table.view(1024).body else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].cells, vec!["web-1", "0.42", "true"]);
}

#[test]
fn test_toolbar() {
    let table = builder()
        .with_quick_filter(QuickFilter::new("Unhealthy", |s: &Server| !s.healthy))
        .with_bulk_action(
            BulkAction::new("Restart", |_rows: Vec<Server>| async { Ok(()) })
                .variant(ActionVariant::Destructive)
                .disabled_when(|rows| rows.iter().any(|s| s.healthy))
                .confirm(ConfirmOptions::new("Restart servers?", "")),
        )
        .build();

    let toolbar = table.view(1024).toolbar;
    assert!(toolbar.bulk_bar.is_none());
    assert!(toolbar.can_export);
    assert_eq!(toolbar.quick_filters[0].label, "Unhealthy");
    assert!(!toolbar.quick_filters[0].active);
    let panel: Vec<&str> = toolbar.filter_panel.iter().map(|f| f.column_id.as_str()).collect();
    assert_eq!(panel, vec!["host", "region", "healthy"]);

    table.toggle_quick_filter("Unhealthy");
    table.toggle_all_on_page(true);
    table.set_column_filter("region", ColumnFilter::contains("eu"));

    let toolbar = table.view(1024).toolbar;
    let bar = toolbar.bulk_bar.expect("bulk bar while rows are selected");
    assert_eq!(bar.selected_count, 1);
    assert_eq!(bar.actions[0].variant, ActionVariant::Destructive);
    assert!(!bar.actions[0].disabled);
    assert!(bar.actions[0].needs_confirm);
    assert_eq!(
        toolbar.filter_panel[1].filter,
        Some(ColumnFilter::contains("eu"))
    );
}

#[test]
fn test_footer() {
    let table = builder()
        .with_config(TableConfig::default().with_page_size(2))
        .build();

    let footer = table.view(1024).footer;
    assert_eq!(footer.pagination.page_count, 2);
    assert!(footer.can_next);
    assert!(!footer.can_previous);
    assert_eq!(footer.page_size_options, vec![10, 20, 30, 50, 100]);
}
