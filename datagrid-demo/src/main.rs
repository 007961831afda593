mod paths;

use std::error::Error;
use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use datagrid_lib::pagination::page_count_for;
use datagrid_lib::prelude::*;
use serde::Serialize;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone, Serialize)]
struct Contact {
    id: u32,
    name: String,
    email: String,
    company: String,
    active: bool,
}

const COMPANIES: [&str; 4] = ["Acme", "Globex", "Initech", "Umbrella"];
const FIRST_NAMES: [&str; 6] = ["Ada", "Grace", "Alan", "Edsger", "Barbara", "Ken"];

fn seed_contacts(count: u32) -> Vec<Contact> {
    (0..count)
        .map(|id| {
            let first = FIRST_NAMES[id as usize % FIRST_NAMES.len()];
            let company = COMPANIES[id as usize % COMPANIES.len()];
            Contact {
                id,
                name: format!("{} #{}", first, id),
                email: format!("{}.{}@{}.example", first.to_lowercase(), id, company.to_lowercase()),
                company: company.to_string(),
                active: id % 3 != 0,
            }
        })
        .collect()
}

/// Simulated remote contacts API with network latency.
struct ContactsApi {
    contacts: Vec<Contact>,
    latency: Duration,
}

#[async_trait]
impl PageFetcher<Contact> for ContactsApi {
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse<Contact>, FetchError> {
        tokio::time::sleep(self.latency).await;
        let total = self.contacts.len();
        let data = self
            .contacts
            .iter()
            .skip(request.page_index * request.page_size)
            .take(request.page_size)
            .cloned()
            .collect();
        Ok(PageResponse::new(
            data,
            total,
            page_count_for(total, request.page_size),
        ))
    }
}

/// Non-interactive confirmer: prints the prompt and accepts.
struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, options: ConfirmOptions) -> bool {
        println!(
            "? {} {} [{}]",
            options.title,
            options.description,
            options.confirm_label.as_deref().unwrap_or("Confirm")
        );
        true
    }
}

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Failed to create {}: {}", dir.display(), e);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create {}: {}", path.display(), e),
    }
}

fn open_store() -> Arc<dyn ConfigStore> {
    let opened = paths::preferences_db().map(|path| {
        if let Some(dir) = path.parent()
            && let Err(e) = std::fs::create_dir_all(dir)
        {
            log::warn!("Failed to create {}: {}", dir.display(), e);
        }
        SqliteStore::open(&path)
    });
    match opened {
        Some(Ok(store)) => Arc::new(store),
        Some(Err(e)) => {
            log::warn!("Falling back to in-memory preferences: {}", e);
            Arc::new(MemoryStore::new())
        }
        None => Arc::new(MemoryStore::new()),
    }
}

fn columns() -> Vec<ColumnDef<Contact>> {
    vec![
        ColumnDef::new("name", "Name", |c: &Contact| c.name.clone().into()).no_hide(),
        ColumnDef::new("email", "Email", |c: &Contact| c.email.clone().into()),
        ColumnDef::new("company", "Company", |c: &Contact| c.company.clone().into()),
        ColumnDef::new("active", "Active", |c: &Contact| c.active.into()).no_filter(),
    ]
}

fn print_view(title: &str, table: &DataTable<Contact>, width: u32) {
    println!("== {} ==", title);
    print!("{}", render_text(&table.view(width)));
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let config = TableConfig::default()
        .with_page_size(8)
        .with_storage_key("contacts")
        .with_export_filename("contacts");

    let table = DataTable::builder(columns())
        .with_config(config)
        .with_fetcher(ContactsApi {
            contacts: seed_contacts(42),
            latency: Duration::from_millis(150),
        })
        .with_row_id(|c: &Contact, _| c.id.to_string())
        .with_quick_filter(QuickFilter::new("Active only", |c: &Contact| c.active))
        .with_bulk_action(
            BulkAction::new("Archive", |rows: Vec<Contact>| async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                log::info!("Archived {} contacts", rows.len());
                Ok(())
            })
            .variant(ActionVariant::Destructive)
            .disabled_when(|rows| rows.iter().all(|c| !c.active))
            .confirm(
                ConfirmOptions::new("Archive contacts?", "They can be restored later.")
                    .confirm_label("Archive"),
            ),
        )
        .with_confirmer(AutoConfirm)
        .with_store(open_store())
        .with_mobile_card(|c: &Contact| {
            MobileCard::new(c.name.clone())
                .field("Email", c.email.clone())
                .field("Company", c.company.clone())
        })
        .on_selection_change(|rows: &[Contact]| log::debug!("{} contacts selected", rows.len()))
        .build();

    table.mount().await;
    print_view("Page 1", &table, 1024);

    table.next_page().await;
    table.toggle_sort("company");
    print_view("Page 2, sorted by company", &table, 1024);

    table.toggle_quick_filter("Active only");
    table.set_global_filter("acme");
    print_view("Active Acme contacts on this page", &table, 1024);

    table.clear_filters();
    table.toggle_all_on_page(true);
    match table.run_bulk_action("Archive").await {
        Ok(outcome) => println!("Archive: {:?}\n", outcome),
        Err(e) => println!("Archive failed: {}\n", e),
    }

    table.toggle_column("email");
    print_view("Without email (persisted)", &table, 1024);
    table.reset_columns();

    print_view("Phone-sized viewport", &table, 375);

    let export = table.export_csv()?;
    match paths::export_dir() {
        Some(dir) => {
            let path = export.write_to_dir(dir)?;
            println!("Exported {} rows to {}", export.row_count(), path.display());
        }
        None => print!("{}", export.contents),
    }

    Ok(())
}
