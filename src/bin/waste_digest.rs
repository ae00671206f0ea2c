//! Walks the waste-record pages for one school and logs a per-category
//! digest. Intended for a nightly cron next to the web server.

use std::collections::BTreeMap;

use gizi_dashboard::db::establish_connection_pool;
use gizi_dashboard::domain::waste_record::WasteRecord;
use gizi_dashboard::dto::waste::WastePageStats;
use gizi_dashboard::listing::{ListResource, MAX_PAGE_SIZE, PageSource};
use gizi_dashboard::repository::DieselRepository;
use gizi_dashboard::services::waste::WastePageSource;

fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| String::from("gizi.db"));
    let school_id: i32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let pool = establish_connection_pool(&database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    let repo = DieselRepository::new(pool);
    let source = WastePageSource::new(&repo, school_id);

    let mut list: ListResource<WasteRecord, WastePageStats> = ListResource::new();
    let ticket = list.set_page_size(MAX_PAGE_SIZE);
    list.complete(ticket, source.fetch(list.query()));

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut records = 0usize;

    loop {
        if let Some(error) = list.error() {
            log::error!("Fetch failed: {error}");
            return Err(std::io::Error::other(error.to_string()));
        }

        records += list.items().len();
        for (category, weight) in &list.stats().by_category {
            *totals.entry(category.clone()).or_insert(0.0) += weight;
        }

        if !list.info().has_next {
            break;
        }
        let next_page = list.info().page + 1;
        let ticket = list.set_page(next_page);
        list.complete(ticket, source.fetch(list.query()));
    }

    log::info!("{records} waste records on file for school {school_id}");
    for (category, weight) in totals {
        log::info!("  {category}: {weight:.2} kg");
    }

    Ok(())
}
