//! Drives the generic list state machine against a real SQLite-backed page
//! source end to end.

use chrono::NaiveDate;

use gizi_dashboard::domain::waste_record::{NewWasteRecord, WasteCategory, WasteRecord, WasteSource};
use gizi_dashboard::dto::waste::WastePageStats;
use gizi_dashboard::listing::{ListResource, ListStatus, PageSource};
use gizi_dashboard::repository::{DieselRepository, WasteRecordWriter};
use gizi_dashboard::services::waste::WastePageSource;

mod common;

fn seed(repo: &DieselRepository, count: usize) {
    for i in 0..count {
        let category = if i % 3 == 0 {
            WasteCategory::Spoiled
        } else {
            WasteCategory::Leftover
        };
        repo.create_waste_record(&NewWasteRecord::new(
            1,
            NaiveDate::from_ymd_opt(2025, 6, 1 + (i % 28) as u32).unwrap(),
            category,
            WasteSource::Serving,
            1.0,
            None,
        ))
        .unwrap();
    }
}

#[test]
fn test_paging_through_repository_source() {
    let test_db = common::TestDb::new("test_listing_paging.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, 23);

    let source = WastePageSource::new(&repo, 1);
    let mut list: ListResource<WasteRecord, WastePageStats> = ListResource::new();

    assert!(list.sync(&source));
    assert_eq!(list.status(), ListStatus::Ready);
    assert_eq!(list.info().total, 23);
    assert_eq!(list.info().total_pages, 3);
    assert!(list.info().has_next);
    assert_eq!(list.items().len(), 10);

    let ticket = list.set_page(3);
    list.complete(ticket, source.fetch(list.query()));
    assert_eq!(list.items().len(), 3);
    assert!(!list.info().has_next);
    assert!(list.info().has_prev);
}

#[test]
fn test_filter_change_resets_to_first_page() {
    let test_db = common::TestDb::new("test_listing_filter_reset.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, 23);

    let source = WastePageSource::new(&repo, 1);
    let mut list: ListResource<WasteRecord, WastePageStats> = ListResource::new();

    let ticket = list.set_page(2);
    list.complete(ticket, source.fetch(list.query()));
    assert_eq!(list.info().page, 2);

    let ticket = list.set_search("anything");
    assert_eq!(list.query().page(), 1);
    list.complete(ticket, source.fetch(list.query()));
    assert_eq!(list.info().page, 1);

    // Filtered by category through the sentinel-aware filter map.
    let ticket = list.set_page(2);
    list.complete(ticket, source.fetch(list.query()));
    let ticket = list.set_search("");
    list.complete(ticket, source.fetch(list.query()));
    let ticket = list.set_page(2);
    list.complete(ticket, source.fetch(list.query()));

    let mut filters = std::collections::BTreeMap::new();
    filters.insert("category".to_string(), "spoiled".to_string());
    filters.insert("source".to_string(), "all".to_string());
    let ticket = list.set_filters(filters);
    list.complete(ticket, source.fetch(list.query()));

    assert_eq!(list.info().page, 1);
    assert_eq!(list.info().total, 8);
    assert!(
        list.items()
            .iter()
            .all(|r| r.category == WasteCategory::Spoiled)
    );
}

#[test]
fn test_page_stats_follow_the_visible_page() {
    let test_db = common::TestDb::new("test_listing_stats.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, 5);

    let source = WastePageSource::new(&repo, 1);
    let mut list: ListResource<WasteRecord, WastePageStats> = ListResource::new();
    assert!(list.sync(&source));

    assert_eq!(list.stats().total_weight_kg, 5.0);
    let by_category_sum: f64 = list.stats().by_category.values().sum();
    assert_eq!(by_category_sum, 5.0);
}

#[test]
fn test_remove_refetches_current_page() {
    let test_db = common::TestDb::new("test_listing_remove.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    seed(&repo, 11);

    let source = WastePageSource::new(&repo, 1);
    let mut list: ListResource<WasteRecord, WastePageStats> = ListResource::new();
    assert!(list.sync(&source));
    assert_eq!(list.info().total, 11);

    let id = list.items()[0].id;
    list.remove(&source, id).unwrap();
    assert_eq!(list.info().total, 10);
    assert!(list.items().iter().all(|r| r.id != id));

    // Removing something that is not there surfaces the backend message and
    // leaves the page alone.
    let before = list.items().len();
    let err = list.remove(&source, 9999).unwrap_err();
    assert!(err.contains("not found"));
    assert_eq!(list.items().len(), before);
}
