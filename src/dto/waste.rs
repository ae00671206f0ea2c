use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;
use crate::domain::waste_record::{WasteCategory, WasteRecord, WasteSource};
use crate::dto::{selected, trimmed};
use crate::listing::{self, PageStats};
use crate::pagination::Paginated;
use crate::repository::WasteListQuery;

/// Query parameters accepted by the waste-records list page and API.
#[derive(Debug, Default, Deserialize)]
pub struct WasteListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    /// Inclusive ISO date bounds.
    pub from: Option<String>,
    pub until: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl WasteListParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        listing::clamp_page_size(self.limit.unwrap_or(listing::DEFAULT_PAGE_SIZE))
    }

    pub fn to_query(&self, school_id: i32) -> Result<WasteListQuery, UnknownVariant> {
        let mut query = WasteListQuery::new(school_id).paginate(self.page(), self.limit());
        if let Some(term) = trimmed(&self.search) {
            query = query.search(term);
        }
        if let Some(value) = selected(&self.category) {
            query = query.category(WasteCategory::try_from(value)?);
        }
        if let Some(value) = selected(&self.source) {
            query = query.source(WasteSource::try_from(value)?);
        }
        if let Some(raw) = trimmed(&self.from) {
            query.from = Some(parse_date(raw)?);
        }
        if let Some(raw) = trimmed(&self.until) {
            query.until = Some(parse_date(raw)?);
        }
        Ok(query)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, UnknownVariant> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| UnknownVariant::new("date", raw))
}

/// Quick stats over the fetched page only.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct WastePageStats {
    pub total_weight_kg: f64,
    pub by_category: BTreeMap<String, f64>,
}

impl PageStats<WasteRecord> for WastePageStats {
    fn from_page(items: &[WasteRecord]) -> Self {
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut total = 0.0;
        for record in items {
            total += record.weight_kg;
            *by_category
                .entry(record.category.as_str().to_string())
                .or_insert(0.0) += record.weight_kg;
        }
        Self {
            total_weight_kg: total,
            by_category,
        }
    }
}

/// Data required to render the waste-records list template.
pub struct WastePageData {
    pub records: Paginated<WasteRecord>,
    pub stats: WastePageStats,
    pub search: Option<String>,
    pub selected_category: Option<String>,
    pub selected_source: Option<String>,
    pub from: Option<String>,
    pub until: Option<String>,
}

/// Data required to render the waste-record detail template.
pub struct WasteDetailPageData {
    pub record: WasteRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(category: WasteCategory, weight_kg: f64) -> WasteRecord {
        let now = Utc::now().naive_utc();
        WasteRecord {
            id: 1,
            school_id: 1,
            recorded_on: now.date(),
            category,
            source: WasteSource::Kitchen,
            weight_kg,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stats_sum_the_current_page() {
        let page = vec![
            record(WasteCategory::Leftover, 2.0),
            record(WasteCategory::Leftover, 1.5),
            record(WasteCategory::Spoiled, 0.5),
        ];
        let stats = WastePageStats::from_page(&page);
        assert_eq!(stats.total_weight_kg, 4.0);
        assert_eq!(stats.by_category["leftover"], 3.5);
        assert_eq!(stats.by_category["spoiled"], 0.5);
    }

    #[test]
    fn date_filters_parse_iso() {
        let params = WasteListParams {
            from: Some("2025-06-01".to_string()),
            until: Some("2025-06-30".to_string()),
            ..Default::default()
        };
        let query = params.to_query(1).unwrap();
        assert_eq!(query.from, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(query.until, NaiveDate::from_ymd_opt(2025, 6, 30));

        let params = WasteListParams {
            from: Some("June 1".to_string()),
            ..Default::default()
        };
        assert!(params.to_query(1).is_err());
    }
}
