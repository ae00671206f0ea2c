use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;
use crate::domain::supplier::{Supplier, SupplierCategory, SupplierStatus};
use crate::dto::{selected, trimmed};
use crate::listing::{self, PageStats};
use crate::pagination::Paginated;
use crate::repository::SupplierListQuery;

/// Query parameters accepted by the suppliers list page and API.
#[derive(Debug, Default, Deserialize)]
pub struct SupplierListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl SupplierListParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        listing::clamp_page_size(self.limit.unwrap_or(listing::DEFAULT_PAGE_SIZE))
    }

    pub fn to_query(&self, school_id: i32) -> Result<SupplierListQuery, UnknownVariant> {
        let mut query = SupplierListQuery::new(school_id).paginate(self.page(), self.limit());
        if let Some(term) = trimmed(&self.search) {
            query = query.search(term);
        }
        if let Some(value) = selected(&self.category) {
            query = query.category(SupplierCategory::try_from(value)?);
        }
        if let Some(value) = selected(&self.status) {
            query = query.status(SupplierStatus::try_from(value)?);
        }
        Ok(query)
    }
}

/// Quick stats over the fetched page only.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct SupplierPageStats {
    pub active: usize,
    pub inactive: usize,
}

impl PageStats<Supplier> for SupplierPageStats {
    fn from_page(items: &[Supplier]) -> Self {
        let active = items
            .iter()
            .filter(|s| s.status == SupplierStatus::Active)
            .count();
        Self {
            active,
            inactive: items.len() - active,
        }
    }
}

/// Data required to render the suppliers list template.
pub struct SuppliersPageData {
    pub suppliers: Paginated<Supplier>,
    pub stats: SupplierPageStats,
    pub search: Option<String>,
    pub selected_category: Option<String>,
    pub selected_status: Option<String>,
}

/// Data required to render the supplier detail template.
pub struct SupplierDetailPageData {
    pub supplier: Supplier,
}
