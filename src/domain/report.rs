use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::waste_record::WasteCategory;

/// Inclusive date window used by the reporting queries.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ReportWindow {
    pub from: NaiveDate,
    pub until: NaiveDate,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: WasteCategory,
    pub total_kg: f64,
}

/// Whole-dataset aggregates shown on the dashboard, computed by SQL.
///
/// Unlike the per-page quick stats these cover the full filtered set.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
pub struct DashboardTotals {
    pub active_students: i64,
    pub active_suppliers: i64,
    pub roles: i64,
    pub waste_total_kg: f64,
    pub waste_by_category: Vec<CategoryTotal>,
}
