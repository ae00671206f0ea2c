use crate::domain::report::{DashboardTotals, ReportWindow};

/// Data required to render the dashboard template.
pub struct DashboardPageData {
    pub totals: DashboardTotals,
    pub window: ReportWindow,
}
