//! Whole-dataset aggregate queries behind the dashboard.

use diesel::dsl::sum;
use diesel::prelude::*;

use crate::domain::report::{CategoryTotal, DashboardTotals, ReportWindow};
use crate::domain::supplier::SupplierStatus;
use crate::domain::waste_record::WasteCategory;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ReportReader};

impl ReportReader for DieselRepository {
    fn dashboard_totals(
        &self,
        school_id: i32,
        window: ReportWindow,
    ) -> RepositoryResult<DashboardTotals> {
        use crate::schema::{roles, students, suppliers, waste_records};

        let mut conn = self.conn()?;

        let active_students: i64 = students::table
            .filter(students::school_id.eq(school_id))
            .filter(students::active.eq(true))
            .count()
            .get_result(&mut conn)?;

        let active_suppliers: i64 = suppliers::table
            .filter(suppliers::school_id.eq(school_id))
            .filter(suppliers::status.eq(SupplierStatus::Active.as_str()))
            .count()
            .get_result(&mut conn)?;

        let role_count: i64 = roles::table
            .filter(roles::school_id.eq(school_id))
            .count()
            .get_result(&mut conn)?;

        let grouped = waste_records::table
            .filter(waste_records::school_id.eq(school_id))
            .filter(waste_records::recorded_on.ge(window.from))
            .filter(waste_records::recorded_on.le(window.until))
            .group_by(waste_records::category)
            .select((waste_records::category, sum(waste_records::weight_kg)))
            .load::<(String, Option<f64>)>(&mut conn)?;

        // Every category shows up on the dashboard, logged or not.
        let waste_by_category = WasteCategory::ALL
            .iter()
            .map(|category| {
                let total_kg = grouped
                    .iter()
                    .find(|(name, _)| name == category.as_str())
                    .and_then(|(_, total)| *total)
                    .unwrap_or(0.0);
                CategoryTotal {
                    category: *category,
                    total_kg,
                }
            })
            .collect::<Vec<_>>();

        let waste_total_kg = waste_by_category.iter().map(|t| t.total_kg).sum();

        Ok(DashboardTotals {
            active_students,
            active_suppliers,
            roles: role_count,
            waste_total_kg,
            waste_by_category,
        })
    }
}
