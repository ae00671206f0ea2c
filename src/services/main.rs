use chrono::{Days, NaiveDate};

use crate::auth::AuthenticatedUser;
use crate::domain::report::ReportWindow;
use crate::dto::main::DashboardPageData;
use crate::nav::prefs::{MenuState, PreferencesStore};
use crate::repository::ReportReader;
use crate::services::ServiceResult;

/// Days of waste history shown on the dashboard, including today.
const DASHBOARD_WINDOW_DAYS: u64 = 30;

/// Loads the dashboard aggregates. The dashboard itself is visible to every
/// signed-in user; the sidebar decides what else they can reach.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<DashboardPageData>
where
    R: ReportReader + ?Sized,
{
    let from = today
        .checked_sub_days(Days::new(DASHBOARD_WINDOW_DAYS - 1))
        .unwrap_or(today);
    let window = ReportWindow { from, until: today };
    let totals = repo.dashboard_totals(user.school_id, window)?;

    Ok(DashboardPageData { totals, window })
}

/// Persists the sidebar state posted by the client. Concurrent tabs race on
/// last-write-wins.
pub fn save_menu_state<S: PreferencesStore>(store: &S, state: &MenuState) -> ServiceResult<()> {
    store.save(state).map_err(|err| {
        log::error!("Failed to save menu state: {err}");
        crate::services::ServiceError::Form("Could not save sidebar preferences".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::DashboardTotals;
    use crate::repository::mock::MockRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "head@school.test".to_string(),
            name: "Head".to_string(),
            school_id: 1,
            roles: vec![],
            exp: 10_000_000_000,
        }
    }

    #[test]
    fn dashboard_window_covers_thirty_days() {
        let mut repo = MockRepository::new();
        repo.expect_dashboard_totals().returning(|_, window| {
            assert_eq!(
                window.until.signed_duration_since(window.from).num_days(),
                29
            );
            Ok(DashboardTotals::default())
        });

        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let data = load_dashboard(&repo, &sample_user(), today).unwrap();
        assert_eq!(data.window.until, today);
    }
}
