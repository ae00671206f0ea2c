use crate::auth::AuthenticatedUser;
use crate::domain::waste_record::WasteRecord;
use crate::dto::waste::{WasteDetailPageData, WasteListParams, WastePageData, WastePageStats};
use crate::forms::waste::{AddWasteRecordForm, SaveWasteRecordForm};
use crate::listing::{FetchError, ListQuery, PageInfo, PageResult, PageSource, PageStats};
use crate::nav::Access;
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryError;
use crate::repository::{WasteRecordReader, WasteRecordWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_access, ensure_permission, map_write_error, validate_form,
};

pub fn list_waste_records<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: &WasteListParams,
) -> ServiceResult<(Vec<WasteRecord>, PageInfo)>
where
    R: WasteRecordReader + ?Sized,
{
    ensure_access(access, "/waste")?;

    let query = params.to_query(user.school_id)?;
    let (total, records) = repo.list_waste_records(query)?;
    let info = PageInfo::new(params.page(), params.limit(), total);
    Ok((records, info))
}

pub fn load_list_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: WasteListParams,
) -> ServiceResult<WastePageData>
where
    R: WasteRecordReader + ?Sized,
{
    let (records, info) = list_waste_records(repo, user, access, &params)?;
    let stats = WastePageStats::from_page(&records);

    Ok(WastePageData {
        records: Paginated::new(records, &info),
        stats,
        search: params.search,
        selected_category: params.category,
        selected_source: params.source,
        from: params.from,
        until: params.until,
    })
}

pub fn get_waste_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    record_id: i32,
) -> ServiceResult<WasteRecord>
where
    R: WasteRecordReader + ?Sized,
{
    ensure_access(access, "/waste")?;
    repo.get_waste_record_by_id(record_id, user.school_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_detail_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    record_id: i32,
) -> ServiceResult<WasteDetailPageData>
where
    R: WasteRecordReader + ?Sized,
{
    let record = get_waste_record(repo, user, access, record_id)?;
    Ok(WasteDetailPageData { record })
}

pub fn add_waste_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: AddWasteRecordForm,
) -> ServiceResult<WasteRecord>
where
    R: WasteRecordWriter + ?Sized,
{
    ensure_permission(access, "waste.manage")?;
    validate_form(&form)?;

    let new_record = form.to_new_record(user.school_id)?;
    repo.create_waste_record(&new_record)
        .map_err(map_write_error)
}

pub fn update_waste_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: SaveWasteRecordForm,
) -> ServiceResult<WasteRecord>
where
    R: WasteRecordReader + WasteRecordWriter + ?Sized,
{
    ensure_permission(access, "waste.manage")?;
    validate_form(&form)?;

    repo.get_waste_record_by_id(form.id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.to_update_record()?;
    repo.update_waste_record(form.id, &updates)
        .map_err(map_write_error)
}

pub fn delete_waste_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    record_id: i32,
) -> ServiceResult<()>
where
    R: WasteRecordReader + WasteRecordWriter + ?Sized,
{
    ensure_permission(access, "waste.manage")?;

    repo.get_waste_record_by_id(record_id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.delete_waste_record(record_id)?)
}

/// Adapter exposing the waste repository as a [`PageSource`], for consumers
/// that browse pages through a long-lived [`crate::listing::ListResource`]
/// (e.g. the `waste-digest` binary).
pub struct WastePageSource<'a, R> {
    repo: &'a R,
    school_id: i32,
}

impl<'a, R> WastePageSource<'a, R> {
    pub fn new(repo: &'a R, school_id: i32) -> Self {
        Self { repo, school_id }
    }
}

impl<R> PageSource<WasteRecord> for WastePageSource<'_, R>
where
    R: WasteRecordReader + WasteRecordWriter,
{
    fn fetch(&self, query: &ListQuery) -> Result<PageResult<WasteRecord>, FetchError> {
        let params = WasteListParams {
            search: Some(query.search().to_string()),
            category: query.filter("category").map(str::to_string),
            source: query.filter("source").map(str::to_string),
            from: query.filter("from").map(str::to_string),
            until: query.filter("until").map(str::to_string),
            page: Some(query.page()),
            limit: Some(query.per_page()),
        };

        let list_query = params
            .to_query(self.school_id)
            .map_err(|err| FetchError::Backend(err.to_string()))?;
        let (total, items) = self
            .repo
            .list_waste_records(list_query)
            .map_err(fetch_error)?;

        Ok(PageResult {
            items,
            info: PageInfo::new(query.page(), query.per_page(), total),
        })
    }

    fn remove(&self, id: i32) -> Result<(), FetchError> {
        match self.repo.get_waste_record_by_id(id, self.school_id) {
            Ok(Some(_)) => self.repo.delete_waste_record(id).map_err(fetch_error),
            Ok(None) => Err(FetchError::Backend("Record not found".to_string())),
            Err(err) => Err(fetch_error(err)),
        }
    }
}

fn fetch_error(err: RepositoryError) -> FetchError {
    match err {
        RepositoryError::NotFound
        | RepositoryError::ValidationError(_)
        | RepositoryError::ConstraintViolation(_) => FetchError::Backend(err.to_string()),
        RepositoryError::DatabaseError(_)
        | RepositoryError::ConnectionError(_)
        | RepositoryError::Unexpected(_) => FetchError::Transport(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::waste_record::{WasteCategory, WasteSource};
    use crate::repository::mock::MockRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "kitchen@school.test".to_string(),
            name: "Kitchen".to_string(),
            school_id: 1,
            roles: vec!["kitchen".to_string()],
            exp: 10_000_000_000,
        }
    }

    fn sample_record(id: i32, weight_kg: f64) -> WasteRecord {
        let now = Utc::now().naive_utc();
        WasteRecord {
            id,
            school_id: 1,
            recorded_on: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            category: WasteCategory::Leftover,
            source: WasteSource::Serving,
            weight_kg,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn view_only_access_cannot_log_waste() {
        let repo = MockRepository::new();
        let access = Access::from_permissions(vec!["waste.view".to_string()]);
        let form = AddWasteRecordForm {
            recorded_on: "2025-06-02".to_string(),
            category: "leftover".to_string(),
            source: "serving".to_string(),
            weight_kg: 1.0,
            notes: String::new(),
        };
        let result = add_waste_record(&repo, &sample_user(), &access, form);
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn page_source_translates_list_queries() {
        let mut repo = MockRepository::new();
        repo.expect_list_waste_records().returning(|query| {
            assert_eq!(query.category, Some(WasteCategory::Leftover));
            assert!(query.source.is_none());
            let pagination = query.pagination.expect("pagination expected");
            assert_eq!(pagination.page, 2);
            Ok((13, vec![sample_record(1, 2.0)]))
        });

        let source = WastePageSource::new(&repo, 1);
        let mut query = ListQuery::new();
        query.set_filter("category", "leftover");
        query.set_filter("source", "all");
        query.set_page(2);

        let page = source.fetch(&query).unwrap();
        assert_eq!(page.info.total, 13);
        assert_eq!(page.info.page, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn page_source_remove_is_school_scoped() {
        let mut repo = MockRepository::new();
        repo.expect_get_waste_record_by_id()
            .returning(|_, _| Ok(None));

        let source = WastePageSource::new(&repo, 1);
        let result = source.remove(99);
        assert!(matches!(result, Err(FetchError::Backend(_))));
    }
}
