use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool};
use crate::domain::report::{DashboardTotals, ReportWindow};
use crate::domain::role::{NewRole, Role, RoleType, UpdateRole};
use crate::domain::student::{Gender, NewStudent, Student, UpdateStudent};
use crate::domain::supplier::{
    NewSupplier, Supplier, SupplierCategory, SupplierStatus, UpdateSupplier,
};
use crate::domain::waste_record::{
    NewWasteRecord, UpdateWasteRecord, WasteCategory, WasteRecord, WasteSource,
};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod report;
pub mod role;
pub mod student;
pub mod supplier;
pub mod waste_record;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Repository backed by the Diesel SQLite pool. All reader/writer traits are
/// implemented on this one handle.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct RoleListQuery {
    pub school_id: i32,
    pub search: Option<String>,
    pub role_type: Option<RoleType>,
    pub permission: Option<String>,
    pub pagination: Option<Pagination>,
}

impl RoleListQuery {
    pub fn new(school_id: i32) -> Self {
        Self {
            school_id,
            search: None,
            role_type: None,
            permission: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn role_type(mut self, role_type: RoleType) -> Self {
        self.role_type = Some(role_type);
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub school_id: i32,
    pub search: Option<String>,
    pub grade: Option<String>,
    pub gender: Option<Gender>,
    pub active: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl StudentListQuery {
    pub fn new(school_id: i32) -> Self {
        Self {
            school_id,
            search: None,
            grade: None,
            gender: None,
            active: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct SupplierListQuery {
    pub school_id: i32,
    pub search: Option<String>,
    pub category: Option<SupplierCategory>,
    pub status: Option<SupplierStatus>,
    pub pagination: Option<Pagination>,
}

impl SupplierListQuery {
    pub fn new(school_id: i32) -> Self {
        Self {
            school_id,
            search: None,
            category: None,
            status: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: SupplierCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn status(mut self, status: SupplierStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct WasteListQuery {
    pub school_id: i32,
    pub search: Option<String>,
    pub category: Option<WasteCategory>,
    pub source: Option<WasteSource>,
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl WasteListQuery {
    pub fn new(school_id: i32) -> Self {
        Self {
            school_id,
            search: None,
            category: None,
            source: None,
            from: None,
            until: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: WasteCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn source(mut self, source: WasteSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn recorded_between(mut self, from: NaiveDate, until: NaiveDate) -> Self {
        self.from = Some(from);
        self.until = Some(until);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait RoleReader {
    fn get_role_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Role>>;
    fn list_roles(&self, query: RoleListQuery) -> RepositoryResult<(usize, Vec<Role>)>;
    /// Union of the permission sets of the named roles, first occurrence
    /// order, deduplicated.
    fn permissions_for_roles(
        &self,
        school_id: i32,
        role_names: &[String],
    ) -> RepositoryResult<Vec<String>>;
}

pub trait RoleWriter {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
    fn update_role(&self, role_id: i32, updates: &UpdateRole) -> RepositoryResult<Role>;
    fn delete_role(&self, role_id: i32) -> RepositoryResult<()>;
}

pub trait StudentReader {
    fn get_student_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Student>>;
    fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(usize, Vec<Student>)>;
}

pub trait StudentWriter {
    fn create_student(&self, new_student: &NewStudent) -> RepositoryResult<Student>;
    fn update_student(&self, student_id: i32, updates: &UpdateStudent)
    -> RepositoryResult<Student>;
    fn delete_student(&self, student_id: i32) -> RepositoryResult<()>;
}

pub trait SupplierReader {
    fn get_supplier_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Supplier>>;
    fn list_suppliers(&self, query: SupplierListQuery) -> RepositoryResult<(usize, Vec<Supplier>)>;
}

pub trait SupplierWriter {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier>;
    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &UpdateSupplier,
    ) -> RepositoryResult<Supplier>;
    fn delete_supplier(&self, supplier_id: i32) -> RepositoryResult<()>;
}

pub trait WasteRecordReader {
    fn get_waste_record_by_id(
        &self,
        id: i32,
        school_id: i32,
    ) -> RepositoryResult<Option<WasteRecord>>;
    fn list_waste_records(
        &self,
        query: WasteListQuery,
    ) -> RepositoryResult<(usize, Vec<WasteRecord>)>;
}

pub trait WasteRecordWriter {
    fn create_waste_record(&self, new_record: &NewWasteRecord) -> RepositoryResult<WasteRecord>;
    fn update_waste_record(
        &self,
        record_id: i32,
        updates: &UpdateWasteRecord,
    ) -> RepositoryResult<WasteRecord>;
    fn delete_waste_record(&self, record_id: i32) -> RepositoryResult<()>;
}

pub trait ReportReader {
    fn dashboard_totals(
        &self,
        school_id: i32,
        window: ReportWindow,
    ) -> RepositoryResult<DashboardTotals>;
}
