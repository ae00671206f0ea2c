//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::report::{DashboardTotals, ReportWindow};
use crate::domain::role::{NewRole, Role, UpdateRole};
use crate::domain::student::{NewStudent, Student, UpdateStudent};
use crate::domain::supplier::{NewSupplier, Supplier, UpdateSupplier};
use crate::domain::waste_record::{NewWasteRecord, UpdateWasteRecord, WasteRecord};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ReportReader, RoleListQuery, RoleReader, RoleWriter, StudentListQuery, StudentReader,
    StudentWriter, SupplierListQuery, SupplierReader, SupplierWriter, WasteListQuery,
    WasteRecordReader, WasteRecordWriter,
};

mock! {
    pub Repository {}

    impl RoleReader for Repository {
        fn get_role_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Role>>;
        fn list_roles(&self, query: RoleListQuery) -> RepositoryResult<(usize, Vec<Role>)>;
        fn permissions_for_roles(
            &self,
            school_id: i32,
            role_names: &[String],
        ) -> RepositoryResult<Vec<String>>;
    }

    impl RoleWriter for Repository {
        fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
        fn update_role(&self, role_id: i32, updates: &UpdateRole) -> RepositoryResult<Role>;
        fn delete_role(&self, role_id: i32) -> RepositoryResult<()>;
    }

    impl StudentReader for Repository {
        fn get_student_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Student>>;
        fn list_students(&self, query: StudentListQuery) -> RepositoryResult<(usize, Vec<Student>)>;
    }

    impl StudentWriter for Repository {
        fn create_student(&self, new_student: &NewStudent) -> RepositoryResult<Student>;
        fn update_student(
            &self,
            student_id: i32,
            updates: &UpdateStudent,
        ) -> RepositoryResult<Student>;
        fn delete_student(&self, student_id: i32) -> RepositoryResult<()>;
    }

    impl SupplierReader for Repository {
        fn get_supplier_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(
            &self,
            query: SupplierListQuery,
        ) -> RepositoryResult<(usize, Vec<Supplier>)>;
    }

    impl SupplierWriter for Repository {
        fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier>;
        fn update_supplier(
            &self,
            supplier_id: i32,
            updates: &UpdateSupplier,
        ) -> RepositoryResult<Supplier>;
        fn delete_supplier(&self, supplier_id: i32) -> RepositoryResult<()>;
    }

    impl WasteRecordReader for Repository {
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

    impl WasteRecordWriter for Repository {
        fn create_waste_record(&self, new_record: &NewWasteRecord) -> RepositoryResult<WasteRecord>;
        fn update_waste_record(
            &self,
            record_id: i32,
            updates: &UpdateWasteRecord,
        ) -> RepositoryResult<WasteRecord>;
        fn delete_waste_record(&self, record_id: i32) -> RepositoryResult<()>;
    }

    impl ReportReader for Repository {
        fn dashboard_totals(
            &self,
            school_id: i32,
            window: ReportWindow,
        ) -> RepositoryResult<DashboardTotals>;
    }
}
