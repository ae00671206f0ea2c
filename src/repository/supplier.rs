//! Repository implementation for food suppliers.

use diesel::prelude::*;

use crate::domain::supplier::{NewSupplier, Supplier, UpdateSupplier};
use crate::models::supplier::{
    NewSupplier as DbNewSupplier, Supplier as DbSupplier, UpdateSupplier as DbUpdateSupplier,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SupplierListQuery, SupplierReader, SupplierWriter};

impl SupplierReader for DieselRepository {
    fn get_supplier_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Supplier>> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let db_supplier = suppliers::table
            .filter(suppliers::id.eq(id))
            .filter(suppliers::school_id.eq(school_id))
            .first::<DbSupplier>(&mut conn)
            .optional()?;

        match db_supplier {
            Some(db_supplier) => Ok(Some(
                Supplier::try_from(db_supplier).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_suppliers(&self, query: SupplierListQuery) -> RepositoryResult<(usize, Vec<Supplier>)> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = suppliers::table
                .filter(suppliers::school_id.eq(query.school_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    suppliers::name
                        .like(pattern.clone())
                        .or(suppliers::contact_name.like(pattern.clone()))
                        .or(suppliers::email.like(pattern)),
                );
            }
            if let Some(category) = query.category {
                items = items.filter(suppliers::category.eq(category.as_str()));
            }
            if let Some(status) = query.status {
                items = items.filter(suppliers::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let suppliers = items
            .order(suppliers::name.asc())
            .load::<DbSupplier>(&mut conn)?
            .into_iter()
            .map(|db_supplier| Supplier::try_from(db_supplier).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, suppliers))
    }
}

impl SupplierWriter for DieselRepository {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let db_new_supplier: DbNewSupplier = new_supplier.into();

        let created = diesel::insert_into(suppliers::table)
            .values(&db_new_supplier)
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(Supplier::try_from(created).map_err(RepositoryError::from)?)
    }

    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &UpdateSupplier,
    ) -> RepositoryResult<Supplier> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateSupplier = updates.into();

        let updated = diesel::update(suppliers::table.find(supplier_id))
            .set((&db_updates, suppliers::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbSupplier>(&mut conn)?;

        Ok(Supplier::try_from(updated).map_err(RepositoryError::from)?)
    }

    fn delete_supplier(&self, supplier_id: i32) -> RepositoryResult<()> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;
        let affected = diesel::delete(suppliers::table.find(supplier_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
