//! Repository implementation for logged waste batches.

use diesel::prelude::*;

use crate::domain::waste_record::{NewWasteRecord, UpdateWasteRecord, WasteRecord};
use crate::models::waste_record::{
    NewWasteRecord as DbNewWasteRecord, UpdateWasteRecord as DbUpdateWasteRecord,
    WasteRecord as DbWasteRecord,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, WasteListQuery, WasteRecordReader, WasteRecordWriter};

impl WasteRecordReader for DieselRepository {
    fn get_waste_record_by_id(
        &self,
        id: i32,
        school_id: i32,
    ) -> RepositoryResult<Option<WasteRecord>> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;
        let db_record = waste_records::table
            .filter(waste_records::id.eq(id))
            .filter(waste_records::school_id.eq(school_id))
            .first::<DbWasteRecord>(&mut conn)
            .optional()?;

        match db_record {
            Some(db_record) => Ok(Some(
                WasteRecord::try_from(db_record).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_waste_records(
        &self,
        query: WasteListQuery,
    ) -> RepositoryResult<(usize, Vec<WasteRecord>)> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = waste_records::table
                .filter(waste_records::school_id.eq(query.school_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = &query.search {
                items = items.filter(waste_records::notes.like(format!("%{term}%")));
            }
            if let Some(category) = query.category {
                items = items.filter(waste_records::category.eq(category.as_str()));
            }
            if let Some(source) = query.source {
                items = items.filter(waste_records::source.eq(source.as_str()));
            }
            if let Some(from) = query.from {
                items = items.filter(waste_records::recorded_on.ge(from));
            }
            if let Some(until) = query.until {
                items = items.filter(waste_records::recorded_on.le(until));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let records = items
            .order(waste_records::recorded_on.desc())
            .load::<DbWasteRecord>(&mut conn)?
            .into_iter()
            .map(|db_record| WasteRecord::try_from(db_record).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, records))
    }
}

impl WasteRecordWriter for DieselRepository {
    fn create_waste_record(&self, new_record: &NewWasteRecord) -> RepositoryResult<WasteRecord> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;
        let db_new_record: DbNewWasteRecord = new_record.into();

        let created = diesel::insert_into(waste_records::table)
            .values(&db_new_record)
            .get_result::<DbWasteRecord>(&mut conn)?;

        Ok(WasteRecord::try_from(created).map_err(RepositoryError::from)?)
    }

    fn update_waste_record(
        &self,
        record_id: i32,
        updates: &UpdateWasteRecord,
    ) -> RepositoryResult<WasteRecord> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateWasteRecord = updates.into();

        let updated = diesel::update(waste_records::table.find(record_id))
            .set((&db_updates, waste_records::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbWasteRecord>(&mut conn)?;

        Ok(WasteRecord::try_from(updated).map_err(RepositoryError::from)?)
    }

    fn delete_waste_record(&self, record_id: i32) -> RepositoryResult<()> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;
        let affected = diesel::delete(waste_records::table.find(record_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
