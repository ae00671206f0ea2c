use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::waste_record::{
    NewWasteRecord as DomainNewWasteRecord, UpdateWasteRecord as DomainUpdateWasteRecord,
    WasteCategory, WasteRecord as DomainWasteRecord, WasteSource,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::waste_records)]
/// Diesel model for [`crate::domain::waste_record::WasteRecord`].
pub struct WasteRecord {
    pub id: i32,
    pub school_id: i32,
    pub recorded_on: NaiveDate,
    pub category: String,
    pub source: String,
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::waste_records)]
/// Insertable form of [`WasteRecord`].
pub struct NewWasteRecord<'a> {
    pub school_id: i32,
    pub recorded_on: NaiveDate,
    pub category: &'a str,
    pub source: &'a str,
    pub weight_kg: f64,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::waste_records)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`WasteRecord`] record.
pub struct UpdateWasteRecord<'a> {
    pub recorded_on: NaiveDate,
    pub category: &'a str,
    pub source: &'a str,
    pub weight_kg: f64,
    pub notes: Option<&'a str>,
}

impl TryFrom<WasteRecord> for DomainWasteRecord {
    type Error = UnknownVariant;

    fn try_from(record: WasteRecord) -> Result<Self, Self::Error> {
        let category = WasteCategory::try_from(record.category.as_str())?;
        let source = WasteSource::try_from(record.source.as_str())?;

        Ok(Self {
            id: record.id,
            school_id: record.school_id,
            recorded_on: record.recorded_on,
            category,
            source,
            weight_kg: record.weight_kg,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewWasteRecord> for NewWasteRecord<'a> {
    fn from(record: &'a DomainNewWasteRecord) -> Self {
        Self {
            school_id: record.school_id,
            recorded_on: record.recorded_on,
            category: record.category.as_str(),
            source: record.source.as_str(),
            weight_kg: record.weight_kg,
            notes: record.notes.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateWasteRecord> for UpdateWasteRecord<'a> {
    fn from(record: &'a DomainUpdateWasteRecord) -> Self {
        Self {
            recorded_on: record.recorded_on,
            category: record.category.as_str(),
            source: record.source.as_str(),
            weight_kg: record.weight_kg,
            notes: record.notes.as_deref(),
        }
    }
}
