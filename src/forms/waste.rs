use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::waste_record::{NewWasteRecord, UpdateWasteRecord, WasteCategory, WasteSource};
use crate::forms::FormParseError;

fn parse_date(raw: &str) -> Result<NaiveDate, FormParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FormParseError::InvalidDate(raw.to_string()))
}

#[derive(Deserialize, Validate)]
/// Form data for logging a waste batch.
pub struct AddWasteRecordForm {
    pub recorded_on: String,
    pub category: String,
    pub source: String,
    #[validate(range(min = 0.001, max = 10000.0))]
    pub weight_kg: f64,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

impl AddWasteRecordForm {
    pub fn to_new_record(&self, school_id: i32) -> Result<NewWasteRecord, FormParseError> {
        let recorded_on = parse_date(&self.recorded_on)?;
        let category = WasteCategory::try_from(self.category.as_str())?;
        let source = WasteSource::try_from(self.source.as_str())?;
        Ok(NewWasteRecord::new(
            school_id,
            recorded_on,
            category,
            source,
            self.weight_kg,
            Some(self.notes.clone()),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for correcting an existing waste record.
pub struct SaveWasteRecordForm {
    /// Ignored by the JSON API, which takes the id from the path.
    #[serde(default)]
    pub id: i32,
    pub recorded_on: String,
    pub category: String,
    pub source: String,
    #[validate(range(min = 0.001, max = 10000.0))]
    pub weight_kg: f64,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: String,
}

impl SaveWasteRecordForm {
    pub fn to_update_record(&self) -> Result<UpdateWasteRecord, FormParseError> {
        let recorded_on = parse_date(&self.recorded_on)?;
        let category = WasteCategory::try_from(self.category.as_str())?;
        let source = WasteSource::try_from(self.source.as_str())?;
        Ok(UpdateWasteRecord::new(
            recorded_on,
            category,
            source,
            self.weight_kg,
            Some(self.notes.clone()),
        ))
    }
}

#[derive(Deserialize)]
pub struct DeleteWasteRecordForm {
    pub id: i32,
}
