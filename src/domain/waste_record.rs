use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// A single weighed batch of food waste logged by kitchen staff.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WasteRecord {
    pub id: i32,
    pub school_id: i32,
    pub recorded_on: NaiveDate,
    pub category: WasteCategory,
    pub source: WasteSource,
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    /// Trimmings and offcuts produced while cooking.
    Preparation,
    Leftover,
    Spoiled,
    Packaging,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 4] = [
        WasteCategory::Preparation,
        WasteCategory::Leftover,
        WasteCategory::Spoiled,
        WasteCategory::Packaging,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WasteCategory::Preparation => "preparation",
            WasteCategory::Leftover => "leftover",
            WasteCategory::Spoiled => "spoiled",
            WasteCategory::Packaging => "packaging",
        }
    }
}

impl Display for WasteCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for WasteCategory {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "preparation" => Ok(WasteCategory::Preparation),
            "leftover" => Ok(WasteCategory::Leftover),
            "spoiled" => Ok(WasteCategory::Spoiled),
            "packaging" => Ok(WasteCategory::Packaging),
            other => Err(UnknownVariant::new("waste category", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WasteSource {
    Kitchen,
    Serving,
    Storage,
}

impl WasteSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            WasteSource::Kitchen => "kitchen",
            WasteSource::Serving => "serving",
            WasteSource::Storage => "storage",
        }
    }
}

impl Display for WasteSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for WasteSource {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "kitchen" => Ok(WasteSource::Kitchen),
            "serving" => Ok(WasteSource::Serving),
            "storage" => Ok(WasteSource::Storage),
            other => Err(UnknownVariant::new("waste source", other)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWasteRecord {
    pub school_id: i32,
    pub recorded_on: NaiveDate,
    pub category: WasteCategory,
    pub source: WasteSource,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

impl NewWasteRecord {
    #[must_use]
    pub fn new(
        school_id: i32,
        recorded_on: NaiveDate,
        category: WasteCategory,
        source: WasteSource,
        weight_kg: f64,
        notes: Option<String>,
    ) -> Self {
        Self {
            school_id,
            recorded_on,
            category,
            source,
            weight_kg,
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateWasteRecord {
    pub recorded_on: NaiveDate,
    pub category: WasteCategory,
    pub source: WasteSource,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

impl UpdateWasteRecord {
    #[must_use]
    pub fn new(
        recorded_on: NaiveDate,
        category: WasteCategory,
        source: WasteSource,
        weight_kg: f64,
        notes: Option<String>,
    ) -> Self {
        Self {
            recorded_on,
            category,
            source,
            weight_kg,
            notes: notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}
