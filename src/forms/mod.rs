//! Form payloads shared by the HTML pages and the JSON API.

use thiserror::Error;

use crate::domain::UnknownVariant;

pub mod role;
pub mod student;
pub mod supplier;
pub mod waste;

#[derive(Debug, Error)]
pub enum FormParseError {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
