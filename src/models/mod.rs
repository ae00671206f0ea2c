//! Diesel models mirroring the domain aggregates.

pub mod role;
pub mod student;
pub mod supplier;
pub mod waste_record;

#[cfg(feature = "server")]
pub mod config;
