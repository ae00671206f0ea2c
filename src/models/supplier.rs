use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::supplier::{
    NewSupplier as DomainNewSupplier, Supplier as DomainSupplier, SupplierCategory, SupplierStatus,
    UpdateSupplier as DomainUpdateSupplier,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::suppliers)]
/// Diesel model for [`crate::domain::supplier::Supplier`].
pub struct Supplier {
    pub id: i32,
    pub school_id: i32,
    pub name: String,
    pub category: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::suppliers)]
/// Insertable form of [`Supplier`].
pub struct NewSupplier<'a> {
    pub school_id: i32,
    pub name: &'a str,
    pub category: &'a str,
    pub contact_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::suppliers)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Supplier`] record.
pub struct UpdateSupplier<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub contact_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: &'a str,
}

impl TryFrom<Supplier> for DomainSupplier {
    type Error = UnknownVariant;

    fn try_from(supplier: Supplier) -> Result<Self, Self::Error> {
        let category = SupplierCategory::try_from(supplier.category.as_str())?;
        let status = SupplierStatus::try_from(supplier.status.as_str())?;

        Ok(Self {
            id: supplier.id,
            school_id: supplier.school_id,
            name: supplier.name,
            category,
            contact_name: supplier.contact_name,
            phone: supplier.phone,
            email: supplier.email,
            address: supplier.address,
            status,
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewSupplier> for NewSupplier<'a> {
    fn from(supplier: &'a DomainNewSupplier) -> Self {
        Self {
            school_id: supplier.school_id,
            name: supplier.name.as_str(),
            category: supplier.category.as_str(),
            contact_name: supplier.contact_name.as_deref(),
            phone: supplier.phone.as_deref(),
            email: supplier.email.as_deref(),
            address: supplier.address.as_deref(),
            status: supplier.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateSupplier> for UpdateSupplier<'a> {
    fn from(supplier: &'a DomainUpdateSupplier) -> Self {
        Self {
            name: supplier.name.as_str(),
            category: supplier.category.as_str(),
            contact_name: supplier.contact_name.as_deref(),
            phone: supplier.phone.as_deref(),
            email: supplier.email.as_deref(),
            address: supplier.address.as_deref(),
            status: supplier.status.as_str(),
        }
    }
}
