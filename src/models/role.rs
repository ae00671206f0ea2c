use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownVariant;
use crate::domain::role::{
    Role as DomainRole, NewRole as DomainNewRole, RoleType, UpdateRole as DomainUpdateRole,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::roles)]
/// Diesel model for [`crate::domain::role::Role`].
pub struct Role {
    pub id: i32,
    pub school_id: i32,
    pub name: String,
    pub description: String,
    pub role_type: String,
    /// JSON array of permission strings.
    pub permissions: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::roles)]
/// Insertable form of [`Role`].
pub struct NewRole<'a> {
    pub school_id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub role_type: &'a str,
    pub permissions: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::roles)]
/// Data used when updating a [`Role`] record.
pub struct UpdateRole<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub role_type: &'a str,
    pub permissions: String,
}

impl TryFrom<Role> for DomainRole {
    type Error = UnknownVariant;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        let role_type = RoleType::try_from(role.role_type.as_str())?;
        // Tolerate malformed JSON left behind by hand edits.
        let permissions = serde_json::from_str(&role.permissions).unwrap_or_default();

        Ok(Self {
            id: role.id,
            school_id: role.school_id,
            name: role.name,
            description: role.description,
            role_type,
            permissions,
            created_at: role.created_at,
            updated_at: role.updated_at,
        })
    }
}

fn permissions_json(permissions: &[String]) -> String {
    serde_json::to_string(permissions).unwrap_or_else(|_| String::from("[]"))
}

impl<'a> From<&'a DomainNewRole> for NewRole<'a> {
    fn from(role: &'a DomainNewRole) -> Self {
        Self {
            school_id: role.school_id,
            name: role.name.as_str(),
            description: role.description.as_str(),
            role_type: role.role_type.as_str(),
            permissions: permissions_json(&role.permissions),
        }
    }
}

impl<'a> From<&'a DomainUpdateRole> for UpdateRole<'a> {
    fn from(role: &'a DomainUpdateRole) -> Self {
        Self {
            name: role.name.as_str(),
            description: role.description.as_str(),
            role_type: role.role_type.as_str(),
            permissions: permissions_json(&role.permissions),
        }
    }
}
