//! Repository implementation for access roles.

use diesel::prelude::*;

use crate::domain::role::{NewRole, Role, UpdateRole};
use crate::models::role::{NewRole as DbNewRole, Role as DbRole, UpdateRole as DbUpdateRole};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RoleListQuery, RoleReader, RoleWriter};

impl RoleReader for DieselRepository {
    fn get_role_by_id(&self, id: i32, school_id: i32) -> RepositoryResult<Option<Role>> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let db_role = roles::table
            .filter(roles::id.eq(id))
            .filter(roles::school_id.eq(school_id))
            .first::<DbRole>(&mut conn)
            .optional()?;

        match db_role {
            Some(db_role) => Ok(Some(Role::try_from(db_role).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_roles(&self, query: RoleListQuery) -> RepositoryResult<(usize, Vec<Role>)> {
        use crate::schema::roles;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = roles::table
                .filter(roles::school_id.eq(query.school_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                items = items.filter(
                    roles::name
                        .like(pattern.clone())
                        .or(roles::description.like(pattern)),
                );
            }
            if let Some(role_type) = query.role_type {
                items = items.filter(roles::role_type.eq(role_type.as_str()));
            }
            if let Some(permission) = &query.permission {
                // `permissions` holds a JSON array of strings, so a quoted
                // containment match is exact per entry.
                items = items.filter(roles::permissions.like(format!("%\"{permission}\"%")));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let roles = items
            .order(roles::name.asc())
            .load::<DbRole>(&mut conn)?
            .into_iter()
            .map(|db_role| Role::try_from(db_role).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, roles))
    }

    fn permissions_for_roles(
        &self,
        school_id: i32,
        role_names: &[String],
    ) -> RepositoryResult<Vec<String>> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let db_roles = roles::table
            .filter(roles::school_id.eq(school_id))
            .filter(roles::name.eq_any(role_names))
            .load::<DbRole>(&mut conn)?;

        let mut permissions: Vec<String> = Vec::new();
        for db_role in db_roles {
            let role = Role::try_from(db_role).map_err(RepositoryError::from)?;
            for permission in role.permissions {
                if !permissions.contains(&permission) {
                    permissions.push(permission);
                }
            }
        }

        Ok(permissions)
    }
}

impl RoleWriter for DieselRepository {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let db_new_role: DbNewRole = new_role.into();

        let created = diesel::insert_into(roles::table)
            .values(&db_new_role)
            .get_result::<DbRole>(&mut conn)?;

        Ok(Role::try_from(created).map_err(RepositoryError::from)?)
    }

    fn update_role(&self, role_id: i32, updates: &UpdateRole) -> RepositoryResult<Role> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateRole = updates.into();

        let updated = diesel::update(roles::table.find(role_id))
            .set((&db_updates, roles::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbRole>(&mut conn)?;

        Ok(Role::try_from(updated).map_err(RepositoryError::from)?)
    }

    fn delete_role(&self, role_id: i32) -> RepositoryResult<()> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let affected = diesel::delete(roles::table.find(role_id)).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
