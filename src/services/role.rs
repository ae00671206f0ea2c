use crate::auth::AuthenticatedUser;
use crate::domain::role::{Role, RoleType};
use crate::dto::role::{
    PermissionMatrixData, PermissionRow, RoleDetailPageData, RoleListParams, RolePageStats,
    RolesPageData,
};
use crate::forms::role::{AddRoleForm, SaveRoleForm};
use crate::listing::{PageInfo, PageStats};
use crate::nav::{Access, KNOWN_PERMISSIONS};
use crate::pagination::Paginated;
use crate::repository::{RoleListQuery, RoleReader, RoleWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_access, ensure_permission, map_write_error, validate_form,
};

/// Lists one page of roles for the API surface.
pub fn list_roles<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: &RoleListParams,
) -> ServiceResult<(Vec<Role>, PageInfo)>
where
    R: RoleReader + ?Sized,
{
    ensure_access(access, "/roles")?;

    let query = params.to_query(user.school_id)?;
    let (total, roles) = repo.list_roles(query)?;
    let info = PageInfo::new(params.page(), params.limit(), total);
    Ok((roles, info))
}

/// Loads the roles list page, with page-scoped quick stats.
pub fn load_list_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: RoleListParams,
) -> ServiceResult<RolesPageData>
where
    R: RoleReader + ?Sized,
{
    let (roles, info) = list_roles(repo, user, access, &params)?;
    let stats = RolePageStats::from_page(&roles);

    Ok(RolesPageData {
        roles: Paginated::new(roles, &info),
        stats,
        search: params.search,
        selected_type: params.role_type,
        selected_permission: params.permission,
    })
}

/// Fetches one role scoped to the caller's school.
pub fn get_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    role_id: i32,
) -> ServiceResult<Role>
where
    R: RoleReader + ?Sized,
{
    ensure_access(access, "/roles")?;
    repo.get_role_by_id(role_id, user.school_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_detail_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    role_id: i32,
) -> ServiceResult<RoleDetailPageData>
where
    R: RoleReader + ?Sized,
{
    let role = get_role(repo, user, access, role_id)?;
    Ok(RoleDetailPageData { role })
}

/// Validates the add-role form and persists a new role.
pub fn add_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: AddRoleForm,
) -> ServiceResult<Role>
where
    R: RoleWriter + ?Sized,
{
    ensure_permission(access, "roles.manage")?;
    validate_form(&form)?;
    validate_permission_names(&form.permissions)?;

    let new_role = form.to_new_role(user.school_id)?;
    repo.create_role(&new_role).map_err(map_write_error)
}

/// HTML forms carry repeated `permissions` fields, so the page handler hands
/// over the raw body for `serde_html_form` decoding.
pub fn add_role_from_bytes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    raw: &[u8],
) -> ServiceResult<Role>
where
    R: RoleWriter + ?Sized,
{
    let form: AddRoleForm = parse_form(raw)?;
    add_role(repo, user, access, form)
}

pub fn update_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: SaveRoleForm,
) -> ServiceResult<Role>
where
    R: RoleReader + RoleWriter + ?Sized,
{
    ensure_permission(access, "roles.manage")?;
    validate_form(&form)?;
    validate_permission_names(&form.permissions)?;

    // Scope check before the unscoped update.
    repo.get_role_by_id(form.id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.to_update_role()?;
    repo.update_role(form.id, &updates).map_err(map_write_error)
}

pub fn update_role_from_bytes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    raw: &[u8],
) -> ServiceResult<Role>
where
    R: RoleReader + RoleWriter + ?Sized,
{
    let form: SaveRoleForm = parse_form(raw)?;
    update_role(repo, user, access, form)
}

/// Deletes a custom role. System roles are not deletable.
pub fn delete_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    role_id: i32,
) -> ServiceResult<()>
where
    R: RoleReader + RoleWriter + ?Sized,
{
    ensure_permission(access, "roles.manage")?;

    let role = repo
        .get_role_by_id(role_id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;
    if role.role_type == RoleType::System {
        return Err(ServiceError::Form(
            "System roles cannot be deleted".to_string(),
        ));
    }

    Ok(repo.delete_role(role_id)?)
}

/// Builds the permission matrix: every known permission with the roles that
/// grant it.
pub fn load_permission_matrix<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
) -> ServiceResult<PermissionMatrixData>
where
    R: RoleReader + ?Sized,
{
    ensure_access(access, "/roles/permissions")?;

    let (_, roles) = repo.list_roles(RoleListQuery::new(user.school_id))?;

    let rows = KNOWN_PERMISSIONS
        .iter()
        .map(|(permission, label)| PermissionRow {
            permission: permission.to_string(),
            label: label.to_string(),
            roles: roles
                .iter()
                .filter(|role| role.permissions.iter().any(|p| p == permission))
                .map(|role| role.name.clone())
                .collect(),
        })
        .collect();

    Ok(PermissionMatrixData { rows })
}

fn parse_form<T: serde::de::DeserializeOwned>(raw: &[u8]) -> ServiceResult<T> {
    serde_html_form::from_bytes(raw).map_err(|err| {
        log::error!("Failed to parse form body: {err}");
        ServiceError::Form("Malformed form submission".to_string())
    })
}

fn validate_permission_names(permissions: &[String]) -> ServiceResult<()> {
    for permission in permissions {
        let trimmed = permission.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !KNOWN_PERMISSIONS.iter().any(|(name, _)| *name == trimmed) {
            return Err(ServiceError::Form(format!(
                "Unknown permission: {trimmed}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::mock::MockRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@school.test".to_string(),
            name: "Admin".to_string(),
            school_id: 1,
            roles: vec!["administrator".to_string()],
            exp: 10_000_000_000,
        }
    }

    fn manage_access() -> Access {
        Access::from_permissions(vec!["roles.manage".to_string(), "roles.view".to_string()])
    }

    fn sample_role(id: i32, role_type: RoleType) -> Role {
        let now = Utc::now().naive_utc();
        Role {
            id,
            school_id: 1,
            name: format!("role-{id}"),
            description: String::new(),
            role_type,
            permissions: vec!["waste.view".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_access_is_denied() {
        let repo = MockRepository::new();
        let result = list_roles(
            &repo,
            &sample_user(),
            &Access::Pending,
            &RoleListParams::default(),
        );
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn list_page_carries_pagination_and_stats() {
        let mut repo = MockRepository::new();
        repo.expect_list_roles().returning(|_| {
            Ok((
                23,
                (0..10)
                    .map(|i| sample_role(i, RoleType::Custom))
                    .collect(),
            ))
        });

        let data = load_list_page(
            &repo,
            &sample_user(),
            &manage_access(),
            RoleListParams::default(),
        )
        .unwrap();

        assert_eq!(data.roles.total_pages, 3);
        assert_eq!(data.roles.items.len(), 10);
        assert_eq!(data.stats.custom, 10);
        assert_eq!(data.stats.system, 0);
    }

    #[test]
    fn unknown_permission_name_is_rejected() {
        let repo = MockRepository::new();
        let form = AddRoleForm {
            name: "Kitchen".to_string(),
            description: String::new(),
            role_type: "custom".to_string(),
            permissions: vec!["waste.everything".to_string()],
        };
        let result = add_role(&repo, &sample_user(), &manage_access(), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn system_roles_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_role_by_id()
            .returning(|id, _| Ok(Some(sample_role(id, RoleType::System))));

        let result = delete_role(&repo, &sample_user(), &manage_access(), 3);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn deleting_missing_role_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_role_by_id().returning(|_, _| Ok(None));

        let result = delete_role(&repo, &sample_user(), &manage_access(), 9);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn matrix_maps_roles_to_permissions() {
        let mut repo = MockRepository::new();
        repo.expect_list_roles()
            .returning(|_| Ok((1, vec![sample_role(1, RoleType::Custom)])));

        let matrix =
            load_permission_matrix(&repo, &sample_user(), &manage_access()).unwrap();
        let waste_view = matrix
            .rows
            .iter()
            .find(|row| row.permission == "waste.view")
            .unwrap();
        assert_eq!(waste_view.roles, vec!["role-1"]);

        let roles_manage = matrix
            .rows
            .iter()
            .find(|row| row.permission == "roles.manage")
            .unwrap();
        assert!(roles_manage.roles.is_empty());
    }
}
