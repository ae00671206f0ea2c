//! Application services.
//!
//! Permission checks, form validation, and repository orchestration live
//! here so the HTTP handlers stay thin and the logic stays testable against
//! mock repositories.

use thiserror::Error;

use crate::auth::AuthenticatedUser;
use crate::domain::UnknownVariant;
use crate::forms::FormParseError;
use crate::nav::Access;
use crate::repository::RoleReader;
use crate::repository::errors::RepositoryError;

pub mod main;
pub mod role;
pub mod student;
pub mod supplier;
pub mod waste;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Form(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormParseError> for ServiceError {
    fn from(err: FormParseError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<UnknownVariant> for ServiceError {
    fn from(err: UnknownVariant) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Resolves the user's role names to a permission set. Resolution failure
/// yields [`Access::Pending`], which denies everything gated.
pub fn resolve_access<R>(repo: &R, user: &AuthenticatedUser) -> Access
where
    R: RoleReader + ?Sized,
{
    match repo.permissions_for_roles(user.school_id, &user.roles) {
        Ok(permissions) => Access::from_permissions(permissions),
        Err(err) => {
            log::error!("Failed to resolve permissions for {}: {err}", user.email);
            Access::Pending
        }
    }
}

/// View-level gate: the path's requirements come from the navigation tree.
pub(crate) fn ensure_access(access: &Access, path: &str) -> ServiceResult<()> {
    if access.allows_path(path) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Mutation-level gate for a single explicit permission.
pub(crate) fn ensure_permission(access: &Access, permission: &str) -> ServiceResult<()> {
    if access.allows(&[permission]) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub(crate) fn validate_form<F: validator::Validate>(form: &F) -> ServiceResult<()> {
    form.validate().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form(format!("Validation failed: {err}"))
    })
}

/// Constraint violations are user-fixable (duplicate NISN, duplicate role
/// name), so they surface as form errors instead of internal ones.
pub(crate) fn map_write_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::ConstraintViolation(message) => {
            ServiceError::Form(format!("Conflicting record: {message}"))
        }
        other => ServiceError::Repository(other),
    }
}
