use validator::ValidateEmail;

use crate::auth::AuthenticatedUser;
use crate::domain::supplier::{Supplier, is_valid_phone};
use crate::dto::supplier::{
    SupplierDetailPageData, SupplierListParams, SupplierPageStats, SuppliersPageData,
};
use crate::forms::supplier::{AddSupplierForm, SaveSupplierForm};
use crate::listing::{PageInfo, PageStats};
use crate::nav::Access;
use crate::pagination::Paginated;
use crate::repository::{SupplierReader, SupplierWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_access, ensure_permission, map_write_error, validate_form,
};

pub fn list_suppliers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: &SupplierListParams,
) -> ServiceResult<(Vec<Supplier>, PageInfo)>
where
    R: SupplierReader + ?Sized,
{
    ensure_access(access, "/suppliers")?;

    let query = params.to_query(user.school_id)?;
    let (total, suppliers) = repo.list_suppliers(query)?;
    let info = PageInfo::new(params.page(), params.limit(), total);
    Ok((suppliers, info))
}

pub fn load_list_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    params: SupplierListParams,
) -> ServiceResult<SuppliersPageData>
where
    R: SupplierReader + ?Sized,
{
    let (suppliers, info) = list_suppliers(repo, user, access, &params)?;
    let stats = SupplierPageStats::from_page(&suppliers);

    Ok(SuppliersPageData {
        suppliers: Paginated::new(suppliers, &info),
        stats,
        search: params.search,
        selected_category: params.category,
        selected_status: params.status,
    })
}

pub fn get_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    supplier_id: i32,
) -> ServiceResult<Supplier>
where
    R: SupplierReader + ?Sized,
{
    ensure_access(access, "/suppliers")?;
    repo.get_supplier_by_id(supplier_id, user.school_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn load_detail_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    supplier_id: i32,
) -> ServiceResult<SupplierDetailPageData>
where
    R: SupplierReader + ?Sized,
{
    let supplier = get_supplier(repo, user, access, supplier_id)?;
    Ok(SupplierDetailPageData { supplier })
}

pub fn add_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: AddSupplierForm,
) -> ServiceResult<Supplier>
where
    R: SupplierWriter + ?Sized,
{
    ensure_permission(access, "suppliers.manage")?;
    validate_form(&form)?;
    validate_contact(&form.phone, &form.email)?;

    let new_supplier = form.to_new_supplier(user.school_id)?;
    repo.create_supplier(&new_supplier).map_err(map_write_error)
}

pub fn update_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    form: SaveSupplierForm,
) -> ServiceResult<Supplier>
where
    R: SupplierReader + SupplierWriter + ?Sized,
{
    ensure_permission(access, "suppliers.manage")?;
    validate_form(&form)?;
    validate_contact(&form.phone, &form.email)?;

    repo.get_supplier_by_id(form.id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form.to_update_supplier()?;
    repo.update_supplier(form.id, &updates)
        .map_err(map_write_error)
}

pub fn delete_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    access: &Access,
    supplier_id: i32,
) -> ServiceResult<()>
where
    R: SupplierReader + SupplierWriter + ?Sized,
{
    ensure_permission(access, "suppliers.manage")?;

    repo.get_supplier_by_id(supplier_id, user.school_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.delete_supplier(supplier_id)?)
}

/// Optional contact fields are only format-checked when present; blanks
/// normalize to NULL at the domain boundary.
fn validate_contact(phone: &str, email: &str) -> ServiceResult<()> {
    let phone = phone.trim();
    if !phone.is_empty() && !is_valid_phone(phone) {
        return Err(ServiceError::Form("Invalid phone number".to_string()));
    }

    let email = email.trim();
    if !email.is_empty() && !email.validate_email() {
        return Err(ServiceError::Form("Invalid email address".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "staff@school.test".to_string(),
            name: "Staff".to_string(),
            school_id: 1,
            roles: vec!["operator".to_string()],
            exp: 10_000_000_000,
        }
    }

    fn manage_access() -> Access {
        Access::from_permissions(vec![
            "suppliers.view".to_string(),
            "suppliers.manage".to_string(),
        ])
    }

    fn sample_form() -> AddSupplierForm {
        AddSupplierForm {
            name: "Tani Makmur".to_string(),
            category: "produce".to_string(),
            contact_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            status: "active".to_string(),
        }
    }

    #[test]
    fn blank_contact_fields_are_accepted() {
        let mut repo = MockRepository::new();
        repo.expect_create_supplier()
            .returning(|new_supplier| {
                let now = chrono::Utc::now().naive_utc();
                Ok(Supplier {
                    id: 1,
                    school_id: new_supplier.school_id,
                    name: new_supplier.name.clone(),
                    category: new_supplier.category,
                    contact_name: new_supplier.contact_name.clone(),
                    phone: new_supplier.phone.clone(),
                    email: new_supplier.email.clone(),
                    address: new_supplier.address.clone(),
                    status: new_supplier.status,
                    created_at: now,
                    updated_at: now,
                })
            });

        let supplier =
            add_supplier(&repo, &sample_user(), &manage_access(), sample_form()).unwrap();
        assert_eq!(supplier.phone, None);
        assert_eq!(supplier.email, None);
    }

    #[test]
    fn malformed_phone_is_rejected() {
        let repo = MockRepository::new();
        let mut form = sample_form();
        form.phone = "call me".to_string();
        let result = add_supplier(&repo, &sample_user(), &manage_access(), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let repo = MockRepository::new();
        let mut form = sample_form();
        form.email = "not-an-email".to_string();
        let result = add_supplier(&repo, &sample_user(), &manage_access(), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
