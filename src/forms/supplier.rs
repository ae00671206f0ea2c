use serde::Deserialize;
use validator::Validate;

use crate::domain::supplier::{NewSupplier, SupplierCategory, SupplierStatus, UpdateSupplier};
use crate::forms::FormParseError;

fn default_status() -> String {
    SupplierStatus::Active.as_str().to_string()
}

#[derive(Deserialize, Validate)]
/// Form data for registering a supplier.
pub struct AddSupplierForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl AddSupplierForm {
    pub fn to_new_supplier(&self, school_id: i32) -> Result<NewSupplier, FormParseError> {
        let category = SupplierCategory::try_from(self.category.as_str())?;
        let status = SupplierStatus::try_from(self.status.as_str())?;
        Ok(NewSupplier::new(
            school_id,
            self.name.clone(),
            category,
            Some(self.contact_name.clone()),
            Some(self.phone.clone()),
            Some(self.email.clone()),
            Some(self.address.clone()),
            status,
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing supplier.
pub struct SaveSupplierForm {
    /// Ignored by the JSON API, which takes the id from the path.
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
    pub status: String,
}

impl SaveSupplierForm {
    pub fn to_update_supplier(&self) -> Result<UpdateSupplier, FormParseError> {
        let category = SupplierCategory::try_from(self.category.as_str())?;
        let status = SupplierStatus::try_from(self.status.as_str())?;
        Ok(UpdateSupplier::new(
            self.name.clone(),
            category,
            Some(self.contact_name.clone()),
            Some(self.phone.clone()),
            Some(self.email.clone()),
            Some(self.address.clone()),
            status,
        ))
    }
}

#[derive(Deserialize)]
pub struct DeleteSupplierForm {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_active_status() {
        let form: AddSupplierForm =
            serde_html_form::from_str("name=Tani+Makmur&category=produce").unwrap();
        let supplier = form.to_new_supplier(1).unwrap();
        assert_eq!(supplier.status, SupplierStatus::Active);
        assert_eq!(supplier.phone, None);
        assert_eq!(supplier.email, None);
    }

    #[test]
    fn unknown_category_fails_conversion() {
        let form = AddSupplierForm {
            name: "Tani".to_string(),
            category: "seafood-imports".to_string(),
            contact_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            status: "active".to_string(),
        };
        assert!(form.to_new_supplier(1).is_err());
    }
}
