use serde::Deserialize;
use validator::Validate;

use crate::domain::role::{NewRole, RoleType, UpdateRole};
use crate::forms::FormParseError;

#[derive(Deserialize, Validate)]
/// Form data for creating a role.
pub struct AddRoleForm {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    pub role_type: String,
    /// Checked permission names; repeated field in the HTML form.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AddRoleForm {
    pub fn to_new_role(&self, school_id: i32) -> Result<NewRole, FormParseError> {
        let role_type = RoleType::try_from(self.role_type.as_str())?;
        Ok(NewRole::new(
            school_id,
            self.name.clone(),
            self.description.clone(),
            role_type,
            self.permissions.clone(),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing role.
pub struct SaveRoleForm {
    /// Ignored by the JSON API, which takes the id from the path.
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    pub role_type: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SaveRoleForm {
    pub fn to_update_role(&self) -> Result<UpdateRole, FormParseError> {
        let role_type = RoleType::try_from(self.role_type.as_str())?;
        Ok(UpdateRole::new(
            self.name.clone(),
            self.description.clone(),
            role_type,
            self.permissions.clone(),
        ))
    }
}

#[derive(Deserialize)]
pub struct DeleteRoleForm {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_form_with_repeated_permissions_parses() {
        let form: AddRoleForm = serde_html_form::from_str(
            "name=Kitchen&role_type=custom&permissions=waste.view&permissions=waste.manage",
        )
        .unwrap();
        assert_eq!(form.permissions, vec!["waste.view", "waste.manage"]);

        let new_role = form.to_new_role(1).unwrap();
        assert_eq!(new_role.role_type, RoleType::Custom);
        assert_eq!(new_role.school_id, 1);
    }

    #[test]
    fn unknown_role_type_fails_conversion() {
        let form = AddRoleForm {
            name: "X".to_string(),
            description: String::new(),
            role_type: "superuser".to_string(),
            permissions: vec![],
        };
        assert!(form.to_new_role(1).is_err());
    }

    #[test]
    fn blank_name_fails_validation() {
        let form = AddRoleForm {
            name: String::new(),
            description: String::new(),
            role_type: "custom".to_string(),
            permissions: vec![],
        };
        assert!(form.validate().is_err());
    }
}
