use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

/// Access role managed per school. The `permissions` set is what the
/// navigation tree and the services check against.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: i32,
    pub school_id: i32,
    pub name: String,
    pub description: String,
    pub role_type: RoleType,
    pub permissions: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Shipped with the application, not deletable from the UI.
    System,
    Custom,
}

impl RoleType {
    pub const fn as_str(self) -> &'static str {
        match self {
            RoleType::System => "system",
            RoleType::Custom => "custom",
        }
    }
}

impl Display for RoleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RoleType {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "system" => Ok(RoleType::System),
            "custom" => Ok(RoleType::Custom),
            other => Err(UnknownVariant::new("role type", other)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRole {
    pub school_id: i32,
    pub name: String,
    pub description: String,
    pub role_type: RoleType,
    pub permissions: Vec<String>,
}

impl NewRole {
    #[must_use]
    pub fn new(
        school_id: i32,
        name: String,
        description: String,
        role_type: RoleType,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            school_id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            role_type,
            permissions: normalize_permissions(permissions),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateRole {
    pub name: String,
    pub description: String,
    pub role_type: RoleType,
    pub permissions: Vec<String>,
}

impl UpdateRole {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        role_type: RoleType,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            role_type,
            permissions: normalize_permissions(permissions),
        }
    }
}

/// Trims entries, drops empties and duplicates while preserving the first
/// occurrence order.
fn normalize_permissions(permissions: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for permission in permissions {
        let trimmed = permission.trim();
        if trimmed.is_empty() || seen.iter().any(|p| p == trimmed) {
            continue;
        }
        seen.push(trimmed.to_string());
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_role_normalizes_permissions() {
        let role = NewRole::new(
            1,
            "  Kitchen Staff ".to_string(),
            "".to_string(),
            RoleType::Custom,
            vec![
                "waste.view".to_string(),
                " waste.view ".to_string(),
                "".to_string(),
                "waste.manage".to_string(),
            ],
        );
        assert_eq!(role.name, "Kitchen Staff");
        assert_eq!(role.permissions, vec!["waste.view", "waste.manage"]);
    }

    #[test]
    fn role_type_round_trips() {
        assert_eq!(RoleType::try_from("system"), Ok(RoleType::System));
        assert_eq!(RoleType::System.as_str(), "system");
        assert!(RoleType::try_from("root").is_err());
    }
}
