use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: i32,
    pub school_id: i32,
    pub name: String,
    pub category: SupplierCategory,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: SupplierStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SupplierCategory {
    Produce,
    Protein,
    Dairy,
    Staple,
    Other,
}

impl SupplierCategory {
    pub const ALL: [SupplierCategory; 5] = [
        SupplierCategory::Produce,
        SupplierCategory::Protein,
        SupplierCategory::Dairy,
        SupplierCategory::Staple,
        SupplierCategory::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SupplierCategory::Produce => "produce",
            SupplierCategory::Protein => "protein",
            SupplierCategory::Dairy => "dairy",
            SupplierCategory::Staple => "staple",
            SupplierCategory::Other => "other",
        }
    }
}

impl Display for SupplierCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SupplierCategory {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "produce" => Ok(SupplierCategory::Produce),
            "protein" => Ok(SupplierCategory::Protein),
            "dairy" => Ok(SupplierCategory::Dairy),
            "staple" => Ok(SupplierCategory::Staple),
            "other" => Ok(SupplierCategory::Other),
            other => Err(UnknownVariant::new("supplier category", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    Active,
    Inactive,
}

impl SupplierStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::Inactive => "inactive",
        }
    }
}

impl Display for SupplierStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SupplierStatus {
    type Error = UnknownVariant;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "active" => Ok(SupplierStatus::Active),
            "inactive" => Ok(SupplierStatus::Inactive),
            other => Err(UnknownVariant::new("supplier status", other)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSupplier {
    pub school_id: i32,
    pub name: String,
    pub category: SupplierCategory,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: SupplierStatus,
}

impl NewSupplier {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        school_id: i32,
        name: String,
        category: SupplierCategory,
        contact_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        address: Option<String>,
        status: SupplierStatus,
    ) -> Self {
        Self {
            school_id,
            name: name.trim().to_string(),
            category,
            contact_name: contact_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateSupplier {
    pub name: String,
    pub category: SupplierCategory,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: SupplierStatus,
}

impl UpdateSupplier {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        category: SupplierCategory,
        contact_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        address: Option<String>,
        status: SupplierStatus,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            category,
            contact_name: contact_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
        }
    }
}

/// Loose phone format check: digits, spaces, dashes and `+`, 6 to 20
/// characters.
pub fn is_valid_phone(phone: &str) -> bool {
    (6..=20).contains(&phone.len())
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-' || c == '+')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_format() {
        assert!(is_valid_phone("0812-3456-789"));
        assert!(is_valid_phone("+62 812 3456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0812x3456"));
        assert!(!is_valid_phone("081234567890123456789"));
    }

    #[test]
    fn new_supplier_normalizes_contact_fields() {
        let supplier = NewSupplier::new(
            1,
            " Tani Makmur ".to_string(),
            SupplierCategory::Produce,
            Some("".to_string()),
            Some(" 0812-3456 ".to_string()),
            Some(" Tani@Example.COM ".to_string()),
            None,
            SupplierStatus::Active,
        );
        assert_eq!(supplier.name, "Tani Makmur");
        assert_eq!(supplier.contact_name, None);
        assert_eq!(supplier.phone, Some("0812-3456".to_string()));
        assert_eq!(supplier.email, Some("tani@example.com".to_string()));
        assert_eq!(supplier.address, None);
    }
}
