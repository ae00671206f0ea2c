use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;
use crate::domain::role::{Role, RoleType};
use crate::dto::{selected, trimmed};
use crate::listing::{self, PageStats};
use crate::pagination::Paginated;
use crate::repository::RoleListQuery;

/// Query parameters accepted by the roles list page and API.
#[derive(Debug, Default, Deserialize)]
pub struct RoleListParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub role_type: Option<String>,
    pub permission: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl RoleListParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        listing::clamp_page_size(self.limit.unwrap_or(listing::DEFAULT_PAGE_SIZE))
    }

    pub fn to_query(&self, school_id: i32) -> Result<RoleListQuery, UnknownVariant> {
        let mut query = RoleListQuery::new(school_id).paginate(self.page(), self.limit());
        if let Some(term) = trimmed(&self.search) {
            query = query.search(term);
        }
        if let Some(value) = selected(&self.role_type) {
            query = query.role_type(RoleType::try_from(value)?);
        }
        if let Some(value) = selected(&self.permission) {
            query = query.permission(value);
        }
        Ok(query)
    }
}

/// Quick stats over the fetched page only.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct RolePageStats {
    pub system: usize,
    pub custom: usize,
}

impl PageStats<Role> for RolePageStats {
    fn from_page(items: &[Role]) -> Self {
        let system = items
            .iter()
            .filter(|r| r.role_type == RoleType::System)
            .count();
        Self {
            system,
            custom: items.len() - system,
        }
    }
}

/// Data required to render the roles list template.
pub struct RolesPageData {
    pub roles: Paginated<Role>,
    pub stats: RolePageStats,
    pub search: Option<String>,
    pub selected_type: Option<String>,
    pub selected_permission: Option<String>,
}

/// Data required to render the role detail template.
pub struct RoleDetailPageData {
    pub role: Role,
}

/// One row of the permission matrix: which roles grant a permission.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PermissionRow {
    pub permission: String,
    pub label: String,
    pub roles: Vec<String>,
}

pub struct PermissionMatrixData {
    pub rows: Vec<PermissionRow>,
}
