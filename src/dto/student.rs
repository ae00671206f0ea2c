use serde::{Deserialize, Serialize};

use crate::domain::UnknownVariant;
use crate::domain::student::{Gender, Student};
use crate::dto::{selected, trimmed};
use crate::listing::{self, PageStats};
use crate::pagination::Paginated;
use crate::repository::StudentListQuery;

/// Query parameters accepted by the students list page and API.
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    pub search: Option<String>,
    pub grade: Option<String>,
    pub gender: Option<String>,
    /// `"active"` / `"inactive"`, or the `"all"` sentinel.
    pub status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl StudentListParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        listing::clamp_page_size(self.limit.unwrap_or(listing::DEFAULT_PAGE_SIZE))
    }

    pub fn to_query(&self, school_id: i32) -> Result<StudentListQuery, UnknownVariant> {
        let mut query = StudentListQuery::new(school_id).paginate(self.page(), self.limit());
        if let Some(term) = trimmed(&self.search) {
            query = query.search(term);
        }
        if let Some(grade) = selected(&self.grade) {
            query = query.grade(grade);
        }
        if let Some(value) = selected(&self.gender) {
            query = query.gender(Gender::try_from(value)?);
        }
        match selected(&self.status) {
            Some("active") => query = query.active(true),
            Some("inactive") => query = query.active(false),
            Some(other) => return Err(UnknownVariant::new("student status", other)),
            None => {}
        }
        Ok(query)
    }
}

/// Quick stats over the fetched page only.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct StudentPageStats {
    pub male: usize,
    pub female: usize,
    pub with_allergies: usize,
}

impl PageStats<Student> for StudentPageStats {
    fn from_page(items: &[Student]) -> Self {
        let male = items.iter().filter(|s| s.gender == Gender::Male).count();
        Self {
            male,
            female: items.len() - male,
            with_allergies: items.iter().filter(|s| s.allergies.is_some()).count(),
        }
    }
}

/// Data required to render the students list template.
pub struct StudentsPageData {
    pub students: Paginated<Student>,
    pub stats: StudentPageStats,
    pub search: Option<String>,
    pub selected_grade: Option<String>,
    pub selected_gender: Option<String>,
    pub selected_status: Option<String>,
}

/// Data required to render the student detail template.
pub struct StudentDetailPageData {
    pub student: Student,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_maps_to_active_flag() {
        let params = StudentListParams {
            status: Some("inactive".to_string()),
            ..Default::default()
        };
        let query = params.to_query(1).unwrap();
        assert_eq!(query.active, Some(false));

        let params = StudentListParams {
            status: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query(1).unwrap().active, None);

        let params = StudentListParams {
            status: Some("expelled".to_string()),
            ..Default::default()
        };
        assert!(params.to_query(1).is_err());
    }
}
