//! DTO modules that bridge services with templates and APIs.

use crate::listing::FILTER_ALL;

pub mod api;
pub mod main;
pub mod role;
pub mod student;
pub mod supplier;
pub mod waste;

/// Non-empty trimmed value of an optional query parameter.
pub(crate) fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Like [`trimmed`] but also treats the `"all"` sentinel as absent.
pub(crate) fn selected(value: &Option<String>) -> Option<&str> {
    trimmed(value).filter(|s| *s != FILTER_ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_counts_as_unselected() {
        assert_eq!(selected(&Some("all".to_string())), None);
        assert_eq!(selected(&Some(" all ".to_string())), None);
        assert_eq!(selected(&Some("produce".to_string())), Some("produce"));
        assert_eq!(selected(&Some("  ".to_string())), None);
        assert_eq!(selected(&None), None);
    }
}
