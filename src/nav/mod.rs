//! Permission-gated navigation tree.
//!
//! The static menu tree is the single source of truth for both menu
//! structure and per-path permission requirements: [`permissions_for_path`]
//! is derived by walking it, so there is no separate path table to keep in
//! sync. A path that does not appear in the tree requires no permissions.

use std::collections::HashSet;

use serde::Serialize;

pub mod prefs;

/// Every permission the dashboard knows about, with a human label for the
/// role editor.
pub const KNOWN_PERMISSIONS: &[(&str, &str)] = &[
    ("students.view", "View students"),
    ("students.manage", "Manage students"),
    ("suppliers.view", "View suppliers"),
    ("suppliers.manage", "Manage suppliers"),
    ("waste.view", "View waste records"),
    ("waste.manage", "Manage waste records"),
    ("roles.view", "View roles"),
    ("roles.manage", "Manage roles"),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuItem {
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    /// OR semantics: holding any one of these grants access. Empty means
    /// public.
    pub required_permissions: &'static [&'static str],
    pub submenu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuSection {
    pub title: &'static str,
    pub expandable: bool,
    pub items: Vec<MenuItem>,
}

fn item(
    title: &'static str,
    path: &'static str,
    icon: &'static str,
    required_permissions: &'static [&'static str],
) -> MenuItem {
    MenuItem {
        title,
        path,
        icon,
        required_permissions,
        submenu: Vec::new(),
    }
}

/// The full sidebar tree, before permission filtering.
pub fn menu() -> Vec<MenuSection> {
    vec![
        MenuSection {
            title: "Overview",
            expandable: false,
            items: vec![item("Dashboard", "/", "home", &[])],
        },
        MenuSection {
            title: "Master Data",
            expandable: true,
            items: vec![
                item(
                    "Students",
                    "/students",
                    "users",
                    &["students.view", "students.manage"],
                ),
                item(
                    "Suppliers",
                    "/suppliers",
                    "truck",
                    &["suppliers.view", "suppliers.manage"],
                ),
            ],
        },
        MenuSection {
            title: "Operations",
            expandable: true,
            items: vec![item(
                "Waste Records",
                "/waste",
                "trash",
                &["waste.view", "waste.manage"],
            )],
        },
        MenuSection {
            title: "Administration",
            expandable: true,
            items: vec![MenuItem {
                title: "Roles",
                path: "/roles",
                icon: "shield",
                required_permissions: &["roles.view", "roles.manage"],
                submenu: vec![item(
                    "Permission Matrix",
                    "/roles/permissions",
                    "grid",
                    &["roles.view", "roles.manage"],
                )],
            }],
        },
    ]
}

/// Permission requirements configured for a path, or an empty slice when the
/// path is not in the tree (public).
pub fn permissions_for_path(path: &str) -> &'static [&'static str] {
    fn walk(items: &[MenuItem], path: &str) -> Option<&'static [&'static str]> {
        for item in items {
            if item.path == path {
                return Some(item.required_permissions);
            }
            if let Some(found) = walk(&item.submenu, path) {
                return Some(found);
            }
        }
        None
    }

    for section in menu() {
        if let Some(found) = walk(&section.items, path) {
            return found;
        }
    }
    &[]
}

/// The caller's resolved permission set, or the not-yet-resolved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Permission resolution has not completed. Everything gated is denied
    /// until it does; public items stay visible.
    Pending,
    Granted(HashSet<String>),
}

impl Access {
    pub fn from_permissions<I>(permissions: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Access::Granted(permissions.into_iter().collect())
    }

    /// True when `required` is empty, or when any required permission is in
    /// the granted set.
    pub fn allows(&self, required: &[&str]) -> bool {
        if required.is_empty() {
            return true;
        }
        match self {
            Access::Pending => false,
            Access::Granted(granted) => required.iter().any(|p| granted.contains(*p)),
        }
    }

    pub fn allows_item(&self, item: &MenuItem) -> bool {
        self.allows(item.required_permissions)
    }

    pub fn allows_path(&self, path: &str) -> bool {
        self.allows(permissions_for_path(path))
    }
}

/// Prunes the tree down to what the caller may see. Declaration order is
/// preserved; a parent whose filtered submenu comes out empty is dropped even
/// when the parent itself is allowed; sections left without items disappear.
pub fn filter_menu(sections: &[MenuSection], access: &Access) -> Vec<MenuSection> {
    sections
        .iter()
        .filter_map(|section| {
            let items: Vec<MenuItem> = section
                .items
                .iter()
                .filter_map(|item| filter_item(item, access))
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(MenuSection {
                    title: section.title,
                    expandable: section.expandable,
                    items,
                })
            }
        })
        .collect()
}

fn filter_item(item: &MenuItem, access: &Access) -> Option<MenuItem> {
    if !access.allows_item(item) {
        return None;
    }
    if item.submenu.is_empty() {
        return Some(item.clone());
    }

    let submenu: Vec<MenuItem> = item
        .submenu
        .iter()
        .filter_map(|child| filter_item(child, access))
        .collect();

    if submenu.is_empty() {
        None
    } else {
        Some(MenuItem {
            submenu,
            ..item.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted(permissions: &[&str]) -> Access {
        Access::from_permissions(permissions.iter().map(|p| p.to_string()))
    }

    fn sample_tree() -> Vec<MenuSection> {
        vec![
            MenuSection {
                title: "First",
                expandable: false,
                items: vec![
                    item("Public", "/public", "dot", &[]),
                    item("Gated", "/gated", "dot", &["a.view"]),
                ],
            },
            MenuSection {
                title: "Second",
                expandable: true,
                items: vec![MenuItem {
                    title: "Parent",
                    path: "/parent",
                    icon: "dot",
                    required_permissions: &[],
                    submenu: vec![
                        item("Child A", "/parent/a", "dot", &["b.view"]),
                        item("Child B", "/parent/b", "dot", &["c.view"]),
                    ],
                }],
            },
        ]
    }

    #[test]
    fn pending_denies_every_gated_item() {
        let access = Access::Pending;
        assert!(!access.allows(&["a.view"]));
        assert!(access.allows(&[]));

        let filtered = filter_menu(&sample_tree(), &access);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].items.len(), 1);
        assert_eq!(filtered[0].items[0].path, "/public");
    }

    #[test]
    fn or_semantics_across_requirements() {
        let access = granted(&["waste.manage"]);
        assert!(access.allows(&["waste.view", "waste.manage"]));
        assert!(!access.allows(&["roles.view", "roles.manage"]));
    }

    #[test]
    fn parent_is_dropped_when_submenu_filters_empty() {
        // The parent itself is public, but every child is denied.
        let access = granted(&["a.view"]);
        let filtered = filter_menu(&sample_tree(), &access);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "First");
        assert!(
            filtered
                .iter()
                .all(|s| s.items.iter().all(|i| i.path != "/parent"))
        );
    }

    #[test]
    fn submenu_is_filtered_per_child() {
        let access = granted(&["b.view"]);
        let filtered = filter_menu(&sample_tree(), &access);

        let parent = filtered
            .iter()
            .flat_map(|s| &s.items)
            .find(|i| i.path == "/parent")
            .expect("parent should survive");
        assert_eq!(parent.submenu.len(), 1);
        assert_eq!(parent.submenu[0].path, "/parent/a");
    }

    #[test]
    fn filtering_preserves_declaration_order() {
        let access = granted(&["a.view", "b.view", "c.view"]);
        let filtered = filter_menu(&sample_tree(), &access);

        assert_eq!(filtered[0].items[0].path, "/public");
        assert_eq!(filtered[0].items[1].path, "/gated");
        let parent = &filtered[1].items[0];
        assert_eq!(parent.submenu[0].path, "/parent/a");
        assert_eq!(parent.submenu[1].path, "/parent/b");
    }

    #[test]
    fn filtering_is_idempotent() {
        for access in [Access::Pending, granted(&["a.view"]), granted(&["b.view"])] {
            let once = filter_menu(&sample_tree(), &access);
            let twice = filter_menu(&once, &access);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn unmapped_paths_are_public() {
        assert!(permissions_for_path("/nonexistent").is_empty());
        assert!(Access::Pending.allows_path("/nonexistent"));
    }

    #[test]
    fn path_lookup_walks_submenus() {
        let required = permissions_for_path("/roles/permissions");
        assert!(required.contains(&"roles.manage"));

        let students = permissions_for_path("/students");
        assert_eq!(students, &["students.view", "students.manage"]);
    }

    #[test]
    fn menu_paths_are_unique() {
        fn collect(items: &[MenuItem], paths: &mut Vec<&'static str>) {
            for item in items {
                paths.push(item.path);
                collect(&item.submenu, paths);
            }
        }

        let mut paths = Vec::new();
        for section in menu() {
            collect(&section.items, &mut paths);
        }
        let mut deduped = paths.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(paths.len(), deduped.len());
    }
}
