//! Persisted sidebar expand/collapse state.
//!
//! The store is injected behind [`PreferencesStore`] so services and tests
//! never touch a real backend. The shipped implementation keeps the state in
//! the cookie session; concurrent tabs race on last-write-wins, which is
//! acceptable for a per-user display preference.

use std::collections::BTreeMap;

use actix_session::Session;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session key holding the serialized [`MenuState`].
pub const MENU_STATE_KEY: &str = "sidebar_menu_state";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuPreferences {
    pub auto_expand_active: bool,
    pub persist_state: bool,
    pub prevent_active_collapse: bool,
}

impl Default for MenuPreferences {
    fn default() -> Self {
        Self {
            auto_expand_active: true,
            persist_state: true,
            prevent_active_collapse: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MenuState {
    /// Expansion flag per section title. Sections not present default to
    /// expanded.
    pub expanded: BTreeMap<String, bool>,
    pub preferences: MenuPreferences,
}

impl MenuState {
    pub fn is_expanded(&self, section_title: &str) -> bool {
        self.expanded.get(section_title).copied().unwrap_or(true)
    }

    pub fn set_expanded(&mut self, section_title: impl Into<String>, expanded: bool) {
        self.expanded.insert(section_title.into(), expanded);
    }

    /// Parses a stored payload, falling back to defaults on corrupt or
    /// missing data.
    pub fn from_json(raw: Option<&str>) -> Self {
        raw.and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to persist menu state: {0}")]
    Store(String),
}

/// Load/save boundary for the sidebar state.
pub trait PreferencesStore {
    fn load(&self) -> MenuState;
    fn save(&self, state: &MenuState) -> Result<(), PreferencesError>;
}

/// Cookie-session-backed store.
pub struct SessionPreferencesStore<'a> {
    session: &'a Session,
}

impl<'a> SessionPreferencesStore<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl PreferencesStore for SessionPreferencesStore<'_> {
    fn load(&self) -> MenuState {
        let raw = self.session.get::<String>(MENU_STATE_KEY).unwrap_or(None);
        MenuState::from_json(raw.as_deref())
    }

    fn save(&self, state: &MenuState) -> Result<(), PreferencesError> {
        self.session
            .insert(MENU_STATE_KEY, state.to_json())
            .map_err(|e| PreferencesError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// In-memory store used to exercise the trait without a session.
    struct MemoryStore {
        raw: RefCell<Option<String>>,
    }

    impl PreferencesStore for MemoryStore {
        fn load(&self) -> MenuState {
            MenuState::from_json(self.raw.borrow().as_deref())
        }

        fn save(&self, state: &MenuState) -> Result<(), PreferencesError> {
            *self.raw.borrow_mut() = Some(state.to_json());
            Ok(())
        }
    }

    #[test]
    fn missing_state_falls_back_to_defaults() {
        let state = MenuState::from_json(None);
        assert!(state.expanded.is_empty());
        assert!(state.preferences.auto_expand_active);
        assert!(state.is_expanded("Master Data"));
    }

    #[test]
    fn corrupt_state_falls_back_to_defaults() {
        assert_eq!(MenuState::from_json(Some("{nope")), MenuState::default());
        assert_eq!(MenuState::from_json(Some("42")), MenuState::default());
    }

    #[test]
    fn partial_payloads_keep_default_preferences() {
        let state = MenuState::from_json(Some(r#"{"expanded":{"Operations":false}}"#));
        assert!(!state.is_expanded("Operations"));
        assert!(state.is_expanded("Master Data"));
        assert!(state.preferences.persist_state);
    }

    #[test]
    fn round_trips_through_a_store() {
        let store = MemoryStore {
            raw: RefCell::new(None),
        };

        let mut state = store.load();
        state.set_expanded("Administration", false);
        state.preferences.auto_expand_active = false;
        store.save(&state).unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded, state);
        assert!(!reloaded.is_expanded("Administration"));
    }
}
