//! Process-wide stores shared between views.
//!
//! The home view's scroll position survives a trip into a sub-view through
//! [`ScrollStore`]; the search handoff travels through [`SessionStore`].
//! Both are handed out as `Arc`s so every view sees the same instance.

use std::collections::HashMap;
use std::sync::Mutex;

/// Session key holding the question typed into the home search prompt.
pub const SEARCH_INITIAL_MSG: &str = "search:initial-msg";
/// Session key holding the newline-joined context list for that question.
pub const SEARCH_INITIAL_CONTEXTS: &str = "search:initial-contexts";

/// Single-slot store for the home view's scroll offset.
pub trait ScrollStore: Send + Sync {
    fn get(&self) -> Option<u32>;
    fn set(&self, value: u32);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryScrollStore {
    home: Mutex<Option<u32>>,
}

impl MemoryScrollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScrollStore for MemoryScrollStore {
    fn get(&self) -> Option<u32> {
        self.home.lock().ok().and_then(|slot| *slot)
    }

    fn set(&self, value: u32) {
        if let Ok(mut slot) = self.home.lock() {
            *slot = Some(value);
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.home.lock() {
            *slot = None;
        }
    }
}

/// String key-value storage scoped to one run of the program.
#[derive(Debug, Default)]
pub struct SessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.into());
        }
    }

    #[cfg(test)]
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    /// Read and remove in one step, for values meant to be consumed once.
    pub fn take_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_store_set_get_clear() {
        let store = MemoryScrollStore::new();
        assert_eq!(store.get(), None);
        store.set(640);
        assert_eq!(store.get(), Some(640));
        store.set(12);
        assert_eq!(store.get(), Some(12));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_session_take_consumes() {
        let session = SessionStore::new();
        session.set_item(SEARCH_INITIAL_MSG, "how do I snap?");
        assert_eq!(
            session.get_item(SEARCH_INITIAL_MSG).as_deref(),
            Some("how do I snap?")
        );
        assert_eq!(
            session.take_item(SEARCH_INITIAL_MSG).as_deref(),
            Some("how do I snap?")
        );
        assert_eq!(session.take_item(SEARCH_INITIAL_MSG), None);
        assert_eq!(session.get_item(SEARCH_INITIAL_CONTEXTS), None);
    }
}
