//! Persisted theme preference.

use tracing::debug;

use crate::host::PreferenceStore;
use crate::theme::{Theme, STORAGE_KEY};

/// Typed accessors for the single `theme` entry in persistent storage.
#[derive(Debug, Clone)]
pub struct ThemePreference<S> {
    store: S,
}

impl<S: PreferenceStore> ThemePreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored theme, light when unset or unrecognized.
    pub fn get(&self) -> Theme {
        Theme::resolve_opt(self.store.load(STORAGE_KEY).as_deref())
    }

    pub fn set(&self, theme: Theme) {
        debug!(%theme, "Persisting theme preference");
        self.store.save(STORAGE_KEY, theme.as_str());
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_unset_preference_reads_light() {
        let pref = ThemePreference::new(MemoryStorage::new());
        assert_eq!(pref.get(), Theme::Light);
    }

    #[test]
    fn test_unrecognized_value_reads_light() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "solarized");
        assert_eq!(ThemePreference::new(storage).get(), Theme::Light);
    }

    #[test]
    fn test_set_then_get() {
        let storage = MemoryStorage::new();
        let pref = ThemePreference::new(storage.clone());
        pref.set(Theme::Dark);
        assert_eq!(pref.get(), Theme::Dark);
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("dark"));
    }
}
