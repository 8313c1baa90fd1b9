//! Theme toggle control: applies the theme to the page and flips it on click.

use tracing::{debug, info};

use crate::host::{Document, Node, PreferenceStore};
use crate::preference::ThemePreference;
use crate::theme::{
    Theme, DARK_MODE_CLASS, ICON_ID, INITIALIZED_ATTR, TEXT_ID, THEME_ATTR, TOGGLE_ID,
};

/// Result of [`ThemeController::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Click handler attached; the stored theme was applied.
    Attached(Theme),
    /// This page has no (complete) toggle control.
    MissingControls,
    /// The control already carries the initialization marker.
    AlreadyInitialized,
}

/// Binds the toggle control to the persisted preference.
#[derive(Debug, Clone)]
pub struct ThemeController<D, S> {
    document: D,
    preference: ThemePreference<S>,
}

impl<D, S> ThemeController<D, S>
where
    D: Document + Clone + 'static,
    S: PreferenceStore + Clone + 'static,
{
    pub fn new(document: D, store: S) -> Self {
        Self {
            document,
            preference: ThemePreference::new(store),
        }
    }

    pub fn preference(&self) -> &ThemePreference<S> {
        &self.preference
    }

    /// Wires the toggle control. Safe to call more than once; only the first
    /// call on a given control attaches a handler.
    pub fn initialize(&self) -> InitOutcome {
        let toggle = self.document.element_by_id(TOGGLE_ID);
        let icon = self.document.element_by_id(ICON_ID);
        let text = self.document.element_by_id(TEXT_ID);
        let (Some(toggle), Some(_), Some(_)) = (toggle, icon, text) else {
            debug!("No theme toggle on this page");
            return InitOutcome::MissingControls;
        };

        if toggle.has_attribute(INITIALIZED_ATTR) {
            debug!("Theme toggle already initialized");
            return InitOutcome::AlreadyInitialized;
        }
        toggle.set_attribute(INITIALIZED_ATTR, "true");

        let theme = self.preference.get();
        self.apply(theme);

        let controller = self.clone();
        toggle.on_click(Box::new(move || {
            controller.on_toggle_click();
        }));

        info!(%theme, "Theme toggle initialized");
        InitOutcome::Attached(theme)
    }

    /// Reflects `theme` onto `<html>`, the body and the toggle control.
    /// Missing elements are skipped.
    pub fn apply(&self, theme: Theme) {
        if let Some(root) = self.document.root() {
            root.set_attribute(THEME_ATTR, theme.as_str());
        }
        if let Some(body) = self.document.body() {
            body.set_attribute(THEME_ATTR, theme.as_str());
        }
        if let Some(icon) = self.document.element_by_id(ICON_ID) {
            icon.set_class_name(theme.icon_class());
        }
        if let Some(text) = self.document.element_by_id(TEXT_ID) {
            text.set_text(theme.label());
        }
        if let Some(toggle) = self.document.element_by_id(TOGGLE_ID) {
            if theme.is_dark() {
                toggle.add_class(DARK_MODE_CLASS);
            } else {
                toggle.remove_class(DARK_MODE_CLASS);
            }
        }
    }

    /// Flips the theme shown on the body, applies it and persists it.
    pub fn on_toggle_click(&self) -> Theme {
        let current = Theme::resolve_opt(
            self.document
                .body()
                .and_then(|body| body.attribute(THEME_ATTR))
                .as_deref(),
        );
        let next = current.toggled();

        self.apply(next);
        self.preference.set(next);

        debug!(from = %current, to = %next, "Theme toggled");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryNode, MemoryStorage};
    use crate::theme::STORAGE_KEY;

    type Controller = ThemeController<MemoryDocument, MemoryStorage>;

    fn page(stored: Option<&str>) -> (MemoryDocument, MemoryStorage, Controller) {
        let doc = MemoryDocument::new().with_toggle();
        let storage = match stored {
            Some(value) => MemoryStorage::with_entry(STORAGE_KEY, value),
            None => MemoryStorage::new(),
        };
        let controller = ThemeController::new(doc.clone(), storage.clone());
        (doc, storage, controller)
    }

    fn el(doc: &MemoryDocument, id: &str) -> MemoryNode {
        doc.element_by_id(id).unwrap()
    }

    #[test]
    fn test_apply_dark() {
        let (doc, _storage, controller) = page(None);

        controller.apply(Theme::Dark);

        let body = doc.body().unwrap();
        assert_eq!(body.attribute(THEME_ATTR).as_deref(), Some("dark"));
        assert_eq!(el(&doc, ICON_ID).class_name(), "fas fa-moon");
        assert_eq!(el(&doc, TEXT_ID).text(), "Dark");
        assert!(el(&doc, TOGGLE_ID).has_class(DARK_MODE_CLASS));
        assert!(el(&doc, TOGGLE_ID).has_class("theme-toggle"));
    }

    #[test]
    fn test_apply_light_clears_dark_mode() {
        let (doc, _storage, controller) = page(None);
        controller.apply(Theme::Dark);

        controller.apply(Theme::Light);

        let body = doc.body().unwrap();
        assert_eq!(body.attribute(THEME_ATTR).as_deref(), Some("light"));
        assert_eq!(el(&doc, ICON_ID).class_name(), "fas fa-sun");
        assert_eq!(el(&doc, TEXT_ID).text(), "Light");
        assert!(!el(&doc, TOGGLE_ID).has_class(DARK_MODE_CLASS));
    }

    #[test]
    fn test_apply_without_controls_only_touches_root_and_body() {
        let doc = MemoryDocument::new();
        let controller = ThemeController::new(doc.clone(), MemoryStorage::new());

        controller.apply(Theme::Dark);

        assert_eq!(doc.mutation_count(), 2);
        assert_eq!(
            doc.root().unwrap().attribute(THEME_ATTR).as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_initialize_applies_stored_theme() {
        let (doc, _storage, controller) = page(Some("dark"));

        assert_eq!(controller.initialize(), InitOutcome::Attached(Theme::Dark));

        let toggle = el(&doc, TOGGLE_ID);
        assert_eq!(toggle.attribute(INITIALIZED_ATTR).as_deref(), Some("true"));
        assert_eq!(toggle.click_handler_count(), 1);
        assert_eq!(el(&doc, TEXT_ID).text(), "Dark");
    }

    #[test]
    fn test_initialize_twice_attaches_once() {
        let (doc, storage, controller) = page(None);

        controller.initialize();
        assert_eq!(controller.initialize(), InitOutcome::AlreadyInitialized);

        let toggle = el(&doc, TOGGLE_ID);
        assert_eq!(toggle.click_handler_count(), 1);

        // One click flips once, not twice.
        toggle.click();
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_initialize_without_controls_is_a_no_op() {
        let doc = MemoryDocument::new();
        doc.insert(TOGGLE_ID, MemoryNode::new());
        doc.insert(ICON_ID, MemoryNode::new());
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "dark");
        let controller = ThemeController::new(doc.clone(), storage);

        assert_eq!(controller.initialize(), InitOutcome::MissingControls);
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn test_click_persists_what_it_applied() {
        let (doc, storage, controller) = page(None);
        controller.initialize();
        let toggle = el(&doc, TOGGLE_ID);

        for _ in 0..3 {
            toggle.click();
            let shown = doc.body().unwrap().attribute(THEME_ATTR);
            assert_eq!(storage.get(STORAGE_KEY), shown);
            assert_eq!(doc.root().unwrap().attribute(THEME_ATTR), shown);
        }
        assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        for start in [Theme::Light, Theme::Dark] {
            let (doc, _storage, controller) = page(None);
            controller.apply(start);

            controller.on_toggle_click();
            let back = controller.on_toggle_click();

            assert_eq!(back, start);
            assert_eq!(
                doc.body().unwrap().attribute(THEME_ATTR).as_deref(),
                Some(start.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_body_theme_toggles_to_dark() {
        let (doc, _storage, controller) = page(None);
        doc.body().unwrap().set_attribute(THEME_ATTR, "sepia");

        assert_eq!(controller.on_toggle_click(), Theme::Dark);
    }

    #[test]
    fn test_unavailable_storage_still_toggles_display() {
        let doc = MemoryDocument::new().with_toggle();
        let controller = ThemeController::new(doc.clone(), MemoryStorage::unavailable());

        assert_eq!(controller.initialize(), InitOutcome::Attached(Theme::Light));
        el(&doc, TOGGLE_ID).click();

        assert_eq!(el(&doc, TEXT_ID).text(), "Dark");
        assert_eq!(controller.preference().get(), Theme::Light);
    }
}
