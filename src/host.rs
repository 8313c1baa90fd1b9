//! Seams between the theme logic and the environment it runs in.
//!
//! The browser backend lives in [`crate::web`]; [`crate::memory`] provides an
//! in-process implementation. All operations are infallible from the caller's
//! point of view: a host that cannot perform one logs and carries on.

use std::time::Duration;

/// A one-shot callback queued on the host's event loop.
pub type Task = Box<dyn FnOnce() + 'static>;

/// A repeatable event handler.
pub type Handler = Box<dyn FnMut() + 'static>;

/// Origin-scoped persistent key-value storage.
pub trait PreferenceStore {
    /// Returns `None` when the key is unset or storage is unavailable.
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str);
}

/// An element in the document.
pub trait Node {
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn set_attribute(&self, name: &str, value: &str);

    /// Replaces the whole class list.
    fn set_class_name(&self, class_name: &str);

    fn set_text(&self, text: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn has_class(&self, class: &str) -> bool;

    fn on_click(&self, handler: Handler);
}

/// The page being themed.
pub trait Document {
    type Node: Node + Clone + 'static;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;

    /// The `<body>` element, which may not exist yet during early loading.
    fn body(&self) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// True while the document is still being parsed.
    fn is_loading(&self) -> bool;
}

/// Event-loop hooks. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    /// Runs `task` once the document signals readiness.
    fn when_ready(&self, task: Task);

    /// Runs `task` once after `delay`.
    fn after(&self, delay: Duration, task: Task);
}
