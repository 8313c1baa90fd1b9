//! In-process host: a tiny document model, map-backed storage and a
//! manually driven scheduler with a virtual clock.
//!
//! Handles are `Rc`-shared, so clones observe the same state. Everything is
//! single-threaded, like the browser event loop it stands in for.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use crate::host::{Document, Handler, Node, PreferenceStore, Scheduler, Task};
use crate::theme::{ICON_ID, TEXT_ID, TOGGLE_ID};

// =============================================================================
// Storage
// =============================================================================

/// Map-backed [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            available: true,
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Storage that behaves like a browser with storage disabled: reads
    /// find nothing and writes are dropped.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) {
        if self.available {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Default)]
struct NodeState {
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
}

/// Element handle.
#[derive(Clone, Default)]
pub struct MemoryNode {
    state: Rc<RefCell<NodeState>>,
    handlers: Rc<RefCell<Vec<Rc<RefCell<Handler>>>>>,
    mutations: Rc<Cell<usize>>,
}

impl std::fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryNode")
            .field("state", &self.state.borrow())
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

impl MemoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class_name(class_name: &str) -> Self {
        let node = Self::new();
        node.state.borrow_mut().classes = split_classes(class_name);
        node
    }

    pub fn class_name(&self) -> String {
        self.state.borrow().classes.join(" ")
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// Number of registered click handlers.
    pub fn click_handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Dispatches a click to every registered handler.
    pub fn click(&self) {
        // Handlers mutate this node; release the list before running them.
        let handlers: Vec<_> = self.handlers.borrow().iter().cloned().collect();
        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Number of mutating calls made on this node.
    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    fn touch(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

fn split_classes(class_name: &str) -> Vec<String> {
    class_name.split_whitespace().map(str::to_string).collect()
}

impl Node for MemoryNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.touch();
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_class_name(&self, class_name: &str) {
        self.touch();
        self.state.borrow_mut().classes = split_classes(class_name);
    }

    fn set_text(&self, text: &str) {
        self.touch();
        self.state.borrow_mut().text = text.to_string();
    }

    fn add_class(&self, class: &str) {
        self.touch();
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.touch();
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    fn on_click(&self, handler: Handler) {
        self.touch();
        self.handlers
            .borrow_mut()
            .push(Rc::new(RefCell::new(handler)));
    }
}

#[derive(Debug)]
struct DocState {
    root: MemoryNode,
    body: Option<MemoryNode>,
    elements: HashMap<String, MemoryNode>,
    loading: bool,
}

/// Document handle.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    inner: Rc<RefCell<DocState>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A fully parsed document with a body and no toggle control.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocState {
                root: MemoryNode::new(),
                body: Some(MemoryNode::new()),
                elements: HashMap::new(),
                loading: false,
            })),
        }
    }

    /// A document still being parsed: only `<html>` exists.
    pub fn loading() -> Self {
        let doc = Self::new();
        {
            let mut state = doc.inner.borrow_mut();
            state.body = None;
            state.loading = true;
        }
        doc
    }

    /// Adds `themeToggle`, `themeIcon` and `themeText` elements.
    pub fn with_toggle(self) -> Self {
        self.insert(TOGGLE_ID, MemoryNode::with_class_name("theme-toggle"));
        self.insert(ICON_ID, MemoryNode::new());
        self.insert(TEXT_ID, MemoryNode::new());
        self
    }

    pub fn insert(&self, id: &str, node: MemoryNode) {
        self.inner.borrow_mut().elements.insert(id.to_string(), node);
    }

    /// Creates `<body>` (if missing) with the given classes.
    pub fn attach_body(&self, class_name: &str) -> MemoryNode {
        let mut state = self.inner.borrow_mut();
        state
            .body
            .get_or_insert_with(|| MemoryNode::with_class_name(class_name))
            .clone()
    }

    pub fn finish_loading(&self) {
        self.inner.borrow_mut().loading = false;
    }

    /// Total mutations across root, body and identified elements.
    pub fn mutation_count(&self) -> usize {
        let state = self.inner.borrow();
        state.root.mutation_count()
            + state.body.as_ref().map_or(0, MemoryNode::mutation_count)
            + state
                .elements
                .values()
                .map(MemoryNode::mutation_count)
                .sum::<usize>()
    }
}

impl Document for MemoryDocument {
    type Node = MemoryNode;

    fn root(&self) -> Option<MemoryNode> {
        Some(self.inner.borrow().root.clone())
    }

    fn body(&self) -> Option<MemoryNode> {
        self.inner.borrow().body.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.inner.borrow().elements.get(id).cloned()
    }

    fn is_loading(&self) -> bool {
        self.inner.borrow().loading
    }
}

// =============================================================================
// Scheduler
// =============================================================================

#[derive(Default)]
struct SchedState {
    now: Duration,
    ready_fired: bool,
    ready: Vec<Task>,
    timers: Vec<(Duration, u64, Task)>,
    next_seq: u64,
}

/// Scheduler driven explicitly by the caller via [`ManualScheduler::fire_ready`]
/// and [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<SchedState>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("ready_fired", &state.ready_fired)
            .field("pending_ready", &state.ready.len())
            .field("pending_timers", &state.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn pending_ready(&self) -> usize {
        self.inner.borrow().ready.len()
    }

    /// Signals document readiness, running queued tasks in registration order.
    pub fn fire_ready(&self) {
        let tasks = {
            let mut state = self.inner.borrow_mut();
            state.ready_fired = true;
            std::mem::take(&mut state.ready)
        };
        for task in tasks {
            task();
        }
    }

    /// Moves the clock forward, running every timer that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut state = self.inner.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let (at, _, task) = state.timers.remove(idx);
                    state.now = at;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn when_ready(&self, task: Task) {
        let fired = self.inner.borrow().ready_fired;
        if fired {
            task();
        } else {
            self.inner.borrow_mut().ready.push(task);
        }
    }

    fn after(&self, delay: Duration, task: Task) {
        let mut state = self.inner.borrow_mut();
        let at = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.timers.push((at, seq, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_storage_drops_writes() {
        let storage = MemoryStorage::unavailable();
        storage.save("theme", "dark");
        assert_eq!(storage.load("theme"), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_node_classes() {
        let node = MemoryNode::with_class_name("a  b");
        node.add_class("c");
        node.add_class("a");
        node.remove_class("b");
        assert_eq!(node.class_name(), "a c");
        assert!(node.has_class("c"));
        assert_eq!(node.mutation_count(), 3);
    }

    #[test]
    fn test_click_runs_handlers_that_mutate_the_node() {
        let node = MemoryNode::new();
        let target = node.clone();
        node.on_click(Box::new(move || target.set_text("clicked")));
        node.click();
        assert_eq!(node.text(), "clicked");
        assert_eq!(node.click_handler_count(), 1);
    }

    #[test]
    fn test_loading_document_has_no_body_until_attached() {
        let doc = MemoryDocument::loading();
        assert!(doc.is_loading());
        assert!(doc.body().is_none());
        let body = doc.attach_body("no-transition");
        assert!(body.has_class("no-transition"));
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_scheduler_runs_timers_in_due_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(30, "late"), (10, "early"), (10, "early-second")] {
            let log = log.clone();
            sched.after(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(name)),
            );
        }

        sched.advance(Duration::from_millis(20));
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);
        assert_eq!(sched.pending_timers(), 1);

        sched.advance(Duration::from_millis(10));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(sched.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_when_ready_after_fire_runs_immediately() {
        let sched = ManualScheduler::new();
        let ran = Rc::new(Cell::new(0));

        let r = ran.clone();
        sched.when_ready(Box::new(move || r.set(r.get() + 1)));
        assert_eq!(ran.get(), 0);
        sched.fire_ready();
        assert_eq!(ran.get(), 1);

        let r = ran.clone();
        sched.when_ready(Box::new(move || r.set(r.get() + 1)));
        assert_eq!(ran.get(), 2);
    }

    #[test]
    fn test_timer_scheduled_from_timer_uses_its_due_time() {
        let sched = ManualScheduler::new();
        let fired_at = Rc::new(Cell::new(None));

        let inner_sched = sched.clone();
        let fired = fired_at.clone();
        sched.after(
            Duration::from_millis(5),
            Box::new(move || {
                let clock = inner_sched.clone();
                inner_sched.after(
                    Duration::from_millis(5),
                    Box::new(move || fired.set(Some(clock.now()))),
                );
            }),
        );

        sched.advance(Duration::from_millis(100));
        assert_eq!(fired_at.get(), Some(Duration::from_millis(10)));
    }
}
