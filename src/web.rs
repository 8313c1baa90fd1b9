//! Browser backend built on `web-sys`, and the WASM entry point.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::boot::boot;
use crate::host::{Document, Handler, Node, PreferenceStore, Scheduler, Task};

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn save(&self, key: &str, value: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    debug!(key, "localStorage write rejected");
                }
            }
            None => debug!("localStorage unavailable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebNode(Element);

impl Node for WebNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn on_click(&self, handler: Handler) {
        let closure = Closure::wrap(handler);
        if self
            .0
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .is_err()
        {
            debug!("Failed to attach click listener");
        }
        // Listener lives as long as the page.
        closure.forget();
    }
}

#[derive(Debug, Clone)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self)
    }
}

impl Document for WebDocument {
    type Node = WebNode;

    fn root(&self) -> Option<WebNode> {
        self.0.document_element().map(WebNode)
    }

    fn body(&self) -> Option<WebNode> {
        self.0.body().map(|body| WebNode(body.into()))
    }

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        self.0.get_element_by_id(id).map(WebNode)
    }

    fn is_loading(&self) -> bool {
        self.0.ready_state() == "loading"
    }
}

/// `DOMContentLoaded` and `setTimeout`.
#[derive(Debug, Clone)]
pub struct BrowserScheduler {
    document: web_sys::Document,
}

impl BrowserScheduler {
    pub fn new(document: &WebDocument) -> Self {
        Self {
            document: document.0.clone(),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn when_ready(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let callback: &js_sys::Function = callback.unchecked_ref();
        if self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback)
            .is_err()
        {
            debug!("Failed to attach DOMContentLoaded listener");
        }
    }

    fn after(&self, delay: Duration, task: Task) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || task()).forget();
    }
}

/// Runs on module instantiation.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    dioxus::logger::initialize_default();

    let Some(document) = WebDocument::current() else {
        return;
    };
    let scheduler = BrowserScheduler::new(&document);
    boot(document, LocalStorage, scheduler);
}
