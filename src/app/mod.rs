//! Server-rendered demo page.
//!
//! The markup is static; the toggle comes alive once the WASM bundle loads
//! and [`crate::boot::boot`] runs in the browser.

use dioxus::prelude::*;

pub mod components;

#[cfg(feature = "server")]
use components::Layout;

/// Demo page body.
#[component]
pub fn Home() -> Element {
    rsx! {
        h1 { "Light or dark" }
        div { class: "card",
            p {
                "Use the toggle in the corner to switch themes. The choice is kept in "
                code { "localStorage" }
                " and restored on the next visit without a flash of the wrong colours."
            }
            small { "Reload the page to check that your choice sticks." }
        }
    }
}

/// Renders the complete demo document, doctype included.
#[cfg(feature = "server")]
pub fn render_page(title: &str, bundle: &str) -> String {
    let html = dioxus_ssr::render_element(rsx! {
        Layout { title: title.to_string(), bundle: bundle.to_string(),
            Home {}
        }
    });
    format!("<!DOCTYPE html><html lang=\"en\">{html}</html>")
}
