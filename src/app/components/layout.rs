//! Document shell: head with styles and the early theme script, body that
//! starts with transitions disabled.

use dioxus::prelude::*;

use super::theme::{bootstrap_script, early_theme_script, ThemeToggle, THEME_STYLES};
use crate::theme::NO_TRANSITION_CLASS;

/// Font Awesome provides the sun/moon glyphs.
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css";

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// URL of the wasm-bindgen JS glue
    pub bundle: String,
    /// Page content
    pub children: Element,
}

/// `<head>` and `<body>` of the document; [`crate::app::render_page`] adds
/// the `<html>` wrapper.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let title = props.title.clone();
    let early = early_theme_script();
    let bootstrap = bootstrap_script(&props.bundle);

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
            link { rel: "stylesheet", href: FONT_AWESOME_CSS }
            style { dangerous_inner_html: THEME_STYLES }
            // Must run before <body> is parsed
            script { dangerous_inner_html: early }
        }
        body { class: NO_TRANSITION_CLASS,
            header { class: "container",
                ThemeToggle {}
            }
            main { class: "container",
                {props.children}
            }
            script { r#type: "module", dangerous_inner_html: bootstrap }
        }
    }
}
