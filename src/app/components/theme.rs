//! Theme toggle markup and the client-side theme bootstrap.

use dioxus::prelude::*;

use crate::theme::{Theme, DARK_MODE_CLASS, ICON_ID, STORAGE_KEY, TEXT_ID, THEME_ATTR, TOGGLE_ID};

/// Toggle button wired up by the WASM controller after load.
///
/// Renders the `themeToggle` / `themeIcon` / `themeText` elements the
/// controller looks up. `initial` only affects the server-rendered markup;
/// the stored preference wins once the controller runs.
#[component]
pub fn ThemeToggle(#[props(default)] initial: Theme) -> Element {
    let class = if initial.is_dark() {
        format!("theme-toggle {DARK_MODE_CLASS}")
    } else {
        "theme-toggle".to_string()
    };
    let label = initial.label();

    rsx! {
        button {
            id: TOGGLE_ID,
            class: "{class}",
            r#type: "button",
            title: "Toggle theme",
            i { id: ICON_ID, class: initial.icon_class() }
            " "
            span { id: TEXT_ID, "{label}" }
        }
    }
}

/// Inline script for `<head>`: sets `data-theme` before the body is painted,
/// ahead of the WASM bundle being fetched.
pub fn early_theme_script() -> String {
    format!(
        r#"(function(){{
    var t = null;
    try {{ t = localStorage.getItem('{STORAGE_KEY}'); }} catch (e) {{}}
    t = t === 'dark' ? 'dark' : 'light';
    document.documentElement.setAttribute('{THEME_ATTR}', t);
    if (document.body) document.body.setAttribute('{THEME_ATTR}', t);
}})();"#
    )
}

/// Module script that instantiates the wasm-bindgen bundle at `bundle`.
pub fn bootstrap_script(bundle: &str) -> String {
    format!("import init from '{bundle}';\ninit();\n")
}

/// Light/dark palettes plus the transition guard.
pub const THEME_STYLES: &str = r#"
:root, [data-theme="light"] {
    --bg: #ffffff;
    --fg: #1d2430;
    --muted: #5b6472;
    --card: #f4f6f9;
    --accent: #2f6fed;
}
[data-theme="dark"] {
    --bg: #11151c;
    --fg: #e6e9ee;
    --muted: #9aa3b1;
    --card: #1a202a;
    --accent: #7aa2ff;
}
body {
    margin: 0;
    font-family: system-ui, sans-serif;
    background: var(--bg);
    color: var(--fg);
    transition: background-color 0.3s ease, color 0.3s ease;
}
body.no-transition, body.no-transition * { transition: none !important; }
.container { max-width: 48rem; margin: 0 auto; padding: 1rem; }
header.container { display: flex; justify-content: flex-end; }
.card { background: var(--card); border-radius: 0.5rem; padding: 1rem 1.25rem; }
small { color: var(--muted); }
/* Theme toggle */
.theme-toggle {
    border: 1px solid var(--muted);
    border-radius: 999px;
    background: transparent;
    color: var(--fg);
    padding: 0.35rem 0.9rem;
    cursor: pointer;
}
.theme-toggle.dark-mode { border-color: var(--accent); color: var(--accent); }
"#;
