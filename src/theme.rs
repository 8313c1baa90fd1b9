//! Theme values and the fixed DOM/storage contract.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Storage key holding the persisted preference.
pub const STORAGE_KEY: &str = "theme";

/// Attribute mirrored onto `<html>` and `<body>`.
pub const THEME_ATTR: &str = "data-theme";

/// Marker set on the toggle control once its click handler is attached.
pub const INITIALIZED_ATTR: &str = "data-initialized";

/// Element ids of the toggle control and its children.
pub const TOGGLE_ID: &str = "themeToggle";
pub const ICON_ID: &str = "themeIcon";
pub const TEXT_ID: &str = "themeText";

/// Body class suppressing CSS transitions until the page is revealed.
pub const NO_TRANSITION_CLASS: &str = "no-transition";
/// Body class added once transitions are re-enabled.
pub const LOADED_CLASS: &str = "loaded";
/// Class carried by the toggle control while dark mode is active.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Delay between the ready pass and the reveal.
pub const REVEAL_DELAY: Duration = Duration::from_millis(200);

/// UI colour mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseThemeError(pub String);

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Lenient conversion used for stored and attribute values: only an
    /// exact `"dark"` is dark, everything else is light.
    pub fn resolve(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Like [`Theme::resolve`], treating a missing value as light.
    pub fn resolve_opt(value: Option<&str>) -> Self {
        value.map(Self::resolve).unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Font Awesome classes for the toggle icon.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-sun",
            Theme::Dark => "fas fa-moon",
        }
    }

    /// Text shown next to the icon.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}
