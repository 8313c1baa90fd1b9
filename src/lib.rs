//! Dark Mode - persisted light/dark theme toggle
//!
//! Keeps a page's `data-theme` in sync with a preference stored in
//! `localStorage`, without flashing the wrong theme while the page loads.
//!
//! This library provides:
//! - Theme model and the fixed DOM/storage contract ([`theme`])
//! - The toggle controller and the page-load state machine, written against
//!   host traits ([`host`]) so they run in the browser and in tests
//! - A `web-sys` backend and WASM entry point (wasm32 only)
//! - Dioxus markup for the toggle and page shell, and a demo server

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus markup (shared between server SSR and the WASM client)
pub mod app;

pub mod boot;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod preference;
pub mod sequence;
pub mod theme;

// Browser-only modules
#[cfg(target_arch = "wasm32")]
pub mod web;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

pub use boot::{boot, Booted};
pub use controller::{InitOutcome, ThemeController};
pub use preference::ThemePreference;
pub use sequence::{LoadPhase, LoadSequence};
pub use theme::Theme;
