//! Page-load sequencing that keeps the wrong theme from flashing on screen.
//!
//! ```text
//! Unthemed -> RootThemed -> FullyThemed -> Revealed
//! ```
//!
//! `RootThemed` is reached synchronously at script load. `FullyThemed` follows
//! on the ready signal (or immediately if the document is already parsed), and
//! `Revealed` fires [`REVEAL_DELAY`] later, re-enabling CSS transitions.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::SequenceError;
use crate::host::{Document, Node, PreferenceStore, Scheduler};
use crate::preference::ThemePreference;
use crate::theme::{Theme, LOADED_CLASS, NO_TRANSITION_CLASS, REVEAL_DELAY, THEME_ATTR};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    #[default]
    Unthemed,
    /// `data-theme` set on `<html>` (and on `<body>` if it already existed).
    RootThemed,
    /// `data-theme` set on `<body>`.
    FullyThemed,
    /// Transitions re-enabled, content shown.
    Revealed,
}

impl LoadPhase {
    pub fn next(self) -> Option<Self> {
        match self {
            LoadPhase::Unthemed => Some(LoadPhase::RootThemed),
            LoadPhase::RootThemed => Some(LoadPhase::FullyThemed),
            LoadPhase::FullyThemed => Some(LoadPhase::Revealed),
            LoadPhase::Revealed => None,
        }
    }
}

/// One page load's worth of theme sequencing.
///
/// Clones share phase and captured theme, so a clone moved into a scheduled
/// task advances the same state machine.
#[derive(Debug, Clone)]
pub struct LoadSequence<D, S, T> {
    document: D,
    preference: ThemePreference<S>,
    scheduler: T,
    theme: Rc<Cell<Theme>>,
    phase: Rc<Cell<LoadPhase>>,
}

impl<D, S, T> LoadSequence<D, S, T>
where
    D: Document + Clone + 'static,
    S: PreferenceStore + Clone + 'static,
    T: Scheduler + Clone + 'static,
{
    pub fn new(document: D, store: S, scheduler: T) -> Self {
        Self {
            document,
            preference: ThemePreference::new(store),
            scheduler,
            theme: Rc::new(Cell::new(Theme::default())),
            phase: Rc::new(Cell::new(LoadPhase::Unthemed)),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase.get()
    }

    /// Theme captured by [`LoadSequence::early_apply`].
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Applies the stored theme right away and schedules the rest of the
    /// sequence.
    ///
    /// Convenience for pages that need only the flash guard. [`crate::boot`]
    /// calls the two halves separately so the toggle's ready handler is
    /// registered between them.
    pub fn start(&self) -> Result<(), SequenceError> {
        self.early_apply()?;
        self.schedule_ready_pass()
    }

    /// Runs [`LoadSequence::ready_pass`] on the ready signal, or right away
    /// when the document has already been parsed.
    pub fn schedule_ready_pass(&self) -> Result<(), SequenceError> {
        if self.document.is_loading() {
            let seq = self.clone();
            self.scheduler.when_ready(Box::new(move || {
                if let Err(e) = seq.ready_pass() {
                    warn!("Ready pass skipped: {}", e);
                }
            }));
            Ok(())
        } else {
            self.ready_pass()
        }
    }

    /// `Unthemed -> RootThemed`.
    pub fn early_apply(&self) -> Result<(), SequenceError> {
        self.transition(LoadPhase::RootThemed)?;

        let theme = self.preference.get();
        self.theme.set(theme);

        if let Some(root) = self.document.root() {
            root.set_attribute(THEME_ATTR, theme.as_str());
        }
        // Body usually does not exist yet when this runs from <head>.
        if let Some(body) = self.document.body() {
            body.set_attribute(THEME_ATTR, theme.as_str());
        }
        debug!(%theme, "Early theme applied");
        Ok(())
    }

    /// `RootThemed -> FullyThemed`, then schedules the reveal.
    pub fn ready_pass(&self) -> Result<(), SequenceError> {
        self.transition(LoadPhase::FullyThemed)?;

        let theme = self.theme.get();
        match self.document.body() {
            Some(body) => body.set_attribute(THEME_ATTR, theme.as_str()),
            None => debug!("No <body> at ready signal"),
        }

        let seq = self.clone();
        self.scheduler.after(
            REVEAL_DELAY,
            Box::new(move || {
                if let Err(e) = seq.reveal() {
                    warn!("Reveal skipped: {}", e);
                }
            }),
        );
        Ok(())
    }

    /// `FullyThemed -> Revealed`.
    pub fn reveal(&self) -> Result<(), SequenceError> {
        self.transition(LoadPhase::Revealed)?;

        if let Some(body) = self.document.body() {
            body.remove_class(NO_TRANSITION_CLASS);
            body.add_class(LOADED_CLASS);
        }
        debug!("Page revealed");
        Ok(())
    }

    fn transition(&self, to: LoadPhase) -> Result<(), SequenceError> {
        let from = self.phase.get();
        if from.next() != Some(to) {
            return Err(SequenceError::InvalidTransition { from, to });
        }
        self.phase.set(to);
        Ok(())
    }
}
