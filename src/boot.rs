//! Script-load entry point, independent of the host.

use tracing::warn;

use crate::controller::ThemeController;
use crate::host::{Document, PreferenceStore, Scheduler};
use crate::sequence::LoadSequence;

/// Handles to the pieces started by [`boot`].
#[derive(Debug, Clone)]
pub struct Booted<D, S, T> {
    pub controller: ThemeController<D, S>,
    pub sequence: LoadSequence<D, S, T>,
}

/// Runs everything that happens when the script is evaluated.
///
/// The early theme is applied synchronously first. On the ready signal the
/// toggle is initialized, then the sequence's ready pass runs.
pub fn boot<D, S, T>(document: D, store: S, scheduler: T) -> Booted<D, S, T>
where
    D: Document + Clone + 'static,
    S: PreferenceStore + Clone + 'static,
    T: Scheduler + Clone + 'static,
{
    let controller = ThemeController::new(document.clone(), store.clone());
    let sequence = LoadSequence::new(document.clone(), store, scheduler.clone());

    if let Err(e) = sequence.early_apply() {
        warn!("Early theme not applied: {}", e);
    }

    if document.is_loading() {
        let ctl = controller.clone();
        scheduler.when_ready(Box::new(move || {
            ctl.initialize();
        }));
    } else {
        controller.initialize();
    }

    if let Err(e) = sequence.schedule_ready_pass() {
        warn!("Theme ready pass not scheduled: {}", e);
    }

    Booted {
        controller,
        sequence,
    }
}
