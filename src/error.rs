//! Library error types.

use crate::sequence::LoadPhase;

pub use crate::theme::ParseThemeError;

/// Errors raised by the page-load state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("invalid load transition {from:?} -> {to:?}")]
    InvalidTransition { from: LoadPhase, to: LoadPhase },
}
