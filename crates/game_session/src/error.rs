//! Session error taxonomy.

use thiserror::Error;

/// Everything that can go wrong inside the session core.
///
/// None of these are user-facing: they all come from normal races between
/// asynchronous actors (or from calling an operation in the wrong phase) and
/// every one of them leaves the session state untouched. Callers may treat
/// any `Err` as "that was a no-op".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The rules engine rejected an attempted commit.
    #[error("rules engine rejected the move")]
    IllegalMove,

    /// A suggestion-engine reply no longer applies (session over, or its
    /// request epoch has been superseded).
    #[error("suggestion reply is stale")]
    StaleSuggestion,

    /// A side ran out of time; the session has ended with a time forfeit.
    #[error("clock exhausted")]
    ClockExhausted,

    /// The operation is not valid in the current session phase.
    #[error("operation not valid in the current session state")]
    InvalidTransition,
}
