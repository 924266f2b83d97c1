//! Move timeline and turn/clock coordination for two-player board games.
//!
//! This crate is the state machine behind a local play session: it owns the
//! committed move log with its undo/redo buffer and review cursor, the
//! per-side clock with per-move increment, the queued-move (premove) slot,
//! and the arbitration loop that decides after every commit whether the next
//! move comes from a local human, the queued slot, or an asynchronous
//! move-suggestion engine.
//!
//! The actual game rules and the suggestion search are external collaborators
//! reached through the [`Rules`] and [`Suggester`] traits. Suggestion replies
//! are ordinary values routed back through the same commit pipeline as human
//! moves and are reconciled by request epoch, so a reply that arrives after
//! an undo (or any other position change) is silently discarded.

pub mod arbiter;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod premove;
pub mod rules;
pub mod session;
pub mod suggest;
pub mod testing;
pub mod timeline;
pub mod types;

pub use arbiter::*;
pub use clock::*;
pub use config::*;
pub use error::SessionError;
pub use export::*;
pub use premove::PremoveSlot;
pub use rules::*;
pub use session::*;
pub use suggest::*;
pub use timeline::Timeline;
pub use types::*;
