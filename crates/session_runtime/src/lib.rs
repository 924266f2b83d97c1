//! Async driver for a [`game_session::Session`].
//!
//! The session core is a synchronous state machine; this crate supplies the
//! wall-clock and concurrency around it. A [`SessionRuntime`] owns the
//! session and serializes everything onto one event loop: periodic clock
//! ticks, user commands arriving through a [`SessionHandle`], and suggestion
//! replies coming back from a [`MoveSource`] running off the loop. Because
//! every mutation funnels through the loop, the session's epoch check is the
//! only reconciliation needed when a reply races an undo or a new move.

pub mod driver;
pub mod source;

pub use driver::{Command, RuntimeConfig, SessionHandle, SessionRuntime};
pub use source::{Blocking, MoveSource};
