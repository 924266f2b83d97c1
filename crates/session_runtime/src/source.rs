//! Where suggested moves come from.

use async_trait::async_trait;
use game_session::{ProposedMove, Rules, Suggester};
use std::sync::{Arc, Mutex};

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;

/// Asynchronous producer of move suggestions.
///
/// The runtime calls this off its event loop, once per suggestion request.
/// Implementations own whatever process, thread pool or network connection
/// does the actual searching.
#[async_trait]
pub trait MoveSource<R: Rules>: Send {
    /// Propose a move for the side to move in `position`, or `None` if
    /// there is nothing to play.
    async fn propose(
        &mut self,
        rules: R,
        position: R::Position,
        strength: u8,
    ) -> Option<ProposedMove>;
}

/// Adapter running a synchronous [`Suggester`] on the blocking pool.
///
/// Searches can take arbitrarily long, so they must not run on the async
/// executor threads. The suggester sits behind a mutex because
/// `spawn_blocking` needs an owned handle; the runtime only has one search
/// in flight at a time, so the lock is never contended.
pub struct Blocking<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Blocking<S> {
    pub fn new(suggester: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(suggester)),
        }
    }
}

#[async_trait]
impl<R, S> MoveSource<R> for Blocking<S>
where
    R: Rules + Send + Sync + 'static,
    R::Position: Send + 'static,
    S: Suggester<R> + 'static,
{
    async fn propose(
        &mut self,
        rules: R,
        position: R::Position,
        strength: u8,
    ) -> Option<ProposedMove> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || -> Option<ProposedMove> {
            let mut suggester = inner.lock().ok()?;
            suggester.suggest(&rules, &position, strength)
        })
        .await
        .ok()
        .flatten()
    }
}
