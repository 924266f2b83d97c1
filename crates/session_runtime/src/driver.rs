//! The event loop that owns a session.

use std::sync::Arc;
use std::time::Duration;

use game_session::{PieceKind, Rules, Session, SessionError, Square, SuggestionReply};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::source::MoveSource;

/// Timing knobs for the driver.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// How often the session clock is ticked. One tick deducts one clock
    /// unit, so this should stay at one second for real play; tests shrink
    /// it.
    pub tick_period: Duration,
    /// Pause before a suggestion search is started, so an instant engine
    /// does not appear to move before the player's own move has registered.
    pub reply_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            reply_delay: Duration::from_millis(600),
        }
    }
}

/// Everything a frontend can ask the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move {
        origin: Square,
        dest: Square,
        promotion: Option<PieceKind>,
    },
    Queue {
        origin: Square,
        dest: Square,
    },
    CancelQueue,
    Undo,
    Redo,
    GoToView(i32),
    StepBackward,
    StepForward,
    /// Shut the loop down and hand the session back.
    Stop,
}

/// Cloneable sender side of the command channel.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Send a raw command. Dropped silently once the runtime has stopped.
    pub fn send(&self, cmd: Command) {
        let _ = self.tx.send(cmd);
    }

    pub fn try_move(&self, origin: Square, dest: Square, promotion: Option<PieceKind>) {
        self.send(Command::Move {
            origin,
            dest,
            promotion,
        });
    }

    pub fn queue(&self, origin: Square, dest: Square) {
        self.send(Command::Queue { origin, dest });
    }

    pub fn cancel_queue(&self) {
        self.send(Command::CancelQueue);
    }

    pub fn undo(&self) {
        self.send(Command::Undo);
    }

    pub fn redo(&self) {
        self.send(Command::Redo);
    }

    pub fn go_to_view(&self, target: i32) {
        self.send(Command::GoToView(target));
    }

    pub fn step_backward(&self) {
        self.send(Command::StepBackward);
    }

    pub fn step_forward(&self) {
        self.send(Command::StepForward);
    }

    pub fn stop(&self) {
        self.send(Command::Stop);
    }
}

/// Owns a [`Session`] and drives it from a single `select!` loop.
///
/// All mutation happens on the loop task, so commands, clock ticks and
/// suggestion replies are applied in arrival order and never concurrently.
/// Suggestion searches run in spawned tasks and report back through an
/// internal channel carrying the request epoch; the session decides whether
/// the reply still applies.
pub struct SessionRuntime<R: Rules, M> {
    session: Session<R>,
    source: Arc<Mutex<M>>,
    config: RuntimeConfig,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    reply_tx: mpsc::UnboundedSender<SuggestionReply>,
    reply_rx: mpsc::UnboundedReceiver<SuggestionReply>,
}

impl<R, M> SessionRuntime<R, M>
where
    R: Rules + Clone + Send + Sync + 'static,
    R::Position: Send + 'static,
    M: MoveSource<R> + 'static,
{
    /// Wrap an already-started session. The first pending suggestion
    /// request (engine moves first) is dispatched when `run` begins.
    pub fn new(session: Session<R>, source: M, config: RuntimeConfig) -> (Self, SessionHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let runtime = Self {
            session,
            source: Arc::new(Mutex::new(source)),
            config,
            cmd_rx,
            reply_tx,
            reply_rx,
        };
        (runtime, SessionHandle { tx: cmd_tx })
    }

    /// Run until [`Command::Stop`] (or every handle is dropped), then hand
    /// back the session for inspection or export.
    pub async fn run(mut self) -> Session<R> {
        self.pump();

        // First interval fire is immediate by default; skip it so the
        // opening move is not charged a tick at time zero.
        let start = Instant::now() + self.config.tick_period;
        let mut ticker = time::interval_at(start, self.config.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.session.tick() == Err(SessionError::ClockExhausted) {
                        warn!("session ended on time");
                    }
                }
                Some(reply) = self.reply_rx.recv() => {
                    if let Err(err) = self.session.deliver_suggestion(reply) {
                        debug!(%err, "suggestion dropped");
                    }
                    self.pump();
                }
                cmd = self.cmd_rx.recv() => match cmd {
                    None | Some(Command::Stop) => break,
                    Some(cmd) => {
                        self.apply(cmd);
                        self.pump();
                    }
                },
            }
        }
        self.session
    }

    fn apply(&mut self, cmd: Command) {
        let outcome = match cmd {
            Command::Move {
                origin,
                dest,
                promotion,
            } => self.session.try_move(origin, dest, promotion),
            Command::Queue { origin, dest } => self.session.queue(origin, dest),
            Command::CancelQueue => {
                self.session.cancel_queue();
                Ok(())
            }
            Command::Undo => self.session.undo(),
            Command::Redo => self.session.redo(),
            Command::GoToView(target) => self.session.go_to_view(target),
            Command::StepBackward => self.session.step_backward(),
            Command::StepForward => self.session.step_forward(),
            Command::Stop => Ok(()),
        };
        // Rejections are normal UI noise (mis-clicks, stale buttons), not
        // loop errors.
        if let Err(err) = outcome {
            debug!(?cmd, %err, "command rejected");
        }
    }

    /// Dispatch whatever suggestion request the session has pending.
    fn pump(&mut self) {
        while let Some(request) = self.session.take_request() {
            debug!(epoch = request.epoch, "dispatching suggestion request");
            let rules = self.session.rules().clone();
            let source = Arc::clone(&self.source);
            let tx = self.reply_tx.clone();
            let delay = self.config.reply_delay;
            tokio::spawn(async move {
                if !delay.is_zero() {
                    time::sleep(delay).await;
                }
                let proposed = source
                    .lock()
                    .await
                    .propose(rules, request.position, request.strength)
                    .await;
                let _ = tx.send(SuggestionReply {
                    epoch: request.epoch,
                    proposed,
                });
            });
        }
    }
}
