//! Single-threaded event loop.
//!
//! [`Runtime`] feeds events to [`App::update`] one at a time and carries out
//! the returned [`Effect`]s:
//!
//! | Effect | Execution |
//! |--------|-----------|
//! | `Emit(event)` | queued locally, handled before the next channel event |
//! | `After(delay, event)` | tokio timer task posts `event` to the channel |
//! | `Perform(task)` | `spawn_blocking`, the result is posted to the channel |
//! | `Quit` | the loop ends after the current event |
//!
//! Because each event's immediate follow-ups are drained first, a resize is
//! fully applied to every panel before the next key press is looked at.
//!
//! The runtime does not know about the terminal. [`Runtime::run`] takes a
//! render callback, so tests can drive it without one.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::TuiError;
use crate::tui::app::App;
use crate::tui::event::{Effect, TuiEvent};

/// Capacity of the event channel shared by the input poller and timers.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Event queue plus the channel that background work reports back on.
#[derive(Debug)]
pub struct Runtime {
    tx: mpsc::Sender<TuiEvent>,
    rx: mpsc::Receiver<TuiEvent>,
    queue: VecDeque<TuiEvent>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            tx,
            rx,
            queue: VecDeque::new(),
        }
    }

    /// Sender for event sources outside the loop, such as the terminal
    /// poller.
    pub fn sender(&self) -> mpsc::Sender<TuiEvent> {
        self.tx.clone()
    }

    /// Number of immediate follow-ups waiting to be handled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Next event: queued follow-ups first, then the channel.
    ///
    /// Returns `None` once every sender, including the runtime's own, is
    /// gone, which cannot happen while `self` is alive.
    pub async fn next_event(&mut self) -> Option<TuiEvent> {
        if let Some(event) = self.queue.pop_front() {
            return Some(event);
        }
        self.rx.recv().await
    }

    /// Carries out `effect`. Returns `true` if it asked to quit.
    ///
    /// Must be called from within a tokio runtime.
    pub fn execute(&mut self, effect: Effect) -> bool {
        let mut quit = false;
        for effect in effect.into_vec() {
            match effect {
                Effect::Quit => quit = true,
                Effect::Emit(event) => self.queue.push_back(event),
                Effect::After(delay, event) => {
                    // deadline is fixed when the effect is executed, not when
                    // the timer task first runs
                    let deadline = tokio::time::Instant::now() + delay;
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep_until(deadline).await;
                        if tx.send(event).await.is_err() {
                            debug!("event loop gone before timer fired");
                        }
                    });
                }
                Effect::Perform(task) => {
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        match tokio::task::spawn_blocking(task).await {
                            Ok(event) => {
                                if tx.send(event).await.is_err() {
                                    debug!("event loop gone before task finished");
                                }
                            }
                            Err(e) => error!("background task panicked: {}", e),
                        }
                    });
                }
                Effect::None | Effect::Batch(_) => {}
            }
        }
        quit
    }

    /// Handles `event` and its immediate follow-ups, in order.
    ///
    /// Returns `true` if the application should stop.
    pub fn process(&mut self, app: &mut App, event: TuiEvent) -> bool {
        let effect = app.update(event);
        if self.execute(effect) || app.should_quit() {
            return true;
        }
        while let Some(event) = self.queue.pop_front() {
            let effect = app.update(event);
            if self.execute(effect) || app.should_quit() {
                return true;
            }
        }
        false
    }

    /// Runs `app` until it quits, calling `render` after startup and after
    /// every handled event.
    ///
    /// # Errors
    ///
    /// Returns the first render failure.
    pub async fn run<R>(&mut self, app: &mut App, mut render: R) -> Result<(), TuiError>
    where
        R: FnMut(&App) -> Result<(), TuiError>,
    {
        let init = app.init();
        if self.execute(init) {
            return Ok(());
        }
        render(app)?;

        while let Some(event) = self.next_event().await {
            if self.process(app, event) {
                break;
            }
            render(app)?;
        }
        Ok(())
    }
}
