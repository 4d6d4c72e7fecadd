//! Message taxonomy, follow-up effects and terminal input polling.
//!
//! Every state change in the application is driven by a [`TuiEvent`]. Events
//! come from two places:
//!
//! - the terminal, via [`EventHandler`] (keys, resizes, ticks);
//! - the application itself, via [`Effect`]s returned from
//!   [`App::update`](crate::tui::app::App::update) and from panels.
//!
//! An [`Effect`] describes work for the runtime to do after an event has been
//! handled: post another event right away, post one after a delay, run a
//! blocking task that produces an event, or quit. Handlers never perform I/O
//! themselves; they only describe it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Events that drive the TUI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Periodic tick for animations and timers.
    Tick,

    /// A key press from the terminal.
    Key(KeyEvent),

    /// Terminal resize to (columns, rows).
    ///
    /// When panels receive this event the rows have already had the header
    /// and status bar subtracted.
    Resize(u16, u16),

    /// Outcome of startup: the working directory that was created, or why it
    /// could not be.
    Init(Result<PathBuf, String>),

    /// An external editor launched by a panel has exited.
    EditorFinished {
        /// Error reported by the editor process, if any.
        error: Option<String>,
    },

    /// Replace the breadcrumb trail.
    Breadcrumbs(Vec<String>),

    /// Show a transient status message.
    StatusFlash(String),

    /// Clear the transient status message.
    ClearFlash,

    /// Sent to a panel that is becoming active so it can return to its
    /// default sub-view.
    ResetView,
}

/// A blocking task whose result is posted back into the event loop.
pub type Task = Box<dyn FnOnce() -> TuiEvent + Send + 'static>;

/// Follow-up work requested by an event handler.
///
/// Effects are plain values; the runtime decides how to execute them.
/// [`Effect::batch`] drops `None` entries and unwraps single-element batches
/// so handlers can combine effects freely.
#[derive(Default)]
pub enum Effect {
    /// Nothing to do.
    #[default]
    None,
    /// Terminate the application.
    Quit,
    /// Post `event` right after the current one.
    Emit(TuiEvent),
    /// Post `event` once `delay` has elapsed. There is no way to cancel it.
    After(Duration, TuiEvent),
    /// Run a blocking task and post the event it returns.
    Perform(Task),
    /// Several effects, executed in order.
    Batch(Vec<Effect>),
}

impl Effect {
    /// Wraps a blocking task.
    pub fn perform<F>(task: F) -> Self
    where
        F: FnOnce() -> TuiEvent + Send + 'static,
    {
        Effect::Perform(Box::new(task))
    }

    /// Combines effects, flattening nested batches and dropping `None`.
    pub fn batch<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = Effect>,
    {
        let mut flat = Vec::new();
        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Effect::None,
            1 => flat.pop().unwrap_or_default(),
            _ => Effect::Batch(flat),
        }
    }

    /// Returns `true` if there is nothing to do.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Returns `true` if this effect, or any effect in a batch, quits.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        match self {
            Effect::Quit => true,
            Effect::Batch(effects) => effects.iter().any(Effect::is_quit),
            _ => false,
        }
    }

    /// Flattens this effect into its leaves, in execution order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Effect> {
        match self {
            Effect::None => Vec::new(),
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::into_vec).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Quit => f.write_str("Quit"),
            Effect::Emit(event) => f.debug_tuple("Emit").field(event).finish(),
            Effect::After(delay, event) => {
                f.debug_tuple("After").field(delay).field(event).finish()
            }
            Effect::Perform(_) => f.write_str("Perform(..)"),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}

/// Default tick rate for the event handler.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Smallest tick rate the handler accepts; shorter rates are raised to it.
pub const MIN_TICK_RATE: Duration = Duration::from_millis(1);

/// Poll timeout for checking terminal input.
///
/// Short enough that the handler stays responsive to shutdown.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10;

/// Blocking source of terminal events, called on a blocking thread with the
/// poll timeout.
type Poller = Arc<dyn Fn(Duration) -> Option<TuiEvent> + Send + Sync>;

/// Polls the terminal for input and generates periodic tick events.
///
/// The handler uses `tokio::select!` to multiplex three sources:
///
/// - **Shutdown signal**: a oneshot channel that ends the loop
/// - **Tick interval**: fires [`TuiEvent::Tick`] at the configured rate
/// - **Terminal polling**: crossterm polling on a blocking thread
///
/// A poll that is still running when a tick fires is kept and awaited on the
/// next iteration, so input read during a tick is delivered, in order.
///
/// # Example
///
/// ```ignore
/// use tokio::sync::{mpsc, oneshot};
/// use helm_tui::tui::event::EventHandler;
///
/// let (event_tx, mut event_rx) = mpsc::channel(100);
/// let (shutdown_tx, shutdown_rx) = oneshot::channel();
///
/// tokio::spawn(EventHandler::new(event_tx, shutdown_rx).run());
///
/// while let Some(event) = event_rx.recv().await {
///     // handle the event
/// }
/// let _ = shutdown_tx.send(());
/// ```
pub struct EventHandler {
    /// Channel sender for dispatching events to the event loop.
    event_tx: mpsc::Sender<TuiEvent>,
    /// Receiver for the shutdown signal.
    shutdown_rx: oneshot::Receiver<()>,
    /// Interval between tick events.
    tick_rate: Duration,
    /// Where terminal events come from.
    poll: Poller,
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("tick_rate", &self.tick_rate)
            .finish_non_exhaustive()
    }
}

impl EventHandler {
    /// Creates a new `EventHandler` with the default tick rate.
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self::with_tick_rate(
            event_tx,
            shutdown_rx,
            Duration::from_millis(DEFAULT_TICK_RATE_MS),
        )
    }

    /// Creates a new `EventHandler` with a custom tick rate.
    ///
    /// Rates below [`MIN_TICK_RATE`], including zero, are raised to it.
    pub fn with_tick_rate(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate: tick_rate.max(MIN_TICK_RATE),
            poll: Arc::new(Self::poll_terminal_event),
        }
    }

    /// Returns the configured tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Runs until a shutdown signal arrives or the receiver is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking polling task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // interval ticks immediately on creation
        tick_interval.tick().await;

        let timeout = Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS);
        let mut in_flight: Option<JoinHandle<Option<TuiEvent>>> = None;

        loop {
            let poll = in_flight.get_or_insert_with(|| {
                let poll = Arc::clone(&self.poll);
                tokio::task::spawn_blocking(move || poll(timeout))
            });

            let mut polled = None;
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    tracing::debug!("EventHandler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        tracing::debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }

                result = poll => polled = Some(result),
            }

            let Some(result) = polled else {
                continue;
            };
            in_flight = None;
            match result {
                Ok(Some(event)) => {
                    if self.event_tx.send(event).await.is_err() {
                        tracing::debug!("Event receiver dropped, exiting event loop");
                        break;
                    }
                }
                Ok(None) => {}
                Err(join_error) => {
                    tracing::error!("spawn_blocking task panicked: {}", join_error);
                    return Err(std::io::Error::other("Terminal polling task panicked"));
                }
            }
        }

        Ok(())
    }

    /// Polls for a terminal event with the specified timeout.
    ///
    /// Polling failures (no terminal, as in CI) are treated as "no event"
    /// after waiting out the timeout.
    fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(crossterm_event) => Self::convert_crossterm_event(crossterm_event),
                Err(e) => {
                    tracing::trace!("Failed to read terminal event: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::trace!("Failed to poll terminal: {}", e);
                std::thread::sleep(timeout);
                None
            }
        }
    }

    /// Converts a crossterm event to a `TuiEvent`.
    ///
    /// Only key presses and resizes are forwarded. Key release and repeat
    /// reports (kitty protocol) are dropped so each press is seen once.
    fn convert_crossterm_event(event: CrosstermEvent) -> Option<TuiEvent> {
        match event {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Some(TuiEvent::Key(key_event))
            }
            CrosstermEvent::Key(_) => None,
            CrosstermEvent::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            CrosstermEvent::Mouse(_) => None,
            CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
            CrosstermEvent::Paste(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn batch_of_nothing_is_none() {
        assert!(Effect::batch(vec![Effect::None, Effect::None]).is_none());
        assert!(Effect::batch(Vec::new()).is_none());
    }

    #[test]
    fn batch_of_one_unwraps() {
        let effect = Effect::batch(vec![Effect::None, Effect::Emit(TuiEvent::ClearFlash)]);
        assert!(matches!(effect, Effect::Emit(TuiEvent::ClearFlash)));
    }

    #[test]
    fn batch_flattens_nested_batches() {
        let inner = Effect::Batch(vec![
            Effect::Emit(TuiEvent::Tick),
            Effect::Emit(TuiEvent::ClearFlash),
        ]);
        let effect = Effect::batch(vec![inner, Effect::Quit]);

        match effect {
            Effect::Batch(effects) => assert_eq!(effects.len(), 3),
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn is_quit_looks_inside_batches() {
        assert!(Effect::Quit.is_quit());
        assert!(Effect::batch(vec![Effect::Emit(TuiEvent::Tick), Effect::Quit]).is_quit());
        assert!(!Effect::Emit(TuiEvent::Tick).is_quit());
    }

    #[test]
    fn into_vec_preserves_order() {
        let effect = Effect::Batch(vec![
            Effect::Emit(TuiEvent::Tick),
            Effect::Batch(vec![Effect::Emit(TuiEvent::ClearFlash), Effect::None]),
            Effect::Quit,
        ]);
        let leaves = effect.into_vec();

        assert_eq!(leaves.len(), 3);
        assert!(matches!(leaves[0], Effect::Emit(TuiEvent::Tick)));
        assert!(matches!(leaves[1], Effect::Emit(TuiEvent::ClearFlash)));
        assert!(matches!(leaves[2], Effect::Quit));
    }

    #[test]
    fn perform_debug_hides_closure() {
        let effect = Effect::perform(|| TuiEvent::Tick);
        assert_eq!(format!("{effect:?}"), "Perform(..)");
    }

    #[test]
    fn event_handler_new_has_default_tick_rate() {
        let (event_tx, _event_rx) = mpsc::channel(10);
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();

        let handler = EventHandler::new(event_tx, shutdown_rx);
        assert_eq!(
            handler.tick_rate(),
            Duration::from_millis(DEFAULT_TICK_RATE_MS)
        );
    }

    #[test]
    fn convert_key_press() {
        let key_event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let result = EventHandler::convert_crossterm_event(CrosstermEvent::Key(key_event));
        assert_eq!(result, Some(TuiEvent::Key(key_event)));
    }

    #[test]
    fn convert_key_release_is_dropped() {
        let key_event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(EventHandler::convert_crossterm_event(CrosstermEvent::Key(key_event)).is_none());
    }

    #[test]
    fn convert_resize() {
        let result = EventHandler::convert_crossterm_event(CrosstermEvent::Resize(80, 24));
        assert_eq!(result, Some(TuiEvent::Resize(80, 24)));
    }

    #[test]
    fn convert_focus_and_paste_are_dropped() {
        assert!(EventHandler::convert_crossterm_event(CrosstermEvent::FocusGained).is_none());
        assert!(EventHandler::convert_crossterm_event(CrosstermEvent::FocusLost).is_none());
        assert!(
            EventHandler::convert_crossterm_event(CrosstermEvent::Paste("x".to_string()))
                .is_none()
        );
    }

    #[test]
    fn zero_tick_rate_is_raised_to_minimum() {
        let (event_tx, _event_rx) = mpsc::channel(10);
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();

        let handler = EventHandler::with_tick_rate(event_tx, shutdown_rx, Duration::ZERO);
        assert_eq!(handler.tick_rate(), MIN_TICK_RATE);
    }

    #[tokio::test]
    async fn zero_tick_rate_handler_runs() {
        let (event_tx, mut event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let mut handler = EventHandler::with_tick_rate(event_tx, shutdown_rx, Duration::ZERO);
        handler.poll = Arc::new(|timeout: Duration| -> Option<TuiEvent> {
            std::thread::sleep(timeout);
            None
        });
        let handle = tokio::spawn(handler.run());

        let first = tokio::time::timeout(Duration::from_secs(1), event_rx.recv()).await;
        assert_eq!(first.unwrap(), Some(TuiEvent::Tick));

        let _ = shutdown_tx.send(());
        let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(result.unwrap().unwrap().is_ok());
    }

    #[tokio::test]
    async fn input_read_while_ticking_is_delivered() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let (event_tx, mut event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);

        // the first poll outlives several ticks before it reads a key
        let mut handler =
            EventHandler::with_tick_rate(event_tx, shutdown_rx, Duration::from_millis(5));
        let poll_calls = Arc::clone(&calls);
        handler.poll = Arc::new(move |timeout: Duration| -> Option<TuiEvent> {
            if poll_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::thread::sleep(Duration::from_millis(60));
                Some(TuiEvent::Key(key))
            } else {
                std::thread::sleep(timeout);
                None
            }
        });
        let handle = tokio::spawn(handler.run());

        let mut ticks_before_key = 0;
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        let mut got_key = false;
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(Duration::from_millis(100), event_rx.recv()).await {
                Ok(Some(TuiEvent::Tick)) => ticks_before_key += 1,
                Ok(Some(event)) => {
                    assert_eq!(event, TuiEvent::Key(key));
                    got_key = true;
                    break;
                }
                Ok(None) => break,
                Err(_) => {}
            }
        }

        assert!(got_key, "key read during ticks was lost");
        assert!(ticks_before_key > 0, "no tick raced the poll");
        // the first poll was awaited, not replaced on every tick
        assert!(calls.load(Ordering::SeqCst) <= 3);

        let _ = shutdown_tx.send(());
        let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
    }

    #[tokio::test]
    async fn event_handler_stops_on_shutdown_signal() {
        let (event_tx, _event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handler =
            EventHandler::with_tick_rate(event_tx, shutdown_rx, Duration::from_millis(500));
        let handle = tokio::spawn(handler.run());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());

        let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(result.is_ok(), "Handler should complete within timeout");
        assert!(result.unwrap().unwrap().is_ok());
    }

    #[tokio::test]
    async fn event_handler_generates_tick_events() {
        let (event_tx, mut event_rx) = mpsc::channel(100);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handler =
            EventHandler::with_tick_rate(event_tx, shutdown_rx, Duration::from_millis(5));
        let handle = tokio::spawn(handler.run());

        let mut tick_count = 0;
        let deadline = tokio::time::Instant::now() + Duration::from_millis(500);
        while tokio::time::Instant::now() < deadline && tick_count < 3 {
            if let Ok(Some(TuiEvent::Tick)) =
                tokio::time::timeout(Duration::from_millis(50), event_rx.recv()).await
            {
                tick_count += 1;
            }
        }

        assert!(tick_count >= 3, "Expected at least 3 ticks, got {}", tick_count);

        let _ = shutdown_tx.send(());
        let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
    }
}
