//! Back/forward navigation history.
//!
//! [`HistoryStack`] records a [`ViewState`] every time the active tab changes.
//! Traversing with [`back`](HistoryStack::back) and
//! [`forward`](HistoryStack::forward) only moves the cursor; it never records
//! anything. Pushing after moving back discards the abandoned forward entries
//! before appending, the way a browser history behaves.
//!
//! ```text
//! push A, push B, push C      [A, B, C]   cursor -> C
//! back                        [A, B, C]   cursor -> B
//! push D                      [A, B, D]   cursor -> D   (C is gone)
//! ```
//!
//! The stack holds at most [`HISTORY_CAPACITY`] entries; the oldest are
//! evicted first.

use super::tabs::Tab;

/// Maximum number of recorded view states.
pub const HISTORY_CAPACITY: usize = 50;

/// Snapshot of where the user is, excluding panel-internal scroll or
/// selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Active tab.
    pub tab: Tab,
    /// Breadcrumb trail shown after the tab label.
    pub breadcrumbs: Vec<String>,
}

impl ViewState {
    /// Creates a snapshot for `tab` with the given trail.
    #[must_use]
    pub fn new(tab: Tab, breadcrumbs: Vec<String>) -> Self {
        Self { tab, breadcrumbs }
    }
}

/// Bounded, branch-truncating sequence of past view states.
///
/// The cursor is `None` exactly when the stack is empty; otherwise it points
/// at a valid entry.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<ViewState>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    /// Creates an empty stack with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates an empty stack holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Records `state` as the newest entry.
    ///
    /// Entries after the cursor are dropped first, then `state` is appended
    /// and the cursor moves to it. When the stack overflows its capacity the
    /// oldest entries are evicted and the cursor is re-clamped to the last
    /// entry.
    pub fn push(&mut self, state: ViewState) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(state);

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Moves the cursor one entry back and returns that entry.
    ///
    /// Returns `None` and leaves the cursor alone when already at the oldest
    /// entry or when the stack is empty.
    pub fn back(&mut self) -> Option<&ViewState> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Moves the cursor one entry forward and returns that entry.
    ///
    /// Returns `None` and leaves the cursor alone when already at the newest
    /// entry or when the stack is empty.
    pub fn forward(&mut self) -> Option<&ViewState> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&ViewState> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// Cursor position, `None` when empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ViewState] {
        &self.entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if [`forward`](Self::forward) would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }
}
