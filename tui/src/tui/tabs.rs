//! Tab identifiers and cyclic tab arithmetic.
//!
//! The application shows a fixed, ordered set of tabs. Moving forward from the
//! last tab wraps to the first and moving backward from the first wraps to the
//! last. Successor and predecessor are computed with modular arithmetic over
//! [`Tab::ALL`] so the boundary tabs need no special cases.
//!
//! The transition itself (history push, breadcrumb reset and the reset signal
//! to the incoming panel) is owned by [`App`](crate::tui::app::App); this
//! module only answers "which tab comes next".

use std::fmt;

/// One of the top-level views the user cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Installed releases.
    #[default]
    Releases,
    /// Configured chart repositories.
    Repositories,
    /// Artifact hub search.
    Hub,
    /// Installed plugins.
    Plugins,
}

/// Direction of a relative tab change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the next tab (wraps from last to first).
    Forward,
    /// Towards the previous tab (wraps from first to last).
    Backward,
}

impl Tab {
    /// Every tab, in display order.
    pub const ALL: [Tab; 4] = [Tab::Releases, Tab::Repositories, Tab::Hub, Tab::Plugins];

    /// Number of tabs.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this tab within [`Tab::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Tab::Releases => 0,
            Tab::Repositories => 1,
            Tab::Hub => 2,
            Tab::Plugins => 3,
        }
    }

    /// Returns the tab at `index`, wrapping modulo [`Tab::COUNT`].
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Label shown in the header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tab::Releases => "Releases",
            Tab::Repositories => "Repositories",
            Tab::Hub => "Hub",
            Tab::Plugins => "Plugins",
        }
    }

    /// The tab after this one, wrapping to the first.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The tab before this one, wrapping to the last.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    /// Steps one tab in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self.next(),
            Direction::Backward => self.prev(),
        }
    }

    /// Whether this tab's panel can launch an external editor and therefore
    /// receives editor-finished events.
    #[must_use]
    pub fn hosts_editor(self) -> bool {
        matches!(self, Tab::Releases | Tab::Repositories)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
