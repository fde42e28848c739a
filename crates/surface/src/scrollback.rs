//! Authoritative scrollback snapshots published by the terminal core

use serde::{Deserialize, Serialize};

/// Snapshot of the terminal's scrollback and visible window.
///
/// Rows are numbered from the top of history: row 0 is the oldest retained
/// line. The terminal core owns the real state and only publishes copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollbackState {
    /// Total logical rows, history plus the active screen
    pub total: usize,
    /// Index of the first visible row
    pub offset: usize,
    /// Number of visible rows
    pub viewport_length: usize,
}

impl ScrollbackState {
    /// Create a new snapshot
    pub fn new(total: usize, offset: usize, viewport_length: usize) -> Self {
        Self {
            total,
            offset,
            viewport_length,
        }
    }

    /// Largest offset that still keeps a full viewport inside the scrollback
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport_length)
    }

    /// Whether the snapshot satisfies `total >= viewport_length` and
    /// `offset <= total - viewport_length`.
    ///
    /// Snapshots published in the middle of a resize can briefly violate
    /// this; consumers must tolerate that rather than reject them.
    pub fn is_consistent(&self) -> bool {
        self.viewport_length > 0
            && self.total >= self.viewport_length
            && self.offset <= self.max_offset()
    }

    /// Rows below the viewport, i.e. between the last visible row and the
    /// bottom of the active screen
    pub fn rows_below_viewport(&self) -> usize {
        self.total
            .saturating_sub(self.offset)
            .saturating_sub(self.viewport_length)
    }

    /// Whether the viewport shows the bottom of the scrollback
    pub fn is_at_bottom(&self) -> bool {
        self.rows_below_viewport() == 0
    }
}
