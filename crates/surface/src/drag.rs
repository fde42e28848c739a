//! Live-drag tracking and row request de-duplication

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::host::VisibleRect;
use crate::translator::ScrollPositionTranslator;

/// Whether the user is dragging the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    /// No gesture in progress; authoritative updates move the container
    #[default]
    Idle,
    /// The user owns the position; authoritative updates only resize
    Dragging,
}

/// Counters for the row-request channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    /// Requests emitted to the terminal core
    pub sent: u64,
    /// Position changes that mapped to the already-reported row
    pub suppressed: u64,
}

/// Drag state for one container.
///
/// Lives as long as the container; it moves between phases instead of
/// being rebuilt per gesture, and `last_reported_row` carries across
/// gestures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    phase: DragPhase,
    last_reported_row: Option<usize>,
    stats: RequestStats,
}

impl DragSession {
    /// Create an idle session with no reported row
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Last row the terminal core was told about, or synced from it
    pub fn last_reported_row(&self) -> Option<usize> {
        self.last_reported_row
    }

    /// Request counters
    pub fn stats(&self) -> RequestStats {
        self.stats
    }

    /// The host started a live drag
    pub fn begin(&mut self) {
        if self.is_dragging() {
            debug!(subsystem = "drag", "Drag start while already dragging");
            return;
        }
        self.phase = DragPhase::Dragging;
        debug!(
            subsystem = "drag",
            last_reported_row = ?self.last_reported_row,
            "Drag started"
        );
    }

    /// The host ended a live drag. The reported row is kept.
    pub fn end(&mut self) {
        if !self.is_dragging() {
            debug!(subsystem = "drag", "Drag end while idle");
            return;
        }
        self.phase = DragPhase::Idle;
        debug!(
            subsystem = "drag",
            last_reported_row = ?self.last_reported_row,
            "Drag ended"
        );
    }

    /// Handle a position change from the host.
    ///
    /// Returns the row to request from the terminal core, or `None` when
    /// idle, when the cell height is unusable, or when the position still
    /// maps to the last reported row.
    pub fn position_changed(
        &mut self,
        document_height: f64,
        cell_height: f64,
        visible: VisibleRect,
    ) -> Option<usize> {
        if !self.is_dragging() {
            trace!(subsystem = "drag", "Position change outside of a drag");
            return None;
        }

        let Some(translator) = ScrollPositionTranslator::new(cell_height) else {
            debug!(
                subsystem = "drag",
                cell_height, "Skipping drag position without cell metrics"
            );
            return None;
        };

        let row = translator.row_at(document_height, visible);
        if self.last_reported_row == Some(row) {
            self.stats.suppressed += 1;
            trace!(subsystem = "drag", row, "Drag position maps to reported row");
            return None;
        }

        self.last_reported_row = Some(row);
        self.stats.sent += 1;
        trace!(
            subsystem = "drag",
            row,
            origin_y = visible.origin_y,
            "Drag moved to new row"
        );
        Some(row)
    }

    /// Rebase the de-duplication baseline on an authoritative offset
    pub fn resync(&mut self, row: usize) {
        if self.last_reported_row != Some(row) {
            debug!(
                subsystem = "drag",
                previous = ?self.last_reported_row,
                row,
                "Resynchronized reported row"
            );
        }
        self.last_reported_row = Some(row);
    }
}
