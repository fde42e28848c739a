//! Seams between the synchronizer and the things it talks to
//!
//! The host container, the renderer and the terminal core are all outside
//! this crate. Each is reached through a small trait so the platform
//! adapters stay thin and the synchronizer can be driven headless.

use scrollsync_core::{Result, ScrollSyncError};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::geometry::ScrollIndicators;

/// Visible region of the document, in the container's bottom-up frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleRect {
    /// Distance from the document bottom to the bottom of the visible region
    pub origin_y: f64,
    /// Height of the visible region
    pub height: f64,
}

impl VisibleRect {
    /// Create a visible rect
    pub fn new(origin_y: f64, height: f64) -> Self {
        Self { origin_y, height }
    }
}

/// Viewport handed to the renderer after layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Container width in pixels
    pub width: f64,
    /// Container height in pixels
    pub height: f64,
    /// Trailing pixels covered by an opaque scroller
    pub scroller_inset: f64,
}

impl ViewportSize {
    /// Width left for terminal columns once the scroller gutter is removed
    pub fn usable_width(&self) -> f64 {
        (self.width - self.scroller_inset).max(0.0)
    }
}

/// The scrollable container hosting the terminal surface
pub trait ScrollHost {
    /// Region currently visible in the container
    fn visible_rect(&self) -> VisibleRect;

    /// Resize the scrollable document
    fn set_document_height(&mut self, height: f64);

    /// Move the visible region so its bottom sits at `origin_y`
    fn scroll_to(&mut self, origin_y: f64);

    /// Redraw the scroller from fresh knob metrics
    fn reflect_indicators(&mut self, indicators: ScrollIndicators);

    /// Show or hide the scroller
    fn set_scroller_visible(&mut self, _visible: bool) {}
}

/// Renderer embedded in the container
pub trait SurfaceRenderer {
    /// The viewport changed size or the scroller gutter changed width
    fn viewport_resized(&mut self, size: ViewportSize);
}

/// Requests sent back to the terminal core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminalRequest {
    /// Make `row` the first visible row
    ScrollToRow {
        /// Target row, 0 = top of history
        row: usize,
    },
}

/// Destination for row-change requests
pub trait RowRequestSink {
    /// Ask the terminal core to show `row` at the top of the viewport
    fn scroll_to_row(&mut self, row: usize) -> Result<()>;
}

impl RowRequestSink for UnboundedSender<TerminalRequest> {
    fn scroll_to_row(&mut self, row: usize) -> Result<()> {
        self.send(TerminalRequest::ScrollToRow { row })
            .map_err(|e| ScrollSyncError::Channel(format!("terminal request dropped: {}", e)))
    }
}

/// Records every requested row, in order
impl RowRequestSink for Vec<usize> {
    fn scroll_to_row(&mut self, row: usize) -> Result<()> {
        self.push(row);
        Ok(())
    }
}
