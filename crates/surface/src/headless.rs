//! In-memory host container and renderer
//!
//! Used to replay recorded traces and to drive the synchronizer in tests
//! without a window system.

use serde::Serialize;

use crate::events::SyncEvent;
use crate::geometry::ScrollIndicators;
use crate::host::{ScrollHost, SurfaceRenderer, ViewportSize, VisibleRect};

/// Scroll container that only remembers what it was told
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessHost {
    /// Current document height
    pub document_height: f64,
    /// Current visible region
    pub visible: VisibleRect,
    /// Last reflected knob metrics
    pub indicators: Option<ScrollIndicators>,
    /// Whether the scroller is shown
    pub scroller_visible: bool,
    /// Number of programmatic scrolls performed
    pub scroll_count: usize,
}

impl HeadlessHost {
    /// Create a host with a visible scroller and nothing laid out
    pub fn new() -> Self {
        Self {
            scroller_visible: true,
            ..Self::default()
        }
    }

    /// Mirror the container-side effect of an event before the
    /// synchronizer sees it: a resize changes the visible height and a
    /// position change moves the visible region.
    pub fn observe(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Resize { height, .. } if *height > 0.0 => {
                self.visible.height = *height;
            }
            SyncEvent::PositionChanged(visible) => {
                self.visible = *visible;
            }
            _ => {}
        }
    }
}

impl ScrollHost for HeadlessHost {
    fn visible_rect(&self) -> VisibleRect {
        self.visible
    }

    fn set_document_height(&mut self, height: f64) {
        self.document_height = height;
    }

    fn scroll_to(&mut self, origin_y: f64) {
        self.visible.origin_y = origin_y;
        self.scroll_count += 1;
    }

    fn reflect_indicators(&mut self, indicators: ScrollIndicators) {
        self.indicators = Some(indicators);
    }

    fn set_scroller_visible(&mut self, visible: bool) {
        self.scroller_visible = visible;
    }
}

/// Renderer that records every viewport it was handed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessRenderer {
    /// Viewports in the order they were received
    pub viewports: Vec<ViewportSize>,
}

impl HeadlessRenderer {
    /// Most recent viewport
    pub fn last_viewport(&self) -> Option<ViewportSize> {
        self.viewports.last().copied()
    }
}

impl SurfaceRenderer for HeadlessRenderer {
    fn viewport_resized(&mut self, size: ViewportSize) {
        self.viewports.push(size);
    }
}
