//! Inbound event channel
//!
//! The terminal core and the host container publish into an
//! [`EventSender`]; the synchronizer owns the matching receiver and applies
//! events one at a time on its own thread, in publish order. Dropping the
//! synchronizer closes the channel, after which publishing fails instead of
//! silently queueing.

use scrollsync_config::ScrollerStyle;
use scrollsync_core::{Result, ScrollSyncError};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::host::VisibleRect;
use crate::scrollback::ScrollbackState;

/// Everything the synchronizer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    /// Terminal core published a new scrollback snapshot
    Scrollback(ScrollbackState),
    /// Renderer measured a new cell height
    CellSize {
        /// Pixels per row
        height: f64,
    },
    /// Container was laid out at a new size
    Resize {
        /// Container width
        width: f64,
        /// Container height
        height: f64,
    },
    /// User grabbed the scroller or started a live scroll gesture
    DragStart,
    /// Live gesture finished
    DragEnd,
    /// Container's visible region moved
    PositionChanged(VisibleRect),
    /// Platform switched scroller style
    ScrollerStyle {
        /// New style
        style: ScrollerStyle,
    },
}

/// Publishing half of the event channel
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SyncEvent>,
}

/// Receiving half of the event channel
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<SyncEvent>,
}

/// Create a connected sender/receiver pair
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

impl EventSender {
    /// Publish an event
    pub fn publish(&self, event: SyncEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| ScrollSyncError::Channel("synchronizer is gone".to_string()))
    }

    /// Publish a scrollback snapshot
    pub fn scrollback(&self, state: ScrollbackState) -> Result<()> {
        self.publish(SyncEvent::Scrollback(state))
    }

    /// Publish a position change
    pub fn position_changed(&self, origin_y: f64, height: f64) -> Result<()> {
        self.publish(SyncEvent::PositionChanged(VisibleRect::new(origin_y, height)))
    }

    /// Whether the receiving side has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl EventReceiver {
    /// Next queued event, without waiting
    pub fn try_next(&mut self) -> Option<SyncEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event; `None` once every sender is dropped
    pub async fn next(&mut self) -> Option<SyncEvent> {
        self.rx.recv().await
    }

    /// Stop accepting events. Already queued events can still be drained.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Parse a recorded trace: a JSON array of events
pub fn parse_trace(json: &str) -> Result<Vec<SyncEvent>> {
    serde_json::from_str(json).map_err(|e| ScrollSyncError::Trace(e.to_string()))
}
