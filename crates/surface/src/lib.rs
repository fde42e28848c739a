//! Scrollsync Surface
//!
//! Keeps a pixel-based scroll container in agreement with a terminal's
//! row-based scrollback.
//!
//! The container measures scroll positions in pixels from the bottom of its
//! document, growing upward; the terminal numbers rows from the top of
//! history, growing downward. [`ScrollSynchronizer`] translates between the
//! two in both directions:
//!
//! - scrollback snapshots from the terminal resize the document and, unless
//!   the user is dragging, move the visible region;
//! - position changes during a live drag become row requests back to the
//!   terminal, one per distinct row.
//!
//! The host container, renderer and terminal core are reached through the
//! traits in [`host`]; [`headless`] provides in-memory versions of them.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod drag;
pub mod events;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod scrollback;
pub mod sync;
pub mod translator;

pub use drag::{DragPhase, DragSession, RequestStats};
pub use events::{event_channel, parse_trace, EventReceiver, EventSender, SyncEvent};
pub use geometry::{recompute_document_height, GeometryState, ScrollIndicators};
pub use headless::{HeadlessHost, HeadlessRenderer};
pub use host::{
    RowRequestSink, ScrollHost, SurfaceRenderer, TerminalRequest, ViewportSize, VisibleRect,
};
pub use scrollback::ScrollbackState;
pub use sync::ScrollSynchronizer;
pub use translator::ScrollPositionTranslator;
