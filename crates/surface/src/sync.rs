//! The synchronizer: applies scrollback snapshots to the container and
//! turns live drags into row requests

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use scrollsync_config::{ScrollbarConfig, ScrollerStyle};
use tracing::{debug, instrument, trace, warn};

use crate::drag::{DragSession, RequestStats};
use crate::events::{event_channel, EventReceiver, EventSender, SyncEvent};
use crate::geometry::{padding_for, GeometryState, ScrollIndicators};
use crate::host::{RowRequestSink, ScrollHost, SurfaceRenderer, ViewportSize, VisibleRect};
use crate::scrollback::ScrollbackState;
use crate::translator::ScrollPositionTranslator;

/// Keeps a scroll container and the terminal's scrollback in agreement.
///
/// Everything runs on one thread. Events are applied in arrival order and
/// no method blocks.
pub struct ScrollSynchronizer<H, S> {
    geometry: GeometryState,
    drag: DragSession,
    scrollback: Option<ScrollbackState>,
    /// Container size seen before cell metrics were available
    pending_size: Option<(f64, f64)>,
    indicators: ScrollIndicators,
    scrollbar: ScrollbarConfig,
    host: H,
    requests: S,
    renderer: Option<Weak<RefCell<dyn SurfaceRenderer>>>,
    events: Option<EventReceiver>,
}

impl<H: ScrollHost, S: RowRequestSink> ScrollSynchronizer<H, S> {
    /// Create a synchronizer for `host`, sending row requests to `requests`
    pub fn new(mut host: H, requests: S, scrollbar: ScrollbarConfig) -> Self {
        host.set_scroller_visible(scrollbar.scroller_visible());
        Self {
            geometry: GeometryState::new(),
            drag: DragSession::new(),
            scrollback: None,
            pending_size: None,
            indicators: ScrollIndicators::default(),
            scrollbar,
            host,
            requests,
            renderer: None,
            events: None,
        }
    }

    /// Observe `renderer` without keeping it alive
    pub fn attach_renderer<R: SurfaceRenderer + 'static>(&mut self, renderer: &Rc<RefCell<R>>) {
        let weak: Weak<RefCell<R>> = Rc::downgrade(renderer);
        let weak: Weak<RefCell<dyn SurfaceRenderer>> = weak;
        self.renderer = Some(weak);
    }

    /// Open an event channel feeding this synchronizer.
    ///
    /// Any previously subscribed channel is closed first.
    pub fn subscribe(&mut self) -> EventSender {
        self.unsubscribe();
        let (tx, rx) = event_channel();
        self.events = Some(rx);
        tx
    }

    /// Close the event channel. Events still queued are discarded.
    pub fn unsubscribe(&mut self) {
        if let Some(mut events) = self.events.take() {
            events.close();
            debug!(subsystem = "sync", "Closed event channel");
        }
    }

    /// Apply every queued event, returning how many were handled
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.as_mut().and_then(EventReceiver::try_next) {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Apply events as they arrive until every sender is dropped
    pub async fn run(&mut self) {
        loop {
            let event = match self.events.as_mut() {
                Some(events) => events.next().await,
                None => break,
            };
            match event {
                Some(event) => self.handle(event),
                None => break,
            }
        }
        debug!(subsystem = "sync", "Event channel drained");
    }

    /// Apply one event
    pub fn handle(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Scrollback(state) => self.scrollback_changed(state),
            SyncEvent::CellSize { height } => self.cell_size_changed(height),
            SyncEvent::Resize { width, height } => self.resized(width, height),
            SyncEvent::DragStart => self.drag_started(),
            SyncEvent::DragEnd => self.drag_ended(),
            SyncEvent::PositionChanged(visible) => self.position_changed(visible),
            SyncEvent::ScrollerStyle { style } => self.scroller_style_changed(style),
        }
    }

    /// Apply an authoritative scrollback snapshot.
    ///
    /// The document extent always follows the snapshot. The visible
    /// position only follows it while no drag is in progress.
    pub fn scrollback_changed(&mut self, state: ScrollbackState) {
        if !state.is_consistent() {
            debug!(
                subsystem = "sync",
                total = state.total,
                offset = state.offset,
                viewport_length = state.viewport_length,
                "Applying inconsistent scrollback snapshot"
            );
        }
        // Keep the snapshot even when it can't be applied yet
        self.scrollback = Some(state);

        let Some(translator) = ScrollPositionTranslator::new(self.geometry.cell_height) else {
            debug!(
                subsystem = "sync",
                total = state.total,
                "Deferring scrollback until cell metrics are known"
            );
            self.refresh_indicators();
            return;
        };

        // Extent first, so the origin below lands inside the new document
        self.geometry.set_rows(state.total);
        self.host.set_document_height(self.geometry.document_height);

        if self.drag.is_dragging() {
            trace!(
                subsystem = "sync",
                offset = state.offset,
                "Leaving position to the active drag"
            );
        } else {
            trace!(
                subsystem = "sync",
                offset = state.offset,
                at_bottom = state.is_at_bottom(),
                "Following scrollback"
            );
            self.host.scroll_to(translator.origin_for(&state));
            // Next drag compares against where the terminal actually is
            self.drag.resync(state.offset);
        }

        self.refresh_indicators();
    }

    /// The renderer measured a new cell height
    #[instrument(name = "sync_cell_size", skip(self), level = "debug")]
    pub fn cell_size_changed(&mut self, height: f64) {
        let height = if height.is_finite() && height > 0.0 {
            height
        } else {
            0.0
        };
        if height == self.geometry.cell_height {
            return;
        }

        self.geometry.cell_height = height;
        // Back to unmeasured: nothing can be translated until the next report
        if height == 0.0 {
            self.geometry.padding = 0.0;
            debug!(subsystem = "sync", "Cell metrics lost");
            return;
        }

        // A resize that arrived too early is applied now
        if let Some((width, pending_height)) = self.pending_size.take() {
            self.geometry.resize(width, pending_height);
        }

        match self.scrollback {
            Some(state) => self.scrollback_changed(state),
            // No output yet: the document is just the container
            None => {
                self.geometry.padding = padding_for(self.geometry.content_height, height);
                self.geometry.document_height = self.geometry.content_height;
                self.host.set_document_height(self.geometry.document_height);
                self.refresh_indicators();
            }
        }
    }

    /// The container was laid out at a new size
    #[instrument(name = "sync_resize", skip(self), level = "debug")]
    pub fn resized(&mut self, width: f64, height: f64) {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            debug!(
                subsystem = "sync",
                width, height, "Ignoring resize of an unlaid-out container"
            );
            return;
        }

        self.notify_renderer(width, height);

        if !self.geometry.has_cell_metrics() {
            self.pending_size = Some((width, height));
            debug!(
                subsystem = "sync",
                width, height, "Holding resize until cell metrics are known"
            );
            return;
        }

        self.pending_size = None;
        if self.geometry.resize(width, height) {
            self.host.set_document_height(self.geometry.document_height);
            self.refresh_indicators();
        }
    }

    /// The user started a live drag
    pub fn drag_started(&mut self) {
        self.drag.begin();
    }

    /// The live drag ended
    pub fn drag_ended(&mut self) {
        self.drag.end();
    }

    /// The container's visible region moved
    pub fn position_changed(&mut self, visible: VisibleRect) {
        let Some(row) = self.drag.position_changed(
            self.geometry.document_height,
            self.geometry.cell_height,
            visible,
        ) else {
            return;
        };

        if let Err(e) = self.requests.scroll_to_row(row) {
            warn!(
                subsystem = "sync",
                row,
                error = %e,
                "Failed to send row request to terminal"
            );
        }
    }

    /// The platform switched between overlay and legacy scrollers
    #[instrument(name = "sync_scroller_style", skip(self), level = "debug")]
    pub fn scroller_style_changed(&mut self, style: ScrollerStyle) {
        if self.scrollbar.style == style {
            return;
        }
        self.scrollbar.style = style;
        self.host
            .set_scroller_visible(self.scrollbar.scroller_visible());

        let size = if self.geometry.is_laid_out() {
            Some((self.geometry.content_width, self.geometry.content_height))
        } else {
            self.pending_size
        };
        if let Some((width, height)) = size {
            self.notify_renderer(width, height);
        }
    }

    /// Current geometry
    pub fn geometry(&self) -> &GeometryState {
        &self.geometry
    }

    /// Drag state
    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    /// Last scrollback snapshot received
    pub fn scrollback(&self) -> Option<ScrollbackState> {
        self.scrollback
    }

    /// Last computed knob metrics
    pub fn indicators(&self) -> ScrollIndicators {
        self.indicators
    }

    /// Row request counters
    pub fn stats(&self) -> RequestStats {
        self.drag.stats()
    }

    /// Active scrollbar settings
    pub fn scrollbar(&self) -> &ScrollbarConfig {
        &self.scrollbar
    }

    /// Host container
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Host container, mutably, for adapters that mirror platform state
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Row request sink
    pub fn requests(&self) -> &S {
        &self.requests
    }

    fn refresh_indicators(&mut self) {
        if !self.geometry.is_valid() {
            warn!(
                subsystem = "sync",
                padding = self.geometry.padding,
                cell_height = self.geometry.cell_height,
                "Document padding out of range"
            );
        }
        let visible = self.host.visible_rect();
        self.indicators = self.geometry.indicators(visible.origin_y);
        self.host.reflect_indicators(self.indicators);
    }

    fn notify_renderer(&mut self, width: f64, height: f64) {
        let Some(weak) = &self.renderer else {
            return;
        };
        let Some(renderer) = weak.upgrade() else {
            debug!(subsystem = "sync", "Renderer torn down, dropping handle");
            self.renderer = None;
            return;
        };

        let size = ViewportSize {
            width,
            height,
            scroller_inset: self.scrollbar.scroller_inset(),
        };
        match renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.viewport_resized(size),
            Err(_) => warn!(
                subsystem = "sync",
                "Renderer busy, skipping viewport update"
            ),
        };
    }
}

impl<H, S> Drop for ScrollSynchronizer<H, S> {
    fn drop(&mut self) {
        if let Some(mut events) = self.events.take() {
            events.close();
        }
    }
}
