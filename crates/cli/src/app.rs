//! Trace replay
//!
//! Wires the synchronizer to an in-memory container and renderer, feeds it
//! a recorded event sequence and collects what came out.

use scrollsync_config::ScrollbarConfig;
use scrollsync_surface::{
    GeometryState, HeadlessHost, HeadlessRenderer, RequestStats, ScrollIndicators,
    ScrollSynchronizer, SyncEvent, TerminalRequest, ViewportSize,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Outcome of replaying one trace
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Events applied
    pub events: usize,
    /// Requests sent to the terminal, in order
    pub requests: Vec<TerminalRequest>,
    /// Final geometry
    pub geometry: GeometryState,
    /// Whole rows in the final document, if cells were measured
    pub document_rows: Option<usize>,
    /// Whether the last snapshot had the live screen at the bottom
    pub following_output: Option<bool>,
    /// Final container state
    pub host: HeadlessHost,
    /// Final knob metrics
    pub indicators: ScrollIndicators,
    /// Row request counters
    pub stats: RequestStats,
    /// De-duplication baseline at the end of the trace
    pub last_reported_row: Option<usize>,
    /// Viewports handed to the renderer
    pub viewports: Vec<ViewportSize>,
}

impl ReplayReport {
    /// Human-readable summary
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for request in &self.requests {
            match request {
                TerminalRequest::ScrollToRow { row } => {
                    out.push_str(&format!("scroll_to_row {}\n", row));
                }
            }
        }
        out.push_str(&format!("events:          {}\n", self.events));
        out.push_str(&format!(
            "requests:        {} sent, {} suppressed\n",
            self.stats.sent, self.stats.suppressed
        ));
        let rows = match self.document_rows {
            Some(rows) => rows.to_string(),
            None => "unmeasured".to_string(),
        };
        out.push_str(&format!(
            "document:        {}px ({} rows, {}px cells, {}px padding)\n",
            self.geometry.document_height, rows, self.geometry.cell_height, self.geometry.padding
        ));
        out.push_str(&format!(
            "visible origin:  {}px\n",
            self.host.visible.origin_y
        ));
        if let Some(following) = self.following_output {
            out.push_str(&format!("following:       {}\n", following));
        }
        out.push_str(&format!(
            "knob:            {:.3} of track at {:.3}\n",
            self.indicators.knob_proportion, self.indicators.knob_position
        ));
        if let Some(viewport) = self.viewports.last() {
            out.push_str(&format!(
                "renderer width:  {}px\n",
                viewport.usable_width()
            ));
        }
        match self.last_reported_row {
            Some(row) => out.push_str(&format!("reported row:    {}\n", row)),
            None => out.push_str("reported row:    none\n"),
        }
        out
    }
}

/// Replays traces against a fresh synchronizer
pub struct ReplayApp {
    scrollbar: ScrollbarConfig,
}

impl ReplayApp {
    /// Create a replay app with the given scrollbar settings
    pub fn new(scrollbar: ScrollbarConfig) -> Self {
        Self { scrollbar }
    }

    /// Apply `events` in order and report the result
    #[instrument(name = "replay", skip(self, events), fields(events = events.len()))]
    pub fn replay(&self, events: Vec<SyncEvent>) -> scrollsync_core::Result<ReplayReport> {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel();
        let renderer = Rc::new(RefCell::new(HeadlessRenderer::default()));

        let mut sync =
            ScrollSynchronizer::new(HeadlessHost::new(), request_tx, self.scrollbar.clone());
        sync.attach_renderer(&renderer);
        let publisher = sync.subscribe();

        let count = events.len();
        for event in events {
            // The container moves before it reports, so mirror that first
            sync.host_mut().observe(&event);
            publisher.publish(event)?;
            sync.pump();
        }
        drop(publisher);

        let mut requests = Vec::new();
        while let Ok(request) = request_rx.try_recv() {
            requests.push(request);
        }
        debug!(requests = requests.len(), "Replay finished");

        let viewports = renderer.borrow().viewports.clone();
        Ok(ReplayReport {
            events: count,
            requests,
            geometry: *sync.geometry(),
            document_rows: sync.geometry().document_rows(),
            following_output: sync.scrollback().map(|state| state.is_at_bottom()),
            host: sync.host().clone(),
            indicators: sync.indicators(),
            stats: sync.stats(),
            last_reported_row: sync.drag_session().last_reported_row(),
            viewports,
        })
    }
}
