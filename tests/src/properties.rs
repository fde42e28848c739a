//! Behavioural properties of the synchronizer

use crate::laid_out;
use scrollsync_config::ScrollbarConfig;
use scrollsync_surface::{
    GeometryState, HeadlessHost, ScrollPositionTranslator, ScrollSynchronizer, ScrollbackState,
    SyncEvent, VisibleRect,
};

#[test]
fn test_round_trip_through_container() {
    for (cell_height, container_height) in [(20.0, 800.0), (17.0, 805.0), (13.5, 613.0)] {
        let viewport_length = (container_height / cell_height) as usize;
        let mut sync = laid_out(cell_height, 640.0, container_height);

        for offset in [0, 1, 250, 4999 - viewport_length] {
            let state = ScrollbackState::new(5000, offset, viewport_length);
            sync.scrollback_changed(state);

            let translator = ScrollPositionTranslator::new(cell_height).unwrap();
            let row = translator.row_at(sync.geometry().document_height, sync.host().visible);
            assert_eq!(row, offset, "cell {} container {}", cell_height, container_height);
        }
    }
}

#[test]
fn test_identical_snapshots_are_idempotent() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    let state = ScrollbackState::new(1000, 420, 40);

    sync.scrollback_changed(state);
    let geometry = *sync.geometry();
    let row = sync.drag_session().last_reported_row();
    let origin = sync.host().visible.origin_y;

    sync.scrollback_changed(state);
    assert_eq!(*sync.geometry(), geometry);
    assert_eq!(sync.drag_session().last_reported_row(), row);
    assert_eq!(sync.host().visible.origin_y, origin);
    assert!(sync.requests().is_empty());
}

#[test]
fn test_same_row_positions_send_once() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 960, 40));
    sync.drag_started();

    // Every position inside one 20px band maps to the same row
    let mut origin = 600.0;
    while origin > 580.0 {
        sync.position_changed(VisibleRect::new(origin, 800.0));
        origin -= 0.75;
    }

    assert_eq!(sync.requests().len(), 1);
    assert_eq!(sync.stats().sent, 1);
    assert!(sync.stats().suppressed > 20);
}

#[test]
fn test_updates_during_drag_never_move_container() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 960, 40));
    sync.drag_started();
    sync.position_changed(VisibleRect::new(7777.25, 800.0));
    sync.host_mut().visible.origin_y = 7777.25;
    let scrolls = sync.host().scroll_count;

    let updates = [
        ScrollbackState::new(1000, 0, 40),
        ScrollbackState::new(1500, 1460, 40),
        ScrollbackState::new(20, 0, 40),
        ScrollbackState::new(1500, 3, 40),
    ];
    for state in updates {
        let before = sync.host().visible.origin_y.to_bits();
        sync.scrollback_changed(state);
        assert_eq!(sync.host().visible.origin_y.to_bits(), before);
    }
    assert_eq!(sync.host().scroll_count, scrolls);
}

#[test]
fn test_unmeasured_cells_change_nothing() {
    let mut sync = ScrollSynchronizer::new(HeadlessHost::new(), Vec::new(), ScrollbarConfig::default());
    let events = [
        SyncEvent::Resize {
            width: 640.0,
            height: 800.0,
        },
        SyncEvent::Scrollback(ScrollbackState::new(1000, 0, 40)),
        SyncEvent::DragStart,
        SyncEvent::PositionChanged(VisibleRect::new(500.0, 800.0)),
        SyncEvent::PositionChanged(VisibleRect::new(100.0, 800.0)),
        SyncEvent::Scrollback(ScrollbackState::new(1000, 500, 40)),
        SyncEvent::DragEnd,
        SyncEvent::CellSize { height: 0.0 },
    ];
    for event in events {
        sync.handle(event);
    }

    assert_eq!(*sync.geometry(), GeometryState::default());
    assert_eq!(sync.host().scroll_count, 0);
    assert_eq!(sync.host().document_height, 0.0);
    assert!(sync.requests().is_empty());
    assert_eq!(sync.drag_session().last_reported_row(), None);
}

#[tokio::test]
async fn test_events_through_channel() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    let events = sync.subscribe();

    events.scrollback(ScrollbackState::new(1000, 960, 40)).unwrap();
    events.publish(SyncEvent::DragStart).unwrap();
    events.position_changed(500.0, 800.0).unwrap();
    events.position_changed(480.0, 800.0).unwrap();
    events.publish(SyncEvent::DragEnd).unwrap();
    drop(events);

    sync.run().await;
    assert_eq!(sync.requests(), &vec![935, 936]);
    assert!(!sync.drag_session().is_dragging());
}
