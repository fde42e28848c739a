//! Worked examples: concrete numbers end to end through the public API

use crate::laid_out;
use scrollsync_surface::{
    recompute_document_height, ScrollPositionTranslator, ScrollbackState, SyncEvent, VisibleRect,
};

/// 1000 rows, 40 visible, top of history, 20px cells
#[test]
fn scenario_top_of_history() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 0, 40));

    assert_eq!(sync.geometry().padding, 0.0);
    assert_eq!(sync.geometry().document_height, 20000.0);
    assert_eq!(sync.host().visible.origin_y, 19200.0);
}

/// Visible region 500px above the document bottom
#[test]
fn scenario_physical_to_row() {
    let translator = ScrollPositionTranslator::new(20.0).unwrap();
    let row = translator.row_at(20000.0, VisibleRect::new(500.0, 800.0));
    assert_eq!(row, (20000 - 500 - 800) / 20);
    assert_eq!(row, 935);
}

/// Container grows from 805px to 812px over 1000 rows of 20px
#[test]
fn scenario_resize_requantizes() {
    assert_eq!(recompute_document_height(20005.0, 812.0, 20.0), Some(20012.0));

    let mut sync = laid_out(20.0, 640.0, 805.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 960, 40));
    assert_eq!(sync.geometry().document_height, 20005.0);

    sync.resized(640.0, 812.0);
    assert_eq!(sync.geometry().padding, 12.0);
    assert_eq!(sync.geometry().document_height, 20012.0);
    assert_eq!(sync.host().document_height, 20012.0);
}

/// New output while reading history: the terminal jumps to the bottom and
/// the next drag starts from the new baseline
#[test]
fn scenario_output_between_drags() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 960, 40));

    sync.drag_started();
    sync.position_changed(VisibleRect::new(500.0, 800.0));
    sync.drag_ended();
    assert_eq!(sync.requests(), &vec![935]);

    // Terminal honoured the request, then new output snapped it to the bottom
    sync.scrollback_changed(ScrollbackState::new(1000, 935, 40));
    sync.scrollback_changed(ScrollbackState::new(1010, 970, 40));
    assert_eq!(sync.drag_session().last_reported_row(), Some(970));
    assert_eq!(sync.host().visible.origin_y, 0.0);

    // Grabbing the scroller where it left off must re-request row 935
    sync.drag_started();
    let origin = 1010.0 * 20.0 - 935.0 * 20.0 - 800.0;
    sync.position_changed(VisibleRect::new(origin, 800.0));
    sync.drag_ended();
    assert_eq!(sync.requests(), &vec![935, 935]);
}

/// A drag whose end signal never arrives keeps shielding the position
#[test]
fn scenario_missing_drag_end() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(1000, 960, 40));
    sync.handle(SyncEvent::DragStart);
    sync.host_mut().visible.origin_y = 1234.0;

    for total in 1001..1050 {
        sync.scrollback_changed(ScrollbackState::new(total, total - 40, 40));
    }

    assert!(sync.drag_session().is_dragging());
    assert_eq!(sync.host().visible.origin_y, 1234.0);
    assert_eq!(sync.geometry().document_height, 1049.0 * 20.0);
}

/// Snapshots published mid-resize can be briefly inconsistent
#[test]
fn scenario_inconsistent_snapshot() {
    let mut sync = laid_out(20.0, 640.0, 800.0);
    sync.scrollback_changed(ScrollbackState::new(30, 12, 40));

    assert_eq!(sync.geometry().document_height, 600.0);
    assert_eq!(sync.host().visible.origin_y, 0.0);
    assert_eq!(sync.drag_session().last_reported_row(), Some(12));
}
