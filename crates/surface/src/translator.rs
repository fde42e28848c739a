//! Conversion between physical scroll positions and logical rows
//!
//! The container measures positions in pixels from the bottom of the
//! document, growing upward. The terminal numbers rows from the top of
//! history, growing downward. Both directions here invert each other to
//! within one cell.

use crate::host::VisibleRect;
use crate::scrollback::ScrollbackState;

/// Stateless position/row mapping for a given cell height.
///
/// Only constructible with a positive cell height, so holders never need to
/// re-check the guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPositionTranslator {
    cell_height: f64,
}

impl ScrollPositionTranslator {
    /// Create a translator, or `None` if the cell height is not yet usable
    pub fn new(cell_height: f64) -> Option<Self> {
        (cell_height.is_finite() && cell_height > 0.0).then_some(Self { cell_height })
    }

    /// Cell height this translator converts with
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Logical row shown at the top of `visible` within a document of
    /// `document_height` pixels.
    ///
    /// Positions above the top of the document clamp to row 0.
    pub fn row_at(&self, document_height: f64, visible: VisibleRect) -> usize {
        let distance_from_top = document_height - visible.origin_y - visible.height;
        let row = (distance_from_top / self.cell_height).floor();
        if row.is_finite() && row > 0.0 {
            row as usize
        } else {
            0
        }
    }

    /// Physical origin that puts `state.offset` at the top of the viewport
    pub fn origin_for(&self, state: &ScrollbackState) -> f64 {
        state.rows_below_viewport() as f64 * self.cell_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard() {
        assert!(ScrollPositionTranslator::new(0.0).is_none());
        assert!(ScrollPositionTranslator::new(-3.0).is_none());
        assert!(ScrollPositionTranslator::new(f64::NAN).is_none());
        assert!(ScrollPositionTranslator::new(f64::INFINITY).is_none());
        assert_eq!(ScrollPositionTranslator::new(17.5).unwrap().cell_height(), 17.5);
    }

    #[test]
    fn test_origin_for_top_of_history() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        let state = ScrollbackState::new(1000, 0, 40);
        assert_eq!(translator.origin_for(&state), 19200.0);
    }

    #[test]
    fn test_origin_for_bottom() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        let state = ScrollbackState::new(1000, 960, 40);
        assert_eq!(translator.origin_for(&state), 0.0);
    }

    #[test]
    fn test_origin_for_race_does_not_underflow() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        assert_eq!(translator.origin_for(&ScrollbackState::new(30, 5, 40)), 0.0);
        assert_eq!(translator.origin_for(&ScrollbackState::new(100, 90, 40)), 0.0);
    }

    #[test]
    fn test_row_at() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        let row = translator.row_at(20000.0, VisibleRect::new(500.0, 800.0));
        assert_eq!(row, 935);
    }

    #[test]
    fn test_row_at_sub_cell_movement() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        let base = translator.row_at(20000.0, VisibleRect::new(500.0, 800.0));
        for nudge in [1.0, 5.5, 9.9] {
            let row = translator.row_at(20000.0, VisibleRect::new(500.0 - nudge, 800.0));
            assert_eq!(row, base);
        }
        let next = translator.row_at(20000.0, VisibleRect::new(480.0, 800.0));
        assert_eq!(next, base + 1);
    }

    #[test]
    fn test_row_at_clamps_overscroll() {
        let translator = ScrollPositionTranslator::new(20.0).unwrap();
        // Rubber-banding past the top of the document
        let row = translator.row_at(20000.0, VisibleRect::new(19300.0, 800.0));
        assert_eq!(row, 0);
    }

    #[test]
    fn test_round_trip_with_padding() {
        let translator = ScrollPositionTranslator::new(17.0).unwrap();
        let padding = 805.0 % 17.0;
        for (total, offset) in [(47, 0), (50, 3), (5000, 2471), (5000, 4953)] {
            let state = ScrollbackState::new(total, offset, 47);
            let document_height = total as f64 * 17.0 + padding;
            let origin = translator.origin_for(&state);
            let row = translator.row_at(document_height, VisibleRect::new(origin, 805.0));
            assert_eq!(row, offset);
        }
    }
}
