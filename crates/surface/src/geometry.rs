//! Physical geometry of the scroll container and its document
//!
//! All extents are in pixels. The document is the full scrollable area,
//! `total` rows tall plus a sub-cell padding that keeps cell boundaries
//! lined up with the container's edges.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Physical dimensions tracked by the synchronizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryState {
    /// Width of the visible container
    pub content_width: f64,
    /// Height of the visible container
    pub content_height: f64,
    /// Height of the full scrollable document
    pub document_height: f64,
    /// Pixels per logical row, 0 until the renderer has measured a cell
    pub cell_height: f64,
    /// Remainder of the container height that doesn't fill a whole row
    pub padding: f64,
}

impl GeometryState {
    /// Create an empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the container has been laid out with a usable size
    pub fn is_laid_out(&self) -> bool {
        is_positive(self.content_width) && is_positive(self.content_height)
    }

    /// Whether the renderer has reported a usable cell height
    pub fn has_cell_metrics(&self) -> bool {
        is_positive(self.cell_height)
    }

    /// Check the padding invariant `0 <= padding < cell_height`
    pub fn is_valid(&self) -> bool {
        if !self.has_cell_metrics() {
            return self.padding == 0.0;
        }
        self.padding >= 0.0 && self.padding < self.cell_height && self.document_height >= 0.0
    }

    /// Number of whole rows encoded in the document extent
    pub fn document_rows(&self) -> Option<usize> {
        if !self.has_cell_metrics() {
            return None;
        }
        let rows = ((self.document_height - self.padding) / self.cell_height).round();
        Some(rows.max(0.0) as usize)
    }

    /// Apply a container resize, re-anchoring the document's padding to the
    /// new container height.
    ///
    /// Returns `false` and leaves every field untouched when the new size or
    /// the cell height is degenerate.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !is_positive(width) || !is_positive(height) {
            debug!(
                subsystem = "geometry",
                width,
                height,
                "Ignoring resize to degenerate container size"
            );
            return false;
        }

        let Some(document_height) =
            recompute_document_height(self.document_height, height, self.cell_height)
        else {
            debug!(
                subsystem = "geometry",
                cell_height = self.cell_height,
                "Ignoring resize until cell metrics are known"
            );
            return false;
        };

        self.content_width = width;
        self.content_height = height;
        self.padding = padding_for(height, self.cell_height);
        self.document_height = document_height;

        trace!(
            subsystem = "geometry",
            width,
            height,
            document_height = self.document_height,
            padding = self.padding,
            "Recomputed document geometry"
        );
        true
    }

    /// Rebuild the document extent from an authoritative row count
    pub fn set_rows(&mut self, total: usize) -> bool {
        if !self.has_cell_metrics() {
            return false;
        }
        self.padding = padding_for(self.content_height, self.cell_height);
        self.document_height = total as f64 * self.cell_height + self.padding;
        true
    }

    /// Compute scroller knob metrics for a visible region starting at
    /// `origin_y` (measured from the document bottom)
    pub fn indicators(&self, origin_y: f64) -> ScrollIndicators {
        ScrollIndicators::compute(self.content_height, self.document_height, origin_y)
    }
}

/// Remainder of `height` that doesn't fill a whole cell
pub fn padding_for(height: f64, cell_height: f64) -> f64 {
    if !is_positive(cell_height) || !height.is_finite() {
        return 0.0;
    }
    height.max(0.0).rem_euclid(cell_height)
}

/// Re-quantize a document extent after the container height changes.
///
/// The whole-row part of `previous` is kept and only the sub-cell remainder
/// is swapped for the new container's remainder. Returns `None` when the
/// container height or cell height is not positive.
pub fn recompute_document_height(
    previous: f64,
    content_height: f64,
    cell_height: f64,
) -> Option<f64> {
    if !is_positive(content_height) || !is_positive(cell_height) {
        return None;
    }
    let old_padding = padding_for(previous, cell_height);
    let new_padding = padding_for(content_height, cell_height);
    Some((previous.max(0.0) - old_padding) + new_padding)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Knob metrics for the container's scroller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollIndicators {
    /// Fraction of the document that is visible, in `[0, 1]`
    pub knob_proportion: f64,
    /// Fraction of the scrollable range scrolled away from the top of
    /// history, in `[0, 1]`; 1 means the live screen is showing
    pub knob_position: f64,
}

impl Default for ScrollIndicators {
    fn default() -> Self {
        Self {
            knob_proportion: 1.0,
            knob_position: 1.0,
        }
    }
}

impl ScrollIndicators {
    /// Compute knob metrics from the container and document extents
    pub fn compute(content_height: f64, document_height: f64, origin_y: f64) -> Self {
        if !is_positive(document_height) || !content_height.is_finite() {
            return Self::default();
        }

        let knob_proportion = (content_height / document_height).clamp(0.0, 1.0);
        let scrollable = document_height - content_height;
        let knob_position = if scrollable > 0.0 && origin_y.is_finite() {
            (1.0 - origin_y / scrollable).clamp(0.0, 1.0)
        } else {
            1.0
        };

        Self {
            knob_proportion,
            knob_position,
        }
    }
}
