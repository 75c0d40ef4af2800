//! Drag-move clamping against the rendered canvas
//!
//! The canvas size is measured by the host at the moment of the drag end
//! (it changes with window resizes), so it is always passed in.

use serde::{Deserialize, Serialize};
use shared::models::Table;

/// Rendered canvas bounding box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Clamp one axis: `clamp(current + offset, 0, extent - size)`
///
/// When the table is larger than the canvas the bounds invert; the result is
/// then `0`. NaN anywhere also yields `0`, so the result always lies in
/// `[0, max(0, extent - size)]`.
pub fn clamp_axis(current: f64, offset: f64, size: f64, extent: f64) -> f64 {
    let upper = extent - size;
    if upper.is_nan() || upper <= 0.0 {
        return 0.0;
    }
    let proposed = current + offset;
    if proposed.is_nan() {
        return 0.0;
    }
    proposed.clamp(0.0, upper)
}

/// New top-left position for `table` after a drag by `(offset_x, offset_y)`
pub fn clamp_position(table: &Table, offset_x: f64, offset_y: f64, canvas: Canvas) -> (f64, f64) {
    (
        clamp_axis(table.x, offset_x, table.width, canvas.width),
        clamp_axis(table.y, offset_y, table.height, canvas.height),
    )
}
