//! Grid snapping and grid-stepped node dragging.

use crate::canvas::Node;
use crate::geometry::Point;

/// Offset that keeps a node of `size` aligned with the grid after snapping.
///
/// A node spanning an even number of cells snaps its centre onto a grid line
/// (offset `0`); an odd span needs its centre half a cell off the line
/// (offset `grid / 2`) so that its edges land on grid lines.
pub fn compute_snap_offset(size: f64, grid: f64) -> f64 {
    if !is_usable_grid(grid) {
        return 0.0;
    }
    let cells = (size / grid).round() as i64;
    if cells % 2 == 0 { 0.0 } else { grid / 2.0 }
}

fn is_usable_grid(grid: f64) -> bool {
    grid.is_finite() && grid > 0.0
}

/// Snaps a centre coordinate along one axis. A non-positive grid leaves the
/// value untouched.
pub fn snap_axis(value: f64, size: f64, grid: f64) -> f64 {
    if !is_usable_grid(grid) {
        return value;
    }
    let offset = compute_snap_offset(size, grid);
    ((value - offset) / grid).round() * grid + offset
}

/// Snaps a node centre to the nearest grid position for its size.
pub fn snap_node(node: &mut Node, grid: f64) {
    node.x = snap_axis(node.x, node.width, grid);
    node.y = snap_axis(node.y, node.height, grid);
}

/// Drag state of a single node.
///
/// Pointer motion is converted to world units and accumulated; movement is
/// only committed in whole grid cells, the remainder carried to the next
/// pointer event.
#[derive(Debug, Clone, Default)]
pub struct GridDrag {
    last_pointer: Option<Point>,
    pending: Point,
}

impl GridDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag at `pointer` (screen coordinates).
    pub fn begin(&mut self, pointer: Point) {
        self.last_pointer = Some(pointer);
        self.pending = Point::ZERO;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// World-space movement accumulated but not yet committed.
    pub fn pending(&self) -> Point {
        self.pending
    }

    /// Feeds a pointer position. Returns the world delta to apply to the node
    /// when at least one whole grid cell has accumulated on some axis.
    ///
    /// Nothing is accumulated while `scale` or `grid` is not positive.
    pub fn update(&mut self, pointer: Point, scale: f64, grid: f64) -> Option<Point> {
        let last = self.last_pointer.replace(pointer)?;
        if !is_usable_grid(grid) || !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        self.pending += (pointer - last) / scale;

        let step_x = (self.pending.x / grid).trunc() * grid;
        let step_y = (self.pending.y / grid).trunc() * grid;
        let step = Point::new(step_x, step_y);
        if step.is_zero() {
            return None;
        }
        self.pending -= step;
        Some(step)
    }

    /// Ends the drag and snaps the node onto the grid.
    pub fn finish(&mut self, node: &mut Node, grid: f64) {
        self.last_pointer = None;
        self.pending = Point::ZERO;
        snap_node(node, grid);
    }

    /// Abandons the drag without snapping.
    pub fn cancel(&mut self) {
        self.last_pointer = None;
        self.pending = Point::ZERO;
    }
}
