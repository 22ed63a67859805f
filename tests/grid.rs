//! Tests for grid snapping and grid-stepped dragging.
mod common;
use area_canvas::grid::snap_axis;
use area_canvas::prelude::*;

#[test]
fn test_snap_offset_parity() {
    // 160 / 20 = 8 cells (even), 100 / 20 = 5 cells (odd)
    assert_eq!(compute_snap_offset(160.0, 20.0), 0.0);
    assert_eq!(compute_snap_offset(100.0, 20.0), 10.0);
    assert_eq!(compute_snap_offset(80.0, 20.0), 0.0);
    assert_eq!(compute_snap_offset(60.0, 20.0), 10.0);
}

#[test]
fn test_snap_offset_uses_rounded_cell_count() {
    // 109 / 20 = 5.45 rounds to 5 (odd); 111 / 20 = 5.55 rounds to 6 (even)
    assert_eq!(compute_snap_offset(109.0, 20.0), 10.0);
    assert_eq!(compute_snap_offset(111.0, 20.0), 0.0);
    // Any grid: 3 cells of 16 is odd
    assert_eq!(compute_snap_offset(48.0, 16.0), 8.0);
}

#[test]
fn test_snap_axis_even_and_odd_sizes() {
    assert_eq!(snap_axis(33.0, 160.0, 20.0), 40.0);
    assert_eq!(snap_axis(-29.0, 160.0, 20.0), -20.0);
    // Odd span: centres sit on half cells so edges land on grid lines
    assert_eq!(snap_axis(33.0, 100.0, 20.0), 30.0);
    assert_eq!(snap_axis(44.0, 100.0, 20.0), 50.0);
}

#[test]
fn test_snapped_node_edges_land_on_grid_lines() {
    let mut node = Node::new("n", "Node", Point::new(47.3, 91.8)).with_size(100.0, 60.0);
    snap_node(&mut node, 20.0);
    let bounds = node.bounds();
    for edge in [bounds.x, bounds.right(), bounds.y, bounds.bottom()] {
        assert_eq!(edge % 20.0, 0.0, "edge {} is off the grid", edge);
    }
}

#[test]
fn test_drag_commits_whole_cells_only() {
    let mut drag = GridDrag::new();
    drag.begin(Point::new(0.0, 0.0));

    // 15px at scale 1 is below one 20px cell
    assert_eq!(drag.update(Point::new(15.0, 0.0), 1.0, 20.0), None);
    assert_eq!(drag.pending(), Point::new(15.0, 0.0));

    // Another 10px crosses the threshold: commit 20, carry 5
    let step = drag.update(Point::new(25.0, 0.0), 1.0, 20.0);
    assert_eq!(step, Some(Point::new(20.0, 0.0)));
    assert_eq!(drag.pending(), Point::new(5.0, 0.0));
}

#[test]
fn test_drag_divides_by_scale_and_truncates_toward_zero() {
    let mut drag = GridDrag::new();
    drag.begin(Point::new(100.0, 100.0));

    // At scale 2, a 90px screen move is 45 world units: two cells, 5 carried
    let step = drag.update(Point::new(10.0, 100.0), 2.0, 20.0);
    assert_eq!(step, Some(Point::new(-40.0, 0.0)));
    assert_eq!(drag.pending(), Point::new(-5.0, 0.0));
}

#[test]
fn test_drag_without_begin_is_ignored() {
    let mut drag = GridDrag::new();
    assert!(!drag.is_dragging());
    assert_eq!(drag.update(Point::new(100.0, 0.0), 1.0, 20.0), None);
    // The first update only records the pointer
    assert!(drag.is_dragging());
}

#[test]
fn test_drag_finish_snaps_and_resets() {
    let mut canvas = Canvas::default();
    canvas
        .add_node(Node::new("n", "Node", Point::new(0.0, 0.0)))
        .unwrap();

    let mut drag = GridDrag::new();
    drag.begin(Point::new(0.0, 0.0));
    for x in [7.0, 19.0, 33.0, 61.0] {
        if let Some(delta) = drag.update(Point::new(x, 3.0), 1.0, 20.0) {
            canvas.drag_node("n", delta).unwrap();
        }
    }
    assert_eq!(canvas.node("n").unwrap().center(), Point::new(60.0, 0.0));

    let node = canvas.node_mut("n").unwrap();
    node.x += 3.0;
    drag.finish(node, 20.0);
    assert_eq!(node.center(), Point::new(60.0, 0.0));
    assert!(!drag.is_dragging());
    assert_eq!(drag.pending(), Point::ZERO);
}

#[test]
fn test_unusable_grid_or_scale_never_commits() {
    assert_eq!(snap_axis(33.0, 160.0, 0.0), 33.0);
    assert_eq!(compute_snap_offset(100.0, 0.0), 0.0);

    let mut drag = GridDrag::new();
    drag.begin(Point::new(0.0, 0.0));
    assert_eq!(drag.update(Point::new(50.0, 0.0), 1.0, 0.0), None);
    assert_eq!(drag.update(Point::new(100.0, 0.0), 0.0, 20.0), None);
    assert_eq!(drag.update(Point::new(150.0, 0.0), -1.0, 20.0), None);
    assert_eq!(drag.pending(), Point::ZERO);

    // A valid event afterwards only counts motion since the last pointer
    assert_eq!(
        drag.update(Point::new(175.0, 0.0), 1.0, 20.0),
        Some(Point::new(20.0, 0.0))
    );
    assert_eq!(drag.pending(), Point::new(5.0, 0.0));
}
