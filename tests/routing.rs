//! Tests for connection rendering and obstacle-avoiding routing.
mod common;
use area_canvas::prelude::*;
use area_canvas::routing::route_connection_default;

#[test]
fn test_small_vertical_gap_renders_straight() {
    let p0 = Point::new(0.0, 100.0);
    for dy in [0.0, 3.0, 5.0, -5.0] {
        let p3 = Point::new(200.0, 100.0 + dy);
        assert_eq!(
            connection_path(p0, p3),
            ConnectionPath::Straight { from: p0, to: p3 },
            "dy = {} should be straight",
            dy
        );
    }
}

#[test]
fn test_large_vertical_gap_renders_bezier_with_half_span_tangents() {
    let p0 = Point::new(10.0, 0.0);
    let p3 = Point::new(210.0, 5.5);
    match connection_path(p0, p3) {
        ConnectionPath::Bezier { from, c1, c2, to } => {
            assert_eq!(from, p0);
            assert_eq!(to, p3);
            assert_eq!(c1, Point::new(110.0, 0.0));
            assert_eq!(c2, Point::new(110.0, 5.5));
        }
        other => panic!("Expected bezier, got {:?}", other),
    }
}

#[test]
fn test_backwards_bezier_uses_signed_span() {
    // Target left of source: dx = -100, control points cross over
    let p0 = Point::new(100.0, 0.0);
    let p3 = Point::new(0.0, 50.0);
    let ConnectionPath::Bezier { c1, c2, .. } = connection_path(p0, p3) else {
        panic!("Expected bezier");
    };
    assert_eq!(c1, Point::new(50.0, 0.0));
    assert_eq!(c2, Point::new(50.0, 50.0));
}

#[test]
fn test_svg_path_output() {
    let straight = ConnectionPath::Straight {
        from: Point::new(0.0, 0.0),
        to: Point::new(10.0, 2.5),
    };
    assert_eq!(straight.to_svg_path(), "M 0 0 L 10 2.5");

    let bezier = connection_path(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
    assert_eq!(bezier.to_svg_path(), "M 0 0 C 50 0, 50 40, 100 40");

    let ortho = ConnectionPath::Orthogonal {
        points: vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(5.0, 10.0)],
    };
    assert_eq!(ortho.to_svg_path(), "M 0 0 L 0 10 L 5 10");
}

#[test]
fn test_distance_to_path() {
    let path = ConnectionPath::Straight {
        from: Point::new(0.0, 0.0),
        to: Point::new(100.0, 0.0),
    };
    assert_eq!(path.distance_to(Point::new(50.0, 7.0)), 7.0);
    assert_eq!(path.distance_to(Point::new(-3.0, 4.0)), 5.0);
}

#[test]
fn test_rect_segment_interior_test() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(rect.intersects_segment(Point::new(-10.0, 50.0), Point::new(110.0, 50.0)));
    // Running along the border does not count
    assert!(!rect.intersects_segment(Point::new(-10.0, 0.0), Point::new(110.0, 0.0)));
    assert!(!rect.intersects_segment(Point::new(100.0, -10.0), Point::new(100.0, 110.0)));
    // Completely outside
    assert!(!rect.intersects_segment(Point::new(-10.0, -10.0), Point::new(-10.0, 110.0)));
    // Ending inside
    assert!(rect.intersects_segment(Point::new(-10.0, 50.0), Point::new(10.0, 50.0)));
}

#[test]
fn test_unobstructed_route_keeps_direct_path() {
    let obstacles = [Rect::new(100.0, 200.0, 50.0, 50.0)];
    let path = route_connection_default(
        Point::new(0.0, 0.0),
        Side::Right,
        Point::new(300.0, 0.0),
        Side::Left,
        &obstacles,
    );
    assert!(matches!(path, ConnectionPath::Straight { .. }));
}

#[test]
fn test_route_detours_around_blocking_node() {
    let start = Point::new(0.0, 0.0);
    let end = Point::new(400.0, 0.0);
    let obstacles = [Rect::new(150.0, -50.0, 100.0, 100.0)];

    let path = route_connection_default(start, Side::Right, end, Side::Left, &obstacles);

    let ConnectionPath::Orthogonal { points } = &path else {
        panic!("Expected orthogonal detour, got {:?}", path);
    };
    assert_eq!(points.first(), Some(&start));
    assert_eq!(points.last(), Some(&end));
    assert!(!path.intersects_any(&obstacles));

    // Every segment is axis aligned
    for pair in points.windows(2) {
        assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
    }
    // The detour uses the nearest clearance line (margin 16), not a wider one
    let max_offset = points.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
    assert_eq!(max_offset, 66.0);
}

#[test]
fn test_route_prefers_shorter_side_of_detour() {
    // Obstacle mostly below the line: going over the top is the minimal detour
    let start = Point::new(0.0, 0.0);
    let end = Point::new(400.0, 0.0);
    let obstacles = [Rect::new(150.0, -20.0, 100.0, 300.0)];

    let path = route_connection_default(start, Side::Right, end, Side::Left, &obstacles);
    let ConnectionPath::Orthogonal { points } = &path else {
        panic!("Expected orthogonal detour");
    };
    assert!(points.iter().all(|p| p.y <= 0.0));
    assert!(points.iter().any(|p| p.y == -36.0));
    assert!(!path.intersects_any(&obstacles));
}

#[test]
fn test_route_around_several_obstacles() {
    let start = Point::new(0.0, 0.0);
    let end = Point::new(800.0, 200.0);
    let obstacles = [
        Rect::new(150.0, -100.0, 100.0, 400.0),
        Rect::new(400.0, 40.0, 120.0, 120.0),
        Rect::new(600.0, 150.0, 80.0, 100.0),
    ];

    let path = route_connection_default(start, Side::Right, end, Side::Left, &obstacles);
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.end(), Some(end));
    assert!(!path.intersects_any(&obstacles));
}

#[test]
fn test_unroutable_connection_falls_back_to_direct_path() {
    // The end port is enclosed by an obstacle
    let start = Point::new(0.0, 0.0);
    let end = Point::new(400.0, 0.0);
    let obstacles = [Rect::new(300.0, -100.0, 200.0, 200.0)];

    let path = route_connection_default(start, Side::Right, end, Side::Left, &obstacles);
    assert_eq!(path, connection_path(start, end));
}
