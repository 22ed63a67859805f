use super::ConnectionPath;
use crate::geometry::Point;

/// Vertical distance (world units) at or below which a connection is drawn
/// as a straight line.
pub const STRAIGHT_LINE_THRESHOLD: f64 = 5.0;

/// Share of the horizontal span used as tangent length for each control point.
pub const TANGENT_FACTOR: f64 = 0.5;

/// Chooses between a straight line and a horizontal S-curve from `p0` to `p3`.
pub fn connection_path(p0: Point, p3: Point) -> ConnectionPath {
    connection_path_with_threshold(p0, p3, STRAIGHT_LINE_THRESHOLD)
}

pub fn connection_path_with_threshold(p0: Point, p3: Point, threshold: f64) -> ConnectionPath {
    if (p0.y - p3.y).abs() <= threshold {
        return ConnectionPath::Straight { from: p0, to: p3 };
    }

    let tangent = (p3.x - p0.x) * TANGENT_FACTOR;
    ConnectionPath::Bezier {
        from: p0,
        c1: Point::new(p0.x + tangent, p0.y),
        c2: Point::new(p3.x - tangent, p3.y),
        to: p3,
    }
}
