use crate::geometry::{Point, Rect, distance_to_segment};
use itertools::Itertools;
use std::fmt::Write;

/// Number of line segments a bezier is flattened into for hit-testing.
pub const BEZIER_FLATTEN_SEGMENTS: usize = 24;

/// The rendered shape of a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionPath {
    Straight {
        from: Point,
        to: Point,
    },
    Bezier {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
    },
    /// Axis-aligned polyline produced by the obstacle router.
    Orthogonal { points: Vec<Point> },
}

impl ConnectionPath {
    pub fn start(&self) -> Option<Point> {
        match self {
            ConnectionPath::Straight { from, .. } | ConnectionPath::Bezier { from, .. } => {
                Some(*from)
            }
            ConnectionPath::Orthogonal { points } => points.first().copied(),
        }
    }

    pub fn end(&self) -> Option<Point> {
        match self {
            ConnectionPath::Straight { to, .. } | ConnectionPath::Bezier { to, .. } => Some(*to),
            ConnectionPath::Orthogonal { points } => points.last().copied(),
        }
    }

    /// Approximates the path as a polyline. `segments` only affects beziers.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        match self {
            ConnectionPath::Straight { from, to } => vec![*from, *to],
            ConnectionPath::Bezier { from, c1, c2, to } => {
                let segments = segments.max(1);
                (0..=segments)
                    .map(|i| cubic_point(*from, *c1, *c2, *to, i as f64 / segments as f64))
                    .collect()
            }
            ConnectionPath::Orthogonal { points } => points.clone(),
        }
    }

    /// Shortest distance from `point` to the drawn path.
    pub fn distance_to(&self, point: Point) -> f64 {
        let polyline = self.flatten(BEZIER_FLATTEN_SEGMENTS);
        if polyline.len() == 1 {
            return point.distance(polyline[0]);
        }
        polyline
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance_to_segment(point, *a, *b))
            .fold(f64::INFINITY, f64::min)
    }

    /// True when any part of the path enters the interior of an obstacle.
    pub fn intersects_any(&self, obstacles: &[Rect]) -> bool {
        polyline_intersects(&self.flatten(BEZIER_FLATTEN_SEGMENTS), obstacles)
    }

    /// SVG path data (`d` attribute) for the renderer.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        match self {
            ConnectionPath::Straight { from, to } => {
                let _ = write!(d, "M {} {} L {} {}", from.x, from.y, to.x, to.y);
            }
            ConnectionPath::Bezier { from, c1, c2, to } => {
                let _ = write!(
                    d,
                    "M {} {} C {} {}, {} {}, {} {}",
                    from.x, from.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y
                );
            }
            ConnectionPath::Orthogonal { points } => {
                for (i, p) in points.iter().enumerate() {
                    let cmd = if i == 0 { "M" } else { " L" };
                    let _ = write!(d, "{} {} {}", cmd, p.x, p.y);
                }
            }
        }
        d
    }
}

/// Evaluates a cubic bezier at `t` in `[0, 1]`.
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

pub(crate) fn polyline_intersects(points: &[Point], obstacles: &[Rect]) -> bool {
    points
        .iter()
        .tuple_windows()
        .any(|(a, b)| obstacles.iter().any(|r| r.intersects_segment(*a, *b)))
}
