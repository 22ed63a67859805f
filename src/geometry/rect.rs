use super::Point;
use serde::{Deserialize, Serialize};

const INTERIOR_EPSILON: f64 = 1e-7;

/// Axis-aligned rectangle with a top-left origin, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Smallest rectangle enclosing every rectangle of the iterator.
    pub fn bounding<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }

    /// Closed containment test; points on the border count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Open containment test; points on the border are outside.
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x + INTERIOR_EPSILON
            && p.x < self.right() - INTERIOR_EPSILON
            && p.y > self.y + INTERIOR_EPSILON
            && p.y < self.bottom() - INTERIOR_EPSILON
    }

    /// Returns true when a positive-length part of segment `a`-`b` lies in the
    /// open interior of the rectangle. Running along or touching the border
    /// does not count.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let x_min = self.x + INTERIOR_EPSILON;
        let x_max = self.right() - INTERIOR_EPSILON;
        let y_min = self.y + INTERIOR_EPSILON;
        let y_max = self.bottom() - INTERIOR_EPSILON;
        if x_min >= x_max || y_min >= y_max {
            return false;
        }

        let d = b - a;
        let checks = [
            (-d.x, a.x - x_min),
            (d.x, x_max - a.x),
            (-d.y, a.y - y_min),
            (d.y, y_max - a.y),
        ];

        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }

        (t1 - t0) * d.length() > INTERIOR_EPSILON
    }
}
