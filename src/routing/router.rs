use super::path::polyline_intersects;
use super::{ConnectionPath, connection_path_with_threshold};
use crate::config::EditorConfig;
use crate::geometry::{Point, Rect, Side};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, warn};

const COORD_EPSILON: f64 = 1e-6;

/// Tuning of the obstacle-avoiding router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteOptions {
    pub straight_threshold: f64,
    /// Clearance kept around obstacles.
    pub margin: f64,
    /// Length of the first/last segment leaving/entering a port.
    pub stub: f64,
    /// Extra cost charged for every turn, in world units.
    pub bend_penalty: f64,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for RouteOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            straight_threshold: config.straight_threshold,
            margin: config.route_margin,
            stub: config.route_stub,
            bend_penalty: config.grid_px,
        }
    }
}

/// Routes a connection between two ports without crossing any obstacle.
///
/// The plain straight/bezier path is kept when it clears every obstacle.
/// Otherwise an orthogonal detour is searched; when none exists the plain
/// path is returned and a warning is logged.
pub fn route_connection(
    start: Point,
    start_side: Side,
    end: Point,
    end_side: Side,
    obstacles: &[Rect],
    options: &RouteOptions,
) -> ConnectionPath {
    let direct = connection_path_with_threshold(start, end, options.straight_threshold);
    if !direct.intersects_any(obstacles) {
        return direct;
    }

    match orthogonal_route(start, start_side, end, end_side, obstacles, options) {
        Some(points) => {
            debug!(
                bends = points.len().saturating_sub(2),
                "routed connection around obstacles"
            );
            ConnectionPath::Orthogonal { points }
        }
        None => {
            warn!(%start, %end, "no obstacle-free route found, drawing direct path");
            direct
        }
    }
}

/// Routes with default options.
pub fn route_connection_default(
    start: Point,
    start_side: Side,
    end: Point,
    end_side: Side,
    obstacles: &[Rect],
) -> ConnectionPath {
    route_connection(
        start,
        start_side,
        end,
        end_side,
        obstacles,
        &RouteOptions::default(),
    )
}

/// Travel direction on the routing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    East,
    West,
    South,
    North,
}

impl Heading {
    const ALL: [Heading; 4] = [Heading::East, Heading::West, Heading::South, Heading::North];

    fn index(self) -> usize {
        self as usize
    }

    fn from_side(side: Side) -> Self {
        match side {
            Side::Right => Heading::East,
            Side::Left => Heading::West,
            Side::Bottom => Heading::South,
            Side::Top => Heading::North,
        }
    }

    fn reverse(self) -> Self {
        match self {
            Heading::East => Heading::West,
            Heading::West => Heading::East,
            Heading::South => Heading::North,
            Heading::North => Heading::South,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    cell: usize,
    heading: Heading,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    // Reversed so `BinaryHeap` pops the cheapest state first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

/// Sparse grid built from the interesting coordinates of the scene.
struct RoutingGrid<'a> {
    xs: Vec<f64>,
    ys: Vec<f64>,
    obstacles: &'a [Rect],
}

impl<'a> RoutingGrid<'a> {
    fn new(from: Point, to: Point, obstacles: &'a [Rect], margin: f64) -> Self {
        let mut xs = vec![from.x, to.x, (from.x + to.x) / 2.0];
        let mut ys = vec![from.y, to.y, (from.y + to.y) / 2.0];
        for r in obstacles {
            xs.extend([r.x - margin, r.right() + margin]);
            ys.extend([r.y - margin, r.bottom() + margin]);
        }
        Self {
            xs: sorted_unique(xs),
            ys: sorted_unique(ys),
            obstacles,
        }
    }

    fn cell_of(&self, p: Point) -> Option<usize> {
        let i = self.xs.iter().position(|x| (x - p.x).abs() < COORD_EPSILON)?;
        let j = self.ys.iter().position(|y| (y - p.y).abs() < COORD_EPSILON)?;
        Some(j * self.xs.len() + i)
    }

    fn point(&self, cell: usize) -> Point {
        let nx = self.xs.len();
        Point::new(self.xs[cell % nx], self.ys[cell / nx])
    }

    fn is_free(&self, p: Point) -> bool {
        !self.obstacles.iter().any(|r| r.contains_strict(p))
    }

    fn step(&self, cell: usize, heading: Heading) -> Option<usize> {
        let nx = self.xs.len();
        let ny = self.ys.len();
        let (i, j) = (cell % nx, cell / nx);
        let (ni, nj) = match heading {
            Heading::East if i + 1 < nx => (i + 1, j),
            Heading::West if i > 0 => (i - 1, j),
            Heading::South if j + 1 < ny => (i, j + 1),
            Heading::North if j > 0 => (i, j - 1),
            _ => return None,
        };
        let next = nj * nx + ni;
        let (a, b) = (self.point(cell), self.point(next));
        if !self.is_free(b) || self.obstacles.iter().any(|r| r.intersects_segment(a, b)) {
            return None;
        }
        Some(next)
    }
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < COORD_EPSILON);
    values
}

/// Cheapest axis-aligned path between the port stubs, scored by length plus
/// a penalty per turn.
fn orthogonal_route(
    start: Point,
    start_side: Side,
    end: Point,
    end_side: Side,
    obstacles: &[Rect],
    options: &RouteOptions,
) -> Option<Vec<Point>> {
    let start_stub = start + start_side.normal() * options.stub;
    let end_stub = end + end_side.normal() * options.stub;

    let grid = RoutingGrid::new(start_stub, end_stub, obstacles, options.margin);
    let source = grid.cell_of(start_stub)?;
    let target = grid.cell_of(end_stub)?;
    if !grid.is_free(start_stub) || !grid.is_free(end_stub) {
        return None;
    }

    let cells = grid.xs.len() * grid.ys.len();
    let mut best = vec![f64::INFINITY; cells * 4];
    let mut previous: Vec<Option<(usize, Heading)>> = vec![None; cells * 4];
    let mut heap = BinaryHeap::new();

    let initial = Heading::from_side(start_side);
    // Arriving at the end stub heading into the port costs no extra turn.
    let arrival = Heading::from_side(end_side).reverse();

    best[source * 4 + initial.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        cell: source,
        heading: initial,
    });

    let mut finish: Option<(usize, Heading, f64)> = None;
    while let Some(State {
        cost,
        cell,
        heading,
    }) = heap.pop()
    {
        if cost > best[cell * 4 + heading.index()] {
            continue;
        }
        if cell == target {
            let total = if heading == arrival {
                cost
            } else {
                cost + options.bend_penalty
            };
            if finish.is_none_or(|(_, _, c)| total < c) {
                finish = Some((cell, heading, total));
            }
            continue;
        }
        if let Some((_, _, c)) = finish {
            if cost >= c {
                break;
            }
        }

        for next_heading in Heading::ALL {
            if next_heading == heading.reverse() {
                continue;
            }
            let Some(next) = grid.step(cell, next_heading) else {
                continue;
            };
            let mut next_cost = cost + grid.point(cell).distance(grid.point(next));
            if next_heading != heading {
                next_cost += options.bend_penalty;
            }
            let slot = next * 4 + next_heading.index();
            if next_cost < best[slot] {
                best[slot] = next_cost;
                previous[slot] = Some((cell, heading));
                heap.push(State {
                    cost: next_cost,
                    cell: next,
                    heading: next_heading,
                });
            }
        }
    }

    let (mut cell, mut heading, _) = finish?;
    let mut corridor = vec![grid.point(cell)];
    while let Some((prev_cell, prev_heading)) = previous[cell * 4 + heading.index()] {
        corridor.push(grid.point(prev_cell));
        cell = prev_cell;
        heading = prev_heading;
    }
    corridor.reverse();

    let mut points = Vec::with_capacity(corridor.len() + 2);
    points.push(start);
    points.extend(corridor);
    points.push(end);
    let points = simplify(points);

    if polyline_intersects(&points, obstacles) {
        return None;
    }
    Some(points)
}

/// Drops repeated points and the middle point of collinear runs.
fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out
            .last()
            .is_some_and(|last| last.distance(p) < COORD_EPSILON)
        {
            continue;
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let cross = (b.x - a.x) * (p.y - b.y) - (b.y - a.y) * (p.x - b.x);
            let forward = (b.x - a.x) * (p.x - b.x) + (b.y - a.y) * (p.y - b.y);
            if cross.abs() < COORD_EPSILON && forward >= 0.0 {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}
