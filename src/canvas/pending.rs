use super::{Canvas, Edge, Endpoint, PortRef};
use crate::error::CanvasError;
use crate::geometry::Point;
use crate::viewport::Viewport;
use tracing::debug;

/// Id given to the preview edge while a connection is being drawn.
pub const PENDING_EDGE_ID: &str = "pending";

/// The port a pending connection currently snaps to.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapTarget {
    pub port: PortRef,
    /// Screen-space distance from the cursor to the port.
    pub distance: f64,
}

/// A connection started with a first click on a port, following the cursor
/// until a second click completes or cancels it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConnection {
    origin: PortRef,
    cursor_world: Point,
    snap: Option<SnapTarget>,
}

impl PendingConnection {
    /// First click on `origin`.
    pub fn begin(origin: PortRef, canvas: &Canvas) -> Result<Self, CanvasError> {
        let node = canvas
            .node(&origin.node_id)
            .ok_or_else(|| CanvasError::NodeNotFound(origin.node_id.clone()))?;
        let cursor_world = node.port_position(origin.side, origin.offset);
        Ok(Self {
            origin,
            cursor_world,
            snap: None,
        })
    }

    pub fn origin(&self) -> &PortRef {
        &self.origin
    }

    pub fn snap_target(&self) -> Option<&SnapTarget> {
        self.snap.as_ref()
    }

    /// Whether the preview should be highlighted as attached.
    pub fn is_snapped(&self) -> bool {
        self.snap.is_some()
    }

    /// Follows the cursor and picks the nearest port of any other node
    /// within `snap_radius` screen pixels.
    pub fn update(
        &mut self,
        cursor_screen: Point,
        canvas: &Canvas,
        viewport: &Viewport,
        snap_radius: f64,
    ) {
        self.cursor_world = viewport.screen_to_world(cursor_screen);
        self.snap = canvas
            .nodes
            .iter()
            .filter(|n| n.id != self.origin.node_id)
            .flat_map(|n| {
                n.connection_point_positions().map(move |(cp, world)| {
                    let distance = viewport.world_to_screen(world).distance(cursor_screen);
                    SnapTarget {
                        port: PortRef::new(n.id.clone(), cp.side, cp.offset),
                        distance,
                    }
                })
            })
            .filter(|t| t.distance <= snap_radius)
            .min_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    /// The edge to draw while the gesture is in progress.
    pub fn preview(&self) -> Edge {
        let b = match &self.snap {
            Some(target) => Endpoint::Attached(target.port.clone()),
            None => Endpoint::free(self.cursor_world),
        };
        Edge::new(PENDING_EDGE_ID, Endpoint::Attached(self.origin.clone()), b)
    }

    /// Second click. Creates the edge when snapped to a port, otherwise the
    /// gesture is cancelled and `Ok(None)` is returned.
    pub fn complete(self, canvas: &mut Canvas) -> Result<Option<String>, CanvasError> {
        match self.snap {
            Some(target) => canvas.connect(self.origin, target.port).map(Some),
            None => {
                debug!(origin = %self.origin.node_id, "pending connection cancelled");
                Ok(None)
            }
        }
    }
}
