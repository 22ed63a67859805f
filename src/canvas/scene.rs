use super::{Edge, Endpoint, Node, PortRef};
use crate::config::EditorConfig;
use crate::error::CanvasError;
use crate::geometry::{Point, Rect, Side};
use crate::grid::snap_node;
use crate::routing::{ConnectionPath, RouteOptions, route_connection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

fn default_grid() -> f64 {
    EditorConfig::default().grid_px
}

/// The editable graph: nodes in draw order (last is topmost) and the edges
/// between their ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, alias = "connections")]
    pub edges: Vec<Edge>,
    #[serde(default = "default_grid", alias = "gridPx")]
    pub grid_px: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            grid_px: default_grid(),
        }
    }
}

fn check_grid(grid_px: f64) -> Result<(), CanvasError> {
    if grid_px.is_finite() && grid_px > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidGrid(grid_px))
    }
}

impl Canvas {
    /// An empty canvas snapping to `grid_px`.
    ///
    /// # Errors
    /// [`CanvasError::InvalidGrid`] unless `grid_px` is finite and positive.
    pub fn new(grid_px: f64) -> Result<Self, CanvasError> {
        check_grid(grid_px)?;
        Ok(Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            grid_px,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let canvas: Canvas =
            serde_json::from_str(json).map_err(|e| CanvasError::JsonParseError(e.to_string()))?;
        check_grid(canvas.grid_px)?;
        Ok(canvas)
    }

    pub fn to_json_pretty(&self) -> Result<String, CanvasError> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::JsonParseError(e.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    fn require_node(&self, id: &str) -> Result<&Node, CanvasError> {
        self.node(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))
    }

    /// Adds a node on top of the others.
    pub fn add_node(&mut self, node: Node) -> Result<(), CanvasError> {
        if self.node(&node.id).is_some() {
            return Err(CanvasError::DuplicateNode(node.id));
        }
        debug!(node = %node.id, label = %node.label, "adding node");
        self.nodes.push(node);
        Ok(())
    }

    /// Adds a node after snapping it onto the grid.
    pub fn add_node_snapped(&mut self, mut node: Node) -> Result<(), CanvasError> {
        snap_node(&mut node, self.grid_px);
        self.add_node(node)
    }

    /// Removes a node together with every edge attached to it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, CanvasError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))?;
        let node = self.nodes.remove(index);

        let before = self.edges.len();
        self.edges.retain(|e| !e.references(id));
        info!(
            node = %id,
            removed_edges = before - self.edges.len(),
            "removed node"
        );
        Ok(node)
    }

    /// Applies `update` to a node, e.g. from the edit panel.
    pub fn update_node<F>(&mut self, id: &str, update: F) -> Result<(), CanvasError>
    where
        F: FnOnce(&mut Node),
    {
        let node = self
            .node_mut(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))?;
        update(node);
        Ok(())
    }

    /// Moves a node by a committed world delta.
    pub fn drag_node(&mut self, id: &str, delta: Point) -> Result<(), CanvasError> {
        self.update_node(id, |node| node.set_center(node.center() + delta))
    }

    /// Moves a node to the top of the draw order.
    pub fn bring_to_front(&mut self, id: &str) -> Result<(), CanvasError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.to_string()))?;
        let node = self.nodes.remove(index);
        self.nodes.push(node);
        Ok(())
    }

    fn next_edge_id(&self) -> String {
        (self.edges.len() + 1..)
            .map(|n| format!("e{}", n))
            .find(|id| self.edge(id).is_none())
            .unwrap_or_default()
    }

    /// Connects two node ports and returns the new edge id.
    pub fn connect(&mut self, from: PortRef, to: PortRef) -> Result<String, CanvasError> {
        if from.node_id == to.node_id {
            return Err(CanvasError::SelfConnection(from.node_id));
        }
        for port in [&from, &to] {
            let node = self.require_node(&port.node_id)?;
            if !node.connection_points.is_empty() && !node.has_port(port.side, port.offset) {
                return Err(CanvasError::UnknownPort {
                    node_id: port.node_id.clone(),
                    side: port.side,
                });
            }
        }

        let duplicate = self.edges.iter().any(|e| match (e.a.port(), e.b.port()) {
            (Some(a), Some(b)) => (a == &from && b == &to) || (a == &to && b == &from),
            _ => false,
        });
        if duplicate {
            return Err(CanvasError::DuplicateConnection {
                from: from.node_id,
                to: to.node_id,
            });
        }

        let id = self.next_edge_id();
        info!(edge = %id, from = %from.node_id, to = %to.node_id, "connected nodes");
        self.edges
            .push(Edge::new(id.clone(), Endpoint::Attached(from), Endpoint::Attached(to)));
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, CanvasError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CanvasError::EdgeNotFound(id.to_string()))?;
        debug!(edge = %id, "removed edge");
        Ok(self.edges.remove(index))
    }

    /// World position of an endpoint; `None` if it names a missing node.
    pub fn endpoint_position(&self, endpoint: &Endpoint) -> Option<Point> {
        match endpoint {
            Endpoint::Attached(port) => self
                .node(&port.node_id)
                .map(|n| n.port_position(port.side, port.offset)),
            Endpoint::Free { x, y } => Some(Point::new(*x, *y)),
        }
    }

    /// Topmost node under a world point.
    pub fn node_at(&self, point: Point) -> Option<&Node> {
        self.nodes.iter().rev().find(|n| n.bounds().contains(point))
    }

    /// Bounding box of every node.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.nodes.iter().map(Node::bounds))
    }

    /// Bounding boxes of every node except the listed ones.
    pub fn obstacles_excluding(&self, excluded: &[&str]) -> Vec<Rect> {
        self.nodes
            .iter()
            .filter(|n| !excluded.contains(&n.id.as_str()))
            .map(Node::bounds)
            .collect()
    }

    /// Path of one edge, routed around every node it does not touch.
    pub fn route_edge(
        &self,
        edge_id: &str,
        config: &EditorConfig,
    ) -> Result<ConnectionPath, CanvasError> {
        let edge = self
            .edge(edge_id)
            .ok_or_else(|| CanvasError::EdgeNotFound(edge_id.to_string()))?;
        self.route(edge, config)
    }

    /// Routes every edge, in edge order.
    pub fn route_all(
        &self,
        config: &EditorConfig,
    ) -> Result<Vec<(String, ConnectionPath)>, CanvasError> {
        self.edges
            .iter()
            .map(|e| self.route(e, config).map(|path| (e.id.clone(), path)))
            .collect()
    }

    fn route(&self, edge: &Edge, config: &EditorConfig) -> Result<ConnectionPath, CanvasError> {
        let position = |endpoint: &Endpoint| {
            self.endpoint_position(endpoint).ok_or_else(|| {
                CanvasError::NodeNotFound(endpoint.node_id().unwrap_or_default().to_string())
            })
        };
        let start = position(&edge.a)?;
        let end = position(&edge.b)?;

        let excluded: Vec<&str> = [edge.a.node_id(), edge.b.node_id()]
            .into_iter()
            .flatten()
            .collect();
        let obstacles = self.obstacles_excluding(&excluded);

        // A floating end behaves like a port facing back towards the start.
        let start_side = edge
            .a
            .side()
            .unwrap_or_else(|| facing_side(end, start));
        let end_side = edge.b.side().unwrap_or_else(|| facing_side(start, end));

        Ok(route_connection(
            start,
            start_side,
            end,
            end_side,
            &obstacles,
            &RouteOptions::from(config),
        ))
    }

    /// Edge whose drawn path passes within `tolerance` of a world point.
    pub fn edge_at(&self, point: Point, tolerance: f64, config: &EditorConfig) -> Option<&Edge> {
        self.edges
            .iter()
            .filter_map(|e| {
                let path = self.route(e, config).ok()?;
                let distance = path.distance_to(point);
                (distance <= tolerance).then_some((e, distance))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(e, _)| e)
    }
}

/// Side of a virtual port at `at` that faces `towards`.
fn facing_side(towards: Point, at: Point) -> Side {
    let d = towards - at;
    if d.x.abs() >= d.y.abs() {
        if d.x >= 0.0 { Side::Right } else { Side::Left }
    } else if d.y >= 0.0 {
        Side::Bottom
    } else {
        Side::Top
    }
}
