use crate::geometry::{Point, Side};
use serde::{Deserialize, Serialize};

/// A reference to one port of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRef {
    #[serde(alias = "nodeId")]
    pub node_id: String,
    pub side: Side,
    #[serde(default)]
    pub offset: f64,
}

impl PortRef {
    pub fn new(node_id: impl Into<String>, side: Side, offset: f64) -> Self {
        Self {
            node_id: node_id.into(),
            side,
            offset,
        }
    }
}

/// One end of an edge: attached to a node port, or floating at a world
/// coordinate while a connection is being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Attached(PortRef),
    Free { x: f64, y: f64 },
}

impl Endpoint {
    pub fn attached(node_id: impl Into<String>, side: Side, offset: f64) -> Self {
        Endpoint::Attached(PortRef::new(node_id, side, offset))
    }

    pub fn free(point: Point) -> Self {
        Endpoint::Free {
            x: point.x,
            y: point.y,
        }
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            Endpoint::Attached(port) => Some(port.node_id.as_str()),
            Endpoint::Free { .. } => None,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Endpoint::Attached(port) => Some(port.side),
            Endpoint::Free { .. } => None,
        }
    }

    pub fn port(&self) -> Option<&PortRef> {
        match self {
            Endpoint::Attached(port) => Some(port),
            Endpoint::Free { .. } => None,
        }
    }
}

/// A link between two node ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub a: Endpoint,
    pub b: Endpoint,
}

impl Edge {
    pub fn new(id: impl Into<String>, a: Endpoint, b: Endpoint) -> Self {
        Self { id: id.into(), a, b }
    }

    pub fn references(&self, node_id: &str) -> bool {
        self.a.node_id() == Some(node_id) || self.b.node_id() == Some(node_id)
    }

    /// Returns `(source, target)` node ids for an edge attached at both ends.
    ///
    /// Edges run from `a` to `b`, except when `a` sits on a left (input) port
    /// and `b` does not: the user started drawing from the downstream node,
    /// so the pair is reversed.
    pub fn direction(&self) -> Option<(&str, &str)> {
        let (a, b) = (self.a.port()?, self.b.port()?);
        if a.side == Side::Left && b.side != Side::Left {
            Some((b.node_id.as_str(), a.node_id.as_str()))
        } else {
            Some((a.node_id.as_str(), b.node_id.as_str()))
        }
    }

    pub fn is_attached(&self) -> bool {
        self.a.port().is_some() && self.b.port().is_some()
    }
}
