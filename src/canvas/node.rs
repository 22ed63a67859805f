use crate::catalog::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, ModuleDescriptor};
use crate::geometry::{Point, Rect, Side};
use serde::{Deserialize, Serialize};

/// Free-form, string-keyed parameter map (inputs, outputs, options).
pub type ValueMap = serde_json::Map<String, serde_json::Value>;

/// A port on the border of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub side: Side,
    /// Signed distance from the middle of `side`, in world units.
    #[serde(default)]
    pub offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl ConnectionPoint {
    pub fn new(side: Side, offset: f64) -> Self {
        Self {
            side,
            offset,
            size: None,
        }
    }
}

fn default_width() -> f64 {
    DEFAULT_NODE_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_NODE_HEIGHT
}

/// A draggable block on the canvas. `(x, y)` is the world-space centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleDescriptor>,
    #[serde(default, alias = "connectionPoints")]
    pub connection_points: Vec<ConnectionPoint>,
    #[serde(default)]
    pub inputs: ValueMap,
    #[serde(default)]
    pub outputs: ValueMap,
    #[serde(default)]
    pub options: ValueMap,
    #[serde(default, alias = "credentialId", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
}

impl Node {
    /// Creates a module-less node of default size with a port on each
    /// horizontal side.
    pub fn new(id: impl Into<String>, label: impl Into<String>, center: Point) -> Self {
        Self {
            id: id.into(),
            x: center.x,
            y: center.y,
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            label: label.into(),
            module: None,
            connection_points: vec![
                ConnectionPoint::new(Side::Left, 0.0),
                ConnectionPoint::new(Side::Right, 0.0),
            ],
            inputs: ValueMap::new(),
            outputs: ValueMap::new(),
            options: ValueMap::new(),
            credential_id: None,
        }
    }

    pub fn with_module(mut self, module: ModuleDescriptor) -> Self {
        self.module = Some(module);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_center(&mut self, center: Point) {
        self.x = center.x;
        self.y = center.y;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center(), self.width, self.height)
    }

    pub fn is_trigger(&self) -> bool {
        self.module.as_ref().is_some_and(ModuleDescriptor::is_trigger)
    }

    pub fn is_action(&self) -> bool {
        self.module.as_ref().is_some_and(ModuleDescriptor::is_action)
    }

    /// World position of a port located on `side` at `offset` from the
    /// middle of that side.
    pub fn port_position(&self, side: Side, offset: f64) -> Point {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        match side {
            Side::Left => Point::new(self.x - half_w, self.y + offset),
            Side::Right => Point::new(self.x + half_w, self.y + offset),
            Side::Top => Point::new(self.x + offset, self.y - half_h),
            Side::Bottom => Point::new(self.x + offset, self.y + half_h),
        }
    }

    pub fn has_port(&self, side: Side, offset: f64) -> bool {
        self.connection_points
            .iter()
            .any(|cp| cp.side == side && (cp.offset - offset).abs() < f64::EPSILON)
    }

    /// World positions of every connection point, paired with the point.
    pub fn connection_point_positions(
        &self,
    ) -> impl Iterator<Item = (&ConnectionPoint, Point)> + '_ {
        self.connection_points
            .iter()
            .map(move |cp| (cp, self.port_position(cp.side, cp.offset)))
    }
}
