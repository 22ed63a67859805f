use crate::canvas::{ConnectionPoint, Node, ValueMap};
use crate::error::CanvasError;
use crate::geometry::{Point, Side};
use serde::{Deserialize, Serialize};

/// Default node footprint in world units.
pub const DEFAULT_NODE_WIDTH: f64 = 160.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;

/// A catalog entry describing what a node can do.
///
/// `triggers` and `actions` are keyed by type string (e.g. `"cron.schedule"`),
/// the values hold per-type schema the backend publishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub triggers: ValueMap,
    #[serde(default)]
    pub actions: ValueMap,
    #[serde(default)]
    pub inputs: ValueMap,
    #[serde(default)]
    pub outputs: ValueMap,
    #[serde(default)]
    pub options: ValueMap,
}

impl ModuleDescriptor {
    pub fn is_trigger(&self) -> bool {
        !self.triggers.is_empty()
    }

    pub fn is_action(&self) -> bool {
        !self.actions.is_empty()
    }

    /// The first declared trigger type.
    pub fn trigger_type(&self) -> Option<&str> {
        self.triggers.keys().next().map(String::as_str)
    }

    /// The first declared action type.
    pub fn action_type(&self) -> Option<&str> {
        self.actions.keys().next().map(String::as_str)
    }

    /// Ports a freshly placed node of this module gets: actions accept input
    /// on the left, everything emits on the right.
    pub fn default_connection_points(&self) -> Vec<ConnectionPoint> {
        let mut points = Vec::with_capacity(2);
        if self.is_action() || !self.is_trigger() {
            points.push(ConnectionPoint::new(Side::Left, 0.0));
        }
        points.push(ConnectionPoint::new(Side::Right, 0.0));
        points
    }
}

/// The list of modules served by the backend's `/modules` endpoint.
///
/// Deserializes from either a bare list or an object wrapping it under
/// `modules`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "ModulesPayload")]
pub struct ModuleCatalog {
    modules: Vec<ModuleDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModulesPayload {
    List(Vec<ModuleDescriptor>),
    Wrapped { modules: Vec<ModuleDescriptor> },
}

impl From<ModulesPayload> for ModuleCatalog {
    fn from(payload: ModulesPayload) -> Self {
        match payload {
            ModulesPayload::List(modules) | ModulesPayload::Wrapped { modules } => {
                Self::new(modules)
            }
        }
    }
}

impl ModuleCatalog {
    pub fn new(modules: Vec<ModuleDescriptor>) -> Self {
        Self { modules }
    }

    /// Parses the `/modules` response body.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(json).map_err(|e| CanvasError::JsonParseError(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn triggers(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| m.is_trigger())
    }

    pub fn actions(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| m.is_action())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Builds a node for `module_name` centred at `center`. The module's
    /// declared inputs, outputs and options seed the node's parameter maps.
    pub fn instantiate(
        &self,
        module_name: &str,
        id: impl Into<String>,
        label: impl Into<String>,
        center: Point,
    ) -> Result<Node, CanvasError> {
        let module = self
            .get(module_name)
            .ok_or_else(|| CanvasError::UnknownModule(module_name.to_string()))?;

        let mut node = Node::new(id, label, center);
        node.connection_points = module.default_connection_points();
        node.inputs = module.inputs.clone();
        node.outputs = module.outputs.clone();
        node.options = module.options.clone();
        node.module = Some(module.clone());
        Ok(node)
    }
}
