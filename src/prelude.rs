//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most editor integrations need.
//!
//! # Example
//!
//! ```rust,no_run
//! use area_canvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/canvas.json")?;
//! let canvas = Canvas::from_json(&json)?;
//!
//! let doc = convert_canvas_to_workflow(&canvas, "Nightly report");
//! let report = validate_workflow(&doc);
//! println!("valid: {}, errors: {:?}", report.valid, report.error_messages());
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::canvas::{
    Canvas, ConnectionPoint, Edge, Endpoint, Node, PendingConnection, PortRef, ValueMap,
};
pub use crate::catalog::{ModuleCatalog, ModuleDescriptor};

// Interaction math
pub use crate::geometry::{Point, Rect, Side};
pub use crate::grid::{GridDrag, compute_snap_offset, snap_node};
pub use crate::routing::{ConnectionPath, RouteOptions, connection_path, route_connection};
pub use crate::viewport::{Viewport, ViewportController, ViewportSize};

// Workflow documents
pub use crate::workflow::{
    ActionEntry, TriggerEntry, ValidationReport, WorkflowConverter, WorkflowDocument,
    convert_canvas_to_workflow, slugify, validate_workflow,
};

// Configuration and errors
pub use crate::config::{ClientConfig, EditorConfig};
pub use crate::error::{CanvasError, ConfigError, ConversionError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
