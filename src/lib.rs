//! # area-canvas - Canvas editor core for AREA workflows
//!
//! **area-canvas** holds the interaction math and graph model behind the AREA
//! visual workflow editor, independent of any rendering toolkit. A renderer
//! feeds pointer, wheel and frame events in and reads positions and SVG path
//! data out.
//!
//! ## Core Workflow
//!
//! 1.  **Build the graph**: place [`canvas::Node`]s (usually via
//!     [`catalog::ModuleCatalog::instantiate`]) on a [`canvas::Canvas`] and
//!     link their ports with [`canvas::PendingConnection`] or `Canvas::connect`.
//! 2.  **Interact**: map pointer input through a [`viewport::Viewport`], drag
//!     nodes in grid steps with [`grid::GridDrag`], and route edges with
//!     [`routing::route_connection`] so they never cross unrelated nodes.
//! 3.  **Serialize**: turn the canvas into a backend [`workflow::WorkflowDocument`]
//!     and check it with [`workflow::validate_workflow`] before submitting.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use area_canvas::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = ModuleCatalog::from_json(r#"[
//!         {"name": "timer", "triggers": {"cron.schedule": {}}},
//!         {"name": "debug", "actions": {"core.debug_print": {}}}
//!     ]"#)?;
//!
//!     let mut canvas = Canvas::default();
//!     canvas.add_node_snapped(catalog.instantiate("timer", "t1", "Every minute", Point::new(0.0, 0.0))?)?;
//!     canvas.add_node_snapped(catalog.instantiate("debug", "a1", "Print", Point::new(300.0, 0.0))?)?;
//!     canvas.connect(
//!         PortRef::new("t1", Side::Right, 0.0),
//!         PortRef::new("a1", Side::Left, 0.0),
//!     )?;
//!
//!     let doc = convert_canvas_to_workflow(&canvas, "My first workflow");
//!     let report = validate_workflow(&doc);
//!     assert!(report.valid);
//!     println!("{}", doc.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod catalog;
#[cfg(feature = "http-client")]
pub mod client;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod prelude;
pub mod routing;
pub mod viewport;
pub mod workflow;
