//! Connection geometry between node ports.
//!
//! [`connection_path`] is the cheap renderer used for every edge;
//! [`route_connection`] falls back to an orthogonal detour when the cheap
//! path would cut through a node.

pub mod bezier;
pub mod path;
pub mod router;

pub use bezier::*;
pub use path::*;
pub use router::*;
