pub mod edge;
pub mod node;
pub mod pending;
pub mod scene;

pub use edge::*;
pub use node::*;
pub use pending::*;
pub use scene::*;
