pub mod animation;
pub mod transform;

pub use animation::*;
pub use transform::*;
