pub mod point;
pub mod rect;
pub mod side;

pub use point::*;
pub use rect::*;
pub use side::*;
