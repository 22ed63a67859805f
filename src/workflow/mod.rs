//! The backend workflow document and its derivation from a canvas.

pub mod conversion;
pub mod document;
pub mod validation;

pub use conversion::*;
pub use document::*;
pub use validation::*;
