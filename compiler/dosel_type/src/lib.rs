// Shared domain types for the dosel interpreter
pub mod context;
pub mod error;
pub mod results;

pub use context::*;
pub use error::*;
pub use results::*;
