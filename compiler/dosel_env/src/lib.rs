//! Context normalization: turns a command's raw `key=value` strings into a
//! typed [`ClinicalContext`](dosel_type::ClinicalContext).
//!
//! This is the only place where numbers and units are interpreted.

pub mod normalize;
pub mod quantity;

pub use normalize::{normalize, ParamKey};
pub use quantity::{DoseUnit, Quantity};
