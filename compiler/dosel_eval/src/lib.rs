//! Rule evaluation: dose computation, prescription validation, interaction
//! lookup and strict alert enforcement.

pub mod dose;
pub mod validate;

pub use dose::{compute_dose, enforce_alerts, round2};
pub use validate::{check_interaction, validate_prescription, NO_KNOWN_INTERACTION};
