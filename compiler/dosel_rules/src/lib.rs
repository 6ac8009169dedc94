//! Static dosing policy: per-drug rules and the drug-pair interaction table.
//!
//! The registry is plain data. [`BUILTIN_RULES`] is built once on first use and
//! shared read-only by every evaluation.

mod builtin;
pub mod calculator;
pub mod interactions;
pub mod registry;
pub mod rule;

pub use calculator::{format_amount, Calculator};
pub use interactions::InteractionTable;
pub use registry::{RuleRegistry, BUILTIN_RULES};
pub use rule::{DrugRule, SafeRange};
