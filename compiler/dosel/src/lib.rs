//! Interpreter and shell for the dosel medical command language.
//!
//! [`Interpreter::run`] takes one line of command text through scanning,
//! parsing, context normalization and rule evaluation, and returns a tagged
//! [`Response`]. Dose results for a patient are kept in a [`RegimenStore`].

pub mod config;
pub mod error;
pub mod interpreter;
pub mod render;
pub mod response;
pub mod store;

pub use config::{Config, ConfigError, OutputFormat};
pub use error::{ErrorKind, ErrorReport, InterpreterError};
pub use interpreter::{execute, Interpreter};
pub use render::{drug_summaries, render_drug_table, render_error, render_response, DrugSummary};
pub use response::{Response, ALERT_RULE_NAME, ALERT_RULE_STATUS};
pub use store::{InMemoryStore, JsonFileStore, RegimenStore, DEFAULT_REGIMEN_FILE};
