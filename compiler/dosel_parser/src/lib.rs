pub mod parser;

pub use parser::diagnostics::{render_snippet, Diagnostic};
pub use parser::{parse_command, Expectation, ParseError, TokenSlice};
