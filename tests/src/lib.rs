//! Shared helpers for the end-to-end scenarios under `tests/`.

use dosel::{InMemoryStore, Interpreter, InterpreterError, Response};
use dosel_ast::Command;
use dosel_lexer::scan;
use dosel_parser::parse_command;

/// Enables log output for a test run; repeated calls are harmless.
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh interpreter over the built-in rules and an empty store
pub fn interpreter() -> Interpreter<'static, InMemoryStore> {
    Interpreter::new(InMemoryStore::new())
}

/// Runs one command against a fresh interpreter
pub fn run(source: &str) -> Result<Response, InterpreterError> {
    interpreter().run(source)
}

/// Scans and parses without executing
pub fn parse(source: &str) -> Result<Command, InterpreterError> {
    let tokens = scan(source)?;
    Ok(parse_command(&tokens)?)
}
