//! Statement execution sink (SPEC_FULL §6).
//!
//! The teacher never abstracts this: `examples/repl_float.rs` takes a
//! per-line closure returning `Result<Response, Box<dyn Error>>` straight
//! into `prebaked::read_and`. Embedding an interpreter is out of scope
//! here, so that closure shape becomes a trait the REPL driver is generic
//! over, with two trivial implementations for testing and demos.

use std::error::Error;

/// Runs one completed, possibly multiline, Python statement.
pub trait Executor {
    fn execute(&mut self, source: &str) -> Result<(), Box<dyn Error>>;
}

/// Discards input. Useful for exercising the editing engine in isolation.
#[derive(Default)]
pub struct NullExecutor;

impl Executor for NullExecutor {
    fn execute(&mut self, _source: &str) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// Prints each statement back out. Used by the bundled demo binary.
#[derive(Default)]
pub struct EchoExecutor;

impl Executor for EchoExecutor {
    fn execute(&mut self, source: &str) -> Result<(), Box<dyn Error>> {
        println!("{source}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingExecutor(Vec<String>);

    impl Executor for RecordingExecutor {
        fn execute(&mut self, source: &str) -> Result<(), Box<dyn Error>> {
            self.0.push(source.to_string());
            Ok(())
        }
    }

    #[test]
    fn null_executor_always_succeeds() {
        assert!(NullExecutor.execute("1 + 1").is_ok());
    }

    #[test]
    fn recording_executor_captures_source() {
        let mut exec = RecordingExecutor(Vec::new());
        exec.execute("x = 1").unwrap();
        assert_eq!(exec.0, vec!["x = 1"]);
    }
}
