//! A multiline terminal editing engine for an embedded Python REPL.

mod iter;
mod raw;

pub mod arena;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod event;
pub mod executor;
pub mod history;
pub mod render;
pub mod repl;
pub mod tokenizer;

pub use arena::Arena;
pub use config::ReplConfig;
pub use editor::{EditOutcome, Editor};
pub use error::{ReplError, ReplResult};
pub use executor::{EchoExecutor, Executor, NullExecutor};
pub use event::{Decoder, Event};
pub use repl::Repl;
