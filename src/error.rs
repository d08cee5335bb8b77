//! Error type.
//!
//! Same variant shape as the teacher's `src/error.rs` (`CtrlC`/`CtrlD`/
//! `BadUnicode`/`IoFailure`/`EndOfInput`), re-derived with `thiserror`
//! instead of hand-written `Display`/`From` impls — see SPEC_FULL §7a.

use crate::iter::chars::BadUnicode;

pub type ReplResult<T> = std::result::Result<T, ReplError>;

/// Errors surfaced by the editing engine and REPL driver.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// User broke with Ctrl+C; carries the buffer as it stood at that point.
    #[error("interrupted")]
    Interrupt(String),

    /// User broke with Ctrl+D (EOF); carries the buffer as it stood at that
    /// point.
    #[error("end of file")]
    Eof(String),

    /// Invalid unicode codepoint in the input stream.
    #[error("\\u{{{0:x}}} is not a valid unicode codepoint")]
    BadUnicode(u32),

    /// Terminal raw-mode setup failed.
    #[error("terminal setup failed: {0}")]
    Terminal(#[source] std::io::Error),

    /// I/O error reading from stdin or writing to stdout.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Ran out of input without completing a statement.
    #[error("end of input")]
    EndOfInput,
}

impl From<BadUnicode> for ReplError {
    fn from(value: BadUnicode) -> Self {
        let BadUnicode(code) = value;
        Self::BadUnicode(code)
    }
}
