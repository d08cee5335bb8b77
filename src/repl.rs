//! The top-level REPL driver (SPEC_FULL §6).
//!
//! Shape is ported from the teacher's `prebaked::read_and_mut`: a `Repline`
//! plus a caller-supplied closure, looped until `Ctrl+C` or a error. Here
//! the closure becomes the [`crate::executor::Executor`] trait, the
//! `Repline` becomes [`Decoder`] + [`Editor`], and the `Response` control
//! codes are replaced by [`crate::editor::EditOutcome`] plus the
//! completion/interrupt/eof branches already encoded in `ReplError`.

use std::io::{self, Write};

use crate::arena::Arena;
use crate::config::ReplConfig;
use crate::editor::{EditOutcome, Editor};
use crate::error::{ReplError, ReplResult};
use crate::event::Decoder;
use crate::executor::Executor;
use crate::render;

/// Owns the input decoder, editing engine, and statement sink; drives one
/// interactive session end to end.
pub struct Repl<'a, R, X> {
    decoder: Decoder<R>,
    editor: Editor<'a>,
    executor: X,
}

impl<'a, R: io::Read, X: Executor> Repl<'a, R, X> {
    pub fn new(input: R, input_arena: &'a Arena, history_arena: &'a Arena, config: ReplConfig, executor: X) -> Self {
        Self { decoder: Decoder::new(input), editor: Editor::new(input_arena, history_arena, config), executor }
    }

    /// Runs until EOF on an empty buffer or an unrecoverable I/O error.
    /// Enables raw mode for the duration via [`crate::raw::raw`].
    pub fn run(&mut self) -> ReplResult<()> {
        let _raw = crate::raw::raw()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render::render_current_line(&self.editor, &mut out)?;

        loop {
            let event = self.decoder.next_event()?;
            match self.editor.handle_event(event) {
                Ok((EditOutcome::Continue, hint)) => render::apply(hint, &self.editor, &mut out)?,
                Ok((EditOutcome::Complete(source), _hint)) => {
                    // The screen already shows the completed source exactly as
                    // typed; `Editor::newline` has already cleared its buffer
                    // for the next statement, so there is nothing left to
                    // repaint on the line we're leaving. Just advance past it.
                    write!(out, "\r\n")?;
                    out.flush()?;
                    self.run_statement(source.trim_end_matches('\n'), &mut out)?;
                    render::render_current_line(&self.editor, &mut out)?;
                }
                Err(ReplError::Interrupt(_)) => {
                    write!(out, "\r\n")?;
                    self.editor.reset();
                    render::render_current_line(&self.editor, &mut out)?;
                }
                Err(ReplError::Eof(buffer)) if buffer.trim().is_empty() => {
                    write!(out, "\r\n")?;
                    out.flush()?;
                    return Ok(());
                }
                Err(ReplError::Eof(_)) => {
                    write!(out, "\r\n")?;
                    self.editor.reset();
                    render::render_current_line(&self.editor, &mut out)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn run_statement<W: Write>(&mut self, source: &str, out: &mut W) -> ReplResult<()> {
        if let Err(e) = self.executor.execute(source) {
            log::warn!("statement execution failed: {e}");
            write!(out, "\x1b[91m{e}\x1b[0m\r\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::NullExecutor;

    #[test]
    fn runs_until_eof_on_empty_buffer() {
        let input_arena = Arena::new(4096);
        let history_arena = Arena::new(4096);
        let input = "x = 1\n\x04".as_bytes();
        let mut repl = Repl::new(input, &input_arena, &history_arena, ReplConfig::default(), NullExecutor);
        // `run` drives raw mode and stdout directly; exercise the decode/
        // editor wiring without a real terminal by stepping the same path
        // `run` takes, one event at a time.
        loop {
            let event = repl.decoder.next_event().unwrap();
            match repl.editor.handle_event(event) {
                Ok(_) => continue,
                Err(ReplError::Eof(buffer)) => {
                    assert!(buffer.trim().is_empty());
                    break;
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }
}
