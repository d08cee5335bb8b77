//! The editing engine (SPEC_FULL §4.4): turns [`Event`]s into buffer
//! mutations, independent of any terminal I/O.
//!
//! The teacher's own `Editor` fuses state and rendering into one type
//! built around a head/tail `VecDeque<char>` split. That model has no
//! notion of row/column or statement completion, so it is replaced
//! outright here; what survives from the teacher is the shape of the
//! operations (`push`/`pop`/`restore`/`erase_word` become `Char`/
//! `Backspace`/history-recall/`Tab` handling) and the event-driven style.
//! Rendering moves to [`crate::render`], which reads this type's state
//! through plain accessors instead of writing directly to a terminal.

use crate::arena::Arena;
use crate::buffer::{indentation_level, TextBuffer};
use crate::config::ReplConfig;
use crate::cursor::Cursor;
use crate::error::{ReplError, ReplResult};
use crate::event::Event;
use crate::history::History;

/// What happened as a result of handling one [`Event`].
#[derive(Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The statement is still being edited.
    Continue,
    /// A complete statement is ready to execute.
    Complete(String),
}

/// What the renderer needs to repaint after an event, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    /// Nothing visible changed.
    None,
    /// Only the current line (and the cursor's column within it) changed.
    CurrentLine,
    /// The current line changed and lines below it shifted too.
    CurrentAndBelow,
    /// History recall: repaint everything from the top. Carries the screen
    /// row the cursor sat on before this event, so the renderer knows how
    /// far up to move before clearing.
    FullRepaint(usize),
}

/// Owns the input buffer, cursor, and history ring, and applies events to
/// them. Has no knowledge of stdout; [`crate::render`] drives the terminal
/// from this type's public accessors.
pub struct Editor<'a> {
    config: ReplConfig,
    buffer: TextBuffer<'a>,
    cursor: Cursor,
    history: History<'a>,
    /// `Some(i)` while arrow-recalling history entry `i`; `None` while
    /// editing live input.
    nav_index: Option<usize>,
    /// The live buffer as it stood just before history navigation began,
    /// restored when arrow-down walks forward past the newest entry.
    saved_live: Option<String>,
}

impl<'a> Editor<'a> {
    pub fn new(input_arena: &'a Arena, history_arena: &'a Arena, config: ReplConfig) -> Self {
        let history = History::new(history_arena, config.history_capacity);
        Self {
            config,
            buffer: TextBuffer::new(input_arena),
            cursor: Cursor::ORIGIN,
            history,
            nav_index: None,
            saved_live: None,
        }
    }

    pub fn buffer(&self) -> &TextBuffer<'a> {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn history(&self) -> &History<'a> {
        &self.history
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    fn last_row(&self) -> usize {
        self.buffer.count(b'\n')
    }

    /// Discards the current statement in progress, keeping history intact.
    /// Used by the REPL driver after [`crate::error::ReplError::Interrupt`].
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = Cursor::ORIGIN;
        self.nav_index = None;
        self.saved_live = None;
    }

    pub fn handle_event(&mut self, event: Event) -> ReplResult<(EditOutcome, RenderHint)> {
        match event {
            Event::None => {
                log::debug!("dropped unrecognized input event");
                Ok((EditOutcome::Continue, RenderHint::None))
            }
            Event::Eof => Err(ReplError::Eof(self.buffer.as_str().to_string())),
            Event::Interrupt => Err(ReplError::Interrupt(self.buffer.as_str().to_string())),
            Event::Char(c) => Ok(self.insert_char(c)),
            Event::Tab => Ok(self.insert_indent()),
            Event::NewLine => Ok(self.newline()),
            Event::Backspace => Ok(self.backspace()),
            Event::ArrowLeft => Ok(self.arrow_left()),
            Event::ArrowRight => Ok(self.arrow_right()),
            Event::ArrowUp => Ok(self.arrow_up()),
            Event::ArrowDown => Ok(self.arrow_down()),
        }
    }

    fn insert_char(&mut self, c: char) -> (EditOutcome, RenderHint) {
        let offset = self.cursor.offset(&self.buffer);
        self.buffer.insert_at(offset, c);
        self.cursor.col += 1;
        (EditOutcome::Continue, RenderHint::CurrentLine)
    }

    fn insert_indent(&mut self) -> (EditOutcome, RenderHint) {
        let offset = self.cursor.offset(&self.buffer);
        for i in 0..self.config.indent_width {
            self.buffer.insert_at(offset + i, ' ');
        }
        self.cursor.col += self.config.indent_width;
        (EditOutcome::Continue, RenderHint::CurrentLine)
    }

    fn newline(&mut self) -> (EditOutcome, RenderHint) {
        let row = self.cursor.row;
        let offset = self.cursor.offset(&self.buffer);
        let line_before = self.buffer.nth_line(row).to_string();
        let last_row_before = self.last_row();
        let base_indent = indentation_level(&line_before, self.config.indent_width);

        let whitespace_line = line_before.trim().is_empty();
        let at_last_line = row >= last_row_before;
        let complete_blank = whitespace_line && at_last_line;
        let complete_dedent = base_indent == 0 && !line_before.trim_end().ends_with(':');

        if complete_blank || complete_dedent {
            // The statement is finished: the line that just ended (or, if
            // it was blank, everything up to it) is the accumulated
            // source. Neither the trailing newline nor a terminating
            // blank line belongs in what gets executed.
            let source = if complete_blank {
                self.buffer.slice_to(Cursor::line_start(&self.buffer, row)).to_string()
            } else {
                self.buffer.as_str().to_string()
            };
            self.history.push(source.trim_end());
            self.buffer.reset_arena();
            self.cursor = Cursor::ORIGIN;
            self.nav_index = None;
            self.saved_live = None;
            return (EditOutcome::Complete(source), RenderHint::CurrentLine);
        }

        let mut indent = base_indent;
        let char_before = (offset > 0).then(|| self.buffer.as_bytes()[offset - 1] as char);
        if char_before == Some(':') {
            indent += 1;
        }

        self.buffer.insert_at(offset, '\n');
        let spaces = indent * self.config.indent_width;
        for i in 0..spaces {
            self.buffer.insert_at(offset + 1 + i, ' ');
        }
        self.cursor = Cursor { row: row + 1, col: spaces };

        let hint = if last_row_before > row { RenderHint::CurrentAndBelow } else { RenderHint::CurrentLine };
        (EditOutcome::Continue, hint)
    }

    fn backspace(&mut self) -> (EditOutcome, RenderHint) {
        if self.buffer.is_empty() || (self.cursor.row == 0 && self.cursor.col == 0) {
            return (EditOutcome::Continue, RenderHint::None);
        }
        let offset = self.cursor.offset(&self.buffer);

        let indent_width = self.config.indent_width;
        if self.cursor.col >= indent_width {
            let line = self.buffer.nth_line(self.cursor.row);
            let prefix = &line[..self.cursor.col];
            if prefix.ends_with(&" ".repeat(indent_width)) {
                let mut at = offset;
                for _ in 0..indent_width {
                    self.buffer.remove_at(at - 1);
                    at -= 1;
                }
                self.cursor.col -= indent_width;
                return (EditOutcome::Continue, RenderHint::CurrentLine);
            }
        }

        self.buffer.remove_at(offset - 1);
        if self.cursor.col == 0 {
            let prev_row = self.cursor.row - 1;
            let prev_len = Cursor::line_len(&self.buffer, prev_row);
            self.cursor = Cursor { row: prev_row, col: prev_len };
            (EditOutcome::Continue, RenderHint::CurrentAndBelow)
        } else {
            self.cursor.col -= 1;
            (EditOutcome::Continue, RenderHint::CurrentLine)
        }
    }

    fn arrow_left(&mut self) -> (EditOutcome, RenderHint) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = Cursor::line_len(&self.buffer, self.cursor.row);
        }
        (EditOutcome::Continue, RenderHint::CurrentLine)
    }

    fn arrow_right(&mut self) -> (EditOutcome, RenderHint) {
        if self.cursor.col < Cursor::line_len(&self.buffer, self.cursor.row) {
            self.cursor.col += 1;
        }
        (EditOutcome::Continue, RenderHint::CurrentLine)
    }

    fn arrow_up(&mut self) -> (EditOutcome, RenderHint) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.cursor.col.min(Cursor::line_len(&self.buffer, self.cursor.row));
            return (EditOutcome::Continue, RenderHint::CurrentLine);
        }
        if self.history.is_empty() {
            return (EditOutcome::Continue, RenderHint::None);
        }
        let target = match self.nav_index {
            None => {
                self.saved_live = Some(self.buffer.as_str().to_string());
                self.history.len() - 1
            }
            Some(0) => return (EditOutcome::Continue, RenderHint::None),
            Some(i) => i - 1,
        };
        let from_row = self.cursor.row;
        self.recall(target);
        (EditOutcome::Continue, RenderHint::FullRepaint(from_row))
    }

    fn arrow_down(&mut self) -> (EditOutcome, RenderHint) {
        if self.cursor.row < self.last_row() {
            self.cursor.row += 1;
            self.cursor.col = self.cursor.col.min(Cursor::line_len(&self.buffer, self.cursor.row));
            return (EditOutcome::Continue, RenderHint::CurrentLine);
        }
        let Some(i) = self.nav_index else {
            return (EditOutcome::Continue, RenderHint::None);
        };
        let from_row = self.cursor.row;
        if i + 1 < self.history.len() {
            self.recall(i + 1);
        } else {
            let live = self.saved_live.take().unwrap_or_default();
            self.buffer.clear();
            self.buffer.append(live.as_bytes());
            let row = self.last_row();
            self.cursor = Cursor { row, col: Cursor::line_len(&self.buffer, row) };
            self.nav_index = None;
        }
        (EditOutcome::Continue, RenderHint::FullRepaint(from_row))
    }

    fn recall(&mut self, index: usize) {
        let entry = self.history.get(index).unwrap_or("").trim_end().to_string();
        self.buffer.clear();
        self.buffer.append(entry.as_bytes());
        self.nav_index = Some(index);
        let row = self.last_row();
        self.cursor = Cursor { row, col: Cursor::line_len(&self.buffer, row) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_editor<'a>(input: &'a Arena, history: &'a Arena) -> Editor<'a> {
        Editor::new(input, history, ReplConfig::default())
    }

    #[test]
    fn typing_advances_cursor() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        ed.handle_event(Event::Char('x')).unwrap();
        ed.handle_event(Event::Char('=')).unwrap();
        assert_eq!(ed.buffer().as_str(), "x=");
        assert_eq!(ed.cursor(), Cursor { row: 0, col: 2 });
    }

    #[test]
    fn simple_statement_completes_on_newline() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "x = 1".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        let (outcome, _) = ed.handle_event(Event::NewLine).unwrap();
        assert_eq!(outcome, EditOutcome::Complete("x = 1".to_string()));
        assert_eq!(ed.buffer().as_str(), "");
    }

    #[test]
    fn colon_continues_and_auto_indents() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "if x:".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        let (outcome, _) = ed.handle_event(Event::NewLine).unwrap();
        assert_eq!(outcome, EditOutcome::Continue);
        assert_eq!(ed.buffer().as_str(), "if x:\n    ");
        assert_eq!(ed.cursor(), Cursor { row: 1, col: 4 });
    }

    #[test]
    fn blank_line_completes_block() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "if x:".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        for c in "pass".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        let (outcome, _) = ed.handle_event(Event::NewLine).unwrap();
        assert_eq!(outcome, EditOutcome::Complete("if x:\n    pass\n".to_string()));
    }

    #[test]
    fn backspace_removes_whole_indent_step() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "if x:".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:\n    ");
        ed.handle_event(Event::Backspace).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:\n");
        assert_eq!(ed.cursor(), Cursor { row: 1, col: 0 });
    }

    #[test]
    fn backspace_on_plain_text_removes_one_char() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "if x:".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        ed.handle_event(Event::Char('y')).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:\n    y");
        ed.handle_event(Event::Backspace).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:\n    ");
        assert_eq!(ed.cursor(), Cursor { row: 1, col: 4 });
    }

    #[test]
    fn backspace_past_an_emptied_indent_joins_previous_line() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "if x:".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        ed.handle_event(Event::Backspace).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:\n");
        ed.handle_event(Event::Backspace).unwrap();
        assert_eq!(ed.buffer().as_str(), "if x:");
        assert_eq!(ed.cursor(), Cursor { row: 0, col: 5 });
    }

    #[test]
    fn arrow_up_then_down_is_symmetric() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        for c in "a = 1".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::NewLine).unwrap();
        for c in "b".chars() {
            ed.handle_event(Event::Char(c)).unwrap();
        }
        ed.handle_event(Event::ArrowUp).unwrap();
        assert_eq!(ed.buffer().as_str(), "a = 1");
        ed.handle_event(Event::ArrowDown).unwrap();
        assert_eq!(ed.buffer().as_str(), "b");
    }

    #[test]
    fn interrupt_and_eof_carry_buffer_contents() {
        let (input, history) = (Arena::new(4096), Arena::new(4096));
        let mut ed = new_editor(&input, &history);
        ed.handle_event(Event::Char('x')).unwrap();
        match ed.handle_event(Event::Interrupt) {
            Err(ReplError::Interrupt(s)) => assert_eq!(s, "x"),
            other => panic!("expected Interrupt, got {other:?}"),
        }
    }
}
