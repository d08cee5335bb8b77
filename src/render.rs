//! Terminal rendering (SPEC_FULL §4.5).
//!
//! Ground truth for the crossterm incantations is the teacher's
//! `Editor::{redraw,undraw,print_head,print_tail,prompt}` — this module
//! performs the same clear/reposition/reprint dance, but reads from
//! [`crate::editor::Editor`]'s buffer/cursor state instead of a head/tail
//! `VecDeque<char>`, and is parameterized over [`RenderHint`] so the
//! editing engine decides how much needs to be repainted.

use crossterm::{cursor::*, queue, style::*, terminal::*};
use std::io::Write;

use crate::config::Prompt;
use crate::editor::{Editor, RenderHint};
use crate::error::ReplResult;

fn prompt_for_row(editor: &Editor<'_>, row: usize) -> Prompt {
    if row == 0 {
        editor.config().prompt_new
    } else {
        editor.config().prompt_continue
    }
}

fn write_prompt<W: Write>(w: &mut W, prompt: Prompt) -> ReplResult<()> {
    queue!(w, Print(prompt.color), Print(prompt.text), ResetColor)?;
    Ok(())
}

/// Erases the current screen line and reprints its prompt and contents,
/// then parks the cursor at its logical column.
pub fn render_current_line<W: Write>(editor: &Editor<'_>, w: &mut W) -> ReplResult<()> {
    let cursor = editor.cursor();
    let prompt = prompt_for_row(editor, cursor.row);
    let line = editor.buffer().nth_line(cursor.row);

    queue!(w, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
    write_prompt(w, prompt)?;
    write!(w, "{line}")?;
    queue!(w, MoveToColumn((cursor.col + prompt.width()) as u16))?;
    w.flush()?;
    Ok(())
}

/// Repaints the current line and every line below it, then restores the
/// cursor to its logical row/column.
pub fn render_current_and_below<W: Write>(editor: &Editor<'_>, w: &mut W) -> ReplResult<()> {
    let cursor = editor.cursor();
    let last_row = editor.buffer().count(b'\n');

    queue!(w, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
    write_prompt(w, prompt_for_row(editor, cursor.row))?;
    write!(w, "{}", editor.buffer().nth_line(cursor.row))?;

    let mut rows_down = 0;
    for row in (cursor.row + 1)..=last_row {
        write!(w, "\r\n")?;
        queue!(w, Clear(ClearType::CurrentLine))?;
        write_prompt(w, prompt_for_row(editor, row))?;
        write!(w, "{}", editor.buffer().nth_line(row))?;
        rows_down += 1;
    }

    if rows_down > 0 {
        queue!(w, MoveUp(rows_down as u16))?;
    }
    queue!(w, MoveToColumn((cursor.col + prompt_for_row(editor, cursor.row).width()) as u16))?;
    w.flush()?;
    Ok(())
}

/// Full repaint from the top, used after history recall replaces the
/// whole buffer. `from_row` is the screen row the cursor sat on before
/// the recall, so a recall landing on a multi-line entry's last row (as
/// arrow-down's forward recall does) still erases and repaints from the
/// very top instead of just from wherever the cursor happened to be.
pub fn full_repaint<W: Write>(editor: &Editor<'_>, w: &mut W, from_row: usize) -> ReplResult<()> {
    let cursor = editor.cursor();
    let last_row = editor.buffer().count(b'\n');

    if from_row > 0 {
        queue!(w, MoveUp(from_row as u16))?;
    }
    queue!(w, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    for row in 0..=last_row {
        if row > 0 {
            write!(w, "\r\n")?;
        }
        write_prompt(w, prompt_for_row(editor, row))?;
        write!(w, "{}", editor.buffer().nth_line(row))?;
    }

    let rows_up = last_row - cursor.row;
    if rows_up > 0 {
        queue!(w, MoveUp(rows_up as u16))?;
    }
    queue!(w, MoveToColumn((cursor.col + prompt_for_row(editor, cursor.row).width()) as u16))?;
    w.flush()?;
    Ok(())
}

/// Dispatches on a [`RenderHint`] produced by [`Editor::handle_event`].
pub fn apply<W: Write>(hint: RenderHint, editor: &Editor<'_>, w: &mut W) -> ReplResult<()> {
    match hint {
        RenderHint::None => Ok(()),
        RenderHint::CurrentLine => render_current_line(editor, w),
        RenderHint::CurrentAndBelow => render_current_and_below(editor, w),
        RenderHint::FullRepaint(from_row) => full_repaint(editor, w, from_row),
    }
}
