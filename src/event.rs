//! The keystroke decoder (SPEC_FULL §4.3).
//!
//! Factored out of the teacher's `Repline::read`/`escape`/`csi`
//! (`src/repline.rs`), which inlines exactly this byte-by-byte dispatch
//! into its read loop. Here it is a standalone type that turns a byte
//! stream into [`Event`]s, leaving the editing engine free to `match` on
//! the result instead of owning the stdin reader itself.

use crate::error::{ReplError, ReplResult};
use crate::iter::chars::BadUnicode;
use std::io::{Bytes, Read};

/// An abstract input event, decoded from one or more input bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// No recognized event (dropped escape sequence, non-printable byte).
    None,
    Eof,
    Interrupt,
    NewLine,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

/// Reads bytes from `R` and classifies them into [`Event`]s. UTF-8
/// decoding follows the same bit-twiddling as the teacher's
/// `iter::chars::Chars`, but reads one underlying byte at a time so a
/// transient I/O error surfaces as `ReplError::Io` instead of the
/// teacher's `Flatten` behavior of silently treating it as end of stream.
pub struct Decoder<R: Read> {
    bytes: Bytes<R>,
}

impl<R: Read> Decoder<R> {
    pub fn new(input: R) -> Self {
        Self { bytes: input.bytes() }
    }

    fn read_byte(&mut self) -> ReplResult<Option<u8>> {
        match self.bytes.next() {
            None => Ok(None),
            Some(Ok(b)) => Ok(Some(b)),
            Some(Err(e)) => Err(ReplError::Io(e)),
        }
    }

    fn read_char(&mut self) -> ReplResult<Option<char>> {
        let Some(start) = self.read_byte()? else {
            return Ok(None);
        };
        let (mut out, count) = match start as u32 {
            start if start & 0x80 == 0x00 => (start, 0),
            start if start & 0xe0 == 0xc0 => (start & 0x1f, 1),
            start if start & 0xf0 == 0xe0 => (start & 0x0f, 2),
            start if start & 0xf8 == 0xf0 => (start & 0x07, 3),
            start => return Err(ReplError::BadUnicode(start)),
        };
        for _ in 0..count {
            let Some(cont) = self.read_byte()? else {
                return Err(ReplError::BadUnicode(out));
            };
            let cont = cont as u32;
            if cont & 0xc0 != 0x80 {
                return Err(ReplError::BadUnicode(out));
            }
            out = out << 6 | (cont & 0x3f);
        }
        char::from_u32(out).map(Some).ok_or(BadUnicode(out).into())
    }

    /// Decodes the next event. Returns `Ok(Event::Eof)` on a clean end of
    /// stream (`read` returning 0 bytes), matching §7's "treat `read`
    /// returning 0 on a line-oriented stream as `Eof`".
    pub fn next_event(&mut self) -> ReplResult<Event> {
        let Some(c) = self.read_char()? else {
            return Ok(Event::Eof);
        };
        match c {
            '\x03' => Ok(Event::Interrupt),
            '\x04' => Ok(Event::Eof),
            '\n' | '\r' => Ok(Event::NewLine),
            '\t' => Ok(Event::Tab),
            '\x08' | '\x7f' => Ok(Event::Backspace),
            '\x1b' => self.decode_escape(),
            c if c.is_ascii_control() => Ok(Event::None),
            c => Ok(Event::Char(c)),
        }
    }

    fn decode_escape(&mut self) -> ReplResult<Event> {
        let Some(bracket) = self.read_char()? else {
            return Ok(Event::None);
        };
        if bracket != '[' {
            return Ok(Event::None);
        }
        let Some(code) = self.read_char()? else {
            return Ok(Event::None);
        };
        Ok(match code {
            'A' => Event::ArrowUp,
            'B' => Event::ArrowDown,
            'C' => Event::ArrowRight,
            'D' => Event::ArrowLeft,
            _ => Event::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<Event> {
        let mut decoder = Decoder::new(input.as_bytes());
        let mut out = Vec::new();
        loop {
            match decoder.next_event().unwrap() {
                Event::Eof => break,
                other => out.push(other),
            }
        }
        out
    }

    #[test]
    fn printable_chars() {
        assert_eq!(events("ab"), vec![Event::Char('a'), Event::Char('b')]);
    }

    #[test]
    fn control_keys() {
        assert_eq!(events("\n\r\t\x08\x7f"), vec![
            Event::NewLine,
            Event::NewLine,
            Event::Tab,
            Event::Backspace,
            Event::Backspace,
        ]);
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(
            events("\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Event::ArrowUp, Event::ArrowDown, Event::ArrowRight, Event::ArrowLeft]
        );
    }

    #[test]
    fn unrecognized_escape_is_dropped() {
        assert_eq!(events("\x1b[Zx"), vec![Event::None, Event::Char('x')]);
    }

    #[test]
    fn interrupt_is_distinct_from_eof() {
        let mut decoder = Decoder::new("\x03".as_bytes());
        assert_eq!(decoder.next_event().unwrap(), Event::Interrupt);
        assert_eq!(decoder.next_event().unwrap(), Event::Eof);
    }
}
