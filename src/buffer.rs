//! The growable, arena-backed input buffer.
//!
//! Ported from the source's `String` (`examples/original_source/src/string.h`):
//! a contiguous byte buffer that grows by doubling into fresh arena
//! allocations, never freeing the old region in place. ASCII-only per the
//! UTF-8 non-goal — each buffer byte is one character.

use crate::arena::Arena;

/// A contiguous, arena-backed, growable byte buffer.
pub struct TextBuffer<'a> {
    arena: &'a Arena,
    data: &'a mut [u8],
    len: usize,
}

impl<'a> TextBuffer<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena, data: &mut [], len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // SAFETY / invariant: only ASCII bytes are ever inserted (see module
        // docs); ASCII is valid UTF-8 byte-for-byte.
        std::str::from_utf8(self.as_bytes()).expect("buffer must stay ASCII")
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Rewinds the backing arena and drops this buffer's claim on it.
    /// Unlike [`TextBuffer::clear`], this actually reclaims the bytes:
    /// the next write reallocates from the start of the arena instead of
    /// growing past whatever this buffer had already claimed. Only safe to
    /// call once nothing still borrows this buffer's contents (i.e. after
    /// a completed statement's source has already been copied out).
    pub fn reset_arena(&mut self) {
        self.arena.reset();
        self.data = &mut [];
        self.len = 0;
    }

    /// Doubling growth policy: `cap + max(cap, requested)`, matching
    /// `StringEnsureAdditional`.
    fn ensure_additional(&mut self, additional: usize) {
        let cap = self.data.len();
        let remaining = cap - self.len;
        if remaining >= additional {
            return;
        }
        let additional_cap = if cap != 0 { cap } else { 64 }.max(additional);
        let new_cap = cap + additional_cap;
        let new_data = self.arena.alloc_bytes(new_cap);
        new_data[..self.len].copy_from_slice(&self.data[..self.len]);
        self.data = new_data;
    }

    pub fn append_char(&mut self, c: char) {
        assert!(c.is_ascii(), "non-ASCII input is out of scope");
        self.ensure_additional(1);
        self.data[self.len] = c as u8;
        self.len += 1;
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.ensure_additional(bytes.len());
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    pub fn insert_at(&mut self, index: usize, c: char) {
        assert!(index <= self.len);
        assert!(c.is_ascii(), "non-ASCII input is out of scope");
        if index == self.len {
            self.append_char(c);
            return;
        }
        self.ensure_additional(1);
        self.data.copy_within(index..self.len, index + 1);
        self.data[index] = c as u8;
        self.len += 1;
    }

    pub fn insert_bytes_at(&mut self, index: usize, bytes: &[u8]) {
        assert!(index <= self.len);
        if bytes.is_empty() {
            return;
        }
        if index == self.len {
            self.append(bytes);
            return;
        }
        self.ensure_additional(bytes.len());
        self.data.copy_within(index..self.len, index + bytes.len());
        self.data[index..index + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Removes and returns the byte at `index`.
    pub fn remove_at(&mut self, index: usize) -> char {
        assert!(index < self.len);
        let c = self.data[index] as char;
        self.data.copy_within(index + 1..self.len, index);
        self.len -= 1;
        c
    }

    pub fn pop(&mut self) -> Option<char> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.data[self.len] as char)
    }

    pub fn slice_from(&self, from: usize) -> &str {
        assert!(from <= self.len);
        std::str::from_utf8(&self.data[from..self.len]).expect("buffer must stay ASCII")
    }

    pub fn slice_to(&self, to: usize) -> &str {
        assert!(to <= self.len);
        std::str::from_utf8(&self.data[..to]).expect("buffer must stay ASCII")
    }

    pub fn slice(&self, from: usize, to: usize) -> &str {
        assert!(from <= to && to <= self.len);
        std::str::from_utf8(&self.data[from..to]).expect("buffer must stay ASCII")
    }

    /// Index of the `n`-th occurrence (1-based) of `needle`, or `len()` if
    /// there is no such occurrence. Mirrors `StringSearchNth`.
    pub fn search_nth(&self, needle: u8, mut n: usize) -> usize {
        let mut idx = 0;
        while idx < self.len && n != 0 {
            if self.data[idx] == needle {
                n -= 1;
            }
            if n == 0 {
                break;
            }
            idx += 1;
        }
        idx
    }

    /// Index just past the `n`-th occurrence of `needle`, or the scan
    /// position reached without finding it. Mirrors `StringSearchNthAddOne`.
    pub fn search_nth_plus_one(&self, needle: u8, mut n: usize) -> usize {
        let mut idx = 0;
        while idx < self.len && n != 0 {
            if self.data[idx] == needle {
                n -= 1;
            }
            if n == 0 {
                return idx + 1;
            }
            idx += 1;
        }
        idx
    }

    /// The `n`-th (0-based) logical line as a view, half-open and
    /// contiguous with its neighbors. Mirrors `StringNthLine`.
    pub fn nth_line(&self, n: usize) -> &str {
        let start = self.search_nth_plus_one(b'\n', n);
        let end = self.search_nth(b'\n', n + 1);
        self.slice(start, end)
    }

    /// Line count, not including a trailing empty line. Mirrors
    /// `StringLineCount`.
    pub fn line_count(&self) -> usize {
        let mut num_lines = 0;
        let mut start = 0;
        loop {
            let end = self.search_nth(b'\n', num_lines + 1);
            if start >= end || end - start <= 1 {
                break;
            }
            start = end;
            num_lines += 1;
        }
        num_lines
    }

    pub fn count(&self, needle: u8) -> usize {
        self.as_bytes().iter().filter(|&&b| b == needle).count()
    }

    pub fn is_whitespace(&self) -> bool {
        self.as_bytes().iter().all(|b| b.is_ascii_whitespace())
    }

    pub fn ends_with(&self, c: char) -> bool {
        self.data[..self.len].last().is_some_and(|&b| b as char == c)
    }

    pub fn right_trim(&self) -> &str {
        let mut trimmed = self.len;
        while trimmed > 0 && (self.data[trimmed - 1] as char).is_whitespace() {
            trimmed -= 1;
        }
        self.slice_to(trimmed)
    }

    /// True iff the right-trimmed buffer does not end in `:` or `\`.
    /// Ported from `StringIsPyTerminated` for parity; the engine's actual
    /// completion decision does not use this (see SPEC_FULL §9a).
    pub fn is_python_terminated(&self) -> bool {
        let trimmed = self.right_trim();
        !(trimmed.ends_with(':') || trimmed.ends_with('\\'))
    }
}

/// Leading-space count of `line` divided by `indent_width`. Mirrors
/// `StringIndentationLevel`.
pub fn indentation_level(line: &str, indent_width: usize) -> usize {
    let leading = line.bytes().take_while(|&b| b == b' ').count();
    leading / indent_width
}

impl std::fmt::Debug for TextBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer").field("content", &self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(arena: &Arena, s: &str) -> TextBuffer<'_> {
        let mut b = TextBuffer::new(arena);
        b.append(s.as_bytes());
        b
    }

    #[test]
    fn append_and_insert() {
        let arena = Arena::new(4096);
        let mut b = buf(&arena, "helloworld");
        b.insert_at(5, ' ');
        assert_eq!(b.as_str(), "hello world");
    }

    #[test]
    fn remove_and_pop() {
        let arena = Arena::new(4096);
        let mut b = buf(&arena, "abc");
        assert_eq!(b.pop(), Some('c'));
        assert_eq!(b.as_str(), "ab");
        assert_eq!(b.remove_at(0), 'a');
        assert_eq!(b.as_str(), "b");
    }

    #[test]
    fn nth_line_and_line_count_l3() {
        let arena = Arena::new(4096);
        let b = buf(&arena, "if x:\n    print(x)\n");
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.nth_line(0), "if x:");
        assert_eq!(b.nth_line(1), "    print(x)");

        // L3: nth_line covers the buffer exactly, half-open and contiguous.
        let mut reconstructed = String::new();
        for n in 0..=b.count(b'\n') {
            if n > 0 {
                reconstructed.push('\n');
            }
            reconstructed.push_str(b.nth_line(n));
        }
        assert_eq!(reconstructed, "if x:\n    print(x)\n");
    }

    #[test]
    fn indentation_level_steps_of_four() {
        assert_eq!(indentation_level("        x = 1", 4), 2);
        assert_eq!(indentation_level("x = 1", 4), 0);
    }

    #[test]
    fn is_python_terminated_checks_colon_and_backslash() {
        let arena = Arena::new(4096);
        assert!(!buf(&arena, "if x:  ").is_python_terminated());
        assert!(!buf(&arena, "x = 1 \\").is_python_terminated());
        assert!(buf(&arena, "x = 1").is_python_terminated());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let arena = Arena::new(1 << 20);
        let mut b = TextBuffer::new(&arena);
        for _ in 0..1000 {
            b.append_char('x');
        }
        assert_eq!(b.len(), 1000);
        assert!(b.as_str().chars().all(|c| c == 'x'));
    }
}
