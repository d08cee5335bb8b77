//! The history ring.
//!
//! Ported from the teacher's `Repline::history: VecDeque<String>` plus
//! `history_append` (`src/repline.rs`), generalized to arena-backed entries
//! per SPEC_FULL §3/§4.2. The index cursor into the ring lives on the
//! editing engine, not here (also per spec) — this type only owns the
//! entries and eviction policy.

use crate::arena::Arena;
use std::collections::VecDeque;

/// An ordered sequence of previously committed statements.
pub struct History<'a> {
    arena: &'a Arena,
    entries: VecDeque<&'a str>,
    capacity: usize,
}

impl<'a> History<'a> {
    pub fn new(arena: &'a Arena, capacity: usize) -> Self {
        Self { arena, entries: VecDeque::new(), capacity }
    }

    /// Copies `entry` into the history arena and appends it, evicting the
    /// oldest entry if `capacity` is exceeded. Skips consecutive duplicates,
    /// matching the teacher's `if !self.history.contains(&buf)` de-dup.
    pub fn push(&mut self, entry: &str) {
        if self.entries.back() == Some(&entry) {
            return;
        }
        let copy = self.arena.alloc_copy(entry.as_bytes());
        let copy = std::str::from_utf8(copy).expect("history entries must stay ASCII");
        self.entries.push_back(copy);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for History<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History").field("len", &self.len()).field("capacity", &self.capacity).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get() {
        let arena = Arena::new(4096);
        let mut h = History::new(&arena, 20);
        h.push("a = 1");
        h.push("b = 2");
        assert_eq!(h.len(), 2);
        assert_eq!(h.get(0), Some("a = 1"));
        assert_eq!(h.get(1), Some("b = 2"));
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let arena = Arena::new(1 << 16);
        let mut h = History::new(&arena, 2);
        h.push("one");
        h.push("two");
        h.push("three");
        assert_eq!(h.len(), 2);
        assert_eq!(h.get(0), Some("two"));
        assert_eq!(h.get(1), Some("three"));
    }

    #[test]
    fn skips_consecutive_duplicate() {
        let arena = Arena::new(4096);
        let mut h = History::new(&arena, 20);
        h.push("same");
        h.push("same");
        assert_eq!(h.len(), 1);
    }
}
