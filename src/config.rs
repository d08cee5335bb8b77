//! Engine configuration.
//!
//! Generalizes the teacher's positional `Repline::new(color, begin, again)`
//! constructor arguments into a named struct once auto-indent width and
//! arena/history sizing also need to be configurable (SPEC_FULL §3a).

/// A styled prompt: an ANSI color prefix plus the literal prompt text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub color: &'static str,
    pub text: &'static str,
}

impl Prompt {
    pub const fn new(color: &'static str, text: &'static str) -> Self {
        Self { color, text }
    }

    /// Printable width, excluding the ANSI style bytes.
    pub fn width(&self) -> usize {
        self.text.len()
    }
}

/// Bold bright-blue `">>> "`.
pub const PROMPT_NEW: Prompt = Prompt::new("\x1b[1m\x1b[94m", ">>> ");
/// Bold bright-black `"... "`.
pub const PROMPT_CONTINUE: Prompt = Prompt::new("\x1b[1m\x1b[90m", "... ");

#[derive(Clone, Copy, Debug)]
pub struct ReplConfig {
    pub indent_width: usize,
    pub prompt_new: Prompt,
    pub prompt_continue: Prompt,
    pub history_capacity: usize,
    pub input_arena_capacity: usize,
    pub history_arena_capacity: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            prompt_new: PROMPT_NEW,
            prompt_continue: PROMPT_CONTINUE,
            history_capacity: 1000,
            input_arena_capacity: 1 << 20,
            history_arena_capacity: 4 << 20,
        }
    }
}
