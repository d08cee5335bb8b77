//! Sets the terminal to [`raw`] mode for the duration of the returned object's lifetime.

use crate::error::{ReplError, ReplResult};

/// Sets the terminal to raw mode for the duration of the returned object's
/// lifetime. Unlike the teacher's version (which `expect()`s), setup
/// failure is surfaced as `ReplError::Terminal` per the "no panics that
/// aren't bugs" error taxonomy — only `disable_raw_mode` on drop still
/// panics, since there is no caller left to hand a `Result` to at that
/// point.
pub fn raw() -> ReplResult<impl Drop> {
    std::thread::yield_now();
    crossterm::terminal::enable_raw_mode().map_err(ReplError::Terminal)?;
    Ok(Raw())
}

/// Internal [`Drop`] object for [`raw`]
struct Raw();

impl Drop for Raw {
    fn drop(&mut self) {
        crossterm::terminal::disable_raw_mode()
            .expect("should be able to transition out of raw mode");
    }
}
