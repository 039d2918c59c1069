//! Phonetic conversion backend contract.
//!
//! The backend owns the composition: the Zhuyin syllable being typed, the
//! converted preedit, the candidate list and the text ready to commit. The
//! engine never looks inside; it sends discrete commands and reads back the
//! state it needs to route the next key and to refresh the display.

use crate::Config;

/// One editing command sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCommand {
    Enter,
    Esc,
    Backspace,
    Delete,
    Left,
    Right,
    /// Extend the phrase selection to the left
    ShiftLeft,
    /// Extend the phrase selection to the right
    ShiftRight,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    Space,
    /// Toggle full/half-width shape
    ShiftSpace,
    CapsLock,
    /// Character input (a keysym below 0x80 for ASCII)
    Default(u32),
    /// Control+digit: add or jump to the phrase of that length
    CtrlNum(u32),
}

/// Conversion engine used by [`ChewingEngine`](crate::ChewingEngine).
///
/// Implementations are synchronous and assumed not to block.
pub trait PhoneticBackend {
    /// `true` in Chinese (phonetic) mode, `false` in English mode.
    fn chinese_mode(&self) -> bool;
    fn set_chinese_mode(&mut self, chinese: bool);

    /// `true` for full-width shape.
    fn full_shape(&self) -> bool;
    fn set_full_shape(&mut self, full: bool);

    fn set_easy_symbol_input(&mut self, on: bool);

    /// Apply one editing command.
    fn handle(&mut self, command: BackendCommand);

    /// Number of candidates shown per page.
    fn cand_per_page(&self) -> usize;

    /// Number of pending choices; non-zero while a candidate list is open.
    fn total_choice(&self) -> usize;

    /// A syllable has been started but not completed by a tone.
    fn has_incomplete_syllable(&self) -> bool;

    fn preedit(&self) -> String;

    /// Cursor position within the preedit, in characters.
    fn cursor(&self) -> usize;

    /// Candidates of the current page.
    fn candidates(&self) -> Vec<String>;

    fn aux_text(&self) -> String {
        String::new()
    }

    /// Take the text committed by the last commands, if any.
    fn take_commit(&mut self) -> Option<String>;

    /// Move the whole preedit to the commit buffer.
    fn commit_preedit(&mut self);

    /// Drop the composition.
    fn reset(&mut self);

    /// Re-read the settings that concern the backend.
    fn configure(&mut self, _config: &Config) {}
}
