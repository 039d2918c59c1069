//! Engine session state.
//!
//! The `EngineSession` struct holds what the router needs to remember between
//! key events: the sub-mode, the status flags, the last key pressed and the
//! behaviour switches derived from the settings. It owns no backend; the
//! engine pairs one session with one backend.

use bitflags::bitflags;

use crate::Config;

/// Current input sub-mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Nothing composed; navigation keys belong to the application
    #[default]
    Bypass,
    /// Preedit present, no candidate list open
    Editing,
    /// Candidate list open
    Selecting,
    /// A candidate was just accepted by its selection key
    SelectionDone,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Bypass => "bypass",
            InputMode::Editing => "editing",
            InputMode::Selecting => "selecting",
            InputMode::SelectionDone => "selection_done",
        }
    }
}

bitflags! {
    /// Engine status bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u32 {
        /// Composed text must be flushed before Shift+navigation or focus-out.
        const NEED_COMMIT = 1 << 0;
        const IS_PASSWORD = 1 << 1;
        const SYSTEM_KEYBOARD_LAYOUT = 1 << 2;
        const FOCUS_IN = 1 << 3;
    }
}

bitflags! {
    /// Behaviour switches taken from the settings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChewingFlags: u32 {
        const PLAIN_ZHUYIN = 1 << 0;
        const EASY_SYMBOL_INPUT = 1 << 1;
        const FORCE_LOWERCASE_ENGLISH = 1 << 2;
        const NUMPAD_ALWAYS_NUMBER = 1 << 3;
    }
}

impl ChewingFlags {
    pub fn from_config(config: &Config) -> Self {
        let mut flags = ChewingFlags::empty();
        flags.set(ChewingFlags::PLAIN_ZHUYIN, config.plain_zhuyin);
        flags.set(ChewingFlags::EASY_SYMBOL_INPUT, config.easy_symbol_input);
        flags.set(ChewingFlags::FORCE_LOWERCASE_ENGLISH, config.force_lowercase_english);
        flags.set(ChewingFlags::NUMPAD_ALWAYS_NUMBER, config.numpad_always_number);
        flags
    }
}

/// Router state for one input context.
#[derive(Debug, Clone, Default)]
pub struct EngineSession {
    mode: InputMode,
    status: StatusFlags,
    /// Last normalized keysym pressed; 0 when none.
    key_last: u32,
    sel_keys: Vec<char>,
    flags: ChewingFlags,
}

impl EngineSession {
    /// Create a session with the default settings.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let mut session = Self::default();
        session.apply_config(config);
        session
    }

    /// Refresh the flags and selection keys from `config`.
    pub fn apply_config(&mut self, config: &Config) {
        self.flags = ChewingFlags::from_config(config);
        self.sel_keys = config.sel_key_chars();
        self.status
            .set(StatusFlags::SYSTEM_KEYBOARD_LAYOUT, config.use_system_keyboard_layout);
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn status(&self) -> StatusFlags {
        self.status
    }

    pub fn has_status(&self, flag: StatusFlags) -> bool {
        self.status.contains(flag)
    }

    pub fn set_status(&mut self, flag: StatusFlags, on: bool) {
        self.status.set(flag, on);
    }

    pub fn needs_commit(&self) -> bool {
        self.has_status(StatusFlags::NEED_COMMIT)
    }

    pub fn is_password(&self) -> bool {
        self.has_status(StatusFlags::IS_PASSWORD)
    }

    pub fn uses_system_layout(&self) -> bool {
        self.has_status(StatusFlags::SYSTEM_KEYBOARD_LAYOUT)
    }

    pub fn flags(&self) -> ChewingFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: ChewingFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn key_last(&self) -> u32 {
        self.key_last
    }

    pub fn set_key_last(&mut self, keysym: u32) {
        self.key_last = keysym;
    }

    pub fn clear_key_last(&mut self) {
        self.key_last = 0;
    }

    pub fn sel_keys(&self) -> &[char] {
        &self.sel_keys
    }

    /// Keysym of the selection key at `index`.
    pub fn sel_key_at(&self, index: usize) -> Option<u32> {
        self.sel_keys.get(index).map(|&c| c as u32)
    }

    pub fn is_sel_key(&self, keysym: u32) -> bool {
        self.sel_keys.iter().any(|&c| c as u32 == keysym)
    }

    /// Forget the composition state; flags and selection keys stay.
    pub fn clear(&mut self) {
        self.mode = InputMode::Bypass;
        self.status.remove(StatusFlags::NEED_COMMIT);
        self.key_last = 0;
    }
}
