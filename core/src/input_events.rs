//! Key and mouse event routing.
//!
//! Every key event is first normalized against the US keymap, then
//! dispatched on the pair (modifier state, keysym). Navigation keys belong to
//! the application while nothing is composed (`InputMode::Bypass`) and to the
//! backend otherwise.

use crate::backend::{BackendCommand, PhoneticBackend};
use crate::engine::{ChewingEngine, KeyResult};
use crate::host::Host;
use crate::keymap::normalize_keysym;
use crate::keysym::*;
use crate::properties::PropertyId;
use crate::session::{ChewingFlags, InputMode, StatusFlags};

use KeyResult::{Handled, NotHandled};

impl<B: PhoneticBackend, H: Host> ChewingEngine<B, H> {
    /// Route one key event. Returns `true` if the engine consumed it.
    pub fn process_key_event(&mut self, keysym: u32, keycode: u32, modifiers: ModifierMask) -> bool {
        self.log.msg(format_args!(
            "* process_key_event(-,{:x}({}),{:x},{:x}) {}",
            keysym,
            key_name(keysym),
            keycode,
            modifiers.bits(),
            modifiers_to_string(modifiers)
        ));
        if self.session.is_password() {
            return false;
        }
        let sym = normalize_keysym(
            keysym,
            keycode,
            modifiers,
            self.session.uses_system_layout(),
            self.backend.chinese_mode(),
        );

        let result = if modifiers.is_release() {
            self.process_release(sym)
        } else {
            self.log.msg(format_args!(
                "* process_key_event() sym={:x}({}) keysym={:x}({}) ... continue",
                sym,
                key_name(sym),
                keysym,
                key_name(keysym)
            ));
            self.process_press(sym, modifiers.dispatch_state())
        };

        match result {
            Handled => {
                self.update();
                true
            }
            NotHandled => false,
        }
    }

    /// Releases only matter for a Shift tap, which toggles Chinese/English.
    fn process_release(&mut self, sym: u32) -> KeyResult {
        if kp_to_normal(sym).is_some() || !is_shift(sym) || self.session.key_last() != sym {
            return NotHandled;
        }
        self.finish_incomplete_syllable();
        let chinese = !self.backend.chinese_mode();
        self.backend.set_chinese_mode(chinese);
        self.log.info(format_args!("shift tap: chinese={}", chinese));
        self.refresh_property(PropertyId::ChiEng);
        self.session.clear_key_last();
        Handled
    }

    fn process_press(&mut self, sym: u32, state: ModifierMask) -> KeyResult {
        self.session.set_key_last(sym);
        if state.is_empty() {
            self.press_plain(sym)
        } else if state == ModifierMask::SHIFT {
            self.press_shift(sym)
        } else if state == ModifierMask::CONTROL {
            self.press_control(sym)
        } else {
            NotHandled
        }
    }

    fn press_plain(&mut self, sym: u32) -> KeyResult {
        if let Some(normal) = kp_to_normal(sym) {
            self.log.info(format_args!("* process_key_event(): {:x} is from keypad.", normal));
            if self.session.has_flag(ChewingFlags::NUMPAD_ALWAYS_NUMBER) && self.backend.chinese_mode() {
                self.backend.set_chinese_mode(false);
                self.handle_default(normal, false);
                self.backend.set_chinese_mode(true);
            } else {
                self.handle_default(normal, false);
            }
            return Handled;
        }

        match sym {
            RETURN | KP_ENTER => self.enter(),
            ESCAPE => self.unless_bypass(BackendCommand::Esc),
            BACKSPACE => self.unless_bypass(BackendCommand::Backspace),
            DELETE | KP_DELETE => self.unless_bypass(BackendCommand::Delete),
            TAB => self.unless_bypass(BackendCommand::Tab),
            LEFT | KP_LEFT => self.unless_bypass(BackendCommand::Left),
            RIGHT | KP_RIGHT => self.unless_bypass(BackendCommand::Right),
            HOME | KP_HOME => self.unless_bypass(BackendCommand::Home),
            END | KP_END => self.unless_bypass(BackendCommand::End),
            PAGE_UP | KP_PAGE_UP => self.navigate_unless_bypass(Self::page_up),
            PAGE_DOWN | KP_PAGE_DOWN => self.navigate_unless_bypass(Self::page_down),
            UP | KP_UP => self.navigate_unless_bypass(Self::cursor_up),
            DOWN | KP_DOWN => self.navigate_unless_bypass(Self::cursor_down),
            SPACE | KP_SPACE => {
                self.space();
                Handled
            }
            CAPS_LOCK => {
                self.finish_incomplete_syllable();
                self.backend.handle(BackendCommand::CapsLock);
                self.refresh_property(PropertyId::ChiEng);
                Handled
            }
            // Some toolkits leak bare modifier presses.
            SHIFT_L | SHIFT_R | ALT_L | ALT_R | CONTROL_L | CONTROL_R => NotHandled,
            _ => {
                self.handle_default(sym, false);
                Handled
            }
        }
    }

    fn press_shift(&mut self, sym: u32) -> KeyResult {
        match sym {
            RETURN | KP_ENTER => self.enter(),
            LEFT => self.unless_bypass(BackendCommand::ShiftLeft),
            RIGHT => self.unless_bypass(BackendCommand::ShiftRight),
            UP | KP_UP | DOWN | KP_DOWN | PAGE_UP | KP_PAGE_UP | PAGE_DOWN | KP_PAGE_DOWN | HOME | END => {
                if self.session.needs_commit() {
                    self.force_commit();
                }
                NotHandled
            }
            SPACE | KP_SPACE => {
                self.backend.handle(BackendCommand::ShiftSpace);
                self.refresh_property(PropertyId::AlnumSize);
                Handled
            }
            0..=0x7f => {
                self.handle_default(sym, true);
                Handled
            }
            _ => NotHandled,
        }
    }

    fn press_control(&mut self, sym: u32) -> KeyResult {
        match sym {
            DIGIT_0..=DIGIT_9 => {
                self.backend.handle(BackendCommand::CtrlNum(sym));
                Handled
            }
            _ => NotHandled,
        }
    }

    fn enter(&mut self) -> KeyResult {
        self.session.set_status(StatusFlags::NEED_COMMIT, true);
        self.backend.handle(BackendCommand::Enter);
        Handled
    }

    fn unless_bypass(&mut self, command: BackendCommand) -> KeyResult {
        if self.session.mode() == InputMode::Bypass {
            return NotHandled;
        }
        self.backend.handle(command);
        Handled
    }

    fn navigate_unless_bypass(&mut self, op: fn(&mut Self)) -> KeyResult {
        if self.session.mode() == InputMode::Bypass {
            return NotHandled;
        }
        op(self);
        Handled
    }

    fn space(&mut self) {
        if self.session.has_flag(ChewingFlags::PLAIN_ZHUYIN) {
            if self.backend.total_choice() == 0 {
                self.backend.handle(BackendCommand::Space);
            }
        } else {
            // Easy symbol mode would swallow the first space otherwise.
            self.backend.set_easy_symbol_input(false);
            self.backend.handle(BackendCommand::Space);
            self.session.set_status(StatusFlags::NEED_COMMIT, true);
        }
        if matches!(
            self.session.mode(),
            InputMode::SelectionDone | InputMode::Bypass | InputMode::Editing
        ) {
            self.session.set_status(StatusFlags::NEED_COMMIT, true);
        }
    }

    /// A half-typed syllable is completed with a space before leaving
    /// Chinese mode.
    fn finish_incomplete_syllable(&mut self) {
        if self.backend.chinese_mode() && self.backend.has_incomplete_syllable() {
            self.backend.handle(BackendCommand::Space);
        }
    }

    /// Character input, shared by plain keys, shifted keys and clicks.
    pub fn handle_default(&mut self, sym: u32, shift_pressed: bool) {
        self.log.debug(format_args!(
            "handle_default(-,{:x},{}) plain_zhuyin={} mode={}",
            sym,
            shift_pressed,
            self.session.has_flag(ChewingFlags::PLAIN_ZHUYIN),
            self.session.mode().as_str()
        ));
        self.session.set_status(StatusFlags::NEED_COMMIT, true);
        if self.session.has_flag(ChewingFlags::EASY_SYMBOL_INPUT) {
            self.backend.set_easy_symbol_input(shift_pressed);
        }
        let mut sym = sym;
        if self.session.has_flag(ChewingFlags::FORCE_LOWERCASE_ENGLISH) {
            sym = force_case(sym, shift_pressed);
        }
        self.backend.handle(BackendCommand::Default(sym));

        if self.session.has_flag(ChewingFlags::PLAIN_ZHUYIN)
            && self.session.is_sel_key(self.session.key_last())
            && self.session.mode() == InputMode::Selecting
        {
            self.backend.handle(BackendCommand::Enter);
            self.session.set_mode(InputMode::SelectionDone);
        }
    }

    /// The user clicked candidate `index` of the current page.
    pub fn candidate_clicked(&mut self, index: u32, button: u32, state: u32) {
        self.log.info(format_args!("candidate_clicked({}, {}, {})", index, button, state));
        if self.session.is_password() {
            return;
        }
        let index = index as usize;
        if index >= self.backend.cand_per_page() {
            self.log.debug(format_args!("candidate_clicked() index out of range: {}", index));
            return;
        }
        let Some(sel_key) = self.session.sel_key_at(index) else {
            self.log.debug(format_args!("candidate_clicked() no selection key at {}", index));
            return;
        };
        if self.session.mode() != InputMode::Selecting {
            self.log.debug(format_args!(
                "candidate_clicked() ... Wrong mode: {}",
                self.session.mode().as_str()
            ));
            return;
        }
        self.session.set_key_last(sel_key);
        self.handle_default(sel_key, false);
        self.update();
    }
}

/// Shift alone selects the case of ASCII letters.
fn force_case(sym: u32, shift_pressed: bool) -> u32 {
    let Some(ch) = char::from_u32(sym).filter(char::is_ascii) else {
        return sym;
    };
    if ch.is_ascii_uppercase() && !shift_pressed {
        ch.to_ascii_lowercase() as u32
    } else if ch.is_ascii_lowercase() && shift_pressed {
        ch.to_ascii_uppercase() as u32
    } else {
        sym
    }
}
