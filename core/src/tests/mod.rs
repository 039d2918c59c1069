mod default_input;
mod lifecycle;
mod proptest_fsm;

use crate::backend::{BackendCommand, PhoneticBackend};
use crate::context::ImeContext;
use crate::host::Host;
use crate::keysym::ModifierMask;
use crate::properties::{Property, PropertyId};
use crate::{ChewingEngine, Config};

/// Backend double that records every command.
///
/// Characters are appended to the preedit; while choices are pending a
/// character picks a candidate instead. Enter moves the preedit to the
/// commit buffer. Tests steer the rest through the public fields.
#[derive(Debug, Default)]
pub(super) struct RecordingBackend {
    pub chinese: bool,
    pub full: bool,
    pub easy_symbol: bool,
    pub incomplete: bool,
    pub preedit: String,
    pub choices: usize,
    pub per_page: usize,
    pub commit: Option<String>,
    pub commands: Vec<BackendCommand>,
    /// Chinese mode at the time of each `Default` command.
    pub default_modes: Vec<bool>,
    pub easy_symbol_calls: Vec<bool>,
    pub configured: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self { chinese: true, per_page: 10, ..Self::default() }
    }

    /// Put the backend in a state with `preedit` composed.
    pub fn composing(mut self, preedit: &str) -> Self {
        self.preedit = preedit.to_string();
        self
    }

    pub fn selecting(mut self, preedit: &str, choices: usize) -> Self {
        self.preedit = preedit.to_string();
        self.choices = choices;
        self
    }
}

impl PhoneticBackend for RecordingBackend {
    fn chinese_mode(&self) -> bool {
        self.chinese
    }

    fn set_chinese_mode(&mut self, chinese: bool) {
        self.chinese = chinese;
    }

    fn full_shape(&self) -> bool {
        self.full
    }

    fn set_full_shape(&mut self, full: bool) {
        self.full = full;
    }

    fn set_easy_symbol_input(&mut self, on: bool) {
        self.easy_symbol = on;
        self.easy_symbol_calls.push(on);
    }

    fn handle(&mut self, command: BackendCommand) {
        self.commands.push(command);
        match command {
            BackendCommand::Default(sym) => {
                self.default_modes.push(self.chinese);
                if self.choices > 0 {
                    self.choices = 0;
                } else if let Some(ch) = char::from_u32(sym) {
                    self.preedit.push(ch);
                }
            }
            BackendCommand::Enter => {
                if !self.preedit.is_empty() {
                    self.commit = Some(std::mem::take(&mut self.preedit));
                }
                self.choices = 0;
            }
            BackendCommand::ShiftSpace => self.full = !self.full,
            BackendCommand::CapsLock => self.chinese = !self.chinese,
            _ => {}
        }
    }

    fn cand_per_page(&self) -> usize {
        self.per_page
    }

    fn total_choice(&self) -> usize {
        self.choices
    }

    fn has_incomplete_syllable(&self) -> bool {
        self.incomplete
    }

    fn preedit(&self) -> String {
        self.preedit.clone()
    }

    fn cursor(&self) -> usize {
        self.preedit.chars().count()
    }

    fn candidates(&self) -> Vec<String> {
        (0..self.choices.min(self.per_page)).map(|i| format!("cand{}", i)).collect()
    }

    fn take_commit(&mut self) -> Option<String> {
        self.commit.take()
    }

    fn commit_preedit(&mut self) {
        if !self.preedit.is_empty() {
            self.commit = Some(std::mem::take(&mut self.preedit));
        }
        self.choices = 0;
    }

    fn reset(&mut self) {
        self.preedit.clear();
        self.choices = 0;
        self.commit = None;
    }

    fn configure(&mut self, config: &Config) {
        self.per_page = config.cand_per_page as usize;
        self.configured += 1;
    }
}

/// Host double that records what the engine asked of it.
#[derive(Debug, Default)]
pub(super) struct RecordingHost {
    pub commits: Vec<String>,
    pub displays: Vec<ImeContext>,
    pub registered: Vec<PropertyId>,
    pub refreshed: Vec<Property>,
    pub caps_led: bool,
    pub led_requests: Vec<bool>,
}

impl RecordingHost {
    pub fn refreshed_ids(&self) -> Vec<PropertyId> {
        self.refreshed.iter().map(|p| p.id).collect()
    }
}

impl Host for RecordingHost {
    fn commit_text(&mut self, text: &str) {
        self.commits.push(text.to_string());
    }

    fn update_display(&mut self, context: &ImeContext) {
        self.displays.push(context.clone());
    }

    fn register_properties(&mut self, properties: &[Property]) {
        self.registered = properties.iter().map(|p| p.id).collect();
    }

    fn refresh_property(&mut self, property: &Property) {
        self.refreshed.push(property.clone());
    }

    fn caps_lock_led(&self) -> bool {
        self.caps_led
    }

    fn set_caps_lock_led(&mut self, on: bool) {
        self.caps_led = on;
        self.led_requests.push(on);
    }
}

pub(super) type TestEngine = ChewingEngine<RecordingBackend, RecordingHost>;

pub(super) fn engine_with(backend: RecordingBackend, config: Config) -> TestEngine {
    let mut engine = ChewingEngine::new(backend, RecordingHost::default(), config);
    // Derive the sub-mode from the prepared backend state.
    engine.update();
    engine.host_mut().displays.clear();
    engine
}

pub(super) fn engine(backend: RecordingBackend) -> TestEngine {
    engine_with(backend, Config::default())
}

/// Keycode 0 has no US keymap entry, so the keysym is used as given.
pub(super) const NO_KEYCODE: u32 = 0;

pub(super) fn press(engine: &mut TestEngine, keysym: u32) -> bool {
    engine.process_key_event(keysym, NO_KEYCODE, ModifierMask::empty())
}

pub(super) fn press_with(engine: &mut TestEngine, keysym: u32, modifiers: ModifierMask) -> bool {
    engine.process_key_event(keysym, NO_KEYCODE, modifiers)
}

pub(super) fn release(engine: &mut TestEngine, keysym: u32, modifiers: ModifierMask) -> bool {
    engine.process_key_event(keysym, NO_KEYCODE, modifiers | ModifierMask::RELEASE)
}
