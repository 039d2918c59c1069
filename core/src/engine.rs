//! Chewing engine: one backend, one host, one session.
//!
//! `ChewingEngine` is what an input framework instantiates per input
//! context. Key events are routed in `input_events`, indicator activation in
//! `properties`; this module holds the state they share and the display
//! update that follows every handled event.

use crate::backend::{BackendCommand, PhoneticBackend};
use crate::context::{ImeContext, InputPurpose};
use crate::host::Host;
use crate::log::Logger;
use crate::properties::{NoDialog, SettingsDialog};
use crate::session::{EngineSession, InputMode, StatusFlags};
use crate::Config;

/// Result of routing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

/// Input method engine for one input context.
pub struct ChewingEngine<B: PhoneticBackend, H: Host> {
    pub(crate) backend: B,
    pub(crate) host: H,
    pub(crate) session: EngineSession,
    pub(crate) context: ImeContext,
    pub(crate) config: Config,
    pub(crate) log: Logger,
    pub(crate) dialog: Box<dyn SettingsDialog>,
}

impl<B: PhoneticBackend, H: Host> ChewingEngine<B, H> {
    pub fn new(mut backend: B, host: H, config: Config) -> Self {
        backend.configure(&config);
        let mut log = Logger::default();
        log.set_level(config.log_level);
        Self {
            backend,
            host,
            session: EngineSession::from_config(&config),
            context: ImeContext::new(),
            config,
            log,
            dialog: Box::new(NoDialog),
        }
    }

    /// Use `dialog` when the settings property is activated.
    pub fn with_settings_dialog(mut self, dialog: Box<dyn SettingsDialog>) -> Self {
        self.dialog = dialog;
        self
    }

    pub fn session(&self) -> &EngineSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EngineSession {
        &mut self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.log
    }

    /// Last display snapshot sent to the host.
    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    pub fn mode(&self) -> InputMode {
        self.session.mode()
    }

    /// Replace the settings and push them to the session, backend and logger.
    pub fn apply_config(&mut self, config: Config) {
        self.session.apply_config(&config);
        self.backend.configure(&config);
        self.log.set_level(config.log_level);
        self.config = config;
        self.log.debug(format_args!("apply_config flags={:?}", self.session.flags()));
    }

    /// Deliver pending commit text, refresh the display and recompute the
    /// sub-mode from the backend state.
    pub fn update(&mut self) {
        if let Some(text) = self.backend.take_commit().filter(|t| !t.is_empty()) {
            self.log.debug(format_args!("commit_text({})", text));
            self.host.commit_text(&text);
            self.session.set_status(StatusFlags::NEED_COMMIT, false);
        }

        let preedit = self.backend.preedit();
        let choices = self.backend.total_choice();
        let mode = if choices > 0 {
            InputMode::Selecting
        } else if preedit.is_empty() {
            InputMode::Bypass
        } else if self.session.mode() == InputMode::SelectionDone {
            InputMode::SelectionDone
        } else {
            InputMode::Editing
        };
        self.session.set_mode(mode);

        self.context.preedit_cursor = self.backend.cursor();
        self.context.preedit_text = preedit;
        self.context.candidates = self.backend.candidates();
        self.context.auxiliary_text = self.backend.aux_text();
        self.log.debug(format_args!(
            "update() mode={} preedit={:?} choices={}",
            mode.as_str(),
            self.context.preedit_text,
            choices
        ));
        self.host.update_display(&self.context);
    }

    /// Commit whatever is in the preedit now.
    pub fn force_commit(&mut self) {
        self.log.debug(format_args!("force_commit()"));
        self.backend.commit_preedit();
        self.update();
        self.session.set_status(StatusFlags::NEED_COMMIT, false);
    }

    pub fn page_up(&mut self) {
        self.navigate(BackendCommand::PageUp);
    }

    pub fn page_down(&mut self) {
        self.navigate(BackendCommand::PageDown);
    }

    pub fn cursor_up(&mut self) {
        self.navigate(BackendCommand::Up);
    }

    pub fn cursor_down(&mut self) {
        self.navigate(BackendCommand::Down);
    }

    fn navigate(&mut self, command: BackendCommand) {
        if self.session.is_password() {
            return;
        }
        self.backend.handle(command);
        self.update();
    }

    pub fn focus_in(&mut self) {
        self.log.debug(format_args!("focus_in()"));
        self.session.set_status(StatusFlags::FOCUS_IN, true);
        let properties = self.properties();
        self.host.register_properties(&properties);
    }

    pub fn focus_out(&mut self) {
        self.log.debug(format_args!("focus_out()"));
        if self.session.needs_commit() {
            self.force_commit();
        }
        self.session.set_status(StatusFlags::FOCUS_IN, false);
    }

    /// Drop the composition without committing it.
    pub fn reset(&mut self) {
        self.log.debug(format_args!("reset()"));
        self.backend.reset();
        self.session.clear();
        self.update();
    }

    /// The client announced what kind of text it expects.
    pub fn set_content_type(&mut self, purpose: u32, hints: u32) {
        self.log.debug(format_args!("set_content_type({}, {})", purpose, hints));
        let purpose = InputPurpose::from_raw(purpose);
        self.context.set_input_purpose(purpose, hints);
        self.session.set_status(StatusFlags::IS_PASSWORD, purpose.is_secret());
    }
}
