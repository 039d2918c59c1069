use super::*;
use crate::backend::BackendCommand;
use crate::context::InputPurpose;
use crate::log::LogLevel;
use crate::session::{InputMode, StatusFlags};

#[test]
fn test_focus_in_registers_properties() {
    let mut e = engine(RecordingBackend::new());
    e.focus_in();
    assert!(e.session().has_status(StatusFlags::FOCUS_IN));
    assert_eq!(
        e.host().registered,
        vec![PropertyId::ChiEng, PropertyId::AlnumSize, PropertyId::Settings]
    );
}

#[test]
fn test_focus_out_commits_pending_text() {
    let mut e = engine(RecordingBackend::new());
    e.focus_in();
    press(&mut e, 'a' as u32);
    assert!(e.session().needs_commit());
    e.focus_out();
    assert_eq!(e.host().commits, vec!["a".to_string()]);
    assert!(!e.session().needs_commit());
    assert!(!e.session().has_status(StatusFlags::FOCUS_IN));
}

#[test]
fn test_focus_out_without_pending_text() {
    let mut e = engine(RecordingBackend::new().composing("測"));
    e.focus_out();
    assert!(e.host().commits.is_empty());
}

#[test]
fn test_reset_drops_composition() {
    let mut e = engine(RecordingBackend::new().selecting("測", 3));
    e.session_mut().set_status(StatusFlags::NEED_COMMIT, true);
    e.reset();
    assert_eq!(e.mode(), InputMode::Bypass);
    assert!(!e.session().needs_commit());
    assert!(e.host().commits.is_empty());
    assert_eq!(e.context().preedit_text, "");
}

#[test]
fn test_update_publishes_context() {
    let mut e = engine(RecordingBackend::new().selecting("測試", 3));
    e.update();
    let ctx = e.host().displays.last().unwrap();
    assert_eq!(ctx.preedit_text, "測試");
    assert_eq!(ctx.preedit_cursor, 2);
    assert_eq!(ctx.candidates, vec!["cand0", "cand1", "cand2"]);
    assert_eq!(e.mode(), InputMode::Selecting);
}

#[test]
fn test_page_and_cursor_requests() {
    let mut e = engine(RecordingBackend::new().selecting("測", 30));
    e.page_down();
    e.page_up();
    e.cursor_down();
    e.cursor_up();
    assert_eq!(
        e.backend().commands,
        vec![
            BackendCommand::PageDown,
            BackendCommand::PageUp,
            BackendCommand::Down,
            BackendCommand::Up
        ]
    );
    assert_eq!(e.host().displays.len(), 4);
}

#[test]
fn test_content_type_is_published() {
    let mut e = engine(RecordingBackend::new());
    e.set_content_type(6, 0x10);
    assert_eq!(e.context().input_purpose, InputPurpose::Email);
    assert_eq!(e.context().input_hints, 0x10);
    assert!(!e.session().is_password());
}

#[test]
fn test_apply_config_updates_logger_and_backend() {
    let mut e = engine(RecordingBackend::new());
    let config = Config { log_level: LogLevel::Debug, cand_per_page: 5, ..Config::default() };
    e.apply_config(config);
    assert_eq!(e.logger().level(), LogLevel::Debug);
    assert_eq!(e.backend().per_page, 5);
}

#[test]
fn test_system_layout_skips_keymap() {
    let config = Config { use_system_keyboard_layout: true, ..Config::default() };
    let mut e = engine_with(RecordingBackend::new(), config);
    // Keycode 31 is 's' on the US keymap; the host said 'o'.
    assert!(e.process_key_event('o' as u32, 31, ModifierMask::empty()));
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('o' as u32)]);

    let mut e = engine(RecordingBackend::new());
    assert!(e.process_key_event('o' as u32, 31, ModifierMask::empty()));
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('s' as u32)]);
}
