use super::*;
use crate::backend::BackendCommand;
use crate::session::InputMode;

#[test]
fn test_default_always_sets_need_commit() {
    let mut e = engine(RecordingBackend::new());
    e.handle_default('a' as u32, false);
    assert!(e.session().needs_commit());
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('a' as u32)]);
}

#[test]
fn test_easy_symbol_follows_shift() {
    let mut e = engine(RecordingBackend::new());
    e.handle_default('a' as u32, true);
    e.handle_default('a' as u32, false);
    assert_eq!(e.backend().easy_symbol_calls, vec![true, false]);
}

#[test]
fn test_easy_symbol_untouched_when_disabled() {
    let config = Config { easy_symbol_input: false, ..Config::default() };
    let mut e = engine_with(RecordingBackend::new(), config);
    e.handle_default('a' as u32, true);
    assert!(e.backend().easy_symbol_calls.is_empty());
}

#[test]
fn test_force_lowercase_english() {
    let config = Config { force_lowercase_english: true, ..Config::default() };
    let mut e = engine_with(RecordingBackend::new(), config);
    e.handle_default('Q' as u32, false);
    e.handle_default('q' as u32, true);
    e.handle_default('7' as u32, true);
    assert_eq!(
        e.backend().commands,
        vec![
            BackendCommand::Default('q' as u32),
            BackendCommand::Default('Q' as u32),
            BackendCommand::Default('7' as u32),
        ]
    );
}

#[test]
fn test_case_kept_without_force_lowercase() {
    let mut e = engine(RecordingBackend::new());
    e.handle_default('Q' as u32, false);
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('Q' as u32)]);
}

#[test]
fn test_plain_zhuyin_selection_key_accepts_candidate() {
    let config = Config { plain_zhuyin: true, ..Config::default() };
    let mut e = engine_with(RecordingBackend::new().selecting("ㄘㄜˋ", 5), config);
    assert_eq!(e.mode(), InputMode::Selecting);

    assert!(super::press(&mut e, '2' as u32));
    assert_eq!(
        e.backend().commands,
        vec![BackendCommand::Default('2' as u32), BackendCommand::Enter]
    );
    assert_eq!(e.host().commits, vec!["ㄘㄜˋ".to_string()]);
}

#[test]
fn test_plain_zhuyin_non_selection_key() {
    let config = Config { plain_zhuyin: true, sel_keys: "asdfghjkl;".to_string(), ..Config::default() };
    let mut e = engine_with(RecordingBackend::new().selecting("ㄘㄜˋ", 5), config);
    super::press(&mut e, '2' as u32);
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('2' as u32)]);
}

#[test]
fn test_selection_done_without_plain_zhuyin_is_not_entered() {
    let mut e = engine(RecordingBackend::new().selecting("測", 5));
    e.session_mut().set_key_last('1' as u32);
    e.handle_default('1' as u32, false);
    assert_eq!(e.backend().commands, vec![BackendCommand::Default('1' as u32)]);
    assert_eq!(e.mode(), InputMode::Selecting);
}

#[test]
fn test_selection_done_is_kept_while_preedit_remains() {
    let config = Config { plain_zhuyin: true, ..Config::default() };
    let mut e = engine_with(RecordingBackend::new().selecting("測試", 5), config);
    e.session_mut().set_key_last('1' as u32);
    e.handle_default('1' as u32, false);
    assert_eq!(e.mode(), InputMode::SelectionDone);

    // Backend keeps some preedit after Enter.
    e.backend_mut().preedit = "試".to_string();
    e.update();
    assert_eq!(e.mode(), InputMode::SelectionDone);

    e.backend_mut().choices = 2;
    e.update();
    assert_eq!(e.mode(), InputMode::Selecting);
}
