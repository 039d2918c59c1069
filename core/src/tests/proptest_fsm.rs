//! Property-based tests for the key router.
//!
//! Random key sequences are replayed against the recording backend and the
//! routing invariants are checked after every step.

use proptest::prelude::*;

use super::*;
use crate::keysym::*;
use crate::session::InputMode;

#[derive(Debug, Clone)]
enum Action {
    Letter(char),
    Digit(char),
    Keypad(u32),
    Space,
    Enter,
    Backspace,
    Escape,
    Left,
    ShiftTap,
    ShiftSpace,
    ShiftUp,
    CtrlDigit(char),
    CtrlAlt(char),
    /// The backend opens a candidate list.
    OpenChoices(usize),
    Click(u32),
    Purpose(u32),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        30 => prop::sample::select(vec!['a', 'j', 'k', 'u', '3', '4', '6', ',', ';']).prop_map(Action::Letter),
        8 => prop::sample::select(vec!['1', '2', '5', '9', '0']).prop_map(Action::Digit),
        3 => (0u32..10).prop_map(|d| Action::Keypad(KP_0 + d)),
        8 => Just(Action::Space),
        6 => Just(Action::Enter),
        6 => Just(Action::Backspace),
        3 => Just(Action::Escape),
        3 => Just(Action::Left),
        3 => Just(Action::ShiftTap),
        2 => Just(Action::ShiftSpace),
        3 => Just(Action::ShiftUp),
        2 => prop::sample::select(vec!['0', '3', 'f']).prop_map(Action::CtrlDigit),
        1 => prop::sample::select(vec!['a', '1']).prop_map(Action::CtrlAlt),
        5 => (1usize..15).prop_map(Action::OpenChoices),
        4 => (0u32..12).prop_map(Action::Click),
        2 => prop::sample::select(vec![0u32, 3, 8, 9]).prop_map(Action::Purpose),
    ]
}

/// Returns whether a display update is expected to have happened.
fn execute(e: &mut TestEngine, action: &Action) -> Option<bool> {
    let consumed = match action {
        Action::Letter(c) | Action::Digit(c) => press(e, *c as u32),
        Action::Keypad(sym) => press(e, *sym),
        Action::Space => press(e, SPACE),
        Action::Enter => press(e, RETURN),
        Action::Backspace => press(e, BACKSPACE),
        Action::Escape => press(e, ESCAPE),
        Action::Left => press(e, LEFT),
        Action::ShiftTap => {
            press(e, SHIFT_L);
            release(e, SHIFT_L, ModifierMask::SHIFT)
        }
        Action::ShiftSpace => press_with(e, SPACE, ModifierMask::SHIFT),
        Action::ShiftUp => press_with(e, UP, ModifierMask::SHIFT),
        Action::CtrlDigit(c) => press_with(e, *c as u32, ModifierMask::CONTROL),
        Action::CtrlAlt(c) => press_with(e, *c as u32, ModifierMask::CONTROL | ModifierMask::MOD1),
        Action::OpenChoices(n) => {
            if !e.backend().preedit.is_empty() {
                e.backend_mut().choices = *n;
                e.update();
            }
            return None;
        }
        Action::Click(index) => {
            e.candidate_clicked(*index, 1, 0);
            return None;
        }
        Action::Purpose(p) => {
            e.set_content_type(*p, 0);
            return None;
        }
    };
    Some(consumed)
}

fn assert_invariants(e: &TestEngine, action: &Action, consumed: Option<bool>, before: &Snapshot) {
    if before.password {
        if consumed.is_some() {
            assert_eq!(consumed, Some(false), "password mode consumed {:?}", action);
        }
        assert_eq!(e.backend().commands.len(), before.commands, "password mode leaked {:?}", action);
    }

    if consumed == Some(false) {
        if !matches!(action, Action::ShiftUp) {
            assert_eq!(e.host().displays.len(), before.displays, "update after unconsumed {:?}", action);
        }
    }

    if matches!(action, Action::CtrlAlt(_)) {
        assert_eq!(consumed, Some(false));
    }

    // Whenever the display was refreshed the sub-mode matches the backend.
    if e.host().displays.len() > before.displays {
        let backend = e.backend();
        match e.mode() {
            InputMode::Selecting => assert!(backend.choices > 0),
            InputMode::Bypass => assert!(backend.preedit.is_empty() && backend.choices == 0),
            InputMode::Editing | InputMode::SelectionDone => {
                assert!(!backend.preedit.is_empty() && backend.choices == 0)
            }
        }
        assert_eq!(e.context().preedit_text, backend.preedit);
    }

    if e.host().commits.len() > before.commits && e.host().displays.len() > before.displays {
        assert!(!e.session().needs_commit(), "commit delivered but NEED_COMMIT kept after {:?}", action);
    }
}

struct Snapshot {
    password: bool,
    commands: usize,
    displays: usize,
    commits: usize,
}

fn snapshot(e: &TestEngine) -> Snapshot {
    Snapshot {
        password: e.session().is_password(),
        commands: e.backend().commands.len(),
        displays: e.host().displays.len(),
        commits: e.host().commits.len(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn router_invariants(actions in prop::collection::vec(arb_action(), 1..60)) {
        let mut e = engine(RecordingBackend::new());
        for action in &actions {
            let before = snapshot(&e);
            let consumed = execute(&mut e, action);
            assert_invariants(&e, action, consumed, &before);
        }
    }

    #[test]
    fn shift_taps_toggle_parity(taps in 0usize..12) {
        let mut e = engine(RecordingBackend::new());
        for _ in 0..taps {
            press(&mut e, SHIFT_R);
            release(&mut e, SHIFT_R, ModifierMask::SHIFT);
        }
        prop_assert_eq!(e.backend().chinese, taps % 2 == 0);
    }
}
