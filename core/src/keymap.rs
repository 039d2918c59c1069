//! Key classification against a fixed US keyboard layout.
//!
//! Zhuyin layouts are defined in terms of physical key positions, so while
//! Chinese mode is active the engine ignores whatever the host's keyboard
//! layout produced and re-derives the symbol from the hardware keycode, as if
//! a US keyboard were attached. Users who want the host's translation set the
//! `useSystemKeyboardLayout` option instead.

use crate::keysym::{self, ModifierMask};

/// How modifier state selects between the two levels of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    /// Shift selects the second level.
    Shift,
    /// Shift XOR Caps Lock selects the second level.
    Alphabetic,
    /// Shift XOR Num Lock selects the second level.
    Keypad,
    /// Always the first level.
    Fixed,
}

#[derive(Debug, Clone, Copy)]
struct KeyEntry {
    base: u32,
    shifted: u32,
    level: Level,
}

const fn printable(base: char, shifted: char) -> KeyEntry {
    KeyEntry { base: base as u32, shifted: shifted as u32, level: Level::Shift }
}

const fn letter(base: char) -> KeyEntry {
    KeyEntry {
        base: base as u32,
        shifted: base.to_ascii_uppercase() as u32,
        level: Level::Alphabetic,
    }
}

const fn keypad(nav: u32, digit: u32) -> KeyEntry {
    KeyEntry { base: nav, shifted: digit, level: Level::Keypad }
}

const fn fixed(sym: u32) -> KeyEntry {
    KeyEntry { base: sym, shifted: sym, level: Level::Fixed }
}

/// Keycodes above this bound never map to a symbol.
pub const MAX_KEYCODE: u32 = 256;

/// US layout, indexed by evdev keycode.
fn us_entry(keycode: u32) -> Option<KeyEntry> {
    use crate::keysym::*;
    let entry = match keycode {
        1 => fixed(ESCAPE),
        2 => printable('1', '!'),
        3 => printable('2', '@'),
        4 => printable('3', '#'),
        5 => printable('4', '$'),
        6 => printable('5', '%'),
        7 => printable('6', '^'),
        8 => printable('7', '&'),
        9 => printable('8', '*'),
        10 => printable('9', '('),
        11 => printable('0', ')'),
        12 => printable('-', '_'),
        13 => printable('=', '+'),
        14 => fixed(BACKSPACE),
        15 => fixed(TAB),
        16 => letter('q'),
        17 => letter('w'),
        18 => letter('e'),
        19 => letter('r'),
        20 => letter('t'),
        21 => letter('y'),
        22 => letter('u'),
        23 => letter('i'),
        24 => letter('o'),
        25 => letter('p'),
        26 => printable('[', '{'),
        27 => printable(']', '}'),
        28 => fixed(RETURN),
        29 => fixed(CONTROL_L),
        30 => letter('a'),
        31 => letter('s'),
        32 => letter('d'),
        33 => letter('f'),
        34 => letter('g'),
        35 => letter('h'),
        36 => letter('j'),
        37 => letter('k'),
        38 => letter('l'),
        39 => printable(';', ':'),
        40 => printable('\'', '"'),
        41 => printable('`', '~'),
        42 => fixed(SHIFT_L),
        43 => printable('\\', '|'),
        44 => letter('z'),
        45 => letter('x'),
        46 => letter('c'),
        47 => letter('v'),
        48 => letter('b'),
        49 => letter('n'),
        50 => letter('m'),
        51 => printable(',', '<'),
        52 => printable('.', '>'),
        53 => printable('/', '?'),
        54 => fixed(SHIFT_R),
        55 => fixed(KP_MULTIPLY),
        56 => fixed(ALT_L),
        57 => fixed(SPACE),
        58 => fixed(CAPS_LOCK),
        59..=68 => fixed(F1 + (keycode - 59)),
        69 => fixed(NUM_LOCK),
        71 => keypad(KP_HOME, 0xffb7),
        72 => keypad(KP_UP, 0xffb8),
        73 => keypad(KP_PAGE_UP, KP_9),
        74 => fixed(KP_SUBTRACT),
        75 => keypad(KP_LEFT, 0xffb4),
        76 => keypad(KP_BEGIN, 0xffb5),
        77 => keypad(KP_RIGHT, 0xffb6),
        78 => fixed(KP_ADD),
        79 => keypad(KP_END, 0xffb1),
        80 => keypad(KP_DOWN, 0xffb2),
        81 => keypad(KP_PAGE_DOWN, 0xffb3),
        82 => keypad(KP_INSERT, KP_0),
        83 => keypad(KP_DELETE, KP_DECIMAL),
        96 => fixed(KP_ENTER),
        97 => fixed(CONTROL_R),
        98 => fixed(KP_DIVIDE),
        100 => fixed(ALT_R),
        102 => fixed(HOME),
        103 => fixed(UP),
        104 => fixed(PAGE_UP),
        105 => fixed(LEFT),
        106 => fixed(RIGHT),
        107 => fixed(END),
        108 => fixed(DOWN),
        109 => fixed(PAGE_DOWN),
        110 => fixed(INSERT),
        111 => fixed(DELETE),
        _ => return None,
    };
    Some(entry)
}

/// Look up the US-layout keysym for a hardware keycode.
///
/// Returns `None` when the keycode has no mapping, including every keycode
/// at or above [`MAX_KEYCODE`].
pub fn lookup_us_keysym(keycode: u32, modifiers: ModifierMask) -> Option<u32> {
    if keycode >= MAX_KEYCODE {
        return None;
    }
    let entry = us_entry(keycode)?;
    let shift = modifiers.contains(ModifierMask::SHIFT);
    let second_level = match entry.level {
        Level::Shift => shift,
        Level::Alphabetic => shift ^ modifiers.contains(ModifierMask::LOCK),
        Level::Keypad => shift ^ modifiers.contains(ModifierMask::MOD2),
        Level::Fixed => false,
    };
    let sym = if second_level { entry.shifted } else { entry.base };
    (sym != keysym::VOID_SYMBOL).then_some(sym)
}

/// Normalize the symbol of a key event before routing.
///
/// * outside Chinese mode the host's `keysym` is trusted as-is;
/// * in Chinese mode with a host-managed layout, likewise;
/// * otherwise the symbol is re-derived from `keycode` on the US layout,
///   falling back to `keysym` when the keycode has no mapping.
pub fn normalize_keysym(
    keysym: u32,
    keycode: u32,
    modifiers: ModifierMask,
    system_layout: bool,
    chinese_mode: bool,
) -> u32 {
    if !chinese_mode || system_layout {
        return keysym;
    }
    lookup_us_keysym(keycode, modifiers).unwrap_or(keysym)
}
