//! Key symbols and modifier masks as delivered by the host input framework.
//!
//! Values follow the X11/IBus keysym numbering so that a host can pass its
//! raw `keysym` straight through. Only the symbols the router dispatches on
//! are named here; everything else travels as a plain `u32`. Names and the
//! keysym to character mapping come from `xkeysym`.

use bitflags::bitflags;
use xkeysym::Keysym;

pub const VOID_SYMBOL: u32 = Keysym::VoidSymbol.raw();

pub const SPACE: u32 = Keysym::space.raw();
pub const ASTERISK: u32 = Keysym::asterisk.raw();
pub const PLUS: u32 = Keysym::plus.raw();
pub const MINUS: u32 = Keysym::minus.raw();
pub const PERIOD: u32 = Keysym::period.raw();
pub const SLASH: u32 = Keysym::slash.raw();
pub const DIGIT_0: u32 = '0' as u32;
pub const DIGIT_9: u32 = '9' as u32;

pub const BACKSPACE: u32 = Keysym::BackSpace.raw();
pub const TAB: u32 = Keysym::Tab.raw();
pub const RETURN: u32 = Keysym::Return.raw();
pub const ESCAPE: u32 = Keysym::Escape.raw();
pub const DELETE: u32 = Keysym::Delete.raw();

pub const HOME: u32 = Keysym::Home.raw();
pub const LEFT: u32 = Keysym::Left.raw();
pub const UP: u32 = Keysym::Up.raw();
pub const RIGHT: u32 = Keysym::Right.raw();
pub const DOWN: u32 = Keysym::Down.raw();
pub const PAGE_UP: u32 = Keysym::Page_Up.raw();
pub const PAGE_DOWN: u32 = Keysym::Page_Down.raw();
pub const END: u32 = Keysym::End.raw();
pub const INSERT: u32 = Keysym::Insert.raw();
pub const NUM_LOCK: u32 = Keysym::Num_Lock.raw();

pub const KP_SPACE: u32 = Keysym::KP_Space.raw();
pub const KP_ENTER: u32 = Keysym::KP_Enter.raw();
pub const KP_HOME: u32 = Keysym::KP_Home.raw();
pub const KP_LEFT: u32 = Keysym::KP_Left.raw();
pub const KP_UP: u32 = Keysym::KP_Up.raw();
pub const KP_RIGHT: u32 = Keysym::KP_Right.raw();
pub const KP_DOWN: u32 = Keysym::KP_Down.raw();
pub const KP_PAGE_UP: u32 = Keysym::KP_Page_Up.raw();
pub const KP_PAGE_DOWN: u32 = Keysym::KP_Page_Down.raw();
pub const KP_END: u32 = Keysym::KP_End.raw();
pub const KP_BEGIN: u32 = Keysym::KP_Begin.raw();
pub const KP_INSERT: u32 = Keysym::KP_Insert.raw();
pub const KP_DELETE: u32 = Keysym::KP_Delete.raw();
pub const KP_MULTIPLY: u32 = Keysym::KP_Multiply.raw();
pub const KP_ADD: u32 = Keysym::KP_Add.raw();
pub const KP_SUBTRACT: u32 = Keysym::KP_Subtract.raw();
pub const KP_DECIMAL: u32 = Keysym::KP_Decimal.raw();
pub const KP_DIVIDE: u32 = Keysym::KP_Divide.raw();
pub const KP_0: u32 = Keysym::KP_0.raw();
pub const KP_9: u32 = Keysym::KP_9.raw();

pub const F1: u32 = Keysym::F1.raw();

pub const SHIFT_L: u32 = Keysym::Shift_L.raw();
pub const SHIFT_R: u32 = Keysym::Shift_R.raw();
pub const CONTROL_L: u32 = Keysym::Control_L.raw();
pub const CONTROL_R: u32 = Keysym::Control_R.raw();
pub const CAPS_LOCK: u32 = Keysym::Caps_Lock.raw();
pub const ALT_L: u32 = Keysym::Alt_L.raw();
pub const ALT_R: u32 = Keysym::Alt_R.raw();

bitflags! {
    /// Modifier state attached to a key event, using the IBus bit layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u32 {
        const SHIFT   = 1 << 0;
        const LOCK    = 1 << 1;
        const CONTROL = 1 << 2;
        /// Usually Alt.
        const MOD1    = 1 << 3;
        /// Usually Num Lock.
        const MOD2    = 1 << 4;
        const MOD3    = 1 << 5;
        const MOD4    = 1 << 6;
        const MOD5    = 1 << 7;
        const SUPER   = 1 << 26;
        const HYPER   = 1 << 27;
        const META    = 1 << 28;
        const RELEASE = 1 << 30;
    }
}

impl ModifierMask {
    /// The modifiers the router distinguishes between: Shift, Control and Alt.
    pub fn dispatch_state(self) -> ModifierMask {
        self & (ModifierMask::SHIFT | ModifierMask::CONTROL | ModifierMask::MOD1)
    }

    pub fn is_release(self) -> bool {
        self.contains(ModifierMask::RELEASE)
    }
}

/// Render a modifier mask as `[SHIFT|CONTROL|...]` for log lines.
pub fn modifiers_to_string(modifiers: ModifierMask) -> String {
    let names: Vec<&str> = modifiers.iter_names().map(|(name, _)| name).collect();
    format!("[{}]", names.join("|"))
}

/// Map a keypad digit/operator to the key it stands for on the main block.
///
/// Returns `None` for anything that is not a keypad digit or operator.
pub fn kp_to_normal(keysym: u32) -> Option<u32> {
    match keysym {
        KP_0..=KP_9 => Some(keysym - KP_0 + DIGIT_0),
        KP_DECIMAL => Some(PERIOD),
        KP_ADD => Some(PLUS),
        KP_SUBTRACT => Some(MINUS),
        KP_MULTIPLY => Some(ASTERISK),
        KP_DIVIDE => Some(SLASH),
        _ => None,
    }
}

pub fn is_shift(keysym: u32) -> bool {
    matches!(keysym, SHIFT_L | SHIFT_R)
}

/// The character a keysym types, if any.
///
/// Control characters (Return, Tab, BackSpace, ...) and keys without a
/// character (function keys, lock keys) give `None`.
pub fn keysym_to_char(keysym: u32) -> Option<char> {
    Keysym::new(keysym).key_char().filter(|ch| !ch.is_control())
}

/// Human readable name of a keysym, for logging.
pub fn key_name(keysym: u32) -> &'static str {
    match Keysym::new(keysym).name() {
        Some(name) => name.strip_prefix("XK_").unwrap_or(name),
        None => "unknown",
    }
}

/// Parse a keysym from its name (`"Return"`, `"KP_5"`), a single printable
/// character (`"a"`), or a hexadecimal literal (`"0xff0d"`).
///
/// Names are matched in the Latin-1 block and the function key block
/// (`0xff00..=0xffff`), which hold every key a keyboard event carries here.
pub fn keysym_from_name(name: &str) -> Option<u32> {
    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok();
    }
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_graphic() {
            return Some(c as u32);
        }
    }
    (0x20..=0xff)
        .chain(0xff00..=0xffff)
        .chain(std::iter::once(VOID_SYMBOL))
        .find(|&sym| {
            Keysym::new(sym)
                .name()
                .is_some_and(|known| known.strip_prefix("XK_").unwrap_or(known) == name)
        })
}
