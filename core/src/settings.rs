//! The table of user-visible settings.
//!
//! Each entry names a setting the way the settings dialog and schema files
//! know it (`"candPerPage"`), together with its storage type, default text,
//! allowed choices and the strings shown to the user. `Config` reads and
//! writes its fields through this table so every path (dialog, CLI, schema
//! export) applies the same validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

pub const KB_TYPE: &str = "KBType";
pub const SEL_KEYS: &str = "selKeys";
pub const HSU_SEL_KEY_TYPE: &str = "hsuSelKeyType";
pub const AUTO_SHIFT_CUR: &str = "autoShiftCur";
pub const ADD_PHRASE_DIRECTION: &str = "addPhraseDirection";
pub const EASY_SYMBOL_INPUT: &str = "easySymbolInput";
pub const ESC_CLEAN_ALL_BUF: &str = "escCleanAllBuf";
pub const MAX_CHI_SYMBOL_LEN: &str = "maxChiSymbolLen";
pub const CAND_PER_PAGE: &str = "candPerPage";
pub const SHOW_PAGE_NUMBER: &str = "showPageNumber";
pub const PHRASE_CHOICE_REARWARD: &str = "phraseChoiceRearward";
pub const SPACE_AS_SELECTION: &str = "spaceAsSelection";
pub const PLAIN_ZHUYIN: &str = "plainZhuyin";
pub const SYNC_CAPS_LOCK: &str = "syncCapsLock";
pub const NUMPAD_ALWAYS_NUMBER: &str = "numpadAlwaysNumber";
pub const FORCE_LOWERCASE_ENGLISH: &str = "forceLowercaseEnglish";
pub const USE_SYSTEM_KEYBOARD_LAYOUT: &str = "useSystemKeyboardLayout";

pub const KB_TYPES: &[&str] = &[
    "default",
    "hsu",
    "ibm",
    "gin_yieh",
    "eten",
    "eten26",
    "dvorak",
    "dvorak_hsu",
    "dachen_26",
    "hanyu",
];

pub const SEL_KEY_SETS: &[&str] = &[
    "1234567890",
    "asdfghjkl;",
    "asdfzxcv89",
    "asdfjkl789",
    "aoeuhtn789",
    "1234qweras",
];

pub const CAPS_LOCK_SYNC_CHOICES: &[&str] = &["disable", "keyboard", "ime"];

/// Whether and how the Caps Lock LED follows the Chinese/English mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapsLockSync {
    #[default]
    Disable,
    /// The mode follows the keyboard LED.
    Keyboard,
    /// The LED follows the input method mode.
    Ime,
}

impl CapsLockSync {
    pub fn as_str(self) -> &'static str {
        match self {
            CapsLockSync::Disable => "disable",
            CapsLockSync::Keyboard => "keyboard",
            CapsLockSync::Ime => "ime",
        }
    }
}

impl fmt::Display for CapsLockSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapsLockSync {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(CapsLockSync::Disable),
            "keyboard" => Ok(CapsLockSync::Keyboard),
            "ime" => Ok(CapsLockSync::Ime),
            other => Err(format!("unknown caps lock sync mode: {}", other)),
        }
    }
}

/// Dialog page a setting is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingPage {
    Editing,
    Selecting,
    Keyboard,
}

impl SettingPage {
    pub fn title(self) -> &'static str {
        match self {
            SettingPage::Editing => "Editing",
            SettingPage::Selecting => "Selecting",
            SettingPage::Keyboard => "Keyboard",
        }
    }
}

/// Static description of one setting.
#[derive(Debug, Clone, Copy)]
pub struct SettingSpec {
    pub key: &'static str,
    pub value_type: ValueType,
    pub default: &'static str,
    /// Allowed values for string settings; empty means free-form.
    pub choices: &'static [&'static str],
    /// Inclusive range for integer settings.
    pub range: Option<(i32, i32)>,
    pub page: SettingPage,
    pub label: &'static str,
    pub description: &'static str,
}

const fn spec(
    key: &'static str,
    value_type: ValueType,
    default: &'static str,
    page: SettingPage,
    label: &'static str,
    description: &'static str,
) -> SettingSpec {
    SettingSpec { key, value_type, default, choices: &[], range: None, page, label, description }
}

pub static SETTINGS: &[SettingSpec] = &[
    SettingSpec {
        choices: KB_TYPES,
        ..spec(
            KB_TYPE,
            ValueType::String,
            "default",
            SettingPage::Keyboard,
            "Keyboard Type",
            "Select Zhuyin keyboard layout.",
        )
    },
    SettingSpec {
        choices: SEL_KEY_SETS,
        ..spec(
            SEL_KEYS,
            ValueType::String,
            "1234567890",
            SettingPage::Keyboard,
            "Selection keys",
            "Keys used to select candidate. For example \"asdfghjkl;\", press 'a' to select the 1st candidate, 's' for 2nd, and so on.",
        )
    },
    SettingSpec {
        range: Some((1, 2)),
        ..spec(
            HSU_SEL_KEY_TYPE,
            ValueType::Int,
            "1",
            SettingPage::Keyboard,
            "Hsu's selection key",
            "Hsu's keyboard selection keys, 1 for asdfjkl789, 2 for asdfzxcv89.",
        )
    },
    spec(
        AUTO_SHIFT_CUR,
        ValueType::Boolean,
        "0",
        SettingPage::Editing,
        "Auto move cursor",
        "Automatically move cursor to next character.",
    ),
    spec(
        ADD_PHRASE_DIRECTION,
        ValueType::Boolean,
        "0",
        SettingPage::Editing,
        "Add phrases in front",
        "Add phrases in the front.",
    ),
    spec(
        EASY_SYMBOL_INPUT,
        ValueType::Boolean,
        "1",
        SettingPage::Editing,
        "Easy symbol input",
        "Easy symbol input.",
    ),
    spec(
        ESC_CLEAN_ALL_BUF,
        ValueType::Boolean,
        "0",
        SettingPage::Editing,
        "Esc clean all buffer",
        "Escape key cleans the text in pre-edit-buffer.",
    ),
    SettingSpec {
        range: Some((8, 50)),
        ..spec(
            MAX_CHI_SYMBOL_LEN,
            ValueType::Int,
            "20",
            SettingPage::Editing,
            "Maximum Chinese characters",
            "Maximum Chinese characters in pre-edit buffer, including inputing Zhuyin symbols.",
        )
    },
    SettingSpec {
        range: Some((4, 10)),
        ..spec(
            CAND_PER_PAGE,
            ValueType::Int,
            "10",
            SettingPage::Selecting,
            "Number of candidates per page",
            "Number of candidate per page.",
        )
    },
    spec(
        SHOW_PAGE_NUMBER,
        ValueType::Boolean,
        "0",
        SettingPage::Selecting,
        "Show page number",
        "Display the page number of the candidate list.",
    ),
    spec(
        PHRASE_CHOICE_REARWARD,
        ValueType::Boolean,
        "1",
        SettingPage::Selecting,
        "Choose phrases from backward",
        "Choose phrases from the back, without moving cursor.",
    ),
    spec(
        SPACE_AS_SELECTION,
        ValueType::Boolean,
        "1",
        SettingPage::Selecting,
        "Space to select",
        "Press Space to select the candidate.",
    ),
    spec(
        PLAIN_ZHUYIN,
        ValueType::Boolean,
        "0",
        SettingPage::Selecting,
        "Plain Zhuyin mode",
        "In plain Zhuyin mode, automatic candidate selection and related options are disabled or ignored.",
    ),
    SettingSpec {
        choices: CAPS_LOCK_SYNC_CHOICES,
        ..spec(
            SYNC_CAPS_LOCK,
            ValueType::String,
            "disable",
            SettingPage::Keyboard,
            "Sync between CapsLock and IM",
            "Occasionally, the CapsLock status does not match the IM, this option determines how these status be synchronized.",
        )
    },
    spec(
        NUMPAD_ALWAYS_NUMBER,
        ValueType::Boolean,
        "1",
        SettingPage::Keyboard,
        "Number pad always input number",
        "Always input numbers when number keys from key pad is inputted.",
    ),
    spec(
        FORCE_LOWERCASE_ENGLISH,
        ValueType::Boolean,
        "0",
        SettingPage::Keyboard,
        "Force lowercase in En mode",
        "Ignore CapsLock status and input lowercase by default. It is still possible to input uppercase with shift.",
    ),
    spec(
        USE_SYSTEM_KEYBOARD_LAYOUT,
        ValueType::Boolean,
        "0",
        SettingPage::Keyboard,
        "Use system keyboard layout",
        "Use the keyboard layout of the system instead of the US layout.",
    ),
];

pub fn find_setting(key: &str) -> Option<&'static SettingSpec> {
    SETTINGS.iter().find(|s| s.key == key)
}
