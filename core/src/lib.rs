//! chewing-core
//!
//! Key classification, event routing and settings shared by Chewing input
//! method front ends. The phonetic conversion itself is done by a backend
//! behind the [`PhoneticBackend`] trait; the input framework sits behind
//! [`Host`]. This crate only decides which key goes where.
//!
//! Public API:
//! - `ChewingEngine` - Per-context engine: key events, clicks, properties
//! - `EngineSession` - Sub-mode, status flags and behaviour flags
//! - `PhoneticBackend` / `BackendCommand` - Conversion backend contract
//! - `Host` / `ImeContext` - What the engine reports back to the framework
//! - `normalize_keysym` - Keysym normalization against a US keymap
//! - `Config` - TOML-backed settings validated through the settings table
//! - `SettingValue` - Typed setting values and their textual form
//! - `XmlWriter` / `write_schemas` - Settings schema export
//! - `Logger` - Engine log threshold and domain
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ConfigError, ValueError};

pub mod keysym;
pub use keysym::ModifierMask;

pub mod keymap;
pub use keymap::{lookup_us_keysym, normalize_keysym};

pub mod value;
pub use value::{find_string, SettingValue, ValueType};

pub mod settings;
pub use settings::{find_setting, CapsLockSync, SettingPage, SettingSpec, SETTINGS};

pub mod xml;
pub use xml::{tags_to_string, XmlTagType, XmlWriter};

pub mod schema;
pub use schema::write_schemas;

pub mod log;
pub use log::{LogLevel, Logger};

pub mod context;
pub use context::{ImeContext, InputPurpose};

pub mod session;
pub use session::{ChewingFlags, EngineSession, InputMode, StatusFlags};

pub mod backend;
pub use backend::{BackendCommand, PhoneticBackend};

pub mod host;
pub use host::Host;

pub mod properties;
pub use properties::{
    DialogOutcome, NoDialog, PropState, Property, PropertyId, SettingsDialog,
};

pub mod engine;
pub use engine::{ChewingEngine, KeyResult};

mod input_events;

#[cfg(test)]
mod tests;

/// Engine settings.
///
/// Field names are the TOML keys; the dialog and schema names (`"candPerPage"`)
/// are reached through [`Config::get`] and [`Config::set`]. Missing keys in a
/// TOML file take their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Zhuyin keyboard layout name, one of `settings::KB_TYPES`.
    pub kb_type: String,
    /// Candidate selection keys, one of `settings::SEL_KEY_SETS`.
    pub sel_keys: String,
    pub hsu_sel_key_type: i32,
    pub auto_shift_cur: bool,
    pub add_phrase_direction: bool,
    pub easy_symbol_input: bool,
    pub esc_clean_all_buf: bool,
    pub max_chi_symbol_len: i32,
    pub cand_per_page: i32,
    pub show_page_number: bool,
    pub phrase_choice_rearward: bool,
    pub space_as_selection: bool,
    /// Plain Zhuyin: candidates are always chosen explicitly.
    pub plain_zhuyin: bool,
    pub sync_caps_lock: CapsLockSync,
    /// Keypad digits stay digits even in Chinese mode.
    pub numpad_always_number: bool,
    pub force_lowercase_english: bool,
    /// Trust the host's keysyms instead of re-mapping through the US keymap.
    pub use_system_keyboard_layout: bool,

    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kb_type: "default".to_string(),
            sel_keys: "1234567890".to_string(),
            hsu_sel_key_type: 1,
            auto_shift_cur: false,
            add_phrase_direction: false,
            easy_symbol_input: true,
            esc_clean_all_buf: false,
            max_chi_symbol_len: 20,
            cand_per_page: 10,
            show_page_number: false,
            phrase_choice_rearward: true,
            space_as_selection: true,
            plain_zhuyin: false,
            sync_caps_lock: CapsLockSync::Disable,
            numpad_always_number: true,
            force_lowercase_english: false,
            use_system_keyboard_layout: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    ///
    /// Values are checked against the settings table, so a file that names
    /// an unknown keyboard type is rejected rather than silently kept.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against the settings table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for spec in SETTINGS {
            if let Some(value) = self.get(spec.key) {
                check_value(spec, &value)?;
            }
        }
        Ok(())
    }

    /// Current value of the setting called `key`.
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        use settings::*;
        let value = match key {
            KB_TYPE => SettingValue::String(self.kb_type.clone()),
            SEL_KEYS => SettingValue::String(self.sel_keys.clone()),
            HSU_SEL_KEY_TYPE => SettingValue::Int(self.hsu_sel_key_type),
            AUTO_SHIFT_CUR => SettingValue::Boolean(self.auto_shift_cur),
            ADD_PHRASE_DIRECTION => SettingValue::Boolean(self.add_phrase_direction),
            EASY_SYMBOL_INPUT => SettingValue::Boolean(self.easy_symbol_input),
            ESC_CLEAN_ALL_BUF => SettingValue::Boolean(self.esc_clean_all_buf),
            MAX_CHI_SYMBOL_LEN => SettingValue::Int(self.max_chi_symbol_len),
            CAND_PER_PAGE => SettingValue::Int(self.cand_per_page),
            SHOW_PAGE_NUMBER => SettingValue::Boolean(self.show_page_number),
            PHRASE_CHOICE_REARWARD => SettingValue::Boolean(self.phrase_choice_rearward),
            SPACE_AS_SELECTION => SettingValue::Boolean(self.space_as_selection),
            PLAIN_ZHUYIN => SettingValue::Boolean(self.plain_zhuyin),
            SYNC_CAPS_LOCK => SettingValue::String(self.sync_caps_lock.as_str().to_string()),
            NUMPAD_ALWAYS_NUMBER => SettingValue::Boolean(self.numpad_always_number),
            FORCE_LOWERCASE_ENGLISH => SettingValue::Boolean(self.force_lowercase_english),
            USE_SYSTEM_KEYBOARD_LAYOUT => SettingValue::Boolean(self.use_system_keyboard_layout),
            _ => return None,
        };
        Some(value)
    }

    /// Parse `raw` with the type of setting `key` and store it.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let spec = find_setting(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let value = SettingValue::parse(spec.value_type, raw)
            .map_err(|source| ConfigError::Value { key: key.to_string(), source })?;
        self.set_value(key, value)
    }

    /// Store a typed value. The value must already have the setting's type.
    pub fn set_value(&mut self, key: &str, value: SettingValue) -> Result<(), ConfigError> {
        use settings::*;
        let spec = find_setting(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let mut slot = SettingValue::zero(spec.value_type);
        slot.reset(value.value_type(), false)
            .map_err(|source| ConfigError::Value { key: key.to_string(), source })?;
        check_value(spec, &value)?;

        match (spec.key, value) {
            (KB_TYPE, SettingValue::String(s)) => self.kb_type = s,
            (SEL_KEYS, SettingValue::String(s)) => self.sel_keys = s,
            (HSU_SEL_KEY_TYPE, SettingValue::Int(i)) => self.hsu_sel_key_type = i,
            (AUTO_SHIFT_CUR, SettingValue::Boolean(b)) => self.auto_shift_cur = b,
            (ADD_PHRASE_DIRECTION, SettingValue::Boolean(b)) => self.add_phrase_direction = b,
            (EASY_SYMBOL_INPUT, SettingValue::Boolean(b)) => self.easy_symbol_input = b,
            (ESC_CLEAN_ALL_BUF, SettingValue::Boolean(b)) => self.esc_clean_all_buf = b,
            (MAX_CHI_SYMBOL_LEN, SettingValue::Int(i)) => self.max_chi_symbol_len = i,
            (CAND_PER_PAGE, SettingValue::Int(i)) => self.cand_per_page = i,
            (SHOW_PAGE_NUMBER, SettingValue::Boolean(b)) => self.show_page_number = b,
            (PHRASE_CHOICE_REARWARD, SettingValue::Boolean(b)) => self.phrase_choice_rearward = b,
            (SPACE_AS_SELECTION, SettingValue::Boolean(b)) => self.space_as_selection = b,
            (PLAIN_ZHUYIN, SettingValue::Boolean(b)) => self.plain_zhuyin = b,
            (SYNC_CAPS_LOCK, SettingValue::String(s)) => {
                self.sync_caps_lock = s.parse().map_err(|_| ConfigError::InvalidChoice {
                    key: key.to_string(),
                    value: s.clone(),
                })?;
            }
            (NUMPAD_ALWAYS_NUMBER, SettingValue::Boolean(b)) => self.numpad_always_number = b,
            (FORCE_LOWERCASE_ENGLISH, SettingValue::Boolean(b)) => {
                self.force_lowercase_english = b
            }
            (USE_SYSTEM_KEYBOARD_LAYOUT, SettingValue::Boolean(b)) => {
                self.use_system_keyboard_layout = b
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        tracing::debug!(key, "setting updated");
        Ok(())
    }

    /// Every setting with its current value, in table order.
    pub fn entries(&self) -> Vec<(&'static SettingSpec, SettingValue)> {
        SETTINGS
            .iter()
            .filter_map(|spec| self.get(spec.key).map(|value| (spec, value)))
            .collect()
    }

    /// Selection keys as characters.
    pub fn sel_key_chars(&self) -> Vec<char> {
        self.sel_keys.chars().collect()
    }
}

fn check_value(spec: &SettingSpec, value: &SettingValue) -> Result<(), ConfigError> {
    match value {
        SettingValue::String(s) if !spec.choices.is_empty() => {
            if find_string(spec.choices, s).is_none() {
                return Err(ConfigError::InvalidChoice {
                    key: spec.key.to_string(),
                    value: s.clone(),
                });
            }
        }
        SettingValue::Int(i) => {
            if let Some((min, max)) = spec.range {
                if !(min..=max).contains(i) {
                    return Err(ConfigError::OutOfRange {
                        key: spec.key.to_string(),
                        value: *i,
                        min,
                        max,
                    });
                }
            }
        }
        _ => {}
    }
    Ok(())
}

pub mod utils {
    /// Full-width form of an ASCII character.
    ///
    /// Space becomes the ideographic space and `!`..=`~` map onto
    /// U+FF01..=U+FF5E. Other characters are returned unchanged.
    pub fn fullwidth_char(ch: char) -> char {
        match ch {
            ' ' => '\u{3000}',
            '!'..='~' => char::from_u32(ch as u32 - 0x21 + 0xFF01).unwrap_or(ch),
            _ => ch,
        }
    }
}
