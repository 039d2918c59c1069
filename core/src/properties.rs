//! Indicator properties and their activation.
//!
//! The engine exposes three indicators to the host: the Chinese/English
//! switch, the full/half-width switch and a settings button. Activating one
//! flips the matching backend mode (or runs the settings dialog) and asks the
//! host to redraw it.

use std::fmt;
use std::str::FromStr;

use crate::backend::PhoneticBackend;
use crate::engine::ChewingEngine;
use crate::host::Host;
use crate::settings::{CapsLockSync, SettingSpec};
use crate::value::SettingValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    ChiEng,
    AlnumSize,
    Settings,
}

impl PropertyId {
    pub const ALL: [PropertyId; 3] = [PropertyId::ChiEng, PropertyId::AlnumSize, PropertyId::Settings];

    /// Name the host uses for the indicator.
    pub fn name(self) -> &'static str {
        match self {
            PropertyId::ChiEng => "chewing_chieng_prop",
            PropertyId::AlnumSize => "chewing_alnumSize_prop",
            PropertyId::Settings => "chewing_settings_prop",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown property: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropState {
    #[default]
    Unchecked,
    Checked,
    Inconsistent,
}

impl PropState {
    /// Map an IBus property state value.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => PropState::Checked,
            2 => PropState::Inconsistent,
            _ => PropState::Unchecked,
        }
    }
}

/// One indicator as the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: PropertyId,
    pub label: String,
    pub tooltip: String,
    pub state: PropState,
}

impl Property {
    pub fn chi_eng(chinese: bool) -> Self {
        let (label, tooltip) = if chinese {
            ("中", "Click to switch to English")
        } else {
            ("英", "Click to switch to Chinese")
        };
        Self::new(PropertyId::ChiEng, label, tooltip, PropState::Unchecked)
    }

    pub fn alnum_size(full: bool) -> Self {
        let (label, tooltip) = if full {
            ("全", "Click to switch to Half")
        } else {
            ("半", "Click to switch to Full")
        };
        Self::new(PropertyId::AlnumSize, label, tooltip, PropState::Unchecked)
    }

    /// The settings dialog is modal, so this indicator is never left checked.
    pub fn settings() -> Self {
        Self::new(PropertyId::Settings, "Settings", "Configure Chewing engine", PropState::Unchecked)
    }

    fn new(id: PropertyId, label: &str, tooltip: &str, state: PropState) -> Self {
        Self { id, label: label.to_string(), tooltip: tooltip.to_string(), state }
    }
}

/// Result of running the settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Edited settings as `(key, text)` pairs.
    Confirmed(Vec<(String, String)>),
    Cancelled,
}

/// Modal settings dialog. `run` returns once the user closes it.
pub trait SettingsDialog {
    fn run(&mut self, title: &str, entries: &[(&'static SettingSpec, SettingValue)]) -> DialogOutcome;
}

/// Dialog for hosts without one; always cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDialog;

impl SettingsDialog for NoDialog {
    fn run(&mut self, _title: &str, _entries: &[(&'static SettingSpec, SettingValue)]) -> DialogOutcome {
        DialogOutcome::Cancelled
    }
}

impl<B: PhoneticBackend, H: Host> ChewingEngine<B, H> {
    /// Current state of indicator `id`.
    pub fn property(&self, id: PropertyId) -> Property {
        match id {
            PropertyId::ChiEng => Property::chi_eng(self.backend.chinese_mode()),
            PropertyId::AlnumSize => Property::alnum_size(self.backend.full_shape()),
            PropertyId::Settings => Property::settings(),
        }
    }

    pub fn properties(&self) -> Vec<Property> {
        PropertyId::ALL.into_iter().map(|id| self.property(id)).collect()
    }

    pub(crate) fn refresh_property(&mut self, id: PropertyId) {
        let property = self.property(id);
        self.log.debug(format_args!("refresh_property({}) label={}", id, property.label));
        self.host.refresh_property(&property);
    }

    /// The host activated indicator `name`.
    pub fn property_activate(&mut self, name: &str, state: u32) {
        self.log.info(format_args!("property_activate(-, {}, {})", name, state));
        let id = match name.parse::<PropertyId>() {
            Ok(id) => id,
            Err(_) => {
                self.log.debug(format_args!("property_activate(-, {}, {}) not recognized", name, state));
                return;
            }
        };

        match id {
            PropertyId::ChiEng => {
                let chinese = !self.backend.chinese_mode();
                self.backend.set_chinese_mode(chinese);
                let caps_off = !self.host.caps_lock_led();
                self.log.info(format_args!(
                    "property_activate chinese={} caps_lock_off={}",
                    chinese, caps_off
                ));
                if self.config.sync_caps_lock != CapsLockSync::Disable && chinese != caps_off {
                    self.host.set_caps_lock_led(!chinese);
                }
            }
            PropertyId::AlnumSize => {
                let full = !self.backend.full_shape();
                self.backend.set_full_shape(full);
            }
            PropertyId::Settings => self.run_settings_dialog(),
        }
        self.refresh_property(id);
    }

    fn run_settings_dialog(&mut self) {
        let entries = self.config.entries();
        let outcome = self.dialog.run("Setting", &entries);
        let edits = match outcome {
            DialogOutcome::Confirmed(edits) => edits,
            DialogOutcome::Cancelled => return,
        };
        let mut config = self.config.clone();
        for (key, raw) in &edits {
            if let Err(err) = config.set(key, raw) {
                self.log.warn(format_args!("settings: {}", err));
            }
        }
        self.apply_config(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names() {
        assert_eq!("chewing_chieng_prop".parse::<PropertyId>(), Ok(PropertyId::ChiEng));
        assert_eq!("chewing_alnumSize_prop".parse::<PropertyId>(), Ok(PropertyId::AlnumSize));
        assert_eq!("chewing_settings_prop".parse::<PropertyId>(), Ok(PropertyId::Settings));
        assert!("InputMode".parse::<PropertyId>().is_err());
    }

    #[test]
    fn test_labels_follow_mode() {
        assert_eq!(Property::chi_eng(true).label, "中");
        assert_eq!(Property::chi_eng(false).label, "英");
        assert_eq!(Property::alnum_size(true).label, "全");
        assert_eq!(Property::alnum_size(false).label, "半");
    }

    #[test]
    fn test_prop_state_from_raw() {
        assert_eq!(PropState::from_raw(0), PropState::Unchecked);
        assert_eq!(PropState::from_raw(1), PropState::Checked);
        assert_eq!(PropState::from_raw(7), PropState::Unchecked);
    }
}
