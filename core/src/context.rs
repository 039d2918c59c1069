//! IME context for platform communication.
//!
//! The `ImeContext` struct is a simple data container with public fields. The
//! engine fills one in on every display update and hands it to
//! [`Host::update_display`](crate::Host::update_display); the host reads the
//! fields to draw the preedit, the lookup table and the auxiliary text.

/// Input purpose announced by the client, with IBus numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPurpose {
    /// Free-form text input (default)
    #[default]
    FreeForm,
    Alpha,
    Digits,
    Number,
    Phone,
    Url,
    Email,
    Name,
    /// Password (nothing may reach the backend)
    Password,
    /// PIN, treated like a password
    Pin,
    /// Terminal/command line
    Terminal,
}

impl InputPurpose {
    /// Map an IBus purpose value; unknown values are free-form.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Alpha,
            2 => Self::Digits,
            3 => Self::Number,
            4 => Self::Phone,
            5 => Self::Url,
            6 => Self::Email,
            7 => Self::Name,
            8 => Self::Password,
            9 => Self::Pin,
            10 => Self::Terminal,
            _ => Self::FreeForm,
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::Pin)
    }
}

/// Snapshot of what the host should display.
///
/// # Fields
///
/// - `preedit_text`: Text being composed (displayed with underline)
/// - `preedit_cursor`: Cursor position within preedit, in characters
/// - `candidates`: Candidates of the current page
/// - `auxiliary_text`: Hint text from the backend (e.g. a page indicator)
/// - `input_purpose`: What the client said it expects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeContext {
    pub preedit_text: String,
    pub preedit_cursor: usize,
    pub candidates: Vec<String>,
    pub auxiliary_text: String,
    pub input_purpose: InputPurpose,
    pub input_hints: u32,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the displayed state, keeping the purpose and hints.
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.preedit_cursor = 0;
        self.candidates.clear();
        self.auxiliary_text.clear();
    }

    /// Check if there's any visible state (preedit or candidates).
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || !self.candidates.is_empty()
    }

    pub fn set_input_purpose(&mut self, purpose: InputPurpose, hints: u32) {
        self.input_purpose = purpose;
        self.input_hints = hints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_from_raw() {
        assert_eq!(InputPurpose::from_raw(0), InputPurpose::FreeForm);
        assert_eq!(InputPurpose::from_raw(8), InputPurpose::Password);
        assert_eq!(InputPurpose::from_raw(9), InputPurpose::Pin);
        assert_eq!(InputPurpose::from_raw(99), InputPurpose::FreeForm);
        assert!(InputPurpose::Pin.is_secret());
        assert!(!InputPurpose::Terminal.is_secret());
    }

    #[test]
    fn test_clear_keeps_purpose() {
        let mut ctx = ImeContext::new();
        ctx.preedit_text = "ㄅ".to_string();
        ctx.candidates = vec!["八".to_string()];
        ctx.set_input_purpose(InputPurpose::Email, 0);
        assert!(ctx.has_visible_state());
        ctx.clear();
        assert!(!ctx.has_visible_state());
        assert_eq!(ctx.input_purpose, InputPurpose::Email);
    }
}
