//! What the engine asks of the input framework.

use crate::context::ImeContext;
use crate::properties::Property;

/// The input framework side of an engine.
pub trait Host {
    /// Insert `text` into the client application.
    fn commit_text(&mut self, text: &str);

    /// Redraw preedit, lookup table and auxiliary text.
    fn update_display(&mut self, context: &ImeContext);

    /// Show the indicators for this engine, e.g. on focus-in.
    fn register_properties(&mut self, properties: &[Property]);

    /// Redraw one indicator after its state changed.
    fn refresh_property(&mut self, property: &Property);

    /// Current Caps Lock LED state.
    fn caps_lock_led(&self) -> bool;

    fn set_caps_lock_led(&mut self, on: bool);
}
