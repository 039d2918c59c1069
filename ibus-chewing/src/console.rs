//! Terminal stand-in for the input framework.
//!
//! Every request the engine makes is rendered as one transcript line, so a
//! replayed key script reads like a log of what an IBus panel would show.

use chewing_core::{Host, ImeContext, Property};

#[derive(Debug, Default, Clone)]
pub struct ConsoleHost {
    transcript: Vec<String>,
    committed: String,
    caps_led: bool,
    /// Last rendered preedit, to skip identical redraws.
    last_display: Option<String>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caps_lock_led(mut self, on: bool) -> Self {
        self.caps_led = on;
        self
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Everything committed to the client so far.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Add a free-form line, e.g. the key being replayed.
    pub fn note(&mut self, line: impl Into<String>) {
        self.transcript.push(line.into());
    }
}

fn render(context: &ImeContext) -> String {
    let mut preedit: String = context.preedit_text.clone();
    let byte_cursor = preedit
        .char_indices()
        .nth(context.preedit_cursor)
        .map(|(i, _)| i)
        .unwrap_or(preedit.len());
    preedit.insert(byte_cursor, '|');

    let mut line = format!("preedit [{}]", preedit);
    if !context.candidates.is_empty() {
        let list: Vec<String> = context
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}.{}", (i + 1) % 10, c))
            .collect();
        line.push_str(&format!(" candidates {}", list.join(" ")));
    }
    if !context.auxiliary_text.is_empty() {
        line.push_str(&format!(" aux {}", context.auxiliary_text));
    }
    line
}

impl Host for ConsoleHost {
    fn commit_text(&mut self, text: &str) {
        self.transcript.push(format!("commit {:?}", text));
        self.committed.push_str(text);
    }

    fn update_display(&mut self, context: &ImeContext) {
        let line = render(context);
        if self.last_display.as_deref() != Some(line.as_str()) {
            self.transcript.push(line.clone());
            self.last_display = Some(line);
        }
    }

    fn register_properties(&mut self, properties: &[Property]) {
        let labels: Vec<&str> = properties.iter().map(|p| p.label.as_str()).collect();
        self.transcript.push(format!("properties {}", labels.join(" ")));
    }

    fn refresh_property(&mut self, property: &Property) {
        self.transcript.push(format!("property {} {}", property.id, property.label));
    }

    fn caps_lock_led(&self) -> bool {
        self.caps_led
    }

    fn set_caps_lock_led(&mut self, on: bool) {
        self.transcript.push(format!("caps-lock-led {}", if on { "on" } else { "off" }));
        self.caps_led = on;
    }
}
