//! Key scripts: a plain-text list of key events replayed against an engine.
//!
//! Each line holds either key tokens separated by whitespace or one command
//! starting with `!`. A `#` token starts a comment.
//!
//! ```text
//! # 測試
//! h k 4 g 4 space 3 Return
//! S-space          # shift+space toggles full width
//! Shift_L ~Shift_L # a shift tap toggles Chinese/English
//! !click 2
//! !type su3cl3
//! ```
//!
//! Key tokens are keysym names (`Return`, `KP_5`), single printable
//! characters, or hex literals (`0xff0d`), with optional `S-`, `C-` and `M-`
//! modifier prefixes. A leading `~` makes the token a key release.

use std::fmt;

use chewing_core::keysym::{key_name, keysym_from_name, ModifierMask};
use chewing_core::{ChewingEngine, PhoneticBackend};
use thiserror::Error;

use crate::console::ConsoleHost;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown key {token:?}")]
    UnknownKey { line: usize, token: String },
    #[error("line {line}: unknown command !{command}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: !{command} needs an argument")]
    MissingArgument { line: usize, command: String },
    #[error("line {line}: {value:?} is not a number")]
    BadNumber { line: usize, value: String },
}

/// One replayable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key { keysym: u32, modifiers: ModifierMask },
    Click(u32),
    Property(String),
    Purpose(u32),
    FocusIn,
    FocusOut,
    Reset,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key { keysym, modifiers } => {
                if modifiers.is_release() {
                    f.write_str("~")?;
                }
                for (flag, prefix) in [
                    (ModifierMask::SHIFT, "S-"),
                    (ModifierMask::CONTROL, "C-"),
                    (ModifierMask::MOD1, "M-"),
                ] {
                    if modifiers.contains(flag) {
                        f.write_str(prefix)?;
                    }
                }
                match char::from_u32(*keysym).filter(char::is_ascii_graphic) {
                    Some(ch) => write!(f, "{}", ch),
                    None => f.write_str(key_name(*keysym)),
                }
            }
            Step::Click(index) => write!(f, "!click {}", index),
            Step::Property(name) => write!(f, "!prop {}", name),
            Step::Purpose(purpose) => write!(f, "!purpose {}", purpose),
            Step::FocusIn => f.write_str("!focus-in"),
            Step::FocusOut => f.write_str("!focus-out"),
            Step::Reset => f.write_str("!reset"),
        }
    }
}

fn parse_key(token: &str, line: usize) -> Result<Step, ScriptError> {
    let mut modifiers = ModifierMask::empty();
    let mut rest = token;
    if let Some(stripped) = rest.strip_prefix('~').filter(|s| !s.is_empty()) {
        modifiers |= ModifierMask::RELEASE;
        rest = stripped;
    }
    loop {
        let flag = match rest.get(..2) {
            Some("S-") => ModifierMask::SHIFT,
            Some("C-") => ModifierMask::CONTROL,
            Some("M-") => ModifierMask::MOD1,
            _ => break,
        };
        if rest.len() == 2 {
            break;
        }
        modifiers |= flag;
        rest = &rest[2..];
    }
    let keysym = keysym_from_name(rest).ok_or_else(|| ScriptError::UnknownKey {
        line,
        token: token.to_string(),
    })?;
    Ok(Step::Key { keysym, modifiers })
}

fn parse_number(value: Option<&str>, command: &str, line: usize) -> Result<u32, ScriptError> {
    let value = value.ok_or_else(|| ScriptError::MissingArgument { line, command: command.to_string() })?;
    value.parse().map_err(|_| ScriptError::BadNumber { line, value: value.to_string() })
}

fn parse_command(words: &[&str], line: usize) -> Result<Vec<Step>, ScriptError> {
    let command = words[0].trim_start_matches('!');
    let argument = words.get(1).copied();
    let missing = || ScriptError::MissingArgument { line, command: command.to_string() };
    let step = match command {
        "click" => Step::Click(parse_number(argument, command, line)?),
        "purpose" => Step::Purpose(parse_number(argument, command, line)?),
        "prop" => Step::Property(argument.ok_or_else(missing)?.to_string()),
        "focus-in" => Step::FocusIn,
        "focus-out" => Step::FocusOut,
        "reset" => Step::Reset,
        "type" => {
            let text = argument.ok_or_else(missing)?;
            return Ok(text
                .chars()
                .map(|ch| Step::Key { keysym: ch as u32, modifiers: ModifierMask::empty() })
                .collect());
        }
        _ => return Err(ScriptError::UnknownCommand { line, command: command.to_string() }),
    };
    Ok(vec![step])
}

/// Parse a whole script.
pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let words: Vec<&str> = raw
            .split_whitespace()
            .take_while(|word| !word.starts_with('#'))
            .collect();
        match words.first() {
            None => continue,
            Some(first) if first.starts_with('!') && first.len() > 1 => {
                steps.extend(parse_command(&words, line)?);
            }
            Some(_) => {
                for word in &words {
                    steps.push(parse_key(word, line)?);
                }
            }
        }
    }
    Ok(steps)
}

/// Replay `steps`, noting each one in the console transcript.
///
/// Returns the number of key events the engine consumed.
pub fn run_script<B: PhoneticBackend>(engine: &mut ChewingEngine<B, ConsoleHost>, steps: &[Step]) -> usize {
    let mut consumed = 0;
    for step in steps {
        engine.host_mut().note(format!("> {}", step));
        match step {
            Step::Key { keysym, modifiers } => {
                if engine.process_key_event(*keysym, 0, *modifiers) {
                    consumed += 1;
                } else if !modifiers.is_release() {
                    engine.host_mut().note("  (passed to application)");
                }
            }
            Step::Click(index) => engine.candidate_clicked(*index, 1, 0),
            Step::Property(name) => engine.property_activate(name, 0),
            Step::Purpose(purpose) => engine.set_content_type(*purpose, 0),
            Step::FocusIn => engine.focus_in(),
            Step::FocusOut => engine.focus_out(),
            Step::Reset => engine.reset(),
        }
    }
    consumed
}
