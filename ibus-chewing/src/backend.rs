//! Bopomofo backend for the engine.
//!
//! Keys fill the four slots of a syllable on the Da-Chen layout. A tone key
//! (or Space, for the first tone) completes the syllable, which becomes one
//! segment of the preedit holding the most likely character. Each segment
//! keeps its candidate list so it can be re-chosen later.

use chewing_core::keysym::{key_name, keysym_to_char};
use chewing_core::settings::KB_TYPES;
use chewing_core::utils::fullwidth_char;
use chewing_core::{BackendCommand, Config, PhoneticBackend};
use tracing::{debug, info, warn};

use crate::layout::{self, Slot};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    candidates: Vec<&'static str>,
}

impl Segment {
    fn literal(ch: char) -> Self {
        Self { text: ch.to_string(), candidates: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    segment: usize,
    page: usize,
}

/// In-memory phonetic backend using the Da-Chen layout and a built-in
/// syllable table.
#[derive(Debug, Clone)]
pub struct BopomofoBackend {
    chinese: bool,
    full: bool,
    easy_symbol: bool,
    /// Initial, medial, final and tone.
    syllable: [Option<char>; 4],
    segments: Vec<Segment>,
    /// Insertion point, counted in segments.
    cursor: usize,
    selection: Option<Selection>,
    committed: String,
    user_phrases: Vec<String>,

    per_page: usize,
    sel_keys: Vec<char>,
    max_chi_symbol_len: usize,
    auto_shift_cur: bool,
    esc_clean_all_buf: bool,
    space_as_selection: bool,
    phrase_choice_rearward: bool,
    show_page_number: bool,
}

impl Default for BopomofoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BopomofoBackend {
    pub fn new() -> Self {
        let mut backend = Self {
            chinese: true,
            full: false,
            easy_symbol: false,
            syllable: [None; 4],
            segments: Vec::new(),
            cursor: 0,
            selection: None,
            committed: String::new(),
            user_phrases: Vec::new(),
            per_page: 10,
            sel_keys: Vec::new(),
            max_chi_symbol_len: 20,
            auto_shift_cur: false,
            esc_clean_all_buf: false,
            space_as_selection: true,
            phrase_choice_rearward: true,
            show_page_number: false,
        };
        backend.configure(&Config::default());
        backend
    }

    /// Phrases recorded with Control+digit, oldest first.
    pub fn user_phrases(&self) -> &[String] {
        &self.user_phrases
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    fn syllable_text(&self) -> String {
        self.syllable.iter().flatten().collect()
    }

    fn buffer_is_empty(&self) -> bool {
        self.segments.is_empty() && !self.has_incomplete_syllable()
    }

    fn clear(&mut self) {
        self.syllable = [None; 4];
        self.segments.clear();
        self.cursor = 0;
        self.selection = None;
    }

    fn shaped(&self, ch: char) -> char {
        if self.full {
            fullwidth_char(ch)
        } else {
            ch
        }
    }

    fn insert_segment(&mut self, segment: Segment) {
        self.segments.insert(self.cursor, segment);
        self.cursor += 1;
        while self.segments.len() > self.max_chi_symbol_len {
            let first = self.segments.remove(0);
            debug!("buffer full, committing {:?}", first.text);
            self.committed.push_str(&first.text);
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Put a symbol in its slot; a tone completes the syllable.
    fn key_symbol(&mut self, slot: Slot, symbol: char) {
        match slot {
            Slot::Tone => {
                if self.has_incomplete_syllable() {
                    self.syllable[3] = Some(symbol);
                    self.complete_syllable();
                } else {
                    debug!("tone {:?} without a syllable ignored", symbol);
                }
            }
            Slot::Initial => self.syllable[0] = Some(symbol),
            Slot::Medial => self.syllable[1] = Some(symbol),
            Slot::Final => self.syllable[2] = Some(symbol),
        }
    }

    fn complete_syllable(&mut self) {
        let key = self.syllable_text();
        self.syllable = [None; 4];
        let candidates = layout::candidates(&key);
        let segment = match candidates.first() {
            Some(first) => Segment { text: first.to_string(), candidates },
            None => {
                debug!("no candidates for {:?}", key);
                Segment { text: key, candidates: Vec::new() }
            }
        };
        self.insert_segment(segment);
    }

    fn default_char(&mut self, ch: char) {
        if let Some(selection) = self.selection {
            match self.sel_keys.iter().position(|&k| k == ch) {
                Some(index) if index < self.per_page => self.choose(selection, index),
                _ => debug!("{:?} is not a selection key", ch),
            }
            return;
        }
        if !self.chinese {
            if self.buffer_is_empty() {
                self.committed.push(self.shaped(ch));
            } else {
                self.insert_segment(Segment::literal(self.shaped(ch)));
            }
            return;
        }
        if !self.easy_symbol {
            if let Some((slot, symbol)) = layout::lookup(ch) {
                self.key_symbol(slot, symbol);
                return;
            }
        }
        self.insert_segment(Segment::literal(self.shaped(ch)));
    }

    fn space(&mut self) {
        if let Some(selection) = self.selection {
            let next = if selection.page + 1 < self.page_count() { selection.page + 1 } else { 0 };
            self.selection = Some(Selection { page: next, ..selection });
        } else if self.has_incomplete_syllable() {
            self.complete_syllable();
        } else if self.segments.is_empty() {
            self.committed.push(self.shaped(' '));
        } else if !(self.chinese && self.space_as_selection && self.open_selection()) {
            self.insert_segment(Segment::literal(self.shaped(' ')));
        }
    }

    /// Segment whose candidates a new selection shows.
    fn selection_target(&self) -> Option<usize> {
        if self.segments.is_empty() {
            return None;
        }
        let at_cursor = self.cursor.min(self.segments.len() - 1);
        if self.phrase_choice_rearward {
            Some(self.cursor.saturating_sub(1))
        } else {
            Some(at_cursor)
        }
    }

    fn open_selection(&mut self) -> bool {
        if self.has_incomplete_syllable() {
            return false;
        }
        match self.selection_target() {
            Some(segment) if !self.segments[segment].candidates.is_empty() => {
                self.selection = Some(Selection { segment, page: 0 });
                true
            }
            _ => false,
        }
    }

    fn choose(&mut self, selection: Selection, index: usize) {
        let absolute = selection.page * self.per_page + index;
        let segment = &mut self.segments[selection.segment];
        let Some(choice) = segment.candidates.get(absolute) else {
            debug!("no candidate at {}", absolute);
            return;
        };
        segment.text = choice.to_string();
        self.selection = None;
        if self.auto_shift_cur && selection.segment == self.cursor {
            self.cursor += 1;
        }
    }

    fn page_count(&self) -> usize {
        self.total_choice().div_ceil(self.per_page.max(1))
    }

    fn turn_page(&mut self, forward: bool) {
        let pages = self.page_count();
        if let Some(selection) = self.selection.as_mut() {
            selection.page = if forward {
                (selection.page + 1).min(pages.saturating_sub(1))
            } else {
                selection.page.saturating_sub(1)
            };
        }
    }

    fn backspace(&mut self) {
        if let Some(last) = self.syllable.iter().rposition(Option::is_some) {
            self.syllable[last] = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
            self.segments.remove(self.cursor);
        }
    }

    fn add_user_phrase(&mut self, len: usize) {
        if len < 2 || len > self.cursor {
            debug!("cannot add a phrase of {} before cursor {}", len, self.cursor);
            return;
        }
        let phrase: String = self.segments[self.cursor - len..self.cursor]
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        if !self.user_phrases.contains(&phrase) {
            info!("added user phrase {:?}", phrase);
            self.user_phrases.push(phrase);
        }
    }
}

impl PhoneticBackend for BopomofoBackend {
    fn chinese_mode(&self) -> bool {
        self.chinese
    }

    fn set_chinese_mode(&mut self, chinese: bool) {
        self.chinese = chinese;
    }

    fn full_shape(&self) -> bool {
        self.full
    }

    fn set_full_shape(&mut self, full: bool) {
        self.full = full;
    }

    fn set_easy_symbol_input(&mut self, on: bool) {
        self.easy_symbol = on;
    }

    fn handle(&mut self, command: BackendCommand) {
        use BackendCommand::*;

        debug!("handle {:?}", command);
        let idle = !self.has_incomplete_syllable();
        match command {
            Default(sym) => match keysym_to_char(sym) {
                Some(ch) => self.default_char(ch),
                None => debug!("keysym {:x} ({}) has no character", sym, key_name(sym)),
            },
            Space => self.space(),
            Enter => self.commit_preedit(),
            Backspace | Delete | Esc | Up if self.selection.is_some() => self.selection = None,
            Esc if self.esc_clean_all_buf => self.clear(),
            Esc => self.syllable = [None; 4],
            Backspace => self.backspace(),
            Delete => {
                if idle && self.cursor < self.segments.len() {
                    self.segments.remove(self.cursor);
                }
            }
            Left | PageUp if self.selection.is_some() => self.turn_page(false),
            Right | PageDown | Down if self.selection.is_some() => self.turn_page(true),
            Left if idle => self.cursor = self.cursor.saturating_sub(1),
            Right if idle => self.cursor = (self.cursor + 1).min(self.segments.len()),
            Home if idle => self.cursor = 0,
            End if idle => self.cursor = self.segments.len(),
            Down => {
                self.open_selection();
            }
            ShiftSpace => self.full = !self.full,
            CapsLock => self.chinese = !self.chinese,
            CtrlNum(sym) => {
                if let Some(digit) = char::from_u32(sym).and_then(|c| c.to_digit(10)) {
                    self.add_user_phrase(digit as usize);
                }
            }
            Left | Right | Home | End | Up | PageUp | PageDown | Tab | ShiftLeft | ShiftRight => {}
        }
    }

    fn cand_per_page(&self) -> usize {
        self.per_page
    }

    fn total_choice(&self) -> usize {
        self.selection
            .map(|s| self.segments[s.segment].candidates.len())
            .unwrap_or(0)
    }

    fn has_incomplete_syllable(&self) -> bool {
        self.syllable.iter().any(Option::is_some)
    }

    fn preedit(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments[..self.cursor] {
            text.push_str(&segment.text);
        }
        text.push_str(&self.syllable_text());
        for segment in &self.segments[self.cursor..] {
            text.push_str(&segment.text);
        }
        text
    }

    fn cursor(&self) -> usize {
        let before: usize = self.segments[..self.cursor].iter().map(|s| s.text.chars().count()).sum();
        before + self.syllable.iter().flatten().count()
    }

    fn candidates(&self) -> Vec<String> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };
        self.segments[selection.segment]
            .candidates
            .iter()
            .skip(selection.page * self.per_page)
            .take(self.per_page)
            .map(|c| c.to_string())
            .collect()
    }

    fn aux_text(&self) -> String {
        match self.selection {
            Some(selection) if self.show_page_number => {
                format!("{}/{}", selection.page + 1, self.page_count())
            }
            _ => String::new(),
        }
    }

    fn take_commit(&mut self) -> Option<String> {
        if self.committed.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.committed))
        }
    }

    fn commit_preedit(&mut self) {
        let text = self.preedit();
        self.committed.push_str(&text);
        self.clear();
    }

    fn reset(&mut self) {
        self.clear();
        self.committed.clear();
    }

    fn configure(&mut self, config: &Config) {
        if config.kb_type != KB_TYPES[0] {
            warn!("keyboard layout {:?} is not supported, using the default layout", config.kb_type);
        }
        self.per_page = config.cand_per_page.max(1) as usize;
        self.sel_keys = config.sel_key_chars();
        self.max_chi_symbol_len = config.max_chi_symbol_len.max(1) as usize;
        self.auto_shift_cur = config.auto_shift_cur;
        self.esc_clean_all_buf = config.esc_clean_all_buf;
        self.space_as_selection = config.space_as_selection;
        self.phrase_choice_rearward = config.phrase_choice_rearward;
        self.show_page_number = config.show_page_number;
    }
}
