//! State machine that classifies raw terminal input bytes.
//!
//! The parser is fed one byte at a time. Most bytes map straight to a [`Key`];
//! ESC switches into [`ParserState::EscapePending`], which swallows exactly two
//! more bytes before deciding between an arrow key and a plain escape.

use crate::key::Key;

pub const ETX: u8 = 0x03;
pub const EOT: u8 = 0x04;
pub const CR: u8 = 0x0D;
pub const ESC: u8 = 0x1B;
pub const DEL: u8 = 0x7F;
const CSI_INTRODUCER: u8 = b'[';

/// Parser state between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Plain input
    Normal,
    /// ESC seen; `first` holds the byte after it once read
    EscapePending { first: Option<u8> },
}

/// Converts raw input bytes into key events.
#[derive(Debug, Clone)]
pub struct KeyParser {
    state: ParserState,
}

impl Default for KeyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Normal,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// True while an escape sequence is only partially read.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ParserState::EscapePending { .. })
    }

    /// Feed one byte. Returns the key it completes, or `None` while an escape
    /// sequence is still being collected.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        match self.state {
            ParserState::Normal => self.handle_normal_byte(byte),
            ParserState::EscapePending { first: None } => {
                self.state = ParserState::EscapePending { first: Some(byte) };
                None
            }
            ParserState::EscapePending { first: Some(first) } => {
                self.state = ParserState::Normal;
                Some(Self::resolve_escape(first, byte))
            }
        }
    }

    /// Feed a run of bytes and collect every completed key.
    pub fn feed_bytes(&mut self, data: &[u8]) -> Vec<Key> {
        data.iter().filter_map(|&byte| self.feed(byte)).collect()
    }

    /// Drop any half-read escape sequence and return to `Normal`.
    ///
    /// Returns true if something was discarded.
    pub fn flush(&mut self) -> bool {
        let pending = self.is_pending();
        self.state = ParserState::Normal;
        pending
    }

    fn handle_normal_byte(&mut self, byte: u8) -> Option<Key> {
        let key = match byte {
            ETX => Key::Interrupt,
            EOT => Key::EndOfInput,
            ESC => {
                self.state = ParserState::EscapePending { first: None };
                return None;
            }
            CR => Key::Enter,
            0x20..=0x7E => Key::Printable(byte as char),
            DEL => Key::Backspace,
            other => Key::Ignored(other),
        };
        Some(key)
    }

    fn resolve_escape(first: u8, second: u8) -> Key {
        if first != CSI_INTRODUCER {
            return Key::Escape;
        }
        match second {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            other => Key::Ignored(other),
        }
    }
}
