//! Key definitions and binding channels.
//!
//! A [`Key`] is what the parser makes of one or three raw input bytes. Keys
//! that user code can react to map onto one of the seven [`Channel`]s.

/// Keys recognised by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable ASCII character, 0x20 through 0x7E
    Printable(char),
    /// Carriage return (0x0D)
    Enter,
    /// DEL (0x7F), sent by the backspace key in raw mode
    Backspace,
    /// ETX (0x03), Ctrl+C
    Interrupt,
    /// EOT (0x04), Ctrl+D
    EndOfInput,
    /// ESC followed by two bytes that do not form a CSI sequence
    Escape,

    // Navigation keys (arrow keys)
    Up,
    Down,
    Right,
    Left,

    /// Byte with no meaning to the editor
    Ignored(u8),
}

impl Key {
    /// Binding channel this key is delivered on, if any.
    pub fn channel(self) -> Option<Channel> {
        match self {
            Key::Left => Some(Channel::Left),
            Key::Right => Some(Channel::Right),
            Key::Up => Some(Channel::Up),
            Key::Down => Some(Channel::Down),
            Key::Interrupt => Some(Channel::Interrupt),
            Key::EndOfInput => Some(Channel::EndOfInput),
            Key::Escape => Some(Channel::Escape),
            Key::Printable(_) | Key::Enter | Key::Backspace | Key::Ignored(_) => None,
        }
    }
}

/// Named event categories that callbacks can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Left,
    Right,
    Up,
    Down,
    Interrupt,
    EndOfInput,
    Escape,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Left,
        Channel::Right,
        Channel::Up,
        Channel::Down,
        Channel::Interrupt,
        Channel::EndOfInput,
        Channel::Escape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Left => "left",
            Channel::Right => "right",
            Channel::Up => "up",
            Channel::Down => "down",
            Channel::Interrupt => "interrupt",
            Channel::EndOfInput => "end-of-input",
            Channel::Escape => "escape",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
