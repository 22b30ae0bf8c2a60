//! Display sink abstraction.
//!
//! The editor never writes escape sequences itself. It describes what should
//! happen on screen as [`DisplayOp`] values and hands them to a [`DisplaySink`].
//! `linekit-io` provides the ANSI implementation; [`RecordingDisplay`] keeps the
//! operations in memory so tests can assert on them.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// SGR attributes understood by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Reset all attributes to default
    Reset,
    Bold,
    Underline,
    /// Swap foreground and background
    Inverse,
    /// 256-colour palette foreground
    Foreground(u8),
    /// Background code rendered with the bright modifier
    BrightBackground(u8),
    /// Background code as-is
    Background(u8),
}

/// A single display primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayOp {
    /// Raw text at the current cursor position
    Text(String),
    Up(usize),
    Down(usize),
    Right(usize),
    Left(usize),
    /// Absolute position, 1-based as in the terminal protocol
    MoveTo { row: u16, col: u16 },
    /// Erase from the cursor to the end of the line
    ClearToEndOfLine,
    /// Erase the whole screen
    ClearScreen,
    Attribute(Attribute),
}

/// Output side of the terminal as seen by the editor.
///
/// Implementors only need [`apply`](DisplaySink::apply) and
/// [`flush`](DisplaySink::flush). The provided helpers drop relative moves of
/// zero cells, so sinks never see an `Up(0)` and friends.
pub trait DisplaySink: Send {
    /// Perform one primitive.
    fn apply(&mut self, op: DisplayOp) -> io::Result<()>;

    /// Push buffered output to the device.
    fn flush(&mut self) -> io::Result<()>;

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.apply(DisplayOp::Text(text.to_string()))
    }

    fn move_up(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.apply(DisplayOp::Up(n))
    }

    fn move_down(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.apply(DisplayOp::Down(n))
    }

    fn move_right(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.apply(DisplayOp::Right(n))
    }

    fn move_left(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.apply(DisplayOp::Left(n))
    }

    fn move_to(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.apply(DisplayOp::MoveTo { row, col })
    }

    /// Move left by `width` then erase to the end of the line.
    fn erase_line(&mut self, width: usize) -> io::Result<()> {
        self.apply(DisplayOp::Left(width))?;
        self.apply(DisplayOp::ClearToEndOfLine)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.apply(DisplayOp::ClearScreen)
    }

    fn set_attribute(&mut self, attribute: Attribute) -> io::Result<()> {
        self.apply(DisplayOp::Attribute(attribute))
    }
}

/// In-memory sink recording every primitive it receives.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to a [`LineBuffer`](crate::buffer::LineBuffer).
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    ops: Arc<Mutex<Vec<DisplayOp>>>,
    flushes: Arc<Mutex<usize>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<DisplayOp>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All recorded primitives, oldest first.
    pub fn ops(&self) -> Vec<DisplayOp> {
        self.log().clone()
    }

    /// Concatenation of every `Text` primitive.
    pub fn text_output(&self) -> String {
        self.log()
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.log().clear();
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner) = 0;
    }
}

impl DisplaySink for RecordingDisplay {
    fn apply(&mut self, op: DisplayOp) -> io::Result<()> {
        self.log().push(op);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
