//! ANSI/VT100 display sink.

use std::io::{self, Write};

use linekit_core::{Attribute, DisplayOp, DisplaySink};

/// Escape sequence for a display primitive. Text is passed through untouched.
pub fn encode(op: &DisplayOp) -> String {
    match op {
        DisplayOp::Text(text) => text.clone(),
        DisplayOp::Up(n) => format!("\x1b[{n}A"),
        DisplayOp::Down(n) => format!("\x1b[{n}B"),
        DisplayOp::Right(n) => format!("\x1b[{n}C"),
        DisplayOp::Left(n) => format!("\x1b[{n}D"),
        DisplayOp::MoveTo { row, col } => format!("\x1b[{row};{col}H"),
        DisplayOp::ClearToEndOfLine => "\x1b[0K".to_string(),
        DisplayOp::ClearScreen => "\x1b[2J".to_string(),
        DisplayOp::Attribute(attribute) => encode_attribute(*attribute),
    }
}

fn encode_attribute(attribute: Attribute) -> String {
    match attribute {
        Attribute::Reset => "\x1b[0m".to_string(),
        Attribute::Bold => "\x1b[1m".to_string(),
        Attribute::Underline => "\x1b[4m".to_string(),
        Attribute::Inverse => "\x1b[7m".to_string(),
        Attribute::Foreground(n) => format!("\x1b[38;5;{n}m"),
        Attribute::BrightBackground(code) => format!("\x1b[{code};1m"),
        Attribute::Background(code) => format!("\x1b[{code}m"),
    }
}

/// Display sink writing escape sequences to any writer.
pub struct AnsiDisplay<W: Write + Send> {
    writer: W,
}

impl AnsiDisplay<io::Stdout> {
    /// Sink on the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> AnsiDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> DisplaySink for AnsiDisplay<W> {
    fn apply(&mut self, op: DisplayOp) -> io::Result<()> {
        self.writer.write_all(encode(&op).as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
