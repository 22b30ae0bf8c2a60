//! Input dispatcher and main loop.
//!
//! The [`Dispatcher`] owns the line buffer, the binding registry and the key
//! parser. It reads one byte at a time, turns completed keys into buffer edits
//! or channel callbacks, and repaints the current row after every event.
//!
//! The loop never calls `process::exit`. Callbacks return [`Signal::Exit`] and
//! [`Dispatcher::run`] hands the code back, so the caller can restore the
//! terminal before leaving.

use log::{debug, trace};

use crate::bindings::{BindingRegistry, Signal};
use crate::buffer::LineBuffer;
use crate::config::EditorConfig;
use crate::display::DisplaySink;
use crate::error::EditorResult;
use crate::input::ByteSource;
use crate::key::{Channel, Key};
use crate::key_parser::KeyParser;

/// Drives a [`LineBuffer`] from raw input bytes.
#[derive(Debug)]
pub struct Dispatcher {
    buffer: LineBuffer,
    bindings: BindingRegistry,
    parser: KeyParser,
}

impl Dispatcher {
    /// Create a dispatcher with an empty buffer and no bindings.
    ///
    /// # Examples
    ///
    /// ```
    /// use linekit_core::display::RecordingDisplay;
    /// use linekit_core::dispatcher::Dispatcher;
    ///
    /// let mut dispatcher = Dispatcher::new(Box::new(RecordingDisplay::new()));
    /// for &byte in b"ab\rc" {
    ///     dispatcher.handle_byte(byte).unwrap();
    /// }
    /// assert_eq!(dispatcher.buffer().lines(), ["ab", "c"]);
    /// ```
    pub fn new(display: Box<dyn DisplaySink>) -> Self {
        Self::with_config(display, &EditorConfig::default())
    }

    pub fn with_config(display: Box<dyn DisplaySink>, config: &EditorConfig) -> Self {
        Self::from_buffer(LineBuffer::with_config(display, config))
    }

    pub fn from_buffer(buffer: LineBuffer) -> Self {
        Dispatcher {
            buffer,
            bindings: BindingRegistry::new(),
            parser: KeyParser::new(),
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn parser(&self) -> &KeyParser {
        &self.parser
    }

    pub fn into_buffer(self) -> LineBuffer {
        self.buffer
    }

    /// Append a callback to `channel`.
    pub fn bind<F>(&mut self, channel: Channel, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bindings.bind(channel, callback);
    }

    pub fn bind_left_arrow<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Left, callback);
    }

    pub fn bind_right_arrow<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Right, callback);
    }

    pub fn bind_up_arrow<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Up, callback);
    }

    pub fn bind_down_arrow<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Down, callback);
    }

    pub fn bind_interrupt<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Interrupt, callback);
    }

    pub fn bind_end_of_input<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::EndOfInput, callback);
    }

    pub fn bind_escape<F>(&mut self, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        self.bind(Channel::Escape, callback);
    }

    /// Invoke the callbacks of `channel` directly, without any input.
    pub fn fire(&mut self, channel: Channel) -> EditorResult<Signal> {
        self.bindings.invoke(channel, &mut self.buffer)
    }

    /// Invoke the end-of-input callbacks. Byte 0x04 reaches the same channel
    /// through [`handle_byte`](Self::handle_byte).
    pub fn fire_end_of_input(&mut self) -> EditorResult<Signal> {
        self.fire(Channel::EndOfInput)
    }

    /// Apply a completed key to the buffer or its channel. Does not repaint.
    pub fn apply_key(&mut self, key: Key) -> EditorResult<Signal> {
        trace!("key {key:?}");
        if let Some(channel) = key.channel() {
            return self.fire(channel);
        }
        match key {
            Key::Enter => self.buffer.split_line_at_cursor()?,
            Key::Printable(ch) => self.buffer.insert_printable(ch),
            Key::Backspace => self.buffer.delete_backward(),
            _ => {}
        }
        Ok(Signal::Continue)
    }

    /// Process one raw input byte.
    ///
    /// Bytes inside an escape sequence are only collected. Every completed
    /// event, unmapped bytes included, ends with a repaint of the current row,
    /// unless a callback asked to exit.
    pub fn handle_byte(&mut self, byte: u8) -> EditorResult<Signal> {
        trace!("byte {byte:#04x}");
        let Some(key) = self.parser.feed(byte) else {
            return Ok(Signal::Continue);
        };

        let signal = self.apply_key(key)?;
        if signal.is_exit() {
            return Ok(signal);
        }
        self.buffer.repaint_current_line()?;
        self.buffer.flush()?;
        Ok(signal)
    }

    /// Read one byte from `source` and process it.
    ///
    /// The end of the stream, even in the middle of an escape sequence, ends
    /// the loop with `Exit(0)`.
    pub fn step<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> EditorResult<Signal> {
        match source.read_byte()? {
            Some(byte) => self.handle_byte(byte),
            None => {
                if self.parser.flush() {
                    debug!("input ended inside an escape sequence");
                }
                debug!("input ended");
                Ok(Signal::Exit(0))
            }
        }
    }

    /// Process input until a callback or the end of input asks to exit.
    /// Returns the exit code.
    pub fn run<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> EditorResult<i32> {
        loop {
            if let Signal::Exit(code) = self.step(source)? {
                debug!("main loop finished with code {code}");
                return Ok(code);
            }
        }
    }
}
