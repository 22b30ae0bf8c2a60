//! linekit core library
//!
//! The editing engine of a raw-mode terminal line editor: a multi-line text
//! buffer with a clamped two-dimensional cursor, a parser that classifies raw
//! input bytes (including `ESC [ A`-style arrow sequences), and a dispatcher
//! that applies keys to the buffer or hands them to user-bound callbacks.
//!
//! Nothing here touches the real terminal. Output goes through the
//! [`DisplaySink`] trait and input comes from a [`ByteSource`]; `linekit-io`
//! provides the terminal-backed implementations.

pub mod key;
pub mod key_parser;

// Buffer and cursor model
pub mod buffer;
pub mod config;
pub mod error;

// Display abstraction
pub mod display;

// Input and dispatch
pub mod bindings;
pub mod dispatcher;
pub mod input;

// Re-export commonly used types for convenience
pub use key::{Channel, Key};
pub use key_parser::{KeyParser, ParserState};

pub use buffer::{BufferSnapshot, Cursor, LineBuffer};
pub use config::{EditorConfig, RenderWidthPolicy};
pub use error::{EditorError, EditorResult};

pub use display::{Attribute, DisplayOp, DisplaySink, RecordingDisplay};

pub use bindings::{BindingRegistry, Callback, Signal};
pub use dispatcher::Dispatcher;
pub use input::{ByteSource, ReaderSource};
