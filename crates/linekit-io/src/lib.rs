//! Terminal backend for linekit.
//!
//! Provides the pieces of `linekit-core` that touch the real terminal:
//! - [`AnsiDisplay`]: display sink writing VT100 escape sequences
//! - [`RawModeGuard`]: scoped raw mode for the controlling terminal (Unix)
//! - `StdinSource`: blocking one-byte reads from stdin (Unix)
//! - [`palette::demo_colors`] and the [`debug`] file logger

use std::io;

// Re-export core types and traits
pub use linekit_core::{
    ByteSource, Dispatcher, DisplayOp, DisplaySink, EditorError, EditorResult, Signal,
};

pub mod ansi;
pub mod debug;
pub mod guard;
pub mod palette;

#[cfg(unix)]
pub mod unix;

pub use ansi::AnsiDisplay;
pub use guard::RawModeGuard;

#[cfg(unix)]
pub use unix::StdinSource;

// Helper function to convert io::Error to EditorError
pub fn io_error_to_editor_error(e: io::Error) -> EditorError {
    EditorError::Io(e)
}

/// Display on standard output.
pub fn create_display() -> Box<dyn DisplaySink> {
    Box::new(AnsiDisplay::stdout())
}

/// Raw byte input for the current platform.
pub fn create_input() -> EditorResult<Box<dyn ByteSource>> {
    #[cfg(unix)]
    {
        Ok(Box::new(unix::StdinSource::new()))
    }

    #[cfg(not(unix))]
    {
        Err(EditorError::unsupported("raw byte input"))
    }
}

/// Switch the controlling terminal (stdin) into raw mode.
pub fn enable_raw_mode() -> EditorResult<RawModeGuard> {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();
        if !unix::is_tty(fd) {
            return Err(EditorError::terminal("stdin is not a TTY"));
        }
        unix::enable_raw_mode(fd).map_err(io_error_to_editor_error)
    }

    #[cfg(not(unix))]
    {
        Err(EditorError::unsupported("raw mode"))
    }
}

/// Run `dispatcher` on the controlling terminal until it asks to exit.
///
/// Raw mode is held only for the duration of the loop and is restored before
/// this returns, whether the loop ended with an exit code or an error.
pub fn run_terminal(dispatcher: &mut Dispatcher) -> EditorResult<i32> {
    let mut input = create_input()?;
    let guard = enable_raw_mode()?;
    let result = dispatcher.run(input.as_mut());
    drop(guard);
    result
}
