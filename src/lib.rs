//! Default wiring for the linekit editor.
//!
//! `linekit-core` ships with no bindings at all. This crate adds the usual
//! ones: arrow keys move the cursor by one cell, Ctrl+C and Ctrl+D exit.

use linekit_core::{Dispatcher, EditorResult, LineBuffer, Signal};

/// Exit code returned when the user quits with Ctrl+C or Ctrl+D.
pub const EXIT_CODE: i32 = 0;

fn step(result: EditorResult<()>) -> EditorResult<Signal> {
    result.map(|()| Signal::Continue)
}

/// Bind the default navigation and exit keys.
///
/// # Examples
///
/// ```
/// use linekit_core::{Channel, Dispatcher, RecordingDisplay};
///
/// let mut dispatcher = Dispatcher::new(Box::new(RecordingDisplay::new()));
/// linekit::install_default_bindings(&mut dispatcher);
/// assert_eq!(dispatcher.bindings().len(Channel::Left), 1);
/// assert_eq!(dispatcher.bindings().len(Channel::Escape), 0);
/// ```
pub fn install_default_bindings(dispatcher: &mut Dispatcher) {
    dispatcher.bind_left_arrow(|buffer: &mut LineBuffer| step(buffer.move_left(1)));
    dispatcher.bind_right_arrow(|buffer: &mut LineBuffer| step(buffer.move_right(1)));
    dispatcher.bind_down_arrow(|buffer: &mut LineBuffer| step(buffer.move_down(1)));
    dispatcher.bind_up_arrow(|buffer: &mut LineBuffer| step(buffer.move_up(1)));
    dispatcher.bind_interrupt(|_| Ok(Signal::Exit(EXIT_CODE)));
    dispatcher.bind_end_of_input(|_| Ok(Signal::Exit(EXIT_CODE)));
}
