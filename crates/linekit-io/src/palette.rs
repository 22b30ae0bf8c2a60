//! 256-colour palette printer.

use std::io;

use linekit_core::{Attribute, DisplaySink};

/// Print every palette index in its own foreground colour, tab separated,
/// followed by a newline.
pub fn demo_colors(display: &mut dyn DisplaySink) -> io::Result<()> {
    for code in 0..=u8::MAX {
        display.set_attribute(Attribute::Foreground(code))?;
        display.write_text(&format!("{code}\t"))?;
    }
    display.write_text("\n")?;
    display.flush()
}
