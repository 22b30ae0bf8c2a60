//! Print the 256-colour palette, then a few text attributes.
//!
//! Usage: cargo run --example palette

use linekit_core::{Attribute, DisplaySink};
use linekit_io::{palette::demo_colors, AnsiDisplay, EditorResult};

fn main() -> EditorResult<()> {
    let mut display = AnsiDisplay::stdout();
    demo_colors(&mut display)?;

    for (attribute, label) in [
        (Attribute::Bold, "bold"),
        (Attribute::Underline, "underline"),
        (Attribute::Inverse, "inverse"),
        (Attribute::BrightBackground(44), "bright background"),
        (Attribute::Background(42), "background"),
    ] {
        display.set_attribute(Attribute::Reset)?;
        display.set_attribute(attribute)?;
        display.write_text(label)?;
        display.set_attribute(Attribute::Reset)?;
        display.write_text("\n")?;
    }
    display.flush()?;
    Ok(())
}
