//! Key input debug tool
//!
//! Prints every byte read in raw mode and the key it completes.
//!
//! Usage: cargo run -p linekit-io --example debug_key_input
//! Press Ctrl+C to exit.

use linekit_core::{Key, KeyParser};
use linekit_io::{create_input, enable_raw_mode, ByteSource, EditorResult};
use std::io::{self, Write};

fn describe(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("{byte:02x} '{}'", byte as char)
    } else {
        format!("{byte:02x}")
    }
}

fn main() -> EditorResult<()> {
    let mut input = create_input()?;
    let _guard = enable_raw_mode()?;
    let mut parser = KeyParser::new();

    // raw mode disables output post-processing, hence \r\n
    print!("Reading keys, Ctrl+C to exit\r\n");
    io::stdout().flush()?;

    while let Some(byte) = input.read_byte()? {
        let key = parser.feed(byte);
        match key {
            Some(key) => print!("byte {} -> {:?}\r\n", describe(byte), key),
            None => print!("byte {} (pending)\r\n", describe(byte)),
        }
        io::stdout().flush()?;

        if key == Some(Key::Interrupt) {
            break;
        }
    }
    Ok(())
}
