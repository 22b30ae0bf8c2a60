//! Byte-at-a-time input sources.

use std::io::{self, Read};

/// Blocking source of raw input bytes.
pub trait ByteSource {
    /// Read the next byte, blocking until one is available.
    ///
    /// `Ok(None)` means the stream has ended.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// [`ByteSource`] over any [`Read`] implementation.
///
/// Reads exactly one byte per call and retries when interrupted by a signal.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
