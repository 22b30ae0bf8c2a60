use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use linekit_core::ByteSource;

use crate::guard::RawModeGuard;

/// Whether `fd` refers to a terminal.
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Termios flags for raw mode, matching `cfmakeraw`-style settings used by
/// `tty.setraw`: no echo, no line buffering, no signal keys, no CR/NL
/// translation on either side, 8-bit characters, blocking one-byte reads.
fn make_raw(original: &libc::termios) -> libc::termios {
    let mut raw = *original;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag &= !(libc::CSIZE | libc::PARENB);
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 1;
    raw.c_cc[libc::VTIME] = 0;
    raw
}

/// Put the terminal behind `fd` into raw mode.
///
/// The returned guard puts the saved settings back.
pub fn enable_raw_mode(fd: RawFd) -> io::Result<RawModeGuard> {
    let mut original: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let raw = make_raw(&original);
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) } != 0 {
        return Err(io::Error::last_os_error());
    }
    log::debug!("raw mode enabled on fd {fd}");

    let restore_fn = move || unsafe {
        let _ = libc::tcsetattr(fd, libc::TCSAFLUSH, &original);
    };
    Ok(RawModeGuard::new(restore_fn, "Unix VT".to_string()))
}

/// Blocking byte source on standard input.
pub struct StdinSource {
    stdin_fd: RawFd,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            stdin_fd: io::stdin().as_raw_fd(),
        }
    }

    pub fn fd(&self) -> RawFd {
        self.stdin_fd
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let result = unsafe {
                libc::read(
                    self.stdin_fd,
                    &mut byte as *mut u8 as *mut libc::c_void,
                    1,
                )
            };
            match result {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let error = io::Error::last_os_error();
                    if error.raw_os_error() == Some(libc::EINTR) {
                        continue; // Interrupted by signal, retry
                    }
                    return Err(error);
                }
            }
        }
    }
}
