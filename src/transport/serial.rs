//! # Serial TTY Transport
//!
//! This module writes to the display over a plain UART, typically the
//! Raspberry Pi's TX pin (`/dev/ttyAMA0`) or a USB serial adapter.
//!
//! ## Wiring
//!
//! Only TX, 5V and GND are needed. The display never answers, so RX is left
//! unconnected.
//!
//! ## TTY Configuration
//!
//! The device is opened write-only in raw mode so opcodes pass through
//! unmodified:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity, 1 stop bit)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)
//! - **Speed**: 2400, 9600 or 19200 baud to match the DIP switches

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::debug;

use super::ByteSink;
use crate::display::config::{BaudMode, LcdConfig};
use crate::error::LcdError;

/// # Serial Display Transport
///
/// Owns the open TTY for its whole lifetime; the descriptor is closed when
/// the transport is dropped.
///
/// ## Example
///
/// ```no_run
/// use parallax_lcd::display::LcdConfig;
/// use parallax_lcd::transport::{ByteSink, SerialTransport};
///
/// let mut transport = SerialTransport::open(&LcdConfig::new(1)?)?;
/// transport.write_bytes(&[0x0C])?;
///
/// # Ok::<(), parallax_lcd::LcdError>(())
/// ```
#[derive(Debug)]
pub struct SerialTransport {
    file: File,
    path: PathBuf,
    baud: BaudMode,
}

impl SerialTransport {
    /// Open and configure the serial device named in `config`.
    ///
    /// ## Errors
    ///
    /// Returns [`LcdError::Construction`] if:
    /// - The device doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - TTY configuration fails
    pub fn open(config: &LcdConfig) -> Result<Self, LcdError> {
        Self::open_path(&config.device, config.baud)
    }

    pub fn open_path<P: AsRef<Path>>(device: P, baud: BaudMode) -> Result<Self, LcdError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            LcdError::Construction(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_tty_raw(file.as_raw_fd(), baud).map_err(|e| {
            LcdError::Construction(format!("Failed to configure {}: {}", path.display(), e))
        })?;

        debug!("opened {} at {} baud", path.display(), baud.baud_rate());

        Ok(Self {
            file,
            path: path.to_path_buf(),
            baud,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn baud(&self) -> BaudMode {
        self.baud
    }
}

impl ByteSink for SerialTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        self.file.write_all(bytes)?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(unix)]
fn baud_constant(baud: BaudMode) -> libc::speed_t {
    match baud {
        BaudMode::Mode0 => libc::B2400,
        BaudMode::Mode1 => libc::B9600,
        BaudMode::Mode2 => libc::B19200,
    }
}

/// Configure a file descriptor for raw TTY mode at the given speed.
///
/// IXON/IXOFF/IXANY must be off: 0x11 (XON) is the backlight-on opcode and
/// 0x13 (XOFF) would otherwise be swallowed by the line discipline.
#[cfg(unix)]
fn configure_tty_raw(fd: i32, baud: BaudMode) -> io::Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // 8N1
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB | libc::CSTOPB);
    termios.c_cflag |= libc::CS8 | libc::CLOCAL;

    let speed = baud_constant(baud);
    let result = unsafe { libc::cfsetospeed(&mut termios, speed) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    let result = unsafe { libc::cfsetispeed(&mut termios, speed) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32, _baud: BaudMode) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device() {
        let result = SerialTransport::open_path("/dev/nonexistent-lcd", BaudMode::Mode1);
        assert!(matches!(result, Err(LcdError::Construction(_))));
    }

    #[test]
    fn test_open_non_tty_fails_configuration() {
        let path = std::env::temp_dir().join(format!("parallax-lcd-tty-{}", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let result = SerialTransport::open_path(&path, BaudMode::Mode2);
        std::fs::remove_file(&path).ok();

        match result {
            Err(LcdError::Construction(msg)) => assert!(msg.contains("configure")),
            other => panic!("expected construction error, got {:?}", other),
        }
    }

    #[test]
    fn test_baud_constants() {
        assert_eq!(baud_constant(BaudMode::Mode0), libc::B2400);
        assert_eq!(baud_constant(BaudMode::Mode2), libc::B19200);
    }
}
