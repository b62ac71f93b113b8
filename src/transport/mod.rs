//! # Display Transport Layer
//!
//! This module provides the byte sink the driver writes to, and the delay
//! source it uses for settle pauses.
//!
//! ## Available Transports
//!
//! - [`serial`]: Raw TTY at one of the three DIP-switch baud rates (Unix)
//! - `Vec<u8>`: In-memory capture for tests and dry runs
//!
//! The protocol is write-only; no transport reads from the device.

pub mod serial;

use std::thread;
use std::time::Duration;

use crate::error::LcdError;

pub use serial::SerialTransport;

/// Something that accepts raw bytes for the display
pub trait ByteSink {
    /// Write all bytes, in order. A failure leaves the device state unknown.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError>;
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        (**self).write_bytes(bytes)
    }
}

/// Blocking pause source
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Pauses the calling thread with [`std::thread::sleep`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_vec_sink_appends() {
        let mut sink = Vec::new();
        sink.write_bytes(&[0x0C]).unwrap();
        sink.write_bytes(&[0x80, b'A']).unwrap();
        assert_eq!(sink, vec![0x0C, 0x80, b'A']);
    }

    #[test]
    fn test_mut_ref_sink() {
        fn send<S: ByteSink>(mut sink: S) {
            sink.write_bytes(&[0x11]).unwrap();
        }

        let mut sink = Vec::new();
        send(&mut sink);
        send(&mut sink);
        assert_eq!(sink, vec![0x11, 0x11]);
    }

    #[test]
    fn test_thread_sleep_blocks() {
        let start = Instant::now();
        ThreadSleep.delay(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
