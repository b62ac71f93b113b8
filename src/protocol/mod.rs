//! # Parallax Serial LCD Protocol
//!
//! This module provides pure byte builders for the Parallax serial LCD
//! command set. Nothing here performs I/O; see [`crate::lcd`] for the driver
//! that sends these bytes with the required timing.
//!
//! ## Module Structure
//!
//! - [`commands`]: Single-byte opcodes (backlight, power, speaker)
//! - [`cursor`]: Screen addressing for cursor moves
//! - [`glyph`]: Custom 5x8 character encoding
//! - [`text`]: Printable text encoding
//!
//! ## Usage Example
//!
//! ```
//! use parallax_lcd::protocol::{commands, cursor, text};
//!
//! let mut data = Vec::new();
//! data.push(commands::CLEAR_SCREEN);
//! data.push(cursor::screen_address(cursor::CursorPosition::new(1, 4).unwrap()));
//! data.extend(text::encode_text("ready").unwrap());
//!
//! assert_eq!(data[..2], [0x0C, 152]);
//! ```
//!
//! Sending this buffer in one write skips the settle delay the device needs
//! after clearing; use the driver for anything beyond byte inspection.

pub mod commands;
pub mod cursor;
pub mod glyph;
pub mod text;
