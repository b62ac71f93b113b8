//! # Text Encoding
//!
//! The display's character ROM matches ASCII for 0x20-0x7E. Bytes outside that
//! range are opcodes (0x00-0x1F, 0x80-0xFF), and the device cannot tell text
//! from commands on the wire, so text is restricted to printable ASCII.

use crate::error::LcdError;

/// First printable character (space)
pub const PRINTABLE_FIRST: u8 = 0x20;

/// Last printable character (tilde)
pub const PRINTABLE_LAST: u8 = 0x7E;

/// Whether a character can be sent as text without being read as a command
#[inline]
pub fn is_printable(ch: char) -> bool {
    (PRINTABLE_FIRST as u32..=PRINTABLE_LAST as u32).contains(&(ch as u32))
}

/// Encode a string as display bytes.
///
/// Fails on the first character that is not printable ASCII, so nothing is
/// sent for a string that would be partially misread as commands.
///
/// ## Example
///
/// ```
/// use parallax_lcd::protocol::text::encode_text;
///
/// assert_eq!(encode_text("Hi!").unwrap(), b"Hi!".to_vec());
/// assert!(encode_text("caf\u{e9}").is_err());
/// assert!(encode_text("line\n").is_err());
/// ```
pub fn encode_text(text: &str) -> Result<Vec<u8>, LcdError> {
    let mut out = Vec::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        if !is_printable(ch) {
            return Err(LcdError::Validation(format!(
                "character {:?} (U+{:04X}) at position {} is not printable ASCII",
                ch, ch as u32, i
            )));
        }
        out.push(ch as u8);
    }
    Ok(out)
}
