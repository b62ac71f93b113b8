//! # Parallax Serial LCD Command Table
//!
//! This module implements the single-byte command set understood by the
//! Parallax serial character LCD family (27976, 27977, 27979).
//!
//! ## Protocol Overview
//!
//! The device has no escape prefix and no framing. Every byte on the wire is
//! either a printable character or an opcode:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | 0x00-0x07 | Display custom glyph 0-7 |
//! | 0x08-0x1F | Cursor, backlight and power control |
//! | 0x20-0x7F | Printable ASCII |
//! | 0x80-0xCF | Move cursor (screen address) |
//! | 0xD0-0xE8 | Speaker: note length, scale, note |
//! | 0xF8-0xFF | Define custom glyph 0-7 |
//!
//! ## Settle Delay
//!
//! Most commands need [`SETTLE_DELAY_MS`] of processing time before the
//! next byte is accepted. Note playback is the exception: the device queues
//! notes, so melodies can be streamed back to back.
//!
//! ## Reference
//!
//! Based on the "Parallax Serial LCDs (#27976, #27977, #27979)" product guide.

use std::fmt;
use std::str::FromStr;

use crate::error::LcdError;

// ============================================================================
// OPCODE CONSTANTS
// ============================================================================

/// Turn the backlight on (backlit models only)
pub const BACKLIGHT_ON: u8 = 0x11;

/// Turn the backlight off
pub const BACKLIGHT_OFF: u8 = 0x12;

/// Form feed: clear the screen and home the cursor
///
/// The device needs at least 5ms after this command; the settle delay covers it.
pub const CLEAR_SCREEN: u8 = 0x0C;

/// Turn the display off
pub const POWER_OFF: u8 = 0x15;

/// Turn the display on with cursor off, no blink (first of four modes)
pub const POWER_ON_BASE: u8 = 0x16;

/// Set note length to 1/64 (first of seven lengths)
pub const NOTE_LENGTH_BASE: u8 = 0xD0;

/// Select the 220Hz scale (first of five scales)
pub const SCALE_BASE: u8 = 0xD7;

/// Play note A (first of thirteen notes, the last being a rest)
pub const NOTE_BASE: u8 = 0xDC;

/// Settle delay after mode-changing commands (milliseconds)
pub const SETTLE_DELAY_MS: u64 = 50;

// ============================================================================
// CURSOR MODE
// ============================================================================

/// Cursor appearance selected when the display is powered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Cursor off, no blinking box
    #[default]
    OffNoBlink,
    /// Cursor off, blinking box
    OffBlink,
    /// Cursor on, no blinking box
    OnNoBlink,
    /// Cursor on, blinking box
    OnBlink,
}

impl CursorMode {
    /// All modes in device order
    pub const ALL: [Self; 4] = [
        Self::OffNoBlink,
        Self::OffBlink,
        Self::OnNoBlink,
        Self::OnBlink,
    ];

    /// Select a mode by its device index (0-3).
    ///
    /// ## Example
    ///
    /// ```
    /// use parallax_lcd::protocol::commands::CursorMode;
    ///
    /// assert_eq!(CursorMode::from_index(3).unwrap(), CursorMode::OnBlink);
    /// assert!(CursorMode::from_index(4).is_err());
    /// ```
    pub fn from_index(index: u8) -> Result<Self, LcdError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| LcdError::Validation(format!("cursor mode {} not in 0-3", index)))
    }

    /// Power-on opcode for this mode (0x16-0x19)
    #[inline]
    pub const fn opcode(self) -> u8 {
        POWER_ON_BASE + self as u8
    }
}

// ============================================================================
// SPEAKER: SCALE
// ============================================================================

/// Frequency band for the built-in speaker
///
/// The device names its scales by octave number (3-7); each octave's A note
/// sits at the given frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    Hz220,
    #[default]
    Hz440,
    Hz880,
    Hz1760,
    Hz3520,
}

impl Scale {
    /// All scales, lowest first
    pub const ALL: [Self; 5] = [
        Self::Hz220,
        Self::Hz440,
        Self::Hz880,
        Self::Hz1760,
        Self::Hz3520,
    ];

    /// Frequency of the scale's A note in Hz
    pub const fn hz(self) -> u32 {
        220 << (self as u32)
    }

    /// Look up a scale by the frequency of its A note.
    pub fn from_hz(hz: u32) -> Result<Self, LcdError> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.hz() == hz)
            .ok_or_else(|| {
                LcdError::Validation(format!(
                    "scale {}Hz not one of 220, 440, 880, 1760, 3520",
                    hz
                ))
            })
    }

    /// Look up a scale by the device's octave number (3 = 220Hz ... 7 = 3520Hz).
    pub fn from_octave(octave: u8) -> Result<Self, LcdError> {
        octave
            .checked_sub(3)
            .and_then(|index| Self::ALL.get(index as usize).copied())
            .ok_or_else(|| LcdError::Validation(format!("octave {} not in 3-7", octave)))
    }

    /// Scale select opcode (0xD7-0xDB)
    #[inline]
    pub const fn opcode(self) -> u8 {
        SCALE_BASE + self as u8
    }
}

impl FromStr for Scale {
    type Err = LcdError;

    /// Parse "440" or "440hz" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let digits = lower.strip_suffix("hz").unwrap_or(&lower);
        let hz = digits
            .parse::<u32>()
            .map_err(|_| LcdError::Validation(format!("invalid scale '{}'", s)))?;
        Self::from_hz(hz)
    }
}

// ============================================================================
// SPEAKER: NOTE LENGTH
// ============================================================================

/// How long each subsequent note is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteLength {
    SixtyFourth,
    ThirtySecond,
    Sixteenth,
    Eighth,
    #[default]
    Quarter,
    Half,
    Whole,
}

impl NoteLength {
    /// All lengths, shortest first
    pub const ALL: [Self; 7] = [
        Self::SixtyFourth,
        Self::ThirtySecond,
        Self::Sixteenth,
        Self::Eighth,
        Self::Quarter,
        Self::Half,
        Self::Whole,
    ];

    /// Fraction label as written on the command line ("1/64" ... "1")
    pub const fn label(self) -> &'static str {
        match self {
            Self::SixtyFourth => "1/64",
            Self::ThirtySecond => "1/32",
            Self::Sixteenth => "1/16",
            Self::Eighth => "1/8",
            Self::Quarter => "1/4",
            Self::Half => "1/2",
            Self::Whole => "1",
        }
    }

    /// Note length opcode (0xD0-0xD6)
    #[inline]
    pub const fn opcode(self) -> u8 {
        NOTE_LENGTH_BASE + self as u8
    }
}

impl FromStr for NoteLength {
    type Err = LcdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|length| length.label() == s)
            .ok_or_else(|| LcdError::Validation(format!("invalid note length '{}'", s)))
    }
}

impl fmt::Display for NoteLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SPEAKER: PITCH
// ============================================================================

/// Chromatic note within the current scale, or a rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    A,
    ASharp,
    B,
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    /// Silence for one note length
    Rest,
}

impl Pitch {
    /// All notes in device order, rest last
    pub const ALL: [Self; 13] = [
        Self::A,
        Self::ASharp,
        Self::B,
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::Rest,
    ];

    /// Note name ("A", "A#", ..., "rest")
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::ASharp => "A#",
            Self::B => "B",
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::Rest => "rest",
        }
    }

    /// Play-note opcode (0xDC-0xE8)
    #[inline]
    pub const fn opcode(self) -> u8 {
        NOTE_BASE + self as u8
    }
}

impl FromStr for Pitch {
    type Err = LcdError;

    /// Parse a note name. Sharps use `#`; `rest` and `-` select a rest.
    /// Unknown names are rejected rather than mapped to a rest.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "-" {
            return Ok(Self::Rest);
        }
        Self::ALL
            .into_iter()
            .find(|pitch| pitch.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LcdError::Validation(format!("invalid note '{}'", s)))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// COMMAND
// ============================================================================

/// A single-opcode device command
///
/// Every variant carries only closed enums, so an out-of-range command cannot
/// be constructed; validation happens when the parameter enum is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BacklightOn,
    BacklightOff,
    ClearScreen,
    PowerOff,
    PowerOn(CursorMode),
    Tone(Scale),
    NoteDuration(NoteLength),
    PlayNote(Pitch),
}

impl Command {
    /// Opcode for this command (see [`opcode_for`])
    #[inline]
    pub const fn opcode(self) -> u8 {
        opcode_for(self)
    }

    /// Whether the device needs the settle delay after this command.
    ///
    /// Notes are queued by the device and may be streamed without pauses.
    #[inline]
    pub const fn needs_settle(self) -> bool {
        !matches!(self, Self::PlayNote(_))
    }
}

/// # Command Opcode Lookup
///
/// Maps every command to its single wire byte.
///
/// ## Example
///
/// ```
/// use parallax_lcd::protocol::commands::{opcode_for, Command, CursorMode, Pitch, Scale};
///
/// assert_eq!(opcode_for(Command::Tone(Scale::Hz440)), 0xD8);
/// assert_eq!(opcode_for(Command::PlayNote(Pitch::CSharp)), 0xE0);
/// assert_eq!(opcode_for(Command::PowerOn(CursorMode::OnBlink)), 0x19);
/// ```
pub const fn opcode_for(command: Command) -> u8 {
    match command {
        Command::BacklightOn => BACKLIGHT_ON,
        Command::BacklightOff => BACKLIGHT_OFF,
        Command::ClearScreen => CLEAR_SCREEN,
        Command::PowerOff => POWER_OFF,
        Command::PowerOn(mode) => mode.opcode(),
        Command::Tone(scale) => scale.opcode(),
        Command::NoteDuration(length) => length.opcode(),
        Command::PlayNote(pitch) => pitch.opcode(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_opcodes() {
        assert_eq!(opcode_for(Command::BacklightOn), 0x11);
        assert_eq!(opcode_for(Command::BacklightOff), 0x12);
        assert_eq!(opcode_for(Command::ClearScreen), 0x0C);
        assert_eq!(opcode_for(Command::PowerOff), 0x15);
    }

    #[test]
    fn test_power_on_modes() {
        let opcodes: Vec<u8> = CursorMode::ALL
            .iter()
            .map(|&mode| opcode_for(Command::PowerOn(mode)))
            .collect();
        assert_eq!(opcodes, vec![0x16, 0x17, 0x18, 0x19]);
    }

    #[test]
    fn test_scale_opcodes() {
        let opcodes: Vec<u8> = Scale::ALL.iter().map(|s| s.opcode()).collect();
        assert_eq!(opcodes, vec![0xD7, 0xD8, 0xD9, 0xDA, 0xDB]);
        assert_eq!(opcode_for(Command::Tone(Scale::Hz440)), 0xD8);
    }

    #[test]
    fn test_note_length_opcodes() {
        let opcodes: Vec<u8> = NoteLength::ALL.iter().map(|l| l.opcode()).collect();
        assert_eq!(opcodes, vec![0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6]);
    }

    #[test]
    fn test_pitch_opcodes() {
        assert_eq!(Pitch::A.opcode(), 0xDC);
        assert_eq!(opcode_for(Command::PlayNote(Pitch::CSharp)), 0xE0);
        assert_eq!(Pitch::GSharp.opcode(), 0xE7);
        assert_eq!(Pitch::Rest.opcode(), 0xE8);
    }

    #[test]
    fn test_scale_hz() {
        assert_eq!(Scale::Hz220.hz(), 220);
        assert_eq!(Scale::Hz3520.hz(), 3520);
        assert_eq!(Scale::from_hz(1760).unwrap(), Scale::Hz1760);
        assert!(Scale::from_hz(441).is_err());
    }

    #[test]
    fn test_scale_octave() {
        assert_eq!(Scale::from_octave(3).unwrap(), Scale::Hz220);
        assert_eq!(Scale::from_octave(7).unwrap(), Scale::Hz3520);
        assert!(Scale::from_octave(2).is_err());
        assert!(Scale::from_octave(8).is_err());
    }

    #[test]
    fn test_scale_parse() {
        assert_eq!("880".parse::<Scale>().unwrap(), Scale::Hz880);
        assert_eq!("880Hz".parse::<Scale>().unwrap(), Scale::Hz880);
        assert!("loud".parse::<Scale>().is_err());
    }

    #[test]
    fn test_note_length_parse() {
        assert_eq!("1/64".parse::<NoteLength>().unwrap(), NoteLength::SixtyFourth);
        assert_eq!("1".parse::<NoteLength>().unwrap(), NoteLength::Whole);
        assert!("1/3".parse::<NoteLength>().is_err());
        assert!("".parse::<NoteLength>().is_err());
    }

    #[test]
    fn test_pitch_parse() {
        assert_eq!("C#".parse::<Pitch>().unwrap(), Pitch::CSharp);
        assert_eq!("g#".parse::<Pitch>().unwrap(), Pitch::GSharp);
        assert_eq!("rest".parse::<Pitch>().unwrap(), Pitch::Rest);
        assert_eq!("-".parse::<Pitch>().unwrap(), Pitch::Rest);
        // Unknown names are rejected, not mapped to a rest
        assert!("H".parse::<Pitch>().is_err());
        assert!("Bb".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_cursor_mode_index() {
        assert_eq!(CursorMode::from_index(0).unwrap(), CursorMode::OffNoBlink);
        assert!(matches!(
            CursorMode::from_index(4),
            Err(LcdError::Validation(_))
        ));
    }

    #[test]
    fn test_needs_settle() {
        assert!(Command::ClearScreen.needs_settle());
        assert!(Command::PowerOn(CursorMode::OnBlink).needs_settle());
        assert!(Command::Tone(Scale::Hz220).needs_settle());
        assert!(!Command::PlayNote(Pitch::A).needs_settle());
    }
}
