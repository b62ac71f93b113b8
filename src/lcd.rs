//! # Display Driver
//!
//! [`Lcd`] owns a byte sink and sends fully validated commands to it,
//! pausing after each mode-changing write so the controller can keep up.
//!
//! ## Timing
//!
//! | Operation | Bytes | Settle delay |
//! |-----------|-------|--------------|
//! | backlight, clear, power, scale, note length | 1 | yes |
//! | goto | 1 | yes |
//! | play note | 1 | no |
//! | define glyph | 9 | no |
//! | show glyph | 1 | no |
//! | print text | n | no |
//!
//! Every parameter is validated before anything is written, so a rejected
//! call never leaves a partial command on the wire.

use std::path::Path;
use std::time::Duration;

use log::{debug, trace};

use crate::display::config::LcdConfig;
use crate::error::LcdError;
use crate::protocol::commands::{Command, CursorMode, NoteLength, Pitch, SETTLE_DELAY_MS, Scale};
use crate::protocol::cursor::{CursorPosition, screen_address};
use crate::protocol::glyph::{GlyphBitmap, GlyphSlot, define_glyph_bytes, load_glyph_from_image};
use crate::protocol::text::encode_text;
use crate::transport::{ByteSink, Delay, SerialTransport, ThreadSleep};

/// # Parallax Serial LCD
///
/// ## Example
///
/// ```
/// use parallax_lcd::Lcd;
/// use parallax_lcd::protocol::cursor::CursorPosition;
/// use std::time::Duration;
///
/// let mut lcd = Lcd::new(Vec::new(), parallax_lcd::transport::ThreadSleep)
///     .with_settle_delay(Duration::ZERO);
/// lcd.clear_screen()?;
/// lcd.print_text_at(CursorPosition::new(1, 0)?, "OK")?;
///
/// assert_eq!(lcd.into_inner(), vec![0x0C, 148, b'O', b'K']);
/// # Ok::<(), parallax_lcd::LcdError>(())
/// ```
#[derive(Debug)]
pub struct Lcd<S: ByteSink, D: Delay = ThreadSleep> {
    sink: S,
    delay: D,
    settle_delay: Duration,
}

impl Lcd<SerialTransport, ThreadSleep> {
    /// Open the serial device described by `config`.
    pub fn open(config: &LcdConfig) -> Result<Self, LcdError> {
        let transport = SerialTransport::open(config)?;
        Ok(Self::new(transport, ThreadSleep).with_settle_delay(config.settle_delay))
    }

    /// Open the default device at DIP-switch mode 0, 1 or 2.
    ///
    /// Any other mode fails with [`LcdError::Construction`] before the
    /// device is touched.
    pub fn open_mode(mode: u8) -> Result<Self, LcdError> {
        Self::open(&LcdConfig::new(mode)?)
    }
}

impl<S: ByteSink, D: Delay> Lcd<S, D> {
    /// Wrap an already open sink.
    pub fn new(sink: S, delay: D) -> Self {
        Self {
            sink,
            delay,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Release the sink (closing the port, for serial transports).
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        debug!("write {:02X?}", bytes);
        self.sink.write_bytes(bytes)
    }

    fn settle(&mut self) {
        trace!("settle {:?}", self.settle_delay);
        self.delay.delay(self.settle_delay);
    }

    /// Send one command, pausing afterwards if the device needs it.
    pub fn send(&mut self, command: Command) -> Result<(), LcdError> {
        self.write(&[command.opcode()])?;
        if command.needs_settle() {
            self.settle();
        }
        Ok(())
    }

    // ========================================================================
    // DISPLAY CONTROL
    // ========================================================================

    pub fn backlight_on(&mut self) -> Result<(), LcdError> {
        self.send(Command::BacklightOn)
    }

    pub fn backlight_off(&mut self) -> Result<(), LcdError> {
        self.send(Command::BacklightOff)
    }

    /// Clear the screen and move the cursor to line 0, column 0.
    pub fn clear_screen(&mut self) -> Result<(), LcdError> {
        self.send(Command::ClearScreen)
    }

    pub fn power_off(&mut self) -> Result<(), LcdError> {
        self.send(Command::PowerOff)
    }

    /// Turn the display on with the given cursor style.
    pub fn power_on(&mut self, mode: CursorMode) -> Result<(), LcdError> {
        self.send(Command::PowerOn(mode))
    }

    // ========================================================================
    // SPEAKER
    // ========================================================================

    pub fn set_tone_scale(&mut self, scale: Scale) -> Result<(), LcdError> {
        self.send(Command::Tone(scale))
    }

    pub fn set_note_duration(&mut self, length: NoteLength) -> Result<(), LcdError> {
        self.send(Command::NoteDuration(length))
    }

    /// Queue a note. No settle delay, so melodies can be streamed.
    pub fn play_note(&mut self, pitch: Pitch) -> Result<(), LcdError> {
        self.send(Command::PlayNote(pitch))
    }

    // ========================================================================
    // CUSTOM GLYPHS
    // ========================================================================

    /// Store a glyph in one of the eight slots.
    ///
    /// The define opcode and the eight row bytes go out as a single write.
    pub fn define_glyph(&mut self, slot: GlyphSlot, bitmap: GlyphBitmap) -> Result<(), LcdError> {
        self.write(&define_glyph_bytes(slot, bitmap))
    }

    /// Load a 5x8 image and store it in a slot.
    ///
    /// The image is decoded before anything is written.
    pub fn define_glyph_from_image<P: AsRef<Path>>(
        &mut self,
        slot: GlyphSlot,
        path: P,
    ) -> Result<(), LcdError> {
        let bitmap = load_glyph_from_image(path)?;
        self.define_glyph(slot, bitmap)
    }

    /// Display the glyph stored in `slot` at the cursor.
    pub fn show_glyph(&mut self, slot: GlyphSlot) -> Result<(), LcdError> {
        self.write(&[slot.display_code()])
    }

    // ========================================================================
    // CURSOR AND TEXT
    // ========================================================================

    pub fn goto(&mut self, pos: CursorPosition) -> Result<(), LcdError> {
        self.write(&[screen_address(pos)])?;
        self.settle();
        Ok(())
    }

    /// Print printable ASCII at the cursor.
    ///
    /// Anything else is rejected before writing; see
    /// [`encode_text`](crate::protocol::text::encode_text).
    pub fn print_text(&mut self, text: &str) -> Result<(), LcdError> {
        let bytes = encode_text(text)?;
        if bytes.is_empty() {
            return Ok(());
        }
        self.write(&bytes)
    }

    /// Move the cursor, then print.
    pub fn print_text_at(&mut self, pos: CursorPosition, text: &str) -> Result<(), LcdError> {
        let bytes = encode_text(text)?;
        self.goto(pos)?;
        if bytes.is_empty() {
            return Ok(());
        }
        self.write(&bytes)
    }

    /// Print from the start of a line.
    pub fn print_text_at_line(&mut self, line: u8, text: &str) -> Result<(), LcdError> {
        self.print_text_at(CursorPosition::line_start(line)?, text)
    }
}
