//! # Parallax LCD - Serial Character Display Library
//!
//! Parallax LCD is a Rust library for driving Parallax serial character LCDs
//! (27976, 27977, 27979) from a UART. It provides:
//!
//! - **Protocol implementation**: Opcode table, cursor addressing, text encoding
//! - **Custom glyphs**: 5x8 bitmap packing and loading from image files
//! - **Driver**: Validated operations with the device's settle timing
//! - **Transport**: Raw serial TTY at 2400, 9600 or 19200 baud
//!
//! ## Quick Start
//!
//! ```no_run
//! use parallax_lcd::{
//!     Lcd,
//!     protocol::{commands::CursorMode, cursor::CursorPosition, glyph::GlyphSlot},
//! };
//!
//! // Open /dev/ttyAMA0 at DIP-switch mode 2 (19200 baud)
//! let mut lcd = Lcd::open_mode(2)?;
//!
//! lcd.power_on(CursorMode::OffNoBlink)?;
//! lcd.backlight_on()?;
//! lcd.clear_screen()?;
//! lcd.print_text_at(CursorPosition::new(0, 2)?, "Hello, World")?;
//!
//! // Custom character from a 5x8 black-on-white PNG
//! let slot = GlyphSlot::new(0)?;
//! lcd.define_glyph_from_image(slot, "heart.png")?;
//! lcd.goto(CursorPosition::new(1, 0)?)?;
//! lcd.show_glyph(slot)?;
//!
//! # Ok::<(), parallax_lcd::error::LcdError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Pure byte builders |
//! | [`lcd`] | Driver with settle timing |
//! | [`transport`] | Byte sinks and delays |
//! | [`display`] | Baud modes and model geometry |
//! | [`error`] | Error types |
//!
//! ## Logging
//!
//! Written bytes are logged at `debug` level and settle pauses at `trace`
//! through the [`log`] facade. Install any logger to see them.

pub mod display;
pub mod error;
pub mod lcd;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use display::{BaudMode, LcdConfig};
pub use error::LcdError;
pub use lcd::Lcd;
pub use transport::SerialTransport;
