//! # Display Configuration
//!
//! This module defines serial settings and hardware geometry for the
//! Parallax serial LCD family.
//!
//! ## Supported Models
//!
//! | Model | Lines | Columns | Backlight | Speaker |
//! |-------|-------|---------|-----------|---------|
//! | 27976 | 2 | 16 | no | no |
//! | 27977 | 2 | 16 | yes | yes |
//! | 27979 | 4 | 20 | yes | yes |
//!
//! ## Baud Rate
//!
//! The rate is selected by two DIP switches on the back of the module. The
//! switch position, not the rate, is what users usually know:
//!
//! | Mode | SW1 | SW2 | Baud |
//! |------|-----|-----|------|
//! | 0 | ON | OFF | 2400 |
//! | 1 | OFF | ON | 9600 |
//! | 2 | ON | ON | 19200 |
//!
//! ## Usage
//!
//! ```
//! use parallax_lcd::display::LcdConfig;
//!
//! let config = LcdConfig::new(2)?.with_device("/dev/ttyUSB0");
//! assert_eq!(config.baud.baud_rate(), 19200);
//! # Ok::<(), parallax_lcd::LcdError>(())
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::LcdError;
use crate::protocol::commands::SETTLE_DELAY_MS;

/// Default serial device (Raspberry Pi primary UART)
pub const DEFAULT_DEVICE: &str = "/dev/ttyAMA0";

// ============================================================================
// BAUD MODE
// ============================================================================

/// Serial speed selected by the module's DIP switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaudMode {
    /// 2400 baud
    Mode0,
    /// 9600 baud
    #[default]
    Mode1,
    /// 19200 baud
    Mode2,
}

impl BaudMode {
    /// Select a mode by switch setting (0-2).
    ///
    /// Any other value is a construction error: there is no sink to write to.
    pub fn from_switch(mode: u8) -> Result<Self, LcdError> {
        match mode {
            0 => Ok(Self::Mode0),
            1 => Ok(Self::Mode1),
            2 => Ok(Self::Mode2),
            other => Err(LcdError::Construction(format!(
                "baud mode {} not in 0-2 (2400, 9600, 19200)",
                other
            ))),
        }
    }

    /// Bits per second
    pub const fn baud_rate(self) -> u32 {
        match self {
            Self::Mode0 => 2400,
            Self::Mode1 => 9600,
            Self::Mode2 => 19200,
        }
    }

    /// Switch setting (0-2)
    pub const fn switch(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// DISPLAY MODEL
// ============================================================================

/// # Display Model Geometry
///
/// The controller always addresses four 20-column lines; smaller models
/// simply do not show the cells past their edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayModel {
    /// Parallax part number
    pub name: &'static str,

    /// Visible lines
    pub lines: u8,

    /// Visible columns per line
    pub columns: u8,

    /// Has a switchable backlight
    pub backlight: bool,

    /// Has a piezo speaker
    pub speaker: bool,
}

impl DisplayModel {
    /// 2x16, no backlight
    pub const P27976: Self = Self {
        name: "27976",
        lines: 2,
        columns: 16,
        backlight: false,
        speaker: false,
    };

    /// 2x16, backlight and speaker
    pub const P27977: Self = Self {
        name: "27977",
        lines: 2,
        columns: 16,
        backlight: true,
        speaker: true,
    };

    /// 4x20, backlight and speaker
    pub const P27979: Self = Self {
        name: "27979",
        lines: 4,
        columns: 20,
        backlight: true,
        speaker: true,
    };

    /// All known models
    pub const ALL: [Self; 3] = [Self::P27976, Self::P27977, Self::P27979];

    /// Look up a model by part number ("27977" or "2x16"-style geometry).
    pub fn parse(s: &str) -> Result<Self, LcdError> {
        let s = s.trim().to_lowercase();
        if let Some(model) = Self::ALL.into_iter().find(|m| m.name == s) {
            return Ok(model);
        }
        match s.as_str() {
            "2x16" => Ok(Self::P27977),
            "4x20" => Ok(Self::P27979),
            _ => Err(LcdError::Validation(format!(
                "Unknown model '{}'. Use 27976, 27977, 27979, 2x16 or 4x20",
                s
            ))),
        }
    }

    /// Whether (line, column) is visible on this model
    pub fn is_visible(&self, line: u8, column: u8) -> bool {
        line < self.lines && column < self.columns
    }
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self::P27977
    }
}

// ============================================================================
// LCD CONFIG
// ============================================================================

/// Connection settings for opening a display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcdConfig {
    /// Serial device path
    pub device: PathBuf,

    /// Baud rate selected by the DIP switches
    pub baud: BaudMode,

    /// Pause after mode-changing commands
    pub settle_delay: Duration,
}

impl LcdConfig {
    /// Config for the default device at the given switch mode (0-2).
    pub fn new(mode: u8) -> Result<Self, LcdError> {
        Ok(Self::with_baud(BaudMode::from_switch(mode)?))
    }

    pub fn with_baud(baud: BaudMode) -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            baud,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
        }
    }

    pub fn with_device<P: Into<PathBuf>>(mut self, device: P) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::with_baud(BaudMode::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
