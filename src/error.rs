//! # Error Types
//!
//! This module defines error types used throughout the parallax-lcd library.

use thiserror::Error;

/// Main error type for LCD operations
#[derive(Debug, Error)]
pub enum LcdError {
    /// The driver could not be constructed (bad baud mode, port unavailable)
    #[error("Construction error: {0}")]
    Construction(String),

    /// Out-of-range or unrecognized input, raised before any byte is written
    #[error("Validation error: {0}")]
    Validation(String),

    /// Glyph image could not be read or decoded
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper (byte-sink write failure)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
