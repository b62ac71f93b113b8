//! # Cursor Addressing
//!
//! The display controller treats its character memory as one linear space of
//! four 20-column lines. Moving the cursor is a single byte: the screen
//! address with the high bit set.
//!
//! ```text
//!          col 0                 col 19
//! line 0   0x80 (128) ......... 0x93 (147)
//! line 1   0x94 (148) ......... 0xA7 (167)
//! line 2   0xA8 (168) ......... 0xBB (187)
//! line 3   0xBC (188) ......... 0xCF (207)
//! ```
//!
//! Two-line models only display lines 0 and 1, but accept the full range.

use crate::error::LcdError;

/// Screen address of line 0, column 0
pub const ADDRESS_BASE: u8 = 0x80;

/// Number of addressable lines
pub const LINES: u8 = 4;

/// Number of addressable columns per line
pub const COLUMNS: u8 = 20;

/// Offset of each line's first column from [`ADDRESS_BASE`]
const LINE_OFFSETS: [u8; LINES as usize] = [0, 20, 40, 60];

/// A validated (line, column) cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    line: u8,
    column: u8,
}

impl CursorPosition {
    /// Create a position, rejecting lines outside 0-3 and columns outside 0-19.
    ///
    /// ## Example
    ///
    /// ```
    /// use parallax_lcd::protocol::cursor::CursorPosition;
    ///
    /// assert!(CursorPosition::new(3, 19).is_ok());
    /// assert!(CursorPosition::new(4, 0).is_err());
    /// assert!(CursorPosition::new(0, 20).is_err());
    /// ```
    pub fn new(line: u8, column: u8) -> Result<Self, LcdError> {
        if line >= LINES {
            return Err(LcdError::Validation(format!(
                "line {} not in 0-{}",
                line,
                LINES - 1
            )));
        }
        if column >= COLUMNS {
            return Err(LcdError::Validation(format!(
                "column {} not in 0-{}",
                column,
                COLUMNS - 1
            )));
        }
        Ok(Self { line, column })
    }

    /// Create a position from signed coordinates (negative values are rejected).
    pub fn from_signed(line: i32, column: i32) -> Result<Self, LcdError> {
        let line = u8::try_from(line)
            .map_err(|_| LcdError::Validation(format!("line {} not in 0-3", line)))?;
        let column = u8::try_from(column)
            .map_err(|_| LcdError::Validation(format!("column {} not in 0-19", column)))?;
        Self::new(line, column)
    }

    /// Start of the given line
    pub fn line_start(line: u8) -> Result<Self, LcdError> {
        Self::new(line, 0)
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    pub fn column(&self) -> u8 {
        self.column
    }
}

impl TryFrom<(u8, u8)> for CursorPosition {
    type Error = LcdError;

    fn try_from((line, column): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(line, column)
    }
}

/// # Screen Address (cursor move opcode)
///
/// `128 + [0, 20, 40, 60][line] + column`
///
/// ## Example
///
/// ```
/// use parallax_lcd::protocol::cursor::{screen_address, CursorPosition};
///
/// let pos = CursorPosition::new(2, 5).unwrap();
/// assert_eq!(screen_address(pos), 173);
/// ```
#[inline]
pub fn screen_address(pos: CursorPosition) -> u8 {
    ADDRESS_BASE + LINE_OFFSETS[pos.line as usize] + pos.column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = CursorPosition> {
        (0..LINES).flat_map(|line| {
            (0..COLUMNS).map(move |column| CursorPosition::new(line, column).unwrap())
        })
    }

    #[test]
    fn test_line_bases() {
        let bases: Vec<u8> = (0..LINES)
            .map(|line| screen_address(CursorPosition::line_start(line).unwrap()))
            .collect();
        assert_eq!(bases, vec![128, 148, 168, 188]);
    }

    #[test]
    fn test_full_grid_is_unique_and_in_range() {
        let mut seen = [false; 256];
        for pos in grid() {
            let addr = screen_address(pos);
            assert!((128..=247).contains(&addr), "{:?} -> {}", pos, addr);
            assert!(!seen[addr as usize], "duplicate address {}", addr);
            seen[addr as usize] = true;
        }
        assert_eq!(seen.iter().filter(|&&s| s).count(), 80);
    }

    #[test]
    fn test_last_cell() {
        let pos = CursorPosition::new(3, 19).unwrap();
        assert_eq!(screen_address(pos), 207);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            CursorPosition::new(4, 0),
            Err(LcdError::Validation(_))
        ));
        assert!(matches!(
            CursorPosition::new(0, 20),
            Err(LcdError::Validation(_))
        ));
        assert!(CursorPosition::new(255, 255).is_err());
    }

    #[test]
    fn test_rejects_negative() {
        assert!(CursorPosition::from_signed(-1, 0).is_err());
        assert!(CursorPosition::from_signed(0, -1).is_err());
        assert_eq!(
            CursorPosition::from_signed(1, 2).unwrap(),
            CursorPosition::new(1, 2).unwrap()
        );
    }

    #[test]
    fn test_try_from_tuple() {
        let pos: CursorPosition = (2, 5).try_into().unwrap();
        assert_eq!((pos.line(), pos.column()), (2, 5));
        assert!(CursorPosition::try_from((3, 20)).is_err());
    }
}
