//! # Custom Glyphs
//!
//! The display holds eight user-defined 5x8 characters. A glyph is defined by
//! sending the slot's define opcode followed by eight row bytes, top row first.
//!
//! ## Row Packing
//!
//! Each row uses the low five bits of a byte; the three high bits are unused:
//!
//! ```text
//! bit:   7 6 5 4 3 2 1 0
//!        0 0 0 │ │ │ │ └─ column 4 (rightmost)
//!              │ │ │ └─── column 3
//!              │ │ └───── column 2
//!              │ └─────── column 1
//!              └───────── column 0 (leftmost)
//!
//! ░█░█░ = 0b000_01010 = 0x0A
//! █████ = 0b000_11111 = 0x1F
//! ```
//!
//! 1 = dark pixel, 0 = background.

use std::path::Path;

use log::warn;

use crate::error::LcdError;

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: usize = 8;

/// Number of custom glyph slots
pub const GLYPH_SLOTS: u8 = 8;

/// Define glyph in slot 0 (slots 1-7 follow at 0xF9-0xFF)
pub const DEFINE_GLYPH_BASE: u8 = 0xF8;

// ============================================================================
// GLYPH SLOT
// ============================================================================

/// One of the eight device-resident custom character slots (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphSlot(u8);

impl GlyphSlot {
    /// Create a slot, rejecting values above 7.
    pub fn new(slot: u8) -> Result<Self, LcdError> {
        if slot >= GLYPH_SLOTS {
            return Err(LcdError::Validation(format!(
                "glyph slot {} not in 0-{}",
                slot,
                GLYPH_SLOTS - 1
            )));
        }
        Ok(Self(slot))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Opcode that starts defining this slot (0xF8-0xFF)
    #[inline]
    pub fn define_opcode(self) -> u8 {
        DEFINE_GLYPH_BASE + self.0
    }

    /// Byte that displays this slot's glyph at the cursor (0x00-0x07)
    #[inline]
    pub fn display_code(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for GlyphSlot {
    type Error = LcdError;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        Self::new(slot)
    }
}

// ============================================================================
// GLYPH BITMAP
// ============================================================================

/// A 5x8 monochrome glyph, `true` = dark pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    rows: [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl GlyphBitmap {
    pub fn new(rows: [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT]) -> Self {
        Self { rows }
    }

    /// All background
    pub fn blank() -> Self {
        Self::default()
    }

    /// All foreground
    pub fn filled() -> Self {
        Self::new([[true; GLYPH_WIDTH]; GLYPH_HEIGHT])
    }

    /// Build from eight text rows where `#` marks a dark pixel.
    ///
    /// Rows shorter than five characters are padded with background;
    /// characters past the fifth are ignored.
    ///
    /// ## Example
    ///
    /// ```
    /// use parallax_lcd::protocol::glyph::{encode_glyph, GlyphBitmap};
    ///
    /// let heart = GlyphBitmap::from_art([
    ///     ".....",
    ///     ".#.#.",
    ///     "#####",
    ///     "#####",
    ///     ".###.",
    ///     "..#..",
    ///     ".....",
    ///     ".....",
    /// ]);
    /// assert_eq!(encode_glyph(heart), [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00]);
    /// ```
    pub fn from_art(art: [&str; GLYPH_HEIGHT]) -> Self {
        let mut rows = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (row, line) in rows.iter_mut().zip(art) {
            for (pixel, ch) in row.iter_mut().zip(line.chars()) {
                *pixel = ch == '#';
            }
        }
        Self { rows }
    }

    /// Build from an arbitrary pixel grid.
    ///
    /// Grids wider than 5 or taller than 8 are cropped to the top-left 5x8.
    /// Narrower grids are right-aligned, so a 3-pixel row fills columns 2-4.
    /// Missing rows at the bottom are background.
    pub fn from_grid<F>(width: usize, height: usize, mut is_dark: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let shift = GLYPH_WIDTH.saturating_sub(width);
        let mut rows = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (y, row) in rows.iter_mut().enumerate().take(height) {
            for (x, pixel) in row[shift..].iter_mut().enumerate() {
                *pixel = is_dark(x, y);
            }
        }
        Self { rows }
    }

    /// Pixel at (column, row); out-of-range reads are background
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[[bool; GLYPH_WIDTH]; GLYPH_HEIGHT] {
        &self.rows
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Pack one row: leftmost pixel in bit 4, rightmost in bit 0.
#[inline]
fn pack_row(row: &[bool; GLYPH_WIDTH]) -> u8 {
    row.iter()
        .enumerate()
        .fold(0u8, |acc, (x, &dark)| acc | ((dark as u8) << (GLYPH_WIDTH - 1 - x)))
}

/// # Encode Glyph
///
/// Packs a bitmap into the eight row bytes the device expects, top row first.
/// Every byte is in 0x00-0x1F.
pub fn encode_glyph(bitmap: GlyphBitmap) -> [u8; GLYPH_HEIGHT] {
    let mut out = [0u8; GLYPH_HEIGHT];
    for (byte, row) in out.iter_mut().zip(bitmap.rows.iter()) {
        *byte = pack_row(row);
    }
    out
}

/// # Define Glyph Sequence
///
/// | Bytes | Meaning |
/// |-------|---------|
/// | 1 | `0xF8 + slot` |
/// | 8 | packed rows, top first |
///
/// ## Example
///
/// ```
/// use parallax_lcd::protocol::glyph::{define_glyph_bytes, GlyphBitmap, GlyphSlot};
///
/// let slot = GlyphSlot::new(2).unwrap();
/// let data = define_glyph_bytes(slot, GlyphBitmap::filled());
/// assert_eq!(data[0], 250);
/// assert_eq!(&data[1..], &[0x1F; 8]);
/// ```
pub fn define_glyph_bytes(slot: GlyphSlot, bitmap: GlyphBitmap) -> Vec<u8> {
    let mut data = Vec::with_capacity(1 + GLYPH_HEIGHT);
    data.push(slot.define_opcode());
    data.extend_from_slice(&encode_glyph(bitmap));
    data
}

// ============================================================================
// IMAGE LOADING
// ============================================================================

/// # Load Glyph From Image
///
/// Decodes an image file and classifies each pixel: opaque pure black
/// (`[0, 0, 0, 255]`) is dark. Anything else is background, including grays
/// from anti-aliasing and transparent pixels whose color happens to be black.
///
/// Images that are not exactly 5x8 are fitted with
/// [`GlyphBitmap::from_grid`], with a warning logged.
///
/// ## Errors
///
/// Returns [`LcdError::Image`] if the file cannot be opened or decoded.
pub fn load_glyph_from_image<P: AsRef<Path>>(path: P) -> Result<GlyphBitmap, LcdError> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|e| LcdError::Image(format!("Failed to load {}: {}", path.display(), e)))?
        .to_rgba8();

    let (width, height) = (img.width() as usize, img.height() as usize);
    if !is_glyph_size(width as u32, height as u32) {
        warn!(
            "glyph image {} is {}x{}, fitting to {}x{}",
            path.display(),
            width,
            height,
            GLYPH_WIDTH,
            GLYPH_HEIGHT
        );
    }

    Ok(GlyphBitmap::from_grid(width, height, |x, y| {
        img.get_pixel(x as u32, y as u32).0 == [0, 0, 0, 255]
    }))
}

/// Read an image's pixel size without decoding it.
///
/// Callers without a logger use this to report images that are not 5x8.
pub fn glyph_image_size<P: AsRef<Path>>(path: P) -> Result<(u32, u32), LcdError> {
    let path = path.as_ref();
    image::image_dimensions(path)
        .map_err(|e| LcdError::Image(format!("Failed to read {}: {}", path.display(), e)))
}

/// Whether an image of this size maps onto a glyph without cropping or padding
pub fn is_glyph_size(width: u32, height: u32) -> bool {
    width as usize == GLYPH_WIDTH && height as usize == GLYPH_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn temp_png(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "parallax-lcd-{}-{}.png",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_blank_and_filled() {
        assert_eq!(encode_glyph(GlyphBitmap::blank()), [0x00; 8]);
        assert_eq!(encode_glyph(GlyphBitmap::filled()), [0x1F; 8]);
    }

    #[test]
    fn test_bit_order() {
        let glyph = GlyphBitmap::from_art([
            "#....", ".#...", "..#..", "...#.", "....#", "#...#", ".....", "#####",
        ]);
        assert_eq!(
            encode_glyph(glyph),
            [0x10, 0x08, 0x04, 0x02, 0x01, 0x11, 0x00, 0x1F]
        );
    }

    #[test]
    fn test_deterministic() {
        let glyph = GlyphBitmap::from_art([
            "#.#.#", ".#.#.", "#.#.#", ".#.#.", "#.#.#", ".#.#.", "#.#.#", ".#.#.",
        ]);
        assert_eq!(encode_glyph(glyph), encode_glyph(glyph));
        assert_eq!(encode_glyph(glyph)[0], 0x15);
        assert_eq!(encode_glyph(glyph)[1], 0x0A);
    }

    #[test]
    fn test_from_art_pads_and_crops() {
        let glyph = GlyphBitmap::from_art(["#", "######", "", "", "", "", "", ""]);
        assert_eq!(encode_glyph(glyph)[0], 0x10);
        assert_eq!(encode_glyph(glyph)[1], 0x1F);
    }

    #[test]
    fn test_slot_range() {
        assert_eq!(GlyphSlot::new(0).unwrap().define_opcode(), 248);
        assert_eq!(GlyphSlot::new(7).unwrap().define_opcode(), 255);
        assert_eq!(GlyphSlot::new(5).unwrap().display_code(), 5);
        assert!(matches!(GlyphSlot::new(8), Err(LcdError::Validation(_))));
    }

    #[test]
    fn test_define_glyph_bytes() {
        let slot = GlyphSlot::new(3).unwrap();
        let glyph = GlyphBitmap::from_art([
            "..#..", ".###.", "#####", "..#..", "..#..", "..#..", "..#..", ".....",
        ]);
        let data = define_glyph_bytes(slot, glyph);
        assert_eq!(data.len(), 9);
        assert_eq!(data[0], 251);
        assert_eq!(&data[1..], &encode_glyph(glyph));
    }

    #[test]
    fn test_load_exact_image() {
        let path = temp_png("exact");
        let img = RgbImage::from_fn(5, 8, |x, y| {
            if x == y || y == 7 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            encode_glyph(glyph),
            [0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00, 0x1F]
        );
    }

    #[test]
    fn test_load_only_pure_black_is_dark() {
        let path = temp_png("gray");
        let img = RgbImage::from_fn(5, 8, |x, _| match x {
            0 => Rgb([0, 0, 0]),
            1 => Rgb([1, 0, 0]),
            2 => Rgb([0, 0, 1]),
            3 => Rgb([128, 128, 128]),
            _ => Rgb([255, 255, 255]),
        });
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(encode_glyph(glyph), [0x10; 8]);
    }

    #[test]
    fn test_load_opaque_rgba() {
        let path = temp_png("rgba");
        let img = RgbaImage::from_pixel(5, 8, Rgba([0, 0, 0, 255]));
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(glyph, GlyphBitmap::filled());
    }

    #[test]
    fn test_load_oversized_image_is_cropped() {
        let path = temp_png("large");
        let img = RgbImage::from_pixel(10, 12, Rgb([0, 0, 0]));
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(glyph, GlyphBitmap::filled());
    }

    #[test]
    fn test_load_undersized_image_is_padded() {
        let path = temp_png("small");
        let img = RgbImage::from_pixel(3, 4, Rgb([0, 0, 0]));
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            encode_glyph(glyph),
            [0x07, 0x07, 0x07, 0x07, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_load_narrow_image_is_right_aligned() {
        let path = temp_png("narrow");
        let img = RgbImage::from_fn(3, 8, |x, _| {
            if x == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(encode_glyph(glyph), [0x04; 8]);
    }

    #[test]
    fn test_load_transparent_background() {
        let path = temp_png("transparent");
        let img = RgbaImage::from_fn(5, 8, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(encode_glyph(glyph), [0x10; 8]);
    }

    #[test]
    fn test_load_translucent_black_is_background() {
        let path = temp_png("translucent");
        let img = RgbaImage::from_fn(5, 8, |x, _| match x {
            0 => Rgba([0, 0, 0, 255]),
            1 => Rgba([0, 0, 0, 128]),
            _ => Rgba([255, 255, 255, 255]),
        });
        img.save(&path).unwrap();

        let glyph = load_glyph_from_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(encode_glyph(glyph), [0x10; 8]);
    }

    #[test]
    fn test_glyph_image_size() {
        let path = temp_png("size");
        RgbImage::from_pixel(7, 9, Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        let size = glyph_image_size(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(size, (7, 9));
        assert!(!is_glyph_size(size.0, size.1));
        assert!(is_glyph_size(5, 8));
        assert!(matches!(
            glyph_image_size("/nonexistent/glyph.png"),
            Err(LcdError::Image(_))
        ));
    }

    #[test]
    fn test_from_grid_right_aligns_narrow_rows() {
        let glyph = GlyphBitmap::from_grid(2, 1, |x, _| x == 1);
        assert_eq!(encode_glyph(glyph), [0x01, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_glyph_from_image("/nonexistent/glyph.png");
        assert!(matches!(result, Err(LcdError::Image(_))));
    }
}
