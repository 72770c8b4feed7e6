//! Pixel grid and color types.

use serde::{Deserialize, Serialize};

/// 24-bit color, written as `[r, g, b]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure red, the classic LED-panel color.
    pub const RED: Rgb = Rgb(255, 0, 0);
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        [r, g, b]
    }
}

/// A `width` × `height` grid of pixels, row-major, `y = 0` at the top.
///
/// `None` is an unlit pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    width: usize,
    height: usize,
    pixels: Vec<Option<Rgb>>,
}

impl Matrix {
    /// An all-dark matrix.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y`; `None` when unlit or out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Light one pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(color);
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Option<Rgb>]> + '_ {
        self.pixels.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut m = Matrix::new(4, 3);
        assert_eq!(m.lit_count(), 0);

        m.set(3, 2, Rgb::RED);
        m.set(4, 0, Rgb::RED);
        m.set(0, 3, Rgb::RED);

        assert_eq!(m.get(3, 2), Some(Rgb::RED));
        assert_eq!(m.get(4, 0), None);
        assert_eq!(m.lit_count(), 1);

        m.clear();
        assert_eq!(m.lit_count(), 0);
    }

    #[test]
    fn test_rows() {
        let mut m = Matrix::new(2, 3);
        m.set(1, 1, Rgb(1, 2, 3));
        let rows: Vec<_> = m.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &[None, Some(Rgb(1, 2, 3))]);
    }

    #[test]
    fn test_empty_matrix_has_no_rows() {
        assert_eq!(Matrix::new(0, 0).rows().count(), 0);
    }

    #[test]
    fn test_rgb_array_conversion() {
        let c = Rgb::from([10, 20, 30]);
        assert_eq!(c, Rgb(10, 20, 30));
        assert_eq!(<[u8; 3]>::from(c), [10, 20, 30]);
    }
}
