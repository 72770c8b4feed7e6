//! Terminal output with half-block glyphs.

use crate::matrix::{Matrix, Rgb};
use std::fmt::Write;

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';
const RESET: &str = "\x1b[0m";

/// Render `matrix` as 24-bit ANSI text.
///
/// Each text line holds two pixel rows: the upper pixel is the glyph's
/// foreground and the lower pixel its background. Lines are separated by
/// `\n` and each ends with a color reset. An odd final row is paired with an
/// unlit row.
pub fn to_ansi(matrix: &Matrix) -> String {
    let mut out = String::new();
    for y in (0..matrix.height()).step_by(2) {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..matrix.width() {
            push_cell(&mut out, matrix.get(x, y), matrix.get(x, y + 1));
        }
        out.push_str(RESET);
    }
    out
}

fn push_cell(out: &mut String, top: Option<Rgb>, bottom: Option<Rgb>) {
    // Writing to a String cannot fail
    let _ = match (top, bottom) {
        (None, None) => write!(out, "{RESET} "),
        (Some(Rgb(r, g, b)), None) => write!(out, "{RESET}\x1b[38;2;{r};{g};{b}m{UPPER_HALF}"),
        (None, Some(Rgb(r, g, b))) => write!(out, "{RESET}\x1b[38;2;{r};{g};{b}m{LOWER_HALF}"),
        (Some(Rgb(r, g, b)), Some(Rgb(br, bg, bb))) => write!(
            out,
            "\x1b[38;2;{r};{g};{b}m\x1b[48;2;{br};{bg};{bb}m{UPPER_HALF}"
        ),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_line_count() {
        assert_eq!(to_ansi(&Matrix::new(64, 32)).lines().count(), 16);
        assert_eq!(to_ansi(&Matrix::new(3, 5)).lines().count(), 3);
        assert_eq!(to_ansi(&Matrix::new(3, 0)), "");
    }

    #[test]
    fn test_glyphs() {
        let mut m = Matrix::new(4, 2);
        m.set(1, 0, Rgb::RED);
        m.set(2, 1, Rgb::RED);
        m.set(3, 0, Rgb::RED);
        m.set(3, 1, Rgb(0, 0, 255));

        let text = to_ansi(&m);
        assert_eq!(strip_ansi(&text), " ▀▄▀");
        assert!(text.contains("\x1b[38;2;255;0;0m"));
        assert!(text.contains("\x1b[48;2;0;0;255m"));
        assert!(text.ends_with(RESET));
    }

    #[test]
    fn test_dark_matrix_is_blank() {
        let text = to_ansi(&Matrix::new(5, 4));
        assert_eq!(strip_ansi(&text), "     \n     ");
    }
}
