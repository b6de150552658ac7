//! 5x7 bitmap font for chart text
//!
//! Each glyph is seven rows of five cells, `#` set and `.` clear. Only
//! printable ASCII has glyphs; [`displayable`] rewrites anything else as its
//! `\u{..}` escape before drawing, and [`glyph`] falls back to a hollow box.

use std::borrow::Cow;

/// Glyph width in cells
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph height in cells
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance per character in cells (glyph plus one blank column)
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

type Glyph = [&'static str; 7];

const MISSING: Glyph = [
    "#####", "#...#", "#...#", "#...#", "#...#", "#...#", "#####",
];

/// Returns the bitmap rows for `c`
#[rustfmt::skip]
pub fn glyph(c: char) -> Glyph {
    match c {
        ' ' => [".....", ".....", ".....", ".....", ".....", ".....", "....."],
        '!' => ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."],
        '"' => [".#.#.", ".#.#.", ".....", ".....", ".....", ".....", "....."],
        '#' => [".#.#.", ".#.#.", "#####", ".#.#.", "#####", ".#.#.", ".#.#."],
        '$' => ["..#..", ".####", "#.#..", ".###.", "..#.#", "####.", "..#.."],
        '%' => ["##...", "##..#", "...#.", "..#..", ".#...", "#..##", "...##"],
        '&' => [".##..", "#..#.", "#.#..", ".#...", "#.#.#", "#..#.", ".##.#"],
        '\'' => ["..#..", "..#..", ".....", ".....", ".....", ".....", "....."],
        '(' => ["...#.", "..#..", ".#...", ".#...", ".#...", "..#..", "...#."],
        ')' => [".#...", "..#..", "...#.", "...#.", "...#.", "..#..", ".#..."],
        '*' => [".....", "..#..", "#.#.#", ".###.", "#.#.#", "..#..", "....."],
        '+' => [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."],
        ',' => [".....", ".....", ".....", ".....", ".##..", "..#..", ".#..."],
        '-' => [".....", ".....", ".....", "#####", ".....", ".....", "....."],
        '.' => [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."],
        '/' => [".....", "....#", "...#.", "..#..", ".#...", "#....", "....."],
        '0' => [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
        '1' => ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."],
        '2' => [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
        '3' => ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."],
        '4' => ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
        '5' => ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
        '6' => ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."],
        '7' => ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
        '8' => [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
        '9' => [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."],
        ':' => [".....", ".##..", ".##..", ".....", ".##..", ".##..", "....."],
        ';' => [".....", ".##..", ".##..", ".....", ".##..", "..#..", ".#..."],
        '<' => ["...#.", "..#..", ".#...", "#....", ".#...", "..#..", "...#."],
        '=' => [".....", ".....", "#####", ".....", "#####", ".....", "....."],
        '>' => [".#...", "..#..", "...#.", "....#", "...#.", "..#..", ".#..."],
        '?' => [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."],
        '@' => [".###.", "#...#", "....#", ".##.#", "#.#.#", "#.#.#", ".###."],
        'A' => [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'B' => ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."],
        'C' => [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."],
        'D' => ["###..", "#..#.", "#...#", "#...#", "#...#", "#..#.", "###.."],
        'E' => ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
        'F' => ["#####", "#....", "#....", "####.", "#....", "#....", "#...."],
        'G' => [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"],
        'H' => ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'I' => [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."],
        'J' => ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."],
        'K' => ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"],
        'L' => ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
        'M' => ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"],
        'N' => ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'P' => ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."],
        'Q' => [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'S' => [".####", "#....", "#....", ".###.", "....#", "....#", "####."],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        'U' => ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'V' => ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."],
        'W' => ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."],
        'X' => ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"],
        'Y' => ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."],
        'Z' => ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"],
        '[' => [".###.", ".#...", ".#...", ".#...", ".#...", ".#...", ".###."],
        '\\' => [".....", "#....", ".#...", "..#..", "...#.", "....#", "....."],
        ']' => [".###.", "...#.", "...#.", "...#.", "...#.", "...#.", ".###."],
        '^' => ["..#..", ".#.#.", "#...#", ".....", ".....", ".....", "....."],
        '_' => [".....", ".....", ".....", ".....", ".....", ".....", "#####"],
        '`' => [".#...", "..#..", ".....", ".....", ".....", ".....", "....."],
        'a' => [".....", ".....", ".###.", "....#", ".####", "#...#", ".####"],
        'b' => ["#....", "#....", "#.##.", "##..#", "#...#", "#...#", "####."],
        'c' => [".....", ".....", ".###.", "#....", "#....", "#...#", ".###."],
        'd' => ["....#", "....#", ".##.#", "#..##", "#...#", "#...#", ".####"],
        'e' => [".....", ".....", ".###.", "#...#", "#####", "#....", ".###."],
        'f' => ["..##.", ".#..#", ".#...", "###..", ".#...", ".#...", ".#..."],
        'g' => [".....", ".####", "#...#", "#...#", ".####", "....#", ".###."],
        'h' => ["#....", "#....", "#.##.", "##..#", "#...#", "#...#", "#...#"],
        'i' => ["..#..", ".....", ".##..", "..#..", "..#..", "..#..", ".###."],
        'j' => ["...#.", ".....", "..##.", "...#.", "...#.", "#..#.", ".##.."],
        'k' => ["#....", "#....", "#..#.", "#.#..", "##...", "#.#..", "#..#."],
        'l' => [".##..", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."],
        'm' => [".....", ".....", "##.#.", "#.#.#", "#.#.#", "#...#", "#...#"],
        'n' => [".....", ".....", "#.##.", "##..#", "#...#", "#...#", "#...#"],
        'o' => [".....", ".....", ".###.", "#...#", "#...#", "#...#", ".###."],
        'p' => [".....", ".....", "####.", "#...#", "####.", "#....", "#...."],
        'q' => [".....", ".....", ".##.#", "#..##", ".####", "....#", "....#"],
        'r' => [".....", ".....", "#.##.", "##..#", "#....", "#....", "#...."],
        's' => [".....", ".....", ".###.", "#....", ".###.", "....#", "####."],
        't' => [".#...", ".#...", "###..", ".#...", ".#...", ".#..#", "..##."],
        'u' => [".....", ".....", "#...#", "#...#", "#...#", "#..##", ".##.#"],
        'v' => [".....", ".....", "#...#", "#...#", "#...#", ".#.#.", "..#.."],
        'w' => [".....", ".....", "#...#", "#...#", "#.#.#", "#.#.#", ".#.#."],
        'x' => [".....", ".....", "#...#", ".#.#.", "..#..", ".#.#.", "#...#"],
        'y' => [".....", ".....", "#...#", "#...#", ".####", "....#", ".###."],
        'z' => [".....", ".....", "#####", "...#.", "..#..", ".#...", "#####"],
        '{' => ["...#.", "..#..", "..#..", ".#...", "..#..", "..#..", "...#."],
        '|' => ["..#..", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        '}' => [".#...", "..#..", "..#..", "...#.", "..#..", "..#..", ".#..."],
        '~' => [".....", ".....", ".#...", "#.#.#", "...#.", ".....", "....."],
        _ => MISSING,
    }
}

/// Returns `true` if cell (`col`, `row`) of the glyph for `c` is set
pub fn is_set(c: char, col: u32, row: u32) -> bool {
    if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
        return false;
    }
    glyph(c)[row as usize].as_bytes()[col as usize] == b'#'
}

/// Returns `true` if the font has a glyph for `c`
pub fn has_glyph(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// `text` with every character the font lacks replaced by its escape
///
/// `"café"` becomes `"caf\u{e9}"`, which stays legible where a box would not.
pub fn displayable(text: &str) -> Cow<'_, str> {
    if text.chars().all(has_glyph) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if has_glyph(c) {
            out.push(c);
        } else {
            out.extend(c.escape_unicode());
        }
    }
    Cow::Owned(out)
}

/// Width in cells of `text` laid out on one line (no trailing gap)
///
/// Measured after [`displayable`] escaping.
pub fn text_cells(text: &str) -> u32 {
    let chars = displayable(text).chars().count() as u32;
    if chars == 0 {
        0
    } else {
        chars * GLYPH_ADVANCE - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_printable_glyph_is_well_formed() {
        for c in (0x20u8..=0x7e).map(char::from) {
            for row in glyph(c) {
                assert_eq!(row.len(), GLYPH_WIDTH as usize, "glyph {c:?}");
                assert!(row.bytes().all(|b| b == b'#' || b == b'.'), "glyph {c:?}");
            }
        }
    }

    #[test]
    fn test_visible_glyphs_have_ink() {
        for c in (0x21u8..=0x7e).map(char::from) {
            let ink = (0..GLYPH_HEIGHT)
                .flat_map(|row| (0..GLYPH_WIDTH).map(move |col| (col, row)))
                .filter(|&(col, row)| is_set(c, col, row))
                .count();
            assert!(ink > 0, "glyph {c:?} is blank");
        }
    }

    #[test]
    fn test_unknown_char_is_box() {
        assert_eq!(glyph('é'), MISSING);
        assert!(is_set('é', 0, 0));
        assert!(!is_set('é', 2, 3));
    }

    #[test]
    fn test_text_cells() {
        assert_eq!(text_cells(""), 0);
        assert_eq!(text_cells("A"), 5);
        assert_eq!(text_cells("AB"), 11);
        // "\u{e9}" is six characters
        assert_eq!(text_cells("é"), 35);
    }

    #[test]
    fn test_displayable_keeps_ascii() {
        assert!(matches!(displayable("py312 (pip)"), Cow::Borrowed("py312 (pip)")));
    }

    #[test]
    fn test_displayable_escapes_missing_glyphs() {
        assert_eq!(displayable("café"), "caf\\u{e9}");
        assert_eq!(displayable("环境 (pip)"), "\\u{73af}\\u{5883} (pip)");
        assert_eq!(displayable("tab\there"), "tab\\u{9}here");
        assert!(displayable("Ünïcode").chars().all(has_glyph));
    }

    #[test]
    fn test_out_of_range_cell() {
        assert!(!is_set('A', GLYPH_WIDTH, 0));
        assert!(!is_set('A', 0, GLYPH_HEIGHT));
    }
}
