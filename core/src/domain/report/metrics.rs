//! Glyph metrics for the two standard PDF fonts the report uses, and the
//! greedy word wrapper built on them.
//!
//! Widths are the Adobe Font Metrics values for Helvetica and
//! Helvetica-Bold in 1/1000 em, indexed from the space character (0x20).

use crate::domain::report::entities::Font;

const FIRST_PRINTABLE: usize = 0x20;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn glyph_width(ch: char, font: Font) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };

    match ch {
        ' '..='~' => table[ch as usize - FIRST_PRINTABLE],
        '•' => 350,
        '…' | '—' => 1000,
        '‘' | '’' => match font {
            Font::Regular => 222,
            Font::Bold => 278,
        },
        '“' | '”' => match font {
            Font::Regular => 333,
            Font::Bold => 500,
        },
        _ => 556,
    }
}

/// Width of `text` in points at the given font size.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| u32::from(glyph_width(ch, font)))
        .sum();
    units as f32 * size / 1000.0
}

/// Greedily wraps `text` to `max_width` points.
///
/// Explicit line breaks are kept, blank lines are dropped and runs of
/// whitespace collapse to a single space. A word wider than the whole line
/// is split across lines.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = place_word(word, font, size, max_width, &mut lines);
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = place_word(word, font, size, max_width, &mut lines);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Starts a fresh line with `word`, breaking it when it cannot fit on one
/// line. Full chunks go to `lines`; the trailing chunk is returned.
fn place_word(
    word: &str,
    font: Font,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) -> String {
    if text_width(word, font, size) <= max_width {
        return word.to_string();
    }

    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if chunk.chars().count() > 1 && text_width(&chunk, font, size) > max_width {
            chunk.pop();
            lines.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    chunk
}
