//! Helvetica advance widths (Adobe AFM, 1/1000 em) indexed by WinAnsi code.

const REPLACEMENT: u8 = b'?';

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Maps a character to its WinAnsi code; anything the encoding cannot
/// represent becomes `?`.
pub fn win_ansi_code(ch: char) -> u8 {
    let code = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        ' '..='~' | '\u{a0}'..='ÿ' => ch as u8,
        _ => REPLACEMENT,
    };

    if HELVETICA_WIDTHS[code as usize] == 0 {
        REPLACEMENT
    } else {
        code
    }
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

/// Rendered width in points of `text` set in Helvetica at `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    let units: u64 = text
        .chars()
        .map(|ch| u64::from(HELVETICA_WIDTHS[win_ansi_code(ch) as usize]))
        .sum();
    units as f64 * font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widths_follow_the_afm() {
        assert_eq!(text_width("", 12.0), 0.0);
        assert!((text_width("Hello", 12.0) - 27.336).abs() < 1e-9);
        assert!((text_width(" ", 1000.0) - 278.0).abs() < 1e-9);
        assert!((text_width("W", 1000.0) - 944.0).abs() < 1e-9);
    }

    #[test]
    fn very_long_tokens_do_not_overflow() {
        let token = "@".repeat(4_300_000);
        let expected = 4_300_000.0 * 1015.0 * 12.0 / 1000.0;
        assert!((text_width(&token, 12.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn typographic_punctuation_is_encoded() {
        assert_eq!(encode_win_ansi("“a—b”"), vec![0x93, b'a', 0x97, b'b', 0x94]);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("日本\u{1}"), b"???".to_vec());
        assert_eq!(text_width("日", 1000.0), 556.0);
    }
}
