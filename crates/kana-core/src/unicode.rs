//! Character-level classification for half-width / full-width Japanese text.
//!
//! Every predicate is a closed-range test over fixed code points. The
//! full-width ASCII block mirrors half-width ASCII at a constant offset, and
//! the katakana block mirrors hiragana at a constant offset, so conversions
//! between them are arithmetic shifts rather than table lookups.

use serde::Serialize;

pub const HANKAKU_SPACE: char = ' ';
pub const ZENKAKU_SPACE: char = '\u{3000}';

pub const HANKAKU_ASCII_FIRST: char = '!';
pub const HANKAKU_ASCII_LAST: char = '~';
pub const ZENKAKU_ASCII_FIRST: char = '\u{FF01}'; // ！
pub const ZENKAKU_ASCII_LAST: char = '\u{FF5E}'; // ～

pub const HANKAKU_NUMBER_FIRST: char = '0';
pub const HANKAKU_NUMBER_LAST: char = '9';
pub const ZENKAKU_NUMBER_FIRST: char = '\u{FF10}'; // ０
pub const ZENKAKU_NUMBER_LAST: char = '\u{FF19}'; // ９

pub const HANKAKU_UPPER_FIRST: char = 'A';
pub const HANKAKU_UPPER_LAST: char = 'Z';
pub const HANKAKU_LOWER_FIRST: char = 'a';
pub const HANKAKU_LOWER_LAST: char = 'z';
pub const ZENKAKU_UPPER_FIRST: char = '\u{FF21}'; // Ａ
pub const ZENKAKU_UPPER_LAST: char = '\u{FF3A}'; // Ｚ
pub const ZENKAKU_LOWER_FIRST: char = '\u{FF41}'; // ａ
pub const ZENKAKU_LOWER_LAST: char = '\u{FF5A}'; // ｚ

/// First/last hiragana with a katakana counterpart (ぁ..ゖ).
pub const ZENKAKU_HIRAGANA_FIRST: char = '\u{3041}';
pub const ZENKAKU_HIRAGANA_LAST: char = '\u{3096}';
/// First/last katakana with a hiragana counterpart (ァ..ヶ).
pub const ZENKAKU_KATAKANA_FIRST: char = '\u{30A1}';
pub const ZENKAKU_KATAKANA_LAST: char = '\u{30F6}';

pub const HANKAKU_KATAKANA_FIRST: char = '\u{FF61}'; // ｡
pub const HANKAKU_KATAKANA_LAST: char = '\u{FF9F}'; // ﾟ
/// Dakuten as a separate half-width character.
pub const HANKAKU_VOICED_MARK: char = '\u{FF9E}'; // ﾞ
/// Handakuten as a separate half-width character.
pub const HANKAKU_ASPIRATED_MARK: char = '\u{FF9F}'; // ﾟ

/// Half-width ASCII → full-width ASCII delta (0xFEE0).
pub const OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII: i32 =
    ZENKAKU_ASCII_FIRST as i32 - HANKAKU_ASCII_FIRST as i32;
/// Hiragana → katakana delta (0x60).
pub const OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA: i32 =
    ZENKAKU_KATAKANA_FIRST as i32 - ZENKAKU_HIRAGANA_FIRST as i32;

/// Visible half-width ASCII (`!`..`~`); the space is not included.
pub fn is_hankaku_ascii(c: char) -> bool {
    (HANKAKU_ASCII_FIRST..=HANKAKU_ASCII_LAST).contains(&c)
}

pub fn is_hankaku_space(c: char) -> bool {
    c == HANKAKU_SPACE
}

pub fn is_zenkaku_ascii(c: char) -> bool {
    (ZENKAKU_ASCII_FIRST..=ZENKAKU_ASCII_LAST).contains(&c)
}

pub fn is_zenkaku_space(c: char) -> bool {
    c == ZENKAKU_SPACE
}

pub fn is_hankaku_letter(c: char) -> bool {
    (HANKAKU_UPPER_FIRST..=HANKAKU_UPPER_LAST).contains(&c)
        || (HANKAKU_LOWER_FIRST..=HANKAKU_LOWER_LAST).contains(&c)
}

pub fn is_hankaku_number(c: char) -> bool {
    (HANKAKU_NUMBER_FIRST..=HANKAKU_NUMBER_LAST).contains(&c)
}

pub fn is_zenkaku_letter(c: char) -> bool {
    (ZENKAKU_UPPER_FIRST..=ZENKAKU_UPPER_LAST).contains(&c)
        || (ZENKAKU_LOWER_FIRST..=ZENKAKU_LOWER_LAST).contains(&c)
}

pub fn is_zenkaku_number(c: char) -> bool {
    (ZENKAKU_NUMBER_FIRST..=ZENKAKU_NUMBER_LAST).contains(&c)
}

pub fn is_zenkaku_hiragana_with_katakana_equivalent(c: char) -> bool {
    (ZENKAKU_HIRAGANA_FIRST..=ZENKAKU_HIRAGANA_LAST).contains(&c)
}

pub fn is_zenkaku_katakana_with_hiragana_equivalent(c: char) -> bool {
    (ZENKAKU_KATAKANA_FIRST..=ZENKAKU_KATAKANA_LAST).contains(&c)
}

/// Half-width katakana block, including punctuation and both diacritic marks.
pub fn is_hankaku_katakana(c: char) -> bool {
    (HANKAKU_KATAKANA_FIRST..=HANKAKU_KATAKANA_LAST).contains(&c)
}

pub fn is_hankaku_diacritic(c: char) -> bool {
    c == HANKAKU_VOICED_MARK || c == HANKAKU_ASPIRATED_MARK
}

/// Shift a character by a signed code-point delta.
/// Returns `c` unchanged if the result is not a valid `char`.
pub fn shift(c: char, delta: i32) -> char {
    u32::try_from(c as i64 + delta as i64)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(c)
}

/// Which conversion domain a character belongs to. Shown per step by `explain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    HankakuSpace,
    HankakuAscii,
    ZenkakuSpace,
    ZenkakuAscii,
    HankakuKatakana,
    HankakuDiacritic,
    /// Hiragana with a katakana counterpart.
    Hiragana,
    /// Full-width katakana with a hiragana counterpart.
    Katakana,
    Other,
}

impl CharClass {
    pub fn name(self) -> &'static str {
        match self {
            CharClass::HankakuSpace => "han-space",
            CharClass::HankakuAscii => "han-ascii",
            CharClass::ZenkakuSpace => "zen-space",
            CharClass::ZenkakuAscii => "zen-ascii",
            CharClass::HankakuKatakana => "han-kata",
            CharClass::HankakuDiacritic => "han-mark",
            CharClass::Hiragana => "hiragana",
            CharClass::Katakana => "katakana",
            CharClass::Other => "other",
        }
    }
}

pub fn classify(c: char) -> CharClass {
    if is_hankaku_space(c) {
        CharClass::HankakuSpace
    } else if is_hankaku_ascii(c) {
        CharClass::HankakuAscii
    } else if is_zenkaku_space(c) {
        CharClass::ZenkakuSpace
    } else if is_zenkaku_ascii(c) {
        CharClass::ZenkakuAscii
    } else if is_hankaku_diacritic(c) {
        CharClass::HankakuDiacritic
    } else if is_hankaku_katakana(c) {
        CharClass::HankakuKatakana
    } else if is_zenkaku_hiragana_with_katakana_equivalent(c) {
        CharClass::Hiragana
    } else if is_zenkaku_katakana_with_hiragana_equivalent(c) {
        CharClass::Katakana
    } else {
        CharClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII, 0xFEE0);
        assert_eq!(OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA, 0x60);
        assert_eq!(shift('A', OFFSET_HANKAKU_ASCII_TO_ZENKAKU_ASCII), 'Ａ');
        assert_eq!(shift('か', OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA), 'カ');
        assert_eq!(shift('ヶ', -OFFSET_ZENKAKU_HIRAGANA_TO_ZENKAKU_KATAKANA), 'ゖ');
    }

    #[test]
    fn test_shift_out_of_range_is_identity() {
        assert_eq!(shift('\0', -1), '\0');
        // Would land in the surrogate range.
        assert_eq!(shift('\u{D7FF}', 1), '\u{D7FF}');
        assert_eq!(shift(char::MAX, 1), char::MAX);
    }

    #[test]
    fn test_ascii_ranges() {
        assert!(is_hankaku_ascii('!'));
        assert!(is_hankaku_ascii('~'));
        assert!(!is_hankaku_ascii(' '));
        assert!(!is_hankaku_ascii('\u{7F}'));
        assert!(is_zenkaku_ascii('！'));
        assert!(is_zenkaku_ascii('～'));
        assert!(!is_zenkaku_ascii('\u{3000}'));
        assert!(is_hankaku_space(' '));
        assert!(is_zenkaku_space('　'));
    }

    #[test]
    fn test_letters_and_numbers() {
        assert!(is_hankaku_letter('a'));
        assert!(is_hankaku_letter('Z'));
        assert!(!is_hankaku_letter('['));
        assert!(!is_hankaku_letter('5'));
        assert!(is_hankaku_number('0'));
        assert!(!is_hankaku_number('a'));
        assert!(is_zenkaku_letter('ａ'));
        assert!(is_zenkaku_letter('Ｚ'));
        assert!(!is_zenkaku_letter('［'));
        assert!(is_zenkaku_number('９'));
        assert!(!is_zenkaku_number('Ａ'));
    }

    #[test]
    fn test_kana_ranges() {
        assert!(is_zenkaku_hiragana_with_katakana_equivalent('ぁ'));
        assert!(is_zenkaku_hiragana_with_katakana_equivalent('ん'));
        assert!(is_zenkaku_hiragana_with_katakana_equivalent('ゔ'));
        assert!(!is_zenkaku_hiragana_with_katakana_equivalent('ゝ'));
        assert!(is_zenkaku_katakana_with_hiragana_equivalent('ァ'));
        assert!(is_zenkaku_katakana_with_hiragana_equivalent('ヶ'));
        assert!(!is_zenkaku_katakana_with_hiragana_equivalent('ー'));
        assert!(!is_zenkaku_katakana_with_hiragana_equivalent('・'));
        assert!(is_hankaku_katakana('ｱ'));
        assert!(is_hankaku_katakana('｡'));
        assert!(is_hankaku_diacritic('ﾞ'));
        assert!(is_hankaku_diacritic('ﾟ'));
        assert!(!is_hankaku_diacritic('゛'));
    }

    #[test]
    fn test_char_class_names() {
        assert_eq!(CharClass::HankakuDiacritic.name(), "han-mark");
        assert_eq!(CharClass::Katakana.name(), "katakana");
    }

    #[test]
    fn test_char_classification() {
        assert_eq!(classify(' '), CharClass::HankakuSpace);
        assert_eq!(classify('a'), CharClass::HankakuAscii);
        assert_eq!(classify('　'), CharClass::ZenkakuSpace);
        assert_eq!(classify('Ａ'), CharClass::ZenkakuAscii);
        assert_eq!(classify('ｶ'), CharClass::HankakuKatakana);
        assert_eq!(classify('ﾞ'), CharClass::HankakuDiacritic);
        assert_eq!(classify('あ'), CharClass::Hiragana);
        assert_eq!(classify('ア'), CharClass::Katakana);
        assert_eq!(classify('ヶ'), CharClass::Katakana);
        // Shared marks and iteration marks belong to neither script.
        assert_eq!(classify('ー'), CharClass::Other);
        assert_eq!(classify('ゝ'), CharClass::Other);
        assert_eq!(classify('漢'), CharClass::Other);
        assert_eq!(classify('é'), CharClass::Other);
        assert_eq!(classify('\u{1F600}'), CharClass::Other);
    }
}
