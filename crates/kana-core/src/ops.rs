//! Conversion operation flags and the single-letter mnemonic notation.
//!
//! Bit values match the historical `mb_convert_kana` option codes, so an
//! integer mask produced elsewhere can be passed straight through
//! [`ConvertOps::from_mask`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// A set of conversion operations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConvertOps: u32 {
        const HAN_ASCII_TO_ZEN_ASCII = 0x0000_0001;
        const HAN_LETTER_TO_ZEN_LETTER = 0x0000_0002;
        const HAN_NUMBER_TO_ZEN_NUMBER = 0x0000_0004;
        const HAN_SPACE_TO_ZEN_SPACE = 0x0000_0008;
        const ZEN_ASCII_TO_HAN_ASCII = 0x0000_0010;
        const ZEN_LETTER_TO_HAN_LETTER = 0x0000_0020;
        const ZEN_NUMBER_TO_HAN_NUMBER = 0x0000_0040;
        const ZEN_SPACE_TO_HAN_SPACE = 0x0000_0080;
        const HAN_KATA_TO_ZEN_KATA = 0x0000_0100;
        const HAN_KATA_TO_ZEN_HIRA = 0x0000_0200;
        const ZEN_KATA_TO_HAN_KATA = 0x0000_1000;
        const ZEN_HIRA_TO_HAN_KATA = 0x0000_2000;
        const ZEN_HIRA_TO_ZEN_KATA = 0x0001_0000;
        const ZEN_KATA_TO_ZEN_HIRA = 0x0002_0000;
        /// Modifier for `HAN_KATA_TO_ZEN_KATA` / `HAN_KATA_TO_ZEN_HIRA`: do not
        /// fuse a half-width base with a following half-width diacritic mark.
        const KEEP_DIACRITIC_MARKS_APART = 0x0010_0000;
    }
}

impl ConvertOps {
    /// Every conversion flag. The modifier is not included.
    pub const CONVERSIONS: Self = Self::all().difference(Self::KEEP_DIACRITIC_MARKS_APART);

    /// Build from a caller-supplied integer mask.
    ///
    /// Zero and negative masks mean "no conversion requested" and yield an
    /// empty set rather than an error. The mask is a 32-bit signed value, so
    /// anything outside `1..=i32::MAX` counts as non-positive. Unknown bits are
    /// dropped.
    pub fn from_mask(mask: i64) -> Self {
        match i32::try_from(mask) {
            Ok(mask) if mask > 0 => Self::from_bits_truncate(mask as u32),
            _ => Self::empty(),
        }
    }

    /// Parse the mnemonic notation (`"KVa"` etc.). Letters without a flag are
    /// ignored.
    pub fn from_mnemonic(mode: &str) -> Self {
        mode.chars()
            .filter_map(flag_for_letter)
            .fold(Self::empty(), |acc, op| acc | op)
    }

    /// Canonical mnemonic spelling. The modifier has no letter and is omitted.
    pub fn to_mnemonic(self) -> String {
        MNEMONIC_TABLE
            .iter()
            .filter(|(_, op)| self.contains(*op))
            .map(|(letter, _)| *letter)
            .collect()
    }

    /// True when at least one conversion flag is set; a lone modifier does not count.
    pub const fn has_conversion(self) -> bool {
        self.intersects(Self::CONVERSIONS)
    }
}

impl FromStr for ConvertOps {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_mnemonic(s))
    }
}

impl fmt::Display for ConvertOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mnemonic())
    }
}

/// Mnemonic letter → flag, in canonical order.
pub const MNEMONIC_TABLE: [(char, ConvertOps); 14] = [
    ('A', ConvertOps::HAN_ASCII_TO_ZEN_ASCII),
    ('R', ConvertOps::HAN_LETTER_TO_ZEN_LETTER),
    ('N', ConvertOps::HAN_NUMBER_TO_ZEN_NUMBER),
    ('S', ConvertOps::HAN_SPACE_TO_ZEN_SPACE),
    ('a', ConvertOps::ZEN_ASCII_TO_HAN_ASCII),
    ('r', ConvertOps::ZEN_LETTER_TO_HAN_LETTER),
    ('n', ConvertOps::ZEN_NUMBER_TO_HAN_NUMBER),
    ('s', ConvertOps::ZEN_SPACE_TO_HAN_SPACE),
    ('K', ConvertOps::HAN_KATA_TO_ZEN_KATA),
    ('H', ConvertOps::HAN_KATA_TO_ZEN_HIRA),
    ('k', ConvertOps::ZEN_KATA_TO_HAN_KATA),
    ('h', ConvertOps::ZEN_HIRA_TO_HAN_KATA),
    ('C', ConvertOps::ZEN_HIRA_TO_ZEN_KATA),
    ('c', ConvertOps::ZEN_KATA_TO_ZEN_HIRA),
];

pub fn flag_for_letter(letter: char) -> Option<ConvertOps> {
    MNEMONIC_TABLE
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, op)| *op)
}

const DESCRIPTIONS: [(ConvertOps, &str); 15] = [
    (ConvertOps::HAN_ASCII_TO_ZEN_ASCII, "half-width ASCII -> full-width ASCII"),
    (ConvertOps::HAN_LETTER_TO_ZEN_LETTER, "half-width letter -> full-width letter"),
    (ConvertOps::HAN_NUMBER_TO_ZEN_NUMBER, "half-width number -> full-width number"),
    (ConvertOps::HAN_SPACE_TO_ZEN_SPACE, "half-width space -> full-width space"),
    (ConvertOps::ZEN_ASCII_TO_HAN_ASCII, "full-width ASCII -> half-width ASCII"),
    (ConvertOps::ZEN_LETTER_TO_HAN_LETTER, "full-width letter -> half-width letter"),
    (ConvertOps::ZEN_NUMBER_TO_HAN_NUMBER, "full-width number -> half-width number"),
    (ConvertOps::ZEN_SPACE_TO_HAN_SPACE, "full-width space -> half-width space"),
    (ConvertOps::HAN_KATA_TO_ZEN_KATA, "half-width katakana -> full-width katakana"),
    (ConvertOps::HAN_KATA_TO_ZEN_HIRA, "half-width katakana -> full-width hiragana"),
    (ConvertOps::ZEN_KATA_TO_HAN_KATA, "full-width katakana -> half-width katakana"),
    (ConvertOps::ZEN_HIRA_TO_HAN_KATA, "full-width hiragana -> half-width katakana"),
    (ConvertOps::ZEN_HIRA_TO_ZEN_KATA, "full-width hiragana -> full-width katakana"),
    (ConvertOps::ZEN_KATA_TO_ZEN_HIRA, "full-width katakana -> full-width hiragana"),
    (ConvertOps::KEEP_DIACRITIC_MARKS_APART, "keep half-width diacritic marks apart"),
];

/// Human-readable description of a single flag.
pub fn describe(op: ConvertOps) -> &'static str {
    DESCRIPTIONS
        .iter()
        .find(|(flag, _)| *flag == op)
        .map_or("combined operations", |(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_match_historical_values() {
        assert_eq!(ConvertOps::HAN_ASCII_TO_ZEN_ASCII.bits(), 0x1);
        assert_eq!(ConvertOps::ZEN_SPACE_TO_HAN_SPACE.bits(), 0x80);
        assert_eq!(ConvertOps::HAN_KATA_TO_ZEN_HIRA.bits(), 0x200);
        assert_eq!(ConvertOps::ZEN_HIRA_TO_HAN_KATA.bits(), 0x2000);
        assert_eq!(ConvertOps::ZEN_KATA_TO_ZEN_HIRA.bits(), 0x20000);
        assert_eq!(ConvertOps::KEEP_DIACRITIC_MARKS_APART.bits(), 0x100000);
    }

    #[test]
    fn mnemonic_table_covers_every_conversion_once() {
        let combined = MNEMONIC_TABLE
            .iter()
            .fold(ConvertOps::empty(), |acc, (_, op)| acc | *op);
        assert_eq!(combined, ConvertOps::CONVERSIONS);
        for (i, (_, a)) in MNEMONIC_TABLE.iter().enumerate() {
            for (_, b) in &MNEMONIC_TABLE[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn parse_mnemonic() {
        assert_eq!(ConvertOps::from_mnemonic("K"), ConvertOps::HAN_KATA_TO_ZEN_KATA);
        assert_eq!(
            ConvertOps::from_mnemonic("Kc"),
            ConvertOps::HAN_KATA_TO_ZEN_KATA | ConvertOps::ZEN_KATA_TO_ZEN_HIRA
        );
        assert!(ConvertOps::from_mnemonic("").is_empty());
    }

    #[test]
    fn unknown_letters_contribute_nothing() {
        assert_eq!(ConvertOps::from_mnemonic("KV"), ConvertOps::from_mnemonic("K"));
        assert!(ConvertOps::from_mnemonic("VxZ!あ").is_empty());
    }

    #[test]
    fn mnemonic_round_trip() {
        let ops: ConvertOps = "cKVrA".parse().unwrap();
        assert_eq!(ops.to_mnemonic(), "ArKc");
        assert_eq!(ops.to_string(), "ArKc");
        assert_eq!(ConvertOps::from_mnemonic(&ops.to_mnemonic()), ops);
    }

    #[test]
    fn modifier_has_no_letter() {
        let ops = ConvertOps::HAN_KATA_TO_ZEN_KATA | ConvertOps::KEEP_DIACRITIC_MARKS_APART;
        assert_eq!(ops.to_mnemonic(), "K");
        assert!(!ConvertOps::KEEP_DIACRITIC_MARKS_APART.has_conversion());
        assert!(ops.has_conversion());
    }

    #[test]
    fn from_mask_is_permissive() {
        assert!(ConvertOps::from_mask(0).is_empty());
        assert!(ConvertOps::from_mask(-1).is_empty());
        assert!(ConvertOps::from_mask(0x4000).is_empty());
        assert_eq!(
            ConvertOps::from_mask(0x0010_0100),
            ConvertOps::HAN_KATA_TO_ZEN_KATA | ConvertOps::KEEP_DIACRITIC_MARKS_APART
        );
    }

    #[test]
    fn from_mask_is_a_signed_32_bit_value() {
        assert!(ConvertOps::from_mask(0x8000_0100).is_empty());
        assert!(ConvertOps::from_mask(0x1_0000_0100).is_empty());
        assert!(ConvertOps::from_mask(i64::from(i32::MIN)).is_empty());
        assert_eq!(
            ConvertOps::from_mask(i64::from(i32::MAX)),
            ConvertOps::all()
        );
    }

    #[test]
    fn conversions_exclude_the_modifier() {
        assert!(!ConvertOps::CONVERSIONS.contains(ConvertOps::KEEP_DIACRITIC_MARKS_APART));
        assert_eq!(
            ConvertOps::CONVERSIONS | ConvertOps::KEEP_DIACRITIC_MARKS_APART,
            ConvertOps::all()
        );
    }

    #[test]
    fn insert_and_remove() {
        let mut ops = ConvertOps::empty();
        ops.insert(ConvertOps::ZEN_ASCII_TO_HAN_ASCII);
        ops |= ConvertOps::ZEN_SPACE_TO_HAN_SPACE;
        assert!(ops.contains(ConvertOps::ZEN_ASCII_TO_HAN_ASCII));
        ops.remove(ConvertOps::ZEN_ASCII_TO_HAN_ASCII);
        assert_eq!(ops, ConvertOps::ZEN_SPACE_TO_HAN_SPACE);
        assert_eq!(ops & ConvertOps::CONVERSIONS, ops);
    }

    #[test]
    fn describe_flags() {
        assert_eq!(
            describe(ConvertOps::HAN_KATA_TO_ZEN_KATA),
            "half-width katakana -> full-width katakana"
        );
        assert_eq!(
            describe(ConvertOps::KEEP_DIACRITIC_MARKS_APART),
            "keep half-width diacritic marks apart"
        );
        assert_eq!(describe(ConvertOps::all()), "combined operations");
    }
}
